//! The file form of cDIF text: the `# cDIF` header line and final semicolon.

use crate::error::{Error, Result};
use crate::options::FileOptions;
use regex::Regex;
use std::sync::LazyLock;

static VERSION_STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*)(?:\.(?:0|[1-9][0-9]*))*$").expect("valid version regex")
});

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*cDIF\s*(.*)$").expect("valid header regex"));

/// Extracts the major version from a version string such as `1.0.2`.
pub(crate) fn major_version(version_string: &str) -> Result<u64> {
    VERSION_STRING_RE
        .captures(version_string)
        .and_then(|captures| captures[1].parse().ok())
        .ok_or_else(|| {
            Error::directive(format!(
                "Invalid cDIF version string \"{}\"",
                version_string
            ))
        })
}

/// Checks that a version string is well formed and names `version` as its
/// major version.
pub(crate) fn validate_version_string(version_string: &str, version: u32) -> Result<()> {
    let major = major_version(version_string)?;
    if major != u64::from(version) {
        return Err(Error::directive(format!(
            "cDIF version mismatch (expected {}, got {})",
            version, major
        )));
    }
    Ok(())
}

/// Wraps serialized cDIF text in its file form.
pub(crate) fn format_file(text: &str, options: &FileOptions, version: u32) -> Result<String> {
    if let Some(version_string) = &options.version_string {
        if !options.allow_unexpected_version_string {
            validate_version_string(version_string, version)?;
        }
    }
    let add_header = options
        .add_header
        .unwrap_or(options.version_string.is_some());
    let mut output = String::with_capacity(text.len() + 16);
    if add_header {
        let Some(version_string) = &options.version_string else {
            return Err(Error::options(
                "A version string must be supplied when add_header is set",
            ));
        };
        output.push_str("# cDIF ");
        output.push_str(version_string);
        output.push('\n');
    }
    output.push_str(text);
    if options.add_final_semicolon {
        output.push(';');
    }
    output.push('\n');
    Ok(output)
}

/// Reads the major version from the `# cDIF` directive on the first line, if
/// there is one.
pub(crate) fn cdif_version(text: &str) -> Result<Option<u64>> {
    let first_line = text.split('\n').next().unwrap_or_default().trim_end();
    match HEADER_RE.captures(first_line) {
        Some(captures) => major_version(&captures[1]).map(Some),
        None => Ok(None),
    }
}
