//! Configuration options for cDIF parsing and serialization.
//!
//! - [`ParserOptions`]: integer precision, postprocessors, version strictness
//! - [`SerializerOptions`]: strict mode, indentation, entry separators, preprocessors
//! - [`FileOptions`]: the `# cDIF` header and final semicolon of file output
//! - [`CdifOptions`]: the cDIF version plus parser and serializer options
//!
//! ## Examples
//!
//! ```rust
//! use serde_cdif::{to_string_with_options, Separator, SerializerOptions};
//!
//! let options = SerializerOptions::new()
//!     .with_indent("  ")
//!     .with_separator(Separator::Semicolon);
//! let text = to_string_with_options(&vec![1, 2], options).unwrap();
//! assert_eq!(text, "[\n  1;\n  2;\n]");
//! ```

use crate::error::{Error, Result};
use crate::hooks::{Postprocessor, Preprocessor};
use crate::CDIF_LATEST;
use std::fmt;
use std::sync::Arc;

/// Separator placed between structure entries.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::Separator;
///
/// assert_eq!(Separator::Comma.as_str(), ",");
/// assert_eq!(Separator::Semicolon.as_str(), ";");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Comma,
    Semicolon,
}

impl Separator {
    /// Returns the string representation of this separator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Separator::Comma => ",",
            Separator::Semicolon => ";",
        }
    }
}

/// Options for turning cDIF text into native values.
#[derive(Clone)]
pub struct ParserOptions {
    /// Decode every integer as a [`BigInt`](num_bigint::BigInt) instead of `i64`.
    pub use_big_int: bool,
    /// Hooks tried in order for every decoded value.
    pub postprocessors: Vec<Arc<dyn Postprocessor>>,
    /// Skip validation of the `# cDIF` directive's version string.
    pub allow_unexpected_version_string: bool,
    /// Maximum structure nesting accepted by the parser.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            use_big_int: false,
            postprocessors: Vec::new(),
            allow_unexpected_version_string: false,
            max_depth: 256,
        }
    }
}

impl ParserOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_big_int(mut self, use_big_int: bool) -> Self {
        self.use_big_int = use_big_int;
        self
    }

    /// Appends a postprocessor; earlier hooks take precedence.
    #[must_use]
    pub fn with_postprocessor<P: Postprocessor + 'static>(mut self, hook: P) -> Self {
        self.postprocessors.push(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_allow_unexpected_version_string(mut self, allow: bool) -> Self {
        self.allow_unexpected_version_string = allow;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("use_big_int", &self.use_big_int)
            .field("postprocessors", &self.postprocessors.len())
            .field(
                "allow_unexpected_version_string",
                &self.allow_unexpected_version_string,
            )
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Options for turning native values into cDIF text.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{Separator, SerializerOptions};
///
/// // Single line, comma separated
/// let options = SerializerOptions::new();
/// assert!(!options.adds_final_separator());
///
/// // Tab indented, semicolon terminated
/// let options = SerializerOptions::pretty();
/// assert_eq!(options.indent.as_deref(), Some("\t"));
/// assert!(options.adds_final_separator());
///
/// let options = SerializerOptions::pretty().with_final_separator(false);
/// assert!(!options.adds_final_separator());
/// ```
#[derive(Clone)]
pub struct SerializerOptions {
    /// Fail on values that cannot be encoded instead of replacing or omitting them.
    pub strict: bool,
    /// Indentation per nesting level; `None` renders everything on one line.
    pub indent: Option<String>,
    pub separator: Separator,
    /// Whether the last entry of a structure also gets a separator.
    /// `None` means "only when the separator is `;`".
    pub final_separator: Option<bool>,
    /// Hooks tried in order for every value before it is encoded.
    pub preprocessors: Vec<Arc<dyn Preprocessor>>,
    /// Maximum structure nesting accepted by the serializer.
    pub max_depth: usize,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        SerializerOptions {
            strict: true,
            indent: None,
            separator: Separator::default(),
            final_separator: None,
            preprocessors: Vec::new(),
            max_depth: 256,
        }
    }
}

impl SerializerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab indentation with `;` separators.
    #[must_use]
    pub fn pretty() -> Self {
        SerializerOptions {
            indent: Some("\t".to_string()),
            separator: Separator::Semicolon,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    /// Renders everything on a single line.
    #[must_use]
    pub fn without_indent(mut self) -> Self {
        self.indent = None;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_final_separator(mut self, final_separator: bool) -> Self {
        self.final_separator = Some(final_separator);
        self
    }

    /// Appends a preprocessor; earlier hooks take precedence.
    #[must_use]
    pub fn with_preprocessor<P: Preprocessor + 'static>(mut self, hook: P) -> Self {
        self.preprocessors.push(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolves [`final_separator`](Self::final_separator) against the separator.
    #[must_use]
    pub fn adds_final_separator(&self) -> bool {
        self.final_separator
            .unwrap_or(self.separator == Separator::Semicolon)
    }
}

impl fmt::Debug for SerializerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerOptions")
            .field("strict", &self.strict)
            .field("indent", &self.indent)
            .field("separator", &self.separator)
            .field("final_separator", &self.final_separator)
            .field("preprocessors", &self.preprocessors.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Options for the file form of serialized output.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{Cdif, FileOptions, Value};
///
/// let options = FileOptions::new()
///     .with_version_string("1.0.2")
///     .with_final_semicolon(true);
/// let text = Cdif::default().serialize_file(&Value::from(42), &options).unwrap();
/// assert_eq!(text, "# cDIF 1.0.2\n42;\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileOptions {
    /// Whether to start with a `# cDIF` directive. `None` means "only when a
    /// version string is given".
    pub add_header: Option<bool>,
    pub version_string: Option<String>,
    pub add_final_semicolon: bool,
    /// Write the version string without validating it.
    pub allow_unexpected_version_string: bool,
}

impl FileOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, add_header: bool) -> Self {
        self.add_header = Some(add_header);
        self
    }

    #[must_use]
    pub fn with_version_string(mut self, version_string: impl Into<String>) -> Self {
        self.version_string = Some(version_string.into());
        self
    }

    #[must_use]
    pub fn with_final_semicolon(mut self, add_final_semicolon: bool) -> Self {
        self.add_final_semicolon = add_final_semicolon;
        self
    }

    #[must_use]
    pub fn with_allow_unexpected_version_string(mut self, allow: bool) -> Self {
        self.allow_unexpected_version_string = allow;
        self
    }
}

/// Top-level configuration for a [`Cdif`](crate::Cdif) instance.
#[derive(Clone, Debug)]
pub struct CdifOptions {
    /// The cDIF major version to read and write.
    pub version: u32,
    pub parser: ParserOptions,
    pub serializer: SerializerOptions,
}

impl Default for CdifOptions {
    fn default() -> Self {
        CdifOptions {
            version: CDIF_LATEST,
            parser: ParserOptions::default(),
            serializer: SerializerOptions::default(),
        }
    }
}

impl CdifOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_serializer(mut self, serializer: SerializerOptions) -> Self {
        self.serializer = serializer;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.version == 0 || self.version > CDIF_LATEST {
            return Err(Error::options(format!(
                "cDIF version {} is not supported (latest is {})",
                self.version, CDIF_LATEST
            )));
        }
        if self.parser.max_depth == 0 || self.serializer.max_depth == 0 {
            return Err(Error::options("max_depth must be at least 1"));
        }
        Ok(())
    }
}
