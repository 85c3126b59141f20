//! Handles directives and splits the token stream into sections.

use crate::error::{Error, Result};
use crate::file::validate_version_string;
use crate::options::ParserOptions;
use crate::tokenizer::{Token, TokenKind};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^#\s*(\S+)\s*(.*)$").expect("valid directive regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum SectionKind {
    Main,
    Components,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SectionKind::Main => "main",
            SectionKind::Components => "components",
        })
    }
}

/// Non-directive tokens grouped by section, in order of appearance. The main
/// section is always present.
#[derive(Debug)]
pub(crate) struct Sections<'a> {
    sections: IndexMap<SectionKind, Vec<Token<'a>>>,
}

impl<'a> Sections<'a> {
    pub(crate) fn get(&self, kind: SectionKind) -> Option<&[Token<'a>]> {
        self.sections.get(&kind).map(Vec::as_slice)
    }

    pub(crate) fn main(&self) -> &[Token<'a>] {
        self.get(SectionKind::Main).unwrap_or_default()
    }
}

pub(crate) fn split_sections<'a>(
    tokens: &[Token<'a>],
    options: &ParserOptions,
    version: u32,
) -> Result<Sections<'a>> {
    let mut sections: IndexMap<SectionKind, Vec<Token<'a>>> = IndexMap::new();
    sections.insert(SectionKind::Main, Vec::new());
    let mut current = SectionKind::Main;

    for (index, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Directive {
            sections.entry(current).or_default().push(*token);
            continue;
        }
        let captures = DIRECTIVE_RE.captures(token.text).ok_or_else(|| {
            Error::syntax(format!("Invalid directive syntax: \"{}\"", token.text))
        })?;
        let (name, arg) = (&captures[1], captures[2].trim());
        match name {
            "cDIF" => {
                if index != 0 {
                    return Err(Error::directive(
                        "\"cDIF\" directive may only occur at start of file",
                    ));
                }
                if !options.allow_unexpected_version_string {
                    validate_version_string(arg, version)?;
                }
            }
            "components" => {
                if sections.contains_key(&SectionKind::Components) {
                    return Err(Error::directive(format!(
                        "Cannot begin section {} again",
                        SectionKind::Components
                    )));
                }
                sections.insert(SectionKind::Components, Vec::new());
                current = SectionKind::Components;
            }
            _ => {
                return Err(Error::directive(format!(
                    "Unknown directive: \"{}\"",
                    name
                )))
            }
        }
    }

    tracing::debug!(
        main = sections.get(&SectionKind::Main).map_or(0, Vec::len),
        components = sections.get(&SectionKind::Components).map(Vec::len),
        "split cDIF sections"
    );
    Ok(Sections { sections })
}
