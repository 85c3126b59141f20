//! Error types for cDIF parsing and serialization.
//!
//! Every failure in the crate is reported through [`Error`]. The variants follow
//! the cDIF error taxonomy, so callers can tell a malformed document apart from a
//! broken component reference or an unencodable value:
//!
//! - **Syntax**: malformed tokens, literals, directive lines or grammar, and
//!   invalid property names or type identifiers
//! - **Reference**: undefined or circular component references
//! - **Type**: mismatched spreads, disallowed values in strict mode, circular
//!   structures during serialization
//! - **Directive**: unknown or misplaced directives and version mismatches
//! - **General**: internal consistency failures such as mixing cDIF versions
//!
//! ## Examples
//!
//! ```rust
//! use serde_cdif::{Cdif, ErrorKind};
//!
//! let cdif = Cdif::default();
//! let err = cdif.parse("$missing\n").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Reference);
//! assert!(err.to_string().contains("\"missing\""));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced while parsing or serializing cDIF.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed text: tokens, literals, directive lines, grammar or identifiers.
    #[error("cDIF syntax error: {0}")]
    Syntax(String),

    /// A component reference that cannot be resolved.
    #[error("cDIF reference error: {0}")]
    Reference(String),

    /// A value of the wrong kind for where it was used.
    #[error("cDIF type error: {0}")]
    Type(String),

    /// A misused directive or an unexpected cDIF version.
    #[error("cDIF directive error: {0}")]
    Directive(String),

    /// Internal consistency failures (root omission, version mixing, ...).
    #[error("cDIF error: {0}")]
    General(String),

    /// Invalid configuration handed to the facade or file formatter.
    #[error("Invalid options: {0}")]
    Options(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised through serde or by a user hook
    #[error("Error: {0}")]
    Custom(String),
}

/// The category of an [`Error`], convenient for matching without the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Reference,
    Type,
    Directive,
    General,
    Options,
    Io,
    Custom,
}

impl Error {
    /// Creates a syntax error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cdif::{Error, ErrorKind};
    ///
    /// let err = Error::syntax("Unexpected end of input in object");
    /// assert_eq!(err.kind(), ErrorKind::Syntax);
    /// ```
    pub fn syntax<T: fmt::Display>(msg: T) -> Self {
        Error::Syntax(msg.to_string())
    }

    /// Creates a syntax error pointing at a byte offset of `text`.
    ///
    /// The message is suffixed with the 1-based line and column of the offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cdif::Error;
    ///
    /// let err = Error::syntax_at("Unknown token", "{\n  @\n}\n", 4);
    /// assert!(err.to_string().contains("line 2, column 3"));
    /// ```
    pub fn syntax_at<T: fmt::Display>(msg: T, text: &str, offset: usize) -> Self {
        let (line, col) = line_col(text, offset);
        Error::Syntax(format!("{} at line {}, column {}", msg, line, col))
    }

    /// Creates a reference error.
    pub fn reference<T: fmt::Display>(msg: T) -> Self {
        Error::Reference(msg.to_string())
    }

    /// Creates a type error.
    pub fn type_error<T: fmt::Display>(msg: T) -> Self {
        Error::Type(msg.to_string())
    }

    /// Creates a directive error.
    pub fn directive<T: fmt::Display>(msg: T) -> Self {
        Error::Directive(msg.to_string())
    }

    /// Creates a general (internal) error.
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Creates an invalid options error.
    pub fn options<T: fmt::Display>(msg: T) -> Self {
        Error::Options(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// Hooks use this to abort a parse or serialization with their own message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cdif::Error;
    ///
    /// let err = Error::custom("bad color!!!");
    /// assert!(err.to_string().contains("bad color!!!"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::Reference(_) => ErrorKind::Reference,
            Error::Type(_) => ErrorKind::Type,
            Error::Directive(_) => ErrorKind::Directive,
            Error::General(_) => ErrorKind::General,
            Error::Options(_) => ErrorKind::Options,
            Error::Io(_) => ErrorKind::Io,
            Error::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns the message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Error::Syntax(msg)
            | Error::Reference(msg)
            | Error::Type(msg)
            | Error::Directive(msg)
            | Error::General(msg)
            | Error::Options(msg)
            | Error::Io(msg)
            | Error::Custom(msg) => msg,
        }
    }
}

fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let col = match before.rfind('\n') {
        Some(pos) => before[pos + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, col)
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        assert_eq!(line_col("abc", 0), (1, 1));
        assert_eq!(line_col("abc\ndef", 5), (2, 2));
        assert_eq!(line_col("a\n\n", 2), (3, 1));
    }

    #[test]
    fn test_kind_and_message() {
        let err = Error::directive("Unknown directive \"foo\"");
        assert_eq!(err.kind(), ErrorKind::Directive);
        assert_eq!(err.message(), "Unknown directive \"foo\"");
        assert!(err.to_string().starts_with("cDIF directive error"));
    }
}
