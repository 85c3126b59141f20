//! Name and type identifier grammar.
//!
//! Object property names and type identifiers share the name grammar
//! `[letter_][letter digit $ _]*` where letters may be any Unicode letter.
//! Type identifiers additionally exclude the reserved keywords.

use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}0-9$_]*$").expect("valid name regex"));

/// Keywords that can never be used as a type identifier.
pub const RESERVED_WORDS: [&str; 5] = ["infinity", "true", "false", "null", "undef"];

/// Returns `true` if `name` is a valid object property name.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::identifiers::is_valid_name;
///
/// assert!(is_valid_name("déjà_vu$2"));
/// assert!(is_valid_name("null"));
/// assert!(!is_valid_name("2fast"));
/// assert!(!is_valid_name("has space"));
/// ```
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Returns `true` if `type_name` is a valid type identifier.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::identifiers::is_valid_type_name;
///
/// assert!(is_valid_type_name("Color"));
/// assert!(!is_valid_type_name("undef"));
/// assert!(!is_valid_type_name("Bad Type Name"));
/// ```
#[must_use]
pub fn is_valid_type_name(type_name: &str) -> bool {
    is_valid_name(type_name) && !RESERVED_WORDS.contains(&type_name)
}
