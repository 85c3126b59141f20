//! Canonical representation of cDIF scalar literals.
//!
//! A [`PrimitiveValue`] is an immutable, version-tagged scalar. It can be built
//! from literal text ([`PrimitiveValue::from_cdif_text`]), from its parts (the
//! variant constructors) or from native Rust values, and always renders back to
//! one canonical text form:
//!
//! | literal | canonical text |
//! |---|---|
//! | `0x1_1` | `17` |
//! | `-0000` | `0` |
//! | `0000.00000e+00000` | `0.` |
//! | `-.4e7` | `-0.4e7` |
//! | `+infinity` | `infinity` |
//! | `` `C:\Users` `` | `"C:\\Users"` |
//!
//! ## Character entities
//!
//! Characters and strings are stored as sequences of *character entities*.
//! An entity is either one printable code point or one escape sequence
//! (`\n`, `\t`, `\uXXXX`, `\UXXXXXXXX`, ...). Entities are canonicalized for the
//! quote that encloses them: a quote matching the delimiter is escaped, any
//! other quote is not, `\/` becomes `/` and a raw tab becomes `\t`.
//!
//! ```rust
//! use serde_cdif::{PrimitiveValue, CDIF_LATEST};
//!
//! let value = PrimitiveValue::from_cdif_text(r#""3\/4 cup \'flour\'""#, CDIF_LATEST).unwrap();
//! assert_eq!(value.cdif_text(), r#""3/4 cup 'flour'""#);
//! ```

use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_traits::{Num, Zero};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[0-9](?:_?[0-9])*|0[bB][01](?:_?[01])*|0[oO][0-7](?:_?[0-7])*|0[xX][0-9a-fA-F](?:_?[0-9a-fA-F])*)$",
    )
    .expect("valid integer regex")
});

static SIGNIFICAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9](?:_?[0-9])*)?\.(?:[0-9](?:_?[0-9])*)?$").expect("valid significand regex")
});

static CANONICAL_SIGNIFICAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0|[1-9][0-9]*)\.(?:|[0-9]*[1-9])$").expect("valid significand regex")
});

static EXPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9](?:_?[0-9])*$").expect("valid exponent regex"));

static HEX4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^u[0-9a-fA-F]{4}$").expect("valid escape regex"));

static HEX8_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^U[0-9a-fA-F]{8}$").expect("valid escape regex"));

static PRINTABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\P{C}$").expect("valid printable regex"));

/// The scalar payload of a [`PrimitiveValue`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Integer(BigInt),
    Float(Float),
    Infinite { negative: bool },
    /// One canonical character entity.
    Character(String),
    /// Canonical character entities, in order.
    String(Vec<String>),
    Boolean(bool),
    Null,
}

/// A finite float in normalized `(sign, significand, exponent)` form.
///
/// The significand is a decimal string with exactly one `.`, no leading zero
/// run before the point (other than a single `0`) and no trailing zeros after
/// it, e.g. `"0."`, `"42.125"`, `"100."`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Float {
    negative: bool,
    significand: String,
    exponent: BigInt,
}

impl Float {
    /// Creates a float from already normalized parts.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if `significand` is not in normalized form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cdif::Float;
    /// use num_bigint::BigInt;
    ///
    /// let float = Float::new(true, "42.125", BigInt::from(1)).unwrap();
    /// assert_eq!(float.to_f64(), -421.25);
    /// assert!(Float::new(false, "042.", BigInt::from(0)).is_err());
    /// ```
    pub fn new(negative: bool, significand: impl Into<String>, exponent: BigInt) -> Result<Self> {
        let significand = significand.into();
        if !CANONICAL_SIGNIFICAND_RE.is_match(&significand) {
            return Err(Error::syntax(format!(
                "Invalid float significand \"{}\"",
                significand
            )));
        }
        Ok(Float {
            negative,
            significand,
            exponent,
        })
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub fn significand(&self) -> &str {
        &self.significand
    }

    #[must_use]
    pub const fn exponent(&self) -> &BigInt {
        &self.exponent
    }

    /// Converts to the nearest `f64`; out-of-range magnitudes saturate to
    /// infinity or zero.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let sign = if self.negative { "-" } else { "" };
        format!("{}{}e{}", sign, self.significand, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// Normalizes a finite `f64`. Returns `None` for NaN and infinities.
    pub(crate) fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // shortest round-trip digits, in positional form inside [1e-6, 1e21)
        let text = if value == 0.0 || (1e-6..1e21).contains(&value.abs()) {
            format!("{}", value)
        } else {
            format!("{:e}", value)
        };
        let (negative, body) = split_sign(&text);
        let (mantissa, exponent) = match body.split_once('e') {
            Some((mantissa, exponent)) => (mantissa, exponent.parse::<BigInt>().ok()?),
            None => (body, BigInt::zero()),
        };
        let significand = if mantissa.contains('.') {
            mantissa.to_string()
        } else {
            format!("{}.", mantissa)
        };
        Float::new(negative, significand, exponent).ok()
    }

    fn cdif_text(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        if self.exponent.is_zero() {
            format!("{}{}", sign, self.significand)
        } else {
            format!("{}{}e{}", sign, self.significand, self.exponent)
        }
    }
}

/// An immutable cDIF scalar tagged with the cDIF major version it belongs to.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{Primitive, PrimitiveValue, CDIF_LATEST};
///
/// let value = PrimitiveValue::from_cdif_text("0b101", CDIF_LATEST).unwrap();
/// assert_eq!(value.cdif_text(), "5");
/// assert!(matches!(value.kind(), Primitive::Integer(_)));
///
/// assert!(PrimitiveValue::from_cdif_text("NaN", CDIF_LATEST).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveValue {
    version: u32,
    kind: Primitive,
}

impl PrimitiveValue {
    /// Parses a single literal, trying each primitive kind in turn.
    ///
    /// # Errors
    ///
    /// Returns a syntax error naming the text if no primitive kind accepts it.
    pub fn from_cdif_text(text: &str, version: u32) -> Result<Self> {
        let kind = match text {
            "null" => Some(Primitive::Null),
            "true" => Some(Primitive::Boolean(true)),
            "false" => Some(Primitive::Boolean(false)),
            _ => parse_character(text)
                .or_else(|| parse_string(text))
                .or_else(|| parse_infinite(text))
                .or_else(|| parse_integer(text).map(Primitive::Integer))
                .or_else(|| parse_float(text).map(Primitive::Float)),
        };
        kind.map(|kind| PrimitiveValue { version, kind })
            .ok_or_else(|| Error::syntax(format!("Invalid cDIF primitive value \"{}\"", text)))
    }

    #[must_use]
    pub const fn integer(value: BigInt, version: u32) -> Self {
        PrimitiveValue {
            version,
            kind: Primitive::Integer(value),
        }
    }

    #[must_use]
    pub const fn float(value: Float, version: u32) -> Self {
        PrimitiveValue {
            version,
            kind: Primitive::Float(value),
        }
    }

    #[must_use]
    pub const fn infinite(negative: bool, version: u32) -> Self {
        PrimitiveValue {
            version,
            kind: Primitive::Infinite { negative },
        }
    }

    /// Creates a character from one character entity.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if `entity` is not exactly one valid entity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cdif::{PrimitiveValue, CDIF_LATEST};
    ///
    /// let quote = PrimitiveValue::character("'", CDIF_LATEST).unwrap();
    /// assert_eq!(quote.cdif_text(), r"'\''");
    /// assert!(PrimitiveValue::character("ab", CDIF_LATEST).is_err());
    /// ```
    pub fn character(entity: &str, version: u32) -> Result<Self> {
        let entity = canonicalize_entity(entity, '\'')
            .ok_or_else(|| invalid_entity(entity))?;
        Ok(PrimitiveValue {
            version,
            kind: Primitive::Character(entity),
        })
    }

    /// Creates a string from a sequence of character entities.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if any entity is invalid.
    pub fn string<I, S>(entities: I, version: u32) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entities = entities
            .into_iter()
            .map(|entity| {
                let entity = entity.as_ref();
                canonicalize_entity(entity, '"').ok_or_else(|| invalid_entity(entity))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(PrimitiveValue {
            version,
            kind: Primitive::String(entities),
        })
    }

    #[must_use]
    pub const fn boolean(value: bool, version: u32) -> Self {
        PrimitiveValue {
            version,
            kind: Primitive::Boolean(value),
        }
    }

    #[must_use]
    pub const fn null(version: u32) -> Self {
        PrimitiveValue {
            version,
            kind: Primitive::Null,
        }
    }

    /// Creates a string from native text, escaping as needed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cdif::{PrimitiveValue, CDIF_LATEST};
    ///
    /// let value = PrimitiveValue::from_native_string("say \"hi\"\n", CDIF_LATEST);
    /// assert_eq!(value.cdif_text(), r#""say \"hi\"\n""#);
    /// ```
    #[must_use]
    pub fn from_native_string(text: &str, version: u32) -> Self {
        let entities = text
            .chars()
            .map(|c| quote_entity(escape_char(c), '"'))
            .collect();
        PrimitiveValue {
            version,
            kind: Primitive::String(entities),
        }
    }

    #[must_use]
    pub fn from_native_char(c: char, version: u32) -> Self {
        PrimitiveValue {
            version,
            kind: Primitive::Character(quote_entity(escape_char(c), '\'')),
        }
    }

    /// The cDIF major version this value was created under.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub const fn kind(&self) -> &Primitive {
        &self.kind
    }

    /// Renders the canonical literal text.
    #[must_use]
    pub fn cdif_text(&self) -> String {
        match &self.kind {
            Primitive::Integer(value) => value.to_string(),
            Primitive::Float(value) => value.cdif_text(),
            Primitive::Infinite { negative: true } => "-infinity".to_string(),
            Primitive::Infinite { negative: false } => "infinity".to_string(),
            Primitive::Character(entity) => format!("'{}'", entity),
            Primitive::String(entities) => format!("\"{}\"", entities.concat()),
            Primitive::Boolean(value) => value.to_string(),
            Primitive::Null => "null".to_string(),
        }
    }

    /// The native text of a character or string value.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match &self.kind {
            Primitive::Character(entity) => Some(entity_char(entity).to_string()),
            Primitive::String(entities) => Some(entities.iter().map(|e| entity_char(e)).collect()),
            _ => None,
        }
    }

    /// The native character of a character value.
    #[must_use]
    pub fn char_value(&self) -> Option<char> {
        match &self.kind {
            Primitive::Character(entity) => Some(entity_char(entity)),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cdif_text())
    }
}

fn invalid_entity(entity: &str) -> Error {
    Error::syntax(format!("Invalid character entity \"{}\"", entity.escape_debug()))
}

/// Returns `true` for code points outside the Unicode "Other" categories.
pub(crate) fn is_printable(c: char) -> bool {
    let mut buf = [0u8; 4];
    PRINTABLE_RE.is_match(c.encode_utf8(&mut buf))
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn parse_integer(text: &str) -> Option<BigInt> {
    let (negative, body) = split_sign(text);
    if !INTEGER_RE.is_match(body) {
        return None;
    }
    let digits = body.replace('_', "");
    let (radix, digits) = match digits.get(..2) {
        Some("0b" | "0B") => (2, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0x" | "0X") => (16, &digits[2..]),
        _ => (10, digits.as_str()),
    };
    let magnitude = BigInt::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float(text: &str) -> Option<Float> {
    let (negative, body) = split_sign(text);
    let parts: Vec<&str> = body.split(['e', 'E']).collect();
    let (significand, exponent) = match parts.as_slice() {
        [significand] => (*significand, None),
        [significand, exponent] => (*significand, Some(*exponent)),
        _ => return None,
    };
    if significand == "." || !SIGNIFICAND_RE.is_match(significand) {
        return None;
    }
    let significand = significand.replace('_', "");
    let trimmed = significand.trim_start_matches('0').trim_end_matches('0');
    let significand = if trimmed.starts_with('.') {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    };
    let exponent = match exponent {
        Some(exponent) => {
            let (exp_negative, digits) = split_sign(exponent);
            if !EXPONENT_RE.is_match(digits) {
                return None;
            }
            let magnitude: BigInt = digits.replace('_', "").parse().ok()?;
            if exp_negative {
                -magnitude
            } else {
                magnitude
            }
        }
        None => BigInt::zero(),
    };
    Float::new(negative, significand, exponent).ok()
}

fn parse_infinite(text: &str) -> Option<Primitive> {
    match text {
        "infinity" | "+infinity" => Some(Primitive::Infinite { negative: false }),
        "-infinity" => Some(Primitive::Infinite { negative: true }),
        _ => None,
    }
}

fn parse_character(text: &str) -> Option<Primitive> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    if inner.is_empty() || inner == "'" {
        return None;
    }
    canonicalize_entity(inner, '\'').map(Primitive::Character)
}

fn parse_string(text: &str) -> Option<Primitive> {
    let entities = parse_block_string(text).or_else(|| parse_one_line_string(text))?;
    entities
        .iter()
        .map(|entity| canonicalize_entity(entity, '"'))
        .collect::<Option<Vec<_>>>()
        .map(Primitive::String)
}

fn parse_one_line_string(text: &str) -> Option<Vec<String>> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '`')?;
    let inner = text.get(1..)?.strip_suffix(quote)?;
    let verbatim = quote == '`';
    let delimiter = quote.to_string();
    split_into_entities(inner, verbatim, &delimiter)
}

fn parse_block_string(text: &str) -> Option<Vec<String>> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '`')?;
    let run = text.chars().take_while(|c| *c == quote).count();
    // the longest delimiter that also closes the literal wins
    let (delimiter, inner) = (3..=run).rev().find_map(|len| {
        let delimiter = quote.to_string().repeat(len);
        if text.len() < 2 * len || !text.ends_with(&delimiter) {
            return None;
        }
        Some((delimiter, &text[len..text.len() - len]))
    })?;
    let verbatim = quote == '`';
    let stripped = strip_block_whitespace(inner);
    let entities = split_into_entities(&stripped, verbatim, &delimiter)?;
    Some(
        entities
            .into_iter()
            .filter(|entity| verbatim || entity != "\\\n")
            .map(|entity| if entity == "\n" { "\\n".to_string() } else { entity })
            .collect(),
    )
}

fn split_into_entities(text: &str, verbatim: bool, delimiter: &str) -> Option<Vec<String>> {
    let entities = if verbatim {
        text.chars()
            .map(|c| if c == '\\' { "\\\\".to_string() } else { c.to_string() })
            .collect()
    } else {
        split_escaped(text)?
    };
    let delimiter: Vec<String> = delimiter.chars().map(String::from).collect();
    if entities
        .windows(delimiter.len())
        .any(|window| window == delimiter.as_slice())
    {
        return None;
    }
    Some(entities)
}

fn split_escaped(text: &str) -> Option<Vec<String>> {
    let mut entities = Vec::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            entities.push(c.to_string());
            continue;
        }
        let mut entity = String::from('\\');
        let id = chars.next()?;
        entity.push(id);
        let remaining = match id {
            'u' => 4,
            'U' => 8,
            _ => 0,
        };
        for _ in 0..remaining {
            entity.push(chars.next()?);
        }
        entities.push(entity);
    }
    Some(entities)
}

fn strip_block_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.len() == 1 {
        return text.to_string();
    }
    let first = lines.remove(0);
    let preserved_first = (!first.trim().is_empty()).then_some(first);
    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let mut common: Option<&str> = None;
    for line in lines.iter().filter(|line| !line.is_empty()) {
        let indent = &line[..line.len() - line.trim_start().len()];
        let shared = match common {
            None => indent,
            Some(previous) => {
                let len = previous
                    .chars()
                    .zip(indent.chars())
                    .take_while(|(a, b)| a == b)
                    .map(|(a, _)| a.len_utf8())
                    .sum();
                &previous[..len]
            }
        };
        common = Some(shared);
        if shared.is_empty() {
            break;
        }
    }
    let common_len = common.map_or(0, str::len);
    let mut result: Vec<&str> = lines
        .into_iter()
        .map(|line| if line.is_empty() { line } else { &line[common_len..] })
        .collect();
    if let Some(first) = preserved_first {
        result.insert(0, first);
    }
    result.join("\n")
}

/// Canonicalizes one character entity for the given enclosing quote.
fn canonicalize_entity(entity: &str, quote: char) -> Option<String> {
    if let Some(rest) = entity.strip_prefix('\\') {
        return match rest {
            "b" | "f" | "n" | "r" | "t" | "v" | "\\" => Some(entity.to_string()),
            "'" | "\"" => Some(if rest.starts_with(quote) {
                entity.to_string()
            } else {
                rest.to_string()
            }),
            "/" => Some("/".to_string()),
            _ if HEX4_RE.is_match(rest) || HEX8_RE.is_match(rest) => {
                // escapes must name a Unicode scalar value
                u32::from_str_radix(&rest[1..], 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(|_| entity.to_string())
            }
            _ => None,
        };
    }
    let mut chars = entity.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c == quote {
        Some(format!("\\{}", c))
    } else if c == '\t' {
        Some("\\t".to_string())
    } else if is_printable(c) {
        Some(c.to_string())
    } else {
        None
    }
}

fn quote_entity(entity: String, quote: char) -> String {
    canonicalize_entity(&entity, quote).unwrap_or(entity)
}

/// The escape (or plain) entity used when encoding a native character.
pub(crate) fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\u{8}' => "\\b".to_string(),
        '\u{c}' => "\\f".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\u{b}' => "\\v".to_string(),
        c if is_printable(c) => c.to_string(),
        c => {
            let hex = format!("{:X}", c as u32);
            if hex.len() <= 4 {
                format!("\\u{:0>4}", hex)
            } else {
                format!("\\U{:0>8}", hex)
            }
        }
    }
}

/// Resolves a canonical entity to the character it denotes.
fn entity_char(entity: &str) -> char {
    let mut chars = entity.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some(id)) => match id {
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            'u' | 'U' => u32::from_str_radix(&entity[2..], 16)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER),
            other => other,
        },
        (Some(c), _) => c,
        (None, _) => char::REPLACEMENT_CHARACTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VER: u32 = 1;

    fn text(literal: &str) -> String {
        PrimitiveValue::from_cdif_text(literal, VER)
            .unwrap_or_else(|err| panic!("{:?} rejected: {}", literal, err))
            .cdif_text()
    }

    fn rejects(literal: &str) -> bool {
        PrimitiveValue::from_cdif_text(literal, VER).is_err()
    }

    #[test]
    fn test_nonsense() {
        for literal in ["", "foo", "NaN", "undef"] {
            assert!(rejects(literal), "{:?}", literal);
        }
    }

    #[test]
    fn test_integer() {
        assert_eq!(text("0"), "0");
        assert_eq!(text("+1"), "1");
        assert_eq!(text("-156987436758642598743323"), "-156987436758642598743323");
        assert_eq!(text("+1_2345_6_7_89"), "123456789");
        assert_eq!(text("0642"), "642");
        assert_eq!(text("-0000"), "0");
        assert_eq!(text("-000033"), "-33");
        assert_eq!(text("0B101"), "5");
        assert_eq!(text("0o111"), "73");
        assert_eq!(text("-0x11"), "-17");
        assert_eq!(text("0x31_a5_B9_94"), "832944532");
        for literal in [
            "4_", "_4", "-_3", "0b102", "0o80", "0x_2", "0x1g", "0b", "0o", "0x", "0-x11",
            "0x-11", "3e5", "1x11",
        ] {
            assert!(rejects(literal), "{:?}", literal);
        }
    }

    #[test]
    fn test_float() {
        assert_eq!(text("0."), "0.");
        assert_eq!(text("0.0"), "0.");
        assert_eq!(text("0000.00000e+00000"), "0.");
        assert_eq!(text("1.3e+4"), "1.3e4");
        assert_eq!(text("1.3e-4"), "1.3e-4");
        assert_eq!(text("10.0"), "10.");
        assert_eq!(text("-.4e7"), "-0.4e7");
        assert_eq!(text("-1_2.3_4e+5_6"), "-12.34e56");
        assert_eq!(
            text("5832798740932741.32413297493274949323e3214713294873294732"),
            "5832798740932741.32413297493274949323e3214713294873294732"
        );
        for literal in [
            ".", "-.e7", "1e7.", "1e.7", "0x1.", "0b.1", "0o1e1", ".e3", "_1.2e4", "1_.2e4",
            "1._2e4", "1.2_e4", "1.2e_4", "1.2e4_",
        ] {
            assert!(rejects(literal), "{:?}", literal);
        }
    }

    #[test]
    fn test_float_to_f64() {
        let float = parse_float("-42.6e-1").unwrap();
        assert_eq!(float.to_f64(), -4.26);
        assert_eq!(parse_float("1.5e400").unwrap().to_f64(), f64::INFINITY);
    }

    #[test]
    fn test_float_from_f64() {
        let render = |v: f64| Float::from_f64(v).map(|f| f.cdif_text());
        assert_eq!(render(1.0).as_deref(), Some("1."));
        assert_eq!(render(255.0).as_deref(), Some("255."));
        assert_eq!(render(42.125).as_deref(), Some("42.125"));
        assert_eq!(render(0.1).as_deref(), Some("0.1"));
        assert_eq!(render(1e-6).as_deref(), Some("0.000001"));
        assert_eq!(render(9.5e-7).as_deref(), Some("9.5e-7"));
        assert_eq!(render(1e21).as_deref(), Some("1.e21"));
        assert_eq!(render(-1.5e-8).as_deref(), Some("-1.5e-8"));
        assert_eq!(render(f64::NAN), None);
        assert_eq!(render(f64::INFINITY), None);
    }

    #[test]
    fn test_infinite() {
        assert_eq!(text("infinity"), "infinity");
        assert_eq!(text("+infinity"), "infinity");
        assert_eq!(text("-infinity"), "-infinity");
        assert!(rejects("Infinity"));
        assert!(rejects("INFINITY"));
    }

    #[test]
    fn test_character() {
        assert_eq!(text("'a'"), "'a'");
        assert_eq!(text("'😊'"), "'😊'");
        assert_eq!(text("'\"'"), "'\"'");
        assert_eq!(text(r"'\n'"), r"'\n'");
        assert_eq!(text(r#"'\"'"#), "'\"'");
        assert_eq!(text(r"'\''"), r"'\''");
        assert_eq!(text(r"'\\'"), r"'\\'");
        assert_eq!(text(r"'\/'"), "'/'");
        assert_eq!(text(r"'\u1a32'"), r"'\u1a32'");
        assert_eq!(text(r"'\U0001F600'"), r"'\U0001F600'");
        for literal in [
            "'\n'", "'🏳️‍⚧️'", "'ab'", r"'\'", "'", "''", "'''", r"'n\'", r"'\\\'", r"'\N'",
            r"'\q'", r"'\u'", r"'\U'", r"'\n1a32'", r"'\u1g32'", r"'\u1a325555'", r"'\U1a32'",
            r"'\UFFFFFFFF'", r"'\uD800'",
        ] {
            assert!(rejects(literal), "{:?}", literal);
        }
    }

    #[test]
    fn test_string() {
        assert_eq!(text("\"\""), "\"\"");
        assert_eq!(text(r#""Hello\nWorld""#), r#""Hello\nWorld""#);
        assert_eq!(text("\"Emojis: 😊❤️\""), "\"Emojis: 😊❤️\"");
        assert_eq!(
            text(r#""3\/4 cup\tflower with \"all\" \'natural\' tests/cases""#),
            r#""3/4 cup\tflower with \"all\" 'natural' tests/cases""#
        );
        for literal in [
            "\"Hello\nWorld\"",
            "\"Contains ZWJ: 🏳️‍⚧️\"",
            r#""Bad char code: \u109g""#,
            r#""Unfinished char code: \u109""#,
            r#""Unfinished char code: \U1082239""#,
            r#""You can't just say "perchance""#,
            "\"",
            "\"foo",
            "foo\"",
            "\"\"foo\"",
        ] {
            assert!(rejects(literal), "{:?}", literal);
        }
    }

    #[test]
    fn test_verbatim_string() {
        assert_eq!(text("``"), "\"\"");
        assert_eq!(text(r"`Hello\nWorld`"), r#""Hello\\nWorld""#);
        assert_eq!(text(r"`C:\Users`"), r#""C:\\Users""#);
        assert_eq!(text(r#"`\n\t\u\"\'/`"#), r#""\\n\\t\\u\\\"\\'/""#);
        for literal in ["`Hello\nWorld`", "`the`problem`", "`", "`foo", "``foo`"] {
            assert!(rejects(literal), "{:?}", literal);
        }
    }

    #[test]
    fn test_block_string() {
        // accepted as a literal, but the tokenizer reads all six quotes as one delimiter
        assert_eq!(text("\"\"\"\"\"\""), "\"\"");
        assert_eq!(text("\"\"\"foo\nbar\nbaz\"\"\""), r#""foo\nbar\nbaz""#);
        assert_eq!(
            text("\"\"\"\n\tfunction foo() {\n\t\treturn \"hi\";\n\t}\n\n\tlet bar = \"\\u0048ello \\\n\tworld\";\n\"\"\""),
            r#""function foo() {\n\treturn \"hi\";\n}\n\nlet bar = \"\u0048ello world\";""#
        );
        assert_eq!(
            text("\"\"\"\"\"i have too much \"\"\"\"quotes\"\"\"\" in me\"\"\"\"\""),
            r#""i have too much \"\"\"\"quotes\"\"\"\" in me""#
        );
    }

    #[test]
    fn test_verbatim_block_keeps_backslash_newline() {
        let value = PrimitiveValue::from_cdif_text("```\n  a\\\n  b\n```", VER).unwrap();
        assert_eq!(value.text().as_deref(), Some("a\\\nb"));
    }

    #[test]
    fn test_native_text() {
        let value = PrimitiveValue::from_cdif_text(r#""a\nb \U0001F4A9 \u0048""#, VER).unwrap();
        assert_eq!(value.text().as_deref(), Some("a\nb 💩 H"));
    }

    #[test]
    fn test_escape_char() {
        assert_eq!(escape_char('\u{7}'), r"\u0007");
        assert_eq!(escape_char('\u{200D}'), r"\u200D");
        assert_eq!(escape_char('\u{E0001}'), r"\U000E0001");
        assert_eq!(escape_char('é'), "é");
    }

    #[test]
    fn test_native_char_quote() {
        assert_eq!(PrimitiveValue::from_native_char('\'', VER).cdif_text(), r"'\''");
        assert_eq!(PrimitiveValue::from_native_char('"', VER).cdif_text(), "'\"'");
    }
}
