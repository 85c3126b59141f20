//! Converts cDIF text into a flat token stream.
//!
//! Tokenizing is driven by a fixed rule table. At every offset the longest
//! matching rule wins (earlier rules win ties, which is how `true` becomes a
//! name rather than anything else). Whitespace and comments are matched but
//! produce no token. Textual literals (characters and strings) are scanned
//! entity by entity until their delimiter reappears.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Directive,
    Name,
    OtherLiteral,
    ComponentReference,
    ValueTerminator,
    ObjectStart,
    ObjectEnd,
    CollectionStart,
    CollectionEnd,
    KvSeparator,
    SpreadOperator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub(crate) const fn new(kind: TokenKind, text: &'a str) -> Self {
        Token { kind, text }
    }
}

struct Rule {
    pattern: Regex,
    kind: Option<TokenKind>,
    line_start: bool,
}

fn rule(pattern: &str, kind: Option<TokenKind>) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("valid token regex"),
        kind,
        line_start: false,
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use TokenKind::*;
    vec![
        Rule {
            line_start: true,
            ..rule(r"^#[^\n]*", Some(Directive))
        },
        rule(r"^[,;]", Some(ValueTerminator)),
        rule(r"^\{", Some(ObjectStart)),
        rule(r"^\}", Some(ObjectEnd)),
        rule(r"^\[", Some(CollectionStart)),
        rule(r"^\]", Some(CollectionEnd)),
        rule(r"^:", Some(KvSeparator)),
        rule(r"^\.\.\.", Some(SpreadOperator)),
        rule(r"^(?:[^\S\n]+\n?|\n)", None),
        rule(r"^//[^\n\r]*\n", None),
        rule(r"^(?s:/\*.*?\*/)", None),
        rule(r"^[\p{L}_][\p{L}0-9$_]*", Some(Name)),
        rule(r"^\$[\p{L}_][\p{L}0-9$_]*", Some(ComponentReference)),
        rule(r"^[+-]?infinity", Some(OtherLiteral)),
        rule(r"^[+-]?(?:0[0-9a-zA-Z_]*|[0-9][0-9_]*)", Some(OtherLiteral)),
        rule(
            r"^[+-]?(?:[0-9][0-9_]*)?\.[0-9_]*(?:[eE][+-]?[0-9_]*)?",
            Some(OtherLiteral),
        ),
    ]
});

const CHAR_ENTITY: &str = r"^(?:(?:[^\p{C}\\]|\t)|\\(?:[^\p{C}uU]|u[0-9a-fA-F]{4}|U[0-9a-fA-F]{8}))";
const ML_CHAR_ENTITY: &str =
    r"^(?:(?:[^\p{C}\\]|[\t\n])|\\(?:[^\p{C}uU]|\n|u[0-9a-fA-F]{4}|U[0-9a-fA-F]{8}))";

struct TextRule {
    delimiter: Regex,
    entity: Regex,
    single_entity: bool,
}

fn text_rule(delimiter: &str, entity: &str, single_entity: bool) -> TextRule {
    TextRule {
        delimiter: Regex::new(delimiter).expect("valid delimiter regex"),
        entity: Regex::new(entity).expect("valid entity regex"),
        single_entity,
    }
}

static TEXT_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![
        text_rule(r"^'", CHAR_ENTITY, true),
        text_rule(r"^`{3,}", r"^[\P{C}\t\n]", false),
        text_rule(r#"^"{3,}"#, ML_CHAR_ENTITY, false),
        text_rule(r"^`", r"^[\P{C}\t]", false),
        text_rule(r#"^""#, CHAR_ENTITY, false),
    ]
});

/// Strips trailing whitespace from every line and terminates the text with
/// exactly one newline.
pub(crate) fn normalize(text: &str) -> String {
    let mut normalized = text
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    let content_len = normalized.trim_end_matches('\n').len();
    normalized.truncate(content_len);
    normalized.push('\n');
    normalized
}

/// Splits normalized text into tokens.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let (len, kind) = match longest_rule(text, pos) {
            Some(found) => found,
            None => (scan_text_literal(text, pos)?, Some(TokenKind::OtherLiteral)),
        };
        if let Some(kind) = kind {
            tokens.push(Token::new(kind, &text[pos..pos + len]));
        }
        pos += len;
    }
    tracing::debug!(tokens = tokens.len(), bytes = text.len(), "tokenized cDIF text");
    Ok(tokens)
}

fn longest_rule(text: &str, pos: usize) -> Option<(usize, Option<TokenKind>)> {
    let rest = &text[pos..];
    let at_line_start = pos == 0 || text.as_bytes()[pos - 1] == b'\n';
    let mut best: Option<(usize, Option<TokenKind>)> = None;
    for rule in RULES.iter() {
        if rule.line_start && !at_line_start {
            continue;
        }
        if let Some(found) = rule.pattern.find(rest) {
            if best.map_or(true, |(len, _)| found.end() > len) {
                best = Some((found.end(), rule.kind));
            }
        }
    }
    best
}

/// Scans a character or string literal starting at `pos`, returning its length.
fn scan_text_literal(text: &str, pos: usize) -> Result<usize> {
    let rest = &text[pos..];
    let Some((rule, delimiter)) = TEXT_RULES
        .iter()
        .find_map(|rule| rule.delimiter.find(rest).map(|m| (rule, m.as_str())))
    else {
        return Err(unknown_token("Unknown token", text, pos));
    };
    let mut offset = delimiter.len();
    let mut entities = 0;
    loop {
        let remaining = &rest[offset..];
        if remaining.starts_with(delimiter) && (entities > 0 || !rule.single_entity) {
            return Ok(offset + delimiter.len());
        }
        if rule.single_entity && entities == 1 {
            return Err(Error::syntax_at(
                format!(
                    "In character literal: expected closing delimiter (index {})",
                    pos + offset
                ),
                text,
                pos + offset,
            ));
        }
        if remaining.is_empty() {
            return Err(Error::syntax_at(
                "In textual literal: unexpected end of input",
                text,
                pos + offset,
            ));
        }
        match rule.entity.find(remaining) {
            Some(entity) => {
                offset += entity.end();
                entities += 1;
            }
            None => {
                return Err(unknown_token(
                    "In textual literal: unknown token",
                    text,
                    pos + offset,
                ))
            }
        }
    }
}

fn unknown_token(prefix: &str, text: &str, pos: usize) -> Error {
    let c = text[pos..].chars().next().unwrap_or_default();
    Error::syntax_at(
        format!("{} (index {}; character '{}')", prefix, pos, c.escape_debug()),
        text,
        pos,
    )
}
