//! Builds a syntax tree from the tokens of one section.
//!
//! The tree borrows its text from the normalized input and lives only until
//! the evaluator has turned it into [`CdifValue`](crate::CdifValue)s.

use crate::error::{Error, Result};
use crate::tokenizer::{Token, TokenKind};

const KEYWORD_LITERALS: [&str; 4] = ["true", "false", "null", "infinity"];

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AstNode<'a> {
    /// Raw literal text, parsed into a primitive value by the evaluator.
    Literal(&'a str),
    Object(AstStructure<'a, AstEntry<'a>>),
    Collection(AstStructure<'a, AstNode<'a>>),
    /// A `$name` reference, stored without the `$`.
    ComponentReference(&'a str),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AstStructure<'a, T> {
    pub type_name: Option<&'a str>,
    pub contents: Vec<AstItem<'a, T>>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AstItem<'a, T> {
    Entry(T),
    /// `...$name`, stored without the `$`.
    Spread(&'a str),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AstEntry<'a> {
    pub key: &'a str,
    pub value: AstNode<'a>,
}

/// Parses exactly one value expression, optionally followed by a single
/// value terminator.
pub(crate) fn analyze<'a>(tokens: &[Token<'a>], max_depth: usize) -> Result<AstNode<'a>> {
    let mut analyzer = Analyzer {
        tokens,
        index: 0,
        depth: 0,
        max_depth,
    };
    let value = analyzer.parse_value()?;
    if analyzer.peek_kind() == Some(TokenKind::ValueTerminator) {
        analyzer.advance();
    }
    if analyzer.peek().is_some() {
        return Err(Error::syntax(format!(
            "Unexpected token after section: {}",
            analyzer.describe()
        )));
    }
    Ok(value)
}

struct Analyzer<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t, 'a> Analyzer<'t, 'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.index).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Describes the current token for error messages.
    fn describe(&self) -> String {
        match self.peek() {
            Some(token) => format!("\"{}\"", token.text),
            None => "end of input".to_string(),
        }
    }

    fn unexpected(&self, context: &str) -> Error {
        match self.peek() {
            Some(_) => Error::syntax(format!(
                "Unexpected token in {}: {}",
                context,
                self.describe()
            )),
            None => Error::syntax(format!("Unexpected end of input in {}", context)),
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'a str> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token.text)
            }
            _ => Err(Error::syntax(format!(
                "Expected {}, got {}",
                what,
                self.describe()
            ))),
        }
    }

    fn parse_value(&mut self) -> Result<AstNode<'a>> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("value"));
        };
        match token.kind {
            TokenKind::Name if KEYWORD_LITERALS.contains(&token.text) => {
                self.advance();
                Ok(AstNode::Literal(token.text))
            }
            TokenKind::Name => {
                self.advance();
                self.parse_structure(Some(token.text))
            }
            TokenKind::OtherLiteral => {
                self.advance();
                Ok(AstNode::Literal(token.text))
            }
            TokenKind::ObjectStart | TokenKind::CollectionStart => self.parse_structure(None),
            TokenKind::ComponentReference => {
                self.advance();
                Ok(AstNode::ComponentReference(&token.text[1..]))
            }
            _ => Err(self.unexpected("value")),
        }
    }

    fn parse_structure(&mut self, type_name: Option<&'a str>) -> Result<AstNode<'a>> {
        if self.depth >= self.max_depth {
            return Err(Error::syntax(format!(
                "Maximum nesting depth of {} exceeded",
                self.max_depth
            )));
        }
        self.depth += 1;
        let node = match self.peek_kind() {
            Some(TokenKind::ObjectStart) => AstNode::Object(self.parse_contents(
                type_name,
                "object",
                TokenKind::ObjectEnd,
                Self::parse_entry,
            )?),
            Some(TokenKind::CollectionStart) => AstNode::Collection(self.parse_contents(
                type_name,
                "collection",
                TokenKind::CollectionEnd,
                |analyzer| analyzer.parse_value().map(Some),
            )?),
            _ => return Err(self.unexpected("structure")),
        };
        self.depth -= 1;
        Ok(node)
    }

    /// Parses the bracketed contents of a structure, positioned on its
    /// opening token. `parse_item` returns `None` for entries that are
    /// dropped outright.
    fn parse_contents<T>(
        &mut self,
        type_name: Option<&'a str>,
        context: &str,
        end: TokenKind,
        parse_item: impl Fn(&mut Self) -> Result<Option<T>>,
    ) -> Result<AstStructure<'a, T>> {
        self.advance();
        let mut contents = Vec::new();
        let mut entry_next = true;
        loop {
            match self.peek_kind() {
                None => return Err(self.unexpected(context)),
                Some(kind) if kind == end => {
                    self.advance();
                    return Ok(AstStructure {
                        type_name,
                        contents,
                    });
                }
                Some(TokenKind::ValueTerminator) => {
                    if entry_next {
                        return Err(Error::syntax(format!(
                            "Unexpected value separator in {}",
                            context
                        )));
                    }
                    self.advance();
                    entry_next = true;
                }
                Some(_) if !entry_next => return Err(self.unexpected(context)),
                Some(TokenKind::SpreadOperator) => {
                    self.advance();
                    let reference =
                        self.expect(TokenKind::ComponentReference, "component reference")?;
                    contents.push(AstItem::Spread(&reference[1..]));
                    entry_next = false;
                }
                Some(_) => {
                    if let Some(item) = parse_item(self)? {
                        contents.push(AstItem::Entry(item));
                    }
                    entry_next = false;
                }
            }
        }
    }

    fn parse_entry(&mut self) -> Result<Option<AstEntry<'a>>> {
        let key = self.expect(TokenKind::Name, "name")?;
        self.expect(TokenKind::KvSeparator, "object mapping separator")?;
        if let Some(Token {
            kind: TokenKind::Name,
            text: "undef",
        }) = self.peek()
        {
            self.advance();
            return Ok(None);
        }
        let value = self.parse_value()?;
        Ok(Some(AstEntry { key, value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::tokenizer::{normalize, tokenize};

    fn parse_with_depth(text: &str, max_depth: usize) -> Result<AstNode<'static>> {
        let normalized: &'static str = Box::leak(normalize(text).into_boxed_str());
        analyze(&tokenize(normalized)?, max_depth)
    }

    fn parse(text: &str) -> Result<AstNode<'static>> {
        parse_with_depth(text, 256)
    }

    fn message(text: &str) -> String {
        let err = parse(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        err.message().to_string()
    }

    #[test]
    fn test_keyword_and_other_literals() {
        assert_eq!(parse("true").unwrap(), AstNode::Literal("true"));
        assert_eq!(parse("infinity").unwrap(), AstNode::Literal("infinity"));
        assert_eq!(parse("0x1F;").unwrap(), AstNode::Literal("0x1F"));
        assert_eq!(parse("$thing").unwrap(), AstNode::ComponentReference("thing"));
    }

    #[test]
    fn test_typed_structures() {
        let AstNode::Object(object) = parse("Point { x: 1, y: 2 }").unwrap() else {
            panic!("expected object");
        };
        assert_eq!(object.type_name, Some("Point"));
        assert_eq!(object.contents.len(), 2);

        let AstNode::Collection(collection) = parse("[1, ...$more; 2,]").unwrap() else {
            panic!("expected collection");
        };
        assert_eq!(collection.type_name, None);
        assert_eq!(
            collection.contents,
            vec![
                AstItem::Entry(AstNode::Literal("1")),
                AstItem::Spread("more"),
                AstItem::Entry(AstNode::Literal("2")),
            ]
        );
    }

    #[test]
    fn test_undef_entries_are_dropped() {
        let AstNode::Object(object) = parse("{a: undef, b: null}").unwrap() else {
            panic!("expected object");
        };
        assert_eq!(
            object.contents,
            vec![AstItem::Entry(AstEntry {
                key: "b",
                value: AstNode::Literal("null"),
            })]
        );
    }

    #[test]
    fn test_separator_errors() {
        assert_eq!(message("[,1]"), "Unexpected value separator in collection");
        assert_eq!(message("{a: 1,, b: 2}"), "Unexpected value separator in object");
        assert_eq!(message("[1 2]"), "Unexpected token in collection: \"2\"");
    }

    #[test]
    fn test_end_of_input_errors() {
        assert_eq!(message(""), "Unexpected end of input in value");
        assert_eq!(message("[1, 2"), "Unexpected end of input in collection");
        assert_eq!(message("{a: "), "Unexpected end of input in value");
        assert_eq!(message("Thing"), "Unexpected end of input in structure");
    }

    #[test]
    fn test_entry_errors() {
        assert_eq!(message("{1: 2}"), "Expected name, got \"1\"");
        assert_eq!(message("{a 2}"), "Expected object mapping separator, got \"2\"");
        assert_eq!(message("[...4]"), "Expected component reference, got \"4\"");
        assert_eq!(message("[undef]"), "Unexpected token in structure: \"]\"");
        assert_eq!(message("Thing 4"), "Unexpected token in structure: \"4\"");
    }

    #[test]
    fn test_single_value_per_section() {
        assert_eq!(message("1, 2"), "Unexpected token after section: \"2\"");
        assert_eq!(message("1;;"), "Unexpected token after section: \";\"");
    }

    #[test]
    fn test_depth_cap() {
        assert!(parse_with_depth("[[[]]]", 3).is_ok());
        let err = parse_with_depth("[[[[]]]]", 3).unwrap_err();
        assert!(err.message().contains("Maximum nesting depth of 3"));
    }
}
