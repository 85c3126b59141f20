//! Resolves syntax trees into [`CdifValue`] trees.
//!
//! Component references are resolved against the components table every time
//! they occur; nothing is cached. The names currently being resolved form a
//! stack, and meeting one of them again is a circular reference.

use crate::analyzer::{AstEntry, AstItem, AstNode, AstStructure};
use crate::error::{Error, Result};
use crate::primitive::PrimitiveValue;
use crate::structure::{CdifValue, Collection, Object};
use indexmap::{IndexMap, IndexSet};

pub(crate) type Components<'a> = IndexMap<&'a str, AstNode<'a>>;

/// Builds the components table from the value of the components section.
pub(crate) fn components_table(section: AstNode<'_>) -> Result<Components<'_>> {
    let AstNode::Object(object) = section else {
        return Err(Error::syntax("Components section value must be object"));
    };
    if object.type_name.is_some() {
        return Err(Error::syntax("Components section object must be anonymous"));
    }
    let mut table = IndexMap::with_capacity(object.contents.len());
    for item in object.contents {
        match item {
            AstItem::Entry(AstEntry { key, value }) => {
                table.insert(key, value);
            }
            AstItem::Spread(_) => {
                return Err(Error::syntax(
                    "Top level of components section may not contain spread expressions",
                ))
            }
        }
    }
    Ok(table)
}

pub(crate) struct Evaluator<'c, 'a> {
    components: &'c Components<'a>,
    version: u32,
    resolving: IndexSet<&'a str>,
    depth: usize,
    max_depth: usize,
}

impl<'c, 'a> Evaluator<'c, 'a> {
    pub(crate) fn new(components: &'c Components<'a>, version: u32, max_depth: usize) -> Self {
        Evaluator {
            components,
            version,
            resolving: IndexSet::new(),
            depth: 0,
            max_depth,
        }
    }

    pub(crate) fn evaluate(&mut self, node: &AstNode<'a>) -> Result<CdifValue> {
        match node {
            AstNode::Literal(text) => {
                PrimitiveValue::from_cdif_text(text, self.version).map(CdifValue::Primitive)
            }
            AstNode::Object(object) => {
                self.enter()?;
                let value = self.evaluate_object(object).map(CdifValue::Object);
                self.depth -= 1;
                value
            }
            AstNode::Collection(collection) => {
                self.enter()?;
                let value = self.evaluate_collection(collection).map(CdifValue::Collection);
                self.depth -= 1;
                value
            }
            AstNode::ComponentReference(name) => self.resolve(name),
        }
    }

    /// Components nest into each other, so the resolved tree is depth
    /// checked again.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::syntax(format!(
                "Maximum nesting depth of {} exceeded",
                self.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn evaluate_object(&mut self, object: &AstStructure<'a, AstEntry<'a>>) -> Result<Object> {
        let mut entries = IndexMap::with_capacity(object.contents.len());
        for item in &object.contents {
            match item {
                AstItem::Entry(entry) => {
                    let value = self.evaluate(&entry.value)?;
                    entries.insert(entry.key.to_string(), value);
                }
                AstItem::Spread(name) => match self.resolve(name)? {
                    CdifValue::Object(spread) => {
                        let (_, spread_entries) = spread.into_parts();
                        entries.extend(spread_entries);
                    }
                    _ => {
                        return Err(Error::type_error(
                            "Spread component in object must also be object",
                        ))
                    }
                },
            }
        }
        Object::new(entries, object.type_name.map(str::to_string))
    }

    fn evaluate_collection(
        &mut self,
        collection: &AstStructure<'a, AstNode<'a>>,
    ) -> Result<Collection> {
        let mut items = Vec::with_capacity(collection.contents.len());
        for item in &collection.contents {
            match item {
                AstItem::Entry(node) => items.push(self.evaluate(node)?),
                AstItem::Spread(name) => match self.resolve(name)? {
                    CdifValue::Collection(spread) => {
                        let (_, spread_items) = spread.into_parts();
                        items.extend(spread_items);
                    }
                    _ => {
                        return Err(Error::type_error(
                            "Spread component in collection must also be collection",
                        ))
                    }
                },
            }
        }
        Collection::new(items, collection.type_name.map(str::to_string))
    }

    fn resolve(&mut self, name: &'a str) -> Result<CdifValue> {
        let components = self.components;
        let Some((&name, node)) = components.get_key_value(name) else {
            return Err(Error::reference(format!(
                "Component \"{}\" is not defined",
                name
            )));
        };
        if !self.resolving.insert(name) {
            return Err(Error::reference(format!(
                "Circular component reference detected (component: \"{}\")",
                name
            )));
        }
        tracing::trace!(component = name, depth = self.resolving.len(), "resolving component");
        let value = self.evaluate(node);
        self.resolving.pop();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::error::ErrorKind;
    use crate::tokenizer::{normalize, tokenize};

    fn evaluate(main: &str, components: &str) -> Result<CdifValue> {
        let main = normalize(main);
        let components = normalize(components);
        let main_tokens = tokenize(&main)?;
        let component_tokens = tokenize(&components)?;
        let main = analyze(&main_tokens, 256)?;
        let table = components_table(analyze(&component_tokens, 256)?)?;
        Evaluator::new(&table, 1, 256).evaluate(&main)
    }

    fn text(value: &CdifValue) -> String {
        match value {
            CdifValue::Primitive(primitive) => primitive.cdif_text(),
            CdifValue::Object(object) => {
                let entries: Vec<String> = object
                    .iter()
                    .map(|(key, value)| format!("{}:{}", key, text(value)))
                    .collect();
                format!("{{{}}}", entries.join(","))
            }
            CdifValue::Collection(collection) => {
                let items: Vec<String> = collection.items().iter().map(text).collect();
                format!("[{}]", items.join(","))
            }
        }
    }

    #[test]
    fn test_component_chain() {
        let value = evaluate("$a", "{a: $b, b: $c, c: 1}").unwrap();
        assert_eq!(text(&value), "1");
    }

    #[test]
    fn test_repeated_reference_is_not_a_cycle() {
        let value = evaluate("[$a, {x: $a}]", "{a: 0b11}").unwrap();
        assert_eq!(text(&value), "[3,{x:3}]");
    }

    #[test]
    fn test_undefined_component() {
        let err = evaluate("$nope", "{a: 1}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(err.message(), "Component \"nope\" is not defined");
    }

    #[test]
    fn test_circular_references() {
        for components in ["{a: $a}", "{a: [$b], b: {x: $a}}"] {
            let err = evaluate("$a", components).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Reference);
            assert!(err.message().starts_with("Circular component reference detected"));
        }
    }

    #[test]
    fn test_object_spread_last_write_wins() {
        let value = evaluate("{a: 1, ...$s, c: 4}", "{s: {a: 2, b: 3, c: 0}}").unwrap();
        assert_eq!(text(&value), "{a:2,b:3,c:4}");
    }

    #[test]
    fn test_collection_spread_appends() {
        let value = evaluate("[...$s, 3, ...$s]", "{s: [1, 2]}").unwrap();
        assert_eq!(text(&value), "[1,2,3,1,2]");
    }

    #[test]
    fn test_spread_through_reference() {
        let value = evaluate("[...$alias]", "{alias: $s, s: ['x']}").unwrap();
        assert_eq!(text(&value), "['x']");
    }

    #[test]
    fn test_spread_kind_mismatch() {
        let err = evaluate("{...$s}", "{s: [1]}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "Spread component in object must also be object");
        let err = evaluate("[...$s]", "{s: 1}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_components_section_shape() {
        for components in ["[1]", "Thing {}", "{...$x}"] {
            let err = evaluate("1", components).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax);
        }
    }

    #[test]
    fn test_depth_cap_applies_through_components() {
        let main = normalize("[$a]");
        let components = normalize("{a: [$b], b: [[]]}");
        let main_tokens = tokenize(&main).unwrap();
        let component_tokens = tokenize(&components).unwrap();
        let main = analyze(&main_tokens, 3).unwrap();
        let table = components_table(analyze(&component_tokens, 3).unwrap()).unwrap();
        let err = Evaluator::new(&table, 1, 3).evaluate(&main).unwrap_err();
        assert!(err.message().contains("Maximum nesting depth of 3"));
        assert!(Evaluator::new(&table, 1, 4).evaluate(&main).is_ok());
    }

    #[test]
    fn test_reserved_type_name_rejected() {
        let err = evaluate("undef {}", "{}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }
}
