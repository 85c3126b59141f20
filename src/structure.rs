//! Structured cDIF values: objects and collections.
//!
//! [`CdifValue`] is the node type shared by both pipelines. Parsing produces a
//! `CdifValue` tree before decoding it into a native [`Value`](crate::Value),
//! and serialization encodes native values into a `CdifValue` tree before
//! stringifying it.
//!
//! Structures are validated on construction: every property name must follow
//! the name grammar and the optional type identifier must be a non-reserved
//! name. Once built they cannot be mutated.

use crate::error::{Error, Result};
use crate::identifiers::{is_valid_name, is_valid_type_name};
use crate::primitive::PrimitiveValue;
use indexmap::IndexMap;

/// A primitive value or a structure.
#[derive(Clone, Debug, PartialEq)]
pub enum CdifValue {
    Primitive(PrimitiveValue),
    Object(Object),
    Collection(Collection),
}

impl CdifValue {
    /// The type identifier of a structure, `None` for anonymous structures
    /// and primitives.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            CdifValue::Primitive(_) => None,
            CdifValue::Object(object) => object.type_name(),
            CdifValue::Collection(collection) => collection.type_name(),
        }
    }

    #[must_use]
    pub const fn is_structure(&self) -> bool {
        !matches!(self, CdifValue::Primitive(_))
    }
}

impl From<PrimitiveValue> for CdifValue {
    fn from(value: PrimitiveValue) -> Self {
        CdifValue::Primitive(value)
    }
}

impl From<Object> for CdifValue {
    fn from(value: Object) -> Self {
        CdifValue::Object(value)
    }
}

impl From<Collection> for CdifValue {
    fn from(value: Collection) -> Self {
        CdifValue::Collection(value)
    }
}

/// An ordered mapping from property names to values, optionally typed.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{CdifValue, Object, PrimitiveValue, CDIF_LATEST};
/// use indexmap::IndexMap;
///
/// let mut entries = IndexMap::new();
/// entries.insert("red".to_string(), CdifValue::from(PrimitiveValue::null(CDIF_LATEST)));
/// let color = Object::new(entries, Some("Color".to_string())).unwrap();
/// assert_eq!(color.type_name(), Some("Color"));
///
/// let mut bad = IndexMap::new();
/// bad.insert("uh oh".to_string(), CdifValue::from(PrimitiveValue::null(CDIF_LATEST)));
/// assert!(Object::new(bad, None).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Object {
    type_name: Option<String>,
    entries: IndexMap<String, CdifValue>,
}

impl Object {
    /// # Errors
    ///
    /// Returns a syntax error for an invalid property name or type identifier.
    pub fn new(entries: IndexMap<String, CdifValue>, type_name: Option<String>) -> Result<Self> {
        check_type_name(type_name.as_deref())?;
        if let Some(key) = entries.keys().find(|key| !is_valid_name(key)) {
            return Err(Error::syntax(format!(
                "Invalid object property name: \"{}\"",
                key
            )));
        }
        Ok(Object { type_name, entries })
    }

    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CdifValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, CdifValue> {
        self.entries.iter()
    }

    /// Consumes the object, returning its type identifier and entries.
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, IndexMap<String, CdifValue>) {
        (self.type_name, self.entries)
    }
}

/// An ordered sequence of values, optionally typed.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Collection {
    type_name: Option<String>,
    items: Vec<CdifValue>,
}

impl Collection {
    /// # Errors
    ///
    /// Returns a syntax error for an invalid type identifier.
    pub fn new(items: Vec<CdifValue>, type_name: Option<String>) -> Result<Self> {
        check_type_name(type_name.as_deref())?;
        Ok(Collection { type_name, items })
    }

    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    #[must_use]
    pub fn items(&self) -> &[CdifValue] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Option<String>, Vec<CdifValue>) {
        (self.type_name, self.items)
    }
}

fn check_type_name(type_name: Option<&str>) -> Result<()> {
    match type_name {
        Some(name) if !is_valid_type_name(name) => Err(Error::syntax(format!(
            "Invalid type identifier: \"{}\"",
            name
        ))),
        _ => Ok(()),
    }
}
