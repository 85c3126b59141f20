//! Pre- and postprocessor hooks.
//!
//! Hooks customize how values are decoded after parsing ([`Postprocessor`]) and
//! encoded before serialization ([`Preprocessor`]). Each configured hook is tried
//! in order for every value. The first hook that does not return `Continue`
//! decides the outcome, and a value no hook handles passes through unchanged.
//!
//! Closures with the right signature implement the hook traits directly:
//!
//! ```rust
//! use serde_cdif::{Cdif, CdifOptions, ParserOptions, PostprocessData, Postprocessed, Value};
//!
//! let parser = ParserOptions::new().with_postprocessor(|data: &PostprocessData| -> serde_cdif::Result<_> {
//!     Ok(match data.type_name {
//!         Some("Secret") => Postprocessed::Replace(Value::from("<redacted>")),
//!         _ => Postprocessed::Continue,
//!     })
//! });
//! let cdif = Cdif::new(CdifOptions::new().with_parser(parser)).unwrap();
//! let value = cdif.parse("{token: Secret {raw: \"hunter2\"}}").unwrap();
//! assert_eq!(value.get("token").and_then(Value::as_str), Some("<redacted>"));
//! ```

use crate::error::Result;
use crate::Value;
use std::fmt;
use std::sync::Arc;

/// Where a value sits within its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// The top-level value.
    Root,
    /// An object property.
    Property(&'a str),
    /// A collection element.
    Index(usize),
}

impl<'a> Key<'a> {
    #[must_use]
    pub const fn as_property(&self) -> Option<&'a str> {
        match self {
            Key::Property(name) => Some(*name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Root => f.write_str("<root>"),
            Key::Property(name) => f.write_str(name),
            Key::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// What a postprocessor sees for each decoded value.
#[derive(Clone, Copy, Debug)]
pub struct PostprocessData<'a> {
    pub key: Key<'a>,
    /// The type identifier of the structure the value was decoded from.
    pub type_name: Option<&'a str>,
    pub value: &'a Value,
}

/// The outcome of a postprocessor.
#[derive(Clone, Debug, PartialEq)]
pub enum Postprocessed {
    /// Not handled; try the next hook.
    Continue,
    Replace(Value),
    /// Drop the value from its parent.
    Omit,
}

/// A hook run on every value after it has been decoded.
pub trait Postprocessor: Send + Sync {
    /// # Errors
    ///
    /// Any error aborts the parse and is returned to the caller unchanged.
    fn postprocess(&self, data: &PostprocessData<'_>) -> Result<Postprocessed>;
}

impl<F> Postprocessor for F
where
    F: Fn(&PostprocessData<'_>) -> Result<Postprocessed> + Send + Sync,
{
    fn postprocess(&self, data: &PostprocessData<'_>) -> Result<Postprocessed> {
        self(data)
    }
}

/// What a preprocessor sees for each value about to be encoded.
#[derive(Clone, Copy, Debug)]
pub struct PreprocessData<'a> {
    pub key: Key<'a>,
    pub value: &'a Value,
}

/// The outcome of a preprocessor.
#[derive(Clone, Debug, PartialEq)]
pub enum Preprocessed {
    /// Not handled; try the next hook.
    Continue,
    Replace(Value),
    /// Replace the value and give it a type identifier. The value must be an
    /// array or object.
    Typed { type_name: String, value: Value },
    /// Drop the value from its parent.
    Omit,
}

/// A hook run on every value before it is encoded.
pub trait Preprocessor: Send + Sync {
    /// # Errors
    ///
    /// Any error aborts the serialization and is returned to the caller unchanged.
    fn preprocess(&self, data: &PreprocessData<'_>) -> Result<Preprocessed>;
}

impl<F> Preprocessor for F
where
    F: Fn(&PreprocessData<'_>) -> Result<Preprocessed> + Send + Sync,
{
    fn preprocess(&self, data: &PreprocessData<'_>) -> Result<Preprocessed> {
        self(data)
    }
}

/// A native type that knows how to turn itself into an encodable value.
///
/// Wrap implementors in [`CustomValue`] to place them inside a [`Value`] tree and
/// enable the [`use_preprocess_methods`](crate::preprocessors::use_preprocess_methods)
/// preprocessor to dispatch to them.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{
///     preprocessors, CdifOptions, CdifPreprocessable, Cdif, CustomValue, Key, Preprocessed,
///     SerializerOptions, Value,
/// };
///
/// #[derive(Debug)]
/// struct PlusTwo(i64);
///
/// impl CdifPreprocessable for PlusTwo {
///     fn preprocess(&self, _key: Key<'_>) -> serde_cdif::Result<Preprocessed> {
///         Ok(Preprocessed::Replace(Value::from(self.0 + 2)))
///     }
/// }
///
/// let serializer = SerializerOptions::new().with_preprocessor(preprocessors::use_preprocess_methods());
/// let cdif = Cdif::new(CdifOptions::new().with_serializer(serializer)).unwrap();
/// let text = cdif.serialize(&Value::Custom(CustomValue::new(PlusTwo(3)))).unwrap();
/// assert_eq!(text, "5");
/// ```
pub trait CdifPreprocessable: fmt::Debug + Send + Sync {
    /// # Errors
    ///
    /// Any error aborts the serialization.
    fn preprocess(&self, key: Key<'_>) -> Result<Preprocessed>;
}

/// A shared handle to a [`CdifPreprocessable`] value.
///
/// Equality is identity: two handles are equal when they point to the same
/// allocation. Serialization uses the same identity to detect circular
/// structures.
#[derive(Clone)]
pub struct CustomValue(Arc<dyn CdifPreprocessable>);

impl CustomValue {
    pub fn new<T: CdifPreprocessable + 'static>(value: T) -> Self {
        CustomValue(Arc::new(value))
    }

    #[must_use]
    pub fn from_arc(value: Arc<dyn CdifPreprocessable>) -> Self {
        CustomValue(value)
    }

    #[must_use]
    pub fn get(&self) -> &dyn CdifPreprocessable {
        self.0.as_ref()
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomValue").field(&self.0).finish()
    }
}
