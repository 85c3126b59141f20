//! # serde_cdif
//!
//! A parser and serializer for cDIF, a human-writable, typed superset of JSON
//! data, with Serde support.
//!
//! ## What is cDIF?
//!
//! cDIF reads like JSON with the rough edges filed off: unquoted property
//! names, comments, `;` or `,` separators, binary/octal/hex integers,
//! infinities, characters, raw and block strings, type identifiers on
//! structures and a components section whose entries can be referenced
//! (`$name`) or spread (`...$name`) elsewhere in the file.
//!
//! ```text
//! # cDIF 1.0.0
//! {
//!     name: "serde_cdif";
//!     origin: Point [0, 0];
//!     limits: {...$defaults, max: 0xff};
//! }
//! # components
//! {
//!     defaults: {min: 0, max: 10};
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_cdif::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "{id: 123, name: \"Alice\", active: true}");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### The full pipeline
//!
//! [`Cdif`] exposes the format itself: components, hooks, file headers and
//! [`PrimitiveValue`]s, working on dynamic [`Value`]s.
//!
//! ```rust
//! use serde_cdif::Cdif;
//!
//! let cdif = Cdif::default();
//! let value = cdif
//!     .parse("[$origin, $origin]\n# components\n{origin: Point [0, 0]}")
//!     .unwrap();
//! assert_eq!(value.to_string(), "[[0, 0], [0, 0]]");
//! ```
//!
//! ### Dynamic values with the `cdif!` macro
//!
//! ```rust
//! use serde_cdif::cdif;
//!
//! let data = cdif!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//! assert_eq!(data.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```
//!
//! ## Examples
//!
//! The `demos/` directory holds runnable examples:
//!
//! - **`simple.rs`** - serde round trips
//! - **`macro.rs`** - building values with `cdif!`
//! - **`components.rs`** - references and spreads, with tracing output
//! - **`dynamic_values.rs`** - working with [`Value`] directly
//! - **`custom_options.rs`** - separators, indentation and file headers
//! - **`hooks.rs`** - pre- and postprocessors
//!
//! Run any example with: `cargo run --example <name>`

mod analyzer;
pub mod de;
mod decoder;
mod encoder;
pub mod error;
mod evaluator;
mod file;
pub mod hooks;
pub mod identifiers;
pub mod macros;
pub mod map;
pub mod options;
pub mod postprocessors;
mod preparser;
pub mod preprocessors;
pub mod primitive;
pub mod ser;
mod stringifier;
pub mod structure;
mod tokenizer;
pub mod value;

pub use de::{from_value, Deserializer};
pub use error::{Error, ErrorKind, Result};
pub use hooks::{
    CdifPreprocessable, CustomValue, Key, PostprocessData, Postprocessed, Postprocessor,
    PreprocessData, Preprocessed, Preprocessor,
};
pub use map::CdifMap;
pub use options::{CdifOptions, FileOptions, ParserOptions, Separator, SerializerOptions};
pub use primitive::{Float, Primitive, PrimitiveValue};
pub use ser::{to_value, ValueSerializer};
pub use structure::{CdifValue, Collection, Object};
pub use value::{Number, Value};

use crate::decoder::Integers;
use crate::encoder::Encoder;
use crate::evaluator::{components_table, Components, Evaluator};
use crate::preparser::SectionKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// The latest cDIF major version this crate implements.
pub const CDIF_LATEST: u32 = 1;

/// A configured cDIF parser and serializer.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{Cdif, CdifOptions, SerializerOptions};
///
/// let cdif = Cdif::new(CdifOptions::new().with_serializer(SerializerOptions::pretty())).unwrap();
/// let value = cdif.parse("{a: 1, b: [true]}").unwrap();
/// assert_eq!(cdif.serialize(&value).unwrap(), "{\n\ta: 1;\n\tb: [\n\t\ttrue;\n\t];\n}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Cdif {
    options: CdifOptions,
}

impl Cdif {
    /// # Errors
    ///
    /// Returns an [`ErrorKind::Options`] error for an unsupported cDIF
    /// version or a zero `max_depth`.
    pub fn new(options: CdifOptions) -> Result<Self> {
        options.validate()?;
        Ok(Cdif { options })
    }

    #[must_use]
    pub fn options(&self) -> &CdifOptions {
        &self.options
    }

    /// Parses cDIF text (with or without a file header) into a [`Value`].
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Syntax`] for invalid syntax or a malformed components section
    /// - [`ErrorKind::Directive`] for unknown or misplaced directives and
    ///   unexpected version strings
    /// - [`ErrorKind::Reference`] for undefined or circular component references
    /// - [`ErrorKind::Type`] for spreads of the wrong structure kind
    /// - [`ErrorKind::General`] when a postprocessor omits the root value
    /// - any error returned by a postprocessor
    pub fn parse(&self, text: &str) -> Result<Value> {
        self.parse_with(text, Integers::for_options(&self.options.parser))
    }

    fn parse_with(&self, text: &str, integers: Integers) -> Result<Value> {
        let version = self.options.version;
        let parser = &self.options.parser;

        let normalized = tokenizer::normalize(text);
        let tokens = tokenizer::tokenize(&normalized)?;
        let sections = preparser::split_sections(&tokens, parser, version)?;

        let main = analyzer::analyze(sections.main(), parser.max_depth)?;
        let components = match sections.get(SectionKind::Components) {
            Some(tokens) => components_table(analyzer::analyze(tokens, parser.max_depth)?)?,
            None => Components::new(),
        };

        let evaluated = Evaluator::new(&components, version, parser.max_depth).evaluate(&main)?;
        let value = decoder::decode_root(evaluated, parser, integers, version)?;
        tracing::debug!(
            bytes = text.len(),
            components = components.len(),
            "parsed cDIF text"
        );
        Ok(value)
    }

    /// Serializes a [`Value`] into cDIF text.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::General`] when a preprocessor omits the root value (or,
    ///   in strict mode, an array element) or a [`PrimitiveValue`] has the
    ///   wrong version
    /// - [`ErrorKind::Syntax`] for invalid property names or type identifiers
    /// - [`ErrorKind::Type`] for circular custom values and, in strict mode,
    ///   values that cannot be encoded
    /// - any error returned by a preprocessor
    pub fn serialize(&self, value: &Value) -> Result<String> {
        let serializer = &self.options.serializer;
        let encoded = Encoder::new(serializer, self.options.version).encode_root(value)?;
        let text = stringifier::stringify(&encoded, serializer);
        tracing::debug!(bytes = text.len(), "serialized cDIF value");
        Ok(text)
    }

    /// Serializes a [`Value`] in file form.
    ///
    /// ```rust
    /// use serde_cdif::{cdif, Cdif, FileOptions};
    ///
    /// let options = FileOptions::new().with_version_string("1.0");
    /// let text = Cdif::default().serialize_file(&cdif!([1]), &options).unwrap();
    /// assert_eq!(text, "# cDIF 1.0\n[1]\n");
    /// ```
    ///
    /// # Errors
    ///
    /// Everything [`serialize`](Self::serialize) returns, plus a
    /// [`ErrorKind::Directive`] error for a version string that does not
    /// match the configured version and an [`ErrorKind::Options`] error when
    /// a header is requested without one.
    pub fn serialize_file(&self, value: &Value, options: &FileOptions) -> Result<String> {
        let text = self.serialize(value)?;
        file::format_file(&text, options, self.options.version)
    }

    /// Parses the text of one primitive value under the configured version.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Syntax`] if `text` is not a primitive literal.
    pub fn create_primitive_value(&self, text: &str) -> Result<PrimitiveValue> {
        PrimitiveValue::from_cdif_text(text, self.options.version)
    }

    /// Reads the major version from a leading `# cDIF` directive.
    ///
    /// ```rust
    /// use serde_cdif::Cdif;
    ///
    /// assert_eq!(Cdif::cdif_version("# cDIF 1.2.3\n{}").unwrap(), Some(1));
    /// assert_eq!(Cdif::cdif_version("{}").unwrap(), None);
    /// assert!(Cdif::cdif_version("# cDIF one").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Directive`] when the directive is present but its
    /// version string is malformed.
    pub fn cdif_version(text: &str) -> Result<Option<u64>> {
        file::cdif_version(text)
    }
}

/// Serialize any `T: Serialize` to a single-line cDIF string.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "{x: 1, y: 2}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted to a [`Value`] or
/// cannot be encoded (e.g. NaN, or a map key that is not a valid name).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, SerializerOptions::new())
}

/// Serialize any `T: Serialize` to an indented cDIF string, with tabs and
/// `;` separators.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, SerializerOptions::pretty())
}

/// Serialize any `T: Serialize` with custom serializer options.
///
/// Values are converted with [`to_value`] first, so [`Value::Custom`]
/// handles cannot pass through here; use [`Cdif::serialize`] for those.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: SerializerOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    Cdif::new(CdifOptions::new().with_serializer(options))?.serialize(&value)
}

/// Serialize any `T: Serialize` to a writer.
///
/// ```rust
/// let mut buffer = Vec::new();
/// serde_cdif::to_writer(&mut buffer, &['a', 'b']).unwrap();
/// assert_eq!(buffer, b"['a', 'b']");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from cDIF text.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("Point {x: 0x1; y: -2;} // origin-ish").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid cDIF or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, ParserOptions::new())
}

/// Deserialize an instance of type `T` from cDIF text with custom parser
/// options.
///
/// Integers outside the `i64` range reach `T` (and any postprocessor) as
/// exact [`Value::BigInt`]s, whatever `use_big_int` says.
///
/// # Errors
///
/// Returns an error if the input is not valid cDIF or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: ParserOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    // integers outside i64 stay exact so they reach the target type intact
    let integers = if options.use_big_int {
        Integers::Big
    } else {
        Integers::Exact
    };
    let value = Cdif::new(CdifOptions::new().with_parser(options))?.parse_with(s, integers)?;
    from_value(value)
}

/// Deserialize an instance of type `T` from an I/O stream of cDIF.
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// cDIF, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader.read_to_string(&mut string)?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of cDIF text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid cDIF, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
