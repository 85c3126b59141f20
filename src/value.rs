//! Dynamic value representation for cDIF data.
//!
//! [`Value`] is the native side of both pipelines: parsing decodes cDIF text
//! into a `Value` tree and serialization encodes a `Value` tree into cDIF
//! text. Typed Rust data goes through `Value` via the serde bridges in
//! [`to_value`](crate::to_value) and [`from_value`](crate::from_value).
//!
//! ## Creating values
//!
//! ```rust
//! use serde_cdif::{cdif, Value};
//!
//! let null = Value::Null;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let letter = Value::from('c');
//!
//! let object = cdif!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert_eq!(object.to_string(), "{name: \"Alice\", age: 30}");
//! ```
//!
//! ## Extracting values
//!
//! ```rust
//! use serde_cdif::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! assert!(value.is_number());
//! assert_eq!(i64::try_from(value).unwrap(), 42);
//! ```

use crate::encoder::Encoder;
use crate::hooks::CustomValue;
use crate::options::SerializerOptions;
use crate::primitive::PrimitiveValue;
use crate::{stringifier, CdifMap, CDIF_LATEST};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically typed native value.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    /// An integer kept at full precision.
    BigInt(BigInt),
    Char(char),
    String(String),
    Array(Vec<Value>),
    Object(CdifMap),
    /// A pre-encoded primitive, written out as is.
    Primitive(PrimitiveValue),
    /// A user type encoded through its [`CdifPreprocessable`](crate::CdifPreprocessable)
    /// implementation.
    Custom(CustomValue),
}

/// A native number: a 64-bit integer or a double.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// assert!(Number::Float(f64::INFINITY).is_float());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns the value as `i64` for integers and for whole floats in range.
    ///
    /// ```rust
    /// use serde_cdif::Number;
    ///
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::Float(f64::NAN).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Integer(i) => Some(i),
            Number::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(i64::from(value))
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Integer(i64::from(value)))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` for [`Value::Number`]; big integers are checked with
    /// [`is_bigint`](Self::is_bigint).
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_char(&self) -> bool {
        matches!(self, Value::Char(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Value::Primitive(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Value::Custom(_))
    }

    /// Returns `true` for arrays and objects.
    #[inline]
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// ```rust
    /// use serde_cdif::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from('h').as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns integers (including big integers in range) and whole floats as `i64`.
    ///
    /// ```rust
    /// use num_bigint::BigInt;
    /// use serde_cdif::Value;
    ///
    /// assert_eq!(Value::from(42).as_i64(), Some(42));
    /// assert_eq!(Value::from(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::BigInt(BigInt::from(7)).as_i64(), Some(7));
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            Value::BigInt(big) => big.to_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            Value::BigInt(big) => big.to_f64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(big) => Some(big),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&CdifMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut CdifMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Value::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_custom(&self) -> Option<&CustomValue> {
        match self {
            Value::Custom(custom) => Some(custom),
            _ => None,
        }
    }

    /// Looks up an object property. Returns `None` for non-objects.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(key))
    }

    /// Looks up an array element. Returns `None` for non-arrays.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|array| array.get(index))
    }
}

/// Renders single-line cDIF text in non-strict mode. Values that still cannot
/// be encoded render as the error message in angle brackets.
///
/// ```rust
/// use serde_cdif::{cdif, Value};
///
/// assert_eq!(cdif!([1, 'x', null]).to_string(), "[1, 'x', null]");
/// assert_eq!(Value::from(f64::NAN).to_string(), "null");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = SerializerOptions::new().with_strict(false);
        let rendered = Encoder::new(&options, CDIF_LATEST)
            .encode_root(self)
            .map(|encoded| stringifier::stringify(&encoded, &options));
        match rendered {
            Ok(text) => f.write_str(&text),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::BigInt(big) => {
                if let Some(i) = big.to_i64() {
                    serializer.serialize_i64(i)
                } else if let Some(u) = big.to_u64() {
                    serializer.serialize_u64(u)
                } else if let Some(i) = big.to_i128() {
                    serializer.serialize_i128(i)
                } else if let Some(u) = big.to_u128() {
                    serializer.serialize_u128(u)
                } else {
                    serializer.serialize_str(&big.to_string())
                }
            }
            Value::Char(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Primitive(primitive) => {
                crate::decoder::decode_primitive(primitive, crate::decoder::Integers::Exact).serialize(serializer)
            }
            Value::Custom(custom) => Err(serde::ser::Error::custom(format!(
                "cannot serialize custom value {:?} without preprocessing",
                custom
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid cDIF value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => Value::Number(Number::Integer(i)),
                    Err(_) => Value::BigInt(BigInt::from(value)),
                })
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => Value::Number(Number::Integer(i)),
                    Err(_) => Value::BigInt(BigInt::from(value)),
                })
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => Value::Number(Number::Integer(i)),
                    Err(_) => Value::BigInt(BigInt::from(value)),
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_char<E>(self, value: char) -> Result<Self::Value, E> {
                Ok(Value::Char(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = CdifMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            crate::Error::custom(format!("expected integer in i64 range, found {:?}", value))
        })
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::custom(format!("expected number, found {:?}", value)))
    }
}

impl TryFrom<Value> for BigInt {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::BigInt(big) => Ok(big),
            Value::Number(Number::Integer(i)) => Ok(BigInt::from(i)),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for char {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Char(c) => Ok(c),
            _ => Err(crate::Error::custom(format!(
                "expected character, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            Value::Char(c) => Ok(c.to_string()),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Number(Number::Integer(i)),
            Err(_) => Value::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(f64::from(value)))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<CdifMap> for Value {
    fn from(value: CdifMap) -> Self {
        Value::Object(value)
    }
}

impl From<PrimitiveValue> for Value {
    fn from(value: PrimitiveValue) -> Self {
        Value::Primitive(value)
    }
}

impl From<CustomValue> for Value {
    fn from(value: CustomValue) -> Self {
        Value::Custom(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
