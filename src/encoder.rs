//! Turns native [`Value`]s into [`CdifValue`] trees, running preprocessors.
//!
//! Only [`Value::Custom`] handles can make a value graph cyclic (a custom
//! value may preprocess into a tree that contains itself). The encoder keeps
//! the addresses of the custom values it is currently inside and fails when
//! it meets one of them again.

use crate::error::{Error, Result};
use crate::hooks::{Key, PreprocessData, Preprocessed};
use crate::options::SerializerOptions;
use crate::primitive::{Float, PrimitiveValue};
use crate::structure::{CdifValue, Collection, Object};
use crate::value::{Number, Value};
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::borrow::Cow;
use std::collections::HashSet;

pub(crate) struct Encoder<'o> {
    options: &'o SerializerOptions,
    version: u32,
    active: HashSet<usize>,
    depth: usize,
}

impl<'o> Encoder<'o> {
    pub(crate) fn new(options: &'o SerializerOptions, version: u32) -> Self {
        Encoder {
            options,
            version,
            active: HashSet::new(),
            depth: 0,
        }
    }

    pub(crate) fn encode_root(&mut self, value: &Value) -> Result<CdifValue> {
        self.encode(Key::Root, value)?
            .ok_or_else(|| Error::general("Root value was omitted"))
    }

    /// Encodes one value, returning `None` when it is omitted.
    fn encode(&mut self, key: Key<'_>, value: &Value) -> Result<Option<CdifValue>> {
        if let Value::Primitive(primitive) = value {
            return self.pass_through(primitive).map(Some);
        }
        let Value::Custom(custom) = value else {
            return self.encode_preprocessed(key, value);
        };
        let addr = custom.addr();
        if !self.active.insert(addr) {
            return Err(Error::type_error("Circular structure detected"));
        }
        let encoded = self.encode_preprocessed(key, value);
        self.active.remove(&addr);
        encoded
    }

    fn encode_preprocessed(&mut self, key: Key<'_>, value: &Value) -> Result<Option<CdifValue>> {
        let (type_name, value) = match self.preprocess(key, value)? {
            Preprocessed::Continue => (None, Cow::Borrowed(value)),
            Preprocessed::Replace(replacement) => (None, Cow::Owned(replacement)),
            Preprocessed::Typed { type_name, value } => {
                if !value.is_aggregate() {
                    return Err(Error::type_error(format!(
                        "Type identifier \"{}\" can only be given to arrays and objects",
                        type_name
                    )));
                }
                (Some(type_name), Cow::Owned(value))
            }
            Preprocessed::Omit => return Ok(None),
        };

        match value.as_ref() {
            Value::Array(items) => {
                self.enter()?;
                let encoded = self.encode_collection(items, type_name);
                self.depth -= 1;
                encoded.map(Some)
            }
            Value::Object(map) => {
                self.enter()?;
                let entries = map.iter().map(|(name, child)| (name.as_str(), child));
                let encoded = self.encode_object(entries, type_name);
                self.depth -= 1;
                encoded.map(Some)
            }
            Value::Primitive(primitive) => self.pass_through(primitive).map(Some),
            // a replacement custom value gets its own turn through the hooks
            Value::Custom(_) if matches!(value, Cow::Owned(_)) => self.encode(key, &value),
            Value::Custom(custom) => {
                if self.options.strict {
                    return Err(Error::type_error(format!(
                        "Cannot serialize custom value {:?}",
                        custom
                    )));
                }
                Ok(None)
            }
            scalar => self.encode_scalar(scalar).map(Some),
        }
    }

    /// The stringifier recurses over the encoded tree, so bounding the
    /// encoder bounds both.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::general(format!(
                "Maximum nesting depth of {} exceeded",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn preprocess(&self, key: Key<'_>, value: &Value) -> Result<Preprocessed> {
        let data = PreprocessData { key, value };
        for preprocessor in &self.options.preprocessors {
            match preprocessor.preprocess(&data)? {
                Preprocessed::Continue => continue,
                handled => return Ok(handled),
            }
        }
        Ok(Preprocessed::Continue)
    }

    fn pass_through(&self, primitive: &PrimitiveValue) -> Result<CdifValue> {
        if primitive.version() != self.version {
            return Err(Error::general(format!(
                "cDIF primitive value version mismatch (expected {}, got {})",
                self.version,
                primitive.version()
            )));
        }
        Ok(CdifValue::Primitive(primitive.clone()))
    }

    fn encode_collection(&mut self, items: &[Value], type_name: Option<String>) -> Result<CdifValue> {
        let mut encoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.encode(Key::Index(index), item)? {
                Some(value) => encoded.push(value),
                None if self.options.strict => {
                    return Err(Error::general("Collection value was omitted"))
                }
                None => encoded.push(CdifValue::Primitive(PrimitiveValue::null(self.version))),
            }
        }
        Collection::new(encoded, type_name).map(CdifValue::Collection)
    }

    fn encode_object<'v>(
        &mut self,
        entries: impl Iterator<Item = (&'v str, &'v Value)>,
        type_name: Option<String>,
    ) -> Result<CdifValue> {
        let mut encoded = IndexMap::new();
        for (name, child) in entries {
            if let Some(value) = self.encode(Key::Property(name), child)? {
                encoded.insert(name.to_string(), value);
            }
        }
        Object::new(encoded, type_name).map(CdifValue::Object)
    }

    fn encode_scalar(&self, value: &Value) -> Result<CdifValue> {
        let version = self.version;
        let primitive = match value {
            Value::Null => PrimitiveValue::null(version),
            Value::Bool(b) => PrimitiveValue::boolean(*b, version),
            Value::Number(Number::Integer(i)) => PrimitiveValue::integer(BigInt::from(*i), version),
            Value::Number(Number::Float(f)) if f.is_nan() => {
                if self.options.strict {
                    return Err(Error::type_error("Cannot serialize NaN"));
                }
                PrimitiveValue::null(version)
            }
            Value::Number(Number::Float(f)) if f.is_infinite() => {
                PrimitiveValue::infinite(*f < 0.0, version)
            }
            Value::Number(Number::Float(f)) => {
                let float = Float::from_f64(*f).ok_or_else(|| {
                    Error::general(format!("Failed to normalize float {}", f))
                })?;
                PrimitiveValue::float(float, version)
            }
            Value::BigInt(big) => PrimitiveValue::integer(big.clone(), version),
            Value::Char(c) => PrimitiveValue::from_native_char(*c, version),
            Value::String(s) => PrimitiveValue::from_native_string(s, version),
            Value::Array(_) | Value::Object(_) | Value::Primitive(_) | Value::Custom(_) => {
                return Err(Error::general("Attempted to encode a non-scalar as a scalar"))
            }
        };
        Ok(CdifValue::Primitive(primitive))
    }
}
