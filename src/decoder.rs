//! Turns [`CdifValue`] trees into native [`Value`]s, running postprocessors.

use crate::error::{Error, Result};
use crate::hooks::{Key, PostprocessData, Postprocessed};
use crate::options::ParserOptions;
use crate::primitive::{Primitive, PrimitiveValue};
use crate::structure::CdifValue;
use crate::value::{Number, Value};
use crate::CdifMap;
use num_traits::ToPrimitive;

/// How cDIF integers become native numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Integers {
    /// `i64` when the value fits, otherwise a lossy `f64`.
    Native,
    /// `i64` when the value fits, otherwise an exact `BigInt`.
    Exact,
    /// Always `BigInt`.
    Big,
}

impl Integers {
    pub(crate) fn for_options(options: &ParserOptions) -> Self {
        if options.use_big_int {
            Integers::Big
        } else {
            Integers::Native
        }
    }
}

pub(crate) fn decode_root(
    value: CdifValue,
    options: &ParserOptions,
    integers: Integers,
    version: u32,
) -> Result<Value> {
    Decoder {
        options,
        integers,
        version,
    }
    .decode(Key::Root, value)?
    .ok_or_else(|| Error::general("Root value was omitted"))
}

struct Decoder<'o> {
    options: &'o ParserOptions,
    integers: Integers,
    version: u32,
}

impl Decoder<'_> {
    /// Decodes one value, returning `None` when a postprocessor omits it.
    fn decode(&self, key: Key<'_>, value: CdifValue) -> Result<Option<Value>> {
        let (type_name, decoded) = match value {
            CdifValue::Primitive(primitive) => {
                if primitive.version() != self.version {
                    return Err(Error::general(format!(
                        "cDIF primitive value version mismatch (expected {}, got {})",
                        self.version,
                        primitive.version()
                    )));
                }
                (None, decode_primitive(&primitive, self.integers))
            }
            CdifValue::Object(object) => {
                let (type_name, entries) = object.into_parts();
                let mut map = CdifMap::with_capacity(entries.len());
                for (name, child) in entries {
                    if let Some(decoded) = self.decode(Key::Property(&name), child)? {
                        map.insert(name, decoded);
                    }
                }
                (type_name, Value::Object(map))
            }
            CdifValue::Collection(collection) => {
                let (type_name, items) = collection.into_parts();
                let mut array = Vec::with_capacity(items.len());
                for (index, child) in items.into_iter().enumerate() {
                    if let Some(decoded) = self.decode(Key::Index(index), child)? {
                        array.push(decoded);
                    }
                }
                (type_name, Value::Array(array))
            }
        };

        let data = PostprocessData {
            key,
            type_name: type_name.as_deref(),
            value: &decoded,
        };
        for postprocessor in &self.options.postprocessors {
            match postprocessor.postprocess(&data)? {
                Postprocessed::Continue => continue,
                Postprocessed::Replace(replacement) => return Ok(Some(replacement)),
                Postprocessed::Omit => return Ok(None),
            }
        }
        Ok(Some(decoded))
    }
}

/// The native equivalent of a primitive value.
pub(crate) fn decode_primitive(primitive: &PrimitiveValue, integers: Integers) -> Value {
    match primitive.kind() {
        Primitive::Integer(integer) if integers == Integers::Big => Value::BigInt(integer.clone()),
        Primitive::Integer(integer) => match (integer.to_i64(), integers) {
            (Some(small), _) => Value::Number(Number::Integer(small)),
            (None, Integers::Native) => {
                Value::Number(Number::Float(integer.to_f64().unwrap_or(f64::NAN)))
            }
            (None, _) => Value::BigInt(integer.clone()),
        },
        Primitive::Float(float) => Value::Number(Number::Float(float.to_f64())),
        Primitive::Infinite { negative: true } => Value::Number(Number::Float(f64::NEG_INFINITY)),
        Primitive::Infinite { negative: false } => Value::Number(Number::Float(f64::INFINITY)),
        Primitive::Character(_) => primitive.char_value().map_or(Value::Null, Value::Char),
        Primitive::String(_) => Value::String(primitive.text().unwrap_or_default()),
        Primitive::Boolean(value) => Value::Bool(*value),
        Primitive::Null => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Collection, Object};
    use indexmap::IndexMap;
    use num_bigint::BigInt;

    fn primitive(text: &str) -> CdifValue {
        CdifValue::from(PrimitiveValue::from_cdif_text(text, 1).unwrap())
    }

    fn object(entries: &[(&str, CdifValue)], type_name: Option<&str>) -> CdifValue {
        let entries: IndexMap<String, CdifValue> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        CdifValue::from(Object::new(entries, type_name.map(str::to_string)).unwrap())
    }

    #[test]
    fn test_primitives() {
        let options = ParserOptions::new();
        let decode = |text: &str| decode_root(primitive(text), &options, Integers::Native, 1).unwrap();
        assert_eq!(decode("0o11"), Value::from(9));
        assert_eq!(decode("-.5e1"), Value::from(-5.0));
        assert_eq!(decode("-infinity"), Value::from(f64::NEG_INFINITY));
        assert_eq!(decode("'\\u00e9'"), Value::from('\u{e9}'));
        assert_eq!(decode("`C:\\dir`"), Value::from("C:\\dir"));
        assert_eq!(decode("null"), Value::Null);
        assert_eq!(decode("99999999999999999999"), Value::from(1e20));
    }

    #[test]
    fn test_big_int_option() {
        let options = ParserOptions::new().with_big_int(true);
        let integers = Integers::for_options(&options);
        assert_eq!(integers, Integers::Big);
        let value = decode_root(primitive("99999999999999999999"), &options, integers, 1).unwrap();
        let expected: BigInt = "99999999999999999999".parse().unwrap();
        assert_eq!(value, Value::BigInt(expected));
        let small = decode_root(primitive("1"), &options, integers, 1).unwrap();
        assert_eq!(small, Value::BigInt(BigInt::from(1)));
    }

    #[test]
    fn test_exact_integers_keep_large_values() {
        let options = ParserOptions::new();
        let decode = |text: &str| decode_root(primitive(text), &options, Integers::Exact, 1).unwrap();
        assert_eq!(decode("-42"), Value::from(-42));
        assert_eq!(decode("18446744073709551615"), Value::BigInt(BigInt::from(u64::MAX)));
        assert_eq!(decode("1.5"), Value::from(1.5));
    }

    #[test]
    fn test_postprocessor_sees_keys_and_types() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let options = ParserOptions::new().with_postprocessor(
            move |data: &PostprocessData| -> Result<Postprocessed> {
                sink.lock()
                    .unwrap()
                    .push((data.key.to_string(), data.type_name.map(str::to_string)));
                Ok(Postprocessed::Continue)
            },
        );
        let tree = object(
            &[(
                "list",
                CdifValue::from(
                    Collection::new(vec![primitive("1")], Some("Items".to_string())).unwrap(),
                ),
            )],
            Some("Root"),
        );
        decode_root(tree, &options, Integers::for_options(&options), 1).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("[0]".to_string(), None),
                ("list".to_string(), Some("Items".to_string())),
                ("<root>".to_string(), Some("Root".to_string())),
            ]
        );
    }

    #[test]
    fn test_omitted_children_are_dropped() {
        let options = ParserOptions::new().with_postprocessor(
            |data: &PostprocessData| -> Result<Postprocessed> {
                Ok(match data.key {
                    Key::Index(1) | Key::Property("b") => Postprocessed::Omit,
                    _ => Postprocessed::Continue,
                })
            },
        );
        let list = CdifValue::from(
            Collection::new(vec![primitive("1"), primitive("2"), primitive("3")], None).unwrap(),
        );
        assert_eq!(
            decode_root(list, &options, Integers::for_options(&options), 1).unwrap(),
            Value::from(vec![Value::from(1), Value::from(3)])
        );
        let tree = object(&[("a", primitive("1")), ("b", primitive("2"))], None);
        let decoded = decode_root(tree, &options, Integers::for_options(&options), 1).unwrap();
        assert_eq!(decoded.as_object().map(CdifMap::len), Some(1));
    }

    #[test]
    fn test_first_handling_hook_wins() {
        let options = ParserOptions::new()
            .with_postprocessor(|_: &PostprocessData| -> Result<Postprocessed> {
                Ok(Postprocessed::Continue)
            })
            .with_postprocessor(|_: &PostprocessData| -> Result<Postprocessed> {
                Ok(Postprocessed::Replace(Value::from("first")))
            })
            .with_postprocessor(|_: &PostprocessData| -> Result<Postprocessed> {
                Ok(Postprocessed::Replace(Value::from("second")))
            });
        let value = decode_root(primitive("1"), &options, Integers::Native, 1).unwrap();
        assert_eq!(value, Value::from("first"));
    }

    #[test]
    fn test_root_omission_is_an_error() {
        let options = ParserOptions::new().with_postprocessor(
            |_: &PostprocessData| -> Result<Postprocessed> { Ok(Postprocessed::Omit) },
        );
        let err = decode_root(primitive("1"), &options, Integers::Native, 1).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::General);
        assert_eq!(err.message(), "Root value was omitted");
    }

    #[test]
    fn test_version_mismatch() {
        let err = decode_root(primitive("1"), &ParserOptions::new(), Integers::Native, 2).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::General);
    }
}
