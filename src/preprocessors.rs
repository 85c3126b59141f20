//! Ready-made [`Preprocessor`]s.

use crate::error::{Error, Result};
use crate::hooks::{Key, PreprocessData, Preprocessed, Preprocessor};
use crate::value::{Number, Value};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use std::collections::HashSet;

/// Omits every object property whose name is not in `names`, in nested
/// objects too. Array elements are not affected.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{cdif, preprocessors, to_string_with_options, SerializerOptions};
///
/// let options = SerializerOptions::new()
///     .with_preprocessor(preprocessors::filter_object_properties(["id", "tags"]));
/// let value = cdif!({"id": 7, "secret": "x", "tags": [{"id": 1, "extra": 2}]});
/// assert_eq!(
///     to_string_with_options(&value, options).unwrap(),
///     "{id: 7, tags: [{id: 1}]}"
/// );
/// ```
pub fn filter_object_properties<I, S>(names: I) -> impl Preprocessor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: HashSet<String> = names.into_iter().map(Into::into).collect();
    move |data: &PreprocessData<'_>| -> Result<Preprocessed> {
        Ok(match data.key {
            Key::Property(name) if !names.contains(name) => Preprocessed::Omit,
            _ => Preprocessed::Continue,
        })
    }
}

/// Encodes whole, finite floats as integers, so `2.0` is written `2`.
///
/// ```rust
/// use serde_cdif::{preprocessors, to_string_with_options, SerializerOptions};
///
/// let options = SerializerOptions::new().with_preprocessor(preprocessors::use_integers());
/// assert_eq!(to_string_with_options(&vec![2.0, 2.5], options).unwrap(), "[2, 2.5]");
/// ```
pub fn use_integers() -> impl Preprocessor {
    |data: &PreprocessData<'_>| -> Result<Preprocessed> {
        if let Value::Number(Number::Float(f)) = data.value {
            if f.is_finite() && f.fract() == 0.0 {
                let integer = BigInt::from_f64(*f)
                    .ok_or_else(|| Error::general(format!("Cannot convert {} to an integer", f)))?;
                return Ok(Preprocessed::Replace(Value::BigInt(integer)));
            }
        }
        Ok(Preprocessed::Continue)
    }
}

/// Gives `type_name` to every array or object for which `condition` holds.
/// The value itself is left unchanged.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{cdif, preprocessors, to_string_with_options, SerializerOptions};
///
/// let options = SerializerOptions::new().with_preprocessor(preprocessors::assign_type(
///     "Point",
///     |_key, value| value.get("x").is_some(),
/// ));
/// let value = cdif!([{"x": 1}, {"y": 2}]);
/// assert_eq!(
///     to_string_with_options(&value, options).unwrap(),
///     "[Point {x: 1}, {y: 2}]"
/// );
/// ```
pub fn assign_type<F>(type_name: impl Into<String>, condition: F) -> impl Preprocessor
where
    F: Fn(Key<'_>, &Value) -> bool + Send + Sync + 'static,
{
    let type_name = type_name.into();
    move |data: &PreprocessData<'_>| -> Result<Preprocessed> {
        if data.value.is_aggregate() && condition(data.key, data.value) {
            Ok(Preprocessed::Typed {
                type_name: type_name.clone(),
                value: data.value.clone(),
            })
        } else {
            Ok(Preprocessed::Continue)
        }
    }
}

/// Hands [`Value::Custom`] values to their
/// [`CdifPreprocessable`](crate::CdifPreprocessable) implementation.
pub fn use_preprocess_methods() -> impl Preprocessor {
    |data: &PreprocessData<'_>| -> Result<Preprocessed> {
        match data.value {
            Value::Custom(custom) => custom.get().preprocess(data.key),
            _ => Ok(Preprocessed::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cdif, Cdif, CdifOptions, CdifPreprocessable, CustomValue, ErrorKind};
    use crate::SerializerOptions;

    fn serialize(value: &Value, options: SerializerOptions) -> Result<String> {
        Cdif::new(CdifOptions::new().with_serializer(options))?.serialize(value)
    }

    #[test]
    fn test_filter_keeps_listed_properties_only() {
        let options = SerializerOptions::new()
            .with_preprocessor(filter_object_properties(vec!["a".to_string()]));
        let value = cdif!({"a": {"a": 1, "b": 2}, "b": 3});
        assert_eq!(serialize(&value, options).unwrap(), "{a: {a: 1}}");
    }

    #[test]
    fn test_use_integers_leaves_fractions() {
        let options = SerializerOptions::new().with_preprocessor(use_integers());
        let value = Value::from(vec![Value::from(-3.0), Value::from(0.5), Value::from(1e15)]);
        let text = serialize(&value, options).unwrap();
        assert_eq!(text, "[-3, 0.5, 1000000000000000]");
    }

    #[test]
    fn test_assign_type_ignores_scalars() {
        let options = SerializerOptions::new()
            .with_preprocessor(assign_type("Any", |_, _| true));
        let value = cdif!({"list": [1]});
        assert_eq!(serialize(&value, options).unwrap(), "Any {list: Any [1]}");
    }

    #[derive(Debug)]
    struct Fails;

    impl CdifPreprocessable for Fails {
        fn preprocess(&self, key: Key<'_>) -> Result<Preprocessed> {
            Err(Error::custom(format!("refusing to encode {}", key)))
        }
    }

    #[test]
    fn test_preprocess_method_errors_propagate() {
        let options = SerializerOptions::new().with_preprocessor(use_preprocess_methods());
        let value = cdif!({"bad": null});
        let mut map = value.as_object().cloned().unwrap_or_default();
        map.insert("bad".to_string(), Value::Custom(CustomValue::new(Fails)));
        let err = serialize(&Value::Object(map), options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Custom);
        assert_eq!(err.message(), "refusing to encode bad");
    }
}
