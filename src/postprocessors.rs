//! Ready-made [`Postprocessor`]s.

use crate::error::Result;
use crate::hooks::{PostprocessData, Postprocessed, Postprocessor};

/// Runs `f` only for values decoded from structures typed `type_name`. Every
/// other value is passed on to the next hook.
///
/// # Examples
///
/// ```rust
/// use serde_cdif::{postprocessors, Cdif, CdifOptions, ParserOptions, Postprocessed, Value};
///
/// let point = postprocessors::postprocess_type("Point", |data| {
///     let x = data.value.get_index(0).and_then(Value::as_i64).unwrap_or(0);
///     let y = data.value.get_index(1).and_then(Value::as_i64).unwrap_or(0);
///     Ok(Postprocessed::Replace(Value::from(format!("({}, {})", x, y))))
/// });
/// let options = CdifOptions::new().with_parser(ParserOptions::new().with_postprocessor(point));
/// let value = Cdif::new(options).unwrap().parse("[Point [1, 2], [3, 4]]").unwrap();
///
/// assert_eq!(value.get_index(0).and_then(Value::as_str), Some("(1, 2)"));
/// assert!(value.get_index(1).is_some_and(Value::is_array));
/// ```
pub fn postprocess_type<F>(type_name: impl Into<String>, f: F) -> impl Postprocessor
where
    F: Fn(&PostprocessData<'_>) -> Result<Postprocessed> + Send + Sync + 'static,
{
    let type_name = type_name.into();
    move |data: &PostprocessData<'_>| -> Result<Postprocessed> {
        if data.type_name == Some(type_name.as_str()) {
            f(data)
        } else {
            Ok(Postprocessed::Continue)
        }
    }
}
