/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object keys are string literals. Elements and property values are single
/// token trees, so negative numbers and other compound expressions need
/// parentheses.
///
/// ```rust
/// use serde_cdif::cdif;
///
/// let value = cdif!({
///     "name": "Alice",
///     "tags": ["a", 'b', (-1)],
///     "extra": null
/// });
/// assert_eq!(value.to_string(), "{name: \"Alice\", tags: [\"a\", 'b', -1], extra: null}");
/// ```
#[macro_export]
macro_rules! cdif {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::cdif!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::CdifMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::CdifMap::new();
        $(
            object.insert($key.to_string(), $crate::cdif!($value));
        )*
        $crate::Value::Object(object)
    }};

    // anything serde can serialize; failures become null
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}
