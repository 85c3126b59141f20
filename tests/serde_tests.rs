use serde::{Deserialize, Serialize};
use serde_cdif::{
    from_slice, from_str, from_str_with_options, from_value, to_string, to_string_pretty,
    to_value, Cdif, Number, ParserOptions, Value,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Status {
    Pending,
    Shipped { tracking: String },
    Split(u32, u32),
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    }
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: alice(),
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
        note: None,
    }
}

#[test]
fn test_simple_struct() {
    let text = to_string(&alice()).unwrap();
    assert_eq!(
        text,
        "{id: 123, name: \"Alice\", active: true, tags: [\"admin\", \"developer\"]}"
    );
    let back: User = from_str(&text).unwrap();
    assert_eq!(back, alice());
}

#[test]
fn test_nested_struct() {
    let text = to_string_pretty(&order()).unwrap();
    println!("Order cDIF:\n{}", text);
    assert!(text.contains("\n\t\t\tsku: \"WIDGET-001\";\n"));
    assert!(text.ends_with("\tnote: null;\n}"));

    let back: Order = from_str(&text).unwrap();
    assert_eq!(back, order());
}

#[test]
fn test_enums() {
    let statuses = vec![
        Status::Pending,
        Status::Shipped {
            tracking: "1Z999".to_string(),
        },
        Status::Split(1, 2),
    ];
    let text = to_string(&statuses).unwrap();
    assert_eq!(
        text,
        "[\"Pending\", {Shipped: {tracking: \"1Z999\"}}, {Split: [1, 2]}]"
    );
    let back: Vec<Status> = from_str(&text).unwrap();
    assert_eq!(back, statuses);
}

#[test]
fn test_primitives() {
    assert_eq!(to_string(&42).unwrap(), "42");
    assert_eq!(to_string(&-7i8).unwrap(), "-7");
    assert_eq!(to_string(&true).unwrap(), "true");
    assert_eq!(to_string(&()).unwrap(), "null");
    assert_eq!(to_string(&'q').unwrap(), "'q'");
    assert_eq!(to_string("hi").unwrap(), "\"hi\"");

    assert_eq!(from_str::<i32>("0x2A").unwrap(), 42);
    assert!(from_str::<bool>("true").unwrap());
    assert_eq!(from_str::<char>("'\\u00e9'").unwrap(), '\u{e9}');
    assert_eq!(from_str::<String>("`raw\\text`").unwrap(), "raw\\text");
}

#[test]
fn test_numbers() {
    assert_eq!(to_string(&1.5).unwrap(), "1.5");
    assert_eq!(to_string(&2.0).unwrap(), "2.");
    assert_eq!(to_string(&0.000001).unwrap(), "0.000001");
    assert_eq!(to_string(&0.0000001).unwrap(), "1.e-7");
    assert_eq!(to_string(&-0.00000123).unwrap(), "-1.23e-6");
    assert_eq!(to_string(&1e-8).unwrap(), "1.e-8");
    assert_eq!(to_string(&1e21).unwrap(), "1.e21");
    assert_eq!(to_string(&f64::INFINITY).unwrap(), "infinity");
    assert_eq!(to_string(&f64::NEG_INFINITY).unwrap(), "-infinity");
    assert_eq!(to_string(&u64::MAX).unwrap(), "18446744073709551615");
    assert_eq!(to_string(&i128::MIN).unwrap(), i128::MIN.to_string());

    for float in [29.99, -0.125, 6.02214076e23, 5e-324, f64::MAX] {
        let back: f64 = from_str(&to_string(&float).unwrap()).unwrap();
        assert_eq!(back, float);
    }
}

#[test]
fn test_wide_integers_roundtrip() {
    let back: u64 = from_str(&to_string(&u64::MAX).unwrap()).unwrap();
    assert_eq!(back, u64::MAX);

    let past_i64 = i128::from(i64::MAX) + 1;
    let back: i128 = from_str(&to_string(&past_i64).unwrap()).unwrap();
    assert_eq!(back, past_i64);

    let back: u128 = from_str(&to_string(&u128::MAX).unwrap()).unwrap();
    assert_eq!(back, u128::MAX);

    let options = ParserOptions::new().with_big_int(true);
    let back: u64 = from_str_with_options(&to_string(&u64::MAX).unwrap(), options).unwrap();
    assert_eq!(back, u64::MAX);

    let back: u64 = from_slice(to_string(&u64::MAX).unwrap().as_bytes()).unwrap();
    assert_eq!(back, u64::MAX);
}

#[test]
fn test_wide_integers_stay_lossy_in_dynamic_values() {
    let value = Cdif::default().parse("18446744073709551615").unwrap();
    assert_eq!(value, Value::from(18446744073709551615u64 as f64));
}

#[test]
fn test_nan_is_rejected() {
    let err = to_string(&f64::NAN).unwrap_err();
    assert_eq!(err.kind(), serde_cdif::ErrorKind::Type);
}

#[test]
fn test_special_strings() {
    let cases = [
        ("", "\"\""),
        ("quote \" inside", "\"quote \\\" inside\""),
        ("it's", "\"it's\""),
        ("tab\there", "\"tab\\there\""),
        ("line\nbreak", "\"line\\nbreak\""),
        ("back\\slash", "\"back\\\\slash\""),
        ("del\u{7f}", "\"del\\u007F\""),
        ("emoji \u{1F600}", "\"emoji \u{1F600}\""),
    ];
    for (input, expected) in cases {
        let text = to_string(input).unwrap();
        assert_eq!(text, expected, "serializing {:?}", input);
        let back: String = from_str(&text).unwrap();
        assert_eq!(back, input);
    }
    assert_eq!(to_string(&'\'').unwrap(), "'\\''");
    assert_eq!(to_string(&'"').unwrap(), "'\"'");
}

#[test]
fn test_empty_collections() {
    let empty: Vec<i32> = vec![];
    assert_eq!(to_string(&empty).unwrap(), "[]");
    let map: BTreeMap<String, i32> = BTreeMap::new();
    assert_eq!(to_string(&map).unwrap(), "{}");

    let back: Vec<i32> = from_str("[]").unwrap();
    assert!(back.is_empty());
}

#[test]
fn test_maps() {
    let mut scores = BTreeMap::new();
    scores.insert("alice".to_string(), 10);
    scores.insert("bob".to_string(), 7);
    let text = to_string(&scores).unwrap();
    assert_eq!(text, "{alice: 10, bob: 7}");
    let back: BTreeMap<String, i32> = from_str(&text).unwrap();
    assert_eq!(back, scores);

    let mut bad = BTreeMap::new();
    bad.insert("not a name".to_string(), 1);
    let err = to_string(&bad).unwrap_err();
    assert_eq!(err.kind(), serde_cdif::ErrorKind::Syntax);

    let mut numeric = BTreeMap::new();
    numeric.insert(1, 1);
    assert!(to_string(&numeric).is_err());
}

#[test]
fn test_to_value() {
    let value = to_value(&alice()).unwrap();
    match value {
        Value::Object(obj) => {
            assert_eq!(obj.get("id"), Some(&Value::Number(Number::Integer(123))));
            assert_eq!(obj.get("name"), Some(&Value::String("Alice".to_string())));
            assert_eq!(obj.get("active"), Some(&Value::Bool(true)));
            if let Some(Value::Array(tags)) = obj.get("tags") {
                assert_eq!(tags.len(), 2);
                assert_eq!(tags[0], Value::String("admin".to_string()));
            } else {
                panic!("tags should be an array");
            }
        }
        _ => panic!("Expected object"),
    }

    let back: User = from_value(to_value(&alice()).unwrap()).unwrap();
    assert_eq!(back, alice());
}

#[test]
fn test_typed_input_deserializes() {
    let text = "
        User {
            id: 0x7B;
            name: \"Alice\";
            active: true;
            tags: Tags [`admin`, \"developer\"];
        }
    ";
    let user: User = from_str(text).unwrap();
    assert_eq!(user, alice());
}

#[test]
fn test_components_deserialize() {
    let text = "\
[
    {...$base, id: 1, name: \"Alice\"},
    {...$base, id: 2, name: \"Bob\", active: false},
]
# components
{
    base: {id: 0, name: \"\", active: true, tags: []};
}
";
    let users: Vec<User> = from_str(text).unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Alice");
    assert!(users[0].active);
    assert_eq!(users[1].id, 2);
    assert!(!users[1].active);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let user: User = from_str(
        "{id: 1, name: \"A\", active: false, tags: [], extra: {deep: [1, 2, 3]}}",
    )
    .unwrap();
    assert_eq!(user.id, 1);
}

#[test]
fn test_big_integers() {
    let options = ParserOptions::new().with_big_int(true);
    let value: i128 = from_str_with_options("-0x8000_0000_0000_0000_0000", options).unwrap();
    assert_eq!(value, -(1i128 << 83));

    let rounded: f64 = from_str("0x8000_0000_0000_0000_0000").unwrap();
    assert_eq!(rounded, 2f64.powi(83));
}

/// Values move between cDIF and JSON through the shared serde data model.
mod json_interop {
    use super::*;

    #[test]
    fn test_cdif_to_json() {
        let value: serde_json::Value =
            from_str("{a: 0x10, b: [1.5, 'c'], c: null, d: undef}").unwrap();
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"a":16,"b":[1.5,"c"],"c":null}"#
        );
    }

    #[test]
    fn test_json_to_cdif() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"name": "x", "n": [1, 2.5, true], "big": 18446744073709551615}"#)
                .unwrap();
        let value = to_value(&json).unwrap();
        assert!(value.get("big").is_some_and(Value::is_bigint));
        assert_eq!(
            to_string(&json).unwrap(),
            "{name: \"x\", n: [1, 2.5, true], big: 18446744073709551615}"
        );
    }
}
