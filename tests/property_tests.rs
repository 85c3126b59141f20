//! Property-based tests for the core roundtrip guarantees
//!
//! Native values must survive serialize-then-parse unchanged, and parsing
//! must never change what the serializer writes for the same value.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_cdif::{from_str, to_string, to_string_pretty, Cdif, CdifMap, Value};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        finite_f64().prop_map(Value::from),
        any::<char>().prop_map(Value::Char),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-zA-Z_][a-zA-Z0-9_$]{0,6}", inner), 0..6).prop_map(
                |entries| {
                    let mut map = CdifMap::new();
                    for (key, value) in entries {
                        map.insert(key, value);
                    }
                    Value::Object(map)
                }
            ),
        ]
    })
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    id: u32,
    label: String,
    weight: Option<f64>,
    flags: Vec<bool>,
    initial: char,
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        any::<u32>(),
        ".*",
        proptest::option::of(finite_f64()),
        prop::collection::vec(any::<bool>(), 0..5),
        any::<char>(),
    )
        .prop_map(|(id, label, weight, flags, initial)| Record {
            id,
            label,
            weight,
            flags,
            initial,
        })
}

proptest! {
    // Test primitive types
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i128(n in any::<i128>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u128(n in any::<u128>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_f64(f in finite_f64()) {
        prop_assert!(roundtrip(&f));
    }

    #[test]
    fn prop_char(c in any::<char>()) {
        prop_assert!(roundtrip(&c));
    }

    #[test]
    fn prop_string(s in ".*") {
        prop_assert!(roundtrip(&s));
    }

    // Test collections
    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_record(record in arb_record()) {
        prop_assert!(roundtrip(&record));
        let pretty = to_string_pretty(&record).unwrap();
        prop_assert_eq!(from_str::<Record>(&pretty).unwrap(), record);
    }

    // Test dynamic values
    #[test]
    fn prop_value_roundtrip(value in arb_value()) {
        let cdif = Cdif::default();
        let text = cdif.serialize(&value).unwrap();
        let parsed = cdif.parse(&text).unwrap();
        prop_assert_eq!(&parsed, &value);
        prop_assert_eq!(cdif.serialize(&parsed).unwrap(), text);
    }
}
