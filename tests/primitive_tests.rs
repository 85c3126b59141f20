use num_bigint::BigInt;
use serde_cdif::{Cdif, ErrorKind, Float, Primitive, PrimitiveValue, Value, CDIF_LATEST};

fn canonical(text: &str) -> String {
    Cdif::default()
        .create_primitive_value(text)
        .unwrap_or_else(|err| panic!("{:?} rejected: {}", text, err))
        .cdif_text()
}

#[test]
fn test_integer_canonicalization() {
    assert_eq!(canonical("0642"), "642");
    assert_eq!(canonical("-0000"), "0");
    assert_eq!(canonical("0x1_1"), "17");
    assert_eq!(canonical("0b101"), "5");
    assert_eq!(canonical("1_000_000"), "1000000");
    assert!(!canonical("-0xdead_beef").contains('_'));
}

#[test]
fn test_float_canonicalization() {
    assert_eq!(canonical("0000.00000e+00000"), "0.");
    assert_eq!(canonical("-.4e7"), "-0.4e7");
    assert_eq!(canonical("12.50E-3"), "12.5e-3");
    assert_eq!(canonical("+infinity"), "infinity");
}

#[test]
fn test_text_canonicalization() {
    assert_eq!(canonical(r"'\/'"), "'/'");
    assert_eq!(canonical(r#""a\'b""#), "\"a'b\"");
    assert_eq!(canonical(r"`C:\dir`"), r#""C:\\dir""#);
    assert_eq!(canonical("\"\"\"\n    two\n    lines\n    \"\"\""), r#""two\nlines""#);
}

#[test]
fn test_values_from_parts() {
    let float = Float::new(false, "1.25", BigInt::from(-2)).unwrap();
    assert_eq!(PrimitiveValue::float(float, CDIF_LATEST).cdif_text(), "1.25e-2");
    assert_eq!(
        PrimitiveValue::integer(BigInt::from(-9), CDIF_LATEST).cdif_text(),
        "-9"
    );
    assert_eq!(PrimitiveValue::infinite(true, CDIF_LATEST).cdif_text(), "-infinity");
    let string = PrimitiveValue::string(["h", "\\n", "\""], CDIF_LATEST).unwrap();
    assert_eq!(string.cdif_text(), r#""h\n\"""#);
    assert!(PrimitiveValue::string(["\u{7}"], CDIF_LATEST).is_err());
}

#[test]
fn test_rejected_literals() {
    for text in ["NaN", "1e5", "0x", "'ab'", "\"open", "True", "undef", "1__0"] {
        let err = Cdif::default().create_primitive_value(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{:?}", text);
    }
}

#[test]
fn test_parsed_primitives_decode() {
    let cdif = Cdif::default();
    let value = cdif.create_primitive_value("'\\U0001F600'").unwrap();
    assert!(matches!(value.kind(), Primitive::Character(_)));
    assert_eq!(value.char_value(), Some('\u{1F600}'));
    assert_eq!(value.version(), CDIF_LATEST);

    let number: f64 = serde_cdif::from_value(Value::Primitive(
        cdif.create_primitive_value("-12.5e-1").unwrap(),
    ))
    .unwrap();
    assert_eq!(number, -1.25);
}
