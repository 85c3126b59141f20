//! Pre- and postprocessors for types the data model does not know about.
//!
//! Run with: cargo run --example hooks

use serde_cdif::{
    postprocessors, preprocessors, Cdif, CdifOptions, CdifPreprocessable, CustomValue, Key,
    ParserOptions, PostprocessData, Postprocessed, Preprocessed, SerializerOptions, Value,
};
use std::error::Error;

/// A color that always serializes as `Rgb [r, g, b]`.
#[derive(Debug)]
struct Rgb(u8, u8, u8);

impl CdifPreprocessable for Rgb {
    fn preprocess(&self, _key: Key<'_>) -> serde_cdif::Result<Preprocessed> {
        Ok(Preprocessed::Typed {
            type_name: "Rgb".to_string(),
            value: Value::from(vec![
                Value::from(self.0),
                Value::from(self.1),
                Value::from(self.2),
            ]),
        })
    }
}

fn hex_color(data: &PostprocessData<'_>) -> serde_cdif::Result<Postprocessed> {
    let channels = data.value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_i64)
            .map(|c| format!("{:02x}", c))
            .collect::<String>()
    });
    Ok(match channels {
        Some(hex) => Postprocessed::Replace(Value::from(format!("#{}", hex))),
        None => Postprocessed::Continue,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let serializer = SerializerOptions::pretty()
        .with_preprocessor(preprocessors::use_preprocess_methods())
        .with_preprocessor(preprocessors::filter_object_properties(["title", "palette"]))
        .with_preprocessor(preprocessors::use_integers());
    let writer = Cdif::new(CdifOptions::new().with_serializer(serializer))?;

    let mut theme = serde_cdif::CdifMap::new();
    theme.insert("title".to_string(), Value::from("Dusk"));
    theme.insert("internal_id".to_string(), Value::from(991));
    theme.insert(
        "palette".to_string(),
        Value::from(vec![
            Value::Custom(CustomValue::new(Rgb(0x1e, 0x1b, 0x4b))),
            Value::Custom(CustomValue::new(Rgb(0xf9, 0x73, 0x16))),
            Value::from(255.0),
        ]),
    );
    let text = writer.serialize(&Value::Object(theme))?;
    println!("Serialized:\n{}\n", text);

    let parser = ParserOptions::new().with_postprocessor(postprocessors::postprocess_type("Rgb", hex_color));
    let reader = Cdif::new(CdifOptions::new().with_parser(parser))?;
    println!("Parsed back: {}", reader.parse(&text)?);

    Ok(())
}
