//! Customizing cDIF output with SerializerOptions and FileOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_cdif::{
    to_string_with_options, to_value, Cdif, CdifOptions, FileOptions, Separator,
    SerializerOptions,
};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
    ratios: Vec<f64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
        ratios: vec![0.5, 2.0, f64::INFINITY],
    };

    println!("Default (single line, commas):");
    println!("{}\n", serde_cdif::to_string(&config)?);

    println!("Pretty (tabs, semicolons):");
    println!("{}\n", serde_cdif::to_string_pretty(&config)?);

    println!("Two-space indent, commas, no final separator:");
    let spaces = SerializerOptions::new().with_indent("  ");
    println!("{}\n", to_string_with_options(&config, spaces)?);

    println!("Single line, semicolons:");
    let semicolons = SerializerOptions::new().with_separator(Separator::Semicolon);
    println!("{}\n", to_string_with_options(&config, semicolons)?);

    println!("NaN in lenient mode:");
    let lenient = SerializerOptions::new().with_strict(false);
    println!("{}\n", to_string_with_options(&vec![1.0, f64::NAN], lenient)?);

    println!("File form:");
    let cdif = Cdif::new(CdifOptions::new().with_serializer(SerializerOptions::pretty()))?;
    let file = FileOptions::new()
        .with_version_string("1.0")
        .with_final_semicolon(true);
    print!("{}", cdif.serialize_file(&to_value(&config)?, &file)?);

    Ok(())
}
