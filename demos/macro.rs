//! Using the cdif! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_cdif::{cdif, to_string_pretty, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let null_val = cdif!(null);
    let bool_val = cdif!(true);
    let number = cdif!(42);
    let letter = cdif!('c');
    let text = cdif!("Hello, cDIF!");

    println!("Primitives:");
    println!("  null:   {}", null_val);
    println!("  bool:   {}", bool_val);
    println!("  number: {}", number);
    println!("  char:   {}", letter);
    println!("  text:   {}\n", text);

    let numbers = cdif!([1, 2, 3, 4, 5]);
    let mixed = cdif!([1, "two", '3', true, null, (-4.5)]);

    println!("Arrays:");
    println!("  Numbers: {}", numbers);
    println!("  Mixed:   {}\n", mixed);

    let config = cdif!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432
        },
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Nested structures:");
    println!("{}\n", to_string_pretty(&config)?);

    let items = vec![
        cdif!({"id": 1, "status": "active"}),
        cdif!({"id": 2, "status": "pending"}),
    ];
    let summary = cdif!({
        "total": (items.len()),
        "items": items
    });

    println!("Dynamic construction:");
    println!("{}\n", summary);

    if let Some(name) = config.get("app").and_then(|app| app.get("name")).and_then(Value::as_str) {
        println!("Accessing values:");
        println!("  App name: {}", name);
    }
    if let Some(features) = config.get("features").and_then(Value::as_array) {
        println!("  Features: {}", features.len());
    }

    Ok(())
}
