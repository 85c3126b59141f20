//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_cdif::{cdif, from_value, to_string_pretty, to_value, Cdif, CdifMap, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = cdif!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging"],
        "debug": true
    });

    println!("Config as cDIF:\n{}\n", to_string_pretty(&config)?);

    if let Some(port) = config.get("port").and_then(Value::as_i64) {
        println!("Accessing field 'port': {}", port);
    }

    // Parse into a Value, edit it and write it back out
    let mut parsed = Cdif::default().parse("{id: 7, name: \"Dynamic\", roles: [`viewer`]}")?;
    if let Some(object) = parsed.as_object_mut() {
        object.insert("roles".to_string(), cdif!(["viewer", "editor"]));
    }
    let user: User = from_value(parsed.clone())?;
    println!("Edited value: {}", parsed);
    println!("As struct:    {:?}\n", user);

    let user_value = to_value(&user)?;
    println!("Type checks:");
    println!("  is_object: {}", user_value.is_object());
    println!("  is_array:  {}", user_value.is_array());
    println!("  is_string: {}", user_value.is_string());

    let mut map = CdifMap::new();
    map.insert("user".to_string(), user_value);
    map.insert("big".to_string(), Value::from(u128::MAX.to_string()));
    println!("\n{}", Value::Object(map));

    Ok(())
}
