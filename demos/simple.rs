//! Basic cDIF serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_cdif::{from_str, to_string, to_string_pretty};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    initial: char,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            initial: 'A',
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            initial: 'B',
        },
    ];

    // Serialize to cDIF
    let cdif = to_string(&users)?;
    println!("cDIF output:\n{}\n", cdif);

    let pretty = to_string_pretty(&users)?;
    println!("Pretty output:\n{}\n", pretty);

    // Deserialize back to struct
    let users_back: Vec<User> = from_str(&pretty)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    // Hand-written cDIF may use comments, type names and other literal forms
    let written = "
        // the same people, written by hand
        [
            User {id: 0x2A; name: \"Alice Johnson\"; email: `alice@example.com`; initial: 'A';};
            User {id: 0x2B; name: \"Bob Smith\"; email: `bob@example.com`; initial: 'B';};
        ]
    ";
    let parsed: Vec<User> = from_str(written)?;
    assert_eq!(users, parsed);
    println!("✓ Hand-written input parsed");

    Ok(())
}
