//! Reusing values through the components section.
//!
//! Run with: cargo run --example components
//!
//! Parser debug events are printed to stderr.

use serde::Deserialize;
use serde_cdif::{Cdif, ErrorKind};
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Service {
    name: String,
    image: String,
    replicas: u32,
    env: Vec<String>,
}

const DEPLOYMENT: &str = "\
# cDIF 1.0
[
    Service {...$defaults, name: \"api\", env: [...$common_env, \"PORT=8080\"]};
    Service {...$defaults, name: \"worker\", replicas: 4};
]
# components
{
    defaults: {image: $image, replicas: 2, env: $common_env};
    image: \"registry.local/app:1.4\";
    common_env: [\"LOG=info\", \"REGION=eu\"];
}
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    println!("Input:\n{}", DEPLOYMENT);

    let cdif = Cdif::default();
    let value = cdif.parse(DEPLOYMENT)?;
    println!("Resolved: {}\n", value);

    let services: Vec<Service> = serde_cdif::from_value(value)?;
    for service in &services {
        println!(
            "{} runs {} x{} with {:?}",
            service.name, service.image, service.replicas, service.env
        );
    }

    let circular = "$a\n# components\n{a: {inner: $b}; b: [$a]}";
    match cdif.parse(circular) {
        Err(err) if err.kind() == ErrorKind::Reference => println!("\nRejected: {}", err),
        other => println!("\nUnexpected: {:?}", other),
    }

    Ok(())
}
