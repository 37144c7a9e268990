//! Basic dotenv parsing and serialization.
//!
//! Run with: cargo run --example simple

use serde_dotenv::{envmap, parse, to_string};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let source = "\
APP_NAME=demo
GREETING=\"Hello,\\tworld\"
RAW='no \\n escapes here'
EMPTY=
";

    // Parse into an ordered map of strings
    let map = parse(source)?;
    for (key, value) in &map {
        println!("{key} = {value:?}");
    }

    // Serialize back; every value is quoted
    let text = to_string(&map);
    println!("\nSerialized:\n{}\n", text);

    assert_eq!(parse(&text)?, map);
    println!("✓ Round-trip successful");

    // Build a map in code
    let built = envmap! {
        "HOST" => "localhost",
        "PORT" => 8080,
    };
    println!("\n{}", to_string(&built));

    // Syntax errors point at the offending character
    if let Err(e) = parse("KEY value") {
        println!("\n{}", e);
    }

    Ok(())
}
