//! Loading a configuration struct with Serde.
//!
//! Run with: cargo run --example typed_config

use serde::Deserialize;
use serde_dotenv::from_str;
use std::error::Error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct Config {
    host: String,
    port: u16,
    workers: Option<u32>,
    tls: bool,
    log_level: LogLevel,
    allowed_origins: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let source = "\
# Network
HOST=0.0.0.0
PORT=8443
TLS=true

# Leave empty to use one worker per core
WORKERS=
LOG_LEVEL=info
ALLOWED_ORIGINS=\"https://example.com, https://admin.example.com\"
";

    let config: Config = from_str(source)?;
    println!("Listening on {}:{} (tls: {})", config.host, config.port, config.tls);
    match config.workers {
        Some(workers) => println!("Workers: {workers}"),
        None => println!("Workers: one per core"),
    }
    println!("Log level: {:?}", config.log_level);
    println!("Allowed origins: {:?}", config.allowed_origins);

    // Conversion errors name the offending value
    match from_str::<Config>(&source.replace("8443", "not-a-port")) {
        Ok(_) => println!("unexpectedly parsed"),
        Err(e) => println!("\n{}", e),
    }

    Ok(())
}
