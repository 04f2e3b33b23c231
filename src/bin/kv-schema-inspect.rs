//! # Schema Inspector
//!
//! A command-line utility for listing the fields of a published configuration
//! schema, or for resolving a file of overrides against it.
//!
//! ## Usage
//!
//! ### List a Schema
//!
//! ```bash
//! cargo run --bin kv-schema-inspect llmLlamaLoad
//! ```
//!
//! ### Resolve Overrides
//!
//! ```bash
//! cargo run --bin kv-schema-inspect llmLlamaPrediction overrides.json
//! cargo run --bin kv-schema-inspect llmLlamaPrediction overrides.json --strict
//! ```
//!
//! The overrides file holds either the wire shape
//! (`{"fields": [{"key": "temperature", "value": 0.2}]}`) or a flat object
//! (`{"temperature": 0.2}`).
//!
//! ## Output Examples
//!
//! ```text
//! Schema: llmSharedLoad (2 fields, fingerprint 3f1c...)
//!   contextLength   numeric   2048
//!   seed            numeric   -1
//! ```
//!
//! Resolution prints the resolved configuration as JSON on stdout. Rejected
//! overrides and unknown keys are reported on stderr.
//!
//! ## Exit Codes
//!
//! - `0`: Listing or resolution succeeded (lenient mode may still report rejected overrides)
//! - `1`: Unknown schema, unreadable overrides, or strict resolution failed

use kv_schema::error::{KvSchemaError, KvSchemaResult};
use kv_schema::{KvConfig, ResolveOptions, Schema, library};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <schema-name> [overrides.json] [--strict]", args[0]);
        eprintln!();
        eprintln!("Schemas:");
        for name in library::SCHEMA_NAMES {
            eprintln!("  {}", name);
        }
        process::exit(1);
    }

    let strict = args.iter().any(|arg| arg == "--strict");
    let positional: Vec<&String> = args[1..].iter().filter(|arg| !arg.starts_with("--")).collect();

    let result = match positional.as_slice() {
        [name] => schema_by_name(name).and_then(|schema| print_schema(name, schema)),
        [name, overrides_path, ..] => resolve_file(name, overrides_path, strict),
        [] => Err(KvSchemaError::UnknownSchema {
            name: String::new(),
        }),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

fn schema_by_name(name: &str) -> KvSchemaResult<&'static Schema> {
    library::by_name(name).ok_or_else(|| KvSchemaError::UnknownSchema {
        name: name.to_string(),
    })
}

fn print_schema(name: &str, schema: &Schema) -> KvSchemaResult<()> {
    let fingerprint = schema.fingerprint()?;
    println!(
        "Schema: {} ({} fields, fingerprint {})",
        name,
        schema.len(),
        &fingerprint[..12]
    );

    let width = schema
        .keys()
        .map(|key| key.to_string().len())
        .max()
        .unwrap_or(0);
    for field in schema.fields() {
        println!(
            "  {:<width$}  {:<22}  {}",
            field.key().to_string(),
            field.value_type(),
            field.default_value(),
            width = width
        );
    }
    Ok(())
}

fn resolve_file(name: &str, overrides_path: &str, strict: bool) -> KvSchemaResult<()> {
    let schema = schema_by_name(name)?;
    let content = fs::read_to_string(overrides_path).map_err(|e| KvSchemaError::Io {
        path: overrides_path.to_string(),
        message: e.to_string(),
    })?;
    let overrides = KvConfig::from_json_str(&content)?;

    let options = if strict {
        ResolveOptions::strict()
    } else {
        ResolveOptions::lenient()
    };
    let resolution = schema.resolve(&overrides, &options)?;

    for error in &resolution.field_errors {
        eprintln!("⚠ {}", error);
    }
    for unknown in &resolution.unknown_keys {
        eprintln!("⚠ {}; ignored", unknown);
    }

    let output = serde_json::to_string_pretty(&resolution.config)?;
    println!("{}", output);
    Ok(())
}
