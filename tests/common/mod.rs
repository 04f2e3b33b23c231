//! Common test utilities for schema testing.
//!
//! Provides the reference sampling schema used across the suite, a helper to
//! collect keys as strings, and assertion macros for construction errors.

use kv_schema::{Schema, SchemaBuilder, ValueTypeRegistry};
use serde_json::json;

pub mod fixtures;

/// Custom assertion macro for error messages
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err.to_string(),
                $substring
            ),
            Ok(_) => panic!(
                "Expected error containing '{}', but the operation succeeded",
                $substring
            ),
        }
    };
}

/// Custom assertion macro for a specific `SchemaError` variant
#[macro_export]
macro_rules! assert_schema_error {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Err(other) => panic!(
                "Expected {}, got {:?}",
                stringify!($pattern),
                other
            ),
            Ok(_) => panic!("Expected {}, but the operation succeeded", stringify!($pattern)),
        }
    };
}

/// The two-field schema from the reference example: `temperature`
/// (numeric 0..1, default 0.8) and `llama.topKSampling` (int -1..500, default 40).
pub fn reference_schema() -> Schema {
    let mut builder = SchemaBuilder::new(ValueTypeRegistry::global());
    builder
        .field("temperature", "numeric", json!({ "min": 0, "max": 1 }), json!(0.8))
        .expect("temperature declares");
    builder
        .scope("llama", |b| {
            b.field(
                "topKSampling",
                "numeric",
                json!({ "min": -1, "max": 500, "int": true }),
                json!(40),
            )?;
            Ok(())
        })
        .expect("llama scope declares");
    builder.build()
}

/// Keys of a schema as dotted strings, in declaration order.
pub fn key_strings(schema: &Schema) -> Vec<String> {
    schema.keys().map(ToString::to_string).collect()
}

/// Initialise logging once for tests that want to see `log` output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
