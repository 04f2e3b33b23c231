//! The temperature / topKSampling walkthrough, step by step.

use crate::common::{key_strings, reference_schema};
use crate::{assert_error_message_contains, assert_schema_error};
use kv_schema::{
    ConfigKey, KvConfig, ResolveError, ResolveOptions, SchemaBuilder, SchemaError,
    ValidationError, ValueTypeRegistry,
};
use serde_json::json;

#[test]
fn test_scoped_llama_yields_top_k_only() {
    let schema = reference_schema();
    let llama = schema.scoped("llama").unwrap();
    assert_eq!(key_strings(&llama), ["topKSampling"]);
}

#[test]
fn test_sliced_temperature_yields_one_key() {
    let schema = reference_schema();
    let sliced = schema.sliced(["temperature"]).unwrap();
    assert_eq!(key_strings(&sliced), ["temperature"]);

    let key = ConfigKey::parse("temperature").unwrap();
    assert_eq!(sliced.get(&key), schema.get(&key));
}

#[test]
fn test_lenient_resolution_reports_and_falls_back() {
    let schema = reference_schema();
    let overrides = KvConfig::new().with("temperature", json!(1.5));

    let resolution = schema
        .resolve(&overrides, &ResolveOptions::lenient())
        .unwrap();

    assert_eq!(
        serde_json::Value::Object(resolution.config.to_json_object()),
        json!({ "temperature": 0.8, "llama.topKSampling": 40 })
    );
    assert_eq!(resolution.field_errors.len(), 1);
    assert_eq!(resolution.field_errors[0].key, "temperature");
    assert_eq!(
        resolution.field_errors[0].reason,
        ValidationError::AboveMaximum { value: 1.5, max: 1.0 }
    );
    assert!(resolution.unknown_keys.is_empty());
}

#[test]
fn test_strict_resolution_aborts() {
    let schema = reference_schema();
    let overrides = KvConfig::new().with("temperature", json!(1.5));

    let result = schema.resolve(&overrides, &ResolveOptions::strict());
    assert_schema_error!(result.clone(), ResolveError::Strict { .. });
    assert_error_message_contains!(result, "temperature");
}

#[test]
fn test_out_of_range_default_never_reaches_resolution() {
    let mut builder = SchemaBuilder::new(ValueTypeRegistry::global());
    let result = builder.scope("llama", |b| {
        b.field(
            "topKSampling",
            "numeric",
            json!({ "min": -1, "max": 500, "int": true }),
            json!(501),
        )?;
        Ok(())
    });
    assert_schema_error!(result, SchemaError::InvalidDefaultValue { .. });
    assert!(builder.build().is_empty());
}

#[test]
fn test_ordered_output_follows_declaration() {
    let schema = reference_schema();
    let resolved = schema.defaults();
    let keys: Vec<String> = resolved.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(keys, ["temperature", "llama.topKSampling"]);
}
