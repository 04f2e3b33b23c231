//! Tests for the published LLM configuration schemas.

use crate::common::fixtures::{
    llama_prediction_overrides, llama_prediction_wire_json, mixed_load_overrides,
};
use crate::common::{init_logging, key_strings};
use kv_schema::{KvConfig, KvConfigStack, ResolveOptions, library};
use serde_json::json;

#[test]
fn test_shared_prediction_keys() {
    assert_eq!(
        key_strings(library::llm_shared_prediction()),
        [
            "temperature",
            "maxPredictedTokens",
            "promptTemplate",
            "systemPrompt",
            "seed"
        ]
    );
}

#[test]
fn test_llama_prediction_is_shared_plus_backend_keys() {
    let llama = library::llm_llama_prediction();
    let shared = library::llm_shared_prediction();

    for key in shared.keys() {
        assert!(llama.contains_key(key), "missing shared key {}", key);
    }
    assert_eq!(llama.len(), shared.len() + 11 + 3);
    assert!(llama.get_str("llama.topKSampling").is_some());
    assert!(llama.get_str("contextOverflowPolicy").is_some());
    assert!(llama.get_str("mlx.repeatPenalty").is_none());
}

#[test]
fn test_mlx_prediction_keys() {
    let mlx = library::llm_mlx_prediction();
    assert_eq!(mlx.len(), library::llm_shared_prediction().len() + 1);
    assert_eq!(
        mlx.get_str("mlx.repeatPenalty").unwrap().default_value(),
        &json!(1.1)
    );
}

#[test]
fn test_load_schemas() {
    assert_eq!(
        key_strings(library::llm_shared_load()),
        ["contextLength", "seed"]
    );

    let llama_load = library::llm_llama_load();
    assert_eq!(llama_load.len(), 2 + 8);
    assert!(llama_load.get_str("numExperts").is_none());

    let moe = library::llm_llama_moe_load();
    assert_eq!(moe.len(), llama_load.len() + 1);
    assert_eq!(
        moe.get_str("numExperts").unwrap().default_value(),
        &json!(0)
    );
}

#[test]
fn test_prediction_and_load_seeds_are_distinct_keys() {
    let global = library::global_config_schema();
    assert!(global.get_str("llm.prediction.seed").is_some());
    assert!(global.get_str("llm.load.seed").is_some());
}

#[test]
fn test_resolve_llama_prediction_overrides() {
    init_logging();
    let schema = library::llm_llama_prediction();
    let resolution = schema
        .resolve(&llama_prediction_overrides(), &ResolveOptions::strict())
        .unwrap();

    assert!(resolution.is_clean());
    assert_eq!(resolution.config.len(), schema.len());
    assert_eq!(resolution.config.get("temperature"), Some(&json!(0.25)));
    assert_eq!(resolution.config.get("llama.topKSampling"), Some(&json!(20)));
    assert_eq!(
        resolution.config.get("llama.cpuThreads"),
        Some(&json!(4)),
        "untouched keys keep their defaults"
    );
}

#[test]
fn test_wire_json_round_trip_resolves_identically() {
    let schema = library::llm_llama_prediction();
    let parsed = KvConfig::from_json_str(&llama_prediction_wire_json()).unwrap();

    let direct = schema
        .resolve(&llama_prediction_overrides(), &ResolveOptions::default())
        .unwrap();
    let via_wire = schema.resolve(&parsed, &ResolveOptions::default()).unwrap();
    assert_eq!(direct, via_wire);
}

#[test]
fn test_resolve_mixed_load_overrides_leniently() {
    init_logging();
    let schema = library::llm_llama_load();
    let resolution = schema
        .resolve(&mixed_load_overrides(), &ResolveOptions::lenient())
        .unwrap();

    assert_eq!(resolution.config.get("contextLength"), Some(&json!(8192)));
    assert_eq!(
        resolution.config.get("llama.gpuOffload").unwrap()["ratio"],
        json!(0.75)
    );
    assert_eq!(resolution.config.get("llama.evalBatchSize"), Some(&json!(512)));
    assert_eq!(resolution.field_errors.len(), 1);
    assert_eq!(resolution.field_errors[0].key, "llama.evalBatchSize");
    assert_eq!(resolution.unknown_key_names(), ["mlx.kvBits"]);
}

#[test]
fn test_layered_overrides_resolve() {
    let schema = library::llm_shared_load();
    let stack = KvConfigStack::new()
        .with_layer(KvConfig::new().with("contextLength", json!(4096)).with("seed", json!(7)))
        .with_layer(KvConfig::new().with("contextLength", json!(16384)));

    let resolution = schema
        .resolve(&stack.collapse(), &ResolveOptions::strict())
        .unwrap();
    assert_eq!(resolution.config.get("contextLength"), Some(&json!(16384)));
    assert_eq!(resolution.config.get("seed"), Some(&json!(7)));
}

#[test]
fn test_published_fingerprints_are_stable() {
    let first = library::llm_llama_prediction().fingerprint().unwrap();
    let rebuilt = library::llm_shared_prediction()
        .union(
            &library::global_config_schema()
                .scoped("llm.prediction")
                .unwrap()
                .sliced(["llama.*", "contextOverflowPolicy", "stopStrings", "structured"])
                .unwrap(),
        )
        .unwrap();
    assert_eq!(rebuilt.fingerprint().unwrap(), first);
}

#[test]
fn test_schema_serializes_descriptors() {
    let json = serde_json::to_value(library::llm_shared_load()).unwrap();
    let fields = json["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["key"], json!("contextLength"));
    assert_eq!(fields[0]["valueType"], json!("numeric"));
    assert_eq!(fields[0]["params"], json!({ "min": 1.0, "int": true }));
    assert_eq!(fields[0]["defaultValue"], json!(2048));
}

#[test]
fn test_wire_duplicates_resolve_to_last_value() {
    let overrides = KvConfig::from_json_str(
        r#"{"fields":[{"key":"temperature","value":0.1},{"key":"temperature","value":0.3}]}"#,
    )
    .unwrap();
    let resolution = library::llm_llama_prediction()
        .resolve(&overrides, &ResolveOptions::strict())
        .unwrap();
    assert_eq!(resolution.config.get("temperature"), Some(&json!(0.3)));
    assert!(resolution.is_clean());
}
