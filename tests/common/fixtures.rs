//! Override fixtures shaped like the configs real callers send.

use kv_schema::KvConfig;
use serde_json::json;

/// A valid llama.cpp prediction config touching shared and backend keys.
pub fn llama_prediction_overrides() -> KvConfig {
    KvConfig::new()
        .with("temperature", json!(0.25))
        .with("maxPredictedTokens", json!({ "checked": true, "value": 512 }))
        .with("stopStrings", json!(["</s>", "\n\nUser:"]))
        .with("llama.topKSampling", json!(20))
        .with("llama.mirostatSampling", json!({ "version": 2, "learningRate": 0.1, "targetEntropy": 5 }))
        .with("llama.logitBias", json!([[29871, -2.5], [13, "-inf"]]))
        .with("structured", json!({ "type": "json", "jsonSchema": { "type": "object" } }))
}

/// A llama.cpp load config with one bad value and one key from another backend.
pub fn mixed_load_overrides() -> KvConfig {
    KvConfig::new()
        .with("contextLength", json!(8192))
        .with("llama.gpuOffload", json!({ "ratio": 0.75, "mainGpu": 0, "tensorSplit": [0.5, 0.5] }))
        .with("llama.evalBatchSize", json!(0))
        .with("mlx.kvBits", json!(4))
}

/// The same overrides as a wire-format JSON document.
pub fn llama_prediction_wire_json() -> String {
    serde_json::to_string(&llama_prediction_overrides()).expect("overrides serialize")
}
