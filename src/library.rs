//! Published configuration schemas for LLM load and prediction.
//!
//! One global schema holds every key. The functional views (shared prediction
//! parameters, per-backend variants, load parameters) are derived from it with
//! `scoped`, `sliced` and `union`, built once on first use and shared for the
//! life of the process.

use crate::error::SchemaResult;
use crate::schema::{Schema, SchemaBuilder};
use crate::value_types::ValueTypeRegistry;
use serde_json::json;
use std::sync::LazyLock;

static GLOBAL_CONFIG_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| build_global_config_schema().expect("global config schema must be valid"));

static LLM_PREDICTION: LazyLock<Schema> = LazyLock::new(|| derive(|| {
    global_config_schema().scoped("llm.prediction")
}));

static LLM_LOAD: LazyLock<Schema> =
    LazyLock::new(|| derive(|| global_config_schema().scoped("llm.load")));

static LLM_SHARED_PREDICTION: LazyLock<Schema> = LazyLock::new(|| {
    derive(|| {
        LLM_PREDICTION.sliced([
            "temperature",
            "maxPredictedTokens",
            "promptTemplate",
            "systemPrompt",
            "seed",
        ])
    })
});

static LLM_LLAMA_PREDICTION: LazyLock<Schema> = LazyLock::new(|| {
    derive(|| {
        let llama = LLM_PREDICTION.sliced([
            "llama.*",
            "contextOverflowPolicy",
            "stopStrings",
            "structured",
        ])?;
        LLM_SHARED_PREDICTION.union(&llama)
    })
});

static LLM_MLX_PREDICTION: LazyLock<Schema> = LazyLock::new(|| {
    derive(|| LLM_SHARED_PREDICTION.union(&LLM_PREDICTION.sliced(["mlx.*"])?))
});

static LLM_SHARED_LOAD: LazyLock<Schema> =
    LazyLock::new(|| derive(|| LLM_LOAD.sliced(["contextLength", "seed"])));

static LLM_LLAMA_LOAD: LazyLock<Schema> = LazyLock::new(|| {
    derive(|| LLM_SHARED_LOAD.union(&LLM_LOAD.sliced(["llama.*"])?))
});

static LLM_LLAMA_MOE_LOAD: LazyLock<Schema> = LazyLock::new(|| {
    derive(|| LLM_LLAMA_LOAD.union(&LLM_LOAD.sliced(["numExperts"])?))
});

static EMPTY_CONFIG_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| SchemaBuilder::new(ValueTypeRegistry::global()).build());

/// Names accepted by [`by_name`].
pub const SCHEMA_NAMES: [&str; 9] = [
    "global",
    "llmSharedPrediction",
    "llmLlamaPrediction",
    "llmMlxPrediction",
    "llmSharedLoad",
    "llmLlamaLoad",
    "llmMlxLoad",
    "llmLlamaMoeLoad",
    "empty",
];

fn derive(derivation: impl FnOnce() -> SchemaResult<Schema>) -> Schema {
    derivation().expect("published schema derivation must be valid")
}

fn build_global_config_schema() -> SchemaResult<Schema> {
    let mut builder = SchemaBuilder::new(ValueTypeRegistry::global());

    builder.scope("llm.prediction", |b| {
        b.field(
            "temperature",
            "numeric",
            json!({ "min": 0, "max": 1, "slider": { "min": 0, "max": 1, "step": 0.01 }, "shortHand": "temp" }),
            json!(0.8),
        )?
        .field("contextOverflowPolicy", "contextOverflowPolicy", json!(null), json!("rollingWindow"))?
        .field(
            "maxPredictedTokens",
            "checkboxNumeric",
            json!({ "min": 1, "int": true }),
            json!({ "checked": false, "value": 100 }),
        )?
        .field("stopStrings", "stringArray", json!({}), json!([]))?
        .field("structured", "llamaStructuredOutput", json!(null), json!({ "type": "none" }))?
        .field(
            "promptTemplate",
            "llmPromptTemplate",
            json!(null),
            json!({
                "type": "legacy",
                "inputPrefix": "",
                "inputSuffix": "",
                "prePromptPrefix": "",
                "prePromptSuffix": "",
            }),
        )?
        .field("systemPrompt", "string", json!({}), json!(""))?
        .field("seed", "numeric", json!({ "int": true }), json!(-1))?;

        b.scope("llama", |b| {
            let unit_slider = json!({ "min": 0, "max": 1, "slider": { "min": 0, "max": 1, "step": 0.01 } });
            b.field("topKSampling", "numeric", json!({ "min": -1, "max": 500, "int": true }), json!(40))?
                .field(
                    "repeatPenalty",
                    "checkboxNumeric",
                    json!({ "min": -1 }),
                    json!({ "checked": true, "value": 1.1 }),
                )?
                .field(
                    "minPSampling",
                    "checkboxNumeric",
                    unit_slider.clone(),
                    json!({ "checked": true, "value": 0.05 }),
                )?
                .field(
                    "topPSampling",
                    "checkboxNumeric",
                    unit_slider.clone(),
                    json!({ "checked": true, "value": 0.95 }),
                )?
                .field("cpuThreads", "numeric", json!({ "min": 1, "int": true }), json!(4))?
                .field(
                    "frequencyPenalty",
                    "checkboxNumeric",
                    json!({}),
                    json!({ "checked": false, "value": 0.0 }),
                )?
                .field(
                    "presencePenalty",
                    "checkboxNumeric",
                    json!({}),
                    json!({ "checked": false, "value": 0.0 }),
                )?
                // Version 0 disables mirostat
                .field(
                    "mirostatSampling",
                    "llamaMirostatSampling",
                    json!(null),
                    json!({ "version": 0, "learningRate": 0.1, "targetEntropy": 5 }),
                )?
                .field(
                    "tailFreeSampling",
                    "checkboxNumeric",
                    unit_slider.clone(),
                    json!({ "checked": false, "value": 0.95 }),
                )?
                .field(
                    "locallyTypicalSampling",
                    "checkboxNumeric",
                    unit_slider,
                    json!({ "checked": false, "value": 0.9 }),
                )?
                .field("logitBias", "llamaLogitBias", json!(null), json!([]))?;
            Ok(())
        })?;

        b.scope("mlx", |b| {
            b.field("repeatPenalty", "numeric", json!({ "min": 1 }), json!(1.1))?;
            Ok(())
        })?;
        Ok(())
    })?;

    builder.scope("llm.load", |b| {
        b.field("contextLength", "numeric", json!({ "min": 1, "int": true }), json!(2048))?
            .field("numExperts", "numeric", json!({ "min": 0, "int": true }), json!(0))?
            .field("seed", "numeric", json!({ "int": true }), json!(-1))?;

        b.scope("llama", |b| {
            b.field("evalBatchSize", "numeric", json!({ "min": 1, "int": true }), json!(512))?
                .field(
                    "gpuOffload",
                    "llamaGpuOffload",
                    json!({}),
                    json!({ "ratio": "auto", "mainGpu": 0, "tensorSplit": [0] }),
                )?
                .field("flashAttention", "boolean", json!(null), json!(false))?
                .field("ropeFrequencyBase", "numeric", json!({}), json!(0))?
                .field("ropeFrequencyScale", "numeric", json!({}), json!(0))?
                .field("keepModelInMemory", "boolean", json!(null), json!(true))?
                .field("useFp16ForKVCache", "boolean", json!(null), json!(true))?
                .field("tryMmap", "boolean", json!(null), json!(true))?;
            Ok(())
        })?;
        Ok(())
    })?;

    Ok(builder.build())
}

/// Every configuration key known to the system.
pub fn global_config_schema() -> &'static Schema {
    &GLOBAL_CONFIG_SCHEMA
}

/// Prediction parameters every backend understands.
pub fn llm_shared_prediction() -> &'static Schema {
    &LLM_SHARED_PREDICTION
}

/// Shared prediction parameters plus llama.cpp sampling and output controls.
pub fn llm_llama_prediction() -> &'static Schema {
    &LLM_LLAMA_PREDICTION
}

/// Shared prediction parameters plus MLX-specific ones.
pub fn llm_mlx_prediction() -> &'static Schema {
    &LLM_MLX_PREDICTION
}

/// Load parameters every backend understands.
pub fn llm_shared_load() -> &'static Schema {
    &LLM_SHARED_LOAD
}

pub fn llm_llama_load() -> &'static Schema {
    &LLM_LLAMA_LOAD
}

/// MLX declares no load parameters of its own, so this is the shared set.
pub fn llm_mlx_load() -> &'static Schema {
    &LLM_SHARED_LOAD
}

/// llama.cpp load parameters plus the mixture-of-experts count.
pub fn llm_llama_moe_load() -> &'static Schema {
    &LLM_LLAMA_MOE_LOAD
}

pub fn empty_config_schema() -> &'static Schema {
    &EMPTY_CONFIG_SCHEMA
}

/// Look up a published schema by its camelCase name (see [`SCHEMA_NAMES`]).
pub fn by_name(name: &str) -> Option<&'static Schema> {
    match name {
        "global" => Some(global_config_schema()),
        "llmSharedPrediction" => Some(llm_shared_prediction()),
        "llmLlamaPrediction" => Some(llm_llama_prediction()),
        "llmMlxPrediction" => Some(llm_mlx_prediction()),
        "llmSharedLoad" => Some(llm_shared_load()),
        "llmLlamaLoad" => Some(llm_llama_load()),
        "llmMlxLoad" => Some(llm_mlx_load()),
        "llmLlamaMoeLoad" => Some(llm_llama_moe_load()),
        "empty" => Some(empty_config_schema()),
        _ => None,
    }
}
