//! Shared schemas resolved and derived from many tasks at once.

use crate::common::fixtures::{llama_prediction_overrides, mixed_load_overrides};
use kv_schema::{ResolveOptions, library};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution_is_deterministic() {
    let schema = library::llm_llama_prediction();
    let overrides = Arc::new(llama_prediction_overrides());
    let expected = schema
        .resolve(&overrides, &ResolveOptions::lenient())
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..32 {
        let overrides = overrides.clone();
        handles.push(tokio::spawn(async move {
            let mut results = Vec::new();
            for _ in 0..10 {
                results.push(
                    library::llm_llama_prediction()
                        .resolve(&overrides, &ResolveOptions::lenient())
                        .expect("lenient resolution never fails"),
                );
            }
            results
        }));
    }

    for handle in handles {
        let results = handle.await.expect("Task should complete");
        assert!(results.iter().all(|resolution| resolution == &expected));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_derivation_and_strict_failures() {
    let mut handles = Vec::new();
    for i in 0..16 {
        handles.push(tokio::spawn(async move {
            let global = library::global_config_schema();
            let load = global.scoped("llm.load").expect("load scope exists");
            let llama = load
                .sliced(["contextLength", "seed", "llama.*"])
                .expect("selectors match");

            let strict = llama.resolve(&mixed_load_overrides(), &ResolveOptions::strict());
            (i, llama.fingerprint().unwrap(), strict.is_err())
        }));
    }

    let reference = library::llm_llama_load().fingerprint().unwrap();
    for handle in handles {
        let (i, fingerprint, failed) = handle.await.expect("Task should complete");
        assert_eq!(fingerprint, reference, "task {} derived a different schema", i);
        assert!(failed, "task {} should reject evalBatchSize 0", i);
    }
}
