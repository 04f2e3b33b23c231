//! Property-Based Testing for the Schema Algebra
//!
//! Generates random scoped schemas and checks the laws slicing, union and
//! default resolution must obey for every schema, not just hand-picked ones.

use kv_schema::{
    ConfigKey, KvConfig, ResolveOptions, Schema, SchemaBuilder, SchemaError, ValueTypeRegistry,
};
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeSet;

const SCOPES: [&str; 3] = ["llama", "mlx", "onnx"];
const LEAVES: [&str; 5] = ["seed", "topK", "minP", "threads", "penalty"];

/// A generated field: optional scope, leaf name and an in-range default.
#[derive(Debug, Clone)]
struct FieldSpec {
    scope: Option<&'static str>,
    leaf: &'static str,
    min: i64,
    span: i64,
    offset: i64,
}

impl FieldSpec {
    fn dotted(&self) -> String {
        match self.scope {
            Some(scope) => format!("{}.{}", scope, self.leaf),
            None => self.leaf.to_string(),
        }
    }
}

prop_compose! {
    fn field_spec_strategy()
        (scope in prop::option::of(prop::sample::select(SCOPES.to_vec())),
         leaf in prop::sample::select(LEAVES.to_vec()),
         min in -100i64..100,
         span in 0i64..50)
        (scope in Just(scope), leaf in Just(leaf), min in Just(min), span in Just(span),
         offset in 0..=span)
        -> FieldSpec {
        FieldSpec { scope, leaf, min, span, offset }
    }
}

fn schema_strategy() -> impl Strategy<Value = Schema> {
    prop::collection::vec(field_spec_strategy(), 1..12).prop_map(|specs| {
        let mut seen = BTreeSet::new();
        let mut builder = SchemaBuilder::new(ValueTypeRegistry::global());
        for spec in specs.into_iter().filter(|spec| seen.insert(spec.dotted())) {
            builder
                .field(
                    &spec.dotted(),
                    "numeric",
                    json!({ "min": spec.min, "max": spec.min + spec.span, "int": true }),
                    json!(spec.min + spec.offset),
                )
                .expect("generated defaults are in range");
        }
        builder.build()
    })
}

fn key_set(schema: &Schema) -> BTreeSet<String> {
    schema.keys().map(ToString::to_string).collect()
}

proptest! {
    #[test]
    fn prop_exact_slice_copies_descriptor(schema in schema_strategy()) {
        for key in schema.keys() {
            let sliced = schema.sliced([key.to_string()]).unwrap();
            prop_assert_eq!(sliced.len(), 1);
            prop_assert_eq!(sliced.get(key), schema.get(key));
        }
    }

    #[test]
    fn prop_wildcard_slice_selects_scope(schema in schema_strategy()) {
        for scope in SCOPES {
            let prefix = ConfigKey::parse(scope).unwrap();
            let expected: BTreeSet<String> = schema
                .keys()
                .filter(|key| key.is_under(&prefix))
                .map(ToString::to_string)
                .collect();

            let result = schema.sliced([format!("{}.*", scope)]);
            if expected.is_empty() {
                let is_unknown_key = matches!(result, Err(SchemaError::UnknownKey { .. }));
                prop_assert!(is_unknown_key);
            } else {
                prop_assert_eq!(key_set(&result.unwrap()), expected);
            }
        }
    }

    #[test]
    fn prop_union_of_partition_restores_keys(schema in schema_strategy(), pivot in 0usize..12) {
        let keys: Vec<String> = schema.keys().map(ToString::to_string).collect();
        let split = pivot.min(keys.len());
        prop_assume!(split > 0 && split < keys.len());

        let left = schema.sliced(&keys[..split]).unwrap();
        let right = schema.sliced(&keys[split..]).unwrap();

        let forward = left.union(&right).unwrap();
        let backward = right.union(&left).unwrap();
        prop_assert_eq!(key_set(&forward), key_set(&schema));
        prop_assert_eq!(key_set(&forward), key_set(&backward));
        prop_assert_eq!(&forward, &schema);
    }

    #[test]
    fn prop_union_with_overlap_conflicts(schema in schema_strategy()) {
        let first = schema.keys().next().unwrap().to_string();
        let overlap = schema.sliced([first.as_str()]).unwrap();
        match schema.union(&overlap) {
            Err(SchemaError::UnionConflict { keys }) => prop_assert_eq!(keys, vec![first]),
            other => prop_assert!(false, "expected UnionConflict, got {:?}", other),
        }
    }

    #[test]
    fn prop_default_resolution_is_idempotent(schema in schema_strategy()) {
        let first = schema.resolve(&KvConfig::new(), &ResolveOptions::strict()).unwrap();
        prop_assert_eq!(&first.config, &schema.defaults());

        let second = schema
            .resolve(&first.config.to_kv_config(), &ResolveOptions::strict())
            .unwrap();
        prop_assert!(second.is_clean());
        prop_assert_eq!(first.config, second.config);
    }

    #[test]
    fn prop_scoped_strips_exactly_one_prefix(schema in schema_strategy()) {
        for scope in SCOPES {
            match schema.scoped(scope) {
                Ok(scoped) => {
                    for key in scoped.keys() {
                        let original = ConfigKey::parse(scope).unwrap().join(key);
                        prop_assert!(schema.contains_key(&original));
                    }
                }
                Err(SchemaError::ScopeNotFound { .. }) => {
                    let prefix = ConfigKey::parse(scope).unwrap();
                    prop_assert!(!schema.keys().any(|key| key.is_under(&prefix)));
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }
}
