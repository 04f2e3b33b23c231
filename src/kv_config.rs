//! Flat key/value configuration: the form overrides arrive in and resolved
//! configurations leave in.
//!
//! The wire shape is `{"fields": [{"key": "llm.load.seed", "value": -1}, ...]}`;
//! keys are dot-delimited strings and values are plain JSON.

use crate::error::KvSchemaResult;
use crate::key::ConfigKey;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One `(key, value)` pair of a [`KvConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KvConfigField {
    pub key: String,
    pub value: Value,
}

/// An ordered list of configuration overrides.
///
/// Keys are kept as raw strings: a caller may send keys the schema does not
/// know, and those are reported during resolution rather than rejected here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KvConfig {
    #[serde(default)]
    pub fields: Vec<KvConfigField>,
}

impl KvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Set `key`, replacing an earlier value in place.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(KvConfigField { key, value }),
        }
    }

    /// The value for `key`; the last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .rev()
            .find(|field| field.key == key)
            .map(|field| &field.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .map(|field| (field.key.as_str(), &field.value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build from a flat `{ "dotted.key": value }` object.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        object
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Parse either the `{"fields": [...]}` wire shape or a flat object.
    ///
    /// The wire shape is tried first and only matches when the document is
    /// exactly that shape, so a flat object may carry a key named `fields`.
    pub fn from_json_str(text: &str) -> KvSchemaResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        if let Ok(config) = serde_json::from_value::<KvConfig>(value.clone()) {
            return Ok(config);
        }
        let object: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Self::from_json_object(&object))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for KvConfig {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut config = Self::new();
        for (key, value) in iter {
            config.set(key, value);
        }
        config
    }
}

/// Layers of overrides applied in order, later layers winning.
///
/// Typical use is stacking user defaults, per-model settings and per-call
/// settings before resolving once against a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KvConfigStack {
    layers: Vec<KvConfig>,
}

impl KvConfigStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: KvConfig) -> Self {
        self.push(layer);
        self
    }

    pub fn push(&mut self, layer: KvConfig) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[KvConfig] {
        &self.layers
    }

    /// Merge all layers into one config.
    ///
    /// Keys keep the position where they first appeared; values come from the
    /// last layer that sets them.
    pub fn collapse(&self) -> KvConfig {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut fields: Vec<KvConfigField> = Vec::new();

        for (key, value) in self.layers.iter().flat_map(KvConfig::iter) {
            match positions.get(key) {
                Some(&position) => fields[position].value = value.clone(),
                None => {
                    positions.insert(key, fields.len());
                    fields.push(KvConfigField {
                        key: key.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }

        KvConfig { fields }
    }
}

/// A validated, default-filled configuration derived from one schema.
///
/// Every key belongs to the schema it was resolved from and every value
/// satisfies that field's constraints. Order follows the schema's declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    fields: Vec<(ConfigKey, Value)>,
}

impl ResolvedConfig {
    pub(crate) fn from_fields(fields: Vec<(ConfigKey, Value)>) -> Self {
        Self { fields }
    }

    /// Value for a dotted key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = ConfigKey::parse(key).ok()?;
        self.get_key(&key)
    }

    pub fn get_key(&self, key: &ConfigKey) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &Value)> {
        self.fields.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The wire form, usable as overrides for another resolution.
    pub fn to_kv_config(&self) -> KvConfig {
        self.fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// Flat `{ "dotted.key": value }` object.
    pub fn to_json_object(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_kv_config().serialize(serializer)
    }
}
