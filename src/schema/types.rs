//! Core schema data: field descriptors and the immutable [`Schema`].

use crate::error::KvSchemaResult;
use crate::key::ConfigKey;
use crate::value_types::{TypeParams, ValueTypeDefinition, ValueTypeRegistry};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

/// Declaration of one configuration key.
///
/// Descriptors are only created by [`SchemaBuilder`](super::SchemaBuilder), which
/// guarantees the default passed its value type's validator when declared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    key: ConfigKey,
    value_type: String,
    params: TypeParams,
    default_value: Value,
}

impl FieldDescriptor {
    pub(crate) fn new(
        key: ConfigKey,
        value_type: String,
        params: TypeParams,
        default_value: Value,
    ) -> Self {
        Self {
            key,
            value_type,
            params,
            default_value,
        }
    }

    /// Fully qualified key within the owning schema
    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// Registered name of the value type
    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn params(&self) -> &TypeParams {
        &self.params
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Same descriptor under a different key.
    pub(crate) fn rekeyed(&self, key: ConfigKey) -> Self {
        Self {
            key,
            ..self.clone()
        }
    }
}

/// An immutable mapping from qualified key to [`FieldDescriptor`].
///
/// Schemas are produced by [`SchemaBuilder::build`](super::SchemaBuilder::build)
/// or derived from other schemas with `scoped`, `sliced` and `union`. No
/// mutation API exists, so a schema can be shared freely between threads.
///
/// Two schemas are equal when they declare the same keys with the same
/// descriptors; declaration order does not matter.
#[derive(Debug, Clone)]
pub struct Schema {
    registry: Arc<ValueTypeRegistry>,
    fields: Vec<FieldDescriptor>,
    index: HashMap<ConfigKey, usize>,
}

impl Schema {
    /// A schema with no fields.
    pub fn empty(registry: Arc<ValueTypeRegistry>) -> Self {
        Self::from_fields(registry, Vec::new())
    }

    /// Callers guarantee keys are unique.
    pub(crate) fn from_fields(
        registry: Arc<ValueTypeRegistry>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        let index: HashMap<ConfigKey, usize> = fields
            .iter()
            .enumerate()
            .map(|(position, field)| (field.key.clone(), position))
            .collect();
        debug_assert_eq!(index.len(), fields.len(), "schema keys must be unique");

        Self {
            registry,
            fields,
            index,
        }
    }

    /// Get the descriptor for a key.
    pub fn get(&self, key: &ConfigKey) -> Option<&FieldDescriptor> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    /// Get the descriptor for a dotted key string.
    pub fn get_str(&self, key: &str) -> Option<&FieldDescriptor> {
        ConfigKey::parse(key).ok().and_then(|key| self.get(&key))
    }

    pub fn contains_key(&self, key: &ConfigKey) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.fields.iter().map(|field| &field.key)
    }

    /// Descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The value type registry this schema was declared against.
    pub fn registry(&self) -> &Arc<ValueTypeRegistry> {
        &self.registry
    }

    pub(crate) fn definition_for(&self, field: &FieldDescriptor) -> Option<&ValueTypeDefinition> {
        self.registry.lookup(&field.value_type).ok()
    }

    /// Hex-encoded SHA-256 of the schema's canonical JSON form.
    ///
    /// Fields are hashed in key order, so equal schemas share a fingerprint
    /// regardless of declaration order.
    pub fn fingerprint(&self) -> KvSchemaResult<String> {
        let mut sorted: Vec<&FieldDescriptor> = self.fields.iter().collect();
        sorted.sort_by(|a, b| a.key.cmp(&b.key));

        let mut hasher = Sha256::new();
        for field in sorted {
            hasher.update(serde_json::to_vec(field)?);
            hasher.update(b"\n");
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .fields
                .iter()
                .all(|field| other.get(&field.key) == Some(field))
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Schema", 1)?;
        state.serialize_field("fields", &self.fields)?;
        state.end()
    }
}
