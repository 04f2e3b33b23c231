//! Write-once accumulator that turns field declarations into a [`Schema`].

use super::types::{FieldDescriptor, Schema};
use crate::error::{SchemaError, SchemaResult};
use crate::key::ConfigKey;
use crate::value_types::ValueTypeRegistry;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for assembling a [`Schema`] field by field.
///
/// Every declaration is checked immediately: the value type must be
/// registered, its parameters must parse and the default must validate.
/// [`build`](Self::build) consumes the builder, so a published schema can never
/// be extended afterwards.
///
/// # Example
/// ```rust
/// use kv_schema::{SchemaBuilder, ValueTypeRegistry};
/// use serde_json::json;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut builder = SchemaBuilder::new(ValueTypeRegistry::global());
///     builder.field("temperature", "numeric", json!({ "min": 0, "max": 1 }), json!(0.8))?;
///     builder.scope("llama", |b| {
///         b.field("topKSampling", "numeric", json!({ "min": -1, "max": 500, "int": true }), json!(40))?;
///         Ok(())
///     })?;
///     let schema = builder.build();
///
///     assert_eq!(schema.len(), 2);
///     assert!(schema.get_str("llama.topKSampling").is_some());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    registry: Arc<ValueTypeRegistry>,
    fields: Vec<FieldDescriptor>,
    declared: HashSet<ConfigKey>,
    scope_path: Vec<String>,
}

impl SchemaBuilder {
    pub fn new(registry: Arc<ValueTypeRegistry>) -> Self {
        Self {
            registry,
            fields: Vec::new(),
            declared: HashSet::new(),
            scope_path: Vec::new(),
        }
    }

    /// Declare a field under the current scope.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownValueType`] if `value_type` is not registered
    /// - [`SchemaError::InvalidTypeParams`] if the parameters are rejected
    /// - [`SchemaError::InvalidDefaultValue`] if `default_value` fails validation
    /// - [`SchemaError::DuplicateKey`] if the qualified key was already declared
    pub fn field(
        &mut self,
        key: &str,
        value_type: &str,
        params: Value,
        default_value: Value,
    ) -> SchemaResult<&mut Self> {
        let qualified = self.qualify(key)?;
        let definition = self.registry.lookup(value_type)?;

        let params = definition
            .parse_params(&params)
            .map_err(|source| SchemaError::InvalidTypeParams {
                key: qualified.to_string(),
                value_type: value_type.to_string(),
                source,
            })?;

        definition
            .validate(&params, &default_value)
            .map_err(|source| SchemaError::InvalidDefaultValue {
                key: qualified.to_string(),
                value_type: value_type.to_string(),
                source,
            })?;

        if !self.declared.insert(qualified.clone()) {
            return Err(SchemaError::duplicate_key(qualified.to_string()));
        }

        log::trace!("Declared field '{}' ({})", qualified, value_type);
        self.fields.push(FieldDescriptor::new(
            qualified,
            value_type.to_string(),
            params,
            default_value,
        ));
        Ok(self)
    }

    /// Declare a field whose default comes from the value type's own constructor.
    pub fn field_with_type_default(
        &mut self,
        key: &str,
        value_type: &str,
        params: Value,
    ) -> SchemaResult<&mut Self> {
        let definition = self.registry.lookup(value_type)?;
        let parsed = definition
            .parse_params(&params)
            .map_err(|source| SchemaError::InvalidTypeParams {
                key: self
                    .qualify(key)
                    .map_or_else(|_| key.to_string(), |qualified| qualified.to_string()),
                value_type: value_type.to_string(),
                source,
            })?;
        let default_value = definition.default_value(&parsed);
        self.field(key, value_type, params, default_value)
    }

    /// Declare fields inside a named scope.
    ///
    /// `name` may be dotted (`"llm.prediction"`), which enters every segment at
    /// once. The scope is left again when `declare` returns, whether or not it
    /// succeeded.
    pub fn scope<F>(&mut self, name: &str, declare: F) -> SchemaResult<&mut Self>
    where
        F: FnOnce(&mut SchemaBuilder) -> SchemaResult<()>,
    {
        let scope = ConfigKey::parse(name)?;
        let depth = self.scope_path.len();
        self.scope_path.extend(scope.segments().iter().cloned());

        let result = declare(self);
        self.scope_path.truncate(depth);

        result.map(|_| self)
    }

    /// Finalize the declarations into an immutable schema.
    pub fn build(self) -> Schema {
        log::debug!("Built schema with {} field(s)", self.fields.len());
        Schema::from_fields(self.registry, self.fields)
    }

    fn qualify(&self, key: &str) -> SchemaResult<ConfigKey> {
        let key = ConfigKey::parse(key)?;
        if self.scope_path.is_empty() {
            return Ok(key);
        }
        let scope = ConfigKey::parse(&self.scope_path.join("."))?;
        Ok(scope.join(&key))
    }
}
