//! Value type registry: the name → definition mapping schemas are declared against.
//!
//! The registry is assembled once at process start and then shared read-only
//! (usually through [`ValueTypeRegistry::global`]). Schemas keep an `Arc` to the
//! registry they were built with and only ever call [`ValueTypeRegistry::lookup`].

use super::definition::ValueTypeDefinition;
use crate::error::{SchemaError, SchemaResult};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static GLOBAL_REGISTRY: LazyLock<Arc<ValueTypeRegistry>> =
    LazyLock::new(|| Arc::new(ValueTypeRegistry::with_builtin_types()));

/// Registry of named value types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueTypeRegistry {
    types: HashMap<String, ValueTypeDefinition>,
}

impl ValueTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every builtin value type under its camelCase name.
    pub fn with_builtin_types() -> Self {
        let types = ValueTypeDefinition::BUILTIN
            .iter()
            .map(|(name, definition)| (name.to_string(), *definition))
            .collect();
        Self { types }
    }

    /// The process-wide registry of builtin value types.
    pub fn global() -> Arc<ValueTypeRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Register a value type under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        definition: ValueTypeDefinition,
    ) -> SchemaResult<()> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateValueType { name });
        }
        log::trace!("Registering value type '{}' as {:?}", name, definition);
        self.types.insert(name, definition);
        Ok(())
    }

    /// Look up a value type by name.
    pub fn lookup(&self, name: &str) -> SchemaResult<&ValueTypeDefinition> {
        self.types
            .get(name)
            .ok_or_else(|| SchemaError::unknown_value_type(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
