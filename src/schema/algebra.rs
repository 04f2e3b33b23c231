//! Derivations of new schemas from existing ones: `scoped`, `sliced`, `union`.
//!
//! All three leave their inputs untouched and return fresh schemas, so results
//! compose freely (a slice of a scope unioned with another slice, and so on).

use super::types::{FieldDescriptor, Schema};
use crate::error::{SchemaError, SchemaResult};
use crate::key::{ConfigKey, KeySelector};
use std::sync::Arc;

impl Schema {
    /// Re-root the schema at `prefix`.
    ///
    /// Keeps every key under `prefix` with the prefix stripped. Keys outside the
    /// scope are dropped.
    ///
    /// # Errors
    ///
    /// [`SchemaError::ScopeNotFound`] if no key lives under `prefix`.
    pub fn scoped(&self, prefix: &str) -> SchemaResult<Schema> {
        let prefix_key = ConfigKey::parse(prefix)?;

        let fields: Vec<FieldDescriptor> = self
            .fields()
            .iter()
            .filter_map(|field| {
                field
                    .key()
                    .strip_prefix(&prefix_key)
                    .map(|stripped| field.rekeyed(stripped))
            })
            .collect();

        if fields.is_empty() {
            return Err(SchemaError::ScopeNotFound {
                prefix: prefix.to_string(),
            });
        }

        log::debug!(
            "Scoped schema at '{}': {} of {} field(s) kept",
            prefix,
            fields.len(),
            self.len()
        );
        Ok(Schema::from_fields(Arc::clone(self.registry()), fields))
    }

    /// Project the schema onto the keys named by `selectors`.
    ///
    /// Each selector is an exact key or a `prefix.*` wildcard. Selected keys keep
    /// their qualified names and the source declaration order; a key picked by
    /// several selectors appears once.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidKey`] if a selector cannot be parsed
    /// - [`SchemaError::UnknownKey`] if a selector matches nothing
    pub fn sliced<I, S>(&self, selectors: I) -> SchemaResult<Schema>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selectors = selectors
            .into_iter()
            .map(|selector| KeySelector::parse(selector.as_ref()))
            .collect::<SchemaResult<Vec<_>>>()?;

        if let Some(unmatched) = selectors
            .iter()
            .find(|selector| !self.keys().any(|key| selector.matches(key)))
        {
            return Err(SchemaError::unknown_key(unmatched.to_string()));
        }

        let fields: Vec<FieldDescriptor> = self
            .fields()
            .iter()
            .filter(|field| selectors.iter().any(|selector| selector.matches(field.key())))
            .cloned()
            .collect();

        log::debug!(
            "Sliced schema with {} selector(s): {} of {} field(s) kept",
            selectors.len(),
            fields.len(),
            self.len()
        );
        Ok(Schema::from_fields(Arc::clone(self.registry()), fields))
    }

    /// Merge two schemas with disjoint key sets.
    ///
    /// The result lists `self`'s fields first, then `other`'s.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnionConflict`] listing every key both schemas declare
    /// - [`SchemaError::RegistryMismatch`] if the schemas use registries with different contents
    pub fn union(&self, other: &Schema) -> SchemaResult<Schema> {
        let same_registry = Arc::ptr_eq(self.registry(), other.registry())
            || self.registry().as_ref() == other.registry().as_ref();
        if !same_registry {
            return Err(SchemaError::RegistryMismatch);
        }

        let overlapping: Vec<String> = other
            .keys()
            .filter(|key| self.contains_key(key))
            .map(ToString::to_string)
            .collect();
        if !overlapping.is_empty() {
            return Err(SchemaError::UnionConflict { keys: overlapping });
        }

        let fields: Vec<FieldDescriptor> = self
            .fields()
            .iter()
            .chain(other.fields())
            .cloned()
            .collect();

        log::debug!(
            "Union of {} and {} field(s) yields {}",
            self.len(),
            other.len(),
            fields.len()
        );
        Ok(Schema::from_fields(Arc::clone(self.registry()), fields))
    }
}
