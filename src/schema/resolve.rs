//! Default-filling and validation of overrides against a schema.

use super::types::Schema;
use crate::config::ResolveOptions;
use crate::error::{FieldError, ResolveError, ResolveResult, SchemaError, ValidationError};
use crate::key::ConfigKey;
use crate::kv_config::{KvConfig, ResolvedConfig};
use log::{debug, warn};
use serde_json::Value;

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Every schema key mapped to its override or default
    pub config: ResolvedConfig,
    /// Overrides that failed validation and were replaced by defaults
    pub field_errors: Vec<FieldError>,
    /// Override keys the schema does not declare, as [`SchemaError::UnknownKey`]
    pub unknown_keys: Vec<SchemaError>,
}

impl Resolution {
    /// True when every override was accepted.
    pub fn is_clean(&self) -> bool {
        self.field_errors.is_empty() && self.unknown_keys.is_empty()
    }

    /// The unknown override keys as text, in first-seen order.
    pub fn unknown_key_names(&self) -> Vec<&str> {
        self.unknown_keys
            .iter()
            .filter_map(|error| match error {
                SchemaError::UnknownKey { key } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Schema {
    /// Resolve `overrides` into a complete configuration.
    ///
    /// Each key takes its override when one is given and valid, its stored
    /// default otherwise. Invalid overrides become [`FieldError`]s; in strict
    /// mode the first one aborts with [`ResolveError::Strict`]. Override keys the
    /// schema does not declare are listed in [`Resolution::unknown_keys`] and
    /// never affect known keys.
    ///
    /// This is a pure function of its inputs and safe to call concurrently.
    pub fn resolve(
        &self,
        overrides: &KvConfig,
        options: &ResolveOptions,
    ) -> ResolveResult<Resolution> {
        let unknown_keys: Vec<SchemaError> = self
            .unknown_override_keys(overrides)
            .into_iter()
            .map(SchemaError::unknown_key)
            .collect();
        if !unknown_keys.is_empty() {
            debug!("Ignoring {} unknown override key(s)", unknown_keys.len());
        }

        let mut field_errors = Vec::new();
        let mut resolved = Vec::with_capacity(self.len());

        for field in self.fields() {
            let key_text = field.key().to_string();
            let value = match overrides.get(&key_text) {
                None => field.default_value().clone(),
                Some(candidate) => match self.check_override(field.key(), candidate) {
                    Ok(()) => candidate.clone(),
                    Err(reason) => {
                        let error = FieldError::new(key_text, reason);
                        if options.is_strict() {
                            field_errors.push(error);
                            return Err(ResolveError::Strict {
                                errors: field_errors,
                            });
                        }
                        if options.log_field_errors {
                            warn!("{}; falling back to default", error);
                        }
                        field_errors.push(error);
                        field.default_value().clone()
                    }
                },
            };
            resolved.push((field.key().clone(), value));
        }

        Ok(Resolution {
            config: ResolvedConfig::from_fields(resolved),
            field_errors,
            unknown_keys,
        })
    }

    /// Resolve with defaults only.
    pub fn defaults(&self) -> ResolvedConfig {
        ResolvedConfig::from_fields(
            self.fields()
                .iter()
                .map(|field| (field.key().clone(), field.default_value().clone()))
                .collect(),
        )
    }

    /// Validate a single value against the field declared at `key`.
    pub fn validate_value(&self, key: &str, value: &Value) -> Result<(), FieldError> {
        let parsed = ConfigKey::parse(key).map_err(|e| {
            FieldError::new(key, ValidationError::malformed(e.to_string()))
        })?;
        self.check_override(&parsed, value)
            .map_err(|reason| FieldError::new(key, reason))
    }

    fn check_override(&self, key: &ConfigKey, value: &Value) -> Result<(), ValidationError> {
        let field = self
            .get(key)
            .ok_or_else(|| ValidationError::malformed(format!("'{}' is not declared", key)))?;
        let definition = self.definition_for(field).ok_or_else(|| {
            ValidationError::malformed(format!(
                "value type '{}' is not registered",
                field.value_type()
            ))
        })?;
        definition.validate(field.params(), value)
    }

    fn unknown_override_keys(&self, overrides: &KvConfig) -> Vec<String> {
        let mut unknown: Vec<String> = Vec::new();
        for (key, _) in overrides.iter() {
            let declared = ConfigKey::parse(key)
                .map(|parsed| self.contains_key(&parsed))
                .unwrap_or(false);
            if !declared && !unknown.iter().any(|seen| seen == key) {
                unknown.push(key.to_string());
            }
        }
        unknown
    }
}
