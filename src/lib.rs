//! Typed key-value configuration schemas for Rust.
//!
//! Declares hierarchically scoped configuration fields against a registry of
//! value types, freezes them into immutable schemas, derives narrower or
//! combined schemas with `scoped`, `sliced` and `union`, and resolves caller
//! overrides into validated, default-filled configurations.
//!
//! # Core Components
//!
//! - [`ValueTypeRegistry`] - Named value types with their validators
//! - [`SchemaBuilder`] - Scoped field declarations, checked as they are made
//! - [`Schema`] - Immutable key → descriptor mapping and its algebra
//! - [`ResolvedConfig`] - Flat, validated output for model backends
//! - [`library`] - Published LLM load and prediction schemas
//!
//! # Quick Start
//!
//! ```rust
//! use kv_schema::{KvConfig, ResolveOptions, library};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = library::llm_llama_prediction();
//! let overrides = KvConfig::new()
//!     .with("temperature", json!(0.2))
//!     .with("llama.topKSampling", json!(20));
//!
//! let resolution = schema.resolve(&overrides, &ResolveOptions::strict())?;
//! assert_eq!(resolution.config.get("temperature"), Some(&json!(0.2)));
//! assert_eq!(resolution.config.len(), schema.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod key;
pub mod kv_config;
pub mod library;
pub mod schema;
pub mod value_types;

// Re-export commonly used types for convenience
pub use config::{ResolutionMode, ResolveOptions};
pub use error::{
    FieldError, KvSchemaError, KvSchemaResult, ResolveError, SchemaError, SchemaResult,
    ValidationError,
};
pub use key::{ConfigKey, KeySelector};
pub use kv_config::{KvConfig, KvConfigField, KvConfigStack, ResolvedConfig};
pub use schema::{FieldDescriptor, Resolution, Schema, SchemaBuilder};
pub use value_types::{TypeParams, ValueTypeDefinition, ValueTypeRegistry};
