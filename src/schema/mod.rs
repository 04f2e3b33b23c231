//! Configuration schemas: declaration, derivation and resolution.
//!
//! # Key Types
//!
//! - [`SchemaBuilder`] - Mutable accumulator of scoped field declarations
//! - [`Schema`] - Immutable key → descriptor mapping with `scoped`/`sliced`/`union`
//! - [`FieldDescriptor`] - Value type, parameters and default of one key
//! - [`Resolution`] - Result of resolving overrides against a schema
//!
//! # Examples
//!
//! ```rust
//! use kv_schema::{KvConfig, ResolveOptions, SchemaBuilder, ValueTypeRegistry};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = SchemaBuilder::new(ValueTypeRegistry::global());
//! builder.scope("llm.prediction", |b| {
//!     b.field("temperature", "numeric", json!({ "min": 0, "max": 1 }), json!(0.8))?;
//!     Ok(())
//! })?;
//! let prediction = builder.build().scoped("llm.prediction")?;
//!
//! let overrides = KvConfig::new().with("temperature", json!(0.3));
//! let resolution = prediction.resolve(&overrides, &ResolveOptions::default())?;
//! assert_eq!(resolution.config.get("temperature"), Some(&json!(0.3)));
//! # Ok(())
//! # }
//! ```

pub mod algebra;
pub mod builder;
pub mod resolve;
pub mod types;


// Re-export the main types for convenience
pub use builder::SchemaBuilder;
pub use resolve::Resolution;
pub use types::{FieldDescriptor, Schema};
