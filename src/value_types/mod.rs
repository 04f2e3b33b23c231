//! Value types: the per-field validation capabilities schemas are built on.
//!
//! # Key Types
//!
//! - [`ValueTypeDefinition`] - Closed set of value type kinds with their validators
//! - [`ValueTypeRegistry`] - Name → definition mapping consulted by schemas
//! - [`TypeParams`] - Parsed declaration-time parameters for a field
//!
//! # Examples
//!
//! ```rust
//! use kv_schema::value_types::ValueTypeRegistry;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ValueTypeRegistry::global();
//! let numeric = registry.lookup("numeric")?;
//! let params = numeric.parse_params(&json!({ "min": 0, "max": 1 }))?;
//! assert!(numeric.validate(&params, &json!(0.8)).is_ok());
//! assert!(numeric.validate(&params, &json!(1.5)).is_err());
//! # Ok(())
//! # }
//! ```

pub mod definition;
pub mod params;
pub mod registry;
pub mod shapes;


pub use definition::ValueTypeDefinition;
pub use params::{NumericParams, SliderParams, StringArrayParams, StringParams, TypeParams};
pub use registry::ValueTypeRegistry;
