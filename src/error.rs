//! Error types for schema construction, value validation and resolution.
//!
//! Construction-time errors ([`SchemaError`]) describe mistakes in static schema
//! definitions and are always fatal to the caller composing the schema.
//! Resolution-time errors ([`FieldError`]) are recoverable per key unless strict
//! resolution was requested, in which case they surface as [`ResolveError`].

/// Umbrella error for callers that drive the whole pipeline (parse overrides,
/// pick a schema, resolve).
#[derive(Debug, thiserror::Error)]
pub enum KvSchemaError {
    /// Schema construction or algebra failed
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Strict resolution aborted
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading an overrides or options file failed
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    /// A published schema name did not match any known schema
    #[error("Unknown schema: {name}")]
    UnknownSchema { name: String },
}

/// Errors raised while registering value types, declaring fields or deriving
/// schemas.
///
/// These represent programming errors in schema definitions and must never be
/// caught and ignored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A value type name was registered twice
    #[error("Value type '{name}' is already registered")]
    DuplicateValueType { name: String },

    /// A field referenced a value type that is not registered
    #[error("Unknown value type '{name}'")]
    UnknownValueType { name: String },

    /// Type parameters were rejected by the value type
    #[error("Field '{key}' has invalid parameters for value type '{value_type}': {source}")]
    InvalidTypeParams {
        key: String,
        value_type: String,
        #[source]
        source: ValidationError,
    },

    /// A field's default value failed validation at declaration time
    #[error("Field '{key}' has an invalid default for value type '{value_type}': {source}")]
    InvalidDefaultValue {
        key: String,
        value_type: String,
        #[source]
        source: ValidationError,
    },

    /// The same qualified key was declared twice
    #[error("Key '{key}' is already declared")]
    DuplicateKey { key: String },

    /// Key or selector text could not be parsed
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// `scoped` matched no key under the prefix
    #[error("No keys found under scope '{prefix}'")]
    ScopeNotFound { prefix: String },

    /// A `sliced` selector or an override key names nothing in the schema
    #[error("Key '{key}' matches nothing declared in the schema")]
    UnknownKey { key: String },

    /// `union` operands share keys
    #[error("Cannot union schemas with overlapping keys: {keys:?}")]
    UnionConflict { keys: Vec<String> },

    /// `union` operands were built against different value type registries
    #[error("Cannot union schemas built against different value type registries")]
    RegistryMismatch,
}

/// Reasons a value (or a set of type parameters) fails a value type's checks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The JSON value has the wrong shape
    #[error("expected {expected}, got {actual}")]
    InvalidType { expected: String, actual: String },

    /// Numbers must be finite
    #[error("number must be finite")]
    NotFinite,

    /// Integer-only numeric received a fraction
    #[error("value {value} is not an integer")]
    NotAnInteger { value: f64 },

    /// Numeric value below the declared minimum
    #[error("value {value} is below the minimum {min}")]
    BelowMinimum { value: f64, min: f64 },

    /// Numeric value above the declared maximum
    #[error("value {value} is above the maximum {max}")]
    AboveMaximum { value: f64, max: f64 },

    /// String length outside the declared bounds
    #[error("string length {length} is outside {min:?}..={max:?}")]
    InvalidLength {
        length: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Array has more items than allowed
    #[error("{count} items exceed the maximum of {max}")]
    TooManyItems { count: usize, max: usize },

    /// Empty string inside an array that forbids them
    #[error("item {index} is an empty string")]
    EmptyItem { index: usize },

    /// Value outside a closed set of choices
    #[error("invalid value '{value}', allowed values: {allowed:?}")]
    InvalidVariant { value: String, allowed: Vec<String> },

    /// Structured value did not match its shape
    #[error("malformed value: {details}")]
    Malformed { details: String },

    /// Type parameters are inconsistent
    #[error("invalid parameters: {details}")]
    InvalidParams { details: String },

    /// Parameters were parsed for a different kind of value type
    #[error("parameters do not belong to value type '{value_type}'")]
    ParamsMismatch { value_type: String },
}

/// A single override that failed validation during resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Field '{key}' rejected: {reason}")]
pub struct FieldError {
    pub key: String,
    #[source]
    pub reason: ValidationError,
}

/// Aggregate failure of a strict resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// Strict mode stopped at the first invalid override
    #[error("Strict resolution failed with {} field error(s): {}", .errors.len(), format_field_errors(.errors))]
    Strict { errors: Vec<FieldError> },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Convenience methods for creating common errors
impl SchemaError {
    /// Create an invalid key error
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown value type error
    pub fn unknown_value_type(name: impl Into<String>) -> Self {
        Self::UnknownValueType { name: name.into() }
    }

    /// Create a duplicate key error
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }
}

impl ValidationError {
    /// Create an invalid type error
    pub fn invalid_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a malformed structure error
    pub fn malformed(details: impl Into<String>) -> Self {
        Self::Malformed {
            details: details.into(),
        }
    }

    /// Create an invalid parameters error
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams {
            details: details.into(),
        }
    }
}

impl FieldError {
    pub fn new(key: impl Into<String>, reason: ValidationError) -> Self {
        Self {
            key: key.into(),
            reason,
        }
    }
}

// Result type aliases for convenience
pub type KvSchemaResult<T> = Result<T, KvSchemaError>;
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type ResolveResult<T> = Result<T, ResolveError>;
