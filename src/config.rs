//! Options controlling how overrides are resolved against a schema.
//!
//! The mode is an explicit, caller-supplied setting. It can be built in code or
//! read from JSON, e.g. `{"mode": "strict"}`.

use crate::error::KvSchemaResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How invalid overrides are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Record a field error and fall back to the field's default
    #[default]
    Lenient,
    /// Abort on the first invalid override
    Strict,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ResolutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown resolution mode '{}', expected 'lenient' or 'strict'",
                other
            )),
        }
    }
}

/// Configuration for [`Schema::resolve`](crate::Schema::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveOptions {
    pub mode: ResolutionMode,
    /// Emit a `warn!` for every override that falls back to its default.
    pub log_field_errors: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::Lenient,
            log_field_errors: true,
        }
    }
}

impl ResolveOptions {
    pub fn lenient() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            mode: ResolutionMode::Strict,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == ResolutionMode::Strict
    }

    /// Read options from JSON; missing fields take their defaults.
    pub fn from_json_str(text: &str) -> KvSchemaResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
