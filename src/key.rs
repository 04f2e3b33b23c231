//! Qualified configuration keys and slice selectors.
//!
//! Keys are stored as ordered segment lists so that scope and prefix
//! operations compare whole segments. The dotted form only appears when a key
//! is parsed from, or rendered to, text.

use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '.';
const WILDCARD: &str = "*";

/// A fully qualified, dot-separated configuration key.
///
/// ## Validation Rules
///
/// - At least one segment
/// - No empty segments (`"a..b"`, `".a"` and `"a."` are rejected)
/// - No `*` inside a segment, wildcards only exist on [`KeySelector`]
///
/// ## Examples
///
/// ```rust
/// use kv_schema::ConfigKey;
///
/// let key = ConfigKey::parse("llm.prediction.temperature").unwrap();
/// let prefix = ConfigKey::parse("llm.prediction").unwrap();
/// assert!(key.is_under(&prefix));
/// assert_eq!(key.strip_prefix(&prefix).unwrap().to_string(), "temperature");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(Vec<String>);

impl ConfigKey {
    /// Parse a dotted key.
    pub fn parse(text: &str) -> SchemaResult<Self> {
        if text.is_empty() {
            return Err(SchemaError::invalid_key(text, "key cannot be empty"));
        }

        let segments = text
            .split(SEPARATOR)
            .map(|segment| Self::validate_segment(text, segment).map(|_| segment.to_string()))
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self(segments))
    }

    fn validate_segment(text: &str, segment: &str) -> SchemaResult<()> {
        if segment.trim().is_empty() {
            return Err(SchemaError::invalid_key(text, "empty key segment"));
        }
        if segment.contains(WILDCARD) {
            return Err(SchemaError::invalid_key(
                text,
                "wildcards are only allowed in selectors",
            ));
        }
        Ok(())
    }

    /// The individual path segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Append `other` to this key.
    pub fn join(&self, other: &ConfigKey) -> ConfigKey {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        Self(segments)
    }

    /// True when this key lives strictly below `prefix`.
    ///
    /// A key equal to the prefix is not under it.
    pub fn is_under(&self, prefix: &ConfigKey) -> bool {
        self.0.len() > prefix.0.len() && self.0.starts_with(&prefix.0)
    }

    /// Remove `prefix` from the front of this key, if this key is under it.
    pub fn strip_prefix(&self, prefix: &ConfigKey) -> Option<ConfigKey> {
        if !self.is_under(prefix) {
            return None;
        }
        Some(Self(self.0[prefix.0.len()..].to_vec()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for ConfigKey {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ConfigKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConfigKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// A key selector used by `Schema::sliced`.
///
/// `"temperature"` selects one exact key, `"llama.*"` selects every key under
/// the `llama` scope of the schema being sliced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySelector {
    Exact(ConfigKey),
    Wildcard(ConfigKey),
}

impl KeySelector {
    pub fn parse(text: &str) -> SchemaResult<Self> {
        match text.strip_suffix(".*") {
            Some(prefix) => Ok(Self::Wildcard(ConfigKey::parse(prefix)?)),
            None if text == WILDCARD => Err(SchemaError::invalid_key(
                text,
                "a bare wildcard selects nothing, name a scope",
            )),
            None => Ok(Self::Exact(ConfigKey::parse(text)?)),
        }
    }

    pub fn matches(&self, key: &ConfigKey) -> bool {
        match self {
            Self::Exact(exact) => exact == key,
            Self::Wildcard(prefix) => key.is_under(prefix),
        }
    }
}

impl fmt::Display for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(key) => write!(f, "{}", key),
            Self::Wildcard(prefix) => write!(f, "{}.*", prefix),
        }
    }
}

impl FromStr for KeySelector {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
