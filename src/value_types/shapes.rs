//! Stored value shapes for the structured value types.
//!
//! Each struct mirrors the JSON a backend expects. Validation deserializes the
//! incoming JSON into these types (unknown fields denied) and then applies the
//! range checks serde cannot express.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckboxNumeric {
    pub checked: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextOverflowPolicy {
    StopAtLimit,
    TruncateMiddle,
    RollingWindow,
}

impl ContextOverflowPolicy {
    pub const ALL: [&'static str; 3] = ["stopAtLimit", "truncateMiddle", "rollingWindow"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", deny_unknown_fields)]
pub enum StructuredOutput {
    None,
    #[serde(rename_all = "camelCase")]
    Json {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        json_schema: Option<serde_json::Map<String, Value>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", deny_unknown_fields)]
pub enum PromptTemplate {
    #[serde(rename_all = "camelCase")]
    Legacy {
        input_prefix: String,
        input_suffix: String,
        pre_prompt_prefix: String,
        pre_prompt_suffix: String,
    },
    #[serde(rename_all = "camelCase")]
    Jinja {
        template: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bos_token: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eos_token: Option<String>,
    },
}

/// Mirostat sampling. Version 0 disables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MirostatSampling {
    pub version: u8,
    pub learning_rate: f64,
    pub target_entropy: f64,
}

impl MirostatSampling {
    pub(crate) fn check(&self) -> ValidationResult<()> {
        if self.version > 2 {
            return Err(ValidationError::InvalidVariant {
                value: self.version.to_string(),
                allowed: vec!["0".into(), "1".into(), "2".into()],
            });
        }
        check_non_negative(self.learning_rate)?;
        check_non_negative(self.target_entropy)
    }
}

/// One `[tokenId, bias]` pair. A bias of `"-inf"` bans the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogitBiasEntry(pub u32, pub LogitBias);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogitBias {
    Value(f64),
    Banned(NegativeInfinity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegativeInfinity {
    #[serde(rename = "-inf")]
    NegInf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GpuOffload {
    pub ratio: GpuOffloadRatio,
    pub main_gpu: u32,
    pub tensor_split: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GpuOffloadRatio {
    Fraction(f64),
    Preset(GpuOffloadPreset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuOffloadPreset {
    Max,
    Off,
    Auto,
}

impl GpuOffload {
    pub(crate) fn check(&self) -> ValidationResult<()> {
        if let GpuOffloadRatio::Fraction(ratio) = self.ratio {
            check_finite(ratio)?;
            if ratio < 0.0 {
                return Err(ValidationError::BelowMinimum { value: ratio, min: 0.0 });
            }
            if ratio > 1.0 {
                return Err(ValidationError::AboveMaximum { value: ratio, max: 1.0 });
            }
        }
        self.tensor_split
            .iter()
            .try_for_each(|share| check_non_negative(*share))
    }
}

pub(crate) fn check_finite(value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite)
    }
}

fn check_non_negative(value: f64) -> ValidationResult<()> {
    check_finite(value)?;
    if value < 0.0 {
        return Err(ValidationError::BelowMinimum { value, min: 0.0 });
    }
    Ok(())
}

/// Deserialize `value` into a shape, mapping serde failures to [`ValidationError::Malformed`].
pub(crate) fn decode<T>(value: &Value) -> ValidationResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(value).map_err(|e| ValidationError::malformed(e.to_string()))
}
