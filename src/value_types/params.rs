//! Type parameters accepted at field declaration time.
//!
//! Parameters arrive as JSON (the way schema authors write them) and are
//! parsed into typed structs once, when the field is declared.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed type parameters for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeParams {
    Numeric(NumericParams),
    CheckboxNumeric(NumericParams),
    String(StringParams),
    StringArray(StringArrayParams),
    /// The value type takes no parameters
    None,
}

/// Constraints for `numeric` and `checkboxNumeric` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NumericParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub int: bool,
    /// UI hint, not a validation constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slider: Option<SliderParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_hand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliderParams {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StringParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_paragraph: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StringArrayParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_num_items: Option<usize>,
    #[serde(default = "default_allow_empty_strings")]
    pub allow_empty_strings: bool,
}

fn default_allow_empty_strings() -> bool {
    true
}

impl Default for StringArrayParams {
    fn default() -> Self {
        Self {
            max_num_items: None,
            allow_empty_strings: true,
        }
    }
}

impl NumericParams {
    pub(crate) fn parse(raw: &Value) -> ValidationResult<Self> {
        let params: Self = parse_or_default(raw)?;

        if let (Some(min), Some(max)) = (params.min, params.max) {
            if min > max {
                return Err(ValidationError::invalid_params(format!(
                    "min {} is greater than max {}",
                    min, max
                )));
            }
        }
        if let Some(slider) = &params.slider {
            if slider.min >= slider.max {
                return Err(ValidationError::invalid_params(
                    "slider min must be below slider max",
                ));
            }
            if slider.step <= 0.0 {
                return Err(ValidationError::invalid_params(
                    "slider step must be positive",
                ));
            }
        }

        Ok(params)
    }

    /// The value closest to zero that satisfies these constraints.
    pub(crate) fn zero_default(&self) -> f64 {
        let lower = self.min.unwrap_or(f64::NEG_INFINITY);
        let upper = self.max.unwrap_or(f64::INFINITY);
        let value = 0f64.clamp(lower, upper);
        if self.int { value.ceil().min(upper.floor()) } else { value }
    }
}

impl StringParams {
    pub(crate) fn parse(raw: &Value) -> ValidationResult<Self> {
        let params: Self = parse_or_default(raw)?;
        if let (Some(min), Some(max)) = (params.min_length, params.max_length) {
            if min > max {
                return Err(ValidationError::invalid_params(format!(
                    "minLength {} is greater than maxLength {}",
                    min, max
                )));
            }
        }
        Ok(params)
    }
}

impl StringArrayParams {
    pub(crate) fn parse(raw: &Value) -> ValidationResult<Self> {
        parse_or_default(raw)
    }
}

/// Accept `null` or `{}` for kinds that take no parameters.
pub(crate) fn expect_no_params(raw: &Value) -> ValidationResult<()> {
    match raw {
        Value::Null => Ok(()),
        Value::Object(map) if map.is_empty() => Ok(()),
        _ => Err(ValidationError::invalid_params(
            "this value type takes no parameters",
        )),
    }
}

fn parse_or_default<T>(raw: &Value) -> ValidationResult<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if raw.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(raw.clone())
        .map_err(|e| ValidationError::invalid_params(e.to_string()))
}
