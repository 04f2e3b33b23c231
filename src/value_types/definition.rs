//! The closed set of value type kinds and their validation logic.

use super::params::{
    NumericParams, StringArrayParams, StringParams, TypeParams, expect_no_params,
};
use super::shapes::{
    CheckboxNumeric, ContextOverflowPolicy, GpuOffload, LogitBiasEntry, MirostatSampling,
    PromptTemplate, StructuredOutput, check_finite, decode,
};
use crate::error::{ValidationError, ValidationResult};
use serde_json::{Value, json};

/// A value type a field can be declared with.
///
/// Every kind owns its parameter shape, its stored value shape and its
/// validator. New kinds are added by extending this enum; validation is an
/// exhaustive match so a missing arm is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTypeDefinition {
    /// Plain number with optional range and integer constraint
    Numeric,
    /// `{checked, value}` pair, the number is validated like `Numeric`
    CheckboxNumeric,
    String,
    StringArray,
    Boolean,
    ContextOverflowPolicy,
    LlamaStructuredOutput,
    LlmPromptTemplate,
    LlamaMirostatSampling,
    LlamaLogitBias,
    LlamaGpuOffload,
}

impl ValueTypeDefinition {
    /// Every kind paired with the name it is registered under by default.
    pub const BUILTIN: [(&'static str, ValueTypeDefinition); 11] = [
        ("numeric", Self::Numeric),
        ("checkboxNumeric", Self::CheckboxNumeric),
        ("string", Self::String),
        ("stringArray", Self::StringArray),
        ("boolean", Self::Boolean),
        ("contextOverflowPolicy", Self::ContextOverflowPolicy),
        ("llamaStructuredOutput", Self::LlamaStructuredOutput),
        ("llmPromptTemplate", Self::LlmPromptTemplate),
        ("llamaMirostatSampling", Self::LlamaMirostatSampling),
        ("llamaLogitBias", Self::LlamaLogitBias),
        ("llamaGpuOffload", Self::LlamaGpuOffload),
    ];

    /// Parse declaration-time parameters for this kind.
    pub fn parse_params(&self, raw: &Value) -> ValidationResult<TypeParams> {
        match self {
            Self::Numeric => NumericParams::parse(raw).map(TypeParams::Numeric),
            Self::CheckboxNumeric => NumericParams::parse(raw).map(TypeParams::CheckboxNumeric),
            Self::String => StringParams::parse(raw).map(TypeParams::String),
            Self::StringArray => StringArrayParams::parse(raw).map(TypeParams::StringArray),
            Self::Boolean
            | Self::ContextOverflowPolicy
            | Self::LlamaStructuredOutput
            | Self::LlmPromptTemplate
            | Self::LlamaMirostatSampling
            | Self::LlamaLogitBias
            | Self::LlamaGpuOffload => expect_no_params(raw).map(|_| TypeParams::None),
        }
    }

    /// Validate `value` against this kind and its parsed parameters.
    pub fn validate(&self, params: &TypeParams, value: &Value) -> ValidationResult<()> {
        match (self, params) {
            (Self::Numeric, TypeParams::Numeric(p)) => validate_number(p, value),
            (Self::CheckboxNumeric, TypeParams::CheckboxNumeric(p)) => {
                let checkbox: CheckboxNumeric = decode(value)?;
                validate_number(p, &json!(checkbox.value))
            }
            (Self::String, TypeParams::String(p)) => validate_string(p, value),
            (Self::StringArray, TypeParams::StringArray(p)) => validate_string_array(p, value),
            (Self::Boolean, TypeParams::None) => match value {
                Value::Bool(_) => Ok(()),
                other => Err(ValidationError::invalid_type("boolean", json_type_name(other))),
            },
            (Self::ContextOverflowPolicy, TypeParams::None) => {
                decode::<ContextOverflowPolicy>(value).map(|_| ()).map_err(|_| {
                    ValidationError::InvalidVariant {
                        value: value.to_string(),
                        allowed: ContextOverflowPolicy::ALL.iter().map(|s| s.to_string()).collect(),
                    }
                })
            }
            (Self::LlamaStructuredOutput, TypeParams::None) => {
                decode::<StructuredOutput>(value).map(|_| ())
            }
            (Self::LlmPromptTemplate, TypeParams::None) => {
                decode::<PromptTemplate>(value).map(|_| ())
            }
            (Self::LlamaMirostatSampling, TypeParams::None) => {
                decode::<MirostatSampling>(value)?.check()
            }
            (Self::LlamaLogitBias, TypeParams::None) => {
                decode::<Vec<LogitBiasEntry>>(value).map(|_| ())
            }
            (Self::LlamaGpuOffload, TypeParams::None) => decode::<GpuOffload>(value)?.check(),
            (kind, _) => Err(ValidationError::ParamsMismatch {
                value_type: kind.name().to_string(),
            }),
        }
    }

    /// Construct a default value that satisfies `params`.
    pub fn default_value(&self, params: &TypeParams) -> Value {
        match (self, params) {
            (Self::Numeric, TypeParams::Numeric(p)) => number_value(p.zero_default(), p.int),
            (Self::CheckboxNumeric, TypeParams::CheckboxNumeric(p)) => {
                json!({ "checked": false, "value": number_value(p.zero_default(), p.int) })
            }
            (Self::String, TypeParams::String(p)) => {
                Value::String("_".repeat(p.min_length.unwrap_or(0)))
            }
            (Self::StringArray, _) | (Self::LlamaLogitBias, _) => json!([]),
            (Self::Boolean, _) => json!(false),
            (Self::ContextOverflowPolicy, _) => json!("truncateMiddle"),
            (Self::LlamaStructuredOutput, _) => json!({ "type": "none" }),
            (Self::LlmPromptTemplate, _) => json!({
                "type": "legacy",
                "inputPrefix": "",
                "inputSuffix": "",
                "prePromptPrefix": "",
                "prePromptSuffix": "",
            }),
            (Self::LlamaMirostatSampling, _) => json!({
                "version": 0,
                "learningRate": 0.1,
                "targetEntropy": 5,
            }),
            (Self::LlamaGpuOffload, _) => json!({
                "ratio": "auto",
                "mainGpu": 0,
                "tensorSplit": [],
            }),
            // Mismatched params cannot come out of parse_params
            (Self::Numeric, _) | (Self::CheckboxNumeric, _) | (Self::String, _) => Value::Null,
        }
    }

    /// The name this kind is registered under in the builtin registry.
    pub fn name(&self) -> &'static str {
        Self::BUILTIN
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }
}

fn validate_number(params: &NumericParams, value: &Value) -> ValidationResult<()> {
    let number = value
        .as_f64()
        .ok_or_else(|| ValidationError::invalid_type("number", json_type_name(value)))?;
    check_finite(number)?;

    if params.int && number.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger { value: number });
    }
    if let Some(min) = params.min {
        if number < min {
            return Err(ValidationError::BelowMinimum { value: number, min });
        }
    }
    if let Some(max) = params.max {
        if number > max {
            return Err(ValidationError::AboveMaximum { value: number, max });
        }
    }
    Ok(())
}

fn validate_string(params: &StringParams, value: &Value) -> ValidationResult<()> {
    let text = value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_type("string", json_type_name(value)))?;

    let length = text.chars().count();
    let too_short = params.min_length.is_some_and(|min| length < min);
    let too_long = params.max_length.is_some_and(|max| length > max);
    if too_short || too_long {
        return Err(ValidationError::InvalidLength {
            length,
            min: params.min_length,
            max: params.max_length,
        });
    }
    Ok(())
}

fn validate_string_array(params: &StringArrayParams, value: &Value) -> ValidationResult<()> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_type("array of strings", json_type_name(value)))?;

    if let Some(max) = params.max_num_items {
        if items.len() > max {
            return Err(ValidationError::TooManyItems { count: items.len(), max });
        }
    }

    for (index, item) in items.iter().enumerate() {
        let text = item
            .as_str()
            .ok_or_else(|| ValidationError::invalid_type("string", json_type_name(item)))?;
        if text.is_empty() && !params.allow_empty_strings {
            return Err(ValidationError::EmptyItem { index });
        }
    }
    Ok(())
}

fn number_value(number: f64, int: bool) -> Value {
    if int { json!(number as i64) } else { json!(number) }
}

/// Get the type name of a JSON value for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
