use std::fmt::{Debug, Display, Formatter};

use super::object::JsObject;
use super::property::PropertyKey;
use super::string::JsPrimitiveString;
use super::symbols::JsSymbol;
use crate::debugging::{DebugRepresentation, Renderer};
use crate::result::{ExecutionError, JsResult};

#[derive(Clone, Default)]
pub enum RuntimeValue {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Float(f64),
    String(JsPrimitiveString),
    Symbol(JsSymbol),
    Object(JsObject),
}

impl From<Option<RuntimeValue>> for RuntimeValue {
    fn from(value: Option<RuntimeValue>) -> Self {
        value.unwrap_or(RuntimeValue::Undefined)
    }
}

impl From<bool> for RuntimeValue {
    fn from(value: bool) -> Self {
        RuntimeValue::Boolean(value)
    }
}

impl From<f64> for RuntimeValue {
    fn from(value: f64) -> Self {
        RuntimeValue::Float(value)
    }
}

impl From<usize> for RuntimeValue {
    fn from(value: usize) -> Self {
        RuntimeValue::Float(value as f64)
    }
}

impl From<&str> for RuntimeValue {
    fn from(value: &str) -> Self {
        RuntimeValue::String(value.into())
    }
}

impl From<String> for RuntimeValue {
    fn from(value: String) -> Self {
        RuntimeValue::String(value.into())
    }
}

impl From<JsSymbol> for RuntimeValue {
    fn from(value: JsSymbol) -> Self {
        RuntimeValue::Symbol(value)
    }
}

impl RuntimeValue {
    /// The `===` operator.
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeValue::Undefined, RuntimeValue::Undefined)
            | (RuntimeValue::Null, RuntimeValue::Null) => true,
            (RuntimeValue::Boolean(b1), RuntimeValue::Boolean(b2)) => b1 == b2,
            (RuntimeValue::String(b1), RuntimeValue::String(b2)) => b1 == b2,
            (RuntimeValue::Float(b1), RuntimeValue::Float(b2)) => b1 == b2,
            (RuntimeValue::Symbol(b1), RuntimeValue::Symbol(b2)) => b1 == b2,
            (RuntimeValue::Object(b1), RuntimeValue::Object(b2)) => b1 == b2,
            _ => false,
        }
    }

    /// SameValue: like `===` except `NaN` equals itself and `+0` differs from `-0`.
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeValue::Float(f1), RuntimeValue::Float(f2)) => {
                if f1.is_nan() && f2.is_nan() {
                    return true;
                }

                f1 == f2 && f1.is_sign_negative() == f2.is_sign_negative()
            }
            _ => self.strict_eq(other),
        }
    }

    pub fn to_bool(&self) -> bool {
        match self {
            RuntimeValue::Undefined | RuntimeValue::Null => false,
            RuntimeValue::Boolean(value) => *value,
            RuntimeValue::Float(value) => !(value.is_nan() || *value == 0.0),
            RuntimeValue::String(value) => !value.as_ref().is_empty(),
            RuntimeValue::Symbol(_) | RuntimeValue::Object(_) => true,
        }
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            RuntimeValue::Undefined => "undefined",
            RuntimeValue::Null => "object",
            RuntimeValue::Boolean(_) => "boolean",
            RuntimeValue::Float(_) => "number",
            RuntimeValue::String(_) => "string",
            RuntimeValue::Symbol(_) => "symbol",
            RuntimeValue::Object(obj) if obj.is_function() => "function",
            RuntimeValue::Object(_) => "object",
        }
    }

    pub fn as_object(&self) -> JsResult<&JsObject> {
        match self {
            RuntimeValue::Object(obj) => Ok(obj),
            other => Err(ExecutionError::TypeError(format!(
                "{} is not an object",
                other
            ))),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, RuntimeValue::Undefined)
    }

    /// ToPropertyKey for the primitive cases; objects are rejected rather than coerced.
    pub fn to_property_key(&self) -> JsResult<PropertyKey> {
        let key = match self {
            RuntimeValue::Symbol(symbol) => PropertyKey::Symbol(symbol.clone()),
            RuntimeValue::String(str) => PropertyKey::String(str.clone()),
            RuntimeValue::Float(value) => PropertyKey::String(number_to_string(*value).into()),
            RuntimeValue::Boolean(value) => PropertyKey::String(value.to_string().into()),
            RuntimeValue::Undefined => PropertyKey::String("undefined".into()),
            RuntimeValue::Null => PropertyKey::String("null".into()),
            RuntimeValue::Object(_) => {
                return Err(ExecutionError::TypeError(
                    "Cannot convert object to property key".to_owned(),
                ))
            }
        };

        Ok(key)
    }

    /// ToIntegerOrInfinity for the primitive cases.
    pub fn to_integer(&self) -> f64 {
        let number = match self {
            RuntimeValue::Float(value) => *value,
            RuntimeValue::Boolean(true) => 1.0,
            RuntimeValue::String(str) => str.as_ref().trim().parse().unwrap_or(f64::NAN),
            _ => 0.0,
        };

        if number.is_nan() {
            0.0
        } else {
            number.trunc()
        }
    }
}

pub(crate) fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        (if value > 0.0 { "Infinity" } else { "-Infinity" }).to_owned()
    } else if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

impl Display for RuntimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeValue::Undefined => f.write_str("undefined"),
            RuntimeValue::Null => f.write_str("null"),
            RuntimeValue::Boolean(value) => f.write_fmt(format_args!("{}", value)),
            RuntimeValue::Float(value) if *value == 0.0 && value.is_sign_negative() => {
                f.write_str("-0")
            }
            RuntimeValue::Float(value) => f.write_str(&number_to_string(*value)),
            RuntimeValue::String(value) => f.write_fmt(format_args!("{:?}", value.as_ref())),
            RuntimeValue::Symbol(symbol) => f.write_fmt(format_args!("{}", symbol)),
            RuntimeValue::Object(obj) => f.write_fmt(format_args!("{}", obj)),
        }
    }
}

impl Debug for RuntimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut renderer = Renderer::debug(f, 3);

        renderer.render(self)
    }
}

impl DebugRepresentation for RuntimeValue {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        match self {
            RuntimeValue::Undefined => renderer.literal("undefined"),
            RuntimeValue::Null => renderer.literal("null"),
            RuntimeValue::Boolean(value) => renderer.literal(&value.to_string()),
            RuntimeValue::Float(_) => renderer.literal(&self.to_string()),
            RuntimeValue::String(value) => renderer.string_literal(value.as_ref()),
            RuntimeValue::Symbol(symbol) => renderer.literal(&symbol.to_string()),
            RuntimeValue::Object(obj) => renderer.render(obj),
        }
    }
}

impl PartialEq for RuntimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}
