//! Argument values and the coercion table
//!
//! | type      | accepted input                                   |
//! |-----------|--------------------------------------------------|
//! | `Text`    | anything                                         |
//! | `Integer` | `i64`, optional sign                             |
//! | `Float`   | `f64`                                            |
//! | `Boolean` | `true/false/yes/no/on/off/1/0`, case-insensitive |
//! | `List`    | raw strings, no coercion                         |

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a command parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamType {
    Text,
    Integer,
    Float,
    Boolean,
    /// Variable number of trailing positional arguments
    List,
}

impl ParamType {
    /// Human-readable type name used in help and error messages
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Integer | Self::Float => "Number",
            Self::Boolean => "Boolean",
            Self::List => "ListOfArguments",
        }
    }

    /// Coerce one raw argument
    ///
    /// `parameter` is only used to name the offender in the error.
    pub fn coerce(self, parameter: &str, raw: &str) -> Result<Value, CliError> {
        let bad = || CliError::bad_argument(parameter, raw, self.type_name());
        match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Integer => raw.trim().parse().map(Value::Integer).map_err(|_| bad()),
            Self::Float => raw.trim().parse().map(Value::Float).map_err(|_| bad()),
            Self::Boolean => parse_bool(raw).map(Value::Boolean).ok_or_else(bad),
            Self::List => Ok(Value::List(vec![raw.to_string()])),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A coerced argument or a command result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    List(Vec<String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// Rust types usable as command parameters
pub trait ArgType: Sized {
    /// Coercion applied to raw arguments for this type
    const PARAM_TYPE: ParamType;

    /// Extract a value of this type, if the variant matches
    fn from_value(value: &Value) -> Option<Self>;

    /// Wrap a value of this type
    fn into_value(self) -> Value;
}

impl ArgType for String {
    const PARAM_TYPE: ParamType = ParamType::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl ArgType for i64 {
    const PARAM_TYPE: ParamType = ParamType::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl ArgType for f64 {
    const PARAM_TYPE: ParamType = ParamType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl ArgType for bool {
    const PARAM_TYPE: ParamType = ParamType::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl ArgType for Vec<String> {
    const PARAM_TYPE: ParamType = ParamType::List;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => Some(items.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::List(self)
    }
}

/// What a command handler produces
pub type Outcome = anyhow::Result<Option<Value>>;

/// Return types accepted from command functions
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Ok(None)
    }
}

impl IntoOutcome for Value {
    fn into_outcome(self) -> Outcome {
        Ok(Some(self))
    }
}

impl IntoOutcome for &str {
    fn into_outcome(self) -> Outcome {
        Ok(Some(Value::from(self)))
    }
}

macro_rules! impl_into_outcome {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOutcome for $ty {
                fn into_outcome(self) -> Outcome {
                    Ok(Some(ArgType::into_value(self)))
                }
            }
        )*
    };
}

impl_into_outcome!(String, i64, f64, bool, Vec<String>);

impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Outcome {
        match self {
            Some(inner) => inner.into_outcome(),
            None => Ok(None),
        }
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<anyhow::Error>,
{
    fn into_outcome(self) -> Outcome {
        self.map_err(Into::into)?.into_outcome()
    }
}
