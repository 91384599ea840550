// Value Domain Model - bind parameters and scalar results

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// A value bound to a query parameter or read back as a scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    /// IN-list parameter, expands to one placeholder per element
    List(Vec<Value>),
}

/// Optional type hint attached to a bound parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamType {
    Integer,
    Real,
    Text,
    Boolean,
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::Integer => write!(f, "INTEGER"),
            ParamType::Real => write!(f, "REAL"),
            ParamType::Text => write!(f, "TEXT"),
            ParamType::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce this value into the hinted type
    ///
    /// NULL passes through every hint; lists are coerced element-wise.
    pub fn coerce(self, hint: ParamType) -> Result<Value> {
        let mismatch = |value: &Value| {
            AppError::InvalidArgument(format!("Cannot coerce {} to {}", value, hint))
        };

        match (hint, self) {
            (_, Value::Null) => Ok(Value::Null),
            (_, Value::List(items)) => items
                .into_iter()
                .map(|item| item.coerce(hint))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),

            (ParamType::Integer, Value::Integer(i)) => Ok(Value::Integer(i)),
            (ParamType::Integer, Value::Bool(b)) => Ok(Value::Integer(i64::from(b))),
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            (ParamType::Integer, Value::Real(f))
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Ok(Value::Integer(f as i64))
            }
            (ParamType::Integer, Value::Text(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Ok(Value::Integer(i)),
                Err(_) => Err(mismatch(&Value::Text(s))),
            },

            (ParamType::Real, Value::Real(f)) => Ok(Value::Real(f)),
            (ParamType::Real, Value::Integer(i)) => Ok(Value::Real(i as f64)),
            (ParamType::Real, Value::Text(s)) => match s.trim().parse::<f64>() {
                Ok(f) => Ok(Value::Real(f)),
                Err(_) => Err(mismatch(&Value::Text(s))),
            },

            (ParamType::Text, Value::Text(s)) => Ok(Value::Text(s)),
            (ParamType::Text, Value::Integer(i)) => Ok(Value::Text(i.to_string())),
            (ParamType::Text, Value::Real(f)) => Ok(Value::Text(f.to_string())),
            (ParamType::Text, Value::Bool(b)) => Ok(Value::Text(b.to_string())),

            (ParamType::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
            (ParamType::Boolean, Value::Integer(0)) => Ok(Value::Bool(false)),
            (ParamType::Boolean, Value::Integer(1)) => Ok(Value::Bool(true)),
            (ParamType::Boolean, Value::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err(mismatch(&Value::Text(s))),
            },

            (_, other) => Err(mismatch(&other)),
        }
    }

    /// Convert into a JSON value for hydration
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            // Non-finite reals have no JSON form
            Value::Real(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Value::List(items) => {
                write!(f, "(")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
