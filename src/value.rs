//! Dynamically typed option values.
//!
//! Command parameters carry their defaults as [`Value`]s; the binder coerces
//! raw argument text into the matching variant. [`Value::None`] marks a
//! parameter whose default is the null value, which still counts as a default
//! for derivation purposes.

use std::fmt;

/// A parameter default or bound argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    /// The null default. Renders as `None` and passes through binding
    /// untouched when the option is not given.
    None,
}

impl Value {
    /// Shorthand for a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Shorthand for a list value.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) if v.fract() == 0.0 && v.is_finite() => {
                write!(f, "{:.1}", v)
            }
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::None => write!(f, "None"),
        }
    }
}

/// The scalar type an option coerces raw argument text into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Float,
    Str,
}

impl ValueType {
    /// Coerce raw text into a [`Value`] of this type.
    pub fn parse(self, raw: &str) -> Result<Value, ()> {
        match self {
            ValueType::Int => raw.parse::<i64>().map(Value::Int).map_err(|_| ()),
            ValueType::Float => raw.parse::<f64>().map(Value::Float).map_err(|_| ()),
            ValueType::Str => Ok(Value::Str(raw.to_string())),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Str => "string",
        };
        write!(f, "{}", name)
    }
}
