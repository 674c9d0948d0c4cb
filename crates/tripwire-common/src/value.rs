//! Runtime values observed at a trigger firing.
//!
//! A `Value` is what an initializer evaluates to and what the helper's
//! named-value store holds. The same representation is used by the
//! tree-walking interpreter and by the stack machine that runs generated
//! code, so the two strategies can be compared value-for-value.

use std::fmt;

/// A runtime value in the instrumented program's frame.
///
/// Numeric variants mirror the target VM's primitive widths; `Str` and
/// `Object` cover reference values. `Null` is the absent reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    /// An opaque reference value, identified by its class name and a
    /// display rendering supplied by the trigger frame.
    Object { class: String, display: String },
}

impl Value {
    pub fn string(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The name of the value's runtime class, as the target VM reports it.
    pub fn class_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Str(_) => "java.lang.String",
            Value::Object { class, .. } => class,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Double(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Object { display, .. } => write!(f, "{display}"),
        }
    }
}
