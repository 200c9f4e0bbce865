use std::fmt;

use crate::value::Value;

/// Structural type tag of a value. Every value has exactly one tag;
/// `NaN` is deliberately distinct from `Number` so the type guard can
/// refuse to treat it as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Undefined,
    Null,
    Bool,
    Number,
    String,
    Function,
    Array,
    Object,
    Date,
    NaN,
}

impl Tag {
    pub fn one_of(self, set: &[Tag]) -> bool {
        set.contains(&self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Undefined => "Undefined",
            Tag::Null => "Null",
            Tag::Bool => "Boolean",
            Tag::Number => "Number",
            Tag::String => "String",
            Tag::Function => "Function",
            Tag::Array => "Array",
            Tag::Object => "Object",
            Tag::Date => "Date",
            Tag::NaN => "NaN",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Classifies the value by its intrinsic representation. Never
    /// panics; independent of any construction path.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Undefined => Tag::Undefined,
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::Number(n, _) if n.is_nan() => Tag::NaN,
            Value::Number(..) => Tag::Number,
            Value::String(_) => Tag::String,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
            Value::Function(_) => Tag::Function,
            Value::Date(_) => Tag::Date,
        }
    }
}
