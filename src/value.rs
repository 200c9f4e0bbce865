use indexmap::IndexMap;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::engine::EngineError;

/// The dynamic value universe a chain operates on.
///
/// Containers are shared: cloning a `Value` aliases the same storage, so
/// mutations applied through a chain remain visible via the caller's
/// original handle. `Undefined` doubles as the unresolved-path sentinel
/// and is distinct from `Null`.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64, bool),
    String(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<IndexMap<String, Value>>>),
    Function(Rc<Function>),
    Date(OffsetDateTime),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(left_bool), Value::Bool(right_bool)) => left_bool == right_bool,
            (Value::Number(left_num, _), Value::Number(right_num, _)) => left_num == right_num,
            (Value::String(left_str), Value::String(right_str)) => left_str == right_str,
            (Value::Array(left_arr), Value::Array(right_arr)) => left_arr == right_arr,
            (Value::Object(left_obj), Value::Object(right_obj)) => left_obj == right_obj,
            (Value::Function(left_fn), Value::Function(right_fn)) => Rc::ptr_eq(left_fn, right_fn),
            (Value::Date(left_date), Value::Date(right_date)) => left_date == right_date,
            _ => false,
        }
    }
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(entries: IndexMap<String, Value>) -> Self {
        Value::Object(Rc::new(RefCell::new(entries)))
    }

    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Wraps a native callable. `this` is the subject the operand was
    /// dispatched against.
    pub fn native<F>(name: impl Into<Rc<str>>, call: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EngineError> + 'static,
    {
        Value::Function(Rc::new(Function::new(name, call)))
    }

    pub fn as_object(&self) -> Option<Ref<'_, IndexMap<String, Value>>> {
        if let Value::Object(object) = self {
            Some(object.borrow())
        } else {
            None
        }
    }

    pub fn as_array(&self) -> Option<Ref<'_, Vec<Value>>> {
        if let Value::Array(array) = self {
            Some(array.borrow())
        } else {
            None
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        if let Value::Number(numeric_value, _) = self {
            Some(*numeric_value)
        } else {
            None
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Value::String(string_ref) = self {
            Some(string_ref.as_ref())
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(bool_value) = self {
            Some(*bool_value)
        } else {
            None
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Member lookup on a container; `Undefined` for absent members and
    /// non-container subjects. Arrays accept a `Number` key or a numeric
    /// string, objects accept a string key (numbers are stringified).
    pub fn member(&self, key: &Value) -> Value {
        match self {
            Value::Object(map) => {
                let name = match key {
                    Value::String(s) => s.to_string(),
                    Value::Number(..) => key.to_text(),
                    _ => return Value::Undefined,
                };
                map.borrow().get(&name).cloned().unwrap_or(Value::Undefined)
            }
            Value::Array(items) => match index_key(key) {
                Some(index) => items
                    .borrow()
                    .get(index)
                    .cloned()
                    .unwrap_or(Value::Undefined),
                None => Value::Undefined,
            },
            _ => Value::Undefined,
        }
    }

    pub fn member_str(&self, key: &str) -> Value {
        self.member(&Value::string(key))
    }

    /// Writes a member on a container. Array writes replace in range and
    /// push at `len`; anything past the end, or a non-container subject,
    /// reports `false` for the caller to surface.
    pub fn set_member(&self, key: &Value, value: Value) -> bool {
        match self {
            Value::Object(map) => {
                let name = match key {
                    Value::String(s) => s.to_string(),
                    Value::Number(..) => key.to_text(),
                    _ => return false,
                };
                map.borrow_mut().insert(name, value);
                true
            }
            Value::Array(items) => match index_key(key) {
                Some(index) => {
                    let mut items = items.borrow_mut();
                    if index < items.len() {
                        items[index] = value;
                        true
                    } else if index == items.len() {
                        items.push(value);
                        true
                    } else {
                        false
                    }
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Text coercion used by placeholder interpolation: bare literals for
    /// scalars, comma-joined member text for arrays, compact JSON for
    /// objects.
    pub fn to_text(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(numeric_value, is_float) => {
                if numeric_value.is_nan() {
                    "NaN".to_string()
                } else if *is_float {
                    let formatted = numeric_value.to_string();
                    if formatted.contains('.') || formatted.contains('e') || formatted.contains('E')
                    {
                        formatted
                    } else {
                        format!("{}.0", numeric_value)
                    }
                } else {
                    format!("{:.0}", numeric_value)
                }
            }
            Value::String(s) => s.to_string(),
            Value::Array(items) => items
                .borrow()
                .iter()
                .map(|item| item.to_text())
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => crate::format::value_to_json_string(self, true),
            Value::Function(function) => format!("<function {}>", function.name),
            Value::Date(date) => date.format(&Rfc3339).unwrap_or_else(|_| date.to_string()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n, n.fract() != 0.0)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64, false)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s.as_str()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

/// Interprets a key as an array index: a non-negative integral `Number`
/// or a string of digits.
fn index_key(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n, _) => {
            if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 {
                Some(*n as usize)
            } else {
                None
            }
        }
        Value::String(s) => s.parse::<usize>().ok(),
        _ => None,
    }
}

pub struct Function {
    pub name: Rc<str>,
    call: Box<dyn Fn(&Value, &[Value]) -> Result<Value, EngineError>>,
}

impl Function {
    pub fn new<F>(name: impl Into<Rc<str>>, call: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EngineError> + 'static,
    {
        Self {
            name: name.into(),
            call: Box::new(call),
        }
    }

    pub fn invoke(&self, this: &Value, args: &[Value]) -> Result<Value, EngineError> {
        (self.call)(this, args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}
