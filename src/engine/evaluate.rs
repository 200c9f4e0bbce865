use indexmap::IndexMap;

use super::scope::ChainScope;
use crate::value::Value;

/// Applies variable substitution to one string.
///
/// Direct form: the whole string is a known `$name`, and the variable's
/// value comes back with its type intact. Interpolated form: every
/// `{$name}` placeholder with a known name is replaced by the value's
/// text; unknown placeholders stay verbatim. The two behaviors are
/// gated by `evaluate_variables` and `replace_variables` respectively.
pub fn evaluate_string(scope: &ChainScope, input: &str) -> Value {
    if scope.options().evaluate_variables {
        if let Some(value) = scope.variable(input) {
            return value;
        }
    }

    if scope.options().replace_variables && input.contains('{') {
        return Value::string(interpolate(scope, input));
    }

    Value::string(input)
}

/// Deep substitution walk. Strings are substituted, containers are
/// rebuilt with substituted members; the input value is left untouched.
pub fn evaluate_value(scope: &ChainScope, value: &Value) -> Value {
    match value {
        Value::String(s) => evaluate_string(scope, s),
        Value::Array(items) => {
            let evaluated: Vec<Value> = items
                .borrow()
                .iter()
                .map(|item| evaluate_value(scope, item))
                .collect();
            Value::array(evaluated)
        }
        Value::Object(map) => {
            let evaluated: IndexMap<String, Value> = map
                .borrow()
                .iter()
                .map(|(key, entry)| (key.clone(), evaluate_value(scope, entry)))
                .collect();
            Value::object(evaluated)
        }
        other => other.clone(),
    }
}

pub fn evaluate_args(scope: &ChainScope, args: &[Value]) -> Vec<Value> {
    args.iter().map(|arg| evaluate_value(scope, arg)).collect()
}

/// Single left-to-right pass; every matched placeholder is replaced
/// once, unmatched ones pass through unchanged.
fn interpolate(scope: &ChainScope, input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let name = &after_open[..close];
                match placeholder_value(scope, name) {
                    Some(value) => output.push_str(&value.to_text()),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                // Unbalanced brace, keep the tail as-is.
                output.push_str(&rest[open..]);
                return output;
            }
        }
    }

    output.push_str(rest);
    output
}

fn placeholder_value(scope: &ChainScope, name: &str) -> Option<Value> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        return None;
    }
    scope.variable(name)
}
