use super::error::EngineError;
use crate::value::Value;

/// One normalized (operand, argument-list) tuple, ready for the
/// executor.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub operand: Value,
    pub args: Vec<Value>,
}

/// The four literal syntaxes one chain step's raw arguments may take.
/// Decoded exactly once here so the executor never sees shape
/// distinctions.
#[derive(Debug)]
enum CallShape {
    /// `(operand, arg, ...)`
    Flat(Step),
    /// `([operand, [args], operand, [args], ...], ...)`
    PairSequence(Vec<Step>),
    /// `([operand, arg, ...], ...)` with one level of arg flattening
    NestedSequence(Step),
    /// `({operand: arg | [args], ...}, ...)` in insertion order
    KeyedMap(Vec<Step>),
}

impl CallShape {
    fn into_steps(self, out: &mut Vec<Step>) {
        match self {
            CallShape::Flat(step) | CallShape::NestedSequence(step) => out.push(step),
            CallShape::PairSequence(steps) | CallShape::KeyedMap(steps) => out.extend(steps),
        }
    }
}

/// Normalizes one chain step's raw argument list into a uniform list of
/// steps, each later executed against the same original subject.
pub fn normalize(raw: &[Value]) -> Result<Vec<Step>, EngineError> {
    let first = raw
        .first()
        .ok_or_else(|| EngineError::operand_resolution("chain step called without arguments"))?;

    if !first.is_container() {
        return Ok(vec![Step {
            operand: first.clone(),
            args: raw[1..].to_vec(),
        }]);
    }

    let mut steps = Vec::new();
    for arg in raw {
        match arg {
            Value::Array(items) => {
                classify_sequence(&items.borrow())?.into_steps(&mut steps);
            }
            Value::Object(map) => {
                let keyed: Vec<Step> = map
                    .borrow()
                    .iter()
                    .map(|(name, entry)| Step {
                        operand: Value::string(name),
                        args: argument_list(entry),
                    })
                    .collect();
                CallShape::KeyedMap(keyed).into_steps(&mut steps);
            }
            other => {
                return Err(EngineError::operand_resolution(format!(
                    "unexpected argument `{}` in a multi-operand step",
                    other.to_text()
                )))
            }
        }
    }

    Ok(steps)
}

/// Pair rule first: a sequence longer than two with a sequence in
/// second position and even overall length reads as (operand, args)
/// pairs. Everything else is operand-plus-flattened-args.
fn classify_sequence(items: &[Value]) -> Result<CallShape, EngineError> {
    if items.len() > 2 && matches!(items[1], Value::Array(_)) && items.len() % 2 == 0 {
        let pairs = items
            .chunks_exact(2)
            .map(|pair| Step {
                operand: pair[0].clone(),
                args: argument_list(&pair[1]),
            })
            .collect();
        return Ok(CallShape::PairSequence(pairs));
    }

    let operand = items
        .first()
        .cloned()
        .ok_or_else(|| EngineError::operand_resolution("operand sequence is empty"))?;

    let mut args = Vec::new();
    for item in &items[1..] {
        match item {
            Value::Array(nested) => args.extend(nested.borrow().iter().cloned()),
            other => args.push(other.clone()),
        }
    }

    Ok(CallShape::NestedSequence(Step { operand, args }))
}

fn argument_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.borrow().clone(),
        other => vec![other.clone()],
    }
}
