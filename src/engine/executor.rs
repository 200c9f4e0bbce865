use std::rc::Rc;

use super::error::EngineError;
use super::evaluate::{evaluate_args, evaluate_string};
use super::options::Options;
use super::resolve::resolve;
use super::scope::ChainScope;
use crate::tag::Tag;
use crate::value::{Function, Value};

const BAD_OPERAND_TAGS: [Tag; 3] = [Tag::Undefined, Tag::Null, Tag::NaN];

/// Runs one normalized (operand, args) tuple against `subject`.
///
/// Dotted string operands re-point the subject to the resolved parent
/// first; string operands then go through variable substitution, the
/// argument list through the deep evaluation walk. A callable operand
/// (or member) is invoked with the subject as `this`; a container
/// member whose first argument names an existing sub-member recurses
/// one level deeper; everything else is a type-guarded assignment.
pub fn execute(
    scope: &ChainScope,
    operand: Value,
    args: Vec<Value>,
    subject: Value,
) -> Result<(), EngineError> {
    if operand.tag().one_of(&BAD_OPERAND_TAGS) {
        return Err(EngineError::operand_resolution(format!(
            "operand was `{}`",
            operand.tag()
        )));
    }

    let operand_text = operand.to_text();
    dispatch(scope, operand, args, subject)
        .map_err(|cause| EngineError::processing(operand_text, cause))
}

fn dispatch(
    scope: &ChainScope,
    mut operand: Value,
    mut args: Vec<Value>,
    mut subject: Value,
) -> Result<(), EngineError> {
    // A dotted operand targets a nested location: shift the subject to
    // the parent object and keep only the final segment. An unresolved
    // parent falls through; the lookup below then sees Undefined and
    // the assignment path reports the missing destination.
    if let Value::String(ref path) = operand {
        if path.contains('.') && is_dot_path(path) {
            let segments: Vec<&str> = path.split('.').collect();
            if let Some((last, parents)) = segments.split_last() {
                subject = resolve(&subject, parents);
                operand = Value::string(*last);
            }
        }
    }

    if let Value::String(ref name) = operand {
        operand = evaluate_string(scope, name);
    }

    if scope.options().evaluate_arguments {
        args = evaluate_args(scope, &args);
    }

    if let Value::Function(ref function) = operand {
        return invoke(scope, function, &subject, &args);
    }

    // Substitution may have produced an unusable operand (e.g. a
    // variable holding Undefined).
    if operand.tag().one_of(&BAD_OPERAND_TAGS) {
        return Err(EngineError::operand_resolution(format!(
            "operand was `{}`",
            operand.tag()
        )));
    }

    let target = subject.member(&operand);
    match target {
        Value::Function(ref function) => invoke(scope, function, &subject, &args),
        _ if recurses(&target, &args) => {
            let next_operand = args[0].clone();
            let next_args = args[1..].to_vec();
            execute(scope, next_operand, next_args, target)
        }
        _ => assign(scope, &subject, &operand, &target, args),
    }
}

fn recurses(target: &Value, args: &[Value]) -> bool {
    target.is_container()
        && args
            .first()
            .map(|key| !target.member(key).is_undefined())
            .unwrap_or(false)
}

fn invoke(
    scope: &ChainScope,
    function: &Rc<Function>,
    this: &Value,
    args: &[Value],
) -> Result<(), EngineError> {
    let result = function.invoke(this, args)?;
    if scope.options().store_results {
        scope.record_result(result);
    }
    Ok(())
}

fn assign(
    scope: &ChainScope,
    subject: &Value,
    operand: &Value,
    current: &Value,
    args: Vec<Value>,
) -> Result<(), EngineError> {
    // A container destination swallows the whole argument list; scalars
    // take the first argument.
    let incoming = if current.is_container() {
        Value::array(args)
    } else {
        match args.into_iter().next() {
            Some(value) => value,
            None => {
                return Err(EngineError::operand_resolution(format!(
                    "no value supplied for member `{}`",
                    operand.to_text()
                )))
            }
        }
    };

    // A refused assignment is a silent no-op, not an error.
    if !conditions(scope.options(), current, &incoming) {
        return Ok(());
    }

    if !subject.set_member(operand, incoming) {
        let message = if subject.is_undefined() {
            format!(
                "destination of member `{}` does not exist",
                operand.to_text()
            )
        } else {
            format!(
                "cannot assign member `{}` on a `{}` subject",
                operand.to_text(),
                subject.tag()
            )
        };
        return Err(EngineError::operand_resolution(message));
    }

    Ok(())
}

/// The type guard: an existing member may only change within its tag
/// (unless `maintain_data_type` is off or it is callable), and an
/// absent member may only be populated with `override_undefined` set.
pub fn conditions(options: &Options, current: &Value, incoming: &Value) -> bool {
    let override_ok = options.override_undefined || current.tag() != Tag::Undefined;

    let maintain_ok = (override_ok && current.tag() == Tag::Undefined)
        || !options.maintain_data_type
        || current.tag() == incoming.tag()
        || current.tag() == Tag::Function;

    override_ok && maintain_ok
}

/// Dotted-identifier grammar: dot-separated segments, each starting
/// with a letter, `_` or `$`, continuing with those or digits.
fn is_dot_path(input: &str) -> bool {
    input.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        }
    })
}
