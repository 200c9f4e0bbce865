use std::cell::RefCell;
use std::rc::Rc;

use super::options::Options;
use crate::value::Value;

pub const VAR_INDEX: &str = "$index";
pub const VAR_RESULT: &str = "$result";
pub const VAR_RESULTS: &str = "$results";
pub const VAR_SUBJECT: &str = "$subject";

/// Per-chain running state: invocation counter, captured invocation
/// results and the raw arguments of the most recent step (for
/// `repeat`).
#[derive(Debug)]
pub struct Variables {
    pub index: u64,
    pub result: Value,
    pub results: Rc<RefCell<Vec<Value>>>,
}

impl Variables {
    fn new() -> Self {
        Self {
            index: 0,
            result: Value::Undefined,
            results: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

/// The state container one chain operates in. Child scopes created via
/// `enter` keep a link back to their parent; the subject handle aliases
/// the caller's value for the scope's whole lifetime.
#[derive(Debug)]
pub struct ChainScope {
    subject: Value,
    options: Options,
    variables: RefCell<Variables>,
    parent: Option<Rc<ChainScope>>,
    last_step: RefCell<Option<Vec<Value>>>,
}

impl ChainScope {
    pub fn new(subject: Value, options: Options) -> Self {
        Self {
            subject,
            options,
            variables: RefCell::new(Variables::new()),
            parent: None,
            last_step: RefCell::new(None),
        }
    }

    pub fn child(subject: Value, options: Options, parent: Rc<ChainScope>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(subject, options)
        }
    }

    pub fn subject(&self) -> &Value {
        &self.subject
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn parent(&self) -> Option<&Rc<ChainScope>> {
        self.parent.as_ref()
    }

    /// Looks up a `$`-prefixed variable. `$subject` is the scope
    /// accessor: it hands out the subject by shared handle instead of a
    /// cyclic scope back-pointer.
    pub fn variable(&self, name: &str) -> Option<Value> {
        let variables = self.variables.borrow();
        match name {
            VAR_INDEX => Some(Value::Number(variables.index as f64, false)),
            VAR_RESULT => Some(variables.result.clone()),
            VAR_RESULTS => Some(Value::Array(Rc::clone(&variables.results))),
            VAR_SUBJECT => Some(self.subject.clone()),
            _ => None,
        }
    }

    /// One increment per completed chain step, repeats included.
    pub fn bump_index(&self) {
        self.variables.borrow_mut().index += 1;
    }

    pub fn index(&self) -> u64 {
        self.variables.borrow().index
    }

    pub fn record_result(&self, result: Value) {
        let mut variables = self.variables.borrow_mut();
        variables.result = result.clone();
        variables.results.borrow_mut().push(result);
    }

    pub fn results(&self) -> Rc<RefCell<Vec<Value>>> {
        Rc::clone(&self.variables.borrow().results)
    }

    pub fn last_step(&self) -> Option<Vec<Value>> {
        self.last_step.borrow().clone()
    }

    pub fn remember_step(&self, raw: Vec<Value>) {
        *self.last_step.borrow_mut() = Some(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_starts_at_zero_and_is_monotonic() {
        let scope = ChainScope::new(Value::Null, Options::default());
        assert_eq!(scope.variable(VAR_INDEX), Some(Value::Number(0.0, false)));
        scope.bump_index();
        scope.bump_index();
        assert_eq!(scope.variable(VAR_INDEX), Some(Value::Number(2.0, false)));
    }

    #[test]
    fn results_are_shared_with_the_variable_handle() {
        let scope = ChainScope::new(Value::Null, Options::default());
        let handle = scope.variable(VAR_RESULTS).unwrap();
        scope.record_result(Value::from(7));
        assert_eq!(handle.as_array().unwrap().len(), 1);
        assert_eq!(scope.variable(VAR_RESULT), Some(Value::from(7)));
    }

    #[test]
    fn unknown_variables_resolve_to_none() {
        let scope = ChainScope::new(Value::Null, Options::default());
        assert_eq!(scope.variable("$nope"), None);
        assert_eq!(scope.variable("index"), None);
    }
}
