use std::rc::Rc;

use crate::engine::executor::execute;
use crate::engine::resolve::resolve;
use crate::engine::shape::normalize;
use crate::engine::{ChainScope, EngineError, Options};
use crate::tag::Tag;
use crate::value::Value;

/// Starts a chain over `subject` with default options.
///
/// The subject is referenced, not copied: every mutation applied
/// through the chain is visible via the handle the caller kept.
pub fn cascade(subject: Value) -> Chain {
    cascade_with(subject, Options::default())
}

pub fn cascade_with(subject: Value, options: Options) -> Chain {
    Chain {
        scope: Rc::new(ChainScope::new(subject, options)),
    }
}

/// A chain handle. Cloning is cheap and shares the scope, so the value
/// returned by each call chains naturally:
///
/// ```
/// use cascade::{cascade, Value};
/// use indexmap::IndexMap;
///
/// let mut map = IndexMap::new();
/// map.insert("x".to_string(), Value::from(1));
/// let subject = Value::object(map);
///
/// let out = cascade(subject.clone())
///     .step([Value::from("x"), Value::from(2)])
///     .unwrap()
///     .release();
/// assert_eq!(out.member_str("x"), Value::from(2));
/// ```
#[derive(Debug, Clone)]
pub struct Chain {
    scope: Rc<ChainScope>,
}

impl Chain {
    /// Executes one chain step eagerly: the raw argument list is
    /// normalized into (operand, args) tuples, each run left to right
    /// against the same original subject. The raw list is remembered
    /// for [`Chain::repeat`].
    pub fn step(&self, raw: impl IntoIterator<Item = Value>) -> Result<Chain, EngineError> {
        let raw: Vec<Value> = raw.into_iter().collect();
        self.run(&raw)?;
        self.scope.remember_step(raw);
        Ok(self.clone())
    }

    fn run(&self, raw: &[Value]) -> Result<(), EngineError> {
        for step in normalize(raw)? {
            execute(
                &self.scope,
                step.operand,
                step.args,
                self.scope.subject().clone(),
            )?;
        }
        self.scope.bump_index();
        Ok(())
    }

    /// Descends into `path` (resolved against the current subject) and
    /// returns a chain over it whose parent is this scope. Fails when
    /// the path does not resolve.
    pub fn enter(&self, path: &str) -> Result<Chain, EngineError> {
        let target = resolve(self.scope.subject(), &[path]);
        if target.tag().one_of(&[Tag::Undefined, Tag::Null]) {
            return Err(EngineError::operand_resolution(format!(
                "property `{}` does not exist on subject",
                path
            )));
        }

        let scope = ChainScope::child(target, self.scope.options().clone(), Rc::clone(&self.scope));
        Ok(Chain {
            scope: Rc::new(scope),
        })
    }

    /// Returns to the parent scope's chain; at the root this is a
    /// no-op returning self.
    pub fn exit(&self) -> Chain {
        match self.scope.parent() {
            Some(parent) => Chain {
                scope: Rc::clone(parent),
            },
            None => self.clone(),
        }
    }

    /// Hands back the raw subject, ending the chain's usefulness.
    pub fn release(&self) -> Value {
        self.scope.subject().clone()
    }

    /// Re-executes the most recent step's raw argument list `times`
    /// more times against current state, bumping `$index` per run.
    /// Without a prior step, or with `times == 0`, this is a no-op.
    pub fn repeat(&self, times: usize) -> Result<Chain, EngineError> {
        if let Some(raw) = self.scope.last_step() {
            for _ in 0..times {
                self.run(&raw)?;
            }
        }
        Ok(self.clone())
    }

    /// Reads a `$`-prefixed chain variable (`$index`, `$result`,
    /// `$results`, `$subject`).
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.scope.variable(name)
    }

    pub fn index(&self) -> u64 {
        self.scope.index()
    }

    pub fn options(&self) -> &Options {
        self.scope.options()
    }
}
