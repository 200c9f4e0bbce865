use std::fmt;

/// Errors raised while normalizing, resolving or executing a chain step.
/// Both kinds abort the step that raised them; mutations from earlier
/// steps stay applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The operand itself is unusable: Undefined/Null/NaN, a missing
    /// `enter` target, or a call shape with no operand at all.
    OperandResolution { message: String },
    /// Something failed while evaluating or dispatching an operand. The
    /// offending operand's textual form is kept alongside the cause.
    Processing {
        operand: String,
        cause: Box<EngineError>,
    },
    /// A native callable reported a failure.
    Invocation { message: String },
}

impl EngineError {
    pub fn operand_resolution(message: impl Into<String>) -> Self {
        Self::OperandResolution {
            message: message.into(),
        }
    }

    pub fn processing(operand: impl Into<String>, cause: EngineError) -> Self {
        Self::Processing {
            operand: operand.into(),
            cause: Box::new(cause),
        }
    }

    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation {
            message: message.into(),
        }
    }

    /// The innermost error in a `Processing` wrap chain.
    pub fn root_cause(&self) -> &EngineError {
        match self {
            Self::Processing { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperandResolution { message } => write!(f, "{}", message),
            Self::Processing { operand, cause } => {
                write!(f, "error while processing operand `{}`: {}", operand, cause)
            }
            Self::Invocation { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Processing { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}
