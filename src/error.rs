use thiserror::Error;

use crate::parse::ParseError;
use crate::{ActionError, OperatorError, StructuralError};

/// Unified error type for every fallible engine operation.
///
/// Each variant wraps one failure class so callers can match on the class
/// and still get the specific message through `Display`.
#[derive(Debug, Error)]
pub enum RulebookError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
