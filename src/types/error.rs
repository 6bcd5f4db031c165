use thiserror::Error;

/// Errors a host action may return. Boxed so hosts can use any error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Malformed rule input, detected before evaluation starts.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("'{kind}' group must contain at least one condition")]
    EmptyGroup { kind: &'static str },

    #[error("condition tree exceeds the maximum nesting depth of {max_depth}")]
    TooDeep { max_depth: usize },

    #[error("condition '{label}' has no operator")]
    MissingOperator { label: String },

    #[error("condition has neither a subject (name, expression, function) nor a label")]
    EmptyLeaf,
}

/// Failures resolving or applying a comparison operator.
#[derive(Debug, Error)]
pub enum OperatorError {
    #[error("operator '{operator}' not defined for type {type_name}")]
    Undefined {
        operator: String,
        type_name: &'static str,
    },

    #[error("operator '{operator}' expects {expected} argument(s) but received {found}")]
    ArgumentCount {
        operator: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("operator '{operator}': {message}")]
    InvalidArgument {
        operator: &'static str,
        message: String,
    },

    #[error("invalid regular expression '{pattern}'")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failures in the action invocation protocol.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action '{action}' not defined for {provider}")]
    Undefined { action: String, provider: String },

    #[error("action '{action}' expects {expected} parameter(s) but received {found}")]
    Arity {
        action: String,
        expected: usize,
        found: usize,
    },

    #[error("action '{action}' failed: {source}")]
    Failed {
        action: String,
        #[source]
        source: BoxError,
    },
}
