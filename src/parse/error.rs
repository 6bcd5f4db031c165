use thiserror::Error;

/// Errors produced when parsing an arithmetic expression. Offsets are byte
/// positions in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expression parse error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("expression parse error at offset {offset}: parentheses nest deeper than {max} levels")]
    TooDeep { offset: usize, max: usize },
}

impl ParseError {
    /// Byte offset into the expression where parsing stopped.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. } | ParseError::TooDeep { offset, .. } => *offset,
        }
    }
}

impl From<winnow::error::ParseError<&str, winnow::error::ContextError>> for ParseError {
    fn from(err: winnow::error::ParseError<&str, winnow::error::ContextError>) -> Self {
        let expected = err.inner().to_string();
        ParseError::Syntax {
            offset: err.offset(),
            message: if expected.is_empty() {
                "unexpected input".to_owned()
            } else {
                expected
            },
        }
    }
}
