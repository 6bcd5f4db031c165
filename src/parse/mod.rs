mod error;
mod grammar;

pub use error::ParseError;

use crate::Expr;

/// Deepest parenthesis nesting accepted in an expression.
pub const MAX_NESTING: usize = 64;

/// Parse an arithmetic expression into an [`Expr`] tree.
///
/// Accepts `+ - * /`, parentheses, identifiers and unsigned numeric literals.
///
/// # Errors
///
/// Returns [`ParseError`] for any other syntax, or when parentheses nest
/// deeper than [`MAX_NESTING`].
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;

    check_nesting(input)?;
    Ok(grammar::expression.parse(input)?)
}

fn check_nesting(input: &str) -> Result<(), ParseError> {
    let mut depth = 0_usize;
    for (offset, c) in input.char_indices() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(ParseError::TooDeep {
                        offset,
                        max: MAX_NESTING,
                    });
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}
