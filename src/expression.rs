use crate::invoke::invoke;
use crate::resolve::resolve;
use crate::{ActionProvider, Expr, RawValue, RulebookError, VariableProvider};

/// Evaluate a parsed expression depth-first.
///
/// Each binary node calls the host action named after its operator with the
/// two operand values. A null operand makes the whole node null.
pub(crate) fn evaluate(
    variables: &dyn VariableProvider,
    actions: &dyn ActionProvider,
    expr: &Expr,
) -> Result<RawValue, RulebookError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Variable(name) => Ok(resolve(variables, name).to_raw()),
        Expr::Binary { op, left, right } => {
            let left = evaluate(variables, actions, left)?;
            let right = evaluate(variables, actions, right)?;
            if left.is_null() || right.is_null() {
                return Ok(RawValue::Null);
            }
            invoke(variables, actions, op.action_name(), &[left, right])
        }
    }
}
