use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;

use super::error::BoxError;
use super::value::RawValue;

/// Host capability that runs named actions with a fixed declared arity.
///
/// Actions may be side-effecting (send a notification, write a discount) or
/// value-producing (lookups, arithmetic for expressions).
pub trait ActionProvider {
    /// Name used in "action not defined for ..." errors.
    fn provider_name(&self) -> &str {
        "actions"
    }

    /// Declared parameter count, or `None` if the action is not defined.
    fn arity(&self, action: &str) -> Option<usize>;

    /// Invoke an action with positional arguments.
    ///
    /// # Errors
    ///
    /// Any error the host action raises. The engine wraps it with the action name.
    fn invoke(&self, action: &str, args: Vec<RawValue>) -> Result<RawValue, BoxError>;
}

type Handler = Box<dyn Fn(&[RawValue]) -> Result<RawValue, BoxError> + Send + Sync>;

/// A name to handler table the host registers explicitly.
pub struct Actions {
    name: String,
    handlers: HashMap<String, (usize, Handler)>,
}

impl Actions {
    #[must_use]
    pub fn new() -> Self {
        Self::named("actions")
    }

    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            handlers: HashMap::new(),
        }
    }

    /// Register an action taking exactly `arity` positional arguments.
    #[must_use]
    pub fn register<F>(mut self, action: &str, arity: usize, handler: F) -> Self
    where
        F: Fn(&[RawValue]) -> Result<RawValue, BoxError> + Send + Sync + 'static,
    {
        self.handlers
            .insert(action.to_owned(), (arity, Box::new(handler)));
        self
    }

    /// Register `add`, `minus`, `mult` and `divide` over decimals, the
    /// actions arithmetic expressions are delegated to.
    #[must_use]
    pub fn with_arithmetic(self) -> Self {
        self.register("add", 2, |args| {
            arithmetic(args, "add", |a, b| a.checked_add(b))
        })
        .register("minus", 2, |args| {
            arithmetic(args, "minus", |a, b| a.checked_sub(b))
        })
        .register("mult", 2, |args| {
            arithmetic(args, "mult", |a, b| a.checked_mul(b))
        })
        .register("divide", 2, |args| {
            if args.get(1).and_then(RawValue::as_decimal) == Some(Decimal::ZERO) {
                return Err("division by zero".into());
            }
            arithmetic(args, "divide", |a, b| a.checked_div(b))
        })
    }
}

fn arithmetic(
    args: &[RawValue],
    op: &str,
    f: impl Fn(Decimal, Decimal) -> Option<Decimal>,
) -> Result<RawValue, BoxError> {
    let [lhs, rhs] = args else {
        return Err(format!("{op} takes two operands").into());
    };
    let (Some(a), Some(b)) = (lhs.as_decimal(), rhs.as_decimal()) else {
        return Err(format!("{op} requires numeric operands, got {lhs} and {rhs}").into());
    };
    f(a, b)
        .map(RawValue::Decimal)
        .ok_or_else(|| format!("{op} overflowed").into())
}

impl Default for Actions {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionProvider for Actions {
    fn provider_name(&self) -> &str {
        &self.name
    }

    fn arity(&self, action: &str) -> Option<usize> {
        self.handlers.get(action).map(|(arity, _)| *arity)
    }

    fn invoke(&self, action: &str, args: Vec<RawValue>) -> Result<RawValue, BoxError> {
        let (_, handler) = self
            .handlers
            .get(action)
            .ok_or_else(|| format!("action '{action}' not registered"))?;
        handler(&args)
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<(&str, usize)> = self
            .handlers
            .iter()
            .map(|(name, (arity, _))| (name.as_str(), *arity))
            .collect();
        names.sort_unstable();
        f.debug_struct("Actions")
            .field("name", &self.name)
            .field("actions", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_arity() {
        let actions = Actions::named("Orders").register("ship", 1, |_| Ok(RawValue::Null));
        assert_eq!(actions.arity("ship"), Some(1));
        assert_eq!(actions.arity("cancel"), None);
        assert_eq!(actions.provider_name(), "Orders");
    }

    #[test]
    fn arithmetic_actions() {
        let actions = Actions::new().with_arithmetic();
        let sum = actions
            .invoke("add", vec![RawValue::Int(2), RawValue::Float(0.5)])
            .unwrap();
        assert_eq!(sum, RawValue::Decimal(Decimal::new(25, 1)));
        let quotient = actions
            .invoke("divide", vec![RawValue::Int(7), RawValue::Int(2)])
            .unwrap();
        assert_eq!(quotient, RawValue::Decimal(Decimal::new(35, 1)));
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        let actions = Actions::new().with_arithmetic();
        let err = actions
            .invoke("divide", vec![RawValue::Int(1), RawValue::Int(0)])
            .unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn non_numeric_operand_is_an_error() {
        let actions = Actions::new().with_arithmetic();
        let err = actions
            .invoke("mult", vec![RawValue::Int(1), "x".into()])
            .unwrap_err();
        assert_eq!(err.to_string(), "mult requires numeric operands, got 1 and \"x\"");
    }
}
