use std::fmt;

use super::value::RawValue;

/// Binary arithmetic operators. Each one is evaluated by the host action of
/// the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Minus,
    Mult,
    Divide,
}

impl ArithOp {
    /// Name of the action that performs this operation.
    #[must_use]
    pub fn action_name(self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Minus => "minus",
            ArithOp::Mult => "mult",
            ArithOp::Divide => "divide",
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Minus => write!(f, "-"),
            ArithOp::Mult => write!(f, "*"),
            ArithOp::Divide => write!(f, "/"),
        }
    }
}

/// Parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Variable(String),
    Literal(RawValue),
}

impl Expr {
    #[must_use]
    pub fn binary(op: ArithOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Literal(value) => write!(f, "{value}"),
        }
    }
}
