use std::str::FromStr;

use rust_decimal::Decimal;
use winnow::ascii::digit1;
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::{ArithOp, Expr, RawValue};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

// -- Atoms ------------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.'
        }),
    )
        .take()
        .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<RawValue> {
    let text = (digit1, opt(('.', digit1))).take().parse_next(input)?;
    if text.contains('.') {
        Decimal::from_str(text)
            .map(RawValue::Decimal)
            .map_err(|_| ErrMode::from_input(input).cut())
    } else {
        text.parse::<i64>()
            .map(RawValue::Int)
            .map_err(|_| ErrMode::from_input(input).cut())
    }
}

fn atom(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((
        delimited('(', cut_err(sum), (ws, cut_err(')'))),
        number.map(Expr::Literal),
        ident.map(|name: &str| Expr::Variable(name.to_owned())),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "number, variable name or '('",
    )))
    .parse_next(input)
}

// -- Binary operators (precedence: + - < * /) -------------------------------

fn multiplicative_op(input: &mut &str) -> ModalResult<ArithOp> {
    alt(('*'.value(ArithOp::Mult), '/'.value(ArithOp::Divide))).parse_next(input)
}

fn additive_op(input: &mut &str) -> ModalResult<ArithOp> {
    alt(('+'.value(ArithOp::Add), '-'.value(ArithOp::Minus))).parse_next(input)
}

fn product(input: &mut &str) -> ModalResult<Expr> {
    let first = atom(input)?;
    let rest: Vec<(ArithOp, Expr)> =
        repeat(0.., (preceded(ws, multiplicative_op), cut_err(atom))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, (op, r)| Expr::binary(op, acc, r)))
}

fn sum(input: &mut &str) -> ModalResult<Expr> {
    let first = product(input)?;
    let rest: Vec<(ArithOp, Expr)> =
        repeat(0.., (preceded(ws, additive_op), cut_err(product))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, (op, r)| Expr::binary(op, acc, r)))
}

// -- Top-level parser -------------------------------------------------------

pub fn expression(input: &mut &str) -> ModalResult<Expr> {
    let expr = sum(input)?;
    ws.parse_next(input)?;
    Ok(expr)
}
