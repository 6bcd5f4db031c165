use regex::Regex;
use rust_decimal::Decimal;

use crate::{FieldType, InputKind, Operator, OperatorError, RawValue, Truth, TypedValue};

/// Numeric equality tolerance.
pub(crate) const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Apply the operator named `operator` to `subject`, comparing against `value`.
///
/// Returns [`Truth::NotApplicable`] when a non-boolean subject is absent, or
/// when an argument it needs is null or does not cast to the subject's type.
/// An absent subject carries no type here; see [`compare_as`] for receivers
/// whose type was declared.
///
/// # Errors
///
/// [`OperatorError::Undefined`] when the subject's type has no such operator,
/// plus argument-count, list and regex errors.
pub fn compare(
    subject: &TypedValue,
    operator: &str,
    value: &RawValue,
) -> Result<Truth, OperatorError> {
    compare_as(None, subject, operator, value)
}

/// [`compare`] for a receiver with a declared type. An absent boolean
/// receiver is still boolean: `is_true` and `is_false` both give
/// [`Truth::False`] instead of not applicable.
///
/// # Errors
///
/// See [`compare`].
pub fn compare_as(
    declared: Option<FieldType>,
    subject: &TypedValue,
    operator: &str,
    value: &RawValue,
) -> Result<Truth, OperatorError> {
    let op = Operator::from_name(operator).ok_or_else(|| OperatorError::Undefined {
        operator: operator.to_owned(),
        type_name: subject.field_type().or(declared).map_or("absent", FieldType::name),
    })?;

    let Some(field_type) = subject.field_type().or(declared) else {
        return Ok(Truth::NotApplicable);
    };
    if !field_type.supports(op) {
        return Err(OperatorError::Undefined {
            operator: operator.to_owned(),
            type_name: field_type.name(),
        });
    }

    let args = arguments(op, value);
    let expected = match op.input() {
        InputKind::None => 0,
        InputKind::Single | InputKind::List => 1,
        InputKind::Pair => 2,
    };
    if args.len() != expected {
        return Err(OperatorError::ArgumentCount {
            operator: op.name(),
            expected,
            found: args.len(),
        });
    }

    if op.input() == InputKind::List {
        return match (subject, &args[0]) {
            (_, RawValue::Null) | (TypedValue::Absent, _) => Ok(Truth::NotApplicable),
            (TypedValue::Text(s), RawValue::List(items)) => Ok(is_in(s, items).into()),
            _ => Err(OperatorError::InvalidArgument {
                operator: op.name(),
                message: format!("expects a list, got {}", args[0]),
            }),
        };
    }

    let typed: Vec<TypedValue> = args
        .iter()
        .map(|arg| TypedValue::cast_as(field_type, arg))
        .collect();
    if field_type != FieldType::Boolean && typed.iter().any(TypedValue::is_absent) {
        return Ok(Truth::NotApplicable);
    }

    match subject {
        TypedValue::Numeric(n) => Ok(numeric(op, *n, &decimals(&typed)).into()),
        TypedValue::Text(s) => text(op, s, &strings(&typed)).map(Truth::from),
        TypedValue::Boolean(b) => Ok(boolean(op, *b).into()),
        TypedValue::Absent if field_type == FieldType::Boolean => Ok(Truth::False),
        TypedValue::Absent => Ok(Truth::NotApplicable),
    }
}

/// Zero-argument operators ignore the value; list operators take it whole;
/// a list value is otherwise spread into positional arguments.
fn arguments(op: Operator, value: &RawValue) -> Vec<RawValue> {
    match (op.input(), value) {
        (InputKind::None, _) => Vec::new(),
        (InputKind::List, _) => vec![value.clone()],
        (_, RawValue::List(items)) => items.clone(),
        _ => vec![value.clone()],
    }
}

fn decimals(args: &[TypedValue]) -> Vec<Decimal> {
    args.iter()
        .filter_map(|a| match a {
            TypedValue::Numeric(n) => Some(*n),
            _ => None,
        })
        .collect()
}

fn strings(args: &[TypedValue]) -> Vec<&str> {
    args.iter()
        .filter_map(|a| match a {
            TypedValue::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

fn is_in(subject: &str, items: &[RawValue]) -> bool {
    items.iter().any(|item| item.as_str() == Some(subject))
}

// -- Numeric ----------------------------------------------------------------

fn equal(a: Decimal, b: Decimal) -> bool {
    a.checked_sub(b).is_some_and(|d| d.abs() <= EPSILON)
}

/// `(a - b) > EPSILON`. An overflowing difference is far outside epsilon.
fn greater(a: Decimal, b: Decimal) -> bool {
    match a.checked_sub(b) {
        Some(d) => d > EPSILON,
        None => a > b,
    }
}

fn numeric(op: Operator, n: Decimal, args: &[Decimal]) -> bool {
    match (op, args) {
        (Operator::EqualTo, [b]) => equal(n, *b),
        (Operator::GreaterThan, [b]) => greater(n, *b),
        (Operator::GreaterThanOrEqualTo, [b]) => greater(n, *b) || equal(n, *b),
        (Operator::LessThan, [b]) => greater(*b, n),
        (Operator::LessThanOrEqualTo, [b]) => greater(*b, n) || equal(n, *b),
        (Operator::Between, [lo, hi]) => greater(n, *lo) && greater(*hi, n),
        (Operator::BetweenEqual, [lo, hi]) => {
            (greater(n, *lo) || equal(n, *lo)) && (greater(*hi, n) || equal(n, *hi))
        }
        _ => false,
    }
}

// -- Text -------------------------------------------------------------------

fn text(op: Operator, s: &str, args: &[&str]) -> Result<bool, OperatorError> {
    Ok(match (op, args) {
        (Operator::EqualTo, [other]) => s == *other,
        (Operator::EqualToCaseInsensitive, [other]) => s.to_lowercase() == other.to_lowercase(),
        (Operator::StartsWith, [prefix]) => s.starts_with(prefix),
        (Operator::EndsWith, [suffix]) => s.ends_with(suffix),
        (Operator::Contains, [needle]) => s.contains(needle),
        (Operator::DoesNotContain, [needle]) => !s.contains(needle),
        (Operator::MatchesRegex, [pattern]) => {
            let re = Regex::new(pattern).map_err(|source| OperatorError::InvalidRegex {
                pattern: (*pattern).to_owned(),
                source,
            })?;
            re.is_match(s)
        }
        (Operator::NonEmpty, []) => !s.is_empty(),
        _ => false,
    })
}

// -- Boolean ----------------------------------------------------------------

fn boolean(op: Operator, b: bool) -> bool {
    match op {
        Operator::IsTrue => b,
        Operator::IsFalse => !b,
        _ => false,
    }
}
