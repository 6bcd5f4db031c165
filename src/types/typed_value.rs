use rust_decimal::Decimal;

use super::operator::FieldType;
use super::value::RawValue;

/// A host value cast into one of the comparable types.
///
/// Casting never fails: anything that does not fit the target type becomes
/// [`TypedValue::Absent`], so a rule tree can still be evaluated and explained
/// around a missing or malformed field.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Numeric(Decimal),
    Boolean(bool),
    Text(String),
    Absent,
}

impl TypedValue {
    /// Cast by inferring the type from the raw variant.
    #[must_use]
    pub fn cast(raw: &RawValue) -> Self {
        match raw {
            RawValue::Bool(b) => TypedValue::Boolean(*b),
            RawValue::Text(s) => TypedValue::Text(s.clone()),
            RawValue::Int(_) | RawValue::Float(_) | RawValue::Decimal(_) => {
                raw.as_decimal().map_or(TypedValue::Absent, TypedValue::Numeric)
            }
            RawValue::Null | RawValue::List(_) => TypedValue::Absent,
        }
    }

    /// Cast to a declared type. Values of any other shape become `Absent`.
    #[must_use]
    pub fn cast_as(field_type: FieldType, raw: &RawValue) -> Self {
        match (field_type, raw) {
            (FieldType::Numeric, _) => raw.as_decimal().map_or(TypedValue::Absent, TypedValue::Numeric),
            (FieldType::Boolean, RawValue::Bool(b)) => TypedValue::Boolean(*b),
            (FieldType::Text, RawValue::Text(s)) => TypedValue::Text(s.clone()),
            _ => TypedValue::Absent,
        }
    }

    #[must_use]
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            TypedValue::Numeric(_) => Some(FieldType::Numeric),
            TypedValue::Boolean(_) => Some(FieldType::Boolean),
            TypedValue::Text(_) => Some(FieldType::Text),
            TypedValue::Absent => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, TypedValue::Absent)
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.field_type().map_or("absent", FieldType::name)
    }

    /// The underlying value, with numerics as decimals and `Absent` as null.
    #[must_use]
    pub fn to_raw(&self) -> RawValue {
        match self {
            TypedValue::Numeric(d) => RawValue::Decimal(*d),
            TypedValue::Boolean(b) => RawValue::Bool(*b),
            TypedValue::Text(s) => RawValue::Text(s.clone()),
            TypedValue::Absent => RawValue::Null,
        }
    }
}
