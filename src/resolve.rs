use tracing::{trace, warn};

use crate::{RawValue, TypedValue, VariableProvider};

/// Resolve a variable through the provider and cast it to its typed form.
/// An undefined variable is logged and becomes [`TypedValue::Absent`].
pub(crate) fn resolve(variables: &dyn VariableProvider, name: &str) -> TypedValue {
    match variables.lookup(name) {
        Some(raw) => cast(variables, name, &raw),
        None => {
            warn!(variable = name, "variable not defined, treating as absent");
            TypedValue::Absent
        }
    }
}

/// Like [`resolve`], but silent when the name is not a variable. Used to
/// check whether a string parameter names one.
pub(crate) fn try_resolve(variables: &dyn VariableProvider, name: &str) -> Option<TypedValue> {
    let raw = variables.lookup(name)?;
    let typed = cast(variables, name, &raw);
    trace!(variable = name, value = %raw, "parameter resolved as variable");
    Some(typed)
}

fn cast(variables: &dyn VariableProvider, name: &str, raw: &RawValue) -> TypedValue {
    match variables.field_type(name) {
        Some(field_type) => TypedValue::cast_as(field_type, raw),
        None => TypedValue::cast(raw),
    }
}
