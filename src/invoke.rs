use tracing::{debug, instrument};

use crate::resolve::try_resolve;
use crate::{
    ActionError, ActionProvider, ActionSpec, BoxError, RawValue, RulebookError, VariableProvider,
};

/// Invoke a host action by name.
///
/// String parameters that name a defined, non-null variable are replaced by
/// its value; other parameters pass through unchanged. The resolved argument
/// count must match the action's declared arity.
pub(crate) fn invoke(
    variables: &dyn VariableProvider,
    actions: &dyn ActionProvider,
    name: &str,
    params: &[RawValue],
) -> Result<RawValue, RulebookError> {
    let expected = actions.arity(name).ok_or_else(|| ActionError::Undefined {
        action: name.to_owned(),
        provider: actions.provider_name().to_owned(),
    })?;

    let args: Vec<RawValue> = params.iter().map(|p| substitute(variables, p)).collect();
    if args.len() != expected {
        return Err(ActionError::Arity {
            action: name.to_owned(),
            expected,
            found: args.len(),
        }
        .into());
    }

    debug!(action = name, args = args.len(), "invoking action");
    actions
        .invoke(name, args)
        .map_err(|source| unwrap_failure(name, source))
}

/// Run an action list. Only the first action is executed and its result
/// returned; an empty list yields null.
#[instrument(level = "debug", skip_all, fields(actions = specs.len()))]
pub(crate) fn do_actions(
    variables: &dyn VariableProvider,
    actions: &dyn ActionProvider,
    specs: &[ActionSpec],
) -> Result<RawValue, RulebookError> {
    let Some(first) = specs.first() else {
        return Ok(RawValue::Null);
    };
    if specs.len() > 1 {
        debug!(skipped = specs.len() - 1, "only the first action of the list runs");
    }
    invoke(variables, actions, &first.name, &first.params)
}

fn substitute(variables: &dyn VariableProvider, param: &RawValue) -> RawValue {
    match param {
        RawValue::Text(name) => match try_resolve(variables, name) {
            Some(typed) if !typed.is_absent() => typed.to_raw(),
            _ => param.clone(),
        },
        _ => param.clone(),
    }
}

/// Engine errors raised from inside an action (a nested evaluation) pass
/// through as they are; anything else is wrapped with the action name.
fn unwrap_failure(name: &str, source: BoxError) -> RulebookError {
    let source = match source.downcast::<RulebookError>() {
        Ok(inner) => return *inner,
        Err(other) => other,
    };
    match source.downcast::<ActionError>() {
        Ok(inner) => RulebookError::Action(*inner),
        Err(other) => ActionError::Failed {
            action: name.to_owned(),
            source: other,
        }
        .into(),
    }
}
