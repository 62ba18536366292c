//! Actions and the checks applied to every dispatched action
//!
//! An action is any value implementing [`Action`]. Typed applications usually
//! implement it on their own action enum; untyped callers can dispatch
//! `serde_json::Value` objects carrying a `"type"` member.

use crate::error::StoreError;
use serde_json::{json, Value};
use std::borrow::Cow;
use std::fmt;
use strum::{Display, EnumString, IntoStaticStr};

/// Action types reserved for the store itself
///
/// Reducers must not match on these beyond falling through to their default
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ActionTypes {
    /// Dispatched once when a store is created
    #[strum(serialize = "@@reflux/INIT")]
    Init,
    /// Dispatched once per `replace_reducer` call
    #[strum(serialize = "@@reflux/REPLACE")]
    Replace,
    /// Used by `combine_reducers` to check slice reducers have a default state
    #[strum(serialize = "@@reflux/PROBE_UNKNOWN_ACTION")]
    ProbeUnknownAction,
}

impl ActionTypes {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A message describing an intended state transition
pub trait Action: fmt::Debug + 'static {
    /// The discriminant of this action, `None` when it is undefined
    fn action_type(&self) -> Option<Cow<'_, str>>;

    /// Whether this action is plain data the base dispatch accepts
    ///
    /// Values that only middleware knows how to handle (deferred work,
    /// callbacks) report `false` here.
    fn is_plain(&self) -> bool {
        true
    }

    /// Build one of the reserved store actions
    fn reserved(kind: ActionTypes) -> Self
    where
        Self: Sized;

    /// The reserved kind of this action, if it is one
    fn reserved_kind(&self) -> Option<ActionTypes> {
        self.action_type().and_then(|t| t.parse().ok())
    }
}

/// Validate an action before it reaches the reducer
pub fn validate<A: Action>(action: &A) -> Result<(), StoreError> {
    if !action.is_plain() {
        return Err(StoreError::MalformedAction(format!("{:?}", action)));
    }

    if action.action_type().is_none() {
        return Err(StoreError::MissingActionType(format!("{:?}", action)));
    }

    Ok(())
}

/// Human readable type of an action for log and error messages
pub fn describe<A: Action>(action: &A) -> String {
    action
        .action_type()
        .map(Cow::into_owned)
        .unwrap_or_else(|| "<undefined>".to_string())
}

/// JSON actions are plain when they are objects; `"type"` is undefined only
/// when the member is absent. Non-string types, `null` included, are rendered
/// as JSON text.
impl Action for Value {
    fn action_type(&self) -> Option<Cow<'_, str>> {
        match self.get("type")? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    fn is_plain(&self) -> bool {
        self.is_object()
    }

    fn reserved(kind: ActionTypes) -> Self {
        json!({ "type": kind.as_str() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_with_type_is_valid() {
        let action = json!({ "type": "ADD_TODO", "text": "write tests" });
        assert!(validate(&action).is_ok());
        assert_eq!(action.action_type().as_deref(), Some("ADD_TODO"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        for action in [json!("ADD_TODO"), json!(42), json!(["ADD_TODO"]), Value::Null] {
            assert!(matches!(
                validate(&action),
                Err(StoreError::MalformedAction(_))
            ));
        }
    }

    #[test]
    fn test_missing_type_regardless_of_other_fields() {
        let absent = json!({ "text": "no type here", "id": 1 });

        assert!(matches!(
            validate(&absent),
            Err(StoreError::MissingActionType(_))
        ));
    }

    #[test]
    fn test_null_type_is_defined() {
        let action = json!({ "type": null, "text": "typed as null" });

        assert!(validate(&action).is_ok());
        assert_eq!(action.action_type().as_deref(), Some("null"));
    }

    #[test]
    fn test_non_string_type_is_defined() {
        let action = json!({ "type": 7 });
        assert!(validate(&action).is_ok());
        assert_eq!(describe(&action), "7");
    }

    #[test]
    fn test_reserved_actions() {
        let init = Value::reserved(ActionTypes::Init);
        assert_eq!(init["type"], "@@reflux/INIT");
        assert_eq!(init.reserved_kind(), Some(ActionTypes::Init));

        let replace = Value::reserved(ActionTypes::Replace);
        assert_eq!(replace.reserved_kind(), Some(ActionTypes::Replace));

        assert_eq!(json!({ "type": "INC" }).reserved_kind(), None);
    }

    #[test]
    fn test_describe_undefined_type() {
        assert_eq!(describe(&json!({})), "<undefined>");
    }
}
