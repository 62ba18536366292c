//! Todo actions
//!
//! Plain variants reach the reducers. `Thunk` carries deferred work and is
//! only understood by the thunk middleware; the store rejects it as
//! malformed when that middleware is not configured.

use crate::state::{TodoState, VisibilityFilter};
use reflux::{Action, ActionTypes, MiddlewareApi, StoreError};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use strum::IntoStaticStr;

type ThunkFn = dyn Fn(&MiddlewareApi<TodoState, TodoAction>) -> Result<(), StoreError>;

/// Root action enum
#[derive(Debug, Clone, IntoStaticStr)]
pub enum TodoAction {
    #[strum(serialize = "ADD_TODO")]
    AddTodo { id: u64, text: String },
    #[strum(serialize = "TOGGLE_TODO")]
    ToggleTodo { id: u64 },
    #[strum(serialize = "SET_VISIBILITY_FILTER")]
    SetVisibilityFilter(VisibilityFilter),
    #[strum(serialize = "CLEAR_COMPLETED")]
    ClearCompleted,
    #[strum(serialize = "THUNK")]
    Thunk(Thunk),
    /// One of the store's reserved actions
    Internal(ActionTypes),
}

impl Action for TodoAction {
    fn action_type(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Internal(kind) => Some(Cow::Borrowed(kind.as_str())),
            other => {
                let name: &'static str = other.into();
                Some(Cow::Borrowed(name))
            }
        }
    }

    fn is_plain(&self) -> bool {
        !matches!(self, Self::Thunk(_))
    }

    fn reserved(kind: ActionTypes) -> Self {
        Self::Internal(kind)
    }

    fn reserved_kind(&self) -> Option<ActionTypes> {
        match self {
            Self::Internal(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Deferred work run by the thunk middleware with the store's api
#[derive(Clone)]
pub struct Thunk {
    name: &'static str,
    run: Rc<ThunkFn>,
}

impl Thunk {
    pub fn new<F>(name: &'static str, run: F) -> Self
    where
        F: Fn(&MiddlewareApi<TodoState, TodoAction>) -> Result<(), StoreError> + 'static,
    {
        Self {
            name,
            run: Rc::new(run),
        }
    }

    pub fn run(&self, api: &MiddlewareApi<TodoState, TodoAction>) -> Result<(), StoreError> {
        (self.run)(api)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thunk({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_types() {
        let add = TodoAction::AddTodo {
            id: 1,
            text: "a".to_string(),
        };
        assert_eq!(add.action_type().as_deref(), Some("ADD_TODO"));
        assert_eq!(
            TodoAction::SetVisibilityFilter(VisibilityFilter::Active)
                .action_type()
                .as_deref(),
            Some("SET_VISIBILITY_FILTER")
        );
    }

    #[test]
    fn test_reserved_actions_round_trip() {
        let init = TodoAction::reserved(ActionTypes::Init);
        assert_eq!(init.reserved_kind(), Some(ActionTypes::Init));
        assert_eq!(init.action_type().as_deref(), Some("@@reflux/INIT"));
        assert_eq!(TodoAction::ClearCompleted.reserved_kind(), None);
    }

    #[test]
    fn test_thunk_is_not_plain() {
        let thunk = TodoAction::Thunk(Thunk::new("noop", |_api| Ok(())));
        assert!(!thunk.is_plain());
        assert!(TodoAction::ClearCompleted.is_plain());
        assert_eq!(format!("{:?}", thunk), "Thunk(Thunk(noop))");
    }
}
