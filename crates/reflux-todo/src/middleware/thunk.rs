//! Thunk Middleware
//!
//! Runs `TodoAction::Thunk` with the store's api instead of passing it on.
//! Actions dispatched from inside the thunk re-enter the full chain.

use crate::actions::TodoAction;
use crate::state::TodoState;
use reflux::{Middleware, MiddlewareApi, Next, StoreError};

/// Middleware that executes deferred work
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThunkMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware<TodoState, TodoAction> for ThunkMiddleware {
    fn handle(
        &self,
        api: &MiddlewareApi<TodoState, TodoAction>,
        next: &Next<TodoAction>,
        action: TodoAction,
    ) -> Result<TodoAction, StoreError> {
        if let TodoAction::Thunk(thunk) = &action {
            log::debug!("ThunkMiddleware: running {:?}", thunk);
            thunk.run(api)?;
            // Consume the thunk
            return Ok(action);
        }

        next.dispatch(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Thunk;
    use crate::reducers;
    use crate::state;
    use reflux::{apply_middleware, create_store, Store};

    fn add_twice(text: &'static str) -> TodoAction {
        TodoAction::Thunk(Thunk::new("add_twice", move |api| {
            let next_id = state::todos(&api.get_state()?).len() as u64 + 1;
            api.dispatch(TodoAction::AddTodo {
                id: next_id,
                text: text.to_string(),
            })?;
            api.dispatch(TodoAction::AddTodo {
                id: next_id + 1,
                text: text.to_string(),
            })?;
            Ok(())
        }))
    }

    fn thunk_store() -> Store<TodoState, TodoAction> {
        let thunk: Box<dyn Middleware<TodoState, TodoAction>> = Box::new(ThunkMiddleware::new());
        create_store(
            reducers::root().unwrap(),
            None,
            Some(apply_middleware(vec![thunk])),
        )
        .unwrap()
    }

    #[test]
    fn test_thunk_dispatches_through_store() {
        let store = thunk_store();

        let returned = store.dispatch(add_twice("water plants")).unwrap();

        assert!(matches!(returned, TodoAction::Thunk(_)));
        let ids: Vec<u64> = state::todos(&store.get_state().unwrap())
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_thunk_without_middleware_is_malformed() {
        let store = create_store(reducers::root().unwrap(), None, None).unwrap();

        assert!(matches!(
            store.dispatch(add_twice("nope")),
            Err(StoreError::MalformedAction(_))
        ));
    }

    #[test]
    fn test_thunk_error_propagates() {
        let store = thunk_store();
        let failing = TodoAction::Thunk(Thunk::new("failing", |_api| {
            Err(StoreError::Reducer(anyhow::anyhow!("backend unavailable")))
        }));

        assert!(matches!(store.dispatch(failing), Err(StoreError::Reducer(_))));
    }
}
