//! Slice reducers and the root reducer combining them

mod todos;
mod visibility_filter;

pub use todos::reduce_todos;
pub use visibility_filter::reduce_visibility_filter;

use crate::actions::TodoAction;
use crate::state::{Slice, TodoState, TODOS, VISIBILITY_FILTER};
use reflux::{combine_reducers, Reducer, SliceReducer, StoreError};

/// Slice reducer for `todos`; a slice of another shape yields no state
pub fn todos() -> SliceReducer<Slice, TodoAction> {
    SliceReducer::new(|state: Option<&Slice>, action: &TodoAction| {
        let todos = match state {
            None => Vec::new(),
            Some(Slice::Todos(todos)) => todos.clone(),
            Some(_) => return None,
        };
        Some(Slice::Todos(reduce_todos(todos, action)))
    })
}

/// Slice reducer for `visibility_filter`
pub fn visibility_filter() -> SliceReducer<Slice, TodoAction> {
    SliceReducer::new(|state: Option<&Slice>, action: &TodoAction| {
        let filter = match state {
            None => Default::default(),
            Some(Slice::VisibilityFilter(filter)) => *filter,
            Some(_) => return None,
        };
        Some(Slice::VisibilityFilter(reduce_visibility_filter(filter, action)))
    })
}

/// The root reducer of the todo store
pub fn root() -> Result<Reducer<TodoState, TodoAction>, StoreError> {
    combine_reducers([(TODOS, todos()), (VISIBILITY_FILTER, visibility_filter())])
}
