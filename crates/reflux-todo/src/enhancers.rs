//! Enhancers available to the todo store

use crate::actions::TodoAction;
use crate::state::{Slice, Todo, TodoState, TODOS};
use reflux::{Enhancer, Reducer, StoreFactory};

/// Log how long store construction took, including the `INIT` reduction
pub fn timing() -> Enhancer<TodoState, TodoAction> {
    Enhancer::new(|create: StoreFactory<TodoState, TodoAction>| -> StoreFactory<TodoState, TodoAction> {
        Box::new(move |reducer: Reducer<TodoState, TodoAction>, preloaded_state: Option<TodoState>| {
            let started = chrono::Local::now();
            let store = create(reducer, preloaded_state);
            let elapsed = chrono::Local::now() - started;
            log::info!(
                "Store constructed at {} in {}µs",
                started.format("%H:%M:%S"),
                elapsed.num_microseconds().unwrap_or(i64::MAX)
            );
            store
        })
    })
}

/// Start with a welcome todo when nothing was preloaded
pub fn welcome() -> Enhancer<TodoState, TodoAction> {
    Enhancer::new(|create: StoreFactory<TodoState, TodoAction>| -> StoreFactory<TodoState, TodoAction> {
        Box::new(move |reducer: Reducer<TodoState, TodoAction>, preloaded_state: Option<TodoState>| {
            let preloaded_state = preloaded_state.unwrap_or_else(|| {
                let todo = Todo {
                    id: 1,
                    text: "Type `help` to see what you can do".to_string(),
                    completed: false,
                };
                [(TODOS, Slice::Todos(vec![todo]))].into_iter().collect()
            });
            create(reducer, Some(preloaded_state))
        })
    })
}
