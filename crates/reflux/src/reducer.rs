//! Reducers - pure functions producing the next state from the current state
//! and an action

use crate::error::StoreError;
use std::fmt;
use std::rc::Rc;

type ReducerFn<S, A> = dyn Fn(Option<&S>, &A) -> Result<S, StoreError>;

/// Transition function held by a store
///
/// `None` as input state means the store holds no state yet and the reducer
/// must return its default. Cloning is cheap; clones share the same function.
pub struct Reducer<S, A> {
    inner: Rc<ReducerFn<S, A>>,
}

impl<S: 'static, A: 'static> Reducer<S, A> {
    /// Wrap an infallible reducer
    pub fn new<F>(reduce: F) -> Self
    where
        F: Fn(Option<&S>, &A) -> S + 'static,
    {
        Self::fallible(move |state, action| Ok(reduce(state, action)))
    }

    /// Wrap a reducer that may fail
    ///
    /// A failure aborts the dispatch: the previous state is kept and no
    /// listener is notified.
    pub fn fallible<F>(reduce: F) -> Self
    where
        F: Fn(Option<&S>, &A) -> Result<S, StoreError> + 'static,
    {
        Self {
            inner: Rc::new(reduce),
        }
    }
}

impl<S, A> Reducer<S, A> {
    pub fn reduce(&self, state: Option<&S>, action: &A) -> Result<S, StoreError> {
        (self.inner)(state, action)
    }
}

impl<S, A> Clone for Reducer<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for Reducer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer").finish_non_exhaustive()
    }
}
