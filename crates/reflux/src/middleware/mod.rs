//! Middleware pipeline
//!
//! Middleware sits between `dispatch` and the reducer:
//!
//! ```text
//! dispatch(action) → m1 → m2 → … → base dispatch → reducer → listeners
//! ```
//!
//! Each middleware can:
//! - Inspect the action and read the current state
//! - Transform the action before passing it on
//! - Dispatch new actions (they re-enter the full chain)
//! - Short-circuit by not calling `next`
//! - Return a different action than it received
//!
//! ## Example
//!
//! ```rust
//! use reflux::middleware::{self, apply_middleware, Middleware};
//! use reflux::{create_store, Reducer};
//! use serde_json::{json, Value};
//!
//! let counter = Reducer::new(|state: Option<&i64>, action: &Value| {
//!     let state = state.copied().unwrap_or(0);
//!     if action["type"] == "INC" { state + 1 } else { state }
//! });
//!
//! // Turns every DOUBLE_INC into two INC actions
//! let double: Box<dyn Middleware<i64, Value>> = middleware::from_fn(|api, next, action: Value| {
//!     if action["type"] == "DOUBLE_INC" {
//!         api.dispatch(json!({ "type": "INC" }))?;
//!         return next.dispatch(json!({ "type": "INC" }));
//!     }
//!     next.dispatch(action)
//! });
//!
//! let store = create_store(counter, None, Some(apply_middleware(vec![double])))?;
//! store.dispatch(json!({ "type": "DOUBLE_INC" }))?;
//! assert_eq!(store.get_state()?, 2);
//! # Ok::<(), reflux::StoreError>(())
//! ```

mod logging;

pub use logging::LoggingMiddleware;

use crate::action::Action;
use crate::enhancer::{Enhancer, StoreFactory};
use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::store::{DispatchFn, Store, StoreCore};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type DispatchHandler<A> = dyn Fn(A) -> Result<A, StoreError>;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// This is the curried `(api) -> (next) -> (action)` interceptor with all
/// three stages handed over at once. Closures of the same shape implement it;
/// use [`from_fn`] to box one.
pub trait Middleware<S, A> {
    /// Called once per middleware while the chain is being built
    ///
    /// The api may be read and kept for later. Dispatching through it from
    /// here fails with `DispatchDuringMiddlewareSetup`; returning that error
    /// fails the store construction.
    fn setup(&self, _api: &MiddlewareApi<S, A>) -> Result<(), StoreError> {
        Ok(())
    }

    /// Handle an action
    ///
    /// - `api`: read the state or dispatch through the whole chain
    /// - `next`: the rest of the chain, ending in the base dispatch
    /// - `action`: the action being dispatched
    fn handle(&self, api: &MiddlewareApi<S, A>, next: &Next<A>, action: A)
        -> Result<A, StoreError>;
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(&MiddlewareApi<S, A>, &Next<A>, A) -> Result<A, StoreError>,
{
    fn handle(
        &self,
        api: &MiddlewareApi<S, A>,
        next: &Next<A>,
        action: A,
    ) -> Result<A, StoreError> {
        self(api, next, action)
    }
}

/// Box a closure as middleware
pub fn from_fn<S, A, F>(handle: F) -> Box<dyn Middleware<S, A>>
where
    S: 'static,
    A: 'static,
    F: Fn(&MiddlewareApi<S, A>, &Next<A>, A) -> Result<A, StoreError> + 'static,
{
    Box::new(handle)
}

/// The slice of the store handed to middleware
///
/// `dispatch` goes through the fully composed chain. It is bound once
/// composition finishes; dispatching while the chain is still being built
/// (from [`Middleware::setup`]) fails with `DispatchDuringMiddlewareSetup`.
pub struct MiddlewareApi<S, A> {
    core: Rc<StoreCore<S, A>>,
    dispatch: Rc<RefCell<Option<Weak<DispatchHandler<A>>>>>,
}

impl<S: Clone + 'static, A: Action> MiddlewareApi<S, A> {
    pub fn get_state(&self) -> Result<S, StoreError> {
        self.core.get_state()
    }

    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        let bound = self.dispatch.borrow().clone();
        let dispatch = bound
            .ok_or(StoreError::DispatchDuringMiddlewareSetup)?
            .upgrade()
            .ok_or(StoreError::StoreDropped)?;
        dispatch(action)
    }
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

/// The remainder of the chain after the current middleware
pub struct Next<A> {
    inner: DispatchFn<A>,
}

impl<A> Next<A> {
    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        (self.inner)(action)
    }
}

/// Build an enhancer running every dispatch through `middlewares`
///
/// For `[m1, m2, m3]` an action passes `m1`, then `m2`, then `m3`, then the
/// dispatch of the store produced by the wrapped factory. That is the base
/// dispatch, or the dispatch another enhancer already installed.
pub fn apply_middleware<S, A>(middlewares: Vec<Box<dyn Middleware<S, A>>>) -> Enhancer<S, A>
where
    S: Clone + 'static,
    A: Action,
{
    Enhancer::new(move |create: StoreFactory<S, A>| -> StoreFactory<S, A> {
        Box::new(move |reducer: Reducer<S, A>, preloaded_state: Option<S>| {
            create(reducer, preloaded_state).and_then(|store| bind_middleware(store, middlewares))
        })
    })
}

/// Compose the chain right-to-left around the current dispatch of `store`
fn bind_middleware<S, A>(
    store: Store<S, A>,
    middlewares: Vec<Box<dyn Middleware<S, A>>>,
) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action,
{
    let count = middlewares.len();
    let api = MiddlewareApi {
        core: store.core(),
        dispatch: Rc::new(RefCell::new(None)),
    };

    for middleware in &middlewares {
        middleware.setup(&api)?;
    }

    let dispatch = middlewares
        .into_iter()
        .rev()
        .fold(store.dispatcher(), |inner, middleware| {
            let api = api.clone();
            let next = Next { inner };
            Rc::new(move |action| middleware.handle(&api, &next, action)) as DispatchFn<A>
        });

    // The api only holds the chain weakly; the store owns it.
    *api.dispatch.borrow_mut() = Some(Rc::downgrade(&dispatch));
    log::debug!("Applied {} middleware", count);

    Ok(store.with_dispatch(dispatch))
}
