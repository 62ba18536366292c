//! Reflux - a predictable state container
//!
//! The whole application state lives in one [`Store`]. The only way to change
//! it is to dispatch an action; a pure [`Reducer`] computes the next state from
//! the previous one and the action, and every subscribed listener is notified
//! afterwards.
//!
//! ```text
//! dispatch(action) → middleware chain → reducer(state, action) → listeners
//! ```
//!
//! Besides the store itself the crate provides:
//! - [`combine_reducers`] to split the state tree into keyed slices
//! - [`apply_middleware`] to intercept dispatched actions
//! - [`Enhancer`] and [`compose_enhancers`] to wrap store construction
//! - [`StateObservable`] for reactive consumers
//! - [`Registry`] to assemble a store from configured names
//!
//! ```rust
//! use reflux::{create_store, Reducer};
//! use serde_json::{json, Value};
//!
//! let counter = Reducer::new(|state: Option<&i64>, action: &Value| {
//!     let state = state.copied().unwrap_or(0);
//!     match action["type"].as_str() {
//!         Some("INCREMENT") => state + 1,
//!         Some("DECREMENT") => state - 1,
//!         _ => state,
//!     }
//! });
//!
//! let store = create_store(counter, None, None)?;
//! store.dispatch(json!({ "type": "INCREMENT" }))?;
//! store.dispatch(json!({ "type": "INCREMENT" }))?;
//! store.dispatch(json!({ "type": "DECREMENT" }))?;
//! assert_eq!(store.get_state()?, 1);
//! # Ok::<(), reflux::StoreError>(())
//! ```

pub mod action;
mod builder;
mod combine;
mod enhancer;
mod error;
mod listeners;
pub mod middleware;
mod observable;
mod reducer;
mod registry;
mod store;

pub use action::{Action, ActionTypes};
pub use builder::{base_factory, create_store, StoreBuilder};
pub use combine::{combine_reducers, CombinedState, SliceReducer};
pub use enhancer::{compose_enhancers, Enhancer, StoreFactory};
pub use error::StoreError;
pub use listeners::{ListenerId, Unsubscribe};
pub use middleware::{apply_middleware, LoggingMiddleware, Middleware, MiddlewareApi, Next};
pub use observable::{ObservableSubscription, Observer, StateObservable};
pub use reducer::Reducer;
pub use registry::{Blueprint, Registry};
pub use store::{DispatchFn, Store};
