//! Errors raised by the store, the middleware pipeline and the reducer composer
//!
//! Every variant describes a programming defect detected at the point of misuse.
//! None of them is retried; the store guarantees its own invariants still hold
//! after any of them is returned.

use thiserror::Error;

/// Errors that can occur while building or driving a store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Expected the reducer `{0}` to be a registered reducer")]
    InvalidReducer(String),

    #[error("Expected `{0}` to be a registered enhancer or middleware")]
    EnhancerNotFunction(String),

    #[error(
        "Passing several store enhancers is not supported. \
         Compose them into a single enhancer instead"
    )]
    MultipleEnhancers,

    #[error("Actions must be plain values, use custom middleware for deferred actions: {0}")]
    MalformedAction(String),

    #[error("Actions may not have an undefined \"type\" property: {0}")]
    MissingActionType(String),

    #[error("Reducers may not dispatch actions")]
    ReentrantDispatch,

    #[error("Expected the listener `{0}` to be a registered listener")]
    InvalidListener(String),

    #[error("You may not call store.{0}() while the reducer is executing")]
    InvalidCallDuringDispatch(&'static str),

    #[error("Given action \"{action_type}\", reducer \"{key}\" returned no state")]
    UndefinedReducerOutput { key: String, action_type: String },

    #[error("Dispatching while constructing your middleware is not allowed")]
    DispatchDuringMiddlewareSetup,

    #[error("The store behind this middleware api has been dropped")]
    StoreDropped,

    #[error("Reducer failed: {0}")]
    Reducer(#[from] anyhow::Error),
}
