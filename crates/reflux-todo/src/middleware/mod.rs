//! Middleware specific to the todo application
//!
//! The generic `LoggingMiddleware` comes from `reflux` itself.

pub mod thunk;

pub use thunk::ThunkMiddleware;
