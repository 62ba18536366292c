use crate::action::{self, Action};
use crate::error::StoreError;
use crate::middleware::{Middleware, MiddlewareApi, Next};
use std::fmt::Debug;

/// LoggingMiddleware - logs every action passing through and the state it
/// produced
pub struct LoggingMiddleware {
    log_state: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { log_state: true }
    }

    /// Log actions only, skipping the resulting state
    pub fn actions_only() -> Self {
        Self { log_state: false }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: Clone + Debug + 'static,
    A: Action,
{
    fn handle(&self, api: &MiddlewareApi<S, A>, next: &Next<A>, action: A) -> Result<A, StoreError> {
        log::debug!("Action: {:?}", action);
        let kind = action::describe(&action);

        let result = next.dispatch(action);

        match &result {
            Ok(_) if self.log_state => match api.get_state() {
                Ok(state) => log::trace!("State after {}: {:?}", kind, state),
                Err(e) => log::trace!("State after {} unavailable: {}", kind, e),
            },
            Ok(_) => {}
            Err(e) => log::warn!("Dispatching {} failed: {}", kind, e),
        }

        result
    }
}
