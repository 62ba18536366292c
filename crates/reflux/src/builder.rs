//! Store construction entry points

use crate::action::Action;
use crate::enhancer::{Enhancer, StoreFactory};
use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::store::{Store, StoreCore};

/// Create a store holding the state tree
///
/// With an enhancer, construction is delegated to it: the enhancer receives the
/// plain construction function and its resulting factory is applied to
/// `(reducer, preloaded_state)`. Without one, the store is created directly and
/// the reserved `INIT` action populates every reducer's default state.
pub fn create_store<S, A>(
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
    enhancer: Option<Enhancer<S, A>>,
) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action,
{
    match enhancer {
        Some(enhancer) => {
            log::debug!("Delegating store construction to enhancer");
            let factory = enhancer.enhance(base_factory());
            factory(reducer, preloaded_state)
        }
        None => create_base_store(reducer, preloaded_state),
    }
}

/// The plain construction function handed to enhancers
pub fn base_factory<S, A>() -> StoreFactory<S, A>
where
    S: Clone + 'static,
    A: Action,
{
    Box::new(create_base_store::<S, A>)
}

fn create_base_store<S, A>(
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action,
{
    let core = StoreCore::new(reducer, preloaded_state)?;
    Ok(Store::from_core(core))
}

/// Fluent store construction
///
/// ```
/// use reflux::{Reducer, StoreBuilder};
/// use serde_json::{json, Value};
///
/// let counter = Reducer::new(|state: Option<&i64>, action: &Value| {
///     let state = state.copied().unwrap_or(0);
///     if action["type"] == "INC" { state + 1 } else { state }
/// });
///
/// let store = StoreBuilder::new(counter).preloaded_state(1).build()?;
/// store.dispatch(json!({ "type": "INC" }))?;
/// assert_eq!(store.get_state()?, 2);
/// # Ok::<(), reflux::StoreError>(())
/// ```
pub struct StoreBuilder<S, A> {
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
    enhancer: Option<Enhancer<S, A>>,
    extra_enhancers: usize,
}

impl<S: Clone + 'static, A: Action> StoreBuilder<S, A> {
    pub fn new(reducer: Reducer<S, A>) -> Self {
        Self {
            reducer,
            preloaded_state: None,
            enhancer: None,
            extra_enhancers: 0,
        }
    }

    pub fn preloaded_state(mut self, state: S) -> Self {
        self.preloaded_state = Some(state);
        self
    }

    /// Set the enhancer
    ///
    /// Only one enhancer is supported; `build` fails with `MultipleEnhancers`
    /// when this is called more than once. Use `compose_enhancers` instead.
    pub fn enhancer(mut self, enhancer: Enhancer<S, A>) -> Self {
        if self.enhancer.is_some() {
            self.extra_enhancers += 1;
        } else {
            self.enhancer = Some(enhancer);
        }
        self
    }

    pub fn build(self) -> Result<Store<S, A>, StoreError> {
        if self.extra_enhancers > 0 {
            return Err(StoreError::MultipleEnhancers);
        }

        create_store(self.reducer, self.preloaded_state, self.enhancer)
    }
}
