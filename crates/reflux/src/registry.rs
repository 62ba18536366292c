//! Name based store assembly
//!
//! Configuration files can only refer to reducers, middleware, enhancers and
//! listeners by name. The [`Registry`] resolves those names into the typed
//! values the store needs; names it does not know are reported with the
//! matching `StoreError` before any store is created.

use crate::action::Action;
use crate::builder::StoreBuilder;
use crate::enhancer::{compose_enhancers, Enhancer};
use crate::error::StoreError;
use crate::middleware::{apply_middleware, Middleware};
use crate::reducer::Reducer;
use crate::store::Store;
use std::collections::HashMap;
use std::rc::Rc;

type MiddlewareFactory<S, A> = Rc<dyn Fn() -> Box<dyn Middleware<S, A>>>;
type EnhancerFactory<S, A> = Rc<dyn Fn() -> Enhancer<S, A>>;
type StateListener<S> = Rc<dyn Fn(&S)>;

/// Names of the parts a store is assembled from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blueprint {
    pub reducer: String,
    /// Middleware in dispatch order; applied as one enhancer
    pub middleware: Vec<String>,
    pub enhancers: Vec<String>,
    /// Compose several enhancers instead of rejecting them
    pub compose_enhancers: bool,
    /// Listeners receiving the state now and after every dispatch
    pub listeners: Vec<String>,
}

/// Registered reducers, middleware, enhancers and listeners
pub struct Registry<S, A> {
    reducers: HashMap<String, Reducer<S, A>>,
    middleware: HashMap<String, MiddlewareFactory<S, A>>,
    enhancers: HashMap<String, EnhancerFactory<S, A>>,
    listeners: HashMap<String, StateListener<S>>,
}

impl<S: Clone + 'static, A: Action> Registry<S, A> {
    pub fn new() -> Self {
        Self {
            reducers: HashMap::new(),
            middleware: HashMap::new(),
            enhancers: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    pub fn register_reducer(&mut self, name: impl Into<String>, reducer: Reducer<S, A>) -> &mut Self {
        self.reducers.insert(name.into(), reducer);
        self
    }

    /// Register middleware; `make` runs once per store built
    pub fn register_middleware<F>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Middleware<S, A>> + 'static,
    {
        self.middleware.insert(name.into(), Rc::new(make));
        self
    }

    /// Register an enhancer; `make` runs once per store built
    pub fn register_enhancer<F>(&mut self, name: impl Into<String>, make: F) -> &mut Self
    where
        F: Fn() -> Enhancer<S, A> + 'static,
    {
        self.enhancers.insert(name.into(), Rc::new(make));
        self
    }

    pub fn register_listener<F>(&mut self, name: impl Into<String>, listener: F) -> &mut Self
    where
        F: Fn(&S) + 'static,
    {
        self.listeners.insert(name.into(), Rc::new(listener));
        self
    }

    /// Assemble a store from the names in `blueprint`
    ///
    /// Fails with `InvalidReducer`, `EnhancerNotFunction` or `InvalidListener`
    /// for unknown names, and with `MultipleEnhancers` when more than one
    /// enhancer results without `compose_enhancers`. Non-empty middleware
    /// counts as one enhancer.
    pub fn create_store(
        &self,
        blueprint: &Blueprint,
        preloaded_state: Option<S>,
    ) -> Result<Store<S, A>, StoreError> {
        let reducer = self
            .reducers
            .get(&blueprint.reducer)
            .cloned()
            .ok_or_else(|| StoreError::InvalidReducer(blueprint.reducer.clone()))?;

        let listeners = blueprint
            .listeners
            .iter()
            .map(|name| {
                self.listeners
                    .get(name)
                    .cloned()
                    .ok_or_else(|| StoreError::InvalidListener(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut enhancers = Vec::new();
        if !blueprint.middleware.is_empty() {
            let middleware = blueprint
                .middleware
                .iter()
                .map(|name| {
                    self.middleware
                        .get(name)
                        .map(|make| make())
                        .ok_or_else(|| StoreError::EnhancerNotFunction(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            enhancers.push(apply_middleware(middleware));
        }
        for name in &blueprint.enhancers {
            let make = self
                .enhancers
                .get(name)
                .ok_or_else(|| StoreError::EnhancerNotFunction(name.clone()))?;
            enhancers.push(make());
        }

        let mut builder = StoreBuilder::new(reducer);
        if let Some(state) = preloaded_state {
            builder = builder.preloaded_state(state);
        }
        if blueprint.compose_enhancers && enhancers.len() > 1 {
            builder = builder.enhancer(compose_enhancers(enhancers));
        } else {
            for enhancer in enhancers {
                builder = builder.enhancer(enhancer);
            }
        }
        let store = builder.build()?;

        let observable = store.as_observable();
        for listener in listeners {
            observable.subscribe(move |state: &S| listener(state))?;
        }

        log::info!(
            "Store assembled from reducer `{}` with {} middleware, {} enhancer(s), {} listener(s)",
            blueprint.reducer,
            blueprint.middleware.len(),
            blueprint.enhancers.len(),
            blueprint.listeners.len()
        );
        Ok(store)
    }
}

impl<S: Clone + 'static, A: Action> Default for Registry<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
