//! Store enhancers
//!
//! An enhancer wraps the store construction: it receives the plain
//! construction function as a [`StoreFactory`] and returns a factory producing
//! a store of the same shape with extra capabilities. An enhancer may rebind
//! dispatch by wrapping `Store::dispatcher` and installing the result with
//! `Store::with_dispatch`. `apply_middleware` is the enhancer shipped with
//! this crate.
//!
//! ```text
//! Enhancer(base factory) -> enhanced factory
//! enhanced factory(reducer, preloaded state) -> Store
//! ```

use crate::action::Action;
use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::store::Store;
use std::fmt;

/// Builds a store from a reducer and an optional preloaded state
pub type StoreFactory<S, A> =
    Box<dyn FnOnce(Reducer<S, A>, Option<S>) -> Result<Store<S, A>, StoreError>>;

type WrapFn<S, A> = dyn FnOnce(StoreFactory<S, A>) -> StoreFactory<S, A>;

/// Wraps a [`StoreFactory`] into another one
pub struct Enhancer<S, A> {
    wrap: Box<WrapFn<S, A>>,
}

impl<S: Clone + 'static, A: Action> Enhancer<S, A> {
    pub fn new<F>(wrap: F) -> Self
    where
        F: FnOnce(StoreFactory<S, A>) -> StoreFactory<S, A> + 'static,
    {
        Self {
            wrap: Box::new(wrap),
        }
    }

    /// Wrap `factory`, consuming the enhancer
    pub fn enhance(self, factory: StoreFactory<S, A>) -> StoreFactory<S, A> {
        (self.wrap)(factory)
    }
}

impl<S, A> fmt::Debug for Enhancer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enhancer").finish_non_exhaustive()
    }
}

/// Compose enhancers into one, the first being the outermost
///
/// `compose_enhancers([a, b])` enhances a factory `f` as `a(b(f))`.
pub fn compose_enhancers<S, A, I>(enhancers: I) -> Enhancer<S, A>
where
    S: Clone + 'static,
    A: Action,
    I: IntoIterator<Item = Enhancer<S, A>>,
{
    let enhancers: Vec<Enhancer<S, A>> = enhancers.into_iter().collect();
    Enhancer::new(move |factory| {
        enhancers
            .into_iter()
            .rev()
            .fold(factory, |inner, enhancer| enhancer.enhance(inner))
    })
}
