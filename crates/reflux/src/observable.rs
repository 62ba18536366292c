//! Minimal observable over the store's state, for reactive consumers

use crate::action::Action;
use crate::error::StoreError;
use crate::listeners::Unsubscribe;
use crate::store::Store;
use std::rc::Rc;

/// Receives state values pushed by a [`StateObservable`]
pub trait Observer<S> {
    fn next(&self, state: &S);
}

impl<S, F> Observer<S> for F
where
    F: Fn(&S),
{
    fn next(&self, state: &S) {
        self(state)
    }
}

/// Observable view of a store, created by `Store::as_observable`
pub struct StateObservable<S, A> {
    store: Store<S, A>,
}

impl<S: Clone + 'static, A: Action> StateObservable<S, A> {
    pub(crate) fn new(store: Store<S, A>) -> Self {
        Self { store }
    }

    /// Push the current state to `observer` now and after every dispatch
    ///
    /// The subscription holds the store weakly.
    pub fn subscribe<O>(&self, observer: O) -> Result<ObservableSubscription, StoreError>
    where
        O: Observer<S> + 'static,
    {
        let observer = Rc::new(observer);
        observer.next(&self.store.get_state()?);

        let core = self.store.downgrade_core();
        let unsubscribe = self.store.subscribe(move || {
            if let Some(state) = core.upgrade().and_then(|core| core.get_state().ok()) {
                observer.next(&state);
            }
        })?;

        Ok(ObservableSubscription { unsubscribe })
    }
}

/// Subscription handle returned by `StateObservable::subscribe`
#[derive(Debug)]
pub struct ObservableSubscription {
    unsubscribe: Unsubscribe,
}

impl ObservableSubscription {
    pub fn unsubscribe(&self) -> Result<(), StoreError> {
        self.unsubscribe.unsubscribe()
    }

    pub fn is_subscribed(&self) -> bool {
        self.unsubscribe.is_subscribed()
    }
}
