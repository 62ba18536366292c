use crate::action::{self, Action, ActionTypes};
use crate::error::StoreError;
use crate::listeners::{ListenerHost, ListenerId, Listeners, Unsubscribe};
use crate::observable::StateObservable;
use crate::reducer::Reducer;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Dispatch entry point, either the base dispatch or a middleware chain
pub type DispatchFn<A> = Rc<dyn Fn(A) -> Result<A, StoreError>>;

/// State, reducer, listeners and the reentrancy flag of one store
pub(crate) struct StoreCore<S, A> {
    state: RefCell<S>,
    reducer: RefCell<Reducer<S, A>>,
    listeners: RefCell<Listeners>,
    dispatching: Cell<bool>,
}

impl<S: Clone + 'static, A: Action> StoreCore<S, A> {
    /// Create the core and let every reducer populate its default state
    ///
    /// No handle to the store exists yet, so nothing can observe or reenter
    /// the `INIT` reduction.
    pub(crate) fn new(reducer: Reducer<S, A>, preloaded_state: Option<S>) -> Result<Self, StoreError> {
        let init = A::reserved(ActionTypes::Init);
        let state = reducer.reduce(preloaded_state.as_ref(), &init)?;

        log::debug!(
            "Store created (preloaded state: {})",
            preloaded_state.is_some()
        );

        Ok(Self {
            state: RefCell::new(state),
            reducer: RefCell::new(reducer),
            listeners: RefCell::new(Listeners::new()),
            dispatching: Cell::new(false),
        })
    }

    pub(crate) fn get_state(&self) -> Result<S, StoreError> {
        if self.dispatching.get() {
            return Err(StoreError::InvalidCallDuringDispatch("get_state"));
        }

        Ok(self.state.borrow().clone())
    }

    pub(crate) fn subscribe(
        self: &Rc<Self>,
        listener: Rc<dyn Fn()>,
    ) -> Result<Unsubscribe, StoreError> {
        if self.dispatching.get() {
            return Err(StoreError::InvalidCallDuringDispatch("subscribe"));
        }

        let id = self.listeners.borrow_mut().insert(listener);
        log::debug!("Listener {:?} subscribed", id);

        let host: Rc<dyn ListenerHost> = Rc::clone(self) as Rc<dyn ListenerHost>;
        Ok(Unsubscribe::new(id, Rc::downgrade(&host)))
    }

    pub(crate) fn dispatch(&self, action: A) -> Result<A, StoreError> {
        action::validate(&action)?;

        if self.dispatching.get() {
            return Err(StoreError::ReentrantDispatch);
        }

        log::trace!("Dispatching {}", action::describe(&action));
        self.reduce(&action)?;

        let listeners = self.listeners.borrow_mut().snapshot();
        for entry in listeners.iter() {
            entry.notify();
        }

        Ok(action)
    }

    /// Run the current reducer with the dispatching flag raised
    ///
    /// The flag drops back on every exit path, including a panicking reducer.
    fn reduce(&self, action: &A) -> Result<(), StoreError> {
        let reducer = self.reducer.borrow().clone();

        self.dispatching.set(true);
        let next = {
            scopeguard::defer! {
                self.dispatching.set(false);
            }
            let current = self.state.borrow();
            let next = reducer.reduce(Some(&*current), action);
            next
        }?;

        *self.state.borrow_mut() = next;
        Ok(())
    }

    pub(crate) fn replace_reducer(&self, next_reducer: Reducer<S, A>) -> Result<(), StoreError> {
        if self.dispatching.get() {
            return Err(StoreError::ReentrantDispatch);
        }

        *self.reducer.borrow_mut() = next_reducer;
        log::debug!("Reducer replaced");

        // Reducers shared by the old and new shape receive their previous
        // state; new ones populate their defaults.
        self.dispatch(A::reserved(ActionTypes::Replace))?;
        Ok(())
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<S: Clone + 'static, A: Action> ListenerHost for StoreCore<S, A> {
    fn remove_listener(&self, id: ListenerId) -> Result<(), StoreError> {
        if self.dispatching.get() {
            return Err(StoreError::InvalidCallDuringDispatch("unsubscribe"));
        }

        if self.listeners.borrow_mut().remove(id) {
            log::debug!("Listener {:?} unsubscribed", id);
        }
        Ok(())
    }
}

/// Store - holds the state tree and runs the dispatch cycle
///
/// The only way to change the state is `dispatch`. Cloning a store hands out
/// another handle to the same state; `ptr_eq` tells handles apart.
///
/// Stores are single threaded. A reducer may not call back into its store,
/// listeners may: they run after the reducer finished.
pub struct Store<S, A> {
    core: Rc<StoreCore<S, A>>,
    dispatch: DispatchFn<A>,
}

impl<S: Clone + 'static, A: Action> Store<S, A> {
    pub(crate) fn from_core(core: StoreCore<S, A>) -> Self {
        let core = Rc::new(core);
        let dispatch = base_dispatch(&core);
        Self { core, dispatch }
    }

    /// Dispatch an action, returning it unchanged on success
    ///
    /// Goes through the middleware chain when the store was built with one.
    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        (self.dispatch)(action)
    }

    /// Read a copy of the current state
    pub fn get_state(&self) -> Result<S, StoreError> {
        self.core.get_state()
    }

    /// Register a listener called after every accepted dispatch
    ///
    /// A listener capturing a clone of this store keeps the store alive until
    /// it unsubscribes.
    pub fn subscribe<F>(&self, listener: F) -> Result<Unsubscribe, StoreError>
    where
        F: Fn() + 'static,
    {
        self.core.subscribe(Rc::new(listener))
    }

    /// Swap the reducer and re-initialise state through a `REPLACE` action
    ///
    /// Subscriptions and the middleware chain are kept; the returned handle
    /// is the same store.
    pub fn replace_reducer(&self, next_reducer: Reducer<S, A>) -> Result<Self, StoreError> {
        self.core.replace_reducer(next_reducer)?;
        Ok(self.clone())
    }

    /// Interop point for reactive consumers
    pub fn as_observable(&self) -> StateObservable<S, A> {
        StateObservable::new(self.clone())
    }

    /// Whether both handles refer to the same store
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    pub fn listener_count(&self) -> usize {
        self.core.listener_count()
    }

    pub(crate) fn core(&self) -> Rc<StoreCore<S, A>> {
        Rc::clone(&self.core)
    }

    pub(crate) fn downgrade_core(&self) -> Weak<StoreCore<S, A>> {
        Rc::downgrade(&self.core)
    }

    /// The dispatch entry point this handle currently exposes
    ///
    /// Enhancers wrap it and hand the result to [`Store::with_dispatch`].
    pub fn dispatcher(&self) -> DispatchFn<A> {
        Rc::clone(&self.dispatch)
    }

    /// Same store with its exposed dispatch replaced
    ///
    /// State, reducer and subscriptions are shared with `self`.
    pub fn with_dispatch(self, dispatch: DispatchFn<A>) -> Self {
        Self {
            core: self.core,
            dispatch,
        }
    }
}

fn base_dispatch<S: Clone + 'static, A: Action>(core: &Rc<StoreCore<S, A>>) -> DispatchFn<A> {
    let core = Rc::clone(core);
    Rc::new(move |action| core.dispatch(action))
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("dispatching", &self.core.dispatching.get())
            .finish_non_exhaustive()
    }
}
