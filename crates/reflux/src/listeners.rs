//! Copy-on-write listener list
//!
//! Two handles share one ordered list: `current` is what an in-flight dispatch
//! iterates, `next` is what subscribe/unsubscribe mutate. The first mutation
//! after a snapshot detaches `next` with a shallow copy, so a dispatch always
//! notifies a stable list and changes made from inside a listener only take
//! effect with the following dispatch.

use crate::error::StoreError;
use std::cell::Cell;
use std::rc::{Rc, Weak};

pub(crate) type Listener = Rc<dyn Fn()>;

/// Identifies one subscription of one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Clone)]
pub(crate) struct Entry {
    id: ListenerId,
    listener: Listener,
}

impl Entry {
    pub(crate) fn notify(&self) {
        (self.listener)()
    }
}

pub(crate) struct Listeners {
    current: Rc<Vec<Entry>>,
    next: Rc<Vec<Entry>>,
    next_id: u64,
}

impl Listeners {
    pub(crate) fn new() -> Self {
        let list = Rc::new(Vec::new());
        Self {
            current: Rc::clone(&list),
            next: list,
            next_id: 0,
        }
    }

    fn ensure_can_mutate_next_listeners(&mut self) {
        if Rc::ptr_eq(&self.next, &self.current) {
            self.next = Rc::new(self.current.as_ref().clone());
        }
    }

    pub(crate) fn insert(&mut self, listener: Listener) -> ListenerId {
        self.ensure_can_mutate_next_listeners();
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        Rc::make_mut(&mut self.next).push(Entry { id, listener });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.ensure_can_mutate_next_listeners();
        let next = Rc::make_mut(&mut self.next);
        match next.iter().position(|entry| entry.id == id) {
            Some(index) => {
                next.remove(index);
                true
            }
            None => false,
        }
    }

    /// Promote `next` to `current` and hand out the list to notify
    pub(crate) fn snapshot(&mut self) -> Rc<Vec<Entry>> {
        self.current = Rc::clone(&self.next);
        Rc::clone(&self.current)
    }

    pub(crate) fn len(&self) -> usize {
        self.next.len()
    }
}

/// Something subscriptions can be removed from
pub(crate) trait ListenerHost {
    fn remove_listener(&self, id: ListenerId) -> Result<(), StoreError>;
}

/// Handle returned by `Store::subscribe`
///
/// Unsubscribing is idempotent. Dropping the handle does not unsubscribe, and
/// the handle does not keep the store alive.
pub struct Unsubscribe {
    id: ListenerId,
    host: Weak<dyn ListenerHost>,
    subscribed: Cell<bool>,
}

impl Unsubscribe {
    pub(crate) fn new(id: ListenerId, host: Weak<dyn ListenerHost>) -> Self {
        Self {
            id,
            host,
            subscribed: Cell::new(true),
        }
    }

    /// Remove the listener from the store
    ///
    /// Fails with `InvalidCallDuringDispatch` while the reducer is running; the
    /// subscription then stays active.
    pub fn unsubscribe(&self) -> Result<(), StoreError> {
        if !self.subscribed.get() {
            return Ok(());
        }

        if let Some(host) = self.host.upgrade() {
            host.remove_listener(self.id)?;
        }

        self.subscribed.set(false);
        Ok(())
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.get()
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("id", &self.id)
            .field("subscribed", &self.subscribed.get())
            .finish()
    }
}
