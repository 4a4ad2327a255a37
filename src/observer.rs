//! Explicit observer list.
//!
//! Single-threaded: listeners are `Rc<dyn Fn(&T)>` and the list lives behind
//! an `Rc<RefCell<..>>`. A [`Subscription`] holds only a weak reference, so
//! dropping the owner of the list invalidates outstanding handles.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Listener<T>)>,
}

/// A list of callbacks notified with a shared value
pub struct Observers<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<T>
    where
        F: Fn(&T) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Rc::new(listener)));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Call every registered listener exactly once with `value`.
    ///
    /// The listener list is snapshotted first, so listeners may subscribe or
    /// unsubscribe while being notified; such changes apply from the next call.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`Observers::subscribe`]
#[must_use = "dropping a subscription keeps the listener registered; call `unsubscribe` to remove it"]
pub struct Subscription<T> {
    id: u64,
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<T> Subscription<T> {
    /// Deregister the listener. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.borrow_mut();
        let before = registry.entries.len();
        registry.entries.retain(|(id, _)| *id != self.id);
        registry.entries.len() != before
    }
}
