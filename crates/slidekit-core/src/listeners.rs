//! Ordered listener registry with RAII subscriptions.
//!
//! Listeners are called in registration order. Dropping the returned
//! [`Subscription`] removes the listener; a listener may drop its own (or any
//! other) subscription while being dispatched.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct RegistryInner<E> {
    next_id: u64,
    listeners: IndexMap<u64, Listener<E>>,
}

/// A set of callbacks interested in events of type `E`.
pub struct ListenerRegistry<E> {
    inner: Rc<RefCell<RegistryInner<E>>>,
}

impl<E: 'static> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ListenerRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.inner.borrow().listeners.len())
            .finish()
    }
}

impl<E: 'static> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                next_id: 0,
                listeners: IndexMap::new(),
            })),
        }
    }

    /// Registers `listener` and returns the handle that keeps it alive.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .listeners
            .insert(id, Rc::new(RefCell::new(listener)) as Listener<E>);

        let weak: Weak<RefCell<RegistryInner<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.shift_remove(&id);
                }
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every registered listener with `event`.
    ///
    /// The listener set is snapshotted first, so subscriptions made during
    /// dispatch only see later events.
    pub fn dispatch(&self, event: &E) {
        let snapshot: SmallVec<[(u64, Listener<E>); 4]> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            // Skip listeners removed by an earlier callback in this pass.
            if !self.inner.borrow().listeners.contains_key(&id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(event),
                Err(_) => log::warn!("listener {id} re-entered its own dispatch; skipped"),
            }
        }
    }

    /// Removes every listener. Outstanding subscriptions become inert.
    pub fn clear(&self) {
        self.inner.borrow_mut().listeners.clear();
    }
}

/// Keeps a listener registered until dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keeps the listener registered for the registry's whole lifetime.
    pub fn detach(mut self) {
        self.release = None;
    }

    /// Unregisters now instead of at drop.
    pub fn unsubscribe(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispatch_reaches_listeners_in_order() {
        let registry = ListenerRegistry::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = Rc::clone(&seen);
            registry.subscribe(move |value| seen.borrow_mut().push(("first", *value)))
        };
        let second = {
            let seen = Rc::clone(&seen);
            registry.subscribe(move |value| seen.borrow_mut().push(("second", *value)))
        };

        registry.dispatch(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
        drop((first, second));
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let registry = ListenerRegistry::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            registry.subscribe(move |_| hits.set(hits.get() + 1))
        };
        registry.dispatch(&());
        drop(sub);
        registry.dispatch(&());
        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn detached_subscription_stays_registered() {
        let registry = ListenerRegistry::<()>::new();
        let hits = Rc::new(Cell::new(0));
        {
            let hits = Rc::clone(&hits);
            registry
                .subscribe(move |_| hits.set(hits.get() + 1))
                .detach();
        }
        registry.dispatch(&());
        assert_eq!(hits.get(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn listener_can_unsubscribe_another_during_dispatch() {
        let registry = ListenerRegistry::<()>::new();
        let victim_hits = Rc::new(Cell::new(0));
        let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let killer = {
            let slot = Rc::clone(&victim_slot);
            registry.subscribe(move |_| {
                slot.borrow_mut().take();
            })
        };
        let victim = {
            let hits = Rc::clone(&victim_hits);
            registry.subscribe(move |_| hits.set(hits.get() + 1))
        };
        *victim_slot.borrow_mut() = Some(victim);

        registry.dispatch(&());
        assert_eq!(victim_hits.get(), 0);
        assert_eq!(registry.len(), 1);
        drop(killer);
    }

    #[test]
    fn subscription_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::<()>::new();
        let sub = registry.subscribe(|_| {});
        drop(registry);
        drop(sub);
    }
}
