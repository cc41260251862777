//! Listener registration.
//!
//! # Responsibilities
//! - Hold callbacks and invoke them synchronously, in registration order
//! - Hand out a [`Subscription`] that removes its callback exactly once
//!
//! # Design Decisions
//! - Emission iterates over a snapshot, so a callback may subscribe,
//!   unsubscribe or trigger another emission without a borrow conflict
//! - An emission raised from inside a callback is queued and delivered to
//!   every listener after the current one finishes, so values arrive in the
//!   order they were emitted and the last value each listener sees is the
//!   last one emitted
//! - A subscription outliving its set is a harmless no-op

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Handle that detaches a callback when [`unsubscribe`](Self::unsubscribe) is called.
///
/// Dropping the handle leaves the callback registered.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the teardown to run on unsubscribe.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Detach the callback.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

type Listener<T> = Rc<dyn Fn(&T)>;

/// An ordered set of callbacks receiving `&T`.
pub(crate) struct ListenerSet<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    queued: RefCell<VecDeque<T>>,
    emitting: Cell<bool>,
}

/// Clears the emitting flag even if a listener panics.
struct EmitGuard<'a>(&'a Cell<bool>);

impl Drop for EmitGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<T: 'static> ListenerSet<T> {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            queued: RefCell::new(VecDeque::new()),
            emitting: Cell::new(false),
        })
    }

    pub(crate) fn insert(self: &Rc<Self>, listener: Listener<T>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let set = Rc::downgrade(self);
        Subscription::new(move || {
            if let Some(set) = set.upgrade() {
                set.remove(id);
            }
        })
    }

    fn remove(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    /// Deliver `value` to every listener.
    ///
    /// Called re-entrantly, the value is queued behind the one in flight.
    pub(crate) fn emit(&self, value: T) {
        self.queued.borrow_mut().push_back(value);
        if self.emitting.replace(true) {
            return;
        }
        let _guard = EmitGuard(&self.emitting);

        loop {
            let Some(value) = self.queued.borrow_mut().pop_front() else {
                break;
            };
            let snapshot: Vec<Listener<T>> = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect();

            for listener in snapshot {
                listener(&value);
            }
        }
    }

    /// Drop every listener and any queued value.
    pub(crate) fn clear(&self) {
        self.listeners.borrow_mut().clear();
        self.queued.borrow_mut().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_in_order() {
        let set = ListenerSet::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = log.clone();
        let _s1 = set.insert(Rc::new(move |v: &u32| a.borrow_mut().push(("a", *v))));
        let b = log.clone();
        let _s2 = set.insert(Rc::new(move |v: &u32| b.borrow_mut().push(("b", *v))));

        set.emit(7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_listener() {
        let set = ListenerSet::<()>::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let first = set.insert(Rc::new(move |_: &()| h.set(h.get() + 1)));
        let h = hits.clone();
        let _second = set.insert(Rc::new(move |_: &()| h.set(h.get() + 10)));
        assert_eq!(set.len(), 2);

        first.unsubscribe();
        assert_eq!(set.len(), 1);

        set.emit(());
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn test_listener_may_unsubscribe_during_emit() {
        let set = ListenerSet::<()>::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let inner = slot.clone();
        let sub = set.insert(Rc::new(move |_: &()| {
            if let Some(sub) = inner.borrow_mut().take() {
                sub.unsubscribe();
            }
        }));
        *slot.borrow_mut() = Some(sub);

        set.emit(());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_unsubscribe_after_set_dropped() {
        let set = ListenerSet::<()>::new();
        let sub = set.insert(Rc::new(|_: &()| {}));
        drop(set);
        sub.unsubscribe();
    }

    #[test]
    fn test_noop_and_clear() {
        Subscription::noop().unsubscribe();

        let set = ListenerSet::<()>::new();
        let _sub = set.insert(Rc::new(|_: &()| {}));
        set.clear();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_nested_emit_is_delivered_after_current() {
        let set = ListenerSet::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&set);
        let a = log.clone();
        let _s1 = set.insert(Rc::new(move |v: &u32| {
            a.borrow_mut().push(("a", *v));
            if *v == 1 {
                if let Some(set) = weak.upgrade() {
                    set.emit(2);
                }
            }
        }));
        let b = log.clone();
        let _s2 = set.insert(Rc::new(move |v: &u32| b.borrow_mut().push(("b", *v))));

        set.emit(1);
        assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);

        // Emission works again once the queue is drained.
        set.emit(3);
        assert_eq!(log.borrow().last(), Some(&("b", 3)));
    }
}
