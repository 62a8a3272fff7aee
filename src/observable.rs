//! Change notification for shared state
//!
//! [`Observable`] wraps a value behind `Rc<RefCell<..>>` and notifies
//! subscribers every time a new value is set. [`Subscription`] is an RAII
//! guard: dropping it removes the callback.
//!
//! # Invariants
//!
//! 1. The version increments exactly once per `set`.
//! 2. Subscribers are notified in registration order.
//! 3. A `set` issued from inside a callback takes effect immediately for
//!    readers, but its notification is queued behind the current round, so
//!    every subscriber sees every value exactly once, in mutation order.
//! 4. Dropping a `Subscription` removes the callback before the next
//!    notification round.
//!
//! # Failure Modes
//!
//! - A panicking callback propagates to the caller of `set`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    version: u64,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
    /// Values waiting to be delivered
    pending: VecDeque<T>,
    notifying: bool,
}

/// A shared, version-tracked value with change notification
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Clone of the current value
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value
    ///
    /// Calling `set` from inside `f` panics.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Replace the value and notify subscribers
    pub fn set(&self, value: T) {
        let deliver = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.version += 1;
            inner.pending.push_back(value);
            if inner.notifying {
                false
            } else {
                inner.notifying = true;
                true
            }
        };

        if deliver {
            self.drain();
        }
    }

    /// Register a callback invoked with every new value
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::new(callback)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    fn drain(&self) {
        loop {
            // The borrow is released before callbacks run so they can read
            // or set the value again.
            let round = {
                let mut inner = self.inner.borrow_mut();
                match inner.pending.pop_front() {
                    Some(value) => {
                        let callbacks: Vec<Callback<T>> = inner
                            .subscribers
                            .iter()
                            .map(|(_, cb)| Rc::clone(cb))
                            .collect();
                        Some((value, callbacks))
                    }
                    None => {
                        inner.notifying = false;
                        None
                    }
                }
            };

            let Some((value, callbacks)) = round else {
                break;
            };
            for callback in callbacks {
                callback(&value);
            }
        }
    }
}

/// RAII guard for an [`Observable`] subscription
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now instead of on drop
    pub fn cancel(mut self) {
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

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_set_notifies_in_registration_order() {
        let value = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = Rc::clone(&seen);
            value.subscribe(move |v| seen.borrow_mut().push(("first", *v)))
        };
        let second = {
            let seen = Rc::clone(&seen);
            value.subscribe(move |v| seen.borrow_mut().push(("second", *v)))
        };

        value.set(1);
        assert_eq!(*seen.borrow(), vec![("first", 1), ("second", 1)]);
        assert_eq!(value.version(), 1);

        drop(first);
        drop(second);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let value = Observable::new(0);
        let count = Rc::new(RefCell::new(0));

        let sub = {
            let count = Rc::clone(&count);
            value.subscribe(move |_| *count.borrow_mut() += 1)
        };
        assert_eq!(value.subscriber_count(), 1);

        value.set(1);
        drop(sub);
        value.set(2);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(value.subscriber_count(), 0);
        assert_eq!(value.get(), 2);
    }

    #[test]
    fn test_cancel_unsubscribes() {
        let value = Observable::new(0);
        let sub = value.subscribe(|_| {});
        sub.cancel();
        assert_eq!(value.subscriber_count(), 0);
    }

    #[test]
    fn test_nested_set_is_delivered_in_order() {
        let value = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        // The first subscriber reacts to 1 by setting 2.
        let bump = {
            let value = value.clone();
            value.clone().subscribe(move |v| {
                if *v == 1 {
                    value.set(2);
                }
            })
        };
        let record = {
            let seen = Rc::clone(&seen);
            let value = value.clone();
            value.clone().subscribe(move |v| {
                seen.borrow_mut().push((*v, value.get()));
            })
        };

        value.set(1);

        // Each value arrives once and in order; readers already see the
        // latest value while the first round is still being delivered.
        assert_eq!(*seen.borrow(), vec![(1, 2), (2, 2)]);
        assert_eq!(value.version(), 2);

        drop(bump);
        drop(record);
    }
}
