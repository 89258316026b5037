#![forbid(unsafe_code)]

//! Shared value that tells its listeners when it changes.
//!
//! Hosts publish the viewport size through an [`Observable`], and the menu's
//! dimension probe publishes the measured container size the same way. A
//! listener is registered with [`Observable::subscribe`] and stays active
//! for exactly as long as the returned [`Subscription`] is alive: the
//! observable itself only holds weak handles, so an unmounted component
//! cannot be called back and cannot be kept alive by the source.
//!
//! Setting a value equal to the current one does not notify. Listeners run
//! in registration order, after the value has been stored, with no borrow
//! held, so a listener may read or write any observable, this one included.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

struct Listener<T> {
    callback: Box<dyn Fn(&T)>,
}

struct Shared<T> {
    value: T,
    /// Dead handles stay until the next notification.
    listeners: Vec<Weak<Listener<T>>>,
}

/// A shared value with change notification.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("listeners", &shared.listeners.len())
            .finish()
    }
}

impl<T: Default + Clone + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// An observable holding `value`, with no listeners.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value,
                listeners: Vec::new(),
            })),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Store `value` and notify listeners if it differs from the current one.
    pub fn set(&self, value: T) {
        let listeners = {
            let mut shared = self.shared.borrow_mut();
            if shared.value == value {
                return;
            }
            shared.value = value.clone();
            shared.listeners.retain(|l| l.strong_count() > 0);
            shared
                .listeners
                .iter()
                .filter_map(Weak::upgrade)
                .collect::<Vec<_>>()
        };
        trace!(listeners = listeners.len(), "observable changed");
        for listener in listeners {
            (listener.callback)(&value);
        }
    }

    /// Call `callback` with every new value until the returned guard drops.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let listener = Rc::new(Listener {
            callback: Box::new(callback),
        });
        self.shared
            .borrow_mut()
            .listeners
            .push(Rc::downgrade(&listener));
        Subscription {
            _listener: listener,
        }
    }

    /// Registered listeners, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().listeners.len()
    }

    /// Listeners whose guard is still alive.
    #[must_use]
    pub fn live_subscriber_count(&self) -> usize {
        self.shared
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.strong_count() > 0)
            .count()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
pub struct Subscription {
    _listener: Rc<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
