//! Change notification registry
//!
//! Mutations on any collection fire a single payload-less signal: "something
//! in storage changed, go re-read what you care about". Subscribers register
//! a callback and get a [`Subscription`] handle back; dropping the handle (or
//! calling [`Subscription::unsubscribe`]) removes exactly that callback.
//!
//! This is a broadcast, not a queue — there is no buffering and no delivery
//! to subscribers registered after a signal fired. Callbacks run in
//! registration order, synchronously, on the mutating caller's thread.
//!
//! # Usage
//!
//! ```rust,ignore
//! let notifier = ChangeNotifier::new();
//!
//! let subscription = notifier.subscribe(|| {
//!     // re-fetch whatever this view displays
//! });
//!
//! notifier.notify(); // callback runs once
//! drop(subscription); // deregistered
//! ```

use std::sync::{Arc, Mutex, PoisonError, Weak};

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
}

/// Process-wide broadcast signal for "some collection changed".
///
/// Cheap to clone (Arc internally); every clone shares the same subscriber
/// list, so a store and its consumers can each hold one.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    inner: Arc<Mutex<Registry>>,
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, returning its deregistration handle.
    ///
    /// The callback fires on every subsequent [`notify`](Self::notify) until
    /// the handle is dropped or unsubscribed.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Arc::new(callback)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Fire the signal, invoking every registered callback in registration
    /// order. Returns the number of callbacks invoked.
    ///
    /// The subscriber list is snapshotted before invocation, so a callback
    /// may subscribe or unsubscribe without deadlocking; changes it makes
    /// take effect from the next notify.
    pub fn notify(&self) -> usize {
        let snapshot: Vec<Callback> = self
            .lock()
            .callbacks
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in &snapshot {
            callback();
        }
        snapshot.len()
    }

    /// Current number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.lock().callbacks.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        // A subscriber list with a poisoned lock is still usable: the
        // registry holds no invariant beyond its Vec contents.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Deregistration handle for one subscribed callback.
///
/// Removing it is idempotent and leaves every other subscriber untouched.
#[must_use = "dropping the subscription immediately deregisters the callback"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Explicitly remove this callback (equivalent to dropping the handle)
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            let mut registry = inner.lock().unwrap_or_else(PoisonError::into_inner);
            registry.callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}
