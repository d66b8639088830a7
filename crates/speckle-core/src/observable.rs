//! Observable values.
//!
//! Node fields that a host binds to (the stream list, the busy flag, error
//! annotations) are exposed as [`Observable`]s. Subscribers receive the latest
//! value after each change; intermediate values written in quick succession
//! may be coalesced.

use tokio::sync::watch;

/// A value that notifies subscribers whenever it is replaced or modified.
#[derive(Debug)]
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    /// Creates an observable holding `initial`.
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Replaces the value only if it differs from the current one.
    ///
    /// Returns `true` if subscribers were notified.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Modifies the value in place and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.sender.send_modify(f);
    }

    /// Subscribes to future changes. The current value counts as already seen.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A live subscription to an [`Observable`].
///
/// Dropping the subscription (or calling [`Subscription::unsubscribe`]) stops
/// delivery.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Waits for the next change and returns the new value.
    ///
    /// Returns `None` once the observable has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Returns `true` if a change arrived since the value was last seen.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Returns the latest value and marks it as seen.
    pub fn latest(&mut self) -> T {
        self.receiver.borrow_and_update().clone()
    }

    /// Ends the subscription.
    pub fn unsubscribe(self) {}
}
