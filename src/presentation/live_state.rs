//! Latest-value holder with a list of observers

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`LiveState::observe`], used to detach the observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Holds the latest published value and notifies observers on every publish.
///
/// Clones share the same value and observer list. Observers only see values
/// published after they attach; [`LiveState::value`] always returns the latest.
pub struct LiveState<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

struct Inner<T> {
    value: T,
    observers: Vec<(ObserverId, Observer<T>)>,
    next_id: u64,
}

impl<T> Clone for LiveState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> LiveState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: initial,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Latest published value
    pub fn value(&self) -> T {
        self.lock().value.clone()
    }

    /// Attach an observer; it is called for every later publish, in attach order
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = ObserverId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        id
    }

    /// Detach an observer. Returns false if it was not attached.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(observer_id, _)| *observer_id != id);
        inner.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Store `value` and notify every attached observer synchronously
    pub fn publish(&self, value: T) {
        let observers: Vec<Observer<T>> = {
            let mut inner = self.lock();
            inner.value = value.clone();
            inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect()
        };

        // Called without the lock held so observers may use this handle
        for observer in observers {
            observer(&value);
        }
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for LiveState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("LiveState")
            .field("value", &inner.value)
            .field("observers", &inner.observers.len())
            .finish()
    }
}
