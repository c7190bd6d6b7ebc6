//! Subscription handles for the keypad notification streams.

use std::{
    mem,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;

/// Represents a subscription to one of the keypad notification streams.
///
/// Drop all clones of the handle to unsubscribe, or call [`forget`](Self::forget) to
/// keep the subscription for the lifetime of the keypad.
#[derive(Clone)]
#[must_use = "the subscription is dropped if the handle is dropped"]
pub struct SubscriberHandle(Arc<HandleData>);
struct HandleData {
    forget: AtomicBool,
}
impl SubscriberHandle {
    /// Drops the handle but does **not** drop the subscription.
    pub fn forget(self) {
        self.0.forget.store(true, Ordering::Relaxed);
    }
}

/// Synchronous subscriber list, notified in subscription order.
pub(crate) struct Subscribers<A> {
    entries: Mutex<Vec<Entry<A>>>,
}
struct Entry<A> {
    handle: Arc<HandleData>,
    notify: Box<dyn FnMut(&A)>,
}
impl<A> Subscribers<A> {
    pub fn new() -> Self {
        Subscribers {
            entries: Mutex::new(vec![]),
        }
    }

    pub fn subscribe(&self, notify: impl FnMut(&A) + 'static) -> SubscriberHandle {
        let handle = Arc::new(HandleData {
            forget: AtomicBool::new(false),
        });
        self.entries.lock().push(Entry {
            handle: handle.clone(),
            notify: Box::new(notify),
        });
        SubscriberHandle(handle)
    }

    pub fn notify(&self, args: &A) {
        // entries are taken out so subscribers can subscribe/notify reentrant
        let mut entries = mem::take(&mut *self.entries.lock());
        entries.retain_mut(|e| {
            let retain = e.handle.forget.load(Ordering::Relaxed) || Arc::strong_count(&e.handle) > 1;
            if retain {
                (e.notify)(args);
            }
            retain
        });
        let mut current = self.entries.lock();
        entries.extend(current.drain(..));
        *current = entries;
    }
}
