//! # ListenerSet: ordered, snapshot-based listener registry
//!
//! [`ListenerSet`] keeps listeners in registration order and delivers one value
//! per tick to all of them.
//!
//! ## What it guarantees
//! - Registration order is delivery order; duplicates are kept.
//! - Every listener of one delivery sees the same value.
//! - Each delivery works on an immutable snapshot: a listener added or removed
//!   while a delivery is in flight takes effect on the next one.
//! - Panics inside listeners are caught, logged and published as
//!   [`EventKind::ListenerPanicked`](crate::EventKind::ListenerPanicked)
//!   (isolation); the remaining listeners still run.
//!
//! ## Diagram
//! ```text
//!  add()/remove()                    notify(tick, value)
//!       │ (copy-on-write)                  │
//!       ▼                                  ▼
//!  RwLock<Arc<Vec<Entry>>> ──clone Arc──► snapshot
//!                                          ├─► L1.on_number(value)
//!                                          ├─► L2.on_number(value)
//!                                          └─► LN.on_number(value)
//! ```
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a listener uses `Arc<Mutex<T>>` and panics while holding the lock.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use parking_lot::RwLock;

use crate::events::{Bus, Event};

use super::ListenerRef;

/// Opaque registration handle returned by [`ListenerSet::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric id (as carried by events).
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone)]
struct Entry {
    id: ListenerId,
    listener: ListenerRef,
}

/// Ordered registry of listeners with snapshot delivery.
pub struct ListenerSet {
    entries: RwLock<Arc<Vec<Entry>>>,
    next_id: AtomicU64,
}

impl ListenerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Appends a listener and returns its registration id.
    ///
    /// Never fails; the same listener may be added more than once.
    pub fn add(&self, listener: ListenerRef) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut guard = self.entries.write();
        Arc::make_mut(&mut *guard).push(Entry { id, listener });
        id
    }

    /// Removes the listener registered under `id`.
    ///
    /// Returns the removed listener, or `None` if the id is unknown.
    pub fn remove(&self, id: ListenerId) -> Option<ListenerRef> {
        let mut guard = self.entries.write();
        let pos = guard.iter().position(|e| e.id == id)?;
        let entry = Arc::make_mut(&mut *guard).remove(pos);
        Some(entry.listener)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn snapshot(&self) -> Arc<Vec<Entry>> {
        Arc::clone(&self.entries.read())
    }

    /// Delivers `value` to every listener of the current snapshot, in order.
    ///
    /// Each call is awaited before the next one starts. Returns how many
    /// listeners the snapshot held.
    pub async fn notify(&self, tick: u64, value: u32, bus: &Bus) -> usize {
        let snapshot = self.snapshot();

        for entry in snapshot.iter() {
            let fut = entry.listener.on_number(value);
            if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                let info = panic_message(&*panic_err);
                let name = entry.listener.name();
                tracing::warn!(listener = name, tick, value, reason = %info, "listener panicked");
                bus.publish(Event::listener_panicked(
                    name,
                    entry.id.get(),
                    tick,
                    value,
                    info,
                ));
            }
        }
        snapshot.len()
    }
}

impl Default for ListenerSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(any: &(dyn Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::listeners::ListenerFn;
    use parking_lot::Mutex;

    fn recorder(tag: &'static str, log: &Arc<Mutex<Vec<String>>>) -> ListenerRef {
        let log = Arc::clone(log);
        ListenerFn::arc(tag, move |n| log.lock().push(format!("{tag}:{n}")))
    }

    #[tokio::test]
    async fn test_delivers_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let set = ListenerSet::new();
        set.add(recorder("a", &log));
        set.add(recorder("b", &log));
        set.add(recorder("c", &log));

        let n = set.notify(1, 4, &Bus::new(8)).await;

        assert_eq!(n, 3);
        assert_eq!(*log.lock(), vec!["a:4", "b:4", "c:4"]);
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let set = ListenerSet::new();
        let l = recorder("dup", &log);
        let first = set.add(Arc::clone(&l));
        let second = set.add(l);

        assert_ne!(first, second);
        set.notify(1, 2, &Bus::new(8)).await;
        assert_eq!(*log.lock(), vec!["dup:2", "dup:2"]);
    }

    #[tokio::test]
    async fn test_empty_set_is_noop() {
        let set = ListenerSet::new();
        assert!(set.is_empty());
        assert_eq!(set.notify(1, 0, &Bus::new(8)).await, 0);
    }

    #[tokio::test]
    async fn test_remove_stops_delivery() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let set = ListenerSet::new();
        let a = set.add(recorder("a", &log));
        set.add(recorder("b", &log));

        let removed = set.remove(a).expect("registered");
        assert_eq!(removed.name(), "a");
        assert!(set.remove(a).is_none());
        set.notify(1, 5, &Bus::new(8)).await;

        assert_eq!(*log.lock(), vec!["b:5"]);
        assert_eq!(set.len(), 1);
    }

    #[tokio::test]
    async fn test_panic_is_isolated_and_published() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let set = ListenerSet::new();
        set.add(ListenerFn::arc("boom", |_| panic!("listener exploded")));
        set.add(recorder("after", &log));

        set.notify(3, 6, &bus).await;

        assert_eq!(*log.lock(), vec!["after:6"]);
        let ev = rx.recv().await.expect("panic event");
        assert_eq!(ev.kind, EventKind::ListenerPanicked);
        assert_eq!(ev.listener.as_deref(), Some("boom"));
        assert_eq!(ev.tick, Some(3));
        assert_eq!(ev.reason.as_deref(), Some("listener exploded"));
    }

    #[tokio::test]
    async fn test_add_during_delivery_applies_next_time() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let set = Arc::new(ListenerSet::new());
        let late = recorder("late", &log);

        let s = Arc::clone(&set);
        set.add(ListenerFn::arc("adder", move |_| {
            s.add(Arc::clone(&late));
        }));

        set.notify(1, 1, &Bus::new(8)).await;
        assert!(log.lock().is_empty());

        set.notify(2, 2, &Bus::new(8)).await;
        assert_eq!(*log.lock(), vec!["late:2"]);
    }
}
