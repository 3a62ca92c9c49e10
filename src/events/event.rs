//! # Diagnostics events emitted by the number streamer.
//!
//! The [`EventKind`] enum classifies what happened inside a streamer:
//! - **Lifecycle events**: stream started/stopped, source failure
//! - **Registry events**: listener added/removed
//! - **Tick events**: a value was generated and fanned out, a listener panicked
//!
//! The [`Event`] struct carries optional metadata such as the tick number,
//! generated value, listener name and a failure reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use numstream::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::NumberGenerated)
//!     .with_tick(3)
//!     .with_value(7);
//!
//! assert_eq!(ev.kind, EventKind::NumberGenerated);
//! assert_eq!(ev.value, Some(7));
//! assert_eq!(ev.tick, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of streamer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Lifecycle ===
    /// Periodic emission started.
    ///
    /// Sets:
    /// - `delay_ms`: initial delay before the first tick
    StreamStarted,

    /// Periodic emission stopped (cancelled or ticker ended).
    ///
    /// Sets:
    /// - `tick`: number of ticks completed
    StreamStopped,

    /// The ticker did not exit within the grace period after `stop()` and was aborted.
    ///
    /// Sets:
    /// - `delay_ms`: configured grace
    GraceExceeded,

    /// The number source panicked; the ticker is dead.
    ///
    /// Sets:
    /// - `tick`: tick that failed
    /// - `reason`: panic message
    SourceFailed,

    // === Registry ===
    /// A listener was appended to the registry.
    ///
    /// Sets:
    /// - `listener`: listener name
    /// - `listener_id`: registration id
    ListenerAdded,

    /// A listener was removed from the registry.
    ///
    /// Sets:
    /// - `listener`: listener name
    /// - `listener_id`: registration id
    ListenerRemoved,

    // === Ticks ===
    /// A value was generated and delivered to every listener of the snapshot.
    ///
    /// Sets:
    /// - `tick`: tick number (1-based)
    /// - `value`: generated value
    /// - `delivered`: number of listeners in the snapshot
    NumberGenerated,

    /// A listener panicked while handling a value.
    ///
    /// Sets:
    /// - `tick`: tick number
    /// - `value`: value being delivered
    /// - `listener`: listener name
    /// - `reason`: panic message
    ListenerPanicked,
}

/// Streamer event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Tick number (starting from 1).
    pub tick: Option<u64>,
    /// Generated value.
    pub value: Option<u32>,
    /// Listeners reached by the tick.
    pub delivered: Option<usize>,
    /// Name of the listener, if applicable.
    pub listener: Option<Arc<str>>,
    /// Registration id of the listener, if applicable.
    pub listener_id: Option<u64>,
    /// Initial delay or shutdown grace in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (panic messages).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            tick: None,
            value: None,
            delivered: None,
            listener: None,
            listener_id: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches a tick number.
    #[inline]
    pub fn with_tick(mut self, tick: u64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Attaches the generated value.
    #[inline]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches the number of listeners a tick reached.
    #[inline]
    pub fn with_delivered(mut self, n: usize) -> Self {
        self.delivered = Some(n);
        self
    }

    /// Attaches a listener name and registration id.
    #[inline]
    pub fn with_listener(mut self, name: impl Into<Arc<str>>, id: u64) -> Self {
        self.listener = Some(name.into());
        self.listener_id = Some(id);
        self
    }

    /// Attaches a delay or grace duration (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: std::time::Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a listener panic event.
    #[inline]
    pub fn listener_panicked(listener: &str, id: u64, tick: u64, value: u32, info: String) -> Self {
        Event::new(EventKind::ListenerPanicked)
            .with_listener(listener, id)
            .with_tick(tick)
            .with_value(value)
            .with_reason(info)
    }

    #[inline]
    pub fn is_listener_panic(&self) -> bool {
        matches!(self.kind, EventKind::ListenerPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::StreamStarted);
        let b = Event::new(EventKind::StreamStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_listener_panicked_fields() {
        let ev = Event::listener_panicked("squares", 4, 2, 9, "boom".to_string());
        assert!(ev.is_listener_panic());
        assert_eq!(ev.listener.as_deref(), Some("squares"));
        assert_eq!(ev.listener_id, Some(4));
        assert_eq!(ev.tick, Some(2));
        assert_eq!(ev.value, Some(9));
        assert_eq!(ev.reason.as_deref(), Some("boom"));
    }
}
