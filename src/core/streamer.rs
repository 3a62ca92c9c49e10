//! # NumberStreamer: listener registry plus one periodic ticker.
//!
//! ## Lifecycle
//! ```text
//!   new()/builder() ──► Idle ──start()──► Streaming ──stop()──► Stopped
//!                        │                   │
//!                  add_listener()       add_listener()/remove_listener()
//!                  remove_listener()    (applied from the next tick)
//! ```
//!
//! ## Rules
//! - Exactly one schedule per streamer: a second `start()` fails with
//!   [`StreamError::AlreadyStarted`], so listeners are never invoked twice per period.
//! - `start()` needs a tokio runtime and only spawns; it never blocks.
//! - Dropping the streamer cancels its ticker.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    error::StreamError,
    events::{Bus, Event, EventKind},
    listeners::{ListenerId, ListenerRef, ListenerSet},
    source::{NumberSource, UniformSource},
};

use super::{builder::StreamerBuilder, config::StreamerConfig, shutdown, ticker::Ticker};

enum State {
    Idle,
    Streaming(JoinHandle<Result<u64, StreamError>>),
    Stopped,
}

/// Periodically generates a number and delivers it to every registered listener.
///
/// ### Responsibilities
/// - **Registry**: ordered listeners, duplicates allowed, removable by id
/// - **Emission**: one value per tick, same value for every listener, registration order
/// - **Isolation**: listener panics are reported and skipped
/// - **Diagnostics**: lifecycle and tick events on a broadcast bus
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use numstream::{ListenerFn, NumberStreamer, StreamerConfig};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), numstream::StreamError> {
///     let mut cfg = StreamerConfig::default();
///     cfg.delay = Duration::from_millis(10);
///     cfg.period = Duration::from_millis(10);
///
///     let streamer = NumberStreamer::new(cfg);
///     streamer.add_listener(ListenerFn::arc("printer", |n| {
///         println!("A number was generated: {n}");
///     }));
///
///     streamer.start()?;
///     tokio::time::sleep(Duration::from_millis(35)).await;
///     streamer.stop().await
/// }
/// ```
pub struct NumberStreamer {
    cfg: StreamerConfig,
    listeners: Arc<ListenerSet>,
    source: Arc<dyn NumberSource>,
    bus: Bus,
    cancel: CancellationToken,
    finished: CancellationToken,
    state: Mutex<State>,
}

impl NumberStreamer {
    /// Creates a streamer drawing uniformly from `[0, cfg.bound)`.
    pub fn new(cfg: StreamerConfig) -> Self {
        let source = Arc::new(UniformSource::new(cfg.bound_clamped()));
        Self::new_internal(cfg, source, Vec::new())
    }

    /// Starts building a streamer with a custom source or initial listeners.
    pub fn builder(cfg: StreamerConfig) -> StreamerBuilder {
        StreamerBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: StreamerConfig,
        source: Arc<dyn NumberSource>,
        listeners: Vec<ListenerRef>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let set = Arc::new(ListenerSet::new());
        for l in listeners {
            set.add(l);
        }
        Self {
            cfg,
            listeners: set,
            source,
            bus,
            cancel: CancellationToken::new(),
            finished: CancellationToken::new(),
            state: Mutex::new(State::Idle),
        }
    }

    /// Appends a listener; it receives every tick from the next one on.
    ///
    /// Never fails. Registering the same listener twice delivers to it twice.
    pub fn add_listener(&self, listener: ListenerRef) -> ListenerId {
        let name = listener.name().to_string();
        let id = self.listeners.add(listener);
        tracing::debug!(listener = %name, id = id.get(), "listener added");
        self.bus
            .publish(Event::new(EventKind::ListenerAdded).with_listener(name, id.get()));
        id
    }

    /// Removes a listener by registration id.
    ///
    /// Returns `false` if the id is unknown (never registered or already removed).
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        match self.listeners.remove(id) {
            Some(listener) => {
                let name = listener.name().to_string();
                tracing::debug!(listener = %name, id = id.get(), "listener removed");
                self.bus
                    .publish(Event::new(EventKind::ListenerRemoved).with_listener(name, id.get()));
                true
            }
            None => false,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// True while the ticker is alive.
    pub fn is_streaming(&self) -> bool {
        matches!(&*self.state.lock(), State::Streaming(h) if !h.is_finished())
    }

    /// Receiver for diagnostics events published after this call.
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Begins periodic emission.
    ///
    /// The first tick fires after `cfg.delay`, then every `cfg.period` until
    /// [`stop`](Self::stop) or drop.
    ///
    /// ### Errors
    /// - [`StreamError::AlreadyStarted`] if called more than once
    /// - [`StreamError::NoRuntime`] if called outside a tokio runtime
    pub fn start(&self) -> Result<(), StreamError> {
        let mut state = self.state.lock();
        if !matches!(*state, State::Idle) {
            return Err(StreamError::AlreadyStarted);
        }
        let rt = tokio::runtime::Handle::try_current().map_err(|_| StreamError::NoRuntime)?;

        let ticker = Ticker {
            listeners: Arc::clone(&self.listeners),
            source: Arc::clone(&self.source),
            bus: self.bus.clone(),
            period: self.cfg.period_clamped(),
        };
        let first = Instant::now() + self.cfg.delay;

        self.bus
            .publish(Event::new(EventKind::StreamStarted).with_delay(self.cfg.delay));
        tracing::info!(
            delay = ?self.cfg.delay,
            period = ?self.cfg.period_clamped(),
            listeners = self.listeners.len(),
            "stream started"
        );

        let join = rt.spawn(ticker.run(first, self.cancel.clone(), self.finished.clone()));
        *state = State::Streaming(join);
        Ok(())
    }

    /// Stops emission and waits for the ticker to exit.
    ///
    /// A fan-out in progress completes first, bounded by `cfg.grace`; past it
    /// the ticker is aborted. Calling `stop` again afterwards is a no-op.
    ///
    /// ### Errors
    /// - [`StreamError::NotStarted`] if `start()` was never called
    /// - [`StreamError::SourceFailed`] / [`StreamError::TickerAborted`] if the
    ///   ticker had already died
    /// - [`StreamError::GraceExceeded`] if the ticker had to be aborted
    pub async fn stop(&self) -> Result<(), StreamError> {
        let mut join = {
            let mut state = self.state.lock();
            match std::mem::replace(&mut *state, State::Stopped) {
                State::Idle => {
                    *state = State::Idle;
                    return Err(StreamError::NotStarted);
                }
                State::Stopped => return Ok(()),
                State::Streaming(join) => join,
            }
        };

        self.cancel.cancel();
        let grace = self.cfg.grace;
        let joined = match time::timeout(grace, &mut join).await {
            Ok(joined) => joined,
            Err(_) => {
                join.abort();
                tracing::error!(grace = ?grace, "ticker did not stop within grace; aborted");
                self.bus
                    .publish(Event::new(EventKind::GraceExceeded).with_delay(grace));
                return Err(StreamError::GraceExceeded { grace });
            }
        };

        match joined {
            Ok(Ok(ticks)) => {
                tracing::info!(ticks, "stream stopped");
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, label = e.as_label(), "stream ended with failure");
                Err(e)
            }
            Err(join_err) => Err(StreamError::TickerAborted {
                reason: join_err.to_string(),
            }),
        }
    }

    /// Starts, streams until a termination signal or ticker failure, then stops.
    pub async fn run(&self) -> Result<(), StreamError> {
        self.start()?;

        let signal = tokio::select! {
            res = shutdown::termination_signal() => {
                tracing::info!("termination requested");
                res
            }
            _ = self.finished.cancelled() => Ok(()),
        };

        let stopped = self.stop().await;
        signal?;
        stopped
    }
}

impl Drop for NumberStreamer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_without_runtime() {
        let streamer = NumberStreamer::new(StreamerConfig::default());
        assert!(matches!(streamer.start(), Err(StreamError::NoRuntime)));
        assert!(!streamer.is_streaming());
    }

    #[tokio::test]
    async fn test_stop_before_start() {
        let streamer = NumberStreamer::new(StreamerConfig::default());
        assert!(matches!(streamer.stop().await, Err(StreamError::NotStarted)));
        // still startable afterwards
        assert!(streamer.start().is_ok());
        assert!(streamer.stop().await.is_ok());
        assert!(streamer.stop().await.is_ok());
    }

    #[tokio::test]
    async fn test_start_after_stop_is_rejected() {
        let streamer = NumberStreamer::new(StreamerConfig::default());
        streamer.start().expect("start");
        streamer.stop().await.expect("stop");
        assert!(matches!(streamer.start(), Err(StreamError::AlreadyStarted)));
    }
}
