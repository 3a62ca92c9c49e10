//! # Ticker: the periodic emission loop.
//!
//! One ticker task runs per started streamer. On every firing it draws one value
//! from the [`NumberSource`] and hands it to the [`ListenerSet`].
//!
//! ## Event flow
//! ```text
//! interval.tick() ──► source.next_number() ──► ListenerSet::notify(tick, value)
//!                           │                          │
//!                        (panic)                       ▼
//!                           ▼                   NumberGenerated{tick, value}
//!                     SourceFailed ──► exit with StreamError::SourceFailed
//! ```
//!
//! ## Rules
//! - First tick at `start`, then every `period` (fixed delay, no catch-up bursts)
//! - Tick numbers start at 1 and never repeat
//! - Cancellation is observed **between** ticks; a fan-out in progress completes
//! - `finished` is cancelled when the loop exits, whatever the reason

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    error::StreamError,
    events::{Bus, Event, EventKind},
    listeners::{ListenerSet, panic_message},
    source::NumberSource,
};

/// Periodic value producer driving a listener set.
pub(crate) struct Ticker {
    pub listeners: Arc<ListenerSet>,
    pub source: Arc<dyn NumberSource>,
    pub bus: Bus,
    pub period: Duration,
}

impl Ticker {
    /// Runs until `cancel` fires or the source panics.
    ///
    /// Returns the number of completed ticks.
    pub async fn run(
        self,
        start: Instant,
        cancel: CancellationToken,
        finished: CancellationToken,
    ) -> Result<u64, StreamError> {
        let _finished = finished.drop_guard();

        let mut interval = time::interval_at(start, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tick: u64 = 0;
        let outcome = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break Ok(tick),
                _ = interval.tick() => {}
            }

            let next = tick + 1;
            let value = match self.draw() {
                Ok(v) => v,
                Err(reason) => {
                    tracing::error!(tick = next, reason = %reason, "number source panicked; ticker stops");
                    self.bus.publish(
                        Event::new(EventKind::SourceFailed)
                            .with_tick(next)
                            .with_reason(reason.clone()),
                    );
                    break Err(StreamError::SourceFailed { reason });
                }
            };

            let delivered = self.listeners.notify(next, value, &self.bus).await;
            tick = next;
            tracing::trace!(tick, value, delivered, "tick delivered");
            self.bus.publish(
                Event::new(EventKind::NumberGenerated)
                    .with_tick(tick)
                    .with_value(value)
                    .with_delivered(delivered),
            );
        };

        self.bus
            .publish(Event::new(EventKind::StreamStopped).with_tick(tick));
        outcome
    }

    fn draw(&self) -> Result<u32, String> {
        let source = &self.source;
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| source.next_number()))
            .map_err(|p| panic_message(&*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerFn;
    use parking_lot::Mutex;

    fn ticker(source: Arc<dyn NumberSource>, set: Arc<ListenerSet>, bus: Bus) -> Ticker {
        Ticker {
            listeners: set,
            source,
            bus,
            period: Duration::from_millis(1000),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_period() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let set = Arc::new(ListenerSet::new());
        let s = Arc::clone(&seen);
        set.add(ListenerFn::arc("rec", move |n| s.lock().push(n)));

        let cancel = CancellationToken::new();
        let start = Instant::now() + Duration::from_millis(1000);
        let t = ticker(Arc::new(|| 3u32), set, Bus::new(16));
        let join = tokio::spawn(t.run(start, cancel.clone(), CancellationToken::new()));

        time::sleep(Duration::from_millis(999)).await;
        assert!(seen.lock().is_empty());

        time::sleep(Duration::from_millis(2_100)).await;
        assert_eq!(*seen.lock(), vec![3, 3, 3]);

        cancel.cancel();
        let ticks = join.await.expect("join").expect("ticker");
        assert_eq!(ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_panic_is_fatal() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let finished = CancellationToken::new();
        let source: Arc<dyn NumberSource> = Arc::new(|| -> u32 { panic!("entropy gone") });
        let t = ticker(source, Arc::new(ListenerSet::new()), bus);

        let res = t
            .run(Instant::now(), CancellationToken::new(), finished.clone())
            .await;

        match res {
            Err(StreamError::SourceFailed { reason }) => assert_eq!(reason, "entropy gone"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(finished.is_cancelled());
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::SourceFailed);
        assert_eq!(ev.tick, Some(1));
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::StreamStopped);
        assert_eq!(ev.tick, Some(0));
    }
}
