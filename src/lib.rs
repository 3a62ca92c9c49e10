//! # numstream
//!
//! **numstream** is a small observer/listener library: a [`NumberStreamer`]
//! periodically draws a random integer and pushes it to every registered
//! listener.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Listener   │   │   Listener   │   │   Listener   │
//!     │ (impl Listen)│   │ (ListenerFn) │   │  (LogWriter) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ add_listener     ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  NumberStreamer                                                   │
//! │  - ListenerSet (ordered, copy-on-write snapshots)                 │
//! │  - NumberSource (UniformSource over [0, bound) by default)        │
//! │  - Bus (diagnostics events)                                       │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                │ start()
//!                                ▼
//!                      ┌────────────────────┐
//!                      │  Ticker (tokio)    │  delay, then every period
//!                      └─────────┬──────────┘
//!                                ▼
//!               value = source.next_number()   (one per tick)
//!                                ▼
//!           L1.on_number(value) → L2.on_number(value) → … → LN
//!                  (registration order, same value, panics isolated)
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                   |
//! |-------------------|-------------------------------------------------------------|--------------------------------------|
//! | **Listener API**  | React to generated values with types or closures.           | [`Listen`], [`ListenerFn`]           |
//! | **Registry**      | Ordered registration, removal by id.                        | [`ListenerSet`], [`ListenerId`]      |
//! | **Streaming**     | One periodic schedule per streamer, start/stop/run.         | [`NumberStreamer`]                   |
//! | **Sources**       | Pluggable value producers.                                  | [`NumberSource`], [`UniformSource`]  |
//! | **Diagnostics**   | Lifecycle, tick and panic events.                           | [`Event`], [`EventKind`]             |
//! | **Errors**        | Typed lifecycle and fatal ticker errors.                    | [`StreamError`]                      |
//! | **Configuration** | Delay, period, bound, shutdown grace.                       | [`StreamerConfig`]                   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] listener _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use numstream::{Listen, ListenerFn, NumberStreamer, StreamerConfig};
//!
//! struct Announcer;
//!
//! #[async_trait::async_trait]
//! impl Listen for Announcer {
//!     async fn on_number(&self, value: u32) {
//!         println!("A number was generated: {value}");
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), numstream::StreamError> {
//!     let mut cfg = StreamerConfig::default();
//!     cfg.delay = Duration::from_millis(5);
//!     cfg.period = Duration::from_millis(5);
//!
//!     let streamer = NumberStreamer::new(cfg);
//!     streamer.add_listener(Arc::new(Announcer));
//!     streamer.add_listener(ListenerFn::arc("squares", |n| {
//!         println!("This is the square of the generated number: {}", n * n);
//!     }));
//!
//!     streamer.start()?;
//!     tokio::time::sleep(Duration::from_millis(20)).await;
//!     streamer.stop().await
//! }
//! ```
mod core;
mod error;
mod events;
mod listeners;
mod source;

// ---- Public re-exports ----

pub use crate::core::{
    DEFAULT_BOUND, DEFAULT_DELAY, DEFAULT_GRACE, DEFAULT_PERIOD, NumberStreamer, StreamerBuilder,
    StreamerConfig,
};
pub use error::StreamError;
pub use events::{Bus, Event, EventKind};
pub use listeners::{Listen, ListenerFn, ListenerId, ListenerRef, ListenerSet};
pub use source::{NumberSource, UniformSource};

// Optional: expose a simple built-in logger listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
