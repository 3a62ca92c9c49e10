//! Streamer diagnostics: event types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `NumberStreamer` (lifecycle, registry) and the ticker
//!   (values, listener panics, source failure).
//! - **Consumers**: anything holding a receiver from
//!   [`NumberStreamer::subscribe_events`](crate::NumberStreamer::subscribe_events).
//!
//! Events are diagnostics only; values reach listeners directly, never through the bus.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
