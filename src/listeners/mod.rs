//! # Number listeners.
//!
//! This module provides the [`Listen`] trait, the closure wrapper
//! [`ListenerFn`] and the ordered registry [`ListenerSet`] the streamer
//! delivers through.
//!
//! ## Architecture
//! ```text
//! Ticker ── notify(tick, value) ──► ListenerSet (snapshot)
//!                                      │
//!                                      ├──► Listen::on_number(value)   (registration order,
//!                                      │         │                      one call at a time)
//!                                      │    ┌────┴─────┬──────────┐
//!                                      │    ▼          ▼          ▼
//!                                      │  Printer  ListenerFn  LogWriter
//!                                      │
//!                                      └──► panic → Bus: ListenerPanicked
//! ```

mod listener;
mod listener_fn;
mod set;

#[cfg(feature = "logging")]
mod log;

pub use listener::Listen;
pub use listener_fn::{ListenerFn, ListenerRef};
pub use set::{ListenerId, ListenerSet};

pub(crate) use set::panic_message;

#[cfg(feature = "logging")]
pub use log::LogWriter;
