//! Streamer core: lifecycle and periodic emission.
//!
//! The only public API from this module is [`NumberStreamer`] (with its
//! builder and configuration).
//!
//! Internal modules:
//! - [`streamer`]: registry access, `start`/`stop`/`run` lifecycle;
//! - [`ticker`]: the periodic draw-and-notify loop;
//! - [`builder`]: optional source/listener wiring;
//! - [`shutdown`]: OS termination signals for `run`.

mod builder;
mod config;
mod shutdown;
mod streamer;
mod ticker;

pub use builder::StreamerBuilder;
pub use config::{DEFAULT_BOUND, DEFAULT_DELAY, DEFAULT_GRACE, DEFAULT_PERIOD, StreamerConfig};
pub use streamer::NumberStreamer;
