//! # Core listener trait
//!
//! `Listen` is the extension point for reacting to generated numbers. The
//! ticker calls every registered listener **in turn**, awaiting each call before
//! the next, so a slow listener delays the rest of its tick.
//!
//! ## Contract
//! - Every listener of a tick receives the same value.
//! - Calls happen in registration order.
//! - A panic inside `on_number` is caught and reported; it does not reach
//!   other listeners or the ticker.
//!
//! ## Example
//! ```rust
//! use numstream::Listen;
//!
//! struct Printer;
//!
//! #[async_trait::async_trait]
//! impl Listen for Printer {
//!     async fn on_number(&self, value: u32) {
//!         println!("A number was generated: {value}");
//!     }
//!     fn name(&self) -> &str { "printer" }
//! }
//! ```

use async_trait::async_trait;

/// Contract for number listeners.
///
/// Called from the ticker task. Implementations should avoid blocking the async
/// runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Handle one generated value.
    async fn on_number(&self, value: u32);

    /// Human-readable name (for logs/diagnostics).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
