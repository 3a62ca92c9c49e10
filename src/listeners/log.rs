//! # LogWriter: simple value printer
//!
//! A minimal listener that prints every generated value to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [number] value=7
//! [number] value=0
//! ```

use async_trait::async_trait;

use super::Listen;

/// Value writer listener.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listen for LogWriter {
    async fn on_number(&self, value: u32) {
        println!("[number] value={value}");
    }

    fn name(&self) -> &str {
        "log-writer"
    }
}
