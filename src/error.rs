//! Error types used by the streamer runtime.
//!
//! [`StreamError`] covers misuse of the streamer lifecycle (`start`/`stop`)
//! and fatal failures of the background ticker. Listener panics are **not**
//! errors: they are isolated per call and reported as
//! [`EventKind::ListenerPanicked`](crate::EventKind::ListenerPanicked).
//!
//! Like the events, errors provide helper methods (`as_label`, `as_message`)
//! for logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the number streamer.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StreamError {
    /// `start()` was called on a streamer that is already streaming (or was stopped).
    ///
    /// Only one periodic schedule exists per streamer.
    #[error("streamer already started")]
    AlreadyStarted,

    /// `stop()` was called before `start()`.
    #[error("streamer not started")]
    NotStarted,

    /// `start()` was called outside of a tokio runtime.
    #[error("no tokio runtime available to drive the ticker")]
    NoRuntime,

    /// The number source panicked; the ticker stopped.
    #[error("number source failed: {reason}")]
    SourceFailed {
        /// Panic message of the source.
        reason: String,
    },

    /// The ticker task was lost (aborted or panicked outside of a guarded section).
    #[error("ticker aborted: {reason}")]
    TickerAborted {
        /// Join error description.
        reason: String,
    },

    /// The ticker did not stop within the grace period and was aborted.
    ///
    /// Happens when a listener never returns from `on_number`.
    #[error("ticker did not stop within {grace:?}; aborted")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },

    /// Registering OS signal handlers failed.
    #[error("signal handling failed: {0}")]
    Signal(#[from] std::io::Error),
}

impl StreamError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use numstream::StreamError;
    ///
    /// assert_eq!(StreamError::AlreadyStarted.as_label(), "stream_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::AlreadyStarted => "stream_already_started",
            StreamError::NotStarted => "stream_not_started",
            StreamError::NoRuntime => "stream_no_runtime",
            StreamError::SourceFailed { .. } => "stream_source_failed",
            StreamError::TickerAborted { .. } => "stream_ticker_aborted",
            StreamError::GraceExceeded { .. } => "stream_grace_exceeded",
            StreamError::Signal(_) => "stream_signal",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StreamError::AlreadyStarted => "already started".to_string(),
            StreamError::NotStarted => "not started".to_string(),
            StreamError::NoRuntime => "no runtime".to_string(),
            StreamError::SourceFailed { reason } => format!("source panicked: {reason}"),
            StreamError::TickerAborted { reason } => format!("ticker lost: {reason}"),
            StreamError::GraceExceeded { grace } => format!("grace exceeded after {grace:?}"),
            StreamError::Signal(e) => format!("signal: {e}"),
        }
    }

    /// Indicates whether the error ended a running ticker.
    ///
    /// Returns `true` for [`StreamError::SourceFailed`],
    /// [`StreamError::TickerAborted`] and [`StreamError::GraceExceeded`],
    /// `false` for lifecycle misuse.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StreamError::SourceFailed { .. }
                | StreamError::TickerAborted { .. }
                | StreamError::GraceExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(StreamError::NotStarted.as_label(), "stream_not_started");
        assert_eq!(StreamError::NoRuntime.as_label(), "stream_no_runtime");
        let err = StreamError::SourceFailed {
            reason: "boom".into(),
        };
        assert_eq!(err.as_label(), "stream_source_failed");
        assert_eq!(err.as_message(), "source panicked: boom");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(
            StreamError::TickerAborted {
                reason: "cancelled".into()
            }
            .is_fatal()
        );
        let grace = StreamError::GraceExceeded {
            grace: Duration::from_secs(2),
        };
        assert!(grace.is_fatal());
        assert_eq!(grace.as_label(), "stream_grace_exceeded");
        assert!(!StreamError::AlreadyStarted.is_fatal());
        assert!(!StreamError::NotStarted.is_fatal());
    }
}
