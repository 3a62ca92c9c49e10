use std::sync::Arc;

use crate::{
    listeners::ListenerRef,
    source::{NumberSource, UniformSource},
};

use super::{config::StreamerConfig, streamer::NumberStreamer};

/// Builder for constructing a [`NumberStreamer`] with a custom source or initial listeners.
pub struct StreamerBuilder {
    cfg: StreamerConfig,
    source: Option<Arc<dyn NumberSource>>,
    listeners: Vec<ListenerRef>,
}

impl StreamerBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: StreamerConfig) -> Self {
        Self {
            cfg,
            source: None,
            listeners: Vec::new(),
        }
    }

    /// Replaces the default [`UniformSource`].
    ///
    /// `cfg.bound` is ignored once a custom source is set.
    pub fn with_source(mut self, source: impl NumberSource) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Registers listeners up front, in the given order.
    pub fn with_listeners(mut self, listeners: Vec<ListenerRef>) -> Self {
        self.listeners.extend(listeners);
        self
    }

    /// Builds the streamer (idle, not yet started).
    pub fn build(self) -> NumberStreamer {
        let source = self
            .source
            .unwrap_or_else(|| -> Arc<dyn NumberSource> {
                Arc::new(UniformSource::new(self.cfg.bound_clamped()))
            });
        NumberStreamer::new_internal(self.cfg, source, self.listeners)
    }
}
