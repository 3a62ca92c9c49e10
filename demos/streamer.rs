//! # Example: streamer
//!
//! Registers a few listeners on a [`NumberStreamer`] and streams until Ctrl-C.
//!
//! Shows how to:
//! - Implement the [`Listen`] trait on a named type.
//! - Wrap a closure with [`ListenerFn`].
//! - Declare a listener type local to a function.
//! - Watch diagnostics through [`NumberStreamer::subscribe_events`].
//!
//! ## Flow
//! ```text
//! NumberStreamer::new()
//!     ├─► add_listener(Announcer)          "A number was generated: N"
//!     ├─► add_listener(ListenerFn squares) "This is the square of the generated number: N*N"
//!     ├─► add_listener(Named)              local type
//!     ├─► add_listener(LogWriter)          "[number] value=N"
//!     └─► run() ──► tick every second ──► listeners in that order
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=numstream=debug cargo run --example streamer --features logging
//! ```

use std::sync::Arc;

use numstream::{EventKind, Listen, ListenerFn, LogWriter, NumberStreamer, StreamerConfig};
use tracing_subscriber::EnvFilter;

/// Listener with a name of its own.
struct Announcer;

#[async_trait::async_trait]
impl Listen for Announcer {
    async fn on_number(&self, value: u32) {
        println!("A number was generated: {value}");
    }

    fn name(&self) -> &str {
        "announcer"
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let streamer = NumberStreamer::new(StreamerConfig::default());

    streamer.add_listener(Arc::new(Announcer));

    streamer.add_listener(ListenerFn::arc("squares", |n| {
        println!("This is the square of the generated number: {}", n * n);
    }));

    // a listener type that only exists inside this function
    struct Named;

    #[async_trait::async_trait]
    impl Listen for Named {
        async fn on_number(&self, value: u32) {
            println!(
                "{value} delivered to a listener whose type is {}",
                std::any::type_name::<Named>()
            );
        }
    }
    streamer.add_listener(Arc::new(Named));

    streamer.add_listener(Arc::new(LogWriter::new()));

    let mut events = streamer.subscribe_events();
    tokio::spawn(async move {
        while let Ok(ev) = events.recv().await {
            if ev.kind == EventKind::ListenerPanicked {
                eprintln!(
                    "[diag] listener {} panicked on tick {}: {}",
                    ev.listener.as_deref().unwrap_or("<unknown>"),
                    ev.tick.unwrap_or(0),
                    ev.reason.as_deref().unwrap_or("")
                );
            }
        }
    });

    println!("streaming; press Ctrl-C to stop");
    streamer.run().await?;
    Ok(())
}
