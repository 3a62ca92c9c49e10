//! # Termination signal handling for [`NumberStreamer::run`](crate::NumberStreamer::run).
//!
//! - **Unix**: `SIGINT` (Ctrl-C), `SIGTERM`, `SIGQUIT`
//! - **Other platforms**: `Ctrl-C` via [`tokio::signal::ctrl_c`]

/// Completes when the process is asked to terminate.
///
/// Returns `Err` if a signal handler cannot be installed.
#[cfg(unix)]
pub(crate) async fn termination_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => res?,
        _ = term.recv() => {},
        _ = quit.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) async fn termination_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
