//! # Closure-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a plain closure `F: Fn(u32)` so callers do not need a
//! named type to listen for numbers.
//!
//! ## Example
//! ```rust
//! use numstream::{ListenerFn, ListenerRef};
//!
//! let l: ListenerRef = ListenerFn::arc("squares", |n| {
//!     println!("This is the square of the generated number: {}", n * n);
//! });
//! assert_eq!(l.name(), "squares");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use super::Listen;

/// Shared handle to a listener, as stored by the registry.
pub type ListenerRef = Arc<dyn Listen>;

/// Function-backed listener implementation.
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F>
where
    F: Fn(u32) + Send + Sync + 'static,
{
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F> Listen for ListenerFn<F>
where
    F: Fn(u32) + Send + Sync + 'static,
{
    async fn on_number(&self, value: u32) {
        (self.f)(value);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> std::fmt::Debug for ListenerFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_closure_receives_value() {
        let seen = Arc::new(AtomicU32::new(0));
        let s = Arc::clone(&seen);
        let l: ListenerRef = ListenerFn::arc("store", move |n| s.store(n, Ordering::SeqCst));

        l.on_number(7).await;

        assert_eq!(seen.load(Ordering::SeqCst), 7);
        assert_eq!(l.name(), "store");
    }
}
