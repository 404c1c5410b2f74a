//! Single-threaded task context for atoms.
//!
//! Atoms hold `Rc` state, so timers they schedule run as local tasks. [`run_until`]
//! drives a future on a fresh [`LocalSet`] and marks the thread while it is polled;
//! [`is_active`] lets callers refuse work instead of panicking in `spawn_local`.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::{JoinHandle, LocalSet};

use super::error::UiError;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Run `future` to completion on a new [`LocalSet`].
pub async fn run_until<F: Future>(future: F) -> F::Output {
    let local = LocalSet::new();
    Entered {
        inner: Box::pin(local.run_until(future)),
    }
    .await
}

/// Whether the current thread is polling inside [`run_until`].
pub fn is_active() -> bool {
    DEPTH.with(|depth| depth.get() > 0)
}

/// Spawn `future` as a local task, or fail when no local context is running.
pub fn spawn<F>(future: F) -> Result<JoinHandle<F::Output>, UiError>
where
    F: Future + 'static,
    F::Output: 'static,
{
    if !is_active() {
        return Err(UiError::Precondition(
            "local tasks need the UI task context (ui::core::local::run_until)".to_string(),
        ));
    }
    Ok(tokio::task::spawn_local(future))
}

struct Entered<F> {
    inner: Pin<Box<F>>,
}

impl<F: Future> Future for Entered<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let _guard = DepthGuard::enter();
        self.inner.as_mut().poll(cx)
    }
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
