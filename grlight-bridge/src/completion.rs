//! Single-shot outcome of a spawned get or set

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::BridgeError;

/// Pending outcome of one channel operation
///
/// Created by the `spawn_*` methods on a channel handle. The operation runs on
/// the tokio runtime as soon as it is spawned, whether or not the completion
/// is ever polled; dropping a `Completion` does not cancel the request.
/// Exactly one outcome is delivered.
#[derive(Debug)]
pub struct Completion<T> {
    receiver: oneshot::Receiver<Result<T, BridgeError>>,
}

impl<T: Send + 'static> Completion<T> {
    /// Run `operation` on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn<F>(operation: F) -> Self
    where
        F: Future<Output = Result<T, BridgeError>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        tokio::spawn(async move {
            // The receiver may be gone; the request still ran to the end.
            let _ = sender.send(operation.await);
        });
        Self { receiver }
    }

    /// Hand the outcome to `callback` once it is known
    ///
    /// Bridges the completion to callback-style hosts. The callback runs
    /// exactly once, on a runtime worker.
    pub fn on_complete<C>(self, callback: C)
    where
        C: FnOnce(Result<T, BridgeError>) + Send + 'static,
    {
        tokio::spawn(async move {
            callback(self.await);
        });
    }
}

impl<T> Future for Completion<T> {
    type Output = Result<T, BridgeError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|outcome| {
            outcome.unwrap_or_else(|_| {
                Err(BridgeError::TaskFailed(
                    "operation ended without reporting an outcome".to_string(),
                ))
            })
        })
    }
}
