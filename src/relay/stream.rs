//! Async pull view over an [`ActionRelay`].

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc::UnboundedReceiver;

use super::{ActionRelay, ObserverToken};

/// Per-subscription sequence of relayed actions.
///
/// Potentially infinite: it only ends after [`close`](Self::close) (or drop),
/// once the actions buffered before closing have been drained.
pub struct ActionStream<A> {
    relay: ActionRelay<A>,
    token: Option<ObserverToken>,
    receiver: UnboundedReceiver<A>,
}

impl<A> ActionStream<A> {
    pub(super) fn new(
        relay: ActionRelay<A>,
        token: ObserverToken,
        receiver: UnboundedReceiver<A>,
    ) -> Self {
        Self {
            relay,
            token: Some(token),
            receiver,
        }
    }

    pub async fn next(&mut self) -> Option<A> {
        self.receiver.recv().await
    }

    /// Next buffered action, without waiting.
    pub fn try_next(&mut self) -> Option<A> {
        self.receiver.try_recv().ok()
    }

    /// Stop receiving new actions. Already buffered actions remain readable.
    pub fn close(&mut self) {
        if let Some(token) = self.token.take() {
            // Dropping the registration drops the sender it captured.
            self.relay.remove_observer(token);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_none()
    }
}

impl<A> Stream for ActionStream<A> {
    type Item = A;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<A>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl<A> Drop for ActionStream<A> {
    fn drop(&mut self) {
        self.close();
    }
}
