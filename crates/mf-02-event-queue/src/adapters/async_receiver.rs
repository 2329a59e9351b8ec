//! Async bridge
//!
//! Adapts the begin/end protocol to a future. Every queue owns one
//! [`AsyncBridge`], registered as its subscriber on behalf of all
//! `next_event` callers. Each call installs a fresh oneshot sender, and the
//! bridge forwards the notification token through it.
//!
//! A dropped `next_event` future leaves the registration in place. When the
//! notification finds no live receiver the bridge parks the token, and the
//! next `next_event` completes it with `end_async`.

use crate::domain::{AsyncCallback, AsyncResult, EventQueue, MediaEvent};
use crate::error::QueueError;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::trace;

#[derive(Default)]
struct BridgeState {
    sender: Option<oneshot::Sender<AsyncResult>>,
    parked: Option<AsyncResult>,
}

/// Per-queue subscriber that hands notification tokens to `next_event`.
#[derive(Default)]
pub(crate) struct AsyncBridge {
    state: Mutex<BridgeState>,
}

impl AsyncBridge {
    /// Forward `token` to the waiting receiver, or park it if there is none.
    fn deliver(&self, token: AsyncResult) {
        let mut state = self.state.lock();
        let undelivered = match state.sender.take() {
            Some(sender) => sender.send(token).err(),
            None => Some(token),
        };
        if let Some(token) = undelivered {
            trace!("No receiver waiting, async token parked");
            state.parked = Some(token);
        }
    }

    /// Drop the sender and any parked token. A waiting receiver sees the
    /// channel close.
    pub(crate) fn close(&self) {
        let mut state = self.state.lock();
        state.sender = None;
        state.parked = None;
    }
}

impl AsyncCallback for AsyncBridge {
    fn invoke(&self, result: &AsyncResult) {
        self.deliver(result.clone());
    }
}

/// Receiving half of one `next_event` call. A token that reached the channel
/// but was never taken goes back to the bridge on drop.
struct TokenWait<'a> {
    bridge: &'a AsyncBridge,
    receiver: oneshot::Receiver<AsyncResult>,
}

impl Drop for TokenWait<'_> {
    fn drop(&mut self) {
        if let Ok(token) = self.receiver.try_recv() {
            self.bridge.deliver(token);
        }
    }
}

/// Wait asynchronously for the next event on `queue`.
///
/// Fails with `MultipleSubscribers` if another consumer is registered or
/// another `next_event` is already waiting, and with `ShutDown` if the queue
/// shuts down first. The future may be dropped at any await point without
/// losing events.
pub async fn next_event(queue: &EventQueue) -> Result<Arc<MediaEvent>, QueueError> {
    let bridge = queue.async_bridge();

    let receiver = {
        let mut state = bridge.state.lock();
        let parked = state.parked.take();
        if let Some(token) = parked {
            drop(state);
            trace!("Completing parked async token");
            return queue.end_async(&token);
        }
        if state.sender.as_ref().is_some_and(|sender| !sender.is_closed()) {
            return Err(QueueError::MultipleSubscribers);
        }
        let (tx, rx) = oneshot::channel();
        state.sender = Some(tx);
        rx
    };
    let mut wait = TokenWait {
        bridge: bridge.as_ref(),
        receiver,
    };

    let callback: Arc<dyn AsyncCallback> = Arc::<AsyncBridge>::clone(bridge);
    if let Err(err) = queue.begin_async(callback, None) {
        bridge.state.lock().sender = None;
        return Err(err);
    }

    match (&mut wait.receiver).await {
        Ok(token) => {
            trace!("Async notification received");
            queue.end_async(&token)
        }
        // Sender dropped by the bridge: shutdown closed it.
        Err(_) if queue.is_shut_down() => Err(QueueError::ShutDown),
        Err(_) => Err(QueueError::Fail),
    }
}
