//! Single-shot completion channel
//!
//! Converts the vendor's callback/listener style into an awaitable. The
//! vendor callback is guaranteed to settle the channel at most once; a
//! post-dispatch failure can settle it with an error instead, and whichever
//! side fires first wins.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::oneshot;

use leanlink_core::{BridgeError, FlowMethod, Result};

use crate::traits::Completion;

type Signal = std::result::Result<Option<Value>, BridgeError>;

/// Sender half shared between the vendor listener and the dispatch error
/// path.
#[derive(Clone)]
pub struct SingleShot {
    slot: Arc<Mutex<Option<oneshot::Sender<Signal>>>>,
}

/// Awaitable half of a flow completion
pub struct FlowCompletion {
    method: FlowMethod,
    rx: oneshot::Receiver<Signal>,
}

/// Create a linked listener/awaitable pair for one flow call.
pub fn flow_completion(method: FlowMethod) -> (SingleShot, FlowCompletion) {
    let (tx, rx) = oneshot::channel();
    let shot = SingleShot {
        slot: Arc::new(Mutex::new(Some(tx))),
    };
    (shot, FlowCompletion { method, rx })
}

impl SingleShot {
    /// The callback handed to the vendor SDK. Consuming it settles the
    /// channel with the vendor's response; later settles are ignored.
    pub fn listener(&self) -> Completion {
        let slot = Arc::clone(&self.slot);
        Box::new(move |response| {
            if let Some(tx) = slot.lock().expect("completion slot poisoned").take() {
                let _ = tx.send(Ok(response));
            }
        })
    }

    /// Settle with a plumbing error (dispatch threw before the listener was
    /// registered). No-op if the listener already fired.
    pub fn reject(&self, error: BridgeError) {
        if let Some(tx) = self.slot.lock().expect("completion slot poisoned").take() {
            let _ = tx.send(Err(error));
        }
    }
}

impl FlowCompletion {
    /// Wait for the vendor to complete the flow.
    pub async fn wait(self) -> Result<Option<Value>> {
        match self.rx.await {
            Ok(signal) => signal,
            // Every sender handle dropped without settling.
            Err(_) => Err(BridgeError::ChannelClosed {
                method: self.method,
            }),
        }
    }
}
