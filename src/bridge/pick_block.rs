use std::time::Duration;

use crossbeam::channel::{bounded, Receiver};

use crate::protocol::proxybound::CompoundTag;

/// The resolved value of a pick-block query. `None` means the backend had no
/// data for the position (or the lookup failed, or the channel closed).
pub type PickBlockResult = Option<CompoundTag>;

/// Handle to an in-flight pick-block query.
///
/// Pick-block callers are not on the hard per-tick deadline the block-at
/// callers are, so this query shape is deliberately not bridged into a
/// blocking call: the caller polls or waits at its own pace.
pub struct PickBlockHandle {
    receiver: Receiver<PickBlockResult>,
}

impl PickBlockHandle {
    pub(crate) fn from_receiver(receiver: Receiver<PickBlockResult>) -> Self {
        Self { receiver }
    }

    /// Creates a handle that is already resolved, for fallback answers.
    pub fn ready(result: PickBlockResult) -> Self {
        let (sender, receiver) = bounded(1);
        // A bounded(1) channel always has room for this first send.
        let _ = sender.send(result);
        Self { receiver }
    }

    /// Returns the result if it has arrived, without blocking. `None` means
    /// the query is still in flight.
    pub fn try_take(&self) -> Option<PickBlockResult> {
        self.receiver.try_recv().ok()
    }

    /// Waits up to `timeout` for the result. `None` means the query was
    /// still unresolved when the wait expired.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<PickBlockResult> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
