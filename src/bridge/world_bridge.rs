use std::{sync::Arc, time::Duration};

use crossbeam::channel::bounded;
use log::{debug, warn};

use crate::{
    bridge::{error::BridgeError, pick_block::PickBlockHandle, world_source::WorldSource},
    protocol::{backendbound::BackendboundPacket, position::BlockPos, region::BlockRegion},
    session::channel_session::ChannelSession,
    types::{BlockState, TransactionId, UNKNOWN_BLOCK},
};

/// Tuning for the synchronous bridge.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Upper bound on how long a blocking query may suspend its caller. A
    /// query that is neither answered nor failed within this window resolves
    /// with its failure sentinel, so a lost response cannot stall a
    /// session's tick thread until the channel closes.
    pub request_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// The world-query surface world-simulation code calls from its tick thread.
///
/// Block queries happen inside simulation code that expects a synchronous
/// answer, so `block_at` and `blocks_at` suspend the calling thread on a
/// rendezvous until the inbound dispatcher resolves the transaction, the
/// channel closes, or the timeout expires. Each player session runs its tick
/// logic on a dedicated worker; blocking it never stalls other sessions or
/// the network-receiving context.
pub struct WorldBridge {
    session: Arc<ChannelSession>,
    fallback: Option<Arc<dyn WorldSource>>,
    config: BridgeConfig,
}

impl WorldBridge {
    pub fn new(
        session: Arc<ChannelSession>,
        fallback: Option<Arc<dyn WorldSource>>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            session,
            fallback,
            config,
        }
    }

    /// Resolves the block state at `pos`, blocking until the backend
    /// answers. Returns the unknown-block sentinel when the backend reports
    /// failure, the channel closes mid-flight, or the wait times out.
    pub fn block_at(&self, pos: BlockPos) -> Result<BlockState, BridgeError> {
        if !self.session.is_bound() {
            return match &self.fallback {
                Some(fallback) => Ok(fallback.block_at(pos)),
                None => Err(BridgeError::NoBackend),
            };
        }

        let transaction_id = self.session.next_transaction_id();
        let (sender, receiver) = bounded(1);
        self.session
            .registry()
            .register_single(transaction_id, move |value| {
                let _ = sender.send(value);
            });

        if let Err(error) = self.session.send(BackendboundPacket::BlockRequest {
            transaction_id,
            pos,
        }) {
            self.session.registry().discard(transaction_id);
            debug!("block request send failed ({error}); using fallback");
            return match &self.fallback {
                Some(fallback) => Ok(fallback.block_at(pos)),
                None => Err(error.into()),
            };
        }

        match receiver.recv_timeout(self.config.request_timeout) {
            Ok(value) => Ok(value),
            Err(_) => Ok(self.expire(transaction_id, "block", UNKNOWN_BLOCK)),
        }
    }

    /// Resolves the block states across `region`, blocking until the backend
    /// answers. The returned sequence's length and order mirror the region's
    /// iteration order. Failure, teardown, and timeout all resolve as an
    /// empty sequence.
    pub fn blocks_at(&self, region: &BlockRegion) -> Result<Vec<BlockState>, BridgeError> {
        if !self.session.is_bound() {
            return match &self.fallback {
                Some(fallback) => Ok(fallback.blocks_at(region)),
                None => Err(BridgeError::NoBackend),
            };
        }

        let transaction_id = self.session.next_transaction_id();
        let (sender, receiver) = bounded(1);
        self.session
            .registry()
            .register_batch(transaction_id, move |values| {
                let _ = sender.send(values);
            });

        if let Err(error) = self.session.send(BackendboundPacket::BatchBlockRequest {
            transaction_id,
            region: *region,
        }) {
            self.session.registry().discard(transaction_id);
            debug!("batch block request send failed ({error}); using fallback");
            return match &self.fallback {
                Some(fallback) => Ok(fallback.blocks_at(region)),
                None => Err(error.into()),
            };
        }

        match receiver.recv_timeout(self.config.request_timeout) {
            Ok(values) => Ok(values),
            Err(_) => Ok(self.expire(transaction_id, "batch block", Vec::new())),
        }
    }

    /// Requests the compound pick-block payload for `pos` and returns a
    /// handle the caller polls at its own pace. This is the one query shape
    /// that does not block: pick-block callers have no per-tick deadline.
    pub fn pick_block_data(&self, pos: BlockPos) -> Result<PickBlockHandle, BridgeError> {
        if !self.session.is_bound() {
            return match &self.fallback {
                Some(fallback) => Ok(PickBlockHandle::ready(fallback.pick_block_data(pos))),
                None => Err(BridgeError::NoBackend),
            };
        }

        let transaction_id = self.session.next_transaction_id();
        let (sender, receiver) = bounded(1);
        self.session
            .registry()
            .register_compound(transaction_id, move |value| {
                let _ = sender.send(value);
            });

        if let Err(error) = self.session.send(BackendboundPacket::PickBlockRequest {
            transaction_id,
            pos,
        }) {
            self.session.registry().discard(transaction_id);
            debug!("pick block request send failed ({error}); using fallback");
            return match &self.fallback {
                Some(fallback) => Ok(PickBlockHandle::ready(fallback.pick_block_data(pos))),
                None => Err(error.into()),
            };
        }

        Ok(PickBlockHandle::from_receiver(receiver))
    }

    /// Timeout path: discard the registration so the late response is inert,
    /// then hand the caller the failure sentinel.
    fn expire<T>(&self, transaction_id: TransactionId, kind: &str, sentinel: T) -> T {
        self.session.registry().discard(transaction_id);
        warn!("{kind} lookup {transaction_id} timed out; resolving as unknown");
        sentinel
    }
}
