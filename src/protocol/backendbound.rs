use uuid::Uuid;

use crate::{
    protocol::{position::BlockPos, region::BlockRegion},
    types::TransactionId,
};

/// Decoded packets the proxy sends to the backend over the side channel.
///
/// Wire encoding is the transport's concern; these are the structured forms
/// handed to a `BackendSender`.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendboundPacket {
    /// Handshake. Not correlated; sent once when the channel binds.
    Initialize { player_uuid: Uuid },
    /// Requests the block state at a single position.
    BlockRequest {
        transaction_id: TransactionId,
        pos: BlockPos,
    },
    /// Requests the block states across an ordered region.
    BatchBlockRequest {
        transaction_id: TransactionId,
        region: BlockRegion,
    },
    /// Requests the compound pick-block payload for a position.
    PickBlockRequest {
        transaction_id: TransactionId,
        pos: BlockPos,
    },
}
