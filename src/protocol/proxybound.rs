use crate::{
    protocol::position::BlockPos,
    types::{BlockState, TransactionId},
};

/// Opaque compound payload carried by pick-block responses. Tag construction
/// and parsing happen outside this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundTag(pub Vec<u8>);

/// Decoded packets the backend sends to the proxy over the side channel.
///
/// Correlated responses carry the transaction id of the request they answer;
/// `BlockPlace` and `PistonEvent` are unsolicited gameplay events multiplexed
/// over the same channel.
#[derive(Clone, Debug, PartialEq)]
pub enum ProxyboundPacket {
    /// Answers a `BlockRequest` with a resolved block-state integer.
    BlockId {
        transaction_id: TransactionId,
        block_id: BlockState,
    },
    /// Answers a `BlockRequest` with an unresolved block-data string that
    /// still needs an identifier-table lookup on the proxy side.
    BlockData {
        transaction_id: TransactionId,
        block_data: String,
    },
    /// Answers a `BatchBlockRequest`; element order follows the request
    /// region's iteration order.
    BatchBlockId {
        transaction_id: TransactionId,
        blocks: Vec<BlockState>,
    },
    /// Answers a `PickBlockRequest`.
    PickBlock {
        transaction_id: TransactionId,
        data: Option<CompoundTag>,
    },
    /// The backend could not resolve the identified request.
    BlockLookupFail { transaction_id: TransactionId },
    /// Unsolicited: the backend confirmed a block placement.
    BlockPlace { pos: BlockPos, block_id: BlockState },
    /// Unsolicited: a piston began extending or retracting.
    PistonEvent {
        pos: BlockPos,
        block_id: BlockState,
        extend: bool,
        sticky: bool,
        /// Blocks attached to the piston head, with their block states. The
        /// dispatcher filters this down to movable entries before applying.
        attached: Vec<(BlockPos, BlockState)>,
    },
    /// The decoder saw a frame kind it has no mapping for. Routed here so
    /// the dispatcher can log and drop it without tearing the channel down.
    Unrecognized { kind: u16 },
}
