use crate::protocol::position::BlockPos;

/// Locally-synthesized effect packets the relay emits toward the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEffectPacket {
    /// Placement feedback: the sound of a block being placed, carrying the
    /// client-side runtime id of the placed block.
    BlockPlaceSound {
        pos: BlockPos,
        client_block_id: i32,
    },
}

/// Outbound packet sink toward the client connection. The relay uses it for
/// gameplay feedback that never touches the correlation tables.
pub trait ClientPacketSink: Send + Sync {
    fn send(&self, packet: ClientEffectPacket);
}
