use crate::types::{BlockState, Direction};

/// Registry-backed block lookups the side channel consumes but does not own.
///
/// The identifier table, piston behavior data, and the client-side block
/// palette all live in the surrounding proxy; this seam keeps the channel
/// code free of registry contents. Implementations are read-only tables and
/// must be shareable across the network and session contexts.
pub trait BlockLookups: Send + Sync {
    /// Maps an opaque block-data identifier string to a block state.
    /// Returns `None` for identifiers absent from the table; the dispatcher
    /// resolves those as the unknown-block sentinel.
    fn block_state_for(&self, block_data: &str) -> Option<BlockState>;

    /// Orientation of a piston head, derived from its block state.
    fn piston_orientation(&self, block_id: BlockState) -> Direction;

    /// Whether a piston can move a block of this state in the given phase
    /// (`extend` true for pushing, false for pulling).
    fn can_piston_move(&self, block_id: BlockState, extend: bool) -> bool;

    /// Client-side runtime id for a block state, used when synthesizing
    /// effect packets toward the client.
    fn client_block_id(&self, block_id: BlockState) -> i32;
}
