use std::collections::HashMap;

use crate::{
    protocol::position::BlockPos,
    relay::piston::PistonMotionState,
    types::BlockState,
};

/// Per-player gameplay state the relay mutates: live piston entities and the
/// transient block-placement prediction. Owned by the session's
/// single-threaded context; the relay only reaches it through a
/// `SessionExecutor` hand-off, never directly from the network context.
pub struct SessionState {
    pistons: HashMap<BlockPos, PistonMotionState>,
    last_place_position: Option<BlockPos>,
    last_placed_block: Option<BlockState>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            pistons: HashMap::new(),
            last_place_position: None,
            last_placed_block: None,
        }
    }

    /// Looks up the piston at `pos`, creating it with `create` on the first
    /// event for that position.
    pub fn piston_entry(
        &mut self,
        pos: BlockPos,
        create: impl FnOnce() -> PistonMotionState,
    ) -> &mut PistonMotionState {
        self.pistons.entry(pos).or_insert_with(create)
    }

    pub fn piston(&self, pos: BlockPos) -> Option<&PistonMotionState> {
        self.pistons.get(&pos)
    }

    /// Retires a piston whose motion has completed.
    pub fn remove_piston(&mut self, pos: BlockPos) -> Option<PistonMotionState> {
        self.pistons.remove(&pos)
    }

    pub fn record_place_prediction(&mut self, pos: BlockPos, block_id: BlockState) {
        self.last_place_position = Some(pos);
        self.last_placed_block = Some(block_id);
    }

    /// Clears the placement prediction once the backend acknowledged it.
    pub fn clear_place_prediction(&mut self) {
        self.last_place_position = None;
        self.last_placed_block = None;
    }

    pub fn place_prediction(&self) -> Option<(BlockPos, BlockState)> {
        match (self.last_place_position, self.last_placed_block) {
            (Some(pos), Some(block_id)) => Some((pos, block_id)),
            _ => None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
