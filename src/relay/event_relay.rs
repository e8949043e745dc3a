use std::{collections::HashMap, sync::Arc};

use crate::{
    lookup::BlockLookups,
    protocol::position::BlockPos,
    relay::{
        executor::SessionExecutor,
        piston::{PistonAction, PistonMotionState},
        sink::{ClientEffectPacket, ClientPacketSink},
    },
    types::BlockState,
};

/// Applies backend-pushed gameplay events onto live per-session state.
///
/// Events arrive on the network-receiving context; anything that touches
/// `SessionState` is scheduled onto the session executor instead of being
/// applied inline. Client feedback packets go out immediately, since the
/// sink is its own thread-safe surface.
pub struct GameplayEventRelay {
    executor: Arc<dyn SessionExecutor>,
    sink: Arc<dyn ClientPacketSink>,
    lookups: Arc<dyn BlockLookups>,
}

impl GameplayEventRelay {
    pub fn new(
        executor: Arc<dyn SessionExecutor>,
        sink: Arc<dyn ClientPacketSink>,
        lookups: Arc<dyn BlockLookups>,
    ) -> Self {
        Self {
            executor,
            sink,
            lookups,
        }
    }

    /// Block-place acknowledgement: emit placement feedback to the client,
    /// then clear the session's placement prediction. This is a
    /// client-feedback step, not a correlation response.
    pub fn handle_block_place(&self, pos: BlockPos, block_id: BlockState) {
        self.sink.send(ClientEffectPacket::BlockPlaceSound {
            pos,
            client_block_id: self.lookups.client_block_id(block_id),
        });
        self.executor
            .execute(Box::new(move |state| state.clear_place_prediction()));
    }

    /// Piston event: reduce the attached-block set to entries the piston can
    /// actually move in this phase, then apply the motion to the lazily
    /// created per-position piston state on the session thread.
    pub fn handle_piston_event(
        &self,
        pos: BlockPos,
        block_id: BlockState,
        extend: bool,
        sticky: bool,
        attached: Vec<(BlockPos, BlockState)>,
    ) {
        let orientation = self.lookups.piston_orientation(block_id);
        let movable: HashMap<BlockPos, BlockState> = attached
            .into_iter()
            .filter(|(_, state)| self.lookups.can_piston_move(*state, extend))
            .collect();
        let action = if extend {
            PistonAction::Pushing
        } else {
            PistonAction::Pulling
        };

        self.executor.execute(Box::new(move |state| {
            let piston = state.piston_entry(pos, || {
                PistonMotionState::new(pos, orientation, sticky, !extend)
            });
            piston.set_action(action, movable);
        }));
    }
}
