use std::collections::HashMap;

use crate::{
    protocol::position::BlockPos,
    types::{BlockState, Direction},
};

/// Motion phase a piston is currently performing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PistonAction {
    Pushing,
    Pulling,
}

/// Live per-position state for a piston the backend reported in motion.
///
/// Created lazily on the first event for a position and mutated on
/// subsequent events; retiring the entry when the motion completes is the
/// session-state owner's job. Only ever touched from the session's
/// single-threaded context.
#[derive(Debug)]
pub struct PistonMotionState {
    pos: BlockPos,
    orientation: Direction,
    sticky: bool,
    retracted: bool,
    action: Option<PistonAction>,
    attached: HashMap<BlockPos, BlockState>,
}

impl PistonMotionState {
    pub fn new(pos: BlockPos, orientation: Direction, sticky: bool, retracted: bool) -> Self {
        Self {
            pos,
            orientation,
            sticky,
            retracted,
            action: None,
            attached: HashMap::new(),
        }
    }

    /// Applies a new motion phase with the (already filtered) attached-block
    /// set.
    pub fn set_action(&mut self, action: PistonAction, attached: HashMap<BlockPos, BlockState>) {
        self.retracted = action == PistonAction::Pulling;
        self.action = Some(action);
        self.attached = attached;
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn orientation(&self) -> Direction {
        self.orientation
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn is_retracted(&self) -> bool {
        self.retracted
    }

    pub fn action(&self) -> Option<PistonAction> {
        self.action
    }

    pub fn attached_blocks(&self) -> &HashMap<BlockPos, BlockState> {
        &self.attached
    }
}
