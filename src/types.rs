pub type TransactionId = u32;
pub type BlockState = i32;

/// Resolved value delivered to callers when the backend cannot answer a
/// lookup. This is the same integer the block palette uses for air; callers
/// must treat it as valid "unknown" data rather than an error signal.
pub const UNKNOWN_BLOCK: BlockState = 0;

/// Cardinal orientation of a piston head, derived from its block state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}
