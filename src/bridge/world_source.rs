use crate::{
    protocol::{position::BlockPos, proxybound::CompoundTag, region::BlockRegion},
    types::BlockState,
};

/// Fallback synchronous world-data source, consulted when no side channel is
/// bound (or a send fails mid-call). Typically backed by the proxy's own
/// chunk cache.
pub trait WorldSource: Send + Sync {
    fn block_at(&self, pos: BlockPos) -> BlockState;

    /// Block states across `region`, in the region's iteration order.
    fn blocks_at(&self, region: &BlockRegion) -> Vec<BlockState>;

    fn pick_block_data(&self, pos: BlockPos) -> Option<CompoundTag>;
}
