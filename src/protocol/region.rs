use crate::protocol::position::BlockPos;

/// An ordered, axis-aligned region of block positions used by batch lookups.
///
/// The iteration order is the wire contract between a batch caller and a
/// backend implementer: the response array's elements must line up with the
/// positions this iterator produces. Positions advance x-fastest, then z,
/// then y.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRegion {
    min: BlockPos,
    size_x: u32,
    size_y: u32,
    size_z: u32,
}

impl BlockRegion {
    pub fn new(min: BlockPos, size_x: u32, size_y: u32, size_z: u32) -> Self {
        Self {
            min,
            size_x,
            size_y,
            size_z,
        }
    }

    /// Creates a region from two inclusive corner positions.
    pub fn from_min_max(min: BlockPos, max: BlockPos) -> Self {
        Self {
            min,
            size_x: (max.x - min.x + 1).max(0) as u32,
            size_y: (max.y - min.y + 1).max(0) as u32,
            size_z: (max.z - min.z + 1).max(0) as u32,
        }
    }

    /// Creates a degenerate single-position region.
    pub fn single(pos: BlockPos) -> Self {
        Self::new(pos, 1, 1, 1)
    }

    pub fn min(&self) -> BlockPos {
        self.min
    }

    /// Number of positions the iterator will produce.
    pub fn len(&self) -> usize {
        (self.size_x as usize) * (self.size_y as usize) * (self.size_z as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position at flat index `i`, following the iteration order.
    pub fn pos_at(&self, i: usize) -> Option<BlockPos> {
        if i >= self.len() {
            return None;
        }
        let x_span = self.size_x as usize;
        let layer = x_span * self.size_z as usize;
        Some(BlockPos::new(
            self.min.x + (i % x_span) as i32,
            self.min.y + (i / layer) as i32,
            self.min.z + ((i / x_span) % self.size_z as usize) as i32,
        ))
    }

    pub fn iter(&self) -> BlockRegionIter {
        BlockRegionIter {
            region: *self,
            index: 0,
        }
    }
}

impl IntoIterator for &BlockRegion {
    type Item = BlockPos;
    type IntoIter = BlockRegionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct BlockRegionIter {
    region: BlockRegion,
    index: usize,
}

impl Iterator for BlockRegionIter {
    type Item = BlockPos;

    fn next(&mut self) -> Option<BlockPos> {
        let pos = self.region.pos_at(self.index)?;
        self.index += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.region.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BlockRegionIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_iterates_x_fastest_then_z_then_y() {
        let region = BlockRegion::new(BlockPos::new(0, 0, 0), 2, 2, 2);
        let positions: Vec<BlockPos> = region.iter().collect();
        assert_eq!(
            positions,
            vec![
                BlockPos::new(0, 0, 0),
                BlockPos::new(1, 0, 0),
                BlockPos::new(0, 0, 1),
                BlockPos::new(1, 0, 1),
                BlockPos::new(0, 1, 0),
                BlockPos::new(1, 1, 0),
                BlockPos::new(0, 1, 1),
                BlockPos::new(1, 1, 1),
            ]
        );
    }

    #[test]
    fn from_min_max_is_inclusive() {
        let region = BlockRegion::from_min_max(BlockPos::new(-1, 4, 7), BlockPos::new(1, 4, 8));
        assert_eq!(region.len(), 3 * 1 * 2);
        assert_eq!(region.pos_at(0), Some(BlockPos::new(-1, 4, 7)));
        assert_eq!(region.pos_at(5), Some(BlockPos::new(1, 4, 8)));
    }

    #[test]
    fn single_region_produces_one_position() {
        let region = BlockRegion::single(BlockPos::new(3, -2, 9));
        let positions: Vec<BlockPos> = region.iter().collect();
        assert_eq!(positions, vec![BlockPos::new(3, -2, 9)]);
    }
}
