//! Bulk block insertion.

use glam::DVec3;
use voxcraft_core::{BlockType, VoxelCell};

/// One block to place as part of a batch.
///
/// The position need not be grid aligned; it is rounded to the nearest cell
/// when the batch is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchCommand {
    /// Requested position
    pub position: DVec3,
    /// Block type to place
    pub block: BlockType,
}

impl BatchCommand {
    /// Create a new batch command
    #[inline]
    pub const fn new(position: DVec3, block: BlockType) -> Self {
        Self { position, block }
    }
}

/// Outcome of applying a batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Cells that received a new block, in application order.
    pub placed: Vec<VoxelCell>,
    /// Commands skipped because their cell was already occupied.
    pub occupied: usize,
    /// Commands skipped because their position could not be snapped to a cell.
    pub invalid: usize,
}

impl BatchReport {
    /// Returns true if the batch placed at least one block.
    #[inline]
    pub fn changed(&self) -> bool {
        !self.placed.is_empty()
    }

    /// Total number of skipped commands.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.occupied + self.invalid
    }
}
