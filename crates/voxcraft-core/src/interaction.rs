//! Pointer interaction types shared by input, physics and the world.

use glam::Vec3;

use crate::coords::{BlockFace, VoxelCell};

/// First surface under the pointer when a click lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceHit {
    /// The ground plane, at a world-space point.
    Ground { point: Vec3 },
    /// A face of a placed block.
    Block { cell: VoxelCell, face: BlockFace },
}

/// Which action a click performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Left click / primary tap: place a block.
    #[default]
    Primary,
    /// Right click or modifier-held click: remove a block.
    Secondary,
}
