//! Mapping pointer hits onto grid mutations.

use voxcraft_core::constants::GROUND_LAYER;
use voxcraft_core::{PointerAction, SurfaceHit, VoxelCell};

/// Grid mutation requested by a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementIntent {
    /// Place the selected block type at the cell.
    Add(VoxelCell),
    /// Remove the block at the cell.
    Remove(VoxelCell),
}

impl PlacementIntent {
    /// Target cell of the intent.
    #[inline]
    pub const fn cell(self) -> VoxelCell {
        match self {
            Self::Add(cell) | Self::Remove(cell) => cell,
        }
    }
}

/// Resolve a pointer hit into a grid mutation.
///
/// - Ground: add at `(round(x), 0, round(z))`, whatever the action.
/// - Block, primary: add in the neighbouring cell across the hit face.
/// - Block, secondary: remove the hit block, whatever the face.
///
/// Occupancy is not checked here; adding onto an occupied cell is a no-op in
/// the store. Returns `None` only for a ground point that is not finite.
#[must_use]
pub fn resolve_placement(hit: SurfaceHit, action: PointerAction) -> Option<PlacementIntent> {
    match (hit, action) {
        (SurfaceHit::Ground { point }, _) => {
            if !(point.x.is_finite() && point.z.is_finite()) {
                return None;
            }
            let snap = |v: f32| v.round() as i32;
            Some(PlacementIntent::Add(VoxelCell::new(
                snap(point.x),
                GROUND_LAYER,
                snap(point.z),
            )))
        }
        (SurfaceHit::Block { cell, face }, PointerAction::Primary) => {
            Some(PlacementIntent::Add(cell.offset(face)))
        }
        (SurfaceHit::Block { cell, .. }, PointerAction::Secondary) => {
            Some(PlacementIntent::Remove(cell))
        }
    }
}
