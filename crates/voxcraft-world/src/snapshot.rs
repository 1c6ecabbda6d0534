//! Persisted and wire representation of placed blocks.

use serde::{Deserialize, Serialize};
use voxcraft_core::{BlockType, VoxelCell};

/// Storage key of the world snapshot.
pub const WORLD_KEY: &str = "world";
/// Storage key of the health value.
pub const HEALTH_KEY: &str = "health";

/// A block present in the world.
///
/// Serializes as `{"pos": [x, y, z], "texture": "<tag>"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// Cell the block occupies
    pub pos: VoxelCell,
    /// Block type
    pub texture: BlockType,
}

impl PlacedBlock {
    /// Create a new placed block
    #[inline]
    pub const fn new(pos: VoxelCell, texture: BlockType) -> Self {
        Self { pos, texture }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape() {
        let block = PlacedBlock::new(VoxelCell::new(1, 0, -3), BlockType::Glass);
        let json = serde_json::to_value(block).unwrap();
        assert_eq!(json, serde_json::json!({"pos": [1, 0, -3], "texture": "glass"}));
    }

    #[test]
    fn rejects_unknown_texture() {
        let result = serde_json::from_str::<PlacedBlock>(r#"{"pos":[0,0,0],"texture":"lava"}"#);
        assert!(result.is_err());
    }
}
