//! World state for Voxcraft.
//!
//! [`WorldStore`] is the single owner of the placed blocks, the selected block
//! type and the player's health. Everything that changes the world goes
//! through it:
//!
//! ```
//! use voxcraft_core::{BlockType, VoxelCell};
//! use voxcraft_world::{MemoryStorage, WorldStore};
//!
//! let mut storage = MemoryStorage::new();
//! let mut store = WorldStore::load(&storage);
//!
//! store.select_block_type(BlockType::Stone);
//! store.add_block(VoxelCell::new(0, 0, 0));
//! store.save(&mut storage).unwrap();
//!
//! let restored = WorldStore::load(&storage);
//! assert_eq!(restored.block_at(VoxelCell::new(0, 0, 0)), Some(BlockType::Stone));
//! ```

pub mod batch;
pub mod placement;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use batch::{BatchCommand, BatchReport};
pub use placement::{resolve_placement, PlacementIntent};
pub use snapshot::PlacedBlock;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{Confirm, WorldChange, WorldStore};
