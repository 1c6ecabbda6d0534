//! The world state store.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde_json::Value;
use tracing::{debug, info, warn};
use voxcraft_core::constants::MAX_HEALTH;
use voxcraft_core::{BlockType, Result, VoxelCell};

use crate::batch::{BatchCommand, BatchReport};
use crate::placement::PlacementIntent;
use crate::snapshot::{PlacedBlock, HEALTH_KEY, WORLD_KEY};
use crate::storage::Storage;

/// Prompt shown before wiping the world.
pub const RESET_PROMPT: &str = "Are you sure you want to reset the entire world?";

/// Yes/no confirmation collaborator used by [`WorldStore::reset`].
pub trait Confirm {
    /// Ask the user `prompt`; returns true on "yes".
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A change to the voxel set, recorded for observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldChange {
    /// A block was placed.
    Added(PlacedBlock),
    /// The block at this cell was removed.
    Removed(VoxelCell),
    /// Every block was removed.
    Cleared,
}

/// Single source of truth for the voxel world, the selected block type and
/// the player's health.
///
/// Invariant: at most one placed block per cell. Blocks keep their insertion
/// order so re-rendering is deterministic.
///
/// Nothing is written to storage until [`WorldStore::save`] is called.
#[derive(Debug, Clone)]
pub struct WorldStore {
    /// Placed blocks in insertion order.
    blocks: Vec<PlacedBlock>,
    /// Occupancy index over `blocks`.
    occupied: HashMap<VoxelCell, BlockType>,
    /// Block type used by the next `add_block`.
    selected: BlockType,
    health: u32,
    /// Changes not yet drained by the observer; `None` until one attaches.
    changes: Option<Vec<WorldChange>>,
}

impl Default for WorldStore {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            occupied: HashMap::new(),
            selected: BlockType::default(),
            health: MAX_HEALTH,
            changes: None,
        }
    }
}

impl WorldStore {
    /// Create an empty world with full health.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the last saved world and health from `storage`.
    ///
    /// Missing or unreadable entries fall back to defaults (empty world,
    /// full health). The selected block type always starts as grass.
    pub fn load(storage: &dyn Storage) -> Self {
        let mut store = Self::new();

        match storage.get(WORLD_KEY) {
            Ok(Some(value)) => match serde_json::from_value::<Vec<PlacedBlock>>(value) {
                Ok(blocks) => {
                    for block in blocks {
                        store.insert(block);
                    }
                }
                Err(e) => warn!("Discarding corrupt world snapshot: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to read world snapshot: {e}"),
        }

        match storage.get(HEALTH_KEY) {
            Ok(Some(value)) => match value.as_u64() {
                Some(health) => store.health = health.min(u64::from(MAX_HEALTH)) as u32,
                None => warn!("Discarding invalid health value {value}"),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to read health: {e}"),
        }

        info!(
            "Loaded world: {} blocks, health {}",
            store.blocks.len(),
            store.health
        );
        store
    }

    /// Write the world and health to `storage`, overwriting what was there.
    pub fn save(&self, storage: &mut dyn Storage) -> Result<()> {
        storage.set(WORLD_KEY, &serde_json::to_value(&self.blocks)?)?;
        storage.set(HEALTH_KEY, &Value::from(self.health))?;
        info!(
            "Saved world: {} blocks, health {}",
            self.blocks.len(),
            self.health
        );
        Ok(())
    }

    fn insert(&mut self, block: PlacedBlock) -> bool {
        if self.occupied.contains_key(&block.pos) {
            return false;
        }
        self.occupied.insert(block.pos, block.texture);
        self.blocks.push(block);
        self.record(WorldChange::Added(block));
        true
    }

    /// Place a block of the selected type at `cell`.
    ///
    /// No-op if the cell is already occupied. Returns true if a block was placed.
    pub fn add_block(&mut self, cell: VoxelCell) -> bool {
        let placed = self.insert(PlacedBlock::new(cell, self.selected));
        if placed {
            debug!("Placed {} at {:?}", self.selected, cell);
        }
        placed
    }

    /// Remove the block at `cell`, if any. Returns true if a block was removed.
    pub fn remove_block(&mut self, cell: VoxelCell) -> bool {
        if self.occupied.remove(&cell).is_none() {
            return false;
        }
        self.blocks.retain(|block| block.pos != cell);
        self.record(WorldChange::Removed(cell));
        debug!("Removed block at {:?}", cell);
        true
    }

    /// Carry out a resolved pointer intent. Returns true if the world changed.
    pub fn apply_intent(&mut self, intent: PlacementIntent) -> bool {
        match intent {
            PlacementIntent::Add(cell) => self.add_block(cell),
            PlacementIntent::Remove(cell) => self.remove_block(cell),
        }
    }

    /// Set the block type used by subsequent [`WorldStore::add_block`] calls.
    pub fn select_block_type(&mut self, block: BlockType) {
        if self.selected != block {
            debug!("Selected {}", block);
        }
        self.selected = block;
    }

    /// Place a batch of blocks, each with its own type.
    ///
    /// Positions are rounded to the nearest cell. A command whose cell is
    /// already occupied (by the existing world or by an earlier command in
    /// the same batch) is skipped; every command is applied or skipped as a
    /// whole.
    pub fn apply_batch(&mut self, commands: impl IntoIterator<Item = BatchCommand>) -> BatchReport {
        let mut report = BatchReport::default();
        for command in commands {
            let Some(cell) = VoxelCell::round(command.position) else {
                report.invalid += 1;
                continue;
            };
            if self.insert(PlacedBlock::new(cell, command.block)) {
                report.placed.push(cell);
            } else {
                report.occupied += 1;
            }
        }
        debug!(
            "Batch applied: {} placed, {} occupied, {} invalid",
            report.placed.len(),
            report.occupied,
            report.invalid
        );
        report
    }

    /// Lower health by `amount`, stopping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        debug!("Took {} damage, health now {}", amount, self.health);
    }

    /// Raise health by `amount`, stopping at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(MAX_HEALTH);
    }

    /// Wipe the world and restore full health after asking `confirm`.
    ///
    /// Returns true if the user agreed and the world was reset.
    pub fn reset(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(RESET_PROMPT) {
            debug!("World reset declined");
            return false;
        }
        self.restore_defaults();
        true
    }

    /// Wipe the world and restore full health without asking.
    ///
    /// Used by respawn after death.
    pub fn restore_defaults(&mut self) {
        self.blocks.clear();
        self.occupied.clear();
        self.health = MAX_HEALTH;
        self.record(WorldChange::Cleared);
        info!("World reset");
    }

    /// Start recording a [`WorldChange`] feed.
    ///
    /// The feed opens with an `Added` entry for every block already present,
    /// so the observer starts from the full world. Once watched, changes
    /// accumulate until drained with [`WorldStore::take_changes`]; a store
    /// nobody watches records nothing. Calling this again is a no-op.
    pub fn watch_changes(&mut self) {
        if self.changes.is_none() {
            self.changes = Some(self.blocks.iter().copied().map(WorldChange::Added).collect());
        }
    }

    /// Drain the changes recorded since the last call.
    ///
    /// Always empty unless [`WorldStore::watch_changes`] was called.
    pub fn take_changes(&mut self) -> Vec<WorldChange> {
        self.changes.as_mut().map(std::mem::take).unwrap_or_default()
    }

    fn record(&mut self, change: WorldChange) {
        if let Some(changes) = self.changes.as_mut() {
            changes.push(change);
        }
    }

    /// Placed blocks in insertion order.
    #[must_use]
    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    /// Block type at `cell`, if occupied.
    #[must_use]
    pub fn block_at(&self, cell: VoxelCell) -> Option<BlockType> {
        self.occupied.get(&cell).copied()
    }

    /// Returns true if `cell` holds a block.
    #[must_use]
    pub fn is_occupied(&self, cell: VoxelCell) -> bool {
        self.occupied.contains_key(&cell)
    }

    /// Number of placed blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if no blocks are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of placed blocks per type.
    #[must_use]
    pub fn count_by_type(&self) -> BTreeMap<BlockType, usize> {
        let mut counts = BTreeMap::new();
        for block in &self.blocks {
            *counts.entry(block.texture).or_insert(0) += 1;
        }
        counts
    }

    /// Currently selected block type.
    #[must_use]
    pub const fn selected(&self) -> BlockType {
        self.selected
    }

    /// Current health, 0 through `MAX_HEALTH`.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Returns true once health has reached zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }
}
