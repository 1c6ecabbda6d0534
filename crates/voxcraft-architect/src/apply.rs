//! Validating and applying architect commands.

use glam::DVec3;
use tracing::{info, warn};
use voxcraft_core::BlockType;
use voxcraft_world::{BatchCommand, BatchReport, WorldStore};

use crate::command::ArchitectCommand;

/// Outcome of [`apply_commands`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// What the store did with the valid commands.
    pub batch: BatchReport,
    /// Commands with an unknown tag.
    pub unknown_texture: usize,
    /// Commands whose position is not three finite numbers.
    pub bad_position: usize,
}

impl ApplyReport {
    /// Commands dropped before reaching the store.
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.unknown_texture + self.bad_position
    }

    /// Number of blocks added.
    #[must_use]
    pub fn placed(&self) -> usize {
        self.batch.placed.len()
    }
}

/// Validate `commands` and insert the valid ones as one batch.
///
/// Unknown tags and malformed positions are logged and skipped one by one.
/// Positions are rounded to the nearest cell; occupied cells are left alone.
pub fn apply_commands(store: &mut WorldStore, commands: &[ArchitectCommand]) -> ApplyReport {
    let mut report = ApplyReport::default();
    let mut batch = Vec::with_capacity(commands.len());

    for command in commands {
        let Ok(block) = command.texture.parse::<BlockType>() else {
            warn!(texture = %command.texture, "architect used an unknown block type");
            report.unknown_texture += 1;
            continue;
        };
        let Some(position) = position(&command.pos) else {
            warn!(pos = ?command.pos, "architect sent an invalid position");
            report.bad_position += 1;
            continue;
        };
        batch.push(BatchCommand::new(position, block));
    }

    report.batch = store.apply_batch(batch);
    info!(
        placed = report.placed(),
        occupied = report.batch.occupied,
        rejected = report.rejected(),
        "architect patch applied"
    );
    report
}

fn position(pos: &[f64]) -> Option<DVec3> {
    match *pos {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => Some(DVec3::new(x, y, z)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxcraft_core::VoxelCell;

    #[test]
    fn valid_commands_are_rounded_and_placed() {
        let mut store = WorldStore::new();
        let commands = [
            ArchitectCommand::new([0.0, 0.0, 0.0], "stone"),
            ArchitectCommand::new([1.4, 0.0, 1.4], "stone"),
            ArchitectCommand::new([1.0, 0.0, 1.0], "wood"),
        ];
        let report = apply_commands(&mut store, &commands);

        assert_eq!(report.placed(), 2);
        assert_eq!(report.batch.occupied, 1);
        assert_eq!(report.rejected(), 0);
        // First command wins the cell.
        assert_eq!(store.block_at(VoxelCell::new(1, 0, 1)), Some(BlockType::Stone));
    }

    #[test]
    fn unknown_tags_are_skipped_individually() {
        let mut store = WorldStore::new();
        let commands = [
            ArchitectCommand::new([0.0, 0.0, 0.0], "bedrock"),
            ArchitectCommand::new([1.0, 0.0, 0.0], "log"),
            ArchitectCommand::new([2.0, 0.0, 0.0], "Stone"),
        ];
        let report = apply_commands(&mut store, &commands);

        assert_eq!(report.unknown_texture, 2);
        assert_eq!(report.placed(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.block_at(VoxelCell::new(1, 0, 0)), Some(BlockType::Log));
    }

    #[test]
    fn bad_positions_are_skipped_individually() {
        let mut store = WorldStore::new();
        let commands = [
            ArchitectCommand {
                pos: vec![1.0, 2.0],
                texture: "log".to_string(),
            },
            ArchitectCommand::new([f64::NAN, 0.0, 0.0], "log"),
            ArchitectCommand::new([0.0, f64::INFINITY, 0.0], "log"),
            ArchitectCommand::new([5.0, 0.0, 5.0], "log"),
        ];
        let report = apply_commands(&mut store, &commands);

        assert_eq!(report.bad_position, 3);
        assert_eq!(store.len(), 1);
        assert!(store.is_occupied(VoxelCell::new(5, 0, 5)));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut store = WorldStore::new();
        let report = apply_commands(&mut store, &[]);
        assert!(!report.batch.changed());
        assert!(store.is_empty());
    }
}
