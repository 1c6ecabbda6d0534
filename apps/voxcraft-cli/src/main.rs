//! Voxcraft command-line front end.
//!
//! Runs a headless game session against the on-disk world: inspect it, edit
//! blocks, ask the architect for a structure, or simulate the player for a
//! few seconds.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing::info;
use voxcraft_app::{init_logging, GameConfig, GameSession};
use voxcraft_architect::{ArchitectPanel, BuildStyle, GeminiArchitect, PanelOutcome};
use voxcraft_core::{BlockType, VoxelCell};
use voxcraft_input::{InputSnapshot, MovementState};
use voxcraft_world::{Confirm, FileStorage};

const FRAME: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "voxcraft", about = "Headless Voxcraft world tool", version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the saved world (overrides the config)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show block counts, health and the selected block
    Stats,
    /// Place a block at a cell
    Place {
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
        #[arg(allow_hyphen_values = true)]
        z: i32,
        /// Block type tag (defaults to the selected type)
        #[arg(long)]
        block: Option<BlockType>,
    },
    /// Remove the block at a cell
    Remove {
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
        #[arg(allow_hyphen_values = true)]
        z: i32,
    },
    /// Select a block type
    Select {
        /// Block type tag
        block: BlockType,
    },
    /// Ask the architect to build something
    Build {
        /// What to build
        prompt: String,
        /// Architectural style
        #[arg(long, default_value = "None")]
        style: BuildStyle,
    },
    /// Wipe the world and restore full health
    Reset {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Run the player simulation
    Simulate {
        /// Simulated time in seconds
        #[arg(long, default_value_t = 5.0)]
        seconds: f32,
        /// Spawn height to drop the player from
        #[arg(long)]
        drop_height: Option<f32>,
        /// Hold the forward key the whole time
        #[arg(long)]
        walk: bool,
    },
}

/// Yes/no prompt on the terminal.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(dir) = cli.storage_dir {
        config = config.with_storage_dir(dir);
    }
    if let Command::Simulate {
        drop_height: Some(height),
        ..
    } = cli.command
    {
        let spawn = config.player.spawn_point;
        config = config.with_spawn_point(Vec3::new(spawn.x, height, spawn.z));
    }

    let storage = FileStorage::new(&config.storage.dir);
    info!(dir = %storage.root().display(), "opening world");
    let mut session: GameSession = GameSession::new(config, Box::new(storage));

    match cli.command {
        Command::Stats => print_stats(&session),
        Command::Place { x, y, z, block } => {
            let cell = VoxelCell::new(x, y, z);
            let store = session.store_mut();
            if let Some(block) = block {
                store.select_block_type(block);
            }
            if store.add_block(cell) {
                println!("Placed {} at {x} {y} {z}", store.selected());
                session.save()?;
            } else {
                println!("Cell {x} {y} {z} is already occupied");
            }
        }
        Command::Remove { x, y, z } => {
            if session.store_mut().remove_block(VoxelCell::new(x, y, z)) {
                println!("Removed block at {x} {y} {z}");
                session.save()?;
            } else {
                println!("No block at {x} {y} {z}");
            }
        }
        Command::Select { block } => {
            session.store_mut().select_block_type(block);
            println!("Selected {block} (slot {}, color {})", block.slot(), block.attributes().hex_color());
        }
        Command::Build { prompt, style } => build(session, &prompt, style)?,
        Command::Reset { yes } => {
            let reset = if yes {
                session.reset(&mut |_: &str| true)
            } else {
                session.reset(&mut TerminalConfirm)
            };
            if reset {
                session.save()?;
                println!("World reset");
            } else {
                println!("Reset cancelled");
            }
        }
        Command::Simulate { seconds, walk, .. } => simulate(&mut session, seconds, walk)?,
    }
    Ok(())
}

fn print_stats(session: &GameSession) {
    let store = session.store();
    println!("Blocks:   {}", store.len());
    for (block, count) in store.count_by_type() {
        println!("  {block:<12} {count}");
    }
    println!("Health:   {}/{}", store.health(), voxcraft_core::constants::MAX_HEALTH);
    println!("Selected: {} (slot {})", store.selected(), store.selected().slot());
}

fn build(session: GameSession, prompt: &str, style: BuildStyle) -> anyhow::Result<()> {
    let service = GeminiArchitect::from_env(session.config().architect.clone())?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let mut panel = ArchitectPanel::new(service, runtime.handle().clone());
    panel.set_style(style);
    let mut session = session.with_architect(panel);

    session.request_structure(prompt)?;
    println!("Asking the architect...");
    match session.wait_for_architect() {
        Some(PanelOutcome::Applied(report)) => {
            println!(
                "Placed {} blocks ({} occupied, {} rejected)",
                report.placed(),
                report.batch.occupied,
                report.rejected()
            );
            if report.batch.changed() {
                session.save()?;
            }
        }
        Some(PanelOutcome::NothingChanged) | None => {
            println!("The architect is busy. Try a different request!");
        }
    }
    Ok(())
}

fn simulate(session: &mut GameSession, seconds: f32, walk: bool) -> anyhow::Result<()> {
    let input = InputSnapshot::with_movement(MovementState {
        forward: walk,
        ..MovementState::default()
    });
    let frames = (seconds.max(0.0) / FRAME).round() as u32;

    for frame in 0..frames {
        let report = session.tick(&input, FRAME);
        let time = frame as f32 * FRAME;
        if report.damage > 0 {
            println!(
                "{time:6.2}s  landed hard: -{} health ({} left)",
                report.damage,
                session.store().health()
            );
        }
        if report.died {
            println!("{time:6.2}s  the player died");
            break;
        }
    }

    let position = session.player().position();
    println!(
        "Player at ({:.2}, {:.2}, {:.2}), health {}",
        position.x,
        position.y,
        position.z,
        session.store().health()
    );
    if session.is_dead() {
        session.restart();
        println!("Respawned with a fresh world");
    }
    session.save()
}
