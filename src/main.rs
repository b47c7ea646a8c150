//! Headless driver for the maze game.
//!
//! Builds a session from the command line (optionally on top of a JSON
//! config), plays it with a simple autopilot that drives forward and turns
//! whenever a move is blocked, and logs the result. Ctrl-C quits the
//! session early.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mouse_maze::game::mouse::CameraView;
use mouse_maze::maze::generator::StartCell;
use mouse_maze::maze::save_to_file;
use mouse_maze::{GameConfig, SessionController, SessionState};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maze side length in cells
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Seed for maze generation and cheese placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Game length in seconds
    #[arg(short, long)]
    pub game_length: Option<f32>,

    /// Start the generator from a random cell instead of (0, 0)
    #[arg(long)]
    pub random_start: bool,

    /// Write the generated maze as ASCII art into this directory
    #[arg(long)]
    pub dump_maze: Option<PathBuf>,

    /// Milliseconds between ticks
    #[arg(long, default_value = "16")]
    pub tick_ms: u64,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size {
            config.maze_size = size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(secs) = self.game_length {
            config.game_length_secs = secs;
        }
        if self.random_start {
            config.start_cell = StartCell::Random;
        }
        Ok(config)
    }
}

/// Steers the mouse: full speed ahead, turning while the last move was blocked.
fn autopilot(game: &mut SessionController) {
    let speed = game.config().mouse_speed;
    let turn = game.config().mouse_turn_speed;
    let mouse = game.mouse_mut();
    if mouse.is_blocked() {
        mouse.set_velocity(0.0, 0.0);
        mouse.set_angular_velocity(turn);
    } else {
        mouse.set_velocity(0.0, speed);
        mouse.set_angular_velocity(0.0);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let config = args.game_config()?;
    let mut game = SessionController::new(config, Instant::now())
        .context("Failed to set up the session")?;

    if let Some(dir) = &args.dump_maze {
        save_to_file(game.grid(), dir)
            .with_context(|| format!("Failed to dump maze into {}", dir.display()))?;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;
    }

    let tick = Duration::from_millis(args.tick_ms.max(1));
    game.start();
    while game.state() == SessionState::Running {
        if interrupted.swap(false, Ordering::SeqCst) {
            game.quit();
            break;
        }
        autopilot(&mut game);
        std::thread::sleep(tick);
        game.tick(Instant::now());

        let rig = game.camera(CameraView::Chase);
        log::trace!("camera eye={:?} at={:?}", rig.eye, rig.at);
    }

    let session = game.session();
    info!(
        "Final score {} in {:.2}s (best {}{})",
        session.score(),
        session.elapsed_time().as_secs_f32(),
        session.best_score(),
        if session.is_new_best() { ", new best" } else { "" }
    );
    Ok(())
}
