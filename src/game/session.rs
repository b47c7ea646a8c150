//! Session lifecycle: countdown, scoring and the per-tick update.
//!
//! [`SessionController`] owns every mutable piece of a game (the grid, the
//! placed objects, the mouse, the cheese and the [`Session`] counters) and
//! advances them when the host calls [`SessionController::tick`]. Control
//! events (`start`, `quit`, `play_again`) move the state machine:
//!
//! ```text
//!          start                 expiry / quit
//!   Idle ---------> Running -------------------> Ended
//!    ^                 ^                           |
//!    |                 +------- play_again --------+
//!    +----------------------- quit ----------------+
//! ```
//!
//! Events that are not valid from the current state are ignored and report
//! `false`.

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::cheese::Cheese;
use crate::game::collision::CollisionWorld;
use crate::game::mouse::{CameraRig, CameraView, Mouse};
use crate::game::object::MazeObject;
use crate::game::{ExpiryElapsed, GameTimer};
use crate::maze::generator::{Cell, Grid, MazeGenerator};
use crate::maze::layout::MazeLayoutBuilder;
use crate::rng::session_rng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Menu shown, countdown held at zero elapsed
    Idle,
    Running,
    /// Final results on display
    Ended,
}

/// Counters of the current session plus the process-wide best score.
///
/// Only the controller mutates a `Session`; everything else reads it.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    score: u32,
    best_score: u32,
    is_new_best: bool,
    timer: GameTimer,
}

impl Session {
    fn new(game_length: Duration, now: Instant) -> Self {
        Self {
            state: SessionState::Idle,
            score: 0,
            best_score: 0,
            is_new_best: false,
            timer: GameTimer::new(game_length, now),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Whether this session's score raised the best score.
    pub fn is_new_best(&self) -> bool {
        self.is_new_best
    }

    pub fn remaining_time(&self) -> Duration {
        self.timer.remaining()
    }

    /// Elapsed play time; frozen at its final value once the session ends.
    pub fn elapsed_time(&self) -> Duration {
        self.timer.elapsed()
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    fn reset_counters(&mut self, now: Instant) {
        self.score = 0;
        self.is_new_best = false;
        self.timer.restart(now);
    }

    fn record_pickup(&mut self) {
        self.score += 1;
        if self.score > self.best_score {
            self.best_score = self.score;
            self.is_new_best = true;
        }
    }
}

/// Drives one game from the host's tick callback.
pub struct SessionController {
    config: GameConfig,
    generator: MazeGenerator,
    layout: MazeLayoutBuilder,
    rng: StdRng,
    grid: Grid,
    world: CollisionWorld,
    mouse: Mouse,
    cheese: Cheese,
    session: Session,
    last_tick: Instant,
}

impl SessionController {
    /// Validates `config`, generates the first maze and waits in `Idle`.
    pub fn new(config: GameConfig, now: Instant) -> Result<Self> {
        config.validate()?;
        let generator = MazeGenerator::new(config.maze_size, config.start_cell)?;
        let layout = MazeLayoutBuilder::new(config.layout_params())?;
        let mut rng = session_rng(config.seed);

        let grid = generator.generate(&mut rng);
        let world = CollisionWorld::new(layout.build(&grid));
        let spawn = layout
            .params()
            .cell_center(Cell::new(0, 0), config.mouse_spawn_height);
        let mouse = Mouse::new(spawn, 0.0);

        let mut cheese = Cheese::new(config.origin);
        cheese.starting_position(
            &mut rng,
            grid.size(),
            config.cell_size,
            config.wall_width,
            config.origin,
        )?;

        log::info!(
            "Generated {n}x{n} maze with {} objects",
            world.len(),
            n = grid.size()
        );
        log::debug!("Maze layout:\n{grid}");

        let session = Session::new(config.game_length()?, now);
        Ok(Self {
            config,
            generator,
            layout,
            rng,
            grid,
            world,
            mouse,
            cheese,
            session,
            last_tick: now,
        })
    }

    /// Builds a new maze, swaps it into the collision world and moves the
    /// cheese to its starting region. The mouse keeps its pose unless the
    /// new walls overlap it, in which case it goes back to spawn.
    pub fn regenerate(&mut self) {
        self.grid = self.generator.generate(&mut self.rng);
        self.world.replace(self.layout.build(&self.grid));
        self.place_cheese_at_start();
        if self.world.collides(&self.mouse.bounds()) {
            log::debug!("Mouse overlapped the new maze, back to spawn");
            self.mouse.reset();
        }

        log::info!(
            "Regenerated {n}x{n} maze with {} objects",
            self.world.len(),
            n = self.grid.size()
        );
        log::debug!("Maze layout:\n{}", self.grid);
    }

    fn place_cheese_at_start(&mut self) {
        let c = &self.config;
        if let Err(e) = self.cheese.starting_position(
            &mut self.rng,
            self.grid.size(),
            c.cell_size,
            c.wall_width,
            c.origin,
        ) {
            log::warn!("Cheese left in place: {e}");
        }
    }

    fn reset_round(&mut self) {
        self.mouse.reset();
        self.session.reset_counters(self.last_tick);
        self.session.state = SessionState::Running;
    }

    /// `Idle -> Running`. Keeps the current maze.
    pub fn start(&mut self) -> bool {
        if self.session.state != SessionState::Idle {
            log::debug!("Ignoring start while {:?}", self.session.state);
            return false;
        }
        self.place_cheese_at_start();
        self.reset_round();
        log::info!("Session started");
        true
    }

    /// `Ended -> Running` on a freshly generated maze.
    pub fn play_again(&mut self) -> bool {
        if self.session.state != SessionState::Ended {
            log::debug!("Ignoring play again while {:?}", self.session.state);
            return false;
        }
        self.regenerate();
        self.reset_round();
        log::info!("Session restarted");
        true
    }

    /// Ends a running session early, or leaves the results screen.
    pub fn quit(&mut self) -> bool {
        match self.session.state {
            SessionState::Running => {
                let elapsed = self.session.timer.elapsed();
                self.end(elapsed);
                log::info!("Session quit after {:.2}s", elapsed.as_secs_f32());
                true
            }
            SessionState::Ended => {
                self.session.state = SessionState::Idle;
                self.session.timer.restart(self.last_tick);
                log::info!("Returned to idle");
                true
            }
            SessionState::Idle => {
                log::debug!("Ignoring quit while Idle");
                false
            }
        }
    }

    fn end(&mut self, elapsed: Duration) {
        self.session.timer.stop(elapsed);
        self.session.state = SessionState::Ended;
    }

    /// Advances the session to `now`.
    ///
    /// While running, the mouse moves first, then the pickup is tested, then
    /// the countdown. The step length is the time since the previous tick; a
    /// `now` earlier than that tick gives a zero step.
    pub fn tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_tick).as_secs_f32();
        if now > self.last_tick {
            self.last_tick = now;
        }

        match self.session.state {
            SessionState::Idle => self.session.timer.restart(self.last_tick),
            SessionState::Running => {
                self.session.timer.update(now);
                self.mouse.move_with_collision(&self.world, dt);
                self.check_pickup();

                log::trace!(
                    "dt={dt:.4} pos={:?} remaining={}",
                    self.mouse.position(),
                    self.session.timer.format_time()
                );

                if self.session.timer.is_expired() {
                    let elapsed = match self.config.expiry_elapsed {
                        ExpiryElapsed::GameLength => self.session.timer.duration,
                        ExpiryElapsed::Actual => self.session.timer.elapsed(),
                    };
                    self.end(elapsed);
                    log::info!(
                        "Time up: score {} (best {})",
                        self.session.score,
                        self.session.best_score
                    );
                }
            }
            SessionState::Ended => {}
        }
    }

    /// Eats the cheese if the mouse is on it and moves it anywhere in the
    /// maze. Returns whether a pickup happened.
    pub fn check_pickup(&mut self) -> bool {
        if !self.cheese.is_reached_by(self.mouse.mid_pos()) {
            return false;
        }

        let n = self.grid.size();
        let c = &self.config;
        match self.cheese.randomize(
            &mut self.rng,
            0,
            n,
            0,
            n,
            c.cell_size,
            c.wall_width,
            c.origin,
        ) {
            Ok(cell) => {
                self.session.record_pickup();
                log::debug!(
                    "Cheese eaten, score {}; moved to ({}, {})",
                    self.session.score,
                    cell.x,
                    cell.z
                );
                true
            }
            Err(e) => {
                log::warn!("Failed to move cheese: {e}");
                false
            }
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Shared handle to the current maze objects, for the renderer.
    pub fn objects(&self) -> Arc<[MazeObject]> {
        self.world.objects()
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    /// The host sets velocities through this between ticks.
    pub fn mouse_mut(&mut self) -> &mut Mouse {
        &mut self.mouse
    }

    pub fn cheese(&self) -> &Cheese {
        &self.cheese
    }

    pub fn camera(&self, view: CameraView) -> CameraRig {
        self.mouse.camera(view)
    }
}
