//! Mouse Maze - the core of a 3D maze game.
//!
//! A mouse is steered through a procedurally generated maze, eating cheese
//! against a countdown. This crate holds everything except the window,
//! input and drawing: the host renders the objects it is handed and feeds
//! ticks and control events back in.
//!
//! # Architecture
//! - `maze/`: connectivity generation, geometry layout, ASCII dumps
//! - `game/`: maze objects, collision, the mouse, the cheese and the session
//!   state machine
//! - `math/`: the small vector type shared by all of the above
//! - `config`, `error`, `rng`: configuration, the error type and the random
//!   source
//!
//! # Usage
//!
//! ```rust
//! use mouse_maze::{GameConfig, SessionController, SessionState};
//! use std::time::{Duration, Instant};
//!
//! let config = GameConfig { maze_size: 4, seed: Some(1), ..GameConfig::default() };
//! let t0 = Instant::now();
//! let mut game = SessionController::new(config, t0).unwrap();
//!
//! game.start();
//! game.mouse_mut().set_velocity(0.0, 1.0);
//! game.tick(t0 + Duration::from_millis(16));
//! assert_eq!(game.state(), SessionState::Running);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod math;
pub mod maze;
pub mod rng;

pub use config::GameConfig;
pub use error::{MazeError, Result};
pub use game::session::{Session, SessionController, SessionState};
