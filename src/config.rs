//! Session configuration.
//!
//! [`GameConfig`] gathers the maze dimensions, timing and mouse tuning in
//! one serde-friendly struct. Hosts either start from [`Default`], load a
//! JSON file with [`GameConfig::from_json_file`], or both, and must pass the
//! result through [`GameConfig::validate`] (the session controller does this
//! for them).

use crate::error::{MazeError, Result};
use crate::game::ExpiryElapsed;
use crate::game::collision::AGENT_RADIUS_FACTOR;
use crate::game::mouse::MOUSE_MODEL_SIZE;
use crate::math::Vec3;
use crate::maze::generator::StartCell;
use crate::maze::layout::LayoutParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The maze is `maze_size x maze_size` cells
    pub maze_size: usize,
    pub cell_size: f32,
    pub wall_width: f32,
    pub wall_height: f32,
    /// Minimum corner of the maze; `origin.y` is the floor top
    pub origin: Vec3,
    pub game_length_secs: f32,
    pub start_cell: StartCell,
    pub expiry_elapsed: ExpiryElapsed,
    /// Forward speed the host applies while driving, units per second
    pub mouse_speed: f32,
    /// Turn rate the host applies while steering, radians per second
    pub mouse_turn_speed: f32,
    /// Height of the mouse centre above the floor
    pub mouse_spawn_height: f32,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze_size: 12,
            cell_size: 3.0,
            wall_width: 0.5,
            wall_height: 3.0,
            origin: Vec3::ZERO,
            game_length_secs: 60.0,
            start_cell: StartCell::Origin,
            expiry_elapsed: ExpiryElapsed::GameLength,
            mouse_speed: 4.0,
            mouse_turn_speed: 2.0,
            mouse_spawn_height: 1.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            cell_size: self.cell_size,
            wall_width: self.wall_width,
            wall_height: self.wall_height,
            origin: self.origin,
        }
    }

    /// Game length as a [`Duration`]; fails for lengths no `Duration` can hold.
    pub fn game_length(&self) -> Result<Duration> {
        Duration::try_from_secs_f32(self.game_length_secs).map_err(|e| {
            MazeError::invalid(format!(
                "game_length_secs {} is out of range: {e}",
                self.game_length_secs
            ))
        })
    }

    /// Rejects configurations no session can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.maze_size == 0 {
            return Err(MazeError::invalid("maze_size must be at least 1"));
        }
        self.layout_params().validate()?;

        let positive = [
            ("game_length_secs", self.game_length_secs),
            ("mouse_spawn_height", self.mouse_spawn_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(MazeError::invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("mouse_speed", self.mouse_speed),
            ("mouse_turn_speed", self.mouse_turn_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MazeError::invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        self.game_length()?;

        // The spawn cell must leave the mouse clear of the walls around it
        let reach = MOUSE_MODEL_SIZE.x() * AGENT_RADIUS_FACTOR;
        if self.cell_size * 0.5 <= reach {
            return Err(MazeError::invalid(format!(
                "cell_size {} is too narrow for the mouse (needs more than {:.3})",
                self.cell_size,
                2.0 * reach
            )));
        }
        // and clear of the floor below it
        let reach_y = MOUSE_MODEL_SIZE.y() * AGENT_RADIUS_FACTOR;
        if self.mouse_spawn_height <= reach_y {
            return Err(MazeError::invalid(format!(
                "mouse_spawn_height {} puts the mouse in the floor (needs more than {reach_y:.3})",
                self.mouse_spawn_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            GameConfig {
                maze_size: 0,
                ..GameConfig::default()
            },
            GameConfig {
                cell_size: -3.0,
                ..GameConfig::default()
            },
            GameConfig {
                wall_width: 0.0,
                ..GameConfig::default()
            },
            GameConfig {
                game_length_secs: 0.0,
                ..GameConfig::default()
            },
            GameConfig {
                cell_size: 1.2,
                ..GameConfig::default()
            },
            GameConfig {
                mouse_speed: f32::INFINITY,
                ..GameConfig::default()
            },
            GameConfig {
                mouse_spawn_height: 0.5,
                ..GameConfig::default()
            },
            GameConfig {
                game_length_secs: 1e30,
                ..GameConfig::default()
            },
        ];
        for config in cases {
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, MazeError::InvalidConfiguration { .. }),
                "{config:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_spawn_height_must_clear_the_floor() {
        let reach_y = MOUSE_MODEL_SIZE.y() * AGENT_RADIUS_FACTOR;
        let at_reach = GameConfig {
            mouse_spawn_height: reach_y,
            ..GameConfig::default()
        };
        assert!(at_reach.validate().is_err());

        let above = GameConfig {
            mouse_spawn_height: reach_y + 0.01,
            ..GameConfig::default()
        };
        above.validate().unwrap();
    }

    #[test]
    fn test_oversized_game_length_is_an_error() {
        let config = GameConfig {
            game_length_secs: 1e30,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.game_length(),
            Err(MazeError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            config.validate(),
            Err(MazeError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_json_fills_missing_fields() {
        let config: GameConfig = serde_json::from_str(
            r#"{ "maze_size": 6, "start_cell": "random", "origin": [1.0, 0.0, 2.0], "seed": 5 }"#,
        )
        .unwrap();

        assert_eq!(config.maze_size, 6);
        assert_eq!(config.start_cell, StartCell::Random);
        assert_eq!(config.origin, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.cell_size, GameConfig::default().cell_size);
        assert_eq!(config.expiry_elapsed, ExpiryElapsed::GameLength);
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("mouse-maze-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "game_length_secs": 30.0, "expiry_elapsed": "actual" }"#).unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        assert_eq!(config.game_length().unwrap(), Duration::from_secs(30));
        assert_eq!(config.expiry_elapsed, ExpiryElapsed::Actual);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            GameConfig::from_json_file(&path),
            Err(MazeError::Io(_))
        ));
    }
}
