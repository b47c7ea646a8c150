//! Error types shared across the maze, layout and session modules.

use thiserror::Error;

/// Everything that can go wrong when configuring or driving a maze session.
///
/// Generation, layout, collision and movement are total over valid input, so
/// the only failures are rejected configuration and degenerate placement
/// requests, plus the I/O of the optional config file and maze dump.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Degenerate placement region: x in [{min_x}, {max_x}), z in [{min_z}, {max_z})")]
    DegenerateRegion {
        min_x: usize,
        max_x: usize,
        min_z: usize,
        max_z: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] serde_json::Error),
}

impl MazeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MazeError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
