//! Maze generation, layout, and text encoding module.
//!
//! This module provides the connectivity generator, the conversion of a grid
//! into placed geometry, and a plain-text rendering used for logging and for
//! dumping mazes to disk.

pub mod generator;
pub mod layout;

use self::generator::{Direction, Grid};
use crate::error::Result;
use chrono::Local;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders the grid as ASCII art, one text row per cell row.
///
/// `+` marks a peg, `-` a wall on the `-z` side of a cell, `|` a wall on its
/// `-x` side. The far `x = N` and `z = N` boundaries are always drawn.
///
/// ```text
/// +-+-+
/// |   |
/// + +-+
/// |   |
/// +-+-+
/// ```
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        for z in 0..n {
            for x in 0..n {
                let open = self.is_open(generator::Cell::new(x, z), Direction::North);
                write!(f, "+{}", if open { " " } else { "-" })?;
            }
            writeln!(f, "+")?;
            for x in 0..n {
                let open = self.is_open(generator::Cell::new(x, z), Direction::West);
                write!(f, "{} ", if open { " " } else { "|" })?;
            }
            writeln!(f, "|")?;
        }
        for _ in 0..n {
            write!(f, "+-")?;
        }
        writeln!(f, "+")
    }
}

/// Saves the grid's ASCII rendering to a timestamped file in `dir`.
///
/// # File Naming
/// The output file is named using the current local time in the format
/// `Maze_MM-DD-YY_HH-MMPM.mz` (e.g. `Maze_06-24-25_11-24PM.mz`).
///
/// # Errors
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub fn save_to_file(grid: &Grid, dir: &Path) -> Result<PathBuf> {
    let timestamp = Local::now().format("Maze_%m-%d-%y_%I-%M%p.mz").to_string();
    fs::create_dir_all(dir)?;

    let output_path = dir.join(timestamp);
    fs::write(&output_path, grid.to_string())?;

    log::info!("Maze saved to: {}", output_path.display());
    Ok(output_path)
}
