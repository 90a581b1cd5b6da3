use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while advancing the simulation.
#[derive(Debug, Error)]
pub enum GameError {
    /// No free cell is left for food; rejection sampling would never end.
    #[error("no free cell left for food: snake covers {occupied} of {capacity} cells")]
    BoardFull { occupied: usize, capacity: usize },
}

/// Failures raised while building the board configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be a positive pixel count, got {0}")]
    InvalidCellSize(u32),

    #[error("board {axis} of {length}px is shorter than two {cell_size}px cells")]
    DimensionTooSmall {
        axis: &'static str,
        length: u32,
        cell_size: u32,
    },

    #[error("board {axis} of {length}px is not a multiple of the {cell_size}px cell size")]
    MisalignedDimension {
        axis: &'static str,
        length: u32,
        cell_size: u32,
    },

    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,

    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
