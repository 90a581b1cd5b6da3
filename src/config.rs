use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::snake::Position;

const APP_DIR_NAME: &str = "pixel-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in pixels.
pub const DEFAULT_BOARD_WIDTH: u32 = 600;

/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: u32 = 450;

/// Default edge length of one cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 30;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Immutable board geometry and timing for one session.
///
/// Dimensions are in pixels and must be whole multiples of the cell size,
/// so every on-board position is a cell origin.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoardConfig {
    width: u32,
    height: u32,
    cell_size: u32,
    tick_interval: Duration,
}

impl BoardConfig {
    /// Validates and builds a board configuration.
    pub fn new(
        width: u32,
        height: u32,
        cell_size: u32,
        tick_interval_ms: u64,
    ) -> Result<Self, ConfigError> {
        if cell_size == 0 || i32::try_from(cell_size).is_err() {
            return Err(ConfigError::InvalidCellSize(cell_size));
        }

        for (axis, length) in [("width", width), ("height", height)] {
            if length < cell_size.saturating_mul(2) || i32::try_from(length).is_err() {
                return Err(ConfigError::DimensionTooSmall {
                    axis,
                    length,
                    cell_size,
                });
            }
            if length % cell_size != 0 {
                return Err(ConfigError::MisalignedDimension {
                    axis,
                    length,
                    cell_size,
                });
            }
        }

        if tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(Self {
            width,
            height,
            cell_size,
            tick_interval: Duration::from_millis(tick_interval_ms),
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Cell size as a signed pixel step.
    #[must_use]
    pub fn cell_size_px(&self) -> i32 {
        self.cell_size as i32
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.width / self.cell_size
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.height / self.cell_size
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Origin of the last column, the far edge used by wraparound.
    #[must_use]
    pub fn max_x(&self) -> i32 {
        (self.columns() as i32 - 1) * self.cell_size_px()
    }

    /// Origin of the last row, the far edge used by wraparound.
    #[must_use]
    pub fn max_y(&self) -> i32 {
        (self.rows() as i32 - 1) * self.cell_size_px()
    }

    /// Cell origin closest to the middle of the board.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(
            (self.columns() / 2) as i32 * self.cell_size_px(),
            (self.rows() / 2) as i32 * self.cell_size_px(),
        )
    }

    /// Returns the origin of the cell at `column`, `row`.
    #[must_use]
    pub fn cell_origin(&self, column: u32, row: u32) -> Position {
        Position::new(
            column as i32 * self.cell_size_px(),
            row as i32 * self.cell_size_px(),
        )
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

/// Optional on-disk overrides. Missing fields keep their defaults.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub cell_size: Option<u32>,
    pub tick_ms: Option<u64>,
}

impl ConfigFile {
    /// Layers `overrides` on top of `self`, field by field.
    #[must_use]
    pub fn merged_with(self, overrides: Self) -> Self {
        Self {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            cell_size: overrides.cell_size.or(self.cell_size),
            tick_ms: overrides.tick_ms.or(self.tick_ms),
        }
    }

    /// Resolves the layered values into a validated board configuration.
    pub fn resolve(self) -> Result<BoardConfig, ConfigError> {
        BoardConfig::new(
            self.width.unwrap_or(DEFAULT_BOARD_WIDTH),
            self.height.unwrap_or(DEFAULT_BOARD_HEIGHT),
            self.cell_size.unwrap_or(DEFAULT_CELL_SIZE),
            self.tick_ms.unwrap_or(DEFAULT_TICK_INTERVAL_MS),
        )
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Loads overrides from `path`.
///
/// Returns empty overrides when the file does not exist yet.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
