use rand::Rng;

use crate::config::BoardConfig;
use crate::error::GameError;
use crate::snake::{Position, Snake};

/// Food entity currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell the snake does not cover.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        board: &BoardConfig,
        snake: &Snake,
    ) -> Result<Self, GameError> {
        place(rng, board, snake).map(Self::new)
    }
}

/// Picks a uniformly random free cell by rejection sampling.
///
/// Candidates are whole cells, so food never hangs over a board edge.
/// Fails with [`GameError::BoardFull`] instead of looping forever when the
/// snake covers every cell.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    board: &BoardConfig,
    snake: &Snake,
) -> Result<Position, GameError> {
    let cell_size = board.cell_size_px();
    let capacity = board.total_cells();
    let occupied = snake.occupied_cells(cell_size);

    if occupied >= capacity {
        tracing::warn!(occupied, capacity, "no free cell left for food");
        return Err(GameError::BoardFull { occupied, capacity });
    }

    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        let candidate = board.cell_origin(
            rng.gen_range(0..board.columns()),
            rng.gen_range(0..board.rows()),
        );

        if !snake.occupies(candidate, cell_size) {
            tracing::debug!(x = candidate.x, y = candidate.y, attempts, "placed food");
            return Ok(candidate);
        }
    }
}
