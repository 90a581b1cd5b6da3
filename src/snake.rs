use std::collections::VecDeque;

use crate::config::BoardConfig;

/// Board position in pixel coordinates, y axis pointing up.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the index of the cell containing this position.
    #[must_use]
    pub fn cell(self, cell_size: i32) -> (i32, i32) {
        (self.x.div_euclid(cell_size), self.y.div_euclid(cell_size))
    }

    /// Returns true when both positions occupy the same cell.
    #[must_use]
    pub fn overlaps(self, other: Self, cell_size: i32) -> bool {
        self.cell(cell_size) == other.cell(cell_size)
    }

    /// Returns the position one cell further along `velocity`, without wrapping.
    #[must_use]
    pub fn stepped(self, velocity: Velocity, cell_size: i32) -> Self {
        Self {
            x: self.x + velocity.dx * cell_size,
            y: self.y + velocity.dy * cell_size,
        }
    }

    /// Returns this position wrapped onto the board.
    ///
    /// Past the far edge re-enters at 0, below 0 re-enters at the far edge.
    #[must_use]
    pub fn wrapped(self, board: &BoardConfig) -> Self {
        Self {
            x: wrap_axis(self.x, board.max_x()),
            y: wrap_axis(self.y, board.max_y()),
        }
    }
}

fn wrap_axis(value: i32, far_edge: i32) -> i32 {
    if value > far_edge {
        0
    } else if value < 0 {
        far_edge
    } else {
        value
    }
}

/// Unit step vector. Exactly one component is non-zero.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const UP: Self = Self { dx: 0, dy: 1 };
    pub const DOWN: Self = Self { dx: 0, dy: -1 };
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };

    /// Returns true when `other` points the exact opposite way.
    #[must_use]
    pub fn is_reverse_of(self, other: Self) -> bool {
        self.dx + other.dx == 0 && self.dy + other.dy == 0
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::UP
    }
}

/// Outcome of advancing the body by one cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Advance {
    Clear,
    HitBody,
}

/// Ordered snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-segment snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Moves the head one cell along `velocity`, reusing the tail segment.
    ///
    /// The new head is tested against the body that remains after the tail
    /// is detached, excluding the old head. The segment is reinserted at the
    /// front either way so the body stays renderable after a collision.
    pub fn advance(&mut self, velocity: Velocity, board: &BoardConfig) -> Advance {
        let cell_size = board.cell_size_px();
        let old_head = self.head();

        if self.body.len() == 1 {
            self.body[0] = old_head.stepped(velocity, cell_size).wrapped(board);
            return Advance::Clear;
        }

        let _ = self.body.pop_back();
        let new_head = old_head.stepped(velocity, cell_size).wrapped(board);

        let hit = self
            .body
            .iter()
            .skip(1)
            .any(|segment| segment.overlaps(new_head, cell_size));

        self.body.push_front(new_head);

        if hit { Advance::HitBody } else { Advance::Clear }
    }

    /// Pushes a new head segment one cell ahead of the current head.
    pub fn grow_ahead(&mut self, velocity: Velocity, board: &BoardConfig) {
        let ahead = self
            .head()
            .stepped(velocity, board.cell_size_px())
            .wrapped(board);
        self.body.push_front(ahead);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment overlaps `position`.
    #[must_use]
    pub fn occupies(&self, position: Position, cell_size: i32) -> bool {
        self.body
            .iter()
            .any(|segment| segment.overlaps(position, cell_size))
    }

    /// Returns the number of distinct cells covered by the body.
    #[must_use]
    pub fn occupied_cells(&self, cell_size: i32) -> usize {
        let mut cells: Vec<(i32, i32)> = self.body.iter().map(|p| p.cell(cell_size)).collect();
        cells.sort_unstable();
        cells.dedup();
        cells.len()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}
