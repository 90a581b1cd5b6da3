use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::BoardConfig;
use crate::error::GameError;
use crate::food::Food;
use crate::input::{propose, Direction, GameInput};
use crate::snake::{Advance, Position, Snake, Velocity};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// What a single tick did to the state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is over; nothing changed.
    Frozen,
    Moved,
    /// The head reached `food`; the snake grew and food was relocated.
    Ate { food: Position },
    /// The head ran into the body at `at`.
    Collided { at: Position },
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub velocity: Velocity,
    pub tick_count: u64,
    pub status: GameStatus,
    pending_velocity: Velocity,
    board: BoardConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh session seeded from OS entropy.
    pub fn new(board: BoardConfig) -> Result<Self, GameError> {
        Self::with_rng(board, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(board: BoardConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(board, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: BoardConfig, mut rng: StdRng) -> Result<Self, GameError> {
        let snake = Snake::new(board.center());
        let food = Food::spawn(&mut rng, &board, &snake)?;

        Ok(Self {
            snake,
            food,
            velocity: Velocity::default(),
            tick_count: 0,
            status: GameStatus::Running,
            pending_velocity: Velocity::default(),
            board,
            rng,
        })
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Self-collision is resolved before food contact, so a fatal move
    /// never grows the snake. When growth leaves no free cell for food the
    /// state moves to `GameOver` and [`GameError::BoardFull`] is returned.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.status == GameStatus::GameOver {
            return Ok(TickOutcome::Frozen);
        }

        self.velocity = self.pending_velocity;
        self.tick_count += 1;

        if self.snake.advance(self.velocity, &self.board) == Advance::HitBody {
            let at = self.snake.head();
            self.status = GameStatus::GameOver;
            tracing::info!(
                x = at.x,
                y = at.y,
                length = self.snake.len(),
                ticks = self.tick_count,
                "snake hit its own body"
            );
            return Ok(TickOutcome::Collided { at });
        }

        let head = self.snake.head();
        let cell_size = self.board.cell_size_px();
        if !head.overlaps(self.food.position, cell_size) {
            tracing::trace!(x = head.x, y = head.y, "tick");
            return Ok(TickOutcome::Moved);
        }

        let eaten = self.food.position;
        self.snake.grow_ahead(self.velocity, &self.board);
        match Food::spawn(&mut self.rng, &self.board, &self.snake) {
            Ok(food) => self.food = food,
            Err(error) => {
                // The board is full: freeze so no later tick runs with food under the body.
                self.status = GameStatus::GameOver;
                return Err(error);
            }
        }
        tracing::debug!(length = self.snake.len(), "snake ate food");

        Ok(TickOutcome::Ate { food: eaten })
    }

    /// Applies one external input event.
    ///
    /// `Quit` belongs to the host loop and is ignored here.
    pub fn apply_input(&mut self, input: GameInput) -> Result<(), GameError> {
        match input {
            GameInput::Direction(direction) => self.request_direction(direction),
            GameInput::Reset => self.reset()?,
            GameInput::Quit => {}
        }

        Ok(())
    }

    /// Stores a direction for the next tick, dropping exact reversals.
    ///
    /// Checked against the velocity of the last tick rather than the pending
    /// one, so a burst of turns between ticks can never add up to a reversal.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::GameOver {
            return;
        }

        let proposed = propose(self.velocity, direction);
        if proposed != direction.velocity() {
            tracing::trace!(?direction, "dropped reversal");
            return;
        }

        self.pending_velocity = proposed;
    }

    /// Starts a new round: one centred segment, fresh food, default heading.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let snake = Snake::new(self.board.center());
        let food = Food::spawn(&mut self.rng, &self.board, &snake)?;

        self.snake = snake;
        self.food = food;
        self.velocity = Velocity::default();
        self.pending_velocity = Velocity::default();
        self.tick_count = 0;
        self.status = GameStatus::Running;
        tracing::info!("game reset");

        Ok(())
    }

    /// Velocity the next tick will use.
    #[must_use]
    pub fn pending_velocity(&self) -> Velocity {
        self.pending_velocity
    }

    /// Score shown to the player: the snake length.
    #[must_use]
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BoardConfig;
    use crate::error::GameError;
    use crate::food::Food;
    use crate::input::{Direction, GameInput};
    use crate::snake::{Position, Snake, Velocity};

    use super::{GameState, GameStatus, TickOutcome};

    fn board() -> BoardConfig {
        BoardConfig::new(300, 300, 30, 100).expect("test board should be valid")
    }

    fn state_with(snake: Snake, food: Position) -> GameState {
        let mut state = GameState::new_with_seed(board(), 1).expect("state should build");
        state.snake = snake;
        state.food = Food::new(food);
        state
    }

    fn segments(state: &GameState) -> Vec<Position> {
        state.snake.segments().copied().collect()
    }

    #[test]
    fn new_state_starts_centred_and_running() {
        let state = GameState::new_with_seed(board(), 42).expect("state should build");

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(segments(&state), vec![Position::new(150, 150)]);
        assert_eq!(state.velocity, Velocity::UP);
        assert!(!state.snake.occupies(state.food.position, 30));
    }

    #[test]
    fn tick_without_food_moves_head_one_cell() {
        let mut state = state_with(Snake::new(Position::new(150, 150)), Position::new(0, 0));

        let outcome = state.tick().expect("tick should succeed");

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(segments(&state), vec![Position::new(150, 180)]);
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn eating_grows_by_one_and_relocates_food() {
        let mut state = state_with(
            Snake::new(Position::new(150, 150)),
            Position::new(150, 180),
        );

        let outcome = state.tick().expect("tick should succeed");

        assert_eq!(
            outcome,
            TickOutcome::Ate {
                food: Position::new(150, 180)
            }
        );
        assert_eq!(
            segments(&state),
            vec![Position::new(150, 210), Position::new(150, 180)]
        );
        assert!(!state.snake.occupies(state.food.position, 30));
    }

    #[test]
    fn growth_segment_wraps_across_far_edge() {
        let mut state = state_with(Snake::new(Position::new(240, 0)), Position::new(270, 0));
        state.request_direction(Direction::Right);

        state.tick().expect("tick should succeed");

        assert_eq!(
            segments(&state),
            vec![Position::new(0, 0), Position::new(270, 0)]
        );
    }

    #[test]
    fn collision_freezes_state_without_growth() {
        let body = vec![
            Position::new(60, 60),
            Position::new(30, 60),
            Position::new(30, 90),
            Position::new(60, 90),
            Position::new(90, 90),
            Position::new(90, 60),
        ];
        let mut state = state_with(
            Snake::from_segments(body).expect("segments are non-empty"),
            Position::new(60, 90),
        );

        let outcome = state.tick().expect("tick should succeed");

        assert_eq!(
            outcome,
            TickOutcome::Collided {
                at: Position::new(60, 90)
            }
        );
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake.len(), 6);
        assert_eq!(state.food, Food::new(Position::new(60, 90)));
    }

    #[test]
    fn stacked_body_collides_deterministically() {
        let body = vec![
            Position::new(150, 150),
            Position::new(150, 180),
            Position::new(150, 180),
        ];
        let mut state = state_with(
            Snake::from_segments(body).expect("segments are non-empty"),
            Position::new(30, 30),
        );

        let outcome = state.tick().expect("tick should succeed");

        assert_eq!(
            outcome,
            TickOutcome::Collided {
                at: Position::new(150, 180)
            }
        );
        assert_eq!(
            segments(&state),
            vec![
                Position::new(150, 180),
                Position::new(150, 150),
                Position::new(150, 180),
            ]
        );
        assert_eq!(state.food.position, Position::new(30, 30));
        assert!(state.is_game_over());
    }

    #[test]
    fn filling_the_board_reports_board_full_and_freezes() {
        let board = BoardConfig::new(90, 60, 30, 100).expect("test board should be valid");
        let mut state = GameState::new_with_seed(board, 5).expect("state should build");
        state.snake = Snake::from_segments(vec![
            Position::new(0, 30),
            Position::new(0, 0),
            Position::new(30, 0),
            Position::new(60, 0),
            Position::new(60, 30),
        ])
        .expect("segments are non-empty");
        state.food = Food::new(Position::new(30, 30));
        state.request_direction(Direction::Right);

        let result = state.tick();

        assert!(matches!(
            result,
            Err(GameError::BoardFull {
                occupied: 6,
                capacity: 6
            })
        ));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake.len(), 6);

        let before = segments(&state);
        assert_eq!(state.tick().expect("frozen tick"), TickOutcome::Frozen);
        assert_eq!(segments(&state), before);
    }

    #[test]
    fn game_over_ignores_ticks_and_directions() {
        let mut state = state_with(Snake::new(Position::new(150, 150)), Position::new(0, 0));
        state.status = GameStatus::GameOver;
        let before = segments(&state);

        state.request_direction(Direction::Left);
        let outcome = state.tick().expect("tick should succeed");

        assert_eq!(outcome, TickOutcome::Frozen);
        assert_eq!(segments(&state), before);
        assert_eq!(state.velocity, Velocity::UP);
        assert_eq!(state.pending_velocity(), Velocity::UP);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn reversal_request_is_dropped() {
        let mut state = state_with(Snake::new(Position::new(150, 150)), Position::new(0, 0));
        state.request_direction(Direction::Right);
        state.tick().expect("tick should succeed");

        state.request_direction(Direction::Left);
        state.tick().expect("tick should succeed");

        assert_eq!(state.velocity, Velocity::RIGHT);
        assert_eq!(state.snake.head(), Position::new(210, 150));
    }

    #[test]
    fn dropped_reversal_keeps_earlier_turn_in_same_interval() {
        let mut state = state_with(Snake::new(Position::new(150, 150)), Position::new(0, 0));
        state.request_direction(Direction::Right);
        state.tick().expect("tick should succeed");

        state.request_direction(Direction::Up);
        state.request_direction(Direction::Left);
        state.tick().expect("tick should succeed");

        assert_eq!(state.velocity, Velocity::UP);
    }

    #[test]
    fn last_legal_direction_wins_between_ticks() {
        let mut state = state_with(Snake::new(Position::new(150, 150)), Position::new(0, 0));

        state.request_direction(Direction::Left);
        state.request_direction(Direction::Right);
        assert_eq!(state.velocity, Velocity::UP);

        state.tick().expect("tick should succeed");

        assert_eq!(state.velocity, Velocity::RIGHT);
        assert_eq!(state.snake.head(), Position::new(180, 150));
    }

    #[test]
    fn reset_from_game_over_restores_a_fresh_round() {
        let mut state = state_with(
            Snake::from_segments(vec![
                Position::new(30, 30),
                Position::new(60, 30),
                Position::new(90, 30),
            ])
            .expect("segments are non-empty"),
            Position::new(0, 0),
        );
        state.status = GameStatus::GameOver;
        state.velocity = Velocity::LEFT;

        state
            .apply_input(GameInput::Reset)
            .expect("reset should succeed");

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(segments(&state), vec![Position::new(150, 150)]);
        assert_eq!(state.velocity, Velocity::UP);
        assert_eq!(state.pending_velocity(), Velocity::UP);
        assert_eq!(state.tick_count, 0);
        assert!(!state.snake.occupies(state.food.position, 30));
    }

    #[test]
    fn quit_is_not_a_core_concern() {
        let mut state = state_with(Snake::new(Position::new(150, 150)), Position::new(0, 0));

        state
            .apply_input(GameInput::Quit)
            .expect("quit should be ignored");

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(segments(&state), vec![Position::new(150, 150)]);
    }

    #[test]
    fn score_tracks_snake_length() {
        let mut state = state_with(
            Snake::new(Position::new(150, 150)),
            Position::new(150, 180),
        );
        assert_eq!(state.score(), 1);

        state.tick().expect("tick should succeed");

        assert_eq!(state.score(), 2);
    }
}
