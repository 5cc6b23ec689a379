mod direction;
mod food;
mod grid;
mod snake;
pub(crate) use self::direction::Direction;
use self::food::place_food;
use self::grid::Grid;
use self::snake::Snake;
use crate::consts;
use crate::util::BoardLayout;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Widget},
};
use std::time::{Duration, Instant};

/// Tunable parameters of a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameRules {
    /// Side length of the square board
    pub(crate) board_size: u16,

    /// Target length of the snake at the start of each round
    pub(crate) initial_size: usize,

    /// Time between movements at the start of each round
    pub(crate) initial_delay: Duration,

    /// Amount by which the time between movements shrinks per food eaten
    pub(crate) delay_step: Duration,

    /// Lower bound on the time between movements
    pub(crate) min_delay: Duration,
}

impl Default for GameRules {
    fn default() -> GameRules {
        GameRules {
            board_size: consts::BOARD_SIZE,
            initial_size: consts::INITIAL_SIZE,
            initial_delay: consts::INITIAL_DELAY,
            delay_step: consts::DELAY_STEP,
            min_delay: consts::MIN_DELAY,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    rules: GameRules,
    grid: Grid,
    snake: Snake,
    food: Position,
    score: u32,
    move_delay: Duration,
    last_move: Instant,
    state: GameState,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(rules: GameRules, now: Instant) -> Self {
        Game::new_with_rng(rules, rand::rng(), now)
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(rules: GameRules, rng: R, now: Instant) -> Game<R> {
        let start = Self::start_position(rules.board_size);
        let mut game = Game {
            rng,
            rules,
            grid: Grid::new(rules.board_size),
            snake: Snake::new(start, rules.initial_size),
            food: start,
            score: 0,
            move_delay: rules.initial_delay,
            last_move: now,
            state: GameState::Running,
        };
        game.reset(now);
        game
    }

    /// Start a new round: the snake is reduced to a single cell at the left
    /// edge of the board's middle row, facing east, and everything else is
    /// returned to its initial value.
    pub(crate) fn reset(&mut self, now: Instant) {
        let start = Self::start_position(self.rules.board_size);
        self.score = 0;
        self.move_delay = self.rules.initial_delay;
        self.last_move = now;
        self.snake.clear();
        self.snake.push_head(start);
        self.snake.target_len = self.rules.initial_size;
        self.snake.direction = Direction::East;
        self.grid.reset();
        self.grid.set_occupied(start, true);
        self.food = place_food(&self.grid, start, &mut self.rng);
        self.state = GameState::Running;
        tracing::debug!(food = ?self.food, "Started new round");
    }

    /// Advance the snake if the game is running and more than the current
    /// move delay has passed since the last movement.  Returns `true` if the
    /// snake moved.
    pub(crate) fn update(&mut self, now: Instant) -> bool {
        if self.state != GameState::Running
            || now.saturating_duration_since(self.last_move) <= self.move_delay
        {
            return false;
        }
        self.last_move = now;
        self.step();
        true
    }

    /// Move the snake one cell forwards.
    ///
    /// The tail is trimmed before checking the new head for a collision, so
    /// the snake can follow directly behind its own tail.  Replacement food
    /// is placed before the new head is added, so it is chosen from the
    /// cells free at that point other than the one the head is entering.
    pub(crate) fn step(&mut self) {
        let next = self
            .snake
            .direction()
            .advance(self.snake.head(), self.grid.size());
        if next == self.food {
            self.score += 1;
            self.snake.grow();
            self.move_delay = self
                .move_delay
                .saturating_sub(self.rules.delay_step)
                .max(self.rules.min_delay);
            self.food = place_food(&self.grid, next, &mut self.rng);
            tracing::debug!(
                score = self.score,
                move_delay_ms = self.move_delay.as_millis(),
                food = ?self.food,
                "Snake ate food"
            );
        }
        self.snake.push_head(next);
        if self.snake.len() > self.snake.target_len() {
            if let Some(tail) = self.snake.pop_tail() {
                self.grid.set_occupied(tail, false);
            }
        }
        if self.grid.occupied(next) {
            tracing::debug!(head = ?next, "Snake collided with itself");
            self.state = GameState::GameOver;
        }
        self.grid.set_occupied(next, true);
        tracing::trace!(head = ?next, len = self.snake.len(), "Snake moved");
    }
}

impl<R> Game<R> {
    fn start_position(board_size: u16) -> Position {
        Position::new(0, board_size / 2)
    }

    /// Request that the snake turn to face `direction`.  Requests to reverse
    /// direction are ignored.
    pub(crate) fn turn(&mut self, direction: Direction) {
        self.snake.turn(direction);
    }

    /// End the current round immediately
    pub(crate) fn end_round(&mut self) {
        self.state = GameState::GameOver;
    }

    pub(crate) fn is_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn move_delay(&self) -> Duration {
        self.move_delay
    }

    pub(crate) fn board_size(&self) -> u16 {
        self.grid.size()
    }
}

/// Fill the terminal area of the board cell at `pos`
fn fill_cell(layout: &BoardLayout, pos: Position, style: Style, buf: &mut Buffer) {
    buf.set_style(layout.cell_rect(pos.x, pos.y), style);
}

impl<R> Widget for &Game<R> {
    // `area` is the whole display area; the board is drawn centered in it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = BoardLayout::new(area, self.grid.size());
        Block::bordered()
            .border_style(consts::BORDER_STYLE)
            .render(layout.outer().intersection(area), buf);
        buf.set_style(layout.inner, consts::EMPTY_STYLE);
        for &pos in self.snake.body().iter().skip(1) {
            fill_cell(&layout, pos, consts::BODY_STYLE, buf);
        }
        if let Some(&head) = self.snake.body().front() {
            fill_cell(&layout, head, consts::HEAD_STYLE, buf);
        }
        fill_cell(&layout, self.food, consts::FOOD_STYLE, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    GameOver,
}
