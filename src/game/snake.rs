use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake's cells, head first, along with the length it grows toward
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The positions of all of the cells in the snake, with the head at the
    /// front and the oldest cell at the back
    pub(super) body: VecDeque<Position>,

    /// The length the body should have once the tail has been trimmed
    pub(super) target_len: usize,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new snake consisting of just a head at `start`, facing east,
    /// with a target length of `target_len`.
    pub(super) fn new(start: Position, target_len: usize) -> Snake {
        Snake {
            body: VecDeque::from([start]),
            target_len,
            direction: Direction::East,
        }
    }

    /// Return the position of the snake's head.
    ///
    /// # Panics
    ///
    /// Panics if the body is empty, which cannot happen outside of the middle
    /// of a reset.
    pub(super) fn head(&self) -> Position {
        *self.body.front().expect("snake should never be empty")
    }

    /// Return the positions of the cells in the snake, head first
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(super) fn len(&self) -> usize {
        self.body.len()
    }

    pub(super) fn target_len(&self) -> usize {
        self.target_len
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    /// Add a new head to the front of the snake
    pub(super) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    /// Remove and return the oldest cell of the snake
    pub(super) fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    pub(super) fn clear(&mut self) {
        self.body.clear();
    }

    /// Change the snake's direction to `direction`, unless that would send it
    /// straight back the way it came.
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.direction = direction;
        }
    }

    /// Extend the snake's target length in response to eating food
    pub(super) fn grow(&mut self) {
        self.target_len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn push_and_pop() {
        let mut snake = Snake::new(Position::new(0, 10), 2);
        snake.push_head(Position::new(1, 10));
        snake.push_head(Position::new(2, 10));
        assert_eq!(snake.head(), Position::new(2, 10));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.pop_tail(), Some(Position::new(0, 10)));
        assert_eq!(
            snake.body(),
            &VecDeque::from([Position::new(2, 10), Position::new(1, 10)])
        );
        snake.clear();
        assert_eq!(snake.len(), 0);
        assert_eq!(snake.pop_tail(), None);
    }

    #[rstest]
    #[case(Direction::East, Direction::North, Direction::North)]
    #[case(Direction::East, Direction::South, Direction::South)]
    #[case(Direction::East, Direction::West, Direction::East)]
    #[case(Direction::East, Direction::East, Direction::East)]
    #[case(Direction::North, Direction::South, Direction::North)]
    #[case(Direction::South, Direction::North, Direction::South)]
    #[case(Direction::West, Direction::East, Direction::West)]
    #[case(Direction::West, Direction::North, Direction::North)]
    fn test_turn(#[case] facing: Direction, #[case] request: Direction, #[case] after: Direction) {
        let mut snake = Snake::new(Position::new(3, 3), 2);
        snake.direction = facing;
        snake.turn(request);
        assert_eq!(snake.direction(), after);
    }

    #[test]
    fn grow() {
        let mut snake = Snake::new(Position::new(3, 3), 2);
        snake.grow();
        assert_eq!(snake.target_len(), 3);
    }
}
