use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Move `pos` one cell in this direction on a square board with side
    /// `size`, wrapping around to the opposite edge when stepping off the
    /// board.
    pub(crate) fn advance(self, pos: Position, size: u16) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = decrement_wrapping(y, size),
            Direction::East => x = increment_wrapping(x, size),
            Direction::South => y = increment_wrapping(y, size),
            Direction::West => x = decrement_wrapping(x, size),
        }
        Position { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

fn decrement_wrapping(x: u16, max: u16) -> u16 {
    x.checked_sub(1).unwrap_or_else(|| max.saturating_sub(1))
}

fn increment_wrapping(x: u16, max: u16) -> u16 {
    x.checked_add(1).filter(|&xx| xx < max).unwrap_or(0)
}
