use ratatui::layout::Position;
#[cfg(test)]
use ratatui::layout::{Positions, Rect, Size};

/// Occupancy of the cells of a square board: a cell is occupied iff it is
/// part of the snake's body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Grid {
    size: u16,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with side length `size` in which no cells are occupied
    pub(super) fn new(size: u16) -> Grid {
        let len = usize::from(size) * usize::from(size);
        Grid {
            size,
            cells: vec![false; len],
        }
    }

    pub(super) fn size(&self) -> u16 {
        self.size
    }

    /// Is the cell at `pos` part of the snake?  Positions outside the board
    /// are never occupied.
    pub(super) fn occupied(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i])
    }

    /// Mark the cell at `pos` as occupied or unoccupied.  Positions outside
    /// the board are ignored.
    pub(super) fn set_occupied(&mut self, pos: Position, occupied: bool) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = occupied;
        }
    }

    /// Mark every cell as unoccupied
    pub(super) fn reset(&mut self) {
        self.cells.fill(false);
    }

    /// Return the number of occupied cells
    #[cfg(test)]
    pub(super) fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate over every position on the board, row by row
    #[cfg(test)]
    pub(super) fn positions(&self) -> Positions {
        Rect::from((Position::ORIGIN, Size::new(self.size, self.size))).positions()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.size && pos.y < self.size)
            .then(|| usize::from(pos.y) * usize::from(self.size) + usize::from(pos.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(20);
        assert_eq!(grid.size(), 20);
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.positions().all(|p| !grid.occupied(p)));
    }

    #[test]
    fn set_and_clear() {
        let mut grid = Grid::new(4);
        grid.set_occupied(Position::new(3, 1), true);
        assert!(grid.occupied(Position::new(3, 1)));
        assert!(!grid.occupied(Position::new(1, 3)));
        assert_eq!(grid.occupied_count(), 1);
        grid.set_occupied(Position::new(3, 1), false);
        assert!(!grid.occupied(Position::new(3, 1)));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut grid = Grid::new(3);
        for p in grid.positions().collect::<Vec<_>>() {
            grid.set_occupied(p, true);
        }
        assert_eq!(grid.occupied_count(), 9);
        grid.reset();
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn out_of_bounds() {
        let mut grid = Grid::new(3);
        grid.set_occupied(Position::new(3, 0), true);
        grid.set_occupied(Position::new(0, 3), true);
        assert_eq!(grid.occupied_count(), 0);
        assert!(!grid.occupied(Position::new(3, 0)));
    }
}
