use super::grid::Grid;
use rand::Rng;
use ratatui::layout::Position;

/// Pick a uniformly random cell of `grid` that is neither occupied nor equal
/// to `avoid`.
///
/// Cells are drawn until a free one turns up, so this never returns if the
/// snake covers the whole board.
pub(super) fn place_food<R: Rng>(grid: &Grid, avoid: Position, rng: &mut R) -> Position {
    let size = grid.size();
    loop {
        let pos = Position::new(rng.random_range(0..size), rng.random_range(0..size));
        if pos != avoid && !grid.occupied(pos) {
            return pos;
        }
    }
}
