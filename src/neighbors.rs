use smallvec::SmallVec;

use crate::cell::Position;
use crate::grid::Grid;
use crate::N_SMALLVEC_SIZE;

pub type Neighborhood = SmallVec<[Position; N_SMALLVEC_SIZE]>;

/// The in-bounds cells sharing an edge with `position`, always in up, down, left, right order.
/// Both solvers break ties through this order, so it must stay fixed.
pub fn neighbors(grid: &Grid, position: Position) -> Neighborhood {
    let Position { row, col } = position;
    let mut result = Neighborhood::new();
    if row > 0 {
        result.push(Position::new(row - 1, col));
    }
    if row + 1 < grid.size() {
        result.push(Position::new(row + 1, col));
    }
    if col > 0 {
        result.push(Position::new(row, col - 1));
    }
    if col + 1 < grid.size() {
        result.push(Position::new(row, col + 1));
    }
    result
}

/// [neighbors] without obstacles and without cells the current search already finalized.
pub fn unvisited_traversable_neighbors(grid: &Grid, position: Position) -> Neighborhood {
    neighbors(grid, position)
        .into_iter()
        .filter(|p| {
            grid.cell(*p)
                .map_or(false, |cell| !cell.visited && !cell.is_obstacle())
        })
        .collect()
}
