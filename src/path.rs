use itertools::Itertools;

use crate::cell::{CellKind, Position};
use crate::grid::Grid;

/// Walks the predecessor links of an explored grid back from `end` and returns the route in
/// start-to-end order. An empty path means `end` was never reached.
pub fn reconstruct_path(grid: &Grid, end: Position) -> Vec<Position> {
    let end_cell = match grid.cell(end) {
        Some(cell) => cell,
        None => return Vec::new(),
    };
    if end_cell.predecessor.is_none() && end_cell.kind != CellKind::Start {
        return Vec::new();
    }
    // A chain can never be longer than the grid, which also guards against a corrupt cycle.
    let mut path = std::iter::successors(Some(end_cell), |cell| {
        cell.predecessor.and_then(|ix| grid.cell_at(ix))
    })
    .take(grid.size() * grid.size())
    .map(|cell| cell.position)
    .collect::<Vec<Position>>();
    path.reverse();
    path
}

/// Whether each consecutive pair of the path shares an edge.
pub fn is_contiguous(path: &[Position]) -> bool {
    path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}
