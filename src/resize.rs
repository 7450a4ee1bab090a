use grid_util::ValueGrid;
use log::info;

use crate::cell::{Cell, CellKind, Position};
use crate::grid::Grid;

/// Smallest grid that can hold two distinct markers.
pub const MIN_RESIZE: usize = 2;

/// Clamps both markers into a `size`×`size` grid, row and column separately. When that lands the
/// end on the start, the end moves to the first in-bounds neighbour in up, down, left, right
/// order.
pub fn clamp_markers(start: Position, end: Position, size: usize) -> (Position, Position) {
    let size = size.max(MIN_RESIZE);
    let start = start.clamped(size);
    let mut end = end.clamped(size);
    if start == end {
        let n = [
            start.row.checked_sub(1).map(|row| Position::new(row, start.col)),
            Some(Position::new(start.row + 1, start.col)),
            start.col.checked_sub(1).map(|col| Position::new(start.row, col)),
            Some(Position::new(start.row, start.col + 1)),
        ];
        if let Some(nudged) = n.into_iter().flatten().find(|p| p.in_bounds(size)) {
            info!("End marker merged with start at {}, moving it to {}", start, nudged);
            end = nudged;
        }
    }
    (start, end)
}

/// Rebuilds the grid at `new_size`. Obstacles inside the overlap of the old and new bounds are
/// kept, markers are clamped and stamped last, and no search decoration survives.
pub fn resize(
    grid: &Grid,
    start: Position,
    end: Position,
    new_size: usize,
) -> (Grid, Position, Position) {
    let new_size = new_size.max(MIN_RESIZE);
    let (start, end) = clamp_markers(start, end, new_size);
    let mask = grid.obstacle_mask();
    let mut cells = Vec::with_capacity(new_size * new_size);
    for row in 0..new_size {
        for col in 0..new_size {
            let position = Position::new(row, col);
            let blocked = position.in_bounds(grid.size())
                && mask.get(col as i32, row as i32);
            let kind = if blocked {
                CellKind::Obstacle
            } else {
                CellKind::Empty
            };
            cells.push(Cell::new(position, kind));
        }
    }
    let mut resized = Grid::from_cells(new_size, cells);
    resized.stamp_markers(start, end);
    info!(
        "Resized grid from {} to {}, markers at {} and {}",
        grid.size(),
        new_size,
        start,
        end
    );
    (resized, start, end)
}
