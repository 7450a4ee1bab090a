use core::fmt;
use grid_util::{BoolGrid, ValueGrid};
use std::sync::Arc;

use crate::cell::{Cell, CellKind, Marker, Position};
use crate::error::{GridError, Result};

/// Square arena of [Cell]s indexed by `row * size + col`.
///
/// Cells are stored row by row, each row behind its own [Arc], so cloning a [Grid] is cheap and
/// every snapshot handed out stays valid. All editing operations return a new grid. A write goes
/// through [Arc::make_mut] on the row list and on the touched row only, so a snapshot held
/// elsewhere never observes a change and the untouched rows stay shared between both.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    rows: Arc<Vec<Row>>,
}

type Row = Arc<Vec<Cell>>;

impl Grid {
    /// Allocates a `size`×`size` grid of empty cells and stamps the two markers on it.
    pub fn new(size: usize, start: Position, end: Position) -> Result<Grid> {
        Grid::check_markers(size, start, end)?;
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Position::new(row, col), CellKind::Empty));
            }
        }
        let mut grid = Grid::from_cells(size, cells);
        grid.stamp_markers(start, end);
        Ok(grid)
    }

    /// Wraps row-major cells without checking the marker invariant.
    pub(crate) fn from_cells(size: usize, cells: Vec<Cell>) -> Grid {
        debug_assert_eq!(cells.len(), size * size);
        let rows = cells
            .chunks(size.max(1))
            .map(|row| Arc::new(row.to_vec()))
            .collect::<Vec<Row>>();
        Grid {
            size,
            rows: Arc::new(rows),
        }
    }

    pub(crate) fn check_markers(size: usize, start: Position, end: Position) -> Result<()> {
        for position in [start, end] {
            if !position.in_bounds(size) {
                return Err(GridError::out_of_bounds(position, size));
            }
        }
        if start == end {
            return Err(GridError::InvalidMarker {
                position: end,
                reason: "start and end must be distinct cells",
            });
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }
    pub fn in_bounds(&self, position: Position) -> bool {
        position.in_bounds(self.size)
    }
    pub fn index(&self, position: Position) -> usize {
        position.row * self.size + position.col
    }
    /// Inverse of [index](Self::index).
    pub fn position(&self, ix: usize) -> Position {
        let size = self.size.max(1);
        Position::new(ix / size, ix % size)
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().flat_map(|row| row.iter())
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(|row| row.as_slice())
    }
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        if self.in_bounds(position) {
            self.rows.get(position.row)?.get(position.col)
        } else {
            None
        }
    }
    pub fn cell_at(&self, ix: usize) -> Option<&Cell> {
        self.cell(self.position(ix))
    }
    pub fn get(&self, position: Position) -> Result<&Cell> {
        self.cell(position)
            .ok_or_else(|| GridError::out_of_bounds(position, self.size))
    }
    pub fn kind(&self, position: Position) -> Option<CellKind> {
        self.cell(position).map(|c| c.kind)
    }
    /// The first cell of the given kind in row-major order.
    pub fn find(&self, kind: CellKind) -> Option<Position> {
        self.cells().find(|c| c.kind == kind).map(|c| c.position)
    }
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells().filter(|c| c.kind == kind).count()
    }
    /// Whether both grids still point at the same storage for `row`.
    pub fn shares_row(&self, other: &Grid, row: usize) -> bool {
        match (self.rows.get(row), other.rows.get(row)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Mutable access to every cell, copying each row first if a snapshot still shares it.
    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        Arc::make_mut(&mut self.rows)
            .iter_mut()
            .flat_map(|row| Arc::make_mut(row).iter_mut())
    }
    /// Mutable access to one cell. Only its row is copied.
    pub(crate) fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        if !self.in_bounds(position) {
            return None;
        }
        let row = Arc::make_mut(&mut self.rows).get_mut(position.row)?;
        Arc::make_mut(row).get_mut(position.col)
    }

    fn check_editable(&self, position: Position) -> Result<()> {
        let cell = self.get(position)?;
        if cell.kind.is_marker() {
            return Err(GridError::InvalidMarker {
                position,
                reason: "marker cells only move through marker synchronization",
            });
        }
        Ok(())
    }

    /// Returns a copy with one cell's kind replaced. Markers can neither be overwritten nor
    /// placed this way.
    pub fn set_cell_kind(&self, position: Position, kind: CellKind) -> Result<Grid> {
        self.check_editable(position)?;
        if kind.is_marker() {
            return Err(GridError::InvalidMarker {
                position,
                reason: "markers are placed through marker synchronization",
            });
        }
        let mut grid = self.clone();
        if let Some(cell) = grid.cell_mut(position) {
            cell.kind = kind;
        }
        Ok(grid)
    }

    /// Paints or erases an obstacle. Erasing a cell that holds no obstacle leaves it as it is.
    pub fn set_obstacle(&self, position: Position, is_obstacle: bool) -> Result<Grid> {
        self.check_editable(position)?;
        let current = self.get(position)?.kind;
        match (is_obstacle, current) {
            (true, CellKind::Obstacle) => Ok(self.clone()),
            (true, _) => self.set_cell_kind(position, CellKind::Obstacle),
            (false, CellKind::Obstacle) => self.set_cell_kind(position, CellKind::Empty),
            (false, _) => Ok(self.clone()),
        }
    }

    pub fn toggle_obstacle(&self, position: Position) -> Result<Grid> {
        let is_obstacle = self.get(position)?.is_obstacle();
        self.set_obstacle(position, !is_obstacle)
    }

    /// Turns every obstacle back into an empty cell.
    pub fn clear_obstacles(&self) -> Grid {
        let mut grid = self.clone();
        if self.count(CellKind::Obstacle) > 0 {
            for cell in grid.cells_mut() {
                if cell.is_obstacle() {
                    cell.kind = CellKind::Empty;
                }
            }
        }
        grid
    }

    /// Resets all search state and downgrades Considered/Path cells to Empty.
    pub fn clear_decorations(&self) -> Grid {
        let mut grid = self.clone();
        for cell in grid.cells_mut() {
            cell.clear_decoration();
        }
        grid
    }

    /// Demotes the current markers and promotes the cells at the given positions. A marker placed
    /// on an obstacle replaces it.
    pub fn sync_markers(&self, start: Position, end: Position) -> Result<Grid> {
        Grid::check_markers(self.size, start, end)?;
        let mut grid = self.clone();
        for cell in grid.cells_mut() {
            if cell.kind.is_marker() {
                cell.kind = CellKind::Empty;
            }
        }
        grid.stamp_markers(start, end);
        Ok(grid)
    }

    /// Moves one marker, keeping the other where it is. Rejected when the target is out of
    /// bounds or holds the other marker.
    pub fn move_marker(&self, marker: Marker, to: Position) -> Result<Grid> {
        let other = match marker {
            Marker::Start => Marker::End,
            Marker::End => Marker::Start,
        };
        let other_position = self.find(other.kind()).ok_or(GridError::InvalidMarker {
            position: to,
            reason: "the other marker is missing from the grid",
        })?;
        match marker {
            Marker::Start => self.sync_markers(to, other_position),
            Marker::End => self.sync_markers(other_position, to),
        }
    }

    pub(crate) fn stamp_markers(&mut self, start: Position, end: Position) {
        for (position, kind) in [(start, CellKind::Start), (end, CellKind::End)] {
            if let Some(cell) = self.cell_mut(position) {
                cell.kind = kind;
            }
        }
    }

    /// The obstacle layer on its own, `true` meaning blocked.
    pub fn obstacle_mask(&self) -> BoolGrid {
        let mut mask = BoolGrid::new(self.size, self.size, false);
        for cell in self.cells().filter(|c| c.is_obstacle()) {
            let p = cell.position;
            mask.set(p.col as i32, p.row as i32, true);
        }
        mask
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line = row.iter().map(|c| c.kind.symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
