use core::fmt;
use grid_util::Point;
use serde::{Deserialize, Serialize};

/// A grid coordinate. Markers are stored as positions independently of the grid, the grid only
/// mirrors them as its unique [CellKind::Start] and [CellKind::End] cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
    /// Clamps each coordinate separately to the last row/column of a grid of the given size.
    pub fn clamped(&self, size: usize) -> Position {
        let last = size.saturating_sub(1);
        Position::new(self.row.min(last), self.col.min(last))
    }
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
    /// Whether the two positions share an edge.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Columns map to x and rows to y.
impl From<Position> for Point {
    fn from(position: Position) -> Point {
        Point::new(position.col as i32, position.row as i32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Start,
    End,
    Obstacle,
    Considered,
    Path,
}

impl CellKind {
    pub fn is_marker(self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }
    /// Considered and Path only exist for the duration of a visualization.
    pub fn is_decoration(self) -> bool {
        matches!(self, CellKind::Considered | CellKind::Path)
    }
    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Start => 'S',
            CellKind::End => 'E',
            CellKind::Obstacle => '#',
            CellKind::Considered => 'o',
            CellKind::Path => '*',
        }
    }
}

/// Selects one of the two movable markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Start,
    End,
}

impl Marker {
    pub fn kind(self) -> CellKind {
        match self {
            Marker::Start => CellKind::Start,
            Marker::End => CellKind::End,
        }
    }
}

/// One grid position together with its per-run search state. The predecessor is the arena index
/// of the cell it was reached from, see [Grid::index](crate::grid::Grid::index).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub position: Position,
    pub kind: CellKind,
    pub tentative_distance: f64,
    pub total_score: f64,
    /// Number of moves along the predecessor chain.
    pub steps: u32,
    pub visited: bool,
    pub predecessor: Option<usize>,
}

impl Cell {
    pub fn new(position: Position, kind: CellKind) -> Cell {
        Cell {
            position,
            kind,
            tentative_distance: f64::INFINITY,
            total_score: f64::INFINITY,
            steps: u32::MAX,
            visited: false,
            predecessor: None,
        }
    }
    pub fn is_obstacle(&self) -> bool {
        self.kind == CellKind::Obstacle
    }
    pub fn reached(&self) -> bool {
        self.tentative_distance.is_finite()
    }
    /// Drops the search state and downgrades decorations, leaving Obstacle/Start/End untouched.
    pub fn clear_decoration(&mut self) {
        let kind = if self.kind.is_decoration() {
            CellKind::Empty
        } else {
            self.kind
        };
        *self = Cell::new(self.position, kind);
    }
}
