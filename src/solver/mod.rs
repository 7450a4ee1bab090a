use core::cmp::Ordering;
use grid_util::Point;
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::cell::{Cell, Position};
use crate::config::GridConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::neighbors::unvisited_traversable_neighbors;
use crate::path::reconstruct_path;
use crate::N_SMALLVEC_SIZE;

pub mod astar;
pub mod dijkstra;

use astar::AstarSolver;
use dijkstra::DijkstraSolver;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
}

impl Algorithm {
    /// Runs the selected solver with the weights from `config`.
    pub fn solve(
        self,
        config: &GridConfig,
        grid: &Grid,
        start: Position,
        end: Position,
    ) -> Result<SearchResult> {
        match self {
            Algorithm::Dijkstra => DijkstraSolver::from_config(config).solve(grid, start, end),
            Algorithm::AStar => AstarSolver::from_config(config).solve(grid, start, end),
        }
    }
}

/// What a visualization needs from a search: the order in which cells were finalized and the
/// start-to-end path, empty when the end cannot be reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub visited_order: Vec<Position>,
    pub path: Vec<Position>,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// The working copy a search ran on, with distances and predecessor links still set.
#[derive(Clone, Debug)]
pub struct Explored {
    pub grid: Grid,
    pub visited_order: Vec<Position>,
}

/// Perpendicular distance of `node` from the straight line through `start` and `end`. Zero when
/// the two coincide.
pub fn alignment_deviation(node: Position, start: Position, end: Position) -> f64 {
    let (s, e, n): (Point, Point, Point) = (start.into(), end.into(), node.into());
    let (path_x, path_y) = ((e.x - s.x) as f64, (e.y - s.y) as f64);
    let (node_x, node_y) = ((n.x - s.x) as f64, (n.y - s.y) as f64);
    let cross = (path_x * node_y - path_y * node_x).abs();
    let length = path_x.hypot(path_y);
    if length > 0.0 {
        cross / length
    } else {
        0.0
    }
}

/// Frontier key of a cell, compared by `rank` first and `score` second. Dijkstra ranks by step
/// count, A* leaves the rank at zero and orders on score alone.
#[derive(Clone, Copy, Debug)]
pub struct Priority {
    pub rank: u32,
    pub score: f64,
}

impl Priority {
    pub fn new(rank: u32, score: f64) -> Priority {
        Priority { rank, score }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.score.total_cmp(&other.score))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Priority {}

/// A search over the 4-connected grid in the classic relaxation form: repeatedly finalize the
/// unvisited cell with the lowest priority and relax its neighbours. Implementors only decide how
/// cells are ordered and how a neighbour is updated.
///
/// Equal priorities resolve exactly like a stable re-sort of all unvisited cells in row-major
/// order would: every cell carries a sequence number, and cells improved by the same pop get
/// fresh numbers in the order of their previous keys.
pub trait GridSolver {
    /// Initializes the start cell of a freshly cleared working copy.
    fn seed(&self, cell: &mut Cell, start: Position, end: Position);

    /// Frontier key of a cell, lowest first.
    fn priority(&self, cell: &Cell) -> Priority;

    /// Offers `neighbor` a route through `current`. Returns whether it improved, which must
    /// strictly lower its priority; the caller then links the predecessor.
    fn relax(&self, current: &Cell, neighbor: &mut Cell, start: Position, end: Position) -> bool;

    /// Runs the search on a cleared copy of `grid`. Stops once `end` is finalized or when every
    /// remaining cell is unreachable.
    fn explore(&self, grid: &Grid, start: Position, end: Position) -> Result<Explored> {
        grid.get(start)?;
        grid.get(end)?;
        let mut work = grid.clear_decorations();
        let start_ix = work.index(start);
        let end_ix = work.index(end);
        if let Some(cell) = work.cell_mut(start) {
            self.seed(cell, start, end);
        }
        let mut sequence = (0..(work.size() * work.size()) as u64).collect::<Vec<u64>>();
        let mut next_sequence = sequence.len() as u64;
        let mut to_see = BinaryHeap::new();
        let start_priority = work.get(start).map(|cell| self.priority(cell))?;
        to_see.push(Reverse((start_priority, sequence[start_ix], start_ix)));
        let mut visited_order = Vec::new();

        while let Some(Reverse((_, seq, ix))) = to_see.pop() {
            let current = match work.cell_at(ix) {
                Some(cell) if !cell.visited && sequence[ix] == seq => *cell,
                _ => continue,
            };
            let position = current.position;
            if let Some(cell) = work.cell_mut(position) {
                cell.visited = true;
            }
            visited_order.push(position);
            if ix == end_ix {
                break;
            }
            let mut improved: SmallVec<[(Priority, u64, usize); N_SMALLVEC_SIZE]> =
                SmallVec::new();
            for p in unvisited_traversable_neighbors(&work, position) {
                let n_ix = work.index(p);
                if let Some(neighbor) = work.cell_mut(p) {
                    let before = self.priority(neighbor);
                    if self.relax(&current, neighbor, start, end) {
                        neighbor.predecessor = Some(ix);
                        improved.push((before, sequence[n_ix], n_ix));
                    }
                }
            }
            improved.sort();
            for (_, _, n_ix) in improved {
                sequence[n_ix] = next_sequence;
                next_sequence += 1;
                if let Some(cell) = work.cell_at(n_ix) {
                    to_see.push(Reverse((self.priority(cell), sequence[n_ix], n_ix)));
                }
            }
        }
        if work.cell_at(end_ix).map_or(false, |cell| !cell.visited) {
            debug!(
                "Frontier exhausted after {} cells, {} is unreachable",
                visited_order.len(),
                end
            );
        }
        Ok(Explored {
            grid: work,
            visited_order,
        })
    }

    fn solve(&self, grid: &Grid, start: Position, end: Position) -> Result<SearchResult> {
        let explored = self.explore(grid, start, end)?;
        let path = reconstruct_path(&explored.grid, end);
        Ok(SearchResult {
            visited_order: explored.visited_order,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_is_perpendicular_distance() {
        let start = Position::new(0, 0);
        let end = Position::new(0, 4);
        assert_eq!(alignment_deviation(Position::new(3, 2), start, end), 3.0);
        assert_eq!(alignment_deviation(Position::new(0, 9), start, end), 0.0);
        let diagonal = alignment_deviation(Position::new(0, 2), start, Position::new(4, 4));
        assert!((diagonal - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn deviation_without_path_vector_is_zero() {
        let p = Position::new(1, 1);
        assert_eq!(alignment_deviation(Position::new(5, 3), p, p), 0.0);
    }

    #[test]
    fn algorithms_agree_on_path_length() {
        let grid = Grid::new(8, Position::new(1, 1), Position::new(6, 5))
            .unwrap()
            .set_obstacle(Position::new(3, 3), true)
            .unwrap();
        let config = GridConfig::default();
        let lengths = [Algorithm::Dijkstra, Algorithm::AStar].map(|a| {
            a.solve(&config, &grid, Position::new(1, 1), Position::new(6, 5))
                .unwrap()
                .path
                .len()
        });
        assert_eq!(lengths, [10, 10]);
    }

    #[test]
    fn ties_resolve_in_row_major_order() {
        let p = Position::new;
        let start = p(1, 1);
        let end = p(3, 3);
        let grid = Grid::new(4, start, end).unwrap();
        let unbiased = DijkstraSolver {
            alignment_weight: 0.0,
        };
        let result = unbiased.solve(&grid, start, end).unwrap();
        assert_eq!(
            result.visited_order,
            vec![
                p(1, 1),
                p(0, 1),
                p(1, 0),
                p(1, 2),
                p(2, 1),
                p(0, 0),
                p(0, 2),
                p(2, 0),
                p(1, 3),
                p(2, 2),
                p(3, 1),
                p(0, 3),
                p(3, 0),
                p(2, 3),
                p(3, 2),
                p(3, 3),
            ]
        );
        assert_eq!(result.path, vec![p(1, 1), p(1, 2), p(1, 3), p(2, 3), p(3, 3)]);

        let result = AstarSolver::new().solve(&grid, start, end).unwrap();
        assert_eq!(
            result.visited_order,
            vec![p(1, 1), p(1, 2), p(2, 2), p(2, 1), p(2, 3), p(3, 3)]
        );
        assert_eq!(result.path, vec![p(1, 1), p(1, 2), p(2, 2), p(2, 3), p(3, 3)]);
    }

    #[test]
    fn priority_ranks_before_score() {
        assert!(Priority::new(1, 9.0) < Priority::new(2, 0.5));
        assert!(Priority::new(1, 0.5) < Priority::new(1, 0.75));
        assert!(Priority::new(0, 3.0) < Priority::new(0, f64::INFINITY));
        assert_eq!(Priority::new(3, 1.0), Priority::new(3, 1.0));
    }
}
