use crate::cell::{Cell, Position};
use crate::config::GridConfig;
use crate::solver::{alignment_deviation, GridSolver, Priority};

/// Dijkstra over unit moves, with a small extra cost for stepping away from the straight line
/// between start and end. The bias makes the sweep grow along that line.
///
/// Cells are ordered by step count first and biased distance second, so the bias only breaks ties
/// between equally long routes and can never make a longer path win, whatever the weight.
#[derive(Clone, Debug)]
pub struct DijkstraSolver {
    pub alignment_weight: f64,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver::from_config(&GridConfig::default())
    }
    pub fn from_config(config: &GridConfig) -> DijkstraSolver {
        DijkstraSolver {
            alignment_weight: config.dijkstra_alignment_weight,
        }
    }
    fn alignment_penalty(&self, node: Position, start: Position, end: Position) -> f64 {
        alignment_deviation(node, start, end) * self.alignment_weight
    }
}

impl Default for DijkstraSolver {
    fn default() -> Self {
        DijkstraSolver::new()
    }
}

impl GridSolver for DijkstraSolver {
    fn seed(&self, cell: &mut Cell, _start: Position, _end: Position) {
        cell.tentative_distance = 0.0;
        cell.total_score = 0.0;
        cell.steps = 0;
    }

    fn priority(&self, cell: &Cell) -> Priority {
        Priority::new(cell.steps, cell.tentative_distance)
    }

    fn relax(&self, current: &Cell, neighbor: &mut Cell, start: Position, end: Position) -> bool {
        let steps = current.steps + 1;
        let distance =
            current.tentative_distance + 1.0 + self.alignment_penalty(neighbor.position, start, end);
        let improved = steps < neighbor.steps
            || (steps == neighbor.steps && distance < neighbor.tentative_distance);
        if improved {
            neighbor.steps = steps;
            neighbor.tentative_distance = distance;
            neighbor.total_score = distance;
        }
        improved
    }
}
