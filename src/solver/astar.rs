use grid_util::Point;

use crate::cell::{Cell, Position};
use crate::config::GridConfig;
use crate::solver::{alignment_deviation, GridSolver, Priority};

/// A* over unit moves. The heuristic is the Manhattan distance to the end plus a weighted
/// deviation from the start-end line, which pulls the search along that line.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub alignment_weight: f64,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::from_config(&GridConfig::default())
    }
    pub fn from_config(config: &GridConfig) -> AstarSolver {
        AstarSolver {
            alignment_weight: config.astar_alignment_weight,
        }
    }
    /// Cost of moving between two cells, only cardinal moves exist.
    fn cost(&self, p1: Position, p2: Position) -> f64 {
        Point::from(p1).manhattan_distance(&Point::from(p2)) as f64
    }
    pub fn heuristic(&self, node: Position, start: Position, end: Position) -> f64 {
        self.cost(node, end) + alignment_deviation(node, start, end) * self.alignment_weight
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    fn seed(&self, cell: &mut Cell, start: Position, end: Position) {
        cell.tentative_distance = 0.0;
        cell.steps = 0;
        cell.total_score = self.heuristic(cell.position, start, end);
    }

    fn priority(&self, cell: &Cell) -> Priority {
        Priority::new(0, cell.total_score)
    }

    fn relax(&self, current: &Cell, neighbor: &mut Cell, start: Position, end: Position) -> bool {
        let tentative =
            current.tentative_distance + self.cost(current.position, neighbor.position);
        if tentative < neighbor.tentative_distance {
            neighbor.tentative_distance = tentative;
            neighbor.steps = current.steps + 1;
            neighbor.total_score = tentative + self.heuristic(neighbor.position, start, end);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    /// Asserts that the optimal 9 cell path is found on an open 5x5 grid.
    #[test]
    fn solve_open_grid() {
        let start = Position::new(0, 0);
        let end = Position::new(4, 4);
        let grid = Grid::new(5, start, end).unwrap();
        let result = AstarSolver::new().solve(&grid, start, end).unwrap();
        assert_eq!(result.path.len(), 9);
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&end));
    }

    /// The heuristic steers the search, so it finalizes fewer cells than Dijkstra.
    #[test]
    fn visits_fewer_cells_than_dijkstra() {
        let start = Position::new(2, 2);
        let end = Position::new(7, 9);
        let grid = Grid::new(12, start, end).unwrap();
        let astar = AstarSolver::new().solve(&grid, start, end).unwrap();
        let dijkstra = crate::solver::dijkstra::DijkstraSolver::new()
            .solve(&grid, start, end)
            .unwrap();
        assert_eq!(astar.path.len(), dijkstra.path.len());
        assert!(astar.visited_order.len() < dijkstra.visited_order.len());
    }

    #[test]
    fn heuristic_adds_weighted_deviation() {
        let solver = AstarSolver {
            alignment_weight: 0.5,
        };
        let start = Position::new(0, 0);
        let end = Position::new(0, 6);
        assert_eq!(solver.heuristic(Position::new(0, 2), start, end), 4.0);
        assert_eq!(solver.heuristic(Position::new(2, 2), start, end), 7.0);
    }

    #[test]
    fn walled_off_end_is_not_found() {
        // |S#E|
        // |.#.|
        // |.#.|
        let start = Position::new(0, 0);
        let end = Position::new(0, 2);
        let mut grid = Grid::new(3, start, end).unwrap();
        for row in 0..3 {
            grid = grid.set_obstacle(Position::new(row, 1), true).unwrap();
        }
        let result = AstarSolver::new().solve(&grid, start, end).unwrap();
        assert!(!result.found());
        assert_eq!(result.visited_order.len(), 3);
    }
}
