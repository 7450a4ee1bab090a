use log::info;
use petgraph::unionfind::UnionFind;

use crate::cell::Position;
use crate::grid::Grid;

/// Connected components of the traversable cells of a grid snapshot under 4-directional movement.
/// Answers reachability without running a search.
#[derive(Clone, Debug)]
pub struct Components {
    size: usize,
    components: UnionFind<usize>,
}

impl Components {
    /// Generates a new [UnionFind] structure and links up traversable neighbours to the same
    /// components.
    pub fn new(grid: &Grid) -> Components {
        let size = grid.size();
        let mut components = UnionFind::new(size * size);
        for cell in grid.cells().filter(|c| !c.is_obstacle()) {
            let parent_ix = grid.index(cell.position);
            let Position { row, col } = cell.position;
            // Linking down and right covers every edge once
            [Position::new(row + 1, col), Position::new(row, col + 1)]
                .into_iter()
                .filter(|p| grid.cell(*p).map_or(false, |n| !n.is_obstacle()))
                .for_each(|p| {
                    components.union(parent_ix, grid.index(p));
                });
        }
        Components { size, components }
    }

    /// Retrieves the component id a given position belongs to.
    pub fn component(&self, position: Position) -> Option<usize> {
        if position.in_bounds(self.size) {
            Some(self.components.find(position.row * self.size + position.col))
        } else {
            None
        }
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: Position, goal: Position) -> bool {
        match (self.component(start), self.component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => {
                info!("{} or {} lies outside the grid", start, goal);
                false
            }
        }
    }
}
