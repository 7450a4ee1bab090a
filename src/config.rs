use log::warn;
use serde::{Deserialize, Serialize};

use crate::animation::Tick;
use crate::cell::Position;

/// Tunables of a visualization session. Sizes are side lengths of the square grid, intervals are
/// logical clock ticks between two animation steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub min_size: usize,
    pub max_size: usize,
    pub size_step: usize,
    pub default_size: usize,
    pub default_start: Position,
    pub default_end: Position,
    pub dijkstra_alignment_weight: f64,
    pub astar_alignment_weight: f64,
    pub reveal_interval: Tick,
    pub path_interval: Tick,
    /// Grid size at which `reveal_interval` applies unscaled.
    pub reference_size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            min_size: 20,
            max_size: 100,
            size_step: 10,
            default_size: 30,
            default_start: Position::new(2, 2),
            default_end: Position::new(7, 10),
            dijkstra_alignment_weight: 0.001,
            astar_alignment_weight: 0.5,
            reveal_interval: 10,
            path_interval: 50,
            reference_size: 20,
        }
    }
}

impl GridConfig {
    /// Clamps a requested size into range and rounds it to the nearest step.
    pub fn snap_size(&self, size: usize) -> usize {
        let min = self.min_size.max(2);
        let max = self.max_size.max(min);
        let clamped = size.clamp(min, max);
        if self.size_step == 0 {
            return clamped;
        }
        let steps = (clamped - min + self.size_step / 2) / self.size_step;
        (min + steps * self.size_step).min(max)
    }

    /// Ticks between two reveal steps; larger grids reveal faster per cell.
    pub fn reveal_interval_for(&self, size: usize) -> Tick {
        let scaled = self.reveal_interval * self.reference_size as Tick / size.max(1) as Tick;
        scaled.max(1)
    }
}

/// The values a collaborator persists between sessions and feeds back on startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSeed {
    pub grid_size: usize,
    pub start: Position,
    pub end: Position,
}

impl SessionSeed {
    pub fn from_config(config: &GridConfig) -> SessionSeed {
        SessionSeed {
            grid_size: config.default_size,
            start: config.default_start,
            end: config.default_end,
        }
    }

    /// Brings stored values back into a usable state: the size snapped to the configured range,
    /// both markers clamped inside the grid and kept apart.
    pub fn sanitized(&self, config: &GridConfig) -> SessionSeed {
        let grid_size = config.snap_size(self.grid_size);
        if grid_size != self.grid_size {
            warn!(
                "Stored grid size {} is not allowed, using {}",
                self.grid_size, grid_size
            );
        }
        let (start, end) = crate::resize::clamp_markers(self.start, self.end, grid_size);
        if (start, end) != (self.start, self.end) {
            warn!(
                "Stored markers {} and {} were moved to {} and {}",
                self.start, self.end, start, end
            );
        }
        SessionSeed {
            grid_size,
            start,
            end,
        }
    }
}

impl Default for SessionSeed {
    fn default() -> Self {
        SessionSeed::from_config(&GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_snap_to_steps() {
        let config = GridConfig::default();
        assert_eq!(config.snap_size(5), 20);
        assert_eq!(config.snap_size(34), 30);
        assert_eq!(config.snap_size(35), 40);
        assert_eq!(config.snap_size(70), 70);
        assert_eq!(config.snap_size(1000), 100);
    }

    #[test]
    fn reveal_interval_shrinks_with_size() {
        let config = GridConfig::default();
        assert_eq!(config.reveal_interval_for(20), 10);
        assert_eq!(config.reveal_interval_for(40), 5);
        assert_eq!(config.reveal_interval_for(100), 2);
        assert!(config.reveal_interval_for(10_000) >= 1);
    }

    #[test]
    fn sanitizing_clamps_everything() {
        let config = GridConfig::default();
        let seed = SessionSeed {
            grid_size: 7,
            start: Position::new(50, 1),
            end: Position::new(3, 3),
        };
        let seed = seed.sanitized(&config);
        assert_eq!(seed.grid_size, 20);
        assert_eq!(seed.start, Position::new(19, 1));
        assert_eq!(seed.end, Position::new(3, 3));
    }
}
