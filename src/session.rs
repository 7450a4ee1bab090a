use log::{debug, info};

use crate::animation::{AnimationEvent, Animator, Clock, ManualClock, Phase, TimerId};
use crate::cell::{Marker, Position};
use crate::components::Components;
use crate::config::{GridConfig, SessionSeed};
use crate::error::Result;
use crate::grid::Grid;
use crate::resize::resize;
use crate::solver::{Algorithm, SearchResult};

/// One user-facing visualization: the current grid, the two markers, the selected algorithm and
/// the animation in flight. Every edit replaces the grid with a new snapshot.
#[derive(Debug)]
pub struct Session<C: Clock> {
    config: GridConfig,
    grid: Grid,
    start: Position,
    end: Position,
    algorithm: Algorithm,
    animator: Animator,
    clock: C,
}

impl<C: Clock> Session<C> {
    /// Starts a session from persisted values. Values that do not fit the configuration are
    /// clamped rather than rejected.
    pub fn new(config: GridConfig, seed: SessionSeed, clock: C) -> Result<Session<C>> {
        let seed = seed.sanitized(&config);
        let grid = Grid::new(seed.grid_size, seed.start, seed.end)?;
        info!("Session started on a {0}x{0} grid", grid.size());
        Ok(Session {
            config,
            grid,
            start: seed.start,
            end: seed.end,
            algorithm: Algorithm::default(),
            animator: Animator::new(),
            clock,
        })
    }

    pub fn with_defaults(clock: C) -> Result<Session<C>> {
        let config = GridConfig::default();
        let seed = SessionSeed::from_config(&config);
        Session::new(config, seed, clock)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    /// A snapshot that later edits will not touch.
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }
    pub fn start(&self) -> Position {
        self.start
    }
    pub fn end(&self) -> Position {
        self.end
    }
    pub fn size(&self) -> usize {
        self.grid.size()
    }
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }
    pub fn phase(&self) -> Phase {
        self.animator.phase()
    }
    pub fn is_animating(&self) -> bool {
        !self.animator.is_idle()
    }
    pub fn clock(&self) -> &C {
        &self.clock
    }
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
    /// The values to persist after a change.
    pub fn seed(&self) -> SessionSeed {
        SessionSeed {
            grid_size: self.grid.size(),
            start: self.start,
            end: self.end,
        }
    }

    /// Paints or erases an obstacle. Any animation in flight is cancelled, since its staged
    /// steps were computed for the old layout.
    pub fn set_obstacle(&mut self, position: Position, is_obstacle: bool) -> Result<()> {
        let grid = self.grid.set_obstacle(position, is_obstacle)?;
        self.replace_layout(grid);
        Ok(())
    }

    pub fn toggle_obstacle(&mut self, position: Position) -> Result<()> {
        let grid = self.grid.toggle_obstacle(position)?;
        self.replace_layout(grid);
        Ok(())
    }

    pub fn clear_obstacles(&mut self) {
        let grid = self.grid.clear_obstacles();
        self.replace_layout(grid);
    }

    fn replace_layout(&mut self, grid: Grid) {
        self.animator.cancel(&mut self.clock);
        self.grid = grid;
    }

    /// Clears the current visualization, stopping any animation in flight.
    pub fn clear_visualization(&mut self) {
        self.animator.cancel(&mut self.clock);
        self.grid = self.grid.clear_decorations();
    }

    /// Moves one marker. Fails without touching anything when the target is outside the grid or
    /// occupied by the other marker. An animation in flight is cancelled.
    pub fn move_marker(&mut self, marker: Marker, position: Position) -> Result<()> {
        let grid = self.grid.move_marker(marker, position)?;
        match marker {
            Marker::Start => self.start = position,
            Marker::End => self.end = position,
        }
        self.replace_layout(grid);
        Ok(())
    }

    /// Regenerates the grid at a new size, snapped to the configured range. Never fails: markers
    /// that fall outside are clamped.
    pub fn resize(&mut self, new_size: usize) {
        let new_size = self.config.snap_size(new_size);
        self.animator.cancel(&mut self.clock);
        let (grid, start, end) = resize(&self.grid, self.start, self.end, new_size);
        self.grid = grid;
        self.start = start;
        self.end = end;
    }

    /// Runs the selected algorithm and stages its reveal.
    pub fn run(&mut self) -> Result<Vec<AnimationEvent>> {
        self.run_with(self.algorithm)
    }

    /// Cancels whatever is in flight, clears the previous visualization, searches and stages the
    /// reveal. The returned events are the ones that happen synchronously; the rest arrive
    /// through [fire](Self::fire).
    pub fn run_with(&mut self, algorithm: Algorithm) -> Result<Vec<AnimationEvent>> {
        self.animator.cancel(&mut self.clock);
        self.grid = self.grid.clear_decorations();
        info!(
            "Running {:?} from {} to {} on a {}x{} grid",
            algorithm,
            self.start,
            self.end,
            self.size(),
            self.size()
        );
        if !Components::new(&self.grid).reachable(self.start, self.end) {
            info!("{} is not reachable from {}", self.end, self.start);
        }
        let result = algorithm.solve(&self.config, &self.grid, self.start, self.end)?;
        self.log_result(&result);
        let reveal_interval = self.config.reveal_interval_for(self.size());
        Ok(self.animator.start(
            &mut self.clock,
            result,
            reveal_interval,
            self.config.path_interval,
        ))
    }

    fn log_result(&self, result: &SearchResult) {
        if result.found() {
            info!(
                "Visited {} cells, found a path of {} cells",
                result.visited_order.len(),
                result.path.len()
            );
        } else {
            info!(
                "Visited {} cells, no path found",
                result.visited_order.len()
            );
        }
    }

    /// Stops the animation. Safe to call at any time.
    pub fn cancel(&mut self) {
        self.animator.cancel(&mut self.clock);
    }

    /// Applies the step behind a timer that came due.
    pub fn fire(&mut self, timer: TimerId) -> Vec<AnimationEvent> {
        self.animator.fire(&mut self.clock, timer, &mut self.grid)
    }
}

impl Session<ManualClock> {
    /// Moves the clock forward and fires every timer that came due on the way.
    pub fn advance(&mut self, ticks: u64) -> Vec<AnimationEvent> {
        let target = self.clock.now() + ticks;
        let mut events = Vec::new();
        while let Some(at) = self.clock.next_due().filter(|at| *at <= target) {
            let delta = at - self.clock.now();
            for timer in self.clock.advance(delta) {
                events.extend(self.fire(timer));
            }
        }
        let rest = target - self.clock.now();
        self.clock.advance(rest);
        events
    }

    /// Runs the animation to its end.
    pub fn finish(&mut self) -> Vec<AnimationEvent> {
        let mut events = Vec::new();
        while let Some(at) = self.clock.next_due() {
            let delta = at - self.clock.now();
            events.extend(self.advance(delta));
        }
        debug!("Animation finished at tick {}", self.clock.now());
        events
    }
}
