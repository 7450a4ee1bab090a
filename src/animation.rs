//! Turns a finished search into a time-staged reveal on a logical clock.
//!
//! Every step of a reveal is scheduled as its own timer, so each one can be revoked on its own.
//! The [Animator] keeps the timers of the current run in a map and stamps each with the run's
//! generation; a cancelled run bumps the generation and drops the map, so a timer that still
//! fires afterwards finds nothing to apply.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexMap;
use log::{debug, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::cell::{CellKind, Position};
use crate::grid::Grid;
use crate::solver::SearchResult;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Logical time unit of the animation clock.
pub type Tick = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Deferred wake-ups, provided by whoever drives the presentation. When a scheduled timer comes
/// due the driver hands its id back to [Animator::fire].
pub trait Clock {
    fn schedule(&mut self, delay: Tick) -> TimerId;
    fn cancel(&mut self, timer: TimerId);
}

/// A [Clock] that only moves when told to. Timers due at the same tick come out in the order
/// they were scheduled.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Tick,
    next_id: u64,
    queue: BinaryHeap<Reverse<(Tick, u64)>>,
    cancelled: FxHashSet<u64>,
}

impl ManualClock {
    pub fn new() -> ManualClock {
        ManualClock::default()
    }
    pub fn now(&self) -> Tick {
        self.now
    }
    /// Number of timers that are scheduled and not cancelled.
    pub fn pending(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }
    /// Moves time forward and returns the timers that came due, earliest first.
    pub fn advance(&mut self, ticks: Tick) -> Vec<TimerId> {
        self.now += ticks;
        let mut due = Vec::new();
        while let Some(Reverse((at, id))) = self.queue.peek().copied() {
            if at > self.now {
                break;
            }
            self.queue.pop();
            if !self.cancelled.remove(&id) {
                due.push(TimerId(id));
            }
        }
        due
    }
    /// Time at which the next live timer comes due.
    pub fn next_due(&self) -> Option<Tick> {
        self.queue
            .iter()
            .filter(|Reverse((_, id))| !self.cancelled.contains(id))
            .map(|Reverse((at, _))| *at)
            .min()
    }
}

impl Clock for ManualClock {
    fn schedule(&mut self, delay: Tick) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(Reverse((self.now + delay, id)));
        TimerId(id)
    }
    fn cancel(&mut self, timer: TimerId) {
        if self.queue.iter().any(|Reverse((_, id))| *id == timer.0) {
            self.cancelled.insert(timer.0);
        }
    }
}

/// Lifecycle of one visualization run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    Staging,
    Revealing,
    PathRevealing,
}

/// One deferred grid mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Promote an empty cell to [CellKind::Considered].
    Consider(Position),
    /// Promote a non-marker cell to [CellKind::Path].
    Trace(Position),
}

impl Step {
    /// Applies the step, returning whether the cell changed. Markers and obstacles are never
    /// overwritten.
    pub fn apply(&self, grid: &mut Grid) -> bool {
        let (position, target) = match *self {
            Step::Consider(p) => (p, CellKind::Considered),
            Step::Trace(p) => (p, CellKind::Path),
        };
        let allowed = match (grid.kind(position), target) {
            (Some(CellKind::Empty), _) => true,
            (Some(CellKind::Considered), CellKind::Path) => true,
            _ => false,
        };
        if allowed {
            if let Some(cell) = grid.cell_mut(position) {
                cell.kind = target;
            }
        }
        allowed
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AnimationEvent {
    /// The grid right after a step was applied.
    Frame(Grid),
    /// Terminal event of a run that reached the end.
    PathFound(Vec<Position>),
    /// Terminal event of a run whose end was unreachable.
    NoPath,
}

#[derive(Clone, Copy, Debug)]
struct Staged {
    step: Step,
    generation: u64,
}

/// State machine behind a run: `Idle -> Staging -> Revealing -> PathRevealing -> Idle`.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    phase: Phase,
    generation: u64,
    pending: FxIndexMap<TimerId, Staged>,
    path: Vec<Position>,
    path_interval: Tick,
}

impl Animator {
    pub fn new() -> Animator {
        Animator::default()
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
    pub fn pending_steps(&self) -> usize {
        self.pending.len()
    }

    /// Revokes every pending step and returns to [Phase::Idle]. Harmless when already idle.
    pub fn cancel<C: Clock>(&mut self, clock: &mut C) {
        if self.is_idle() && self.pending.is_empty() {
            return;
        }
        debug!(
            "Cancelling animation in {:?} with {} pending steps",
            self.phase,
            self.pending.len()
        );
        self.generation += 1;
        for (timer, _) in self.pending.drain(..) {
            clock.cancel(timer);
        }
        self.path.clear();
        self.phase = Phase::Idle;
    }

    /// Stages the reveal of a finished search. Any run still in flight is cancelled first. Only
    /// an empty visitation order finishes right away, with [AnimationEvent::NoPath].
    pub fn start<C: Clock>(
        &mut self,
        clock: &mut C,
        result: SearchResult,
        reveal_interval: Tick,
        path_interval: Tick,
    ) -> Vec<AnimationEvent> {
        self.cancel(clock);
        self.phase = Phase::Staging;
        if result.visited_order.is_empty() {
            debug!("Nothing was visited, no reveal to stage");
            self.phase = Phase::Idle;
            return vec![AnimationEvent::NoPath];
        }
        debug!(
            "Staging {} reveal steps and {} path steps",
            result.visited_order.len(),
            result.path.len()
        );
        self.path = result.path;
        self.path_interval = path_interval;
        let steps = result.visited_order.into_iter().map(Step::Consider);
        self.schedule(clock, steps, reveal_interval);
        self.phase = Phase::Revealing;
        Vec::new()
    }

    fn schedule<C, I>(&mut self, clock: &mut C, steps: I, interval: Tick)
    where
        C: Clock,
        I: IntoIterator<Item = Step>,
    {
        for (i, step) in steps.into_iter().enumerate() {
            let timer = clock.schedule(interval * (i as Tick + 1));
            self.pending.insert(
                timer,
                Staged {
                    step,
                    generation: self.generation,
                },
            );
        }
    }

    /// Applies the step behind a due timer. Timers of a cancelled or finished run are ignored.
    pub fn fire<C: Clock>(
        &mut self,
        clock: &mut C,
        timer: TimerId,
        grid: &mut Grid,
    ) -> Vec<AnimationEvent> {
        let staged = match self.pending.shift_remove(&timer) {
            Some(staged) if staged.generation == self.generation => staged,
            _ => {
                trace!("Ignoring stale timer {:?}", timer);
                return Vec::new();
            }
        };
        staged.step.apply(grid);
        let mut events = vec![AnimationEvent::Frame(grid.clone())];
        if self.pending.is_empty() {
            match self.phase {
                Phase::Revealing if !self.path.is_empty() => {
                    let steps = self.path.clone().into_iter().map(Step::Trace);
                    self.schedule(clock, steps, self.path_interval);
                    self.phase = Phase::PathRevealing;
                }
                Phase::Revealing => {
                    debug!("Reveal finished without a path");
                    events.push(AnimationEvent::NoPath);
                    self.phase = Phase::Idle;
                }
                Phase::PathRevealing => {
                    events.push(AnimationEvent::PathFound(std::mem::take(&mut self.path)));
                    self.phase = Phase::Idle;
                }
                Phase::Idle | Phase::Staging => {}
            }
        }
        events
    }
}
