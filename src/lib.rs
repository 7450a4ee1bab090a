//! # grid_pathviz
//!
//! The engine behind a grid pathfinding visualizer. Users paint obstacles on a square grid, move a
//! start and an end marker around and watch a search sweep from one to the other. This crate owns
//! everything but the drawing:
//!
//! * the [Grid] model with its marker and obstacle invariants, edited through copy-on-write
//!   snapshots,
//! * [Dijkstra](solver::dijkstra::DijkstraSolver) and [A*](solver::astar::AstarSolver) searches
//!   over 4-connected moves, both biased towards the straight line between the markers,
//! * [resizing](resize::resize) that keeps painted obstacles and clamps markers,
//! * an [Animator] that turns a finished search into a cancellable, tick-ordered reveal on a
//!   [Clock] supplied by the caller.
//!
//! [Session] ties these together behind the operations a user interface calls.
pub mod animation;
pub mod cell;
pub mod components;
pub mod config;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod path;
pub mod resize;
pub mod session;
pub mod solver;

pub use animation::{AnimationEvent, Animator, Clock, ManualClock, Phase, Tick, TimerId};
pub use cell::{Cell, CellKind, Marker, Position};
pub use components::Components;
pub use config::{GridConfig, SessionSeed};
pub use error::{GridError, Result};
pub use grid::Grid;
pub use path::reconstruct_path;
pub use session::Session;
pub use solver::{Algorithm, GridSolver, Priority, SearchResult};

/// Inline capacity of neighbourhood vectors, one slot per cardinal direction.
pub const N_SMALLVEC_SIZE: usize = 4;
