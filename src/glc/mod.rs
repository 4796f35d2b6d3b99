//! Generalized Label Correcting search
//!
//! The search expands a tree of dynamically feasible arcs best-first
//! on `cost + heuristic`, while a partition of the state space keeps
//! at most one representative node per cell modulo a cost tolerance.
//! The partition resolution, expansion horizon, depth limit, and
//! tolerance all derive from a single resolution parameter so that
//! refining it refines the whole schedule jointly.
//!
//! # Components
//!
//! - `node`: search tree vertices and the arena that owns them
//! - `queue`: the deterministic best-first open queue
//! - `domain`: partition cells with their candidate queues
//! - `planner`: the expansion loop, domain refresh, and driver
//!
//! # Example
//!
//! ```no_run
//! use nalgebra::dvector;
//! use glc_planner::glc::{GlcPlanner, PlannerConfig};
//! use glc_planner::models::{
//!     control_grid, BallGoal, DoubleIntegrator, MinTimeCost, MinTimeHeuristic, NoObstacles,
//! };
//!
//! let config = PlannerConfig {
//!     state_dim: 4,
//!     resolution: 8.0,
//!     time_scale: 4.0,
//!     depth_scale: 0.5,
//!     partition_scale: 1.3,
//!     max_iter: 50_000,
//!     x0: dvector![0.0, 0.0, 0.0, 0.0],
//!     controls: control_grid(&[-1.0, 0.0, 1.0], 2),
//! };
//! let goal = BallGoal::new(dvector![1.0, 0.0], 0.1);
//! let heuristic = MinTimeHeuristic::new(dvector![1.0, 0.0], 0.1, 2.0_f64.sqrt());
//! let mut planner = GlcPlanner::new(
//!     config,
//!     DoubleIntegrator::new(2),
//!     MinTimeCost,
//!     heuristic,
//!     NoObstacles,
//!     goal,
//! )
//! .unwrap();
//! let output = planner.plan().unwrap();
//! println!("cost {:.3} in {:.3}s", output.cost, output.time);
//! ```

pub mod node;
pub mod queue;
pub mod domain;
pub mod planner;

pub use node::{Node, NodeArena, NodeId, SENTINEL};
pub use queue::OpenQueue;
pub use domain::{Candidate, CellCoord, Domain};
pub use planner::{GlcPlanner, PlannerConfig, PlannerOutput, TerminationReason};
