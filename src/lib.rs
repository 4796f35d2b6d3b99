//! Resolution-complete kinodynamic trajectory planning.
//!
//! This crate implements Generalized Label Correcting (GLC) search:
//! a best-first search over dynamically feasible trajectories that
//! discretizes the reachable state space into cells and keeps at most
//! one representative trajectory per cell modulo a cost tolerance.
//! The planner is generic over the dynamical model, cost functional,
//! heuristic, obstacle predicate, and goal region, all supplied as
//! trait implementations at construction.

pub mod common;
pub mod glc;
pub mod models;
pub mod utils;
