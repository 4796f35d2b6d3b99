//! Concrete collaborator implementations
//!
//! Runnable systems for demos and tests: double-integrator dynamics,
//! the time and control-effort cost family, admissible time-to-goal
//! heuristics, sample-based obstacle sets, and ball goal regions.

pub mod double_integrator;
pub mod costs;
pub mod heuristics;
pub mod obstacles;
pub mod goals;

pub use double_integrator::{control_grid, DoubleIntegrator};
pub use costs::{ControlEffortCost, MinTimeCost};
pub use heuristics::{MinTimeHeuristic, ZeroHeuristic};
pub use obstacles::{BoxObstacles, NoObstacles, SphereObstacles};
pub use goals::BallGoal;
