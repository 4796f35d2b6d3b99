//! Collaborator interfaces consumed by the search core
//!
//! The planner never interprets state components itself; everything
//! problem-specific flows through these five traits. All operations
//! are required to be synchronous, pure, and deterministic.

use crate::common::types::{ControlVec, StateVec, Trajectory};

/// Controlled dynamical system integrated by the planner
pub trait DynamicalSystem {
    /// Integrate the ODE from `x0` under constant control `u` over
    /// `[t0, t1]`. The result's first sample time must equal `t0` and
    /// its last must equal `t1`, with strictly increasing times.
    fn sim(&self, t0: f64, t1: f64, x0: &StateVec, u: &ControlVec) -> Trajectory;

    /// Lipschitz constant of the flow with respect to the state
    fn lipschitz_flow(&self) -> f64;
}

/// Additive cost functional over trajectory arcs
pub trait CostFunction {
    /// Cost of one arc under constant control `u`; must be finite and
    /// non-negative, and additive over concatenation.
    fn cost(&self, traj: &Trajectory, u: &ControlVec) -> f64;

    /// Lipschitz constant of the accumulated cost with respect to the
    /// state; zero for state-independent cost rates
    fn lipschitz_cost(&self) -> f64;
}

/// Admissible estimate of the remaining cost to the goal
pub trait Heuristic {
    /// Lower bound on the optimal cost from `x` into the goal region
    fn cost_to_go(&self, x: &StateVec) -> f64;
}

/// Obstacle predicate over continuous arcs
pub trait ObstacleSet {
    /// True when the arc stays clear of every obstacle
    fn collision_free(&self, traj: &Trajectory) -> bool;
}

/// Goal membership test over arcs
pub trait GoalRegion {
    /// Index of the first in-goal sample of the arc, or `None` when
    /// the arc never enters the goal
    fn in_goal(&self, traj: &Trajectory) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    struct Hold;

    impl DynamicalSystem for Hold {
        fn sim(&self, t0: f64, t1: f64, x0: &StateVec, _u: &ControlVec) -> Trajectory {
            let mut traj = Trajectory::new();
            traj.push(t0, x0.clone());
            traj.push(t1, x0.clone());
            traj
        }

        fn lipschitz_flow(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_dynamical_system_trait() {
        let sys = Hold;
        let traj = sys.sim(0.0, 1.0, &dvector![2.0], &dvector![0.0]);
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.first_time(), Some(0.0));
        assert_eq!(traj.last_time(), Some(1.0));
    }
}
