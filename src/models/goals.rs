//! Goal regions

use crate::common::{GoalRegion, StateVec, Trajectory};

/// Ball over the leading position components; velocity is free
#[derive(Debug, Clone)]
pub struct BallGoal {
    center: StateVec,
    radius: f64,
}

impl BallGoal {
    pub fn new(center: StateVec, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> &StateVec {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl GoalRegion for BallGoal {
    fn in_goal(&self, traj: &Trajectory) -> Option<usize> {
        let n = self.center.len();
        traj.states.iter().position(|x| {
            let p = x.rows(0, n).clone_owned();
            (p - &self.center).norm() <= self.radius
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_first_in_goal_sample_index() {
        let goal = BallGoal::new(dvector![1.0, 0.0], 0.1);
        let mut traj = Trajectory::new();
        traj.push(0.0, dvector![0.0, 0.0, 1.0, 0.0]);
        traj.push(0.5, dvector![0.5, 0.0, 1.0, 0.0]);
        traj.push(1.0, dvector![0.95, 0.0, 1.0, 0.0]);
        traj.push(1.5, dvector![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(goal.in_goal(&traj), Some(2));
    }

    #[test]
    fn test_not_in_goal() {
        let goal = BallGoal::new(dvector![1.0, 0.0], 0.1);
        let mut traj = Trajectory::new();
        traj.push(0.0, dvector![0.0, 0.0, 0.0, 0.0]);
        traj.push(0.5, dvector![0.5, 0.5, 0.0, 0.0]);
        assert_eq!(goal.in_goal(&traj), None);
    }

    #[test]
    fn test_velocity_does_not_affect_membership() {
        let goal = BallGoal::new(dvector![0.0], 0.5);
        let mut traj = Trajectory::new();
        traj.push(0.0, dvector![0.2, 99.0]);
        assert_eq!(goal.in_goal(&traj), Some(0));
    }
}
