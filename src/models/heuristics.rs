//! Admissible cost-to-go estimates

use crate::common::{Heuristic, StateVec};

/// The trivial lower bound; turns the search into uniform-cost
#[derive(Debug, Clone, Copy)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn cost_to_go(&self, _x: &StateVec) -> f64 {
        0.0
    }
}

/// Minimum time to close the distance to a goal ball under a bounded
/// acceleration, assuming the whole current speed already points at
/// the goal. A lower bound on the true time for any `[position;
/// velocity]` system whose acceleration magnitude stays within
/// `max_accel`, and therefore admissible for minimum-time objectives.
#[derive(Debug, Clone)]
pub struct MinTimeHeuristic {
    center: StateVec,
    radius: f64,
    max_accel: f64,
}

impl MinTimeHeuristic {
    /// `center` has the spatial dimension; states are laid out as
    /// `[position; velocity]` with matching halves. `max_accel` must
    /// be positive and no smaller than the largest control magnitude.
    pub fn new(center: StateVec, radius: f64, max_accel: f64) -> Self {
        Self {
            center,
            radius,
            max_accel,
        }
    }
}

impl Heuristic for MinTimeHeuristic {
    fn cost_to_go(&self, x: &StateVec) -> f64 {
        let n = self.center.len();
        let p = x.rows(0, n).clone_owned();
        let v = x.rows(n, n).clone_owned();
        let d = ((p - &self.center).norm() - self.radius).max(0.0);
        if d == 0.0 {
            return 0.0;
        }
        let speed = v.norm();
        ((speed * speed + 2.0 * self.max_accel * d).sqrt() - speed) / self.max_accel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_zero_heuristic() {
        assert_eq!(ZeroHeuristic.cost_to_go(&dvector![5.0, -3.0]), 0.0);
    }

    #[test]
    fn test_min_time_zero_inside_goal() {
        let h = MinTimeHeuristic::new(dvector![1.0, 0.0], 0.5, 1.0);
        assert_eq!(h.cost_to_go(&dvector![0.9, 0.2, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_min_time_from_rest() {
        let h = MinTimeHeuristic::new(dvector![2.0], 0.0, 1.0);
        // d = 2 from rest at unit acceleration: t = sqrt(2 d) = 2
        let t = h.cost_to_go(&dvector![0.0, 0.0]);
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_time_underestimates_detour() {
        let h = MinTimeHeuristic::new(dvector![1.0, 0.0], 0.1, 2.0_f64.sqrt());
        // Speed pointing away from the goal still counts toward it,
        // keeping the estimate a lower bound
        let toward = h.cost_to_go(&dvector![0.5, 0.0, 1.0, 0.0]);
        let away = h.cost_to_go(&dvector![0.5, 0.0, -1.0, 0.0]);
        assert!((toward - away).abs() < 1e-12);
        assert!(toward > 0.0);
    }
}
