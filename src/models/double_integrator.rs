//! Double-integrator dynamics
//!
//! State is `[position; velocity]` in `n` spatial dimensions, the
//! control is the acceleration. Piecewise-constant acceleration
//! integrates in closed form, so each sample of the rolled-out arc is
//! exact and the rollout is bitwise deterministic.

use itertools::Itertools;
use nalgebra::DVector;

use crate::common::{ControlVec, DynamicalSystem, StateVec, Trajectory};

/// n-dimensional double integrator
#[derive(Debug, Clone)]
pub struct DoubleIntegrator {
    dims: usize,
    sim_steps: usize,
}

impl DoubleIntegrator {
    /// System with `dims` spatial dimensions (state dimension is
    /// `2 * dims`) and the default arc sampling
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            sim_steps: 10,
        }
    }

    /// Override the number of integration substeps per arc
    pub fn with_sim_steps(mut self, sim_steps: usize) -> Self {
        self.sim_steps = sim_steps.max(1);
        self
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn state_dim(&self) -> usize {
        2 * self.dims
    }
}

impl DynamicalSystem for DoubleIntegrator {
    fn sim(&self, t0: f64, t1: f64, x0: &StateVec, u: &ControlVec) -> Trajectory {
        let steps = self.sim_steps.max(1);
        let h = (t1 - t0) / steps as f64;
        let n = self.dims;

        let mut traj = Trajectory::with_capacity(steps + 1);
        traj.push(t0, x0.clone());

        let mut x = x0.clone();
        for k in 1..=steps {
            let t = if k == steps {
                t1
            } else {
                t0 + h * k as f64
            };
            for i in 0..n {
                x[i] += x[n + i] * h + 0.5 * u[i] * h * h;
            }
            for i in 0..n {
                x[n + i] += u[i] * h;
            }
            traj.push(t, x.clone());
        }
        traj
    }

    fn lipschitz_flow(&self) -> f64 {
        1.0
    }
}

/// Cartesian product of the given per-axis levels: the full
/// acceleration grid for a `dims`-dimensional double integrator.
pub fn control_grid(levels: &[f64], dims: usize) -> Vec<ControlVec> {
    (0..dims)
        .map(|_| levels.iter().copied())
        .multi_cartesian_product()
        .map(DVector::from_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_sim_endpoints_and_sampling() {
        let sys = DoubleIntegrator::new(1);
        let traj = sys.sim(0.0, 0.5, &dvector![0.0, 0.0], &dvector![1.0]);
        assert_eq!(traj.len(), 11);
        assert_eq!(traj.first_time(), Some(0.0));
        assert_eq!(traj.last_time(), Some(0.5));
        assert!(traj.has_monotone_time());
    }

    #[test]
    fn test_sim_matches_closed_form() {
        let sys = DoubleIntegrator::new(1).with_sim_steps(50);
        let traj = sys.sim(0.0, 1.0, &dvector![0.0, 0.0], &dvector![1.0]);
        // x(t) = t^2 / 2, v(t) = t under unit acceleration from rest
        let end = traj.last_state().unwrap();
        assert!((end[0] - 0.5).abs() < 1e-12);
        assert!((end[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sim_coasts_without_acceleration() {
        let sys = DoubleIntegrator::new(2);
        let traj = sys.sim(1.0, 2.0, &dvector![0.0, 0.0, 1.0, -0.5], &dvector![0.0, 0.0]);
        let end = traj.last_state().unwrap();
        assert!((end[0] - 1.0).abs() < 1e-12);
        assert!((end[1] - (-0.5)).abs() < 1e-12);
        assert!((end[2] - 1.0).abs() < 1e-12);
        assert!((end[3] - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_control_grid_size_and_dims() {
        let grid = control_grid(&[-1.0, 0.0, 1.0], 2);
        assert_eq!(grid.len(), 9);
        assert!(grid.iter().all(|u| u.len() == 2));
        assert!(grid.contains(&dvector![-1.0, 1.0]));
        assert!(grid.contains(&dvector![0.0, 0.0]));
    }

    #[test]
    fn test_control_grid_one_dimension() {
        let grid = control_grid(&[-2.0, 2.0], 1);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], dvector![-2.0]);
        assert_eq!(grid[1], dvector![2.0]);
    }
}
