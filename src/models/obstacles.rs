//! Obstacle predicates over trajectory samples
//!
//! Both sets test the spatial prefix of every sample of an arc; the
//! integrator's sampling density bounds how much geometry can slip
//! between consecutive samples.

use crate::common::{ObstacleSet, StateVec, Trajectory};

/// Free space
#[derive(Debug, Clone, Copy)]
pub struct NoObstacles;

impl ObstacleSet for NoObstacles {
    fn collision_free(&self, _traj: &Trajectory) -> bool {
        true
    }
}

/// Spheres given as `(center, radius)`; each center's dimension
/// selects how many leading state components count as position
#[derive(Debug, Clone)]
pub struct SphereObstacles {
    spheres: Vec<(StateVec, f64)>,
}

impl SphereObstacles {
    pub fn new(spheres: Vec<(StateVec, f64)>) -> Self {
        Self { spheres }
    }
}

impl ObstacleSet for SphereObstacles {
    fn collision_free(&self, traj: &Trajectory) -> bool {
        for x in &traj.states {
            for (center, radius) in &self.spheres {
                let p = x.rows(0, center.len()).clone_owned();
                if (p - center).norm() <= *radius {
                    return false;
                }
            }
        }
        true
    }
}

/// Axis-aligned boxes given as `(min_corner, max_corner)` over the
/// leading position components
#[derive(Debug, Clone)]
pub struct BoxObstacles {
    boxes: Vec<(StateVec, StateVec)>,
}

impl BoxObstacles {
    pub fn new(boxes: Vec<(StateVec, StateVec)>) -> Self {
        Self { boxes }
    }
}

impl ObstacleSet for BoxObstacles {
    fn collision_free(&self, traj: &Trajectory) -> bool {
        for x in &traj.states {
            for (lo, hi) in &self.boxes {
                let inside = (0..lo.len()).all(|i| x[i] >= lo[i] && x[i] <= hi[i]);
                if inside {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn arc_through(points: Vec<StateVec>) -> Trajectory {
        let mut traj = Trajectory::new();
        for (i, p) in points.into_iter().enumerate() {
            traj.push(i as f64, p);
        }
        traj
    }

    #[test]
    fn test_no_obstacles_always_free() {
        let traj = arc_through(vec![dvector![0.0, 0.0]]);
        assert!(NoObstacles.collision_free(&traj));
    }

    #[test]
    fn test_sphere_blocks_sample_inside() {
        let obs = SphereObstacles::new(vec![(dvector![1.0, 1.0], 0.5)]);
        let hit = arc_through(vec![dvector![0.0, 0.0, 9.0, 9.0], dvector![1.2, 1.0, 9.0, 9.0]]);
        let miss = arc_through(vec![dvector![0.0, 0.0, 9.0, 9.0], dvector![2.0, 2.0, 9.0, 9.0]]);
        assert!(!obs.collision_free(&hit));
        assert!(obs.collision_free(&miss));
    }

    #[test]
    fn test_sphere_boundary_counts_as_hit() {
        let obs = SphereObstacles::new(vec![(dvector![0.0], 1.0)]);
        let touching = arc_through(vec![dvector![1.0, 0.0]]);
        assert!(!obs.collision_free(&touching));
    }

    #[test]
    fn test_box_blocks_only_inside() {
        let obs = BoxObstacles::new(vec![(dvector![0.4, -0.05], dvector![0.6, 0.05])]);
        let inside = arc_through(vec![dvector![0.5, 0.0, 1.0, 0.0]]);
        let above = arc_through(vec![dvector![0.5, 0.2, 1.0, 0.0]]);
        let before = arc_through(vec![dvector![0.3, 0.0, 1.0, 0.0]]);
        assert!(!obs.collision_free(&inside));
        assert!(obs.collision_free(&above));
        assert!(obs.collision_free(&before));
    }
}
