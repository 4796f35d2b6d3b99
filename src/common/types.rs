//! Common types used throughout glc_planner

use nalgebra::DVector;

/// State vector in R^d; the dimension is fixed when the planner is built
pub type StateVec = DVector<f64>;

/// Control input; same representation as states, usually lower-dimensional
pub type ControlVec = DVector<f64>;

/// Componentwise floor of a scaled state to integer cell coordinates.
///
/// Rounds toward negative infinity on each component, so states just
/// below an integer boundary land in the lower cell.
pub fn floor_coords(w: &StateVec) -> Vec<i64> {
    w.iter().map(|&v| v.floor() as i64).collect()
}

/// A finite trajectory: timestamped state samples with strictly
/// increasing times.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub states: Vec<StateVec>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self {
            time: Vec::new(),
            states: Vec::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            time: Vec::with_capacity(n),
            states: Vec::with_capacity(n),
        }
    }

    pub fn from_parts(time: Vec<f64>, states: Vec<StateVec>) -> Self {
        assert_eq!(time.len(), states.len());
        Self { time, states }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn first_time(&self) -> Option<f64> {
        self.time.first().copied()
    }

    pub fn last_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    pub fn first_state(&self) -> Option<&StateVec> {
        self.states.first()
    }

    pub fn last_state(&self) -> Option<&StateVec> {
        self.states.last()
    }

    /// Elapsed time between the first and last sample
    pub fn duration(&self) -> f64 {
        if self.time.len() < 2 {
            return 0.0;
        }
        self.time[self.time.len() - 1] - self.time[0]
    }

    pub fn push(&mut self, t: f64, x: StateVec) {
        self.time.push(t);
        self.states.push(x);
    }

    pub fn pop_back(&mut self) -> Option<(f64, StateVec)> {
        match (self.time.pop(), self.states.pop()) {
            (Some(t), Some(x)) => Some((t, x)),
            _ => None,
        }
    }

    /// Append another trajectory, dropping its leading sample when it
    /// duplicates the current last sample's timestamp.
    pub fn append(&mut self, other: Trajectory) {
        let mut skip = 0;
        if let (Some(last), Some(first)) = (self.last_time(), other.first_time()) {
            if (last - first).abs() < 1e-12 {
                skip = 1;
            }
        }
        for (t, x) in other
            .time
            .into_iter()
            .zip(other.states.into_iter())
            .skip(skip)
        {
            self.time.push(t);
            self.states.push(x);
        }
    }

    /// True when sample times are strictly increasing
    pub fn has_monotone_time(&self) -> bool {
        self.time.windows(2).all(|w| w[0] < w[1])
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_floor_coords_negative_boundary() {
        let w = dvector![1.9, -0.1, -2.0, 0.0];
        assert_eq!(floor_coords(&w), vec![1, -1, -2, 0]);
    }

    #[test]
    fn test_trajectory_duration() {
        let mut traj = Trajectory::new();
        assert_eq!(traj.duration(), 0.0);
        traj.push(0.5, dvector![0.0]);
        traj.push(1.25, dvector![1.0]);
        assert!((traj.duration() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_trajectory_append_drops_duplicate() {
        let mut a = Trajectory::new();
        a.push(0.0, dvector![0.0]);
        a.push(1.0, dvector![1.0]);

        let mut b = Trajectory::new();
        b.push(1.0, dvector![1.0]);
        b.push(2.0, dvector![2.0]);

        a.append(b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.time, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_trajectory_append_keeps_distinct_head() {
        let mut a = Trajectory::new();
        a.push(0.0, dvector![0.0]);

        let mut b = Trajectory::new();
        b.push(0.5, dvector![1.0]);

        a.append(b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_trajectory_monotone_time() {
        let mut traj = Trajectory::new();
        traj.push(0.0, dvector![0.0]);
        traj.push(1.0, dvector![0.0]);
        assert!(traj.has_monotone_time());
        traj.push(1.0, dvector![0.0]);
        assert!(!traj.has_monotone_time());
    }

    #[test]
    fn test_trajectory_pop_back() {
        let mut traj = Trajectory::new();
        traj.push(0.0, dvector![0.0]);
        traj.push(1.0, dvector![2.0]);
        let (t, x) = traj.pop_back().unwrap();
        assert_eq!(t, 1.0);
        assert_eq!(x, dvector![2.0]);
        assert_eq!(traj.len(), 1);
    }
}
