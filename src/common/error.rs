//! Error types for glc_planner

use std::fmt;

/// Main error type for the planner
#[derive(Debug)]
pub enum PlannerError {
    /// A construction parameter is out of range or inconsistent
    InvalidParameter(String),
    /// A collaborator returned a trajectory that violates its contract
    /// (empty, non-monotone time, wrong dimension, bad endpoints)
    MalformedTrajectory(String),
    /// A collaborator returned a negative or non-finite cost value
    InvalidCost(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            PlannerError::MalformedTrajectory(msg) => write!(f, "Malformed trajectory: {}", msg),
            PlannerError::InvalidCost(msg) => write!(f, "Invalid cost: {}", msg),
        }
    }
}

impl std::error::Error for PlannerError {}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
