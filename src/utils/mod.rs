//! Utility modules for glc_planner

pub mod visualization;

pub use visualization::{colors, PathStyle, PointStyle, Visualizer};
