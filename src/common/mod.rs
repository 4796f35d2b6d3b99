//! Common types, traits, and error definitions for glc_planner
//!
//! This module provides the foundational building blocks shared by the
//! search core and the concrete system models.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
