//! Configuration and parameters
//!
//! Constants and per-step solver settings.

pub mod constants;
pub mod step_params;

pub use constants::*;
pub use step_params::*;
