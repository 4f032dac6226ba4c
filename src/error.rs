//! Error types surfaced by the solver.
//!
//! Numerical edge cases (zero-mass cells, clamped stencils) are handled
//! in place by policy and never reach this module; only configuration
//! mistakes become errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// Companion buffers disagree on element count or dimensions.
    #[error("shape mismatch: expected {expected} elements, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// A boundary rule name that `BoundaryRule::from_name` does not know.
    #[error("unknown boundary rule {0:?}")]
    UnknownBoundaryRule(String),
}
