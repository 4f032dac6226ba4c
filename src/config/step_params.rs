use bevy::prelude::*;

use crate::config::constants::{DEFAULT_BOUNCE_FACTOR, DEFAULT_DT, DEFAULT_GRAVITY};
use crate::error::SolverError;
use crate::math::Real;

/// Boundary handling applied to particle velocities during G2P.
///
/// A rule is a closed variant so new behaviors can be added without
/// touching the transfer math.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BoundaryRule {
    /// Reflect the wall-perpendicular velocity component, scaled by the
    /// signed bounce factor.
    #[default]
    Bounce,
    /// Kill the wall-perpendicular velocity component at the wall.
    Clamp,
}

impl BoundaryRule {
    /// Resolve a rule by name. Unknown names are a configuration error,
    /// reported immediately rather than defaulted.
    pub fn from_name(name: &str) -> Result<Self, SolverError> {
        match name {
            "bounce" => Ok(Self::Bounce),
            "clamp" => Ok(Self::Clamp),
            other => Err(SolverError::UnknownBoundaryRule(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Clamp => "clamp",
        }
    }
}

/// Solver parameters for one simulation step.
///
/// Passed explicitly to every stage instead of living in module state, so
/// repeated or parallel runs stay reproducible.
#[derive(Resource, Clone, Copy, Debug)]
pub struct StepParams {
    /// Time step (smaller = more accurate simulation).
    pub dt: Real,
    /// Positive gravity pulls toward -y.
    pub gravity: Real,
    /// Signed scale applied to reflected velocity components, e.g. -0.9
    /// to reverse direction with damping.
    pub bounce_factor: Real,
    pub boundary: BoundaryRule,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            gravity: DEFAULT_GRAVITY,
            bounce_factor: DEFAULT_BOUNCE_FACTOR,
            boundary: BoundaryRule::Bounce,
        }
    }
}

impl StepParams {
    pub fn with_dt(mut self, dt: Real) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_gravity(mut self, gravity: Real) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_bounce_factor(mut self, bounce_factor: Real) -> Self {
        self.bounce_factor = bounce_factor;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryRule) -> Self {
        self.boundary = boundary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_round_trip() {
        assert_eq!(BoundaryRule::from_name("bounce"), Ok(BoundaryRule::Bounce));
        assert_eq!(BoundaryRule::from_name("clamp"), Ok(BoundaryRule::Clamp));
        assert_eq!(BoundaryRule::Bounce.name(), "bounce");
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let err = BoundaryRule::from_name("wrap").unwrap_err();
        assert_eq!(err, SolverError::UnknownBoundaryRule("wrap".to_string()));
    }
}
