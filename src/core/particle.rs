//! Material particles.
//!
//! Particles carry position, velocity, mass, the sampled field value and
//! the affine velocity-gradient matrix used by the APIC transfer.

use crate::math::{Matrix, Real, Vector, zero_matrix, zero_vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in grid space (one unit per cell).
    pub position: Vector,
    pub velocity: Vector,
    pub mass: Real,
    /// Scalar payload sampled from the source field at seeding time.
    pub value: Real,
    /// MLS affine velocity field (C matrix).
    pub affine_momentum_matrix: Matrix,
}

impl Particle {
    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: zero_vector(),
            mass: 1.0,
            value: 0.0,
            affine_momentum_matrix: zero_matrix(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_value(mut self, value: Real) -> Self {
        self.value = value;
        self
    }

    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.mass.is_finite()
            && self.value.is_finite()
            && self.affine_momentum_matrix.x_axis.is_finite()
            && self.affine_momentum_matrix.y_axis.is_finite()
    }
}
