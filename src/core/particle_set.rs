//! Particle storage plus the per-step stencil cache.
//!
//! The particle count is fixed after seeding; only positions, velocities
//! and affine matrices mutate during a run. Rest positions are recorded at
//! seeding time for the relaxation epilogue.

use crate::core::field::ScalarField;
use crate::core::kernel::ParticleStencil;
use crate::core::particle::Particle;
use crate::error::SolverError;
use crate::math::{Real, Vector};

#[derive(Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
    stencils: Vec<ParticleStencil>,
    rest_positions: Vec<Vector>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one particle per sample where both the field and the mask are
    /// nonzero, centered in its cell and carrying the sample as its value.
    pub fn seed_from_field(field: &ScalarField, mask: &ScalarField) -> Result<Self, SolverError> {
        if mask.width() != field.width() || mask.height() != field.height() {
            return Err(SolverError::ShapeMismatch {
                expected: field.width() * field.height(),
                got: mask.width() * mask.height(),
            });
        }

        let mut set = Self::new();
        for (x, y, value) in field.iter_indexed() {
            if value != 0.0 && mask.get(x, y) != 0.0 {
                let position = Vector::new(x as Real + 0.5, y as Real + 0.5);
                set.push(Particle::new(position).with_value(value));
            }
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) -> usize {
        let index = self.particles.len();
        self.rest_positions.push(particle.position);
        self.particles.push(particle);
        // The cache no longer matches the particle list.
        self.stencils.clear();
        index
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn stencils(&self) -> &[ParticleStencil] {
        &self.stencils
    }

    /// Split borrow used by G2P: mutable particles, shared stencils.
    pub fn particles_mut_and_stencils(&mut self) -> (&mut [Particle], &[ParticleStencil]) {
        let Self {
            particles,
            stencils,
            ..
        } = self;
        (particles.as_mut_slice(), stencils.as_slice())
    }

    /// Recompute the stencil cache from current particle positions.
    pub fn rebuild_stencils(&mut self, grid_width: usize, grid_height: usize) {
        self.stencils.clear();
        self.stencils.extend(
            self.particles
                .iter()
                .map(|p| ParticleStencil::compute_for_particle(p.position, grid_width, grid_height)),
        );
    }

    /// Recompute the stencil cache from externally supplied positions
    /// (the relaxation epilogue rasterizes lerped positions, not the live
    /// ones).
    pub fn rebuild_stencils_for_positions(
        &mut self,
        positions: &[Vector],
        grid_width: usize,
        grid_height: usize,
    ) -> Result<(), SolverError> {
        if positions.len() != self.particles.len() {
            return Err(SolverError::ShapeMismatch {
                expected: self.particles.len(),
                got: positions.len(),
            });
        }
        self.stencils.clear();
        self.stencils.extend(
            positions
                .iter()
                .map(|&p| ParticleStencil::compute_for_particle(p, grid_width, grid_height)),
        );
        Ok(())
    }

    /// Positions lerped from the live positions toward the recorded rest
    /// positions, `alpha` in `[0, 1]`.
    pub fn relaxed_positions(&self, alpha: Real) -> Vec<Vector> {
        self.particles
            .iter()
            .zip(&self.rest_positions)
            .map(|(particle, &rest)| particle.position + (rest - particle.position) * alpha)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc_field_and_mask() -> (ScalarField, ScalarField) {
        let mut field = ScalarField::zeros(8, 8);
        let mut mask = ScalarField::zeros(8, 8);
        for x in 2..6 {
            for y in 2..6 {
                field.set(x, y, 0.5);
                mask.set(x, y, 1.0);
            }
        }
        // Nonzero sample outside the mask must not seed a particle.
        field.set(0, 0, 0.9);
        (field, mask)
    }

    #[test]
    fn seeding_respects_field_and_mask() {
        let (field, mask) = disc_field_and_mask();
        let set = ParticleSet::seed_from_field(&field, &mask).unwrap();
        assert_eq!(set.len(), 16);
        assert!(set.particles().iter().all(|p| p.value == 0.5));
        assert!(set.particles().iter().all(|p| p.mass == 1.0));
        // Cell-centered positions.
        assert_eq!(set.particles()[0].position, Vector::new(2.5, 2.5));
    }

    #[test]
    fn seeding_rejects_mismatched_mask() {
        let field = ScalarField::zeros(8, 8);
        let mask = ScalarField::zeros(4, 4);
        assert!(ParticleSet::seed_from_field(&field, &mask).is_err());
    }

    #[test]
    fn relaxed_positions_interpolate_toward_rest() {
        let (field, mask) = disc_field_and_mask();
        let mut set = ParticleSet::seed_from_field(&field, &mask).unwrap();
        let rest = set.particles()[0].position;
        set.particles_mut()[0].position = rest + Vector::new(2.0, 0.0);

        let halfway = set.relaxed_positions(0.5);
        assert_eq!(halfway[0], rest + Vector::new(1.0, 0.0));
        let full = set.relaxed_positions(1.0);
        assert_eq!(full[0], rest);
    }
}
