//! Grid-to-Particle (G2P) transfer operations
//!
//! Gathers grid velocities back onto particles, rebuilds the affine
//! velocity-gradient matrix and advects positions with boundary handling.
//! The grid passed in may have been mutated by the driver after the grid
//! update (mask reflection, noise); it is consumed as-is.

use crate::config::constants::WALL_MARGIN;
use crate::config::{BoundaryRule, StepParams};
use crate::core::grid::Grid;
use crate::core::kernel::ParticleStencil;
use crate::core::particle::Particle;
use crate::error::SolverError;
use crate::math::{Vector, outer_product, zero_matrix};

use super::p2g::check_lengths;

/// Gather velocities, rebuild each particle's C matrix and advect.
///
/// The new velocity is the weighted stencil sum; C is rebuilt as
/// `sum(node_velocity ⊗ weight_gradient)`, ready for the next P2G. The
/// boundary rule corrects the velocity before the position update, so a
/// bounced particle never crosses the wall within the same step.
pub fn grid_to_particle_velocity(
    particles: &mut [Particle],
    stencils: &[ParticleStencil],
    grid: &Grid,
    params: &StepParams,
) -> Result<(), SolverError> {
    check_lengths(particles.len(), stencils.len())?;

    let lo = Vector::splat(WALL_MARGIN);
    let hi = Vector::new(grid.width() as f32, grid.height() as f32) - WALL_MARGIN;

    for (particle, stencil) in particles.iter_mut().zip(stencils) {
        let mut velocity = Vector::ZERO;
        let mut velocity_gradient = zero_matrix();

        for node in stencil.iter_nodes() {
            if let Some(cell) = grid.node(node.coord) {
                velocity += cell.velocity * node.weight;
                velocity_gradient += outer_product(cell.velocity, node.gradient);
            }
        }

        particle.affine_momentum_matrix = velocity_gradient;
        particle.velocity = apply_boundary_rule(particle.position, velocity, lo, hi, params);
        particle.position += particle.velocity * params.dt;

        // Backstop: keep the stencil addressable even when the corrected
        // velocity cannot stop the crossing within one step.
        particle.position = particle.position.clamp(lo, hi);
    }
    Ok(())
}

/// Correct a candidate particle velocity against the lattice walls.
///
/// Wall geometry: a margin of [`WALL_MARGIN`] cells on each side. An axis
/// whose projected position `p + v * dt` would leave the interior gets its
/// velocity component corrected by the active rule.
fn apply_boundary_rule(
    position: Vector,
    velocity: Vector,
    lo: Vector,
    hi: Vector,
    params: &StepParams,
) -> Vector {
    let projected = position + velocity * params.dt;
    let mut corrected = velocity;

    match params.boundary {
        BoundaryRule::Bounce => {
            if projected.x < lo.x || projected.x > hi.x {
                corrected.x *= params.bounce_factor;
            }
            if projected.y < lo.y || projected.y > hi.y {
                corrected.y *= params.bounce_factor;
            }
        }
        BoundaryRule::Clamp => {
            if projected.x < lo.x || projected.x > hi.x {
                corrected.x = 0.0;
            }
            if projected.y < lo.y || projected.y > hi.y {
                corrected.y = 0.0;
            }
        }
    }
    corrected
}
