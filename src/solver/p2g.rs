//! Particle-to-Grid (P2G) transfer operations
//!
//! Scatters particle mass, APIC momentum and scalar value onto the grid.
//! Also hosts the static rasterizer, which reuses the same mass/value
//! scatter without any velocity transfer.

use crate::core::grid::Grid;
use crate::core::kernel::ParticleStencil;
use crate::core::particle::Particle;
use crate::error::SolverError;
use crate::math::Real;

#[inline(always)]
pub(crate) fn check_lengths(expected: usize, got: usize) -> Result<(), SolverError> {
    if expected == got {
        Ok(())
    } else {
        Err(SolverError::ShapeMismatch { expected, got })
    }
}

/// Mass/value scatter shared by the dynamic transfer and the static
/// rasterizer.
#[inline(always)]
fn scatter_mass_value(grid: &mut Grid, stencil: &ParticleStencil, mass: Real, value: Real) {
    for node in stencil.iter_nodes() {
        if let Some(cell) = grid.node_mut(node.coord) {
            cell.mass += node.weight * mass;
            cell.value += node.weight * value;
        }
    }
}

/// Scatter mass, momentum and value for every particle.
///
/// Each stencil node receives `w * m * (v + C * (node - p))`; the affine
/// term preserves the angular information plain PIC loses. Node velocity
/// holds raw momentum afterwards; the grid update divides by mass. The
/// caller zeroes the grid beforehand (grid state is ephemeral).
pub fn particle_to_grid(
    particles: &[Particle],
    stencils: &[ParticleStencil],
    grid: &mut Grid,
) -> Result<(), SolverError> {
    check_lengths(particles.len(), stencils.len())?;

    for (particle, stencil) in particles.iter().zip(stencils) {
        scatter_mass_value(grid, stencil, particle.mass, particle.value);

        for node in stencil.iter_nodes() {
            let q = particle.affine_momentum_matrix * node.distance;
            let mass_contribution = node.weight * particle.mass;
            if let Some(cell) = grid.node_mut(node.coord) {
                cell.velocity += mass_contribution * (particle.velocity + q);
            }
        }
    }
    Ok(())
}

/// Static rasterization: mass and value only, no momentum.
///
/// Used by the relaxation epilogue, where stencils are computed from
/// lerped rest positions instead of the live ones.
pub fn particle_pos_to_grid(
    particles: &[Particle],
    stencils: &[ParticleStencil],
    grid: &mut Grid,
) -> Result<(), SolverError> {
    check_lengths(particles.len(), stencils.len())?;

    for (particle, stencil) in particles.iter().zip(stencils) {
        scatter_mass_value(grid, stencil, particle.mass, particle.value);
    }
    Ok(())
}
