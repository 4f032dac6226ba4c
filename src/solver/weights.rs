//! Weight computation sweep.
//!
//! First stage of every step: particle positions become 3x3 stencils with
//! per-axis weights and weight derivatives. See
//! [`ParticleStencil::compute_for_particle`] for the kernel and the
//! out-of-bounds clamping policy.

use crate::core::kernel::ParticleStencil;
use crate::math::Vector;

pub fn compute_interpolation_weights(
    positions: &[Vector],
    grid_width: usize,
    grid_height: usize,
) -> Vec<ParticleStencil> {
    positions
        .iter()
        .map(|&position| ParticleStencil::compute_for_particle(position, grid_width, grid_height))
        .collect()
}
