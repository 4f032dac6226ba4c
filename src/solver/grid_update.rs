//! Grid velocity integration stage.
//!
//! Converts accumulated momentum to velocity and applies gravity with a
//! forward Euler step. Sign convention, stated once: positive gravity
//! pulls toward -y.

use crate::config::StepParams;
use crate::core::grid::Grid;
use crate::math::inv_exact;

/// Divide momentum by mass and apply gravity on every occupied node.
/// Zero-mass nodes keep zero velocity; no division by zero can occur.
pub fn grid_velocity_update(grid: &mut Grid, params: &StepParams) {
    let gravity_step = params.gravity * params.dt;
    for node in grid.nodes_mut() {
        if node.mass > 0.0 {
            node.velocity *= inv_exact(node.mass);
            node.velocity.y -= gravity_step;
        }
    }
}
