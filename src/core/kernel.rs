//! Quadratic B-spline interpolation kernel.
//!
//! Every particle influences a 3x3 neighborhood of grid nodes. Per axis the
//! weights form a partition of unity for any fractional offset, which is
//! what makes the mass/momentum transfer conservative.

use bevy::prelude::*;

use crate::core::grid::{KERNEL_SIZE, NEIGHBOR_COUNT};
use crate::math::{Real, Vector};

/// Per-axis quadratic B-spline weights for the offset `d` between the
/// particle and the center node of its stencil, `d` in `[-0.5, 0.5)`.
#[inline(always)]
fn bspline_weights(d: Real) -> [Real; 3] {
    [
        0.5 * (0.5 - d) * (0.5 - d),
        0.75 - d * d,
        0.5 * (0.5 + d) * (0.5 + d),
    ]
}

/// First derivative of the per-axis weights with respect to the particle
/// position. Sums to zero across the stencil.
#[inline(always)]
fn bspline_weight_gradients(d: Real) -> [Real; 3] {
    [d - 0.5, -2.0 * d, d + 0.5]
}

/// One grid node inside a particle's stencil.
#[derive(Clone, Copy, Debug)]
pub struct StencilNode {
    pub coord: IVec2,
    /// Product of the per-axis weights.
    pub weight: Real,
    /// Gradient of the weight with respect to the particle position.
    pub gradient: Vector,
    /// Vector from the particle to the node center.
    pub distance: Vector,
}

/// Interpolation data for one particle: the 3x3 stencil base plus per-axis
/// weights and weight derivatives. Recomputed every step since particles
/// move.
#[derive(Clone, Copy, Debug)]
pub struct ParticleStencil {
    /// Bottom-left node of the 3x3 stencil.
    pub base: IVec2,
    /// Per-axis weights, `weights[i].x` for column i, `.y` for row i.
    pub weights: [Vector; KERNEL_SIZE],
    /// Per-axis weight derivatives, same layout.
    pub gradients: [Vector; KERNEL_SIZE],
    /// Position the stencil was derived from: the particle position,
    /// clamped into the stencil-safe interior.
    pub position: Vector,
}

impl ParticleStencil {
    /// Build the stencil for a particle position on a `width x height`
    /// lattice. Node centers sit at `index + 0.5`.
    ///
    /// Out-of-bounds policy: the position used to derive the stencil is
    /// clamped into the stencil-safe interior `[1, dims - 1]` per axis
    /// (the same band G2P keeps particles in), and the base cell into
    /// `[0, dims - 3]`. Every stencil read/write stays addressable, the
    /// offset stays in `[-0.5, 0.5]`, and the weights stay non-negative
    /// while still summing to one. Deterministic, applied uniformly.
    pub fn compute_for_particle(position: Vector, width: usize, height: usize) -> Self {
        debug_assert!(width >= KERNEL_SIZE && height >= KERNEL_SIZE);

        let position = position.clamp(
            Vector::ONE,
            Vector::new(width as Real - 1.0, height as Real - 1.0),
        );
        let base = IVec2::new(
            (position.x.floor() as i32 - 1).clamp(0, width as i32 - KERNEL_SIZE as i32),
            (position.y.floor() as i32 - 1).clamp(0, height as i32 - KERNEL_SIZE as i32),
        );

        // Offset from the stencil's center node, in cell units.
        let center = base + IVec2::ONE;
        let d = position - center.as_vec2() - 0.5;
        debug_assert!(d.abs().max_element() <= 0.5 + 1e-6);

        let x_weights = bspline_weights(d.x);
        let y_weights = bspline_weights(d.y);
        let x_gradients = bspline_weight_gradients(d.x);
        let y_gradients = bspline_weight_gradients(d.y);

        debug_assert!((x_weights.iter().sum::<Real>() - 1.0).abs() < 1e-5);
        debug_assert!((y_weights.iter().sum::<Real>() - 1.0).abs() < 1e-5);

        let weights = [
            Vector::new(x_weights[0], y_weights[0]),
            Vector::new(x_weights[1], y_weights[1]),
            Vector::new(x_weights[2], y_weights[2]),
        ];
        let gradients = [
            Vector::new(x_gradients[0], y_gradients[0]),
            Vector::new(x_gradients[1], y_gradients[1]),
            Vector::new(x_gradients[2], y_gradients[2]),
        ];

        Self {
            base,
            weights,
            gradients,
            position,
        }
    }

    #[inline(always)]
    pub fn node_coord(&self, gx: usize, gy: usize) -> IVec2 {
        self.base + IVec2::new(gx as i32, gy as i32)
    }

    /// Weight of the node in stencil column `gx`, row `gy`.
    #[inline(always)]
    pub fn weight(&self, gx: usize, gy: usize) -> Real {
        self.weights[gx].x * self.weights[gy].y
    }

    /// Gradient of that node's weight with respect to the particle
    /// position.
    #[inline(always)]
    pub fn weight_gradient(&self, gx: usize, gy: usize) -> Vector {
        Vector::new(
            self.gradients[gx].x * self.weights[gy].y,
            self.weights[gx].x * self.gradients[gy].y,
        )
    }

    /// Vector from the particle to the node center.
    #[inline(always)]
    pub fn node_distance(&self, gx: usize, gy: usize) -> Vector {
        self.node_coord(gx, gy).as_vec2() + 0.5 - self.position
    }

    /// Iterate the 3x3 stencil as `(coord, weight, gradient, distance)`.
    #[inline(always)]
    pub fn iter_nodes(&self) -> impl Iterator<Item = StencilNode> + '_ {
        (0..NEIGHBOR_COUNT).map(move |idx| {
            let gx = idx % KERNEL_SIZE;
            let gy = idx / KERNEL_SIZE;
            StencilNode {
                coord: self.node_coord(gx, gy),
                weight: self.weight(gx, gy),
                gradient: self.weight_gradient(gx, gy),
                distance: self.node_distance(gx, gy),
            }
        })
    }
}
