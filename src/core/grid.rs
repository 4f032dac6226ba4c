//! Background grid for the particle transfer sweeps.
//!
//! A dense arena of nodes matching the source field lattice. Grid state is
//! ephemeral: P2G rebuilds it from zero every step, the integrator mutates
//! it in place, and G2P consumes it. It owns no cross-step state.

use bevy::prelude::*;

use crate::core::field::ScalarField;
use crate::math::{Real, Vector};

/// Number of neighbors in the 3x3 kernel.
pub const NEIGHBOR_COUNT: usize = 9;
/// Kernel width (quadratic B-spline).
pub const KERNEL_SIZE: usize = 3;

#[derive(Clone, Copy, Debug)]
pub struct GridNode {
    /// Momentum right after P2G, velocity after the grid update.
    pub velocity: Vector,
    pub mass: Real,
    /// Accumulated scalar payload (image intensity).
    pub value: Real,
}

impl GridNode {
    #[inline(always)]
    pub fn zeroed() -> Self {
        Self {
            velocity: Vector::ZERO,
            mass: 0.0,
            value: 0.0,
        }
    }

    #[inline(always)]
    pub fn zero(&mut self) {
        self.velocity = Vector::ZERO;
        self.mass = 0.0;
        self.value = 0.0;
    }
}

pub struct Grid {
    width: usize,
    height: usize,
    nodes: Vec<GridNode>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            nodes: vec![GridNode::zeroed(); width * height],
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn contains(&self, coord: IVec2) -> bool {
        coord.x >= 0
            && (coord.x as usize) < self.width
            && coord.y >= 0
            && (coord.y as usize) < self.height
    }

    #[inline(always)]
    fn linear_index(&self, coord: IVec2) -> usize {
        coord.y as usize * self.width + coord.x as usize
    }

    #[inline(always)]
    pub fn node(&self, coord: IVec2) -> Option<&GridNode> {
        if self.contains(coord) {
            self.nodes.get(self.linear_index(coord))
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn node_mut(&mut self, coord: IVec2) -> Option<&mut GridNode> {
        if self.contains(coord) {
            let index = self.linear_index(coord);
            self.nodes.get_mut(index)
        } else {
            None
        }
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [GridNode] {
        &mut self.nodes
    }

    /// Iterate `(coord, node)` over every node, mutably. This is the hook
    /// the driver uses to reflect or perturb grid velocities between the
    /// grid update and G2P.
    pub fn iter_nodes_mut(&mut self) -> impl Iterator<Item = (IVec2, &mut GridNode)> {
        let width = self.width;
        self.nodes.iter_mut().enumerate().map(move |(i, node)| {
            (
                IVec2::new((i % width) as i32, (i / width) as i32),
                node,
            )
        })
    }

    pub fn zero_all(&mut self) {
        self.nodes.iter_mut().for_each(|node| node.zero());
    }

    pub fn total_mass(&self) -> Real {
        self.nodes.iter().map(|node| node.mass).sum()
    }

    /// Snapshot of the accumulated value field.
    pub fn value_field(&self) -> ScalarField {
        let mut field = ScalarField::zeros(self.width, self.height);
        for (dst, node) in field.data_mut().iter_mut().zip(&self.nodes) {
            *dst = node.value;
        }
        field
    }

    /// Snapshot of the accumulated mass field.
    pub fn mass_field(&self) -> ScalarField {
        let mut field = ScalarField::zeros(self.width, self.height);
        for (dst, node) in field.data_mut().iter_mut().zip(&self.nodes) {
            *dst = node.mass;
        }
        field
    }
}
