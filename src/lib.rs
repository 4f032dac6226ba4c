//! 2-D APIC particle/grid engine for scalar-field implosion effects.
//!
//! Intensities sampled from an image become particles; every step the
//! engine scatters them onto a background grid, integrates grid
//! velocities, lets the driver mutate the velocity field (mask
//! reflection, noise) and gathers the result back onto the particles.
//! The sweeps are plain functions in [`solver`]; this module wires them
//! into a bevy plugin with a public injection slot for the driver.

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use config::{BoundaryRule, StepParams};
pub use crate::core::{
    Grid, GridNode, MpmState, Particle, ParticleSet, ParticleStencil, ScalarField,
};
pub use error::SolverError;

/// Pipeline stages in execution order. Driver apps hook their grid
/// velocity mutations into [`MpmSet::FieldMutation`], which runs between
/// the grid update and G2P.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MpmSet {
    Weights,
    ParticleToGrid,
    GridUpdate,
    FieldMutation,
    GridToParticle,
}

pub struct MpmPlugin;

impl Plugin for MpmPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                MpmSet::Weights,
                MpmSet::ParticleToGrid,
                MpmSet::GridUpdate,
                MpmSet::FieldMutation,
                MpmSet::GridToParticle,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                rebuild_stencils.in_set(MpmSet::Weights),
                scatter_to_grid.in_set(MpmSet::ParticleToGrid),
                integrate_grid.in_set(MpmSet::GridUpdate),
                gather_from_grid.in_set(MpmSet::GridToParticle),
            )
                .distributive_run_if(resource_exists::<MpmState>),
        );
    }
}

fn rebuild_stencils(mut state: ResMut<MpmState>) {
    state.rebuild_stencils();
}

fn scatter_to_grid(mut state: ResMut<MpmState>) {
    if let Err(err) = state.scatter_to_grid() {
        error!("particle-to-grid transfer failed: {err}");
    }
}

fn integrate_grid(mut state: ResMut<MpmState>) {
    state.integrate_grid();
}

fn gather_from_grid(mut state: ResMut<MpmState>) {
    if let Err(err) = state.gather_from_grid() {
        error!("grid-to-particle transfer failed: {err}");
    }
}
