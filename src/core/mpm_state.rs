//! Aggregate simulation state.
//!
//! Bundles the particle set, the grid and the step parameters behind one
//! resource so the plugin systems (and direct drivers) can run the sweep
//! pipeline without threading three borrows around.

use bevy::prelude::*;

use crate::config::StepParams;
use crate::core::field::ScalarField;
use crate::core::grid::Grid;
use crate::core::particle_set::ParticleSet;
use crate::error::SolverError;
use crate::math::Real;
use crate::solver;

#[derive(Resource)]
pub struct MpmState {
    particle_set: ParticleSet,
    grid: Grid,
    params: StepParams,
}

impl MpmState {
    pub fn new(grid_width: usize, grid_height: usize, params: StepParams) -> Self {
        Self {
            particle_set: ParticleSet::new(),
            grid: Grid::new(grid_width, grid_height),
            params,
        }
    }

    /// Build a state whose grid matches the field lattice, seeded with one
    /// particle per nonzero masked sample.
    pub fn from_field(
        field: &ScalarField,
        mask: &ScalarField,
        params: StepParams,
    ) -> Result<Self, SolverError> {
        Ok(Self {
            particle_set: ParticleSet::seed_from_field(field, mask)?,
            grid: Grid::new(field.width(), field.height()),
            params,
        })
    }

    pub fn particle_set(&self) -> &ParticleSet {
        &self.particle_set
    }

    pub fn particle_set_mut(&mut self) -> &mut ParticleSet {
        &mut self.particle_set
    }

    pub fn particle_count(&self) -> usize {
        self.particle_set.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut StepParams {
        &mut self.params
    }

    /// Stage 1: recompute the stencil cache from current positions.
    pub fn rebuild_stencils(&mut self) {
        self.particle_set
            .rebuild_stencils(self.grid.width(), self.grid.height());
    }

    /// Stage 2: zero the ephemeral grid and scatter mass/momentum/value.
    pub fn scatter_to_grid(&mut self) -> Result<(), SolverError> {
        self.grid.zero_all();
        solver::particle_to_grid(
            self.particle_set.particles(),
            self.particle_set.stencils(),
            &mut self.grid,
        )
    }

    /// Stage 3: momentum -> velocity plus gravity.
    pub fn integrate_grid(&mut self) {
        solver::grid_velocity_update(&mut self.grid, &self.params);
    }

    /// Stage 4: gather velocities back and advect. Accepts whatever grid
    /// velocities are present, including driver-side mutations applied
    /// after [`Self::integrate_grid`].
    pub fn gather_from_grid(&mut self) -> Result<(), SolverError> {
        let params = self.params;
        let (particles, stencils) = self.particle_set.particles_mut_and_stencils();
        solver::grid_to_particle_velocity(particles, stencils, &self.grid, &params)
    }

    /// One full sweep sequence with no driver-side field mutation.
    pub fn step(&mut self) -> Result<(), SolverError> {
        self.rebuild_stencils();
        self.scatter_to_grid()?;
        self.integrate_grid();
        self.gather_from_grid()
    }

    /// One relaxation epilogue frame: rasterize mass/value at positions
    /// lerped toward the recorded rest positions, without dynamics.
    /// `alpha` in `[0, 1]`; 1 means fully settled.
    pub fn relax_epilogue_step(&mut self, alpha: Real) -> Result<(), SolverError> {
        let positions = self.particle_set.relaxed_positions(alpha);
        self.particle_set.rebuild_stencils_for_positions(
            &positions,
            self.grid.width(),
            self.grid.height(),
        )?;

        self.grid.zero_all();
        solver::particle_pos_to_grid(
            self.particle_set.particles(),
            self.particle_set.stencils(),
            &mut self.grid,
        )
    }
}
