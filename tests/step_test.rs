//! Full pipeline behavior
//!
//! Runs whole steps through `MpmState`: rest-state idempotence, gravity
//! sign convention, wall bounce, driver-side field mutation, seeding and
//! the relaxation epilogue.

use approx::assert_relative_eq;
use bevy::math::Vec2;
use implode2d::{BoundaryRule, MpmState, Particle, ScalarField, StepParams};

fn block_state(params: StepParams) -> MpmState {
    let mut state = MpmState::new(32, 32, params);
    for x in 0..6 {
        for y in 0..6 {
            let position = Vec2::new(12.0 + x as f32 * 0.8, 12.0 + y as f32 * 0.8);
            state
                .particle_set_mut()
                .push(Particle::new(position).with_value(0.4));
        }
    }
    state
}

#[test]
fn rest_state_is_idempotent_without_gravity() {
    let mut state = block_state(StepParams::default().with_gravity(0.0));
    let before: Vec<Vec2> = state
        .particle_set()
        .particles()
        .iter()
        .map(|p| p.position)
        .collect();

    state.step().unwrap();

    for (particle, &original) in state.particle_set().particles().iter().zip(&before) {
        assert_relative_eq!(particle.position.x, original.x, epsilon = 1e-6);
        assert_relative_eq!(particle.position.y, original.y, epsilon = 1e-6);
        assert_relative_eq!(particle.velocity.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(particle.velocity.y, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn positive_gravity_pulls_toward_negative_y() {
    let mut state = block_state(StepParams::default().with_gravity(0.5).with_dt(1.0));
    state.step().unwrap();

    for particle in state.particle_set().particles() {
        assert_relative_eq!(particle.velocity.y, -0.5, epsilon = 1e-5);
    }
}

#[test]
fn bounce_reverses_and_damps_at_the_wall() {
    let params = StepParams::default()
        .with_boundary(BoundaryRule::Bounce)
        .with_bounce_factor(-0.9);
    let mut state = MpmState::new(32, 32, params);
    state
        .particle_set_mut()
        .push(Particle::new(Vec2::new(2.0, 16.0)).with_velocity(Vec2::new(-3.0, 0.0)));

    state.step().unwrap();

    let particle = &state.particle_set().particles()[0];
    assert_relative_eq!(particle.velocity.x, 2.7, epsilon = 1e-4);
    assert_relative_eq!(particle.velocity.y, 0.0, epsilon = 1e-4);
    // The particle must not cross the wall within the bounce step.
    assert!(particle.position.x >= 1.0);
    assert_relative_eq!(particle.position.x, 4.7, epsilon = 1e-4);
    assert!(particle.is_finite());
}

#[test]
fn externally_mutated_grid_velocities_are_gathered_as_is() {
    let mut state = block_state(StepParams::default());
    for particle in state.particle_set_mut().particles_mut() {
        particle.velocity = Vec2::new(0.5, 0.0);
    }

    state.rebuild_stencils();
    state.scatter_to_grid().unwrap();
    state.integrate_grid();

    // Driver-style mutation between the grid update and G2P.
    for (_, node) in state.grid_mut().iter_nodes_mut() {
        node.velocity *= -1.25;
    }

    state.gather_from_grid().unwrap();

    for particle in state.particle_set().particles() {
        assert_relative_eq!(particle.velocity.x, -0.625, epsilon = 1e-4);
        assert_relative_eq!(particle.velocity.y, 0.0, epsilon = 1e-4);
    }
}

#[test]
fn particle_count_stays_fixed_across_steps() {
    let mut state = block_state(StepParams::default().with_gravity(0.3));
    let count = state.particle_count();
    for _ in 0..25 {
        state.step().unwrap();
    }
    assert_eq!(state.particle_count(), count);
    assert!(state.particle_set().particles().iter().all(Particle::is_finite));
}

#[test]
fn epilogue_rasterizes_back_at_rest_positions() {
    let mut field = ScalarField::zeros(16, 16);
    let mut mask = ScalarField::zeros(16, 16);
    field.set(8, 8, 0.6);
    mask.set(8, 8, 1.0);

    let mut state = MpmState::from_field(&field, &mask, StepParams::default()).unwrap();
    assert_eq!(state.particle_count(), 1);

    // Displace the particle, then fully relax it home.
    state.particle_set_mut().particles_mut()[0].position = Vec2::new(4.0, 11.0);
    state.relax_epilogue_step(1.0).unwrap();

    // Mass conserved, and the cell holding the rest position carries the
    // dominant share (center weight of the quadratic kernel).
    assert_relative_eq!(state.grid().total_mass(), 1.0, max_relative = 1e-5);
    let center = state.grid().node(bevy::math::IVec2::new(8, 8)).unwrap();
    assert_relative_eq!(center.mass, 0.5625, epsilon = 1e-5);
    assert_relative_eq!(center.value, 0.5625 * 0.6, epsilon = 1e-5);
}
