// Headless implosion/explosion driver: a synthetic "brain" disc inside a
// static "skull" ring. Every 20 frames the particles get a radial kick
// (inward, then outward), the skull region reflects grid velocities, and
// a little noise keeps the motion organic. Ends with a relaxation
// epilogue that settles particles back to their rest positions.
use bevy::log::LogPlugin;
use bevy::prelude::*;
use implode2d::config::BRIGHTNESS_MASS_THRESHOLD;
use implode2d::{MpmPlugin, MpmSet, MpmState, ScalarField, StepParams};
use rand::Rng;

const DIMS: usize = 96;
const NR_ITER: u32 = 200;
const NR_FINAL_FRAMES: u32 = 30;
const KICK_PERIOD: u32 = 20;

/// Inner disc: seeded with particles.
const BRAIN_RADIUS: f32 = 20.0;
/// Outer ring boundary: static obstacle material.
const SKULL_RADIUS: f32 = 28.0;

#[derive(Resource, Clone, Copy, Default)]
struct Frame(u32);

/// Source intensities, kept around for the static skull redraw.
#[derive(Resource)]
struct SourceField(ScalarField);

/// Zero inside the obstacle ring, one elsewhere (matches the seeding
/// mask convention: particles live where the mask is nonzero).
#[derive(Resource)]
struct ObstacleMask(ScalarField);

fn build_scene() -> (ScalarField, ScalarField) {
    let mut field = ScalarField::zeros(DIMS, DIMS);
    let mut mask = ScalarField::zeros(DIMS, DIMS);
    let center = Vec2::splat(DIMS as f32 / 2.0);

    for x in 0..DIMS {
        for y in 0..DIMS {
            let r = (Vec2::new(x as f32, y as f32) - center).length();
            if r < BRAIN_RADIUS {
                // Radial intensity gradient, brighter toward the rim.
                field.set(x, y, 0.3 + 0.7 * r / BRAIN_RADIUS);
                mask.set(x, y, 1.0);
            } else if r < SKULL_RADIUS {
                field.set(x, y, 1.0);
            } else {
                mask.set(x, y, 1.0);
            }
        }
    }
    (field, mask)
}

/// Periodic radial velocity kicks: inward at the start of each period,
/// outward halfway through, with uniform noise on top.
fn radial_kick(frame: Res<Frame>, mut state: ResMut<MpmState>) {
    let phase = frame.0 % KICK_PERIOD;
    let scale = match phase {
        0 => -1.0 / 100.0,
        10 => 1.0 / 100.0,
        _ => return,
    };

    let center = Vec2::splat(DIMS as f32 / 2.0);
    let mut rng = rand::rng();
    for particle in state.particle_set_mut().particles_mut() {
        particle.velocity = (particle.position - center) * scale
            + Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
    }
}

/// Driver-side grid velocity mutation, running between the grid update
/// and G2P: reflect and amplify velocities inside the skull ring, then
/// inject noise everywhere.
fn skull_reflection(mask: Res<ObstacleMask>, mut state: ResMut<MpmState>) {
    let mut rng = rand::rng();
    for (coord, node) in state.grid_mut().iter_nodes_mut() {
        if mask.0.get(coord.x as usize, coord.y as usize) == 0.0 {
            node.velocity *= -1.25;
        }
        node.velocity += Vec2::new(
            (rng.random::<f32>() - 0.5) / 10.0,
            (rng.random::<f32>() - 0.5) / 10.0,
        );
    }
}

/// Compose the exported frame: rasterized values plus the static skull,
/// brightness-corrected where particles pile up. A real driver would hand
/// this field to its image writer.
fn compose_frame(field: &ScalarField, mask: &ScalarField, state: &MpmState) -> ScalarField {
    let mut out = state.grid().value_field();
    let mass = state.grid().mass_field();
    for (x, y, source) in field.iter_indexed() {
        if mask.get(x, y) == 0.0 {
            let v = out.get(x, y) + source;
            out.set(x, y, v);
        }
        if mass.get(x, y) > BRIGHTNESS_MASS_THRESHOLD {
            out.set(x, y, out.get(x, y) / mass.get(x, y));
        }
    }
    out
}

fn export_frame(
    frame: Res<Frame>,
    source: Res<SourceField>,
    mask: Res<ObstacleMask>,
    state: Res<MpmState>,
) {
    let out = compose_frame(&source.0, &mask.0, &state);
    if frame.0 % 20 == 0 {
        let mean = out.data().iter().sum::<f32>() / out.data().len() as f32;
        info!("frame {:03}: mean brightness {:.4}", frame.0, mean);
    }
}

fn main() {
    let (field, mask) = build_scene();
    let params = StepParams::default(); // dt 1, no gravity, bounce -0.9

    let state = MpmState::from_field(&field, &mask, params).expect("field and mask shapes match");
    println!("Number of particles: {}", state.particle_count());

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default(), MpmPlugin))
        .insert_resource(Frame::default())
        .insert_resource(SourceField(field.clone()))
        .insert_resource(ObstacleMask(mask.clone()))
        .insert_resource(state)
        .add_systems(Update, radial_kick.before(MpmSet::Weights))
        .add_systems(Update, skull_reflection.in_set(MpmSet::FieldMutation))
        .add_systems(Update, export_frame.after(MpmSet::GridToParticle));

    for t in 0..NR_ITER {
        app.world_mut().resource_mut::<Frame>().0 = t;
        app.update();
    }

    // Relaxation epilogue: interpolate particles back to rest positions
    // and rasterize without dynamics.
    println!("Epilogue");
    let world = app.world_mut();
    for j in 0..NR_FINAL_FRAMES {
        let alpha = j as f32 / NR_FINAL_FRAMES as f32;
        {
            let mut state = world.resource_mut::<MpmState>();
            state
                .relax_epilogue_step(alpha)
                .expect("epilogue positions match particle count");
        }
        let state = world.resource::<MpmState>();
        let out = compose_frame(&field, &mask, &state);
        let mean = out.data().iter().sum::<f32>() / out.data().len() as f32;
        println!("epilogue frame {:03}: mean brightness {:.4}", NR_ITER + j, mean);
    }
}
