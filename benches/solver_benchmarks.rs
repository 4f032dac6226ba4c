/// Simple custom benchmarking without criterion.
use std::time::Instant;

use bevy::math::Vec2;
use implode2d::{MpmState, Particle, StepParams};

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn seeded_state(count: usize) -> MpmState {
    let mut state = MpmState::new(128, 128, StepParams::default());
    let side = (count as f32).sqrt().ceil() as usize;

    'outer: for y in 0..side {
        for x in 0..side {
            if state.particle_count() >= count {
                break 'outer;
            }
            let position = Vec2::new(16.0 + x as f32 * 0.7, 32.0 + y as f32 * 0.7);
            let particle = Particle::new(position)
                .with_velocity(Vec2::new(1.0, -2.0))
                .with_value(0.5);
            state.particle_set_mut().push(particle);
        }
    }
    state
}

fn main() {
    println!("\n=== implode2d benchmarks ===\n");

    for &count in &[1000, 5000, 10000, 20000] {
        let mut state = seeded_state(count);
        state.rebuild_stencils();

        time_it(&format!("weights (n={})", count), 20, || {
            state.rebuild_stencils();
        });

        time_it(&format!("p2g (n={})", count), 20, || {
            state.scatter_to_grid().unwrap();
        });

        time_it(&format!("grid_update (n={})", count), 20, || {
            state.integrate_grid();
        });

        time_it(&format!("g2p (n={})", count), 20, || {
            state.gather_from_grid().unwrap();
        });

        time_it(&format!("full step (n={})", count), 20, || {
            state.step().unwrap();
        });

        println!();
    }
}
