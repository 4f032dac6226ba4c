//! The four transfer sweeps plus the static rasterizer.
//!
//! Sweeps are pure functions over explicit state and must run in pipeline
//! order: weights -> P2G -> grid update -> (driver field mutation) -> G2P.
//! Each stage consumes the full output of the previous one.

pub mod g2p;
pub mod grid_update;
pub mod p2g;
pub mod weights;

pub use g2p::grid_to_particle_velocity;
pub use grid_update::grid_velocity_update;
pub use p2g::{particle_pos_to_grid, particle_to_grid};
pub use weights::compute_interpolation_weights;
