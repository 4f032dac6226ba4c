pub mod field;
pub mod grid;
pub mod kernel;
pub mod mpm_state;
pub mod particle;
pub mod particle_set;

pub use field::ScalarField;
pub use grid::{Grid, GridNode, KERNEL_SIZE, NEIGHBOR_COUNT};
pub use kernel::{ParticleStencil, StencilNode};
pub use mpm_state::MpmState;
pub use particle::Particle;
pub use particle_set::ParticleSet;
