// Default simulation parameters, matching the implosion/explosion driver.
use crate::math::Real;

pub const DEFAULT_DT: Real = 1.0;
pub const DEFAULT_GRAVITY: Real = 0.0;
pub const DEFAULT_BOUNCE_FACTOR: Real = -0.9;

/// Wall margin in cells. Boundary rules act on this band and G2P keeps
/// particle positions inside it so every 3x3 stencil stays addressable.
pub const WALL_MARGIN: Real = 1.0;

/// Accumulated mass above which exported values are renormalized by mass
/// (brightness correction for overlapping particles).
pub const BRIGHTNESS_MASS_THRESHOLD: Real = 2.0;
