use std::f64::consts::PI;

/// Radius scale of the spiral used to place particles without a position.
pub const INITIAL_RADIUS: f64 = 10.0;

/// Golden angle, π(3 − √5), between consecutive spiral placements.
pub const INITIAL_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_79);

/// Alpha below which a running simulation stops.
pub const DEFAULT_ALPHA_MIN: f64 = 0.001;

/// Number of iterations after which alpha reaches `DEFAULT_ALPHA_MIN` with a zero target.
pub const DEFAULT_COOLING_ITERATIONS: f64 = 300.0;

pub const DEFAULT_VELOCITY_DECAY: f64 = 0.4;

/// Squared lower bound on interaction distance.
pub const DEFAULT_DISTANCE_MIN_SQUARED: f64 = 0.75;

/// Squared Barnes-Hut accuracy parameter. Lennard-Jones interactions are
/// mostly short-range, so the default is tighter than usual gravity codes.
pub const DEFAULT_THETA_SQUARED: f64 = 0.0625;

pub const DEFAULT_REPULSIVE_POWER: f64 = 12.0;
pub const DEFAULT_ATTRACTIVE_POWER: f64 = 6.0;

/// Energy every particle starts each evaluation with.
pub const SELF_ENERGY: f64 = -1.0;

/// Amplitude of the jitter applied to exactly coincident coordinates.
pub const JIGGLE_SCALE: f64 = 1e-6;
