// Physical and visual constants (simulation-scaled units)
// - Distance: 1 unit = 1 screen pixel at zoom 1.0
// - Mass: dimensionless, a freshly seeded dust grain weighs 1.0
// - Time: seconds of simulation clock, before the speed multiplier

/// Radius of a body per square root of its mass (radius = k * sqrt(mass))
pub const RADIUS_SCALE: f64 = 2.0;

/// Mass at which a body ignites and is drawn as a star
pub const FUSION_THRESHOLD: f64 = 270.0;

/// Hard cap on body speed after every integration step
pub const MAX_VELOCITY: f64 = 1000.0;

/// Physics tick length in seconds (60 Hz)
pub const FIXED_TIMESTEP: f64 = 1.0 / 60.0;

/// Pairs further apart than this do not attract each other
pub const MAX_INTERACTION_DISTANCE: f64 = 2000.0;

/// Pairs closer than this are skipped to avoid the 1/r^2 singularity
pub const MIN_INTERACTION_DISTANCE: f64 = 0.1;

/// Side length of a collision grid cell
pub const COLLISION_CELL_SIZE: f64 = 100.0;

/// Two bodies touch when their centers are closer than this fraction of the radius sum
pub const OVERLAP_FACTOR: f64 = 0.95;

/// A trail point is sampled every N physics ticks
pub const TRAIL_SAMPLE_INTERVAL: u32 = 3;

/// Maximum number of trail points kept per body
pub const TRAIL_MAX_LEN: usize = 50;

/// Camera zoom limits
pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 5.0;

/// Wheel zoom factors (one notch)
pub const ZOOM_IN_FACTOR: f64 = 1.1;
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Fraction of the remaining distance the camera closes each tick while following
pub const FOLLOW_SMOOTHING: f64 = 0.1;

/// Pointer motion (pixels, per axis) above which a press becomes a drag and cancels following
pub const DRAG_THRESHOLD: f64 = 2.0;

/// Scale from the "spin" slider to angular velocity for linear cloud seeding
pub const CLOUD_SPIN_SCALE: f64 = 0.0005;

/// Length of the flare animation after a star is born (seconds)
pub const STAR_BIRTH_DURATION: f64 = 4.0;

/// Performance mode is re-evaluated this often (seconds of running time)
pub const PERFORMANCE_CHECK_INTERVAL: f64 = 2.0;

/// Body count above which performance mode engages
pub const PERFORMANCE_BODY_LIMIT: usize = 1000;

/// Measured frame rate below which performance mode engages
pub const PERFORMANCE_MIN_FPS: u32 = 30;
