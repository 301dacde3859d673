//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Convert a millisecond duration to whole ticks, rounding up. Saturates
/// instead of overflowing.
pub const fn ms_to_ticks(ms: u64) -> u64 {
    ms.saturating_mul(TICK_RATE as u64).div_ceil(1000)
}

// --- Arena ---

/// Default arena width in pixels.
pub const ARENA_WIDTH: f64 = 1600.0;

/// Default arena height in pixels.
pub const ARENA_HEIGHT: f64 = 1200.0;

// --- Session ---

/// Lives granted at the start of every level.
pub const STARTING_LIVES: i32 = 3;

/// Level whose bullets ricochet off the arena bounds instead of expiring.
pub const BOUNCE_LEVEL: u8 = 3;

// --- Ship ---

/// Unscaled ship sprite size (pixels).
pub const SHIP_SPRITE_SIZE: f64 = 200.0;

pub const SHIP_SCALE: f64 = 0.2;

/// Rotation per tick while a turn key is held (degrees).
pub const SHIP_TURN_DEG_PER_TICK: f64 = 2.0;

/// Thrust acceleration for a movable ship (pixels/s²).
pub const SHIP_THRUST: f64 = 300.0;

/// Fraction of velocity kept per second when not thrusting.
pub const SHIP_DRAG_PER_SEC: f64 = 0.5;

/// Maximum ship speed (pixels/s).
pub const SHIP_MAX_SPEED: f64 = 400.0;

// --- Asteroids ---

/// Unscaled asteroid sprite size (pixels).
pub const ASTEROID_SPRITE_SIZE: f64 = 300.0;

pub const ASTEROID_SCALE: f64 = 0.2;

/// Ring radius for fixed asteroid layouts, as a fraction of min(width, height).
pub const ASTEROID_RING_FACTOR: f64 = 0.4;

/// Drifting asteroids get a velocity in [-ASTEROID_MAX_SPEED, ASTEROID_MAX_SPEED] per axis.
pub const ASTEROID_MAX_SPEED: f64 = 200.0;

/// Split children get a velocity in [-SPLIT_MAX_SPEED, SPLIT_MAX_SPEED] per axis.
pub const SPLIT_MAX_SPEED: f64 = 150.0;

/// Tumble rate bound (degrees/s).
pub const ASTEROID_MAX_SPIN_DEG: f64 = 100.0;

/// Children spawned per split.
pub const SPLIT_COUNT: usize = 2;

/// Scale multiplier applied to split children.
pub const SPLIT_SHRINK: f64 = 0.5;

/// Children smaller than this are not spawned; the parent is destroyed outright.
pub const MIN_ASTEROID_SCALE: f64 = 0.05;

// --- Bullets ---

/// Unscaled bullet sprite size (pixels).
pub const BULLET_SPRITE_SIZE: f64 = 50.0;

pub const BULLET_SCALE: f64 = 0.2;

/// Bullet speed for ship and asteroid shooters (pixels/s).
pub const BULLET_SPEED: f64 = 800.0;

/// Bullet speed for UFO shots (pixels/s).
pub const UFO_BULLET_SPEED: f64 = 400.0;

/// Bullet lifetime outside the bounce level (ms).
pub const BULLET_LIFESPAN_MS: u64 = 1000;

// --- UFO ---

/// Unscaled UFO sprite size (pixels).
pub const UFO_SPRITE_SIZE: f64 = 300.0;

pub const UFO_SCALE: f64 = 0.15;

/// Horizontal UFO speed (pixels/s).
pub const UFO_SPEED: f64 = 100.0;

/// Interval between UFO shots (ms).
pub const UFO_FIRE_INTERVAL_MS: u64 = 2000;

/// Longest level a table may define (one day).
pub const MAX_LEVEL_DURATION_MS: u64 = 24 * 60 * 60 * 1000;

// --- Scoring ---

pub const ASTEROID_POINTS: u32 = 10;

pub const UFO_POINTS: u32 = 50;
