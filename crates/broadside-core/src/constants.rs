//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz). Matches the VR headset refresh the
/// original frame-driven timers ran at.
pub const TICK_RATE: u32 = 90;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Session ---

/// Scripted-session duration in seconds.
pub const SESSION_DURATION_SECS: f64 = 120.0;

/// Number of heart (life) slots.
pub const HEART_COUNT: usize = 3;

// --- Difficulty ramp ---

/// Interval between difficulty steps (seconds).
pub const DIFFICULTY_STEP_SECS: f64 = 2.0;

/// Elapsed time after which the ramp stops escalating (seconds).
pub const RAMP_CUTOFF_SECS: f64 = 120.0;

/// Ship speed at session start (units/s).
pub const INITIAL_SHIP_SPEED: f64 = 32.0;

/// Speed added per difficulty step (units/s).
pub const SPEED_STEP: f64 = 10.0;

/// Ship speed ceiling (units/s).
pub const MAX_SHIP_SPEED: f64 = 85.0;

/// Ships per spawn cycle at session start.
pub const INITIAL_CYCLE_CAP: u32 = 60;

/// Cycle cap added per difficulty step.
pub const CYCLE_CAP_STEP: u32 = 10;

/// Cycle cap ceiling.
pub const MAX_CYCLE_CAP: u32 = 200;

/// Spawn interval bounds at session start (seconds).
pub const INITIAL_SPAWN_INTERVAL_MIN: f64 = 0.10;
pub const INITIAL_SPAWN_INTERVAL_MAX: f64 = 0.18;

/// Amount both interval bounds shrink per difficulty step (seconds).
pub const SPAWN_INTERVAL_STEP: f64 = 0.008;

/// Floors for the spawn interval bounds (seconds).
pub const SPAWN_INTERVAL_MIN_FLOOR: f64 = 0.03;
pub const SPAWN_INTERVAL_MAX_FLOOR: f64 = 0.08;

/// Minimum gap between any two successful spawns (seconds).
pub const MIN_GLOBAL_SPAWN_INTERVAL: f64 = 0.02;

// --- Spawn spacing ---

/// Base minimum longitudinal gap between ships in a lane (units).
pub const BASE_MIN_DISTANCE: f64 = 50.0;

/// Extra gap required behind a sinking ship (units).
pub const SINKING_EXTRA_DISTANCE: f64 = 30.0;

/// Min distance scales with speed: max(base, speed × this).
pub const SPEED_DISTANCE_MULTIPLIER: f64 = 1.6;

/// Ships within this lateral offset of a lane's spawn point are
/// considered to share the lane for spacing purposes (units).
pub const LANE_LATERAL_TOLERANCE: f64 = 8.0;

/// A ship less than this far down-lane from the spawn point is "still
/// near its spawn" and blocks more aggressively (units).
pub const NEAR_SPAWN_DEPTH: f64 = 25.0;

/// Spacing inflation applied against ships still near their spawn.
pub const NEAR_SPAWN_SPACING_FACTOR: f64 = 1.4;

/// Spacing against active ships = min distance × (base + 1/time multiplier).
pub const SPACING_BASE_FACTOR: f64 = 1.2;

/// Divisor turning elapsed seconds into the spacing time multiplier.
pub const SPACING_TIME_DIVISOR: f64 = 30.0;

// --- Lane cooldown ---

/// Lane cooldown = (min distance / speed) × this factor.
pub const LANE_COOLDOWN_FACTOR: f64 = 0.7;

/// Duration of the early-game cooldown inflation (seconds).
pub const EARLY_GAME_SECS: f64 = 45.0;

/// Cooldown multiplier during the early game.
pub const EARLY_GAME_COOLDOWN_FACTOR: f64 = 1.5;

/// Deferral window when no lane is eligible (seconds).
pub const SPAWN_DEFER_MIN_SECS: f64 = 0.05;
pub const SPAWN_DEFER_MAX_SECS: f64 = 0.15;

// --- Throughput ---

/// Desired spawns per opportunity by elapsed time: (threshold secs, base).
/// Evaluated highest threshold first; below 30 s the base is 1.
pub const THROUGHPUT_STEPS: [(f64, u32); 5] =
    [(240.0, 6), (180.0, 5), (120.0, 4), (60.0, 3), (30.0, 2)];

/// Live-target counts below which the base gets boosted, and by how much.
pub const LOW_TARGET_BOOST_2: u32 = 8;
pub const LOW_TARGET_BOOST_1: u32 = 12;

/// Hard ceiling on spawn attempts per opportunity.
pub const MAX_SPAWNS_PER_OPPORTUNITY: u32 = 8;

// --- Class selection ---

/// Probability a non-Red spawn is a pirate.
pub const PIRATE_PROBABILITY: f64 = 0.7;

/// Probability the Red-ship preemption fires once its gates are open.
pub const RED_SHIP_PROBABILITY: f64 = 0.7;

/// Minimum spawns between Red ships.
pub const SHIPS_PER_RED_SHIP: u32 = 20;

// --- Scripted timeline ---

/// Fixed ship speed in the scripted session (units/s).
pub const SCRIPTED_SHIP_SPEED: f64 = 37.0;

// --- Targeting ---

/// Default gaze dwell threshold (seconds).
pub const DEFAULT_DWELL_SECS: f64 = 2.0;

/// Firing-solution force = hit distance × this.
pub const FORCE_MULTIPLIER: f64 = 500.0;

/// Minimum force when firing at a UI button.
pub const MIN_BUTTON_FORCE: f64 = 200.0;

// --- Movement ---

/// A ship within this distance of its destination has arrived (units).
pub const ARRIVAL_EPSILON: f64 = 0.1;

/// Uniform hull scale applied to every ship prefab.
pub const SHIP_SCALE: f64 = 12.0;

/// Indicator affordance radius = hull scale × this.
pub const INDICATOR_RADIUS_FACTOR: f64 = 0.5;

// --- Stats ---

/// Grace shaved off the max-gap metric when the session ends mid-gap
/// (compensates for end-of-session timing noise).
pub const END_OF_SESSION_GRACE_SECS: f64 = 3.0;
