//! Adaptive spawn scheduler: decides when, where and what to spawn.
//!
//! Re-tunes itself from elapsed time, the live-target count and the
//! lives-lost count: a difficulty ramp escalates speed and spawn rate
//! for the first two minutes, lane choice balances cooldown fairness
//! against geometric spacing, and a rare Red ship preempts the class
//! roll once the player has lives to win back.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use broadside_core::components::{Ship, SpawnInstruction};
use broadside_core::config::{LaneLayout, SessionConfig};
use broadside_core::constants::*;
use broadside_core::enums::{ShipClass, ShipPhase, SizeClass};
use broadside_core::events::SessionEvent;
use broadside_core::types::Position;

use crate::spawn;

/// Scheduler state. One per session, owned by the engine.
#[derive(Debug, Clone)]
pub struct AdaptiveScheduler {
    /// Current spawn interval bounds (seconds); shrink with the ramp.
    spawn_interval_min: f64,
    spawn_interval_max: f64,
    /// Session time of the next spawn opportunity.
    next_spawn_time: f64,
    /// Ships spawned in the current cycle and the cycle cap.
    ships_this_cycle: u32,
    cycle_cap: u32,
    /// Last spawn time per lane; `None` = never used.
    lane_last_spawn: Vec<Option<f64>>,
    /// Current ramp speed assigned to new (and re-speeded) ships.
    ship_speed: f64,
    max_ship_speed: f64,
    difficulty_timer: f64,
    /// Spawns since the last Red ship.
    ships_since_red: u32,
    /// Current minimum longitudinal spacing.
    current_min_distance: f64,
    /// Time until another spawn may succeed, whatever the lane.
    global_cooldown: f64,
}

impl AdaptiveScheduler {
    pub fn new(config: &SessionConfig, rng: &mut ChaCha8Rng) -> Self {
        Self {
            spawn_interval_min: config.spawn_interval_min,
            spawn_interval_max: config.spawn_interval_max,
            next_spawn_time: rng.gen_range(config.spawn_interval_min..config.spawn_interval_max),
            ships_this_cycle: 0,
            cycle_cap: INITIAL_CYCLE_CAP,
            lane_last_spawn: vec![None; config.lanes.lane_count()],
            ship_speed: INITIAL_SHIP_SPEED,
            max_ship_speed: config.max_ship_speed,
            difficulty_timer: 0.0,
            ships_since_red: 0,
            current_min_distance: BASE_MIN_DISTANCE,
            global_cooldown: 0.0,
        }
    }

    /// Speed currently assigned to newly spawned ships.
    pub fn ship_speed(&self) -> f64 {
        self.ship_speed
    }

    #[cfg(test)]
    pub(crate) fn set_lane_last_spawn(&mut self, lane: usize, at: Option<f64>) {
        self.lane_last_spawn[lane] = at;
    }
}

/// Run the scheduler for one tick. May spawn zero or more ships.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    sched: &mut AdaptiveScheduler,
    lanes: &LaneLayout,
    now: f64,
    dt: f64,
    lives_lost: u32,
    next_ship_number: &mut u32,
    events: &mut Vec<SessionEvent>,
) {
    sched.difficulty_timer += dt;
    sched.global_cooldown -= dt;

    if sched.difficulty_timer >= DIFFICULTY_STEP_SECS {
        sched.difficulty_timer = 0.0;
        if now < RAMP_CUTOFF_SECS {
            ramp_difficulty(world, sched);
        }
    }

    let live_count = live_target_count(world);
    let attempts = spawns_per_opportunity(now, live_count);

    let mut successful = 0;
    for _ in 0..attempts {
        if sched.ships_this_cycle >= sched.cycle_cap {
            break;
        }
        if now >= sched.next_spawn_time && sched.global_cooldown <= 0.0 {
            if try_spawn(world, rng, sched, lanes, now, lives_lost, next_ship_number, events) {
                successful += 1;
                sched.ships_this_cycle += 1;
                sched.global_cooldown = MIN_GLOBAL_SPAWN_INTERVAL;
            } else {
                // Backpressure, not an error: push the next attempt out
                // slightly and let the lanes disperse.
                sched.next_spawn_time =
                    now + rng.gen_range(SPAWN_DEFER_MIN_SECS..SPAWN_DEFER_MAX_SECS);
            }
        }
    }

    if successful > 0 {
        let t = rng.gen::<f64>() * 0.2;
        sched.next_spawn_time =
            now + sched.spawn_interval_min + (sched.spawn_interval_max - sched.spawn_interval_min) * t;
    } else if now >= sched.next_spawn_time {
        sched.next_spawn_time = now + sched.spawn_interval_min * 0.5;
    }

    if sched.ships_this_cycle >= sched.cycle_cap {
        sched.ships_this_cycle = 0;
    }
}

/// One difficulty step: faster ships, bigger cycles, tighter intervals.
/// Live traveling ships are retroactively re-speeded to the new ramp.
fn ramp_difficulty(world: &mut World, sched: &mut AdaptiveScheduler) {
    let old_speed = sched.ship_speed;
    sched.ship_speed = (sched.ship_speed + SPEED_STEP).min(sched.max_ship_speed);
    sched.cycle_cap = (sched.cycle_cap + CYCLE_CAP_STEP).min(MAX_CYCLE_CAP);
    sched.spawn_interval_min =
        (sched.spawn_interval_min - SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MIN_FLOOR);
    sched.spawn_interval_max =
        (sched.spawn_interval_max - SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MAX_FLOOR);
    sched.current_min_distance =
        BASE_MIN_DISTANCE.max(sched.ship_speed * SPEED_DISTANCE_MULTIPLIER);

    if sched.ship_speed != old_speed {
        for (_entity, ship) in world.query_mut::<&mut Ship>() {
            if ship.phase == ShipPhase::Traveling {
                ship.speed = sched.ship_speed;
            }
        }
    }
}

/// Live targets = every ship entity still in the world that has not
/// been removed (sinking ships still occupy their lane).
fn live_target_count(world: &mut World) -> u32 {
    world
        .query_mut::<&Ship>()
        .into_iter()
        .filter(|(_, ship)| ship.phase != ShipPhase::Removed)
        .count() as u32
}

/// Desired spawn attempts this opportunity: a step function of elapsed
/// time, boosted when the gallery is running empty, hard-capped.
fn spawns_per_opportunity(now: f64, live_count: u32) -> u32 {
    let mut base = 1;
    for &(threshold, value) in THROUGHPUT_STEPS.iter() {
        if now > threshold {
            base = value;
            break;
        }
    }

    if live_count < LOW_TARGET_BOOST_2 {
        base += 2;
    } else if live_count < LOW_TARGET_BOOST_1 {
        base += 1;
    }

    base.min(MAX_SPAWNS_PER_OPPORTUNITY)
}

/// Attempt one spawn. Returns false when no lane is eligible or the
/// instruction was dropped; in both cases nothing is recorded.
#[allow(clippy::too_many_arguments)]
fn try_spawn(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    sched: &mut AdaptiveScheduler,
    lanes: &LaneLayout,
    now: f64,
    lives_lost: u32,
    next_ship_number: &mut u32,
    events: &mut Vec<SessionEvent>,
) -> bool {
    let Some(lane) = best_available_lane(world, sched, lanes, now) else {
        return false;
    };

    let (class, size) = choose_class(rng, sched, lives_lost);
    let instruction = SpawnInstruction {
        time_offset_secs: now,
        lane,
        class,
        size,
        speed: sched.ship_speed,
    };

    match spawn::spawn_ship(world, &instruction, lanes, *next_ship_number, now, events) {
        Ok(_) => {
            *next_ship_number += 1;
            sched.lane_last_spawn[lane] = Some(now);
            true
        }
        Err(err) => {
            // Dropped spawn counts as not issued: lane timestamp and
            // cycle counter stay untouched.
            log::warn!("adaptive spawn dropped: {err}");
            false
        }
    }
}

/// Among lanes that are spacing-clear and off cooldown, pick the one
/// idle the longest. Never-used lanes count as idle forever.
pub(crate) fn best_available_lane(
    world: &mut World,
    sched: &AdaptiveScheduler,
    lanes: &LaneLayout,
    now: f64,
) -> Option<usize> {
    let cooldown = lane_cooldown(sched, now);

    let mut best: Option<(usize, f64)> = None;
    for (lane, spawn_point) in lanes.spawn_points.iter().enumerate() {
        if !lane_is_clear(world, sched, spawn_point, now) {
            continue;
        }
        let idle = match sched.lane_last_spawn[lane] {
            Some(last) if now - last < cooldown => continue,
            Some(last) => now - last,
            None => f64::MAX,
        };
        if best.map_or(true, |(_, best_idle)| idle > best_idle) {
            best = Some((lane, idle));
        }
    }
    best.map(|(lane, _)| lane)
}

/// Lane cooldown scales with how long a ship takes to clear the
/// minimum spacing, inflated during the early game.
fn lane_cooldown(sched: &AdaptiveScheduler, now: f64) -> f64 {
    let early_game = if now < EARLY_GAME_SECS {
        EARLY_GAME_COOLDOWN_FACTOR
    } else {
        1.0
    };
    (sched.current_min_distance / sched.ship_speed) * LANE_COOLDOWN_FACTOR * early_game
}

/// Anti-clump rule: a candidate lane conflicts with any ship sharing
/// its lateral offset when the longitudinal gap is too small. Sinking
/// ships demand extra clearance; active ships demand spacing that
/// loosens as the session ages but inflates near the spawn point.
fn lane_is_clear(
    world: &mut World,
    sched: &AdaptiveScheduler,
    spawn_point: &Position,
    now: f64,
) -> bool {
    for (_entity, (ship, pos)) in world.query_mut::<(&Ship, &Position)>() {
        if ship.phase == ShipPhase::Removed {
            continue;
        }
        if pos.lateral_offset_to(spawn_point) >= LANE_LATERAL_TOLERANCE {
            continue;
        }

        let distance = pos.range_to(spawn_point);
        if ship.phase == ShipPhase::Sinking {
            if distance < sched.current_min_distance + SINKING_EXTRA_DISTANCE {
                return false;
            }
        } else {
            let time_multiplier = (now / SPACING_TIME_DIVISOR).max(1.0);
            let mut adjusted =
                sched.current_min_distance * (SPACING_BASE_FACTOR + 1.0 / time_multiplier);
            if pos.z > spawn_point.z - NEAR_SPAWN_DEPTH {
                adjusted *= NEAR_SPAWN_SPACING_FACTOR;
            }
            if distance < adjusted {
                return false;
            }
        }
    }
    true
}

/// Roll class and size. A Red ship preempts the roll once enough ships
/// have passed since the last one, lives have been lost, and the
/// preemption chance succeeds.
fn choose_class(
    rng: &mut ChaCha8Rng,
    sched: &mut AdaptiveScheduler,
    lives_lost: u32,
) -> (ShipClass, SizeClass) {
    let is_pirate = rng.gen::<f64>() < PIRATE_PROBABILITY;

    let spawn_red = lives_lost > 0
        && sched.ships_since_red >= SHIPS_PER_RED_SHIP
        && rng.gen::<f64>() < RED_SHIP_PROBABILITY;
    if spawn_red {
        sched.ships_since_red = 0;
        return (ShipClass::Red, SizeClass::Medium);
    }

    sched.ships_since_red += 1;
    let size = SizeClass::from_index(rng.gen_range(0..3usize));
    let class = if is_pirate {
        ShipClass::Pirate
    } else {
        ShipClass::Fishing
    };
    (class, size)
}
