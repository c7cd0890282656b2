//! Ship entity factory.
//!
//! Both spawn drivers (adaptive scheduler and scripted timeline) go
//! through `spawn_ship`. A failed spawn registers nothing (no entity,
//! no spawn event), so the caller's schedule/cooldown bookkeeping
//! treats it as not issued.

use hecs::World;
use thiserror::Error;

use broadside_core::components::{Ship, SpawnInstruction};
use broadside_core::config::LaneLayout;
use broadside_core::constants::{INDICATOR_RADIUS_FACTOR, SHIP_SCALE};
use broadside_core::enums::ShipPhase;
use broadside_core::events::SessionEvent;

/// Per-spawn failures. Expected deferral (lane contention) never gets
/// here; this is for genuinely malformed instructions.
#[derive(Debug, Error, PartialEq)]
pub enum SpawnError {
    #[error("spawn instruction names lane {lane} but the layout has {lane_count} lanes")]
    UnknownLane { lane: usize, lane_count: usize },
}

/// Instantiate a ship entity from a spawn instruction and announce it
/// to the rendering collaborator via `ShipSpawned`.
pub fn spawn_ship(
    world: &mut World,
    instruction: &SpawnInstruction,
    lanes: &LaneLayout,
    ship_number: u32,
    now: f64,
    events: &mut Vec<SessionEvent>,
) -> Result<hecs::Entity, SpawnError> {
    let (Some(spawn_point), Some(end_point)) = (
        lanes.spawn_points.get(instruction.lane),
        lanes.end_points.get(instruction.lane),
    ) else {
        return Err(SpawnError::UnknownLane {
            lane: instruction.lane,
            lane_count: lanes.lane_count(),
        });
    };

    let ship = Ship {
        ship_number,
        lane: instruction.lane,
        class: instruction.class,
        size: instruction.size,
        speed: instruction.speed,
        spawned_at_secs: now,
        destination: *end_point,
        phase: ShipPhase::Traveling,
    };

    let entity = world.spawn((ship, *spawn_point));

    events.push(SessionEvent::ShipSpawned {
        ship_number,
        lane: instruction.lane,
        class: instruction.class,
        size: instruction.size,
        position: *spawn_point,
        speed: instruction.speed,
        indicator_radius: SHIP_SCALE * INDICATOR_RADIUS_FACTOR,
    });

    Ok(entity)
}
