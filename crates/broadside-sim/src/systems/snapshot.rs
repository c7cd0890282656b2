//! Snapshot system: queries the ECS world and builds a complete SessionSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use broadside_core::components::Ship;
use broadside_core::enums::{FiringMode, SessionPhase, SpawnMode};
use broadside_core::events::SessionEvent;
use broadside_core::state::{SessionSnapshot, ShipView};
use broadside_core::types::{Position, SessionTime};
use broadside_stats::StatsTracker;

/// Build a complete SessionSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SessionTime,
    phase: SessionPhase,
    mode: SpawnMode,
    firing_mode: FiringMode,
    hearts: &[bool],
    stats: &StatsTracker,
    events: Vec<SessionEvent>,
    highlighted_ship: Option<u32>,
) -> SessionSnapshot {
    SessionSnapshot {
        time: *time,
        phase,
        mode,
        firing_mode,
        ships: build_ships(world, highlighted_ship),
        hearts: hearts.to_vec(),
        stats: stats.view(time.elapsed_secs),
        events,
    }
}

/// Build the ShipView list, sorted by sequence number so snapshot
/// serialization is deterministic.
fn build_ships(world: &World, highlighted_ship: Option<u32>) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<(&Ship, &Position)>()
        .iter()
        .map(|(_, (ship, pos))| ShipView {
            ship_number: ship.ship_number,
            lane: ship.lane,
            class: ship.class,
            size: ship.size,
            position: *pos,
            speed: ship.speed,
            phase: ship.phase,
            highlighted: highlighted_ship == Some(ship.ship_number),
        })
        .collect();

    ships.sort_by_key(|s| s.ship_number);
    ships
}
