//! Kinematic integration system.
//!
//! Steps each traveling ship toward its lane destination at its
//! current speed. The step is clamped to the remaining distance so
//! arrival is exact; a pirate arriving un-sunk registers an escape.

use hecs::World;

use broadside_core::components::Ship;
use broadside_core::constants::{ARRIVAL_EPSILON, DT};
use broadside_core::enums::{ShipClass, ShipPhase};
use broadside_core::events::SessionEvent;
use broadside_core::types::Position;
use broadside_stats::StatsTracker;

/// Advance every traveling ship one tick. Sinking ships hold position;
/// their descent is the animation collaborator's business.
pub fn run(world: &mut World, stats: &mut StatsTracker, events: &mut Vec<SessionEvent>) {
    for (_entity, (ship, pos)) in world.query_mut::<(&mut Ship, &mut Position)>() {
        if ship.phase != ShipPhase::Traveling {
            continue;
        }

        let remaining = pos.range_to(&ship.destination);
        let step = ship.speed * DT;

        if remaining > ARRIVAL_EPSILON && remaining > step {
            let scale = step / remaining;
            pos.x += (ship.destination.x - pos.x) * scale;
            pos.y += (ship.destination.y - pos.y) * scale;
            pos.z += (ship.destination.z - pos.z) * scale;
        } else {
            *pos = ship.destination;
            if ship.class == ShipClass::Pirate {
                stats.register_escape();
                events.push(SessionEvent::PirateEscaped {
                    ship_number: ship.ship_number,
                });
            }
            ship.phase = ShipPhase::Removed;
        }
    }
}
