//! Cleanup system: despawns ships whose lifecycle has ended.
//!
//! A ship reaches `Removed` either by arriving at its destination
//! (movement) or by finishing its sink animation (`ReportSinkComplete`).
//! Uses a pre-allocated buffer to avoid per-tick allocation.

use hecs::{Entity, World};

use broadside_core::components::Ship;
use broadside_core::enums::ShipPhase;

/// Remove every ship in the `Removed` phase.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, ship) in world.query_mut::<&Ship>() {
        if ship.phase == ShipPhase::Removed {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
