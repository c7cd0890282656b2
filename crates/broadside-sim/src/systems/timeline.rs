//! Scripted spawn timeline: deterministic playback of a fixed table.
//!
//! The timeline is computed once at session start and never reshuffled:
//! given the same table and the same tick deltas, the issued sequence
//! is bit-identical across runs.

use hecs::World;

use broadside_core::components::SpawnInstruction;
use broadside_core::config::LaneLayout;
use broadside_core::constants::SCRIPTED_SHIP_SPEED;
use broadside_core::enums::{ShipClass, SizeClass};
use broadside_core::events::SessionEvent;

use crate::spawn;

/// Scripted-session table: (deciseconds, lane, pirate flag, size index).
/// Three lanes, alternating classes and hull sizes, ~2.4 s spacing.
#[rustfmt::skip]
const STANDARD_TABLE: [(u16, u8, u8, u8); 76] = [
    (0, 0, 1, 0),    (25, 1, 1, 1),   (48, 2, 0, 2),   (72, 0, 1, 1),
    (96, 1, 0, 0),   (121, 2, 1, 2),  (144, 0, 0, 1),  (169, 1, 1, 0),
    (193, 2, 1, 2),  (217, 0, 1, 1),  (240, 1, 0, 0),  (265, 2, 1, 2),
    (288, 0, 1, 1),  (312, 1, 1, 0),  (336, 2, 0, 2),  (360, 0, 0, 1),
    (384, 1, 1, 0),  (409, 2, 1, 2),  (432, 0, 1, 1),  (456, 1, 0, 0),
    (481, 2, 1, 2),  (505, 0, 1, 1),  (528, 1, 0, 0),  (553, 2, 1, 2),
    (576, 0, 1, 1),  (600, 1, 1, 0),  (624, 2, 0, 2),  (649, 0, 0, 1),
    (672, 1, 1, 0),  (696, 2, 1, 2),  (721, 0, 1, 1),  (744, 1, 0, 0),
    (768, 2, 1, 2),  (793, 0, 1, 1),  (816, 1, 1, 0),  (840, 2, 0, 2),
    (864, 0, 0, 1),  (889, 1, 1, 0),  (912, 2, 1, 2),  (936, 0, 1, 1),
    (961, 1, 0, 0),  (985, 2, 1, 2),  (1008, 0, 1, 1), (1032, 1, 1, 0),
    (1056, 2, 0, 2), (1080, 0, 0, 1), (1104, 1, 1, 0), (1129, 2, 1, 2),
    (1152, 0, 1, 1), (1176, 1, 0, 0), (1200, 2, 1, 2), (1224, 0, 1, 1),
    (1248, 1, 1, 0), (1273, 2, 0, 2), (1296, 0, 0, 1), (1320, 1, 1, 0),
    (1344, 2, 1, 2), (1369, 0, 1, 1), (1392, 1, 0, 0), (1416, 2, 1, 2),
    (1440, 0, 1, 1), (1464, 1, 1, 0), (1488, 2, 0, 2), (1513, 0, 0, 1),
    (1536, 1, 1, 0), (1560, 2, 1, 2), (1584, 0, 1, 1), (1609, 1, 0, 0),
    (1632, 2, 1, 2), (1656, 0, 1, 1), (1680, 1, 1, 0), (1704, 2, 0, 2),
    (1728, 0, 0, 1), (1753, 1, 1, 0), (1776, 2, 1, 2), (1800, 0, 1, 1),
];

/// A pre-computed, time-ordered spawn schedule.
#[derive(Debug, Clone, Default)]
pub struct SpawnTimeline {
    instructions: Vec<SpawnInstruction>,
    /// Index of the first unissued instruction.
    next_index: usize,
}

impl SpawnTimeline {
    /// An empty timeline (used in Adaptive mode).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard scripted session.
    pub fn standard_session() -> Self {
        let instructions = STANDARD_TABLE
            .iter()
            .map(|&(decisecs, lane, pirate, size)| SpawnInstruction {
                time_offset_secs: decisecs as f64 / 10.0,
                lane: lane as usize,
                class: if pirate == 1 {
                    ShipClass::Pirate
                } else {
                    ShipClass::Fishing
                },
                size: SizeClass::from_index(size as usize),
                speed: SCRIPTED_SHIP_SPEED,
            })
            .collect();
        Self::from_instructions(instructions)
    }

    /// Build a timeline from arbitrary instructions, enforcing the
    /// monotonic time ordering the playback relies on.
    pub fn from_instructions(mut instructions: Vec<SpawnInstruction>) -> Self {
        instructions.sort_by(|a, b| a.time_offset_secs.total_cmp(&b.time_offset_secs));
        Self {
            instructions,
            next_index: 0,
        }
    }

    /// Number of unissued instructions.
    pub fn remaining(&self) -> usize {
        self.instructions.len() - self.next_index
    }

    /// Highest lane index referenced anywhere in the timeline.
    pub fn max_lane(&self) -> Option<usize> {
        self.instructions.iter().map(|i| i.lane).max()
    }

    /// Discard every unissued instruction. Called on session end;
    /// there are no catch-up bursts.
    pub fn cancel(&mut self) {
        self.instructions.truncate(self.next_index);
    }
}

/// Issue every due, unissued instruction in table order.
pub fn run(
    world: &mut World,
    timeline: &mut SpawnTimeline,
    lanes: &LaneLayout,
    now: f64,
    next_ship_number: &mut u32,
    events: &mut Vec<SessionEvent>,
) {
    while timeline.next_index < timeline.instructions.len() {
        let instruction = timeline.instructions[timeline.next_index];
        if now < instruction.time_offset_secs {
            break;
        }
        timeline.next_index += 1;

        match spawn::spawn_ship(world, &instruction, lanes, *next_ship_number, now, events) {
            Ok(_) => *next_ship_number += 1,
            Err(err) => log::warn!("scripted spawn dropped: {err}"),
        }
    }
}
