//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// A ship crossing the gallery. `Position` (from `types`) is attached
/// alongside as its own component for the movement system to drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Unique sequence number, never reused within a session. This is
    /// the handle external collaborators and the gaze tracker refer to.
    pub ship_number: u32,
    /// Lane index into the session's lane layout.
    pub lane: usize,
    pub class: ShipClass,
    pub size: SizeClass,
    /// Current speed (units/s). Re-tuned by the difficulty ramp while
    /// the ship is still traveling.
    pub speed: f64,
    /// Session time at which the ship spawned (seconds).
    pub spawned_at_secs: f64,
    /// Lane end point the ship is heading for.
    pub destination: Position,
    pub phase: ShipPhase,
}

/// One spawn decision. Synthesized live by the adaptive scheduler or
/// read from the scripted table; immutable once issued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnInstruction {
    /// Session time offset at which the spawn is due (seconds).
    pub time_offset_secs: f64,
    pub lane: usize,
    pub class: ShipClass,
    pub size: SizeClass,
    /// Speed assigned at spawn (units/s).
    pub speed: f64,
}
