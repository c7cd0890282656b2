//! Session snapshot: the complete visible state sent to the
//! presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SessionEvent;
use crate::types::{Position, SessionTime};

/// Complete session state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SessionTime,
    pub phase: SessionPhase,
    pub mode: SpawnMode,
    pub firing_mode: FiringMode,
    pub ships: Vec<ShipView>,
    /// Heart slots, left to right. `false` = consumed.
    pub hearts: Vec<bool>,
    pub stats: StatsView,
    pub events: Vec<SessionEvent>,
}

/// A visible ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub ship_number: u32,
    pub lane: usize,
    pub class: ShipClass,
    pub size: SizeClass,
    pub position: Position,
    pub speed: f64,
    pub phase: ShipPhase,
    /// Whether the gaze indicator is lit on this ship.
    pub highlighted: bool,
}

/// Derived session metrics. Every value here is computed from the
/// aggregator's sample sets at snapshot time; nothing in this view is
/// mutated independently of its sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsView {
    pub pirates_sunk: u32,
    pub fishing_sunk: u32,
    pub pirates_escaped: u32,
    pub current_pirate_streak: u32,
    pub best_pirate_streak: u32,
    /// Fastest pirate sink (seconds); 0 when no pirate has been sunk.
    pub shortest_sink_secs: f64,
    /// Mean pirate sink time (seconds); 0 when no pirate has been sunk.
    pub average_sink_secs: f64,
    /// Longest stretch without sinking a fishing vessel (seconds),
    /// including the in-progress stretch.
    pub max_secs_without_fishing: f64,
    pub lives_lost: u32,
}
