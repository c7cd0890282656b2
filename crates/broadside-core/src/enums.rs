//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Ship class determines what sinking (or missing) one means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    /// Neutral fishing vessel. Sinking one costs a life.
    #[default]
    Fishing,
    /// Hostile target. Sink it before it escapes, or lose a life.
    Pirate,
    /// Rare supply ship. Sinking it restores one lost life.
    Red,
}

/// Visual size class. Selects the hull prefab on the rendering side;
/// the core only carries it through spawn instructions and events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    #[default]
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Size class from a 0..3 roll (scheduler and scripted table both
    /// index sizes this way).
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => SizeClass::Small,
            1 => SizeClass::Medium,
            _ => SizeClass::Large,
        }
    }
}

/// Ship lifecycle phase. Monotonic: Traveling → Sinking → Removed, or
/// Traveling → Removed on escape. A ship is never resurrected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipPhase {
    /// En route from spawn point to lane destination.
    #[default]
    Traveling,
    /// Struck by a cannonball; sink animation running externally.
    Sinking,
    /// Gone: reached its destination or finished sinking. Despawned
    /// by the cleanup system.
    Removed,
}

/// How fire events are produced from pointing input.
/// Session-scoped configuration, not machine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiringMode {
    /// Dwell-to-fire only.
    GazeOnly,
    /// Trigger press only; dwell never fires.
    ControllerOnly,
    /// Both paths active.
    #[default]
    Hybrid,
}

/// Spawn generation mode for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnMode {
    /// Difficulty-ramped random generation; session ends when all
    /// hearts are gone.
    #[default]
    Adaptive,
    /// Fixed deterministic timeline; session ends on the clock.
    Scripted,
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Menu,
    Active,
    Paused,
    Ended,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The session clock ran out (Scripted mode).
    TimeExpired,
    /// Every heart slot was consumed (Adaptive mode).
    LivesExhausted,
    /// Ended externally via `EndSession`.
    Aborted,
}
