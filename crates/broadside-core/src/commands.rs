//! Commands sent from the platform layer to the simulation.
//!
//! Everything the outside world does to a session (player input,
//! collaborator reports, session control) arrives as a queued command
//! processed at the next tick boundary. There are no callbacks into
//! the engine, which keeps input ordering deterministic.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// The per-tick "what am I pointing at" signal, resolved by the
/// platform's eye/controller raycast. `Unavailable` (tracking not
/// ready) and `Clear` (ray hits nothing) are treated identically by
/// the targeting machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PointingSample {
    #[default]
    Unavailable,
    Clear,
    /// The ray rests on a ship's hull.
    Ship { ship_number: u32, hit_point: Position },
    /// The ray rests on a UI affordance.
    Button { button_id: u32, hit_point: Position },
}

/// All inbound session commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    // --- Session control ---
    /// Start (or restart) the session with the engine's config.
    StartSession,
    /// End the session early.
    EndSession,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,

    // --- Player input ---
    /// Latest pointing sample. Decays to `Unavailable` each tick, so
    /// the provider re-sends it every tick it has one.
    PointAt { sample: PointingSample },
    /// Discrete trigger press from the controller.
    TriggerPressed,

    // --- Collaborator reports ---
    /// The fire-resolution collaborator resolved a cannonball hit.
    ReportHit { ship_number: u32 },
    /// The sink animation for a sinking ship finished.
    ReportSinkComplete { ship_number: u32 },
}
