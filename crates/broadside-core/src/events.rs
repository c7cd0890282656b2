//! Events emitted by the simulation for the rendering, physics, audio
//! and UI collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Outbound events, collected per tick and shipped in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A ship entered the gallery. The rendering collaborator
    /// instantiates the hull and its gaze indicator from this.
    ShipSpawned {
        ship_number: u32,
        lane: usize,
        class: ShipClass,
        size: SizeClass,
        position: Position,
        speed: f64,
        /// Radius of the attached indicator affordance.
        indicator_radius: f64,
    },
    /// The gaze lock moved onto or off a ship.
    ShipHighlighted { ship_number: u32, active: bool },
    /// A firing solution was produced. The physics collaborator owns
    /// the projectile from here.
    CannonFired {
        origin: Position,
        direction: Position,
        force: f64,
        /// Target reference, when the shot was aimed at a ship.
        target_ship: Option<u32>,
    },
    /// A UI affordance was activated by trigger press.
    ButtonActivated { button_id: u32 },
    /// A ship was struck and began sinking.
    ShipSunk { ship_number: u32, class: ShipClass },
    /// A pirate reached its destination un-sunk.
    PirateEscaped { ship_number: u32 },
    /// A heart slot was consumed.
    LifeLost { lives_remaining: usize },
    /// A heart slot was restored by a Red ship.
    LifeRestored { lives_remaining: usize },
    /// The session ended.
    SessionEnded { reason: EndReason },
}
