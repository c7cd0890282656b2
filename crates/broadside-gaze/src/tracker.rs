//! The targeting state machine.
//!
//! Consumes one pointing sample per tick plus any trigger presses and
//! produces discrete fire / UI-action events. No ECS dependency:
//! ships are referred to by their session-unique sequence numbers, and
//! the caller is responsible for downgrading samples that point at
//! sinking or removed ships to `Clear` before they arrive here.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use broadside_core::commands::PointingSample;
use broadside_core::config::SessionConfig;
use broadside_core::constants::MIN_BUTTON_FORCE;
use broadside_core::enums::FiringMode;

/// Session-scoped targeting parameters.
#[derive(Debug, Clone, Copy)]
pub struct GazeConfig {
    /// Dwell threshold for gaze firing (seconds).
    pub dwell_secs: f64,
    /// Cannon muzzle position, the origin of every firing solution.
    pub cannon_position: DVec3,
    /// Force = hit distance × this.
    pub force_multiplier: f64,
}

impl GazeConfig {
    pub fn from_session(config: &SessionConfig) -> Self {
        Self {
            dwell_secs: config.dwell_secs,
            cannon_position: config.cannon_position.into(),
            force_multiplier: config.force_multiplier,
        }
    }
}

/// What the machine is currently locked on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LockState {
    #[default]
    Idle,
    /// Locked on a ship, accumulating dwell.
    OnShip { ship_number: u32, dwell_secs: f64 },
    /// Locked on a UI affordance. No dwell path; buttons fire on
    /// trigger press only.
    OnButton { button_id: u32 },
}

/// A computed firing solution, handed off to the projectile physics
/// collaborator. The machine's responsibility ends here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringSolution {
    pub origin: DVec3,
    /// Unit vector from the cannon to the surface hit point.
    pub direction: DVec3,
    pub force: f64,
}

/// Discrete output of the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetingEvent {
    /// Fire at a locked ship (dwell completion or trigger press).
    FireAtShip {
        ship_number: u32,
        solution: FiringSolution,
    },
    /// Activate a locked UI affordance (trigger press).
    ActivateButton {
        button_id: u32,
        solution: FiringSolution,
    },
}

/// The gaze/aim targeting state machine. One per session.
#[derive(Debug, Clone, Default)]
pub struct GazeTracker {
    state: LockState,
    /// Surface hit point under the ray, updated every locked tick.
    hit_point: DVec3,
}

impl GazeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// The ship currently locked, if any.
    pub fn locked_ship(&self) -> Option<u32> {
        match self.state {
            LockState::OnShip { ship_number, .. } => Some(ship_number),
            _ => None,
        }
    }

    /// The button currently locked, if any.
    pub fn locked_button(&self) -> Option<u32> {
        match self.state {
            LockState::OnButton { button_id } => Some(button_id),
            _ => None,
        }
    }

    /// Drop any lock and discard dwell progress.
    pub fn reset(&mut self) {
        self.state = LockState::Idle;
    }

    /// Advance one tick with the latest pointing sample.
    ///
    /// `Unavailable` behaves exactly like `Clear`: the lock resets and
    /// no event fires. Moving to a different object resets before the
    /// new lock takes effect, so dwell never carries over.
    pub fn observe(
        &mut self,
        sample: PointingSample,
        mode: FiringMode,
        config: &GazeConfig,
        dt: f64,
    ) -> Option<TargetingEvent> {
        match sample {
            PointingSample::Unavailable | PointingSample::Clear => {
                self.reset();
                None
            }
            PointingSample::Button {
                button_id,
                hit_point,
            } => {
                self.hit_point = hit_point.into();
                if self.locked_button() != Some(button_id) {
                    self.state = LockState::OnButton { button_id };
                }
                None
            }
            PointingSample::Ship {
                ship_number,
                hit_point,
            } => {
                self.hit_point = hit_point.into();
                match self.state {
                    LockState::OnShip {
                        ship_number: locked,
                        dwell_secs,
                    } if locked == ship_number => {
                        // Dwell only accumulates when gaze firing is active.
                        if matches!(mode, FiringMode::GazeOnly | FiringMode::Hybrid) {
                            let dwell = dwell_secs + dt;
                            if dwell >= config.dwell_secs {
                                self.reset();
                                return Some(TargetingEvent::FireAtShip {
                                    ship_number,
                                    solution: self.solution(config, 0.0),
                                });
                            }
                            self.state = LockState::OnShip {
                                ship_number,
                                dwell_secs: dwell,
                            };
                        }
                        None
                    }
                    _ => {
                        self.state = LockState::OnShip {
                            ship_number,
                            dwell_secs: 0.0,
                        };
                        None
                    }
                }
            }
        }
    }

    /// Handle a discrete trigger press from the input queue.
    ///
    /// Ships fire under ControllerOnly/Hybrid; buttons fire in every
    /// mode, with the minimum button force applied.
    pub fn trigger_pressed(
        &mut self,
        mode: FiringMode,
        config: &GazeConfig,
    ) -> Option<TargetingEvent> {
        match self.state {
            LockState::OnShip { ship_number, .. }
                if matches!(mode, FiringMode::ControllerOnly | FiringMode::Hybrid) =>
            {
                let event = TargetingEvent::FireAtShip {
                    ship_number,
                    solution: self.solution(config, 0.0),
                };
                self.reset();
                Some(event)
            }
            LockState::OnButton { button_id } => {
                let event = TargetingEvent::ActivateButton {
                    button_id,
                    solution: self.solution(config, MIN_BUTTON_FORCE),
                };
                self.reset();
                Some(event)
            }
            _ => None,
        }
    }

    /// Compute the firing solution from the cannon to the last hit point.
    fn solution(&self, config: &GazeConfig, min_force: f64) -> FiringSolution {
        let delta = self.hit_point - config.cannon_position;
        let distance = delta.length();
        let direction = if distance > f64::EPSILON {
            delta / distance
        } else {
            DVec3::Z
        };
        FiringSolution {
            origin: config.cannon_position,
            direction,
            force: (distance * config.force_multiplier).max(min_force),
        }
    }
}
