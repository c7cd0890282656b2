//! Session configuration.
//!
//! Supplied once at session start and immutable thereafter. Invalid
//! configuration is rejected before the first tick; the engine never
//! starts with an empty lane table or degenerate timer bounds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{FiringMode, SpawnMode};
use crate::types::Position;

/// Spawn/destination channel geometry. Lane `i` runs from
/// `spawn_points[i]` to `end_points[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneLayout {
    pub spawn_points: Vec<Position>,
    pub end_points: Vec<Position>,
}

impl LaneLayout {
    pub fn lane_count(&self) -> usize {
        self.spawn_points.len()
    }

    /// The standard four-lane gallery: lanes 20 units apart laterally,
    /// running 300 units toward the player.
    pub fn default_four_lane() -> Self {
        let xs = [-30.0, -10.0, 10.0, 30.0];
        Self {
            spawn_points: xs.iter().map(|&x| Position::new(x, 0.0, 300.0)).collect(),
            end_points: xs.iter().map(|&x| Position::new(x, 0.0, 0.0)).collect(),
        }
    }
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    pub mode: SpawnMode,
    pub firing_mode: FiringMode,
    /// Gaze dwell threshold (seconds).
    pub dwell_secs: f64,
    /// Initial spawn interval bounds (seconds). The difficulty ramp
    /// shrinks these toward their floors.
    pub spawn_interval_min: f64,
    pub spawn_interval_max: f64,
    /// Ship speed ceiling for the difficulty ramp (units/s).
    pub max_ship_speed: f64,
    /// Number of heart (life) slots.
    pub heart_count: usize,
    /// Scripted-session duration (seconds).
    pub session_duration_secs: f64,
    pub lanes: LaneLayout,
    /// Cannon muzzle position, the origin of every firing solution.
    pub cannon_position: Position,
    /// Firing-solution force = hit distance × this.
    pub force_multiplier: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mode: SpawnMode::default(),
            firing_mode: FiringMode::default(),
            dwell_secs: DEFAULT_DWELL_SECS,
            spawn_interval_min: INITIAL_SPAWN_INTERVAL_MIN,
            spawn_interval_max: INITIAL_SPAWN_INTERVAL_MAX,
            max_ship_speed: MAX_SHIP_SPEED,
            heart_count: HEART_COUNT,
            session_duration_secs: SESSION_DURATION_SECS,
            lanes: LaneLayout::default_four_lane(),
            cannon_position: Position::new(0.0, 2.0, -10.0),
            force_multiplier: FORCE_MULTIPLIER,
        }
    }
}

/// Fatal configuration errors, rejected at session construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("lane layout is empty")]
    NoLanes,
    #[error("lane layout has {spawns} spawn points but {ends} end points")]
    LanePointMismatch { spawns: usize, ends: usize },
    #[error("spawn interval bounds {min}..{max} are not a positive, ordered range")]
    InvalidSpawnInterval { min: f64, max: f64 },
    #[error("dwell threshold {0} must be positive")]
    InvalidDwell(f64),
    #[error("session needs at least one heart slot")]
    NoHearts,
    #[error("scripted timeline uses lane {lane} but the layout has {lane_count} lanes")]
    TimelineLaneOutOfRange { lane: usize, lane_count: usize },
}

impl SessionConfig {
    /// Validate the configuration. Called by the engine before the
    /// first tick; a `ConfigError` aborts the session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes.spawn_points.is_empty() {
            return Err(ConfigError::NoLanes);
        }
        if self.lanes.spawn_points.len() != self.lanes.end_points.len() {
            return Err(ConfigError::LanePointMismatch {
                spawns: self.lanes.spawn_points.len(),
                ends: self.lanes.end_points.len(),
            });
        }
        if self.spawn_interval_min <= 0.0 || self.spawn_interval_max < self.spawn_interval_min {
            return Err(ConfigError::InvalidSpawnInterval {
                min: self.spawn_interval_min,
                max: self.spawn_interval_max,
            });
        }
        if self.dwell_secs <= 0.0 {
            return Err(ConfigError::InvalidDwell(self.dwell_secs));
        }
        if self.heart_count == 0 {
            return Err(ConfigError::NoHearts);
        }
        Ok(())
    }
}
