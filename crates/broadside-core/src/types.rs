//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D position in simulation space (scene units, Cartesian).
/// x = lateral (lane axis), y = up, z = travel axis (ships move toward -z).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Session time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SessionTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed session time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance to another position (3D).
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Absolute offset along the lane (lateral) axis.
    pub fn lateral_offset_to(&self, other: &Position) -> f64 {
        (other.x - self.x).abs()
    }
}

impl From<Position> for glam::DVec3 {
    fn from(p: Position) -> Self {
        glam::DVec3::new(p.x, p.y, p.z)
    }
}

impl From<glam::DVec3> for Position {
    fn from(v: glam::DVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl SessionTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
