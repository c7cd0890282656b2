//! Gaze/aim targeting for BROADSIDE.
//!
//! Implements the targeting state machine that turns continuous
//! pointing samples and discrete trigger presses into fire events
//! with dwell-time semantics.

pub mod tracker;

pub use broadside_core as core;
pub use tracker::{FiringSolution, GazeConfig, GazeTracker, LockState, TargetingEvent};
