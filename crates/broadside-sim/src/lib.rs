//! Session engine for BROADSIDE.
//!
//! Owns the hecs ECS world, runs the spawn/targeting/movement systems
//! at a fixed tick rate, and produces SessionSnapshots for the
//! presentation layer. Completely headless, with no platform dependency,
//! enabling deterministic testing.

pub mod engine;
pub mod hearts;
pub mod spawn;
pub mod systems;

pub use broadside_core as core;
pub use engine::SessionEngine;

#[cfg(test)]
mod tests;
