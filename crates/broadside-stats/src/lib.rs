//! Session statistics aggregation for BROADSIDE.
//!
//! Accumulates elimination/escape events into running metrics and
//! derives the end-of-session numbers (streaks, sink-time extremes,
//! longest fishing gap). No ECS dependency: operates on plain data,
//! with the session clock always passed in.

pub mod tracker;

pub use tracker::StatsTracker;
