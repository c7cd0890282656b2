//! ECS systems that operate on the session world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for
//! read-only). Scheduler and timeline state lives in plain structs
//! owned by the engine and passed in explicitly.

pub mod cleanup;
pub mod movement;
pub mod scheduler;
pub mod snapshot;
pub mod timeline;
