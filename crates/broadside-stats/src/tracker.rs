//! The session stats aggregator.
//!
//! Owns every session metric. Counters accumulate through the
//! register/restore operations; derived values (average, minimum,
//! max gap) are computed from the sample sets on read, never stored
//! and mutated separately.

use serde::{Deserialize, Serialize};

use broadside_core::constants::END_OF_SESSION_GRACE_SECS;
use broadside_core::enums::ShipClass;
use broadside_core::state::StatsView;

/// Accumulated session statistics. One per session, injected into the
/// engine; there is no global instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsTracker {
    pirates_sunk: u32,
    fishing_sunk: u32,
    pirates_escaped: u32,
    /// Lives lost to pirate escapes (restorable by Red ships).
    lives_lost_to_escapes: u32,
    /// Lives lost to fishing eliminations (restorable after escapes).
    fishing_costing_lives: u32,
    current_pirate_streak: u32,
    best_pirate_streak: u32,
    /// Session time of the last fishing elimination, if any.
    last_fishing_secs: Option<f64>,
    /// Longest completed gap between fishing eliminations (seconds).
    max_fishing_gap_secs: f64,
    /// Sink duration of every sunk pirate (seconds).
    pirate_sink_secs: Vec<f64>,
    /// Running minimum over `pirate_sink_secs`.
    shortest_sink_secs: f64,
    session_over: bool,
    /// Session time at which counting (re)started.
    start_secs: f64,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            pirates_sunk: 0,
            fishing_sunk: 0,
            pirates_escaped: 0,
            lives_lost_to_escapes: 0,
            fishing_costing_lives: 0,
            current_pirate_streak: 0,
            best_pirate_streak: 0,
            last_fishing_secs: None,
            max_fishing_gap_secs: 0.0,
            pirate_sink_secs: Vec::new(),
            shortest_sink_secs: f64::MAX,
            session_over: false,
            start_secs: 0.0,
        }
    }

    /// Reinitialize all state at session start.
    pub fn reset_all(&mut self, now: f64) {
        *self = Self::new();
        self.start_secs = now;
    }

    /// Record a ship elimination. Returns `true` when the elimination
    /// restored a life (Red ships only).
    pub fn register_elimination(&mut self, class: ShipClass, spawned_at: f64, now: f64) -> bool {
        match class {
            ShipClass::Pirate => {
                self.pirates_sunk += 1;
                self.current_pirate_streak += 1;
                self.best_pirate_streak = self.best_pirate_streak.max(self.current_pirate_streak);

                let sink_secs = now - spawned_at;
                self.pirate_sink_secs.push(sink_secs);
                if sink_secs < self.shortest_sink_secs {
                    self.shortest_sink_secs = sink_secs;
                }
                false
            }
            ShipClass::Fishing => {
                self.fishing_sunk += 1;
                self.fishing_costing_lives += 1;

                let gap = match self.last_fishing_secs {
                    Some(last) => now - last,
                    None => now - self.start_secs,
                };
                self.max_fishing_gap_secs = self.max_fishing_gap_secs.max(gap);
                self.last_fishing_secs = Some(now);

                self.current_pirate_streak = 0;
                false
            }
            // Red ships never touch the kill counters or the streak.
            ShipClass::Red => self.restore_life(),
        }
    }

    /// A pirate reached its destination un-sunk.
    pub fn register_escape(&mut self) {
        self.pirates_escaped += 1;
        self.lives_lost_to_escapes += 1;
        self.current_pirate_streak = 0;
    }

    /// Undo one life loss, preferring escape-caused losses over
    /// fishing-caused ones. Returns `false` when no loss remains.
    pub fn restore_life(&mut self) -> bool {
        if self.lives_lost_to_escapes > 0 {
            self.lives_lost_to_escapes -= 1;
            true
        } else if self.fishing_costing_lives > 0 {
            self.fishing_costing_lives -= 1;
            true
        } else {
            false
        }
    }

    /// Flag the session as over; affects only the end-of-session grace
    /// in `max_secs_without_fishing`.
    pub fn mark_session_over(&mut self) {
        self.session_over = true;
    }

    /// Total lives lost, the single source of truth for the heart
    /// display: escape-caused plus fishing-caused losses.
    pub fn total_lives_lost(&self) -> u32 {
        self.fishing_costing_lives + self.lives_lost_to_escapes
    }

    pub fn pirates_sunk(&self) -> u32 {
        self.pirates_sunk
    }

    pub fn fishing_sunk(&self) -> u32 {
        self.fishing_sunk
    }

    pub fn pirates_escaped(&self) -> u32 {
        self.pirates_escaped
    }

    pub fn current_pirate_streak(&self) -> u32 {
        self.current_pirate_streak
    }

    pub fn best_pirate_streak(&self) -> u32 {
        self.best_pirate_streak
    }

    pub fn lives_lost_to_escapes(&self) -> u32 {
        self.lives_lost_to_escapes
    }

    /// Fastest pirate sink in seconds; 0 when no samples exist.
    pub fn shortest_sink_secs(&self) -> f64 {
        if self.pirate_sink_secs.is_empty() {
            0.0
        } else {
            self.shortest_sink_secs
        }
    }

    /// Mean pirate sink time in seconds; 0 when no samples exist.
    pub fn average_sink_secs(&self) -> f64 {
        if self.pirate_sink_secs.is_empty() {
            return 0.0;
        }
        let total: f64 = self.pirate_sink_secs.iter().sum();
        total / self.pirate_sink_secs.len() as f64
    }

    /// Longest stretch without a fishing elimination, folding in the
    /// in-progress stretch since the last one (or session start).
    ///
    /// Once the session has ended, a fixed grace is shaved off, but
    /// only when the in-progress stretch is itself the maximum, to
    /// compensate for end-of-session timing noise. Floored at 0.
    pub fn max_secs_without_fishing(&self, now: f64) -> f64 {
        let since_last = match self.last_fishing_secs {
            Some(last) if self.fishing_sunk > 0 => now - last,
            _ => now - self.start_secs,
        };
        let mut raw_max = self.max_fishing_gap_secs.max(since_last);

        let last_interval_is_max = since_last > self.max_fishing_gap_secs;
        if self.session_over && last_interval_is_max {
            raw_max -= END_OF_SESSION_GRACE_SECS;
        }
        raw_max.max(0.0)
    }

    /// Build the derived-metrics view for the snapshot.
    pub fn view(&self, now: f64) -> StatsView {
        StatsView {
            pirates_sunk: self.pirates_sunk,
            fishing_sunk: self.fishing_sunk,
            pirates_escaped: self.pirates_escaped,
            current_pirate_streak: self.current_pirate_streak,
            best_pirate_streak: self.best_pirate_streak,
            shortest_sink_secs: self.shortest_sink_secs(),
            average_sink_secs: self.average_sink_secs(),
            max_secs_without_fishing: self.max_secs_without_fishing(now),
            lives_lost: self.total_lives_lost(),
        }
    }
}
