//! Heart (life) slot model.
//!
//! Slots are consumed left-to-right as lives are lost and restored
//! right-to-left as lives are regained. Slot state is always driven
//! from the aggregator's lives-lost counter through a monotonic
//! acknowledged-loss counter, never by inspecting the slots against
//! the counter in the other direction.

use serde::{Deserialize, Serialize};

use broadside_core::events::SessionEvent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hearts {
    /// Slot states, left to right. `false` = consumed.
    slots: Vec<bool>,
    /// Losses already reflected in the slots.
    acknowledged_losses: u32,
}

impl Hearts {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![true; count],
            acknowledged_losses: 0,
        }
    }

    /// Consume newly reported losses left-to-right, one slot per loss.
    pub fn sync(&mut self, total_lost: u32, events: &mut Vec<SessionEvent>) {
        while self.acknowledged_losses < total_lost {
            self.acknowledged_losses += 1;
            if let Some(slot) = self.slots.iter_mut().find(|s| **s) {
                *slot = false;
                events.push(SessionEvent::LifeLost {
                    lives_remaining: self.remaining(),
                });
            }
        }
    }

    /// Re-enable the rightmost consumed slot and re-anchor the
    /// acknowledged counter to the aggregator's current total.
    pub fn restore_one(&mut self, total_lost_now: u32, events: &mut Vec<SessionEvent>) {
        if let Some(slot) = self.slots.iter_mut().rev().find(|s| !**s) {
            *slot = true;
            events.push(SessionEvent::LifeRestored {
                lives_remaining: self.remaining(),
            });
        }
        self.acknowledged_losses = total_lost_now;
    }

    pub fn slots(&self) -> &[bool] {
        &self.slots
    }

    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| **s).count()
    }

    pub fn lost(&self) -> usize {
        self.slots.len() - self.remaining()
    }

    /// Every slot consumed; the session is over in Adaptive mode.
    pub fn exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
