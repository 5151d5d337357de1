//! Ephemeral in-match timers: the per-counter change display and the
//! auto-phase reminder.
//!
//! Nothing here is persisted. Callers supply the current `Instant` so the
//! contracts are testable without real timers; the UI layer drives these from
//! its own tick.

use std::time::{Duration, Instant};

/// How long an accumulated counter change stays visible.
pub const CHANGE_DISPLAY_WINDOW: Duration = Duration::from_secs(10);

/// Time allowed in the auto phase before the reminder fires.
pub const AUTO_PHASE_BUDGET: Duration = Duration::from_secs(20);

/// Accumulates counter deltas into one displayed change that expires after
/// ten idle seconds.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    accumulated: Option<i32>,
    visible_until: Option<Instant>,
}

impl ChangeTracker {
    /// Record an accepted counter update.
    ///
    /// A deadline that already elapsed clears the running total before the
    /// new delta applies, so a gap of ten seconds or more starts a fresh
    /// accumulation.
    pub fn record(&mut self, delta: i32, now: Instant) {
        self.expire(now);
        self.accumulated = Some(self.accumulated.unwrap_or(0) + delta);
        self.visible_until = Some(now + CHANGE_DISPLAY_WINDOW);
    }

    /// The currently displayed delta, `None` once the window has elapsed.
    pub fn current(&self, now: Instant) -> Option<i32> {
        match self.visible_until {
            Some(deadline) if now < deadline => self.accumulated,
            _ => None,
        }
    }

    /// Drop any pending display state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn expire(&mut self, now: Instant) {
        if let Some(deadline) = self.visible_until {
            if now >= deadline {
                self.accumulated = None;
                self.visible_until = None;
            }
        }
    }
}

/// Reminds the scout to switch away from the auto section.
///
/// The timer starts on the first auto-counter interaction. Twenty seconds
/// later the reminder fires on every poll until the first teleop interaction
/// or an explicit collapse of the auto section silences it for the rest of
/// the stage.
#[derive(Debug, Clone, Default)]
pub struct AutoPhaseReminder {
    started_at: Option<Instant>,
    silenced: bool,
}

impl AutoPhaseReminder {
    /// Note an auto-counter interaction.
    pub fn touch_auto(&mut self, now: Instant) {
        if !self.silenced && self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Note a teleop-counter interaction; silences the reminder.
    pub fn touch_teleop(&mut self) {
        self.silence();
    }

    /// The auto section was collapsed; silences the reminder.
    pub fn collapse(&mut self) {
        self.silence();
    }

    /// Whether the reminder should fire right now.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.started_at {
            Some(started) => now.duration_since(started) >= AUTO_PHASE_BUDGET,
            None => false,
        }
    }

    /// Drop all reminder state for a new stage.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn silence(&mut self) {
        self.started_at = None;
        self.silenced = true;
    }
}
