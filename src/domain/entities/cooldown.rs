//! Per-command cooldown tracking
//!
//! Each canonical command is either cooled (may fire) or has an active
//! cooldown. Expiry is evaluated lazily on the next trigger attempt.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Length of the cooldown window in seconds
pub const COOLDOWN_SECONDS: i64 = 30;

/// Cooldown state of a single command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    Cooled,
    CooldownActive,
}

/// Last-fired timestamps keyed by canonical command name
#[derive(Debug)]
pub struct CooldownTracker {
    window: Duration,
    last_fired: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl CooldownTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: Mutex::new(HashMap::new()),
        }
    }

    /// Record a fire of `name` at `now` if its cooldown has elapsed.
    ///
    /// Returns `true` when the command may fire. A suppressed call leaves the
    /// recorded timestamp untouched.
    pub fn try_fire(&self, name: &str, now: DateTime<Utc>) -> bool {
        let mut last_fired = self.last_fired.lock().unwrap_or_else(PoisonError::into_inner);

        match last_fired.get(name) {
            Some(&last) if last + self.window >= now => false,
            _ => {
                last_fired.insert(name.to_string(), now);
                true
            }
        }
    }

    pub fn state(&self, name: &str, now: DateTime<Utc>) -> CooldownState {
        match self.last_fired(name) {
            Some(last) if last + self.window >= now => CooldownState::CooldownActive,
            _ => CooldownState::Cooled,
        }
    }

    pub fn last_fired(&self, name: &str) -> Option<DateTime<Utc>> {
        let last_fired = self.last_fired.lock().unwrap_or_else(PoisonError::into_inner);
        last_fired.get(name).copied()
    }
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new(Duration::seconds(COOLDOWN_SECONDS))
    }
}
