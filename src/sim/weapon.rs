//! Magazine and reload timer

use serde::{Deserialize, Serialize};

/// What a trigger pull did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireOutcome {
    /// A bullet should be spawned
    pub fired: bool,
    /// This shot emptied the magazine
    pub reload_started: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub capacity: u32,
    pub shots_fired: u32,
    pub reload_ms: u32,
    /// Time left on the current reload; zero when not reloading
    pub reload_remaining_ms: u32,
}

impl Weapon {
    pub fn new(capacity: u32, reload_ms: u32) -> Self {
        Self {
            capacity,
            shots_fired: 0,
            reload_ms,
            reload_remaining_ms: 0,
        }
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reload_remaining_ms > 0
    }

    pub fn ammo(&self) -> u32 {
        if self.is_reloading() {
            0
        } else {
            self.capacity.saturating_sub(self.shots_fired)
        }
    }

    /// Pull the trigger
    pub fn try_fire(&mut self) -> FireOutcome {
        if self.is_reloading() || self.shots_fired >= self.capacity {
            return FireOutcome::default();
        }
        self.shots_fired += 1;
        let reload_started = self.shots_fired >= self.capacity;
        if reload_started {
            // A zero-length reload still takes one frame to come back
            self.reload_remaining_ms = self.reload_ms.max(1);
        }
        FireOutcome {
            fired: true,
            reload_started,
        }
    }

    /// Count the reload down. Returns true on the frame it completes.
    pub fn tick(&mut self, dt_ms: u32) -> bool {
        if !self.is_reloading() {
            return false;
        }
        self.reload_remaining_ms = self.reload_remaining_ms.saturating_sub(dt_ms);
        if self.reload_remaining_ms == 0 {
            self.shots_fired = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empties_then_reloads() {
        let mut w = Weapon::new(3, 2000);
        assert_eq!(w.try_fire(), FireOutcome { fired: true, reload_started: false });
        assert_eq!(w.try_fire(), FireOutcome { fired: true, reload_started: false });
        assert_eq!(w.try_fire(), FireOutcome { fired: true, reload_started: true });
        assert!(w.is_reloading());
        assert_eq!(w.ammo(), 0);

        // Refused while reloading
        assert!(!w.try_fire().fired);

        assert!(!w.tick(1999));
        assert!(w.tick(1));
        assert!(!w.is_reloading());
        assert_eq!(w.ammo(), 3);
        // Finished is reported once
        assert!(!w.tick(16));
    }

    #[test]
    fn test_zero_reload_takes_one_frame() {
        let mut w = Weapon::new(1, 0);
        assert!(w.try_fire().reload_started);
        assert!(!w.try_fire().fired);
        assert!(w.tick(16));
        assert!(w.try_fire().fired);
    }
}
