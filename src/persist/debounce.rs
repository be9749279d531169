use std::time::{Duration, Instant};

/// Gap an edit burst must leave before the save fires.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(700);

/// Trailing-edge debounce for scene persistence.
///
/// Every edit restarts the window, so a rapid burst coalesces into one save
/// after the burst settles. The debouncer only tracks the deadline; the
/// session polls [`fire_due`] and performs the save itself.
///
/// [`fire_due`]: SaveDebouncer::fire_due
#[derive(Debug)]
pub struct SaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the window from `now`.
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending save.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it elapsed. Fires at most once per edit burst.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(SAVE_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_edits_coalesce_into_one_firing() {
        let t0 = Instant::now();
        let mut d = SaveDebouncer::new(Duration::from_millis(700));

        d.note_edit(t0);
        d.note_edit(t0 + Duration::from_millis(300));
        // The first deadline moved; nothing fires at t0 + 700ms.
        assert!(!d.fire_due(t0 + Duration::from_millis(700)));
        assert!(d.fire_due(t0 + Duration::from_millis(1_000)));
        // Consumed: a second poll stays quiet.
        assert!(!d.fire_due(t0 + Duration::from_millis(2_000)));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_the_pending_save() {
        let t0 = Instant::now();
        let mut d = SaveDebouncer::default();
        d.note_edit(t0);
        assert!(d.is_pending());
        d.cancel();
        assert!(!d.fire_due(t0 + Duration::from_secs(10)));
    }
}
