use core::time::Duration;

use instant::Instant;

/// Cancellable fixed-interval repeating task, driven cooperatively by [`Playback::poll`].
///
/// The host calls `poll` from its frame/tick loop; every time an interval has elapsed
/// `poll` returns `true` once and the caller performs exactly one step. Nothing runs
/// between polls, so cancelling is synchronous: after [`Playback::cancel`] no further
/// tick is ever reported.
#[derive(Debug, Clone)]
pub struct Playback {
    interval: Duration,
    next_due: Option<Instant>,
    ticks: u64,
}

impl Playback {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    /// Schedules the first tick one interval after `now`. Restarting a running
    /// playback reschedules it.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
        self.ticks = 0;
    }

    /// Returns whether the playback was running.
    pub fn cancel(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Ticks reported since the last [`Playback::start`].
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Reports at most one due tick. Missed intervals are not replayed: the next tick
    /// is scheduled one interval after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                self.ticks += 1;
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, for hosts that want to request a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(crate::settings::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn ticks_once_per_elapsed_interval() {
        let t0 = Instant::now();
        let mut p = Playback::new(250 * MS);
        p.start(t0);

        assert!(!p.poll(t0));
        assert!(!p.poll(t0 + 249 * MS));
        assert!(p.poll(t0 + 250 * MS));
        // the next one is due 250ms after the reported tick
        assert!(!p.poll(t0 + 300 * MS));
        assert!(p.poll(t0 + 500 * MS));
        assert_eq!(p.ticks(), 2);
    }

    #[test]
    fn missed_intervals_are_not_replayed() {
        let t0 = Instant::now();
        let mut p = Playback::new(100 * MS);
        p.start(t0);
        assert!(p.poll(t0 + 1000 * MS));
        assert!(!p.poll(t0 + 1050 * MS));
        assert_eq!(p.remaining(t0 + 1050 * MS), Some(50 * MS));
    }

    #[test]
    fn cancel_stops_all_future_ticks() {
        let t0 = Instant::now();
        let mut p = Playback::default();
        p.start(t0);
        assert!(p.cancel());
        assert!(!p.is_running());
        assert!(!p.poll(t0 + Duration::from_secs(60)));
        assert!(!p.cancel());
        assert_eq!(p.remaining(t0), None);
    }
}
