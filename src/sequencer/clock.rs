// Tick clock - the one-second cadence driving playback
// Owned by the player; the caller passes `now` so the clock is testable
// without sleeping.

use std::time::{Duration, Instant};

/// Interval between two ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Repeating one-second timer with an explicit start/stop pair
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    /// Deadline of the next tick; None while stopped
    next_tick: Option<Instant>,
}

impl TickClock {
    /// Create a stopped clock
    pub fn new() -> Self {
        Self { next_tick: None }
    }

    /// Start ticking one interval after `now`
    /// Starting a running clock realigns it, same as `restart`.
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + TICK_INTERVAL);
    }

    /// Tear down and start again from `now`
    pub fn restart(&mut self, now: Instant) {
        self.stop();
        self.start(now);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Consume one due tick, if any
    /// Call repeatedly to drain a backlog; each call yields at most one tick
    /// and moves the deadline forward by exactly one interval.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.next_tick = Some(deadline + TICK_INTERVAL);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick (zero when overdue), None while stopped
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_never_ticks() {
        let mut clock = TickClock::new();
        let now = Instant::now();
        assert!(!clock.is_running());
        assert!(!clock.poll(now + Duration::from_secs(10)));
        assert_eq!(clock.time_until_tick(now), None);
    }

    #[test]
    fn test_one_tick_per_second() {
        let mut clock = TickClock::new();
        let t0 = Instant::now();
        clock.start(t0);

        assert!(!clock.poll(t0 + Duration::from_millis(999)));
        assert!(clock.poll(t0 + Duration::from_millis(1000)));
        // Already consumed
        assert!(!clock.poll(t0 + Duration::from_millis(1500)));
        assert!(clock.poll(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn test_backlog_drains_one_at_a_time() {
        let mut clock = TickClock::new();
        let t0 = Instant::now();
        clock.start(t0);

        let late = t0 + Duration::from_millis(3500);
        let mut ticks = 0;
        while clock.poll(late) {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(clock.time_until_tick(late), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_restart_realigns_cadence() {
        let mut clock = TickClock::new();
        let t0 = Instant::now();
        clock.start(t0);

        let t1 = t0 + Duration::from_millis(700);
        clock.restart(t1);
        assert!(!clock.poll(t0 + Duration::from_millis(1000)));
        assert!(clock.poll(t1 + Duration::from_millis(1000)));
    }

    #[test]
    fn test_stop() {
        let mut clock = TickClock::new();
        let t0 = Instant::now();
        clock.start(t0);
        clock.stop();
        assert!(!clock.poll(t0 + Duration::from_secs(5)));
    }
}
