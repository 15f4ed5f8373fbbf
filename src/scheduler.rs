use std::time::{Duration, Instant};

use log::debug;

use crate::game::GameStatus;

#[derive(Debug, Clone, Copy)]
struct Armed {
    period: Duration,
    deadline: Instant,
}

/// Variable-period tick timer that only runs while a session is playing.
///
/// The timer is disarmed whenever the status leaves `Playing` and re-armed
/// from scratch when the period changes, so a new speed applies to the very
/// next tick instead of after one stale interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickScheduler {
    armed: Option<Armed>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aligns the timer with the current status and tick period.
    pub fn sync(&mut self, status: GameStatus, period: Duration, now: Instant) {
        if status != GameStatus::Playing {
            if self.armed.take().is_some() {
                debug!("tick timer suspended ({status:?})");
            }
            return;
        }

        match self.armed {
            Some(armed) if armed.period == period => {}
            _ => {
                debug!("tick timer armed at {period:?}");
                self.armed = Some(Armed {
                    period,
                    deadline: now + period,
                });
            }
        }
    }

    /// Returns true when a tick is due, scheduling the following one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };

        if now < armed.deadline {
            return false;
        }

        armed.deadline = now + armed.period;
        true
    }

    /// Time left until the next tick, or `None` while suspended.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|armed| armed.deadline.saturating_duration_since(now))
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickScheduler;
    use crate::game::GameStatus;

    const PERIOD: Duration = Duration::from_millis(150);

    #[test]
    fn timer_only_runs_while_playing() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();

        for status in [GameStatus::Idle, GameStatus::Paused, GameStatus::GameOver] {
            scheduler.sync(status, PERIOD, start);
            assert!(!scheduler.is_armed());
            assert!(!scheduler.poll(start + PERIOD * 10));
        }

        scheduler.sync(GameStatus::Playing, PERIOD, start);
        assert!(scheduler.is_armed());
    }

    #[test]
    fn tick_fires_once_per_period() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.sync(GameStatus::Playing, PERIOD, start);

        assert!(!scheduler.poll(start + Duration::from_millis(149)));
        assert!(scheduler.poll(start + PERIOD));
        assert!(!scheduler.poll(start + PERIOD + Duration::from_millis(1)));
        assert_eq!(
            scheduler.time_until_due(start + PERIOD),
            Some(PERIOD)
        );
    }

    #[test]
    fn period_change_rearms_from_now() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.sync(GameStatus::Playing, PERIOD, start);
        assert!(scheduler.poll(start + PERIOD));

        let faster = Duration::from_millis(147);
        let now = start + PERIOD;
        scheduler.sync(GameStatus::Playing, faster, now);

        assert_eq!(scheduler.time_until_due(now), Some(faster));
    }

    #[test]
    fn pause_discards_partial_interval() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new();
        scheduler.sync(GameStatus::Playing, PERIOD, start);

        let paused_at = start + Duration::from_millis(100);
        scheduler.sync(GameStatus::Paused, PERIOD, paused_at);
        assert_eq!(scheduler.time_until_due(paused_at), None);

        let resumed_at = start + Duration::from_millis(500);
        scheduler.sync(GameStatus::Playing, PERIOD, resumed_at);
        assert!(!scheduler.poll(resumed_at + Duration::from_millis(60)));
        assert!(scheduler.poll(resumed_at + PERIOD));
    }
}
