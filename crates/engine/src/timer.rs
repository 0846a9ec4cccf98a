use quiz_core::model::TimeMode;

/// Event surfaced by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Timer is inert or stopped; nothing changed.
    Idle,
    /// One second accounted for.
    Ticked,
    /// Countdown reached zero; the run must be force-completed.
    Expired,
}

/// Stopwatch or countdown attached to a run.
///
/// Ticks arrive from an external once-per-second scheduler; the timer only
/// does the bookkeeping. `stop` is idempotent and is called on every
/// transition away from an active run so a stale scheduler callback can
/// never mutate a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTimer {
    mode: TimeMode,
    elapsed_seconds: u64,
    remaining_seconds: u64,
    duration_seconds: u64,
    running: bool,
}

impl RunTimer {
    /// Creates a stopped timer for the given mode. Countdown duration is
    /// converted from minutes to seconds here, once.
    #[must_use]
    pub fn new(mode: TimeMode) -> Self {
        let duration_seconds = mode.duration_seconds().unwrap_or(0);
        Self {
            mode,
            elapsed_seconds: 0,
            remaining_seconds: duration_seconds,
            duration_seconds,
            running: false,
        }
    }

    /// Starts ticking. Inert for `TimeMode::None`.
    pub fn start(&mut self) {
        if !matches!(self.mode, TimeMode::None) {
            self.running = true;
        }
    }

    /// Stops ticking. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Accounts for one elapsed second.
    pub fn tick(&mut self) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }
        match self.mode {
            TimeMode::None => TimerEvent::Idle,
            TimeMode::Stopwatch => {
                self.elapsed_seconds += 1;
                TimerEvent::Ticked
            }
            TimeMode::Countdown { .. } => {
                self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
                if self.remaining_seconds == 0 {
                    self.running = false;
                    TimerEvent::Expired
                } else {
                    TimerEvent::Ticked
                }
            }
        }
    }

    #[must_use]
    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Remaining countdown seconds, clamped at zero.
    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Seconds consumed by the run, for results. A timed-out countdown
    /// reports the full duration.
    #[must_use]
    pub fn time_taken(&self) -> Option<u64> {
        match self.mode {
            TimeMode::None => None,
            TimeMode::Stopwatch => Some(self.elapsed_seconds),
            TimeMode::Countdown { .. } => Some(
                self.duration_seconds
                    - self.remaining_seconds.min(self.duration_seconds),
            ),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_mode_is_inert() {
        let mut timer = RunTimer::new(TimeMode::None);
        timer.start();
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), TimerEvent::Idle);
        assert_eq!(timer.time_taken(), None);
    }

    #[test]
    fn stopwatch_counts_up() {
        let mut timer = RunTimer::new(TimeMode::Stopwatch);
        timer.start();
        for _ in 0..5 {
            assert_eq!(timer.tick(), TimerEvent::Ticked);
        }
        assert_eq!(timer.elapsed_seconds(), 5);
        assert_eq!(timer.time_taken(), Some(5));
    }

    #[test]
    fn countdown_expires_after_full_duration() {
        let mut timer = RunTimer::new(TimeMode::countdown(1).unwrap());
        timer.start();
        for _ in 0..59 {
            assert_eq!(timer.tick(), TimerEvent::Ticked);
        }
        assert_eq!(timer.tick(), TimerEvent::Expired);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.time_taken(), Some(60));
    }

    #[test]
    fn ticks_after_expiry_are_idle() {
        let mut timer = RunTimer::new(TimeMode::countdown(1).unwrap());
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.tick(), TimerEvent::Idle);
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = RunTimer::new(TimeMode::Stopwatch);
        timer.start();
        timer.tick();
        timer.stop();
        timer.stop();
        assert_eq!(timer.tick(), TimerEvent::Idle);
        assert_eq!(timer.elapsed_seconds(), 1);
    }

    #[test]
    fn partial_countdown_reports_consumed_seconds() {
        let mut timer = RunTimer::new(TimeMode::countdown(1).unwrap());
        timer.start();
        for _ in 0..20 {
            timer.tick();
        }
        timer.stop();
        assert_eq!(timer.time_taken(), Some(20));
    }
}
