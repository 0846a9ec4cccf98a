use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("countdown duration must be > 0 minutes")]
    InvalidCountdownMinutes,
}

/// Policy for when right/wrong feedback and score are revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrectionMode {
    /// Feedback shown immediately per question; answers lock once given.
    #[default]
    Instant,
    /// Feedback deferred to the end; answers stay changeable and questions
    /// may be flagged for later attention.
    Final,
}

/// Optional time tracking attached to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeMode {
    #[default]
    None,
    /// Count elapsed seconds up without bound.
    Stopwatch,
    /// Count down from a fixed duration; expiry force-completes the run.
    Countdown { minutes: u32 },
}

impl TimeMode {
    /// Creates a countdown mode from a duration in minutes.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidCountdownMinutes` for a zero duration.
    pub fn countdown(minutes: u32) -> Result<Self, SettingsError> {
        if minutes == 0 {
            return Err(SettingsError::InvalidCountdownMinutes);
        }
        Ok(Self::Countdown { minutes })
    }

    /// Countdown duration in seconds. The minutes-to-seconds conversion
    /// happens here, exactly once.
    #[must_use]
    pub fn duration_seconds(&self) -> Option<u64> {
        match self {
            TimeMode::Countdown { minutes } => Some(u64::from(*minutes) * 60),
            _ => None,
        }
    }
}

/// Configuration for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    correction_mode: CorrectionMode,
    time_mode: TimeMode,
    shuffle_questions: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            correction_mode: CorrectionMode::Instant,
            time_mode: TimeMode::None,
            shuffle_questions: true,
        }
    }
}

impl RunSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_correction_mode(mut self, mode: CorrectionMode) -> Self {
        self.correction_mode = mode;
        self
    }

    #[must_use]
    pub fn with_time_mode(mut self, mode: TimeMode) -> Self {
        self.time_mode = mode;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn correction_mode(&self) -> CorrectionMode {
        self.correction_mode
    }

    #[must_use]
    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_instant_untimed_shuffled() {
        let s = RunSettings::default();
        assert_eq!(s.correction_mode(), CorrectionMode::Instant);
        assert_eq!(s.time_mode(), TimeMode::None);
        assert!(s.shuffle_questions());
    }

    #[test]
    fn countdown_converts_minutes_once() {
        let mode = TimeMode::countdown(2).unwrap();
        assert_eq!(mode.duration_seconds(), Some(120));
    }

    #[test]
    fn countdown_rejects_zero() {
        assert!(matches!(
            TimeMode::countdown(0),
            Err(SettingsError::InvalidCountdownMinutes)
        ));
    }

    #[test]
    fn non_countdown_modes_have_no_duration() {
        assert_eq!(TimeMode::None.duration_seconds(), None);
        assert_eq!(TimeMode::Stopwatch.duration_seconds(), None);
    }
}
