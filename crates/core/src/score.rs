use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("answer counts ({sum}) do not match run length ({total})")]
    CountMismatch { total: u32, sum: u32 },
}

//
// ─── RESULT BAND ───────────────────────────────────────────────────────────────
//

/// Coarse grade tier for a finished run. The renderer maps bands to titles,
/// messages and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultBand {
    /// 100%
    Perfect,
    /// 80% and above
    Strong,
    /// 50% and above
    Passing,
    /// Below 50%
    NeedsPractice,
}

//
// ─── RUN RESULTS ───────────────────────────────────────────────────────────────
//

/// Final score snapshot for a completed run.
///
/// `percent` is computed over the full run length, so unanswered questions
/// always depress the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResults {
    total: u32,
    correct: u32,
    wrong: u32,
    skipped: u32,
    percent: u8,
    time_taken_seconds: Option<u64>,
    timed_out: bool,
}

impl RunResults {
    /// Builds results from ledger counts.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::CountMismatch` if the counts do not sum to the
    /// run length.
    pub fn from_counts(
        total: u32,
        correct: u32,
        wrong: u32,
        skipped: u32,
        time_taken_seconds: Option<u64>,
        timed_out: bool,
    ) -> Result<Self, ScoreError> {
        let sum = correct + wrong + skipped;
        if sum != total {
            return Err(ScoreError::CountMismatch { total, sum });
        }

        let percent = if total == 0 {
            0
        } else {
            (f64::from(correct) / f64::from(total) * 100.0).round() as u8
        };

        Ok(Self {
            total,
            correct,
            wrong,
            skipped,
            percent,
            time_taken_seconds,
            timed_out,
        })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    /// Rounded score percentage in `0..=100`.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Seconds spent on the run, when a time mode was active.
    #[must_use]
    pub fn time_taken_seconds(&self) -> Option<u64> {
        self.time_taken_seconds
    }

    /// Whether the run was force-completed by countdown expiry.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    #[must_use]
    pub fn band(&self) -> ResultBand {
        match self.percent {
            100 => ResultBand::Perfect,
            80..=99 => ResultBand::Strong,
            50..=79 => ResultBand::Passing,
            _ => ResultBand::NeedsPractice,
        }
    }

    /// Whether a wrong/skipped review subset would be non-empty.
    #[must_use]
    pub fn wrong_review_available(&self) -> bool {
        self.wrong + self.skipped > 0
    }
}

/// Rough per-question pace used for the duration estimate on the count
/// picker (~90 seconds per question).
pub const SECONDS_PER_QUESTION: u64 = 90;

/// Estimated run duration in seconds for a question count.
#[must_use]
pub fn estimated_seconds(question_count: usize) -> u64 {
    question_count as u64 * SECONDS_PER_QUESTION
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_uses_full_run_length() {
        let r = RunResults::from_counts(10, 7, 2, 1, None, false).unwrap();
        assert_eq!(r.percent(), 70);
        assert!(r.wrong_review_available());
    }

    #[test]
    fn counts_must_sum_to_total() {
        let err = RunResults::from_counts(10, 7, 2, 0, None, false).unwrap_err();
        assert_eq!(err, ScoreError::CountMismatch { total: 10, sum: 9 });
    }

    #[test]
    fn perfect_run_has_no_wrong_review() {
        let r = RunResults::from_counts(4, 4, 0, 0, Some(30), false).unwrap();
        assert_eq!(r.percent(), 100);
        assert_eq!(r.band(), ResultBand::Perfect);
        assert!(!r.wrong_review_available());
    }

    #[test]
    fn bands_follow_tiers() {
        let band = |correct: u32| {
            RunResults::from_counts(100, correct, 100 - correct, 0, None, false)
                .unwrap()
                .band()
        };
        assert_eq!(band(100), ResultBand::Perfect);
        assert_eq!(band(80), ResultBand::Strong);
        assert_eq!(band(50), ResultBand::Passing);
        assert_eq!(band(49), ResultBand::NeedsPractice);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        let r = RunResults::from_counts(3, 2, 1, 0, None, false).unwrap();
        assert_eq!(r.percent(), 67);
    }

    #[test]
    fn estimate_scales_with_count() {
        assert_eq!(estimated_seconds(10), 900);
    }
}
