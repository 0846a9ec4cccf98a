use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use quiz_core::Clock;
use quiz_core::model::{AnswerRecord, AnswerValue, CorrectionMode, Question};
use quiz_core::score::RunResults;

use crate::error::SessionError;
use crate::ledger::AnswerLedger;
use crate::navigation::{AdvanceOutcome, Navigator, ReviewFilter};
use crate::progress::SessionProgress;
use crate::run::Run;
use crate::timer::{RunTimer, TimerEvent};

//
// ─── STATE TYPES ───────────────────────────────────────────────────────────────
//

/// Lifecycle phase of a run. A session that does not exist yet is the
/// "not started" state; constructing one is the start transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    InProgress,
    Completed,
}

/// Destructive action awaiting explicit confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Finish the run and show results.
    Finish,
    /// Abandon the run and leave the quiz.
    Exit,
}

/// What an advance request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceEffect {
    Moved,
    /// At the last question; a finish confirmation is now pending.
    FinishRequested,
    /// At the end of the review list; review mode was exited.
    LeftReview,
    /// At the end with nothing to do (already completed, not reviewing).
    Boundary,
}

/// What a timer tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Ticking,
    /// Countdown expired; the run was force-completed.
    TimedOut,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session: one run from start to completion, plus the
/// post-completion review view.
///
/// The session is the only mutation surface over run state; renderers hold
/// read-only references and drive it exclusively through these operations.
/// It is single-threaded by design: user actions and timer ticks are
/// discrete events applied one at a time, so a timeout can never interleave
/// with a submission.
#[derive(Debug, Clone)]
pub struct QuizSession {
    run: Run,
    ledger: AnswerLedger,
    navigator: Navigator,
    timer: RunTimer,
    flags: BTreeSet<usize>,
    pending: Option<PendingAction>,
    phase: RunPhase,
    timed_out: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    clock: Clock,
}

impl QuizSession {
    /// Starts a run: fresh ledger, cursor at zero, no flags, timer running.
    #[must_use]
    pub fn start(run: Run, clock: Clock) -> Self {
        let total = run.total();
        let mode = run.settings().correction_mode();
        let mut timer = RunTimer::new(run.settings().time_mode());
        timer.start();

        Self {
            ledger: AnswerLedger::new(total, mode),
            navigator: Navigator::new(total),
            timer,
            flags: BTreeSet::new(),
            pending: None,
            phase: RunPhase::InProgress,
            timed_out: false,
            started_at: clock.now(),
            completed_at: None,
            clock,
            run,
        }
    }

    //
    // ─── READ ACCESS ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, RunPhase::Completed)
    }

    #[must_use]
    pub fn run(&self) -> &Run {
        &self.run
    }

    /// The run, mutable for lazy display-order computation only.
    pub fn run_mut(&mut self) -> &mut Run {
        &mut self.run
    }

    #[must_use]
    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    #[must_use]
    pub fn timer(&self) -> &RunTimer {
        &self.timer
    }

    #[must_use]
    pub fn correction_mode(&self) -> CorrectionMode {
        self.ledger.mode()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.run.total()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Whether completion was forced by countdown expiry.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Cursor within the addressed space (full run, or review list).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.navigator.cursor()
    }

    #[must_use]
    pub fn addressed_len(&self) -> usize {
        self.navigator.addressed_len()
    }

    /// Original run position the cursor points at.
    #[must_use]
    pub fn current_position(&self) -> usize {
        self.navigator.current_position()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.run.question(self.current_position())
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        self.navigator.is_reviewing()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.run.total();
        let answered = self.ledger.answered_count();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.is_complete(),
        }
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Records an answer for the question at the cursor, applying the
    /// correction mode's mutability rules. Returns the slot content after
    /// the operation (`None` after a final-mode deselect).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the run is finished; the
    /// ledger is frozen from then on, including during review.
    pub fn submit_answer(
        &mut self,
        selected: AnswerValue,
    ) -> Result<Option<AnswerRecord>, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let position = self.current_position();
        let Some(question) = self.run.question(position) else {
            return Ok(None);
        };
        Ok(self.ledger.submit(position, question, selected))
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Moves to the next question. Skipping an unanswered question is
    /// always permitted. At the last position this raises a finish
    /// confirmation in normal mode and exits review in review mode.
    pub fn advance(&mut self) -> AdvanceEffect {
        match self.navigator.advance() {
            AdvanceOutcome::Moved => AdvanceEffect::Moved,
            AdvanceOutcome::AtEnd => {
                if self.navigator.is_reviewing() {
                    self.exit_review();
                    AdvanceEffect::LeftReview
                } else if self.is_complete() {
                    AdvanceEffect::Boundary
                } else {
                    self.pending = Some(PendingAction::Finish);
                    AdvanceEffect::FinishRequested
                }
            }
        }
    }

    /// Moves back one question; no-op at the first position.
    pub fn retreat(&mut self) {
        self.navigator.retreat();
    }

    /// Jumps to a position in the addressed space; out-of-bounds targets
    /// are ignored. Jumping to unanswered positions is allowed.
    pub fn jump(&mut self, target: usize) {
        self.navigator.jump(target);
    }

    //
    // ─── COMPLETION CONFIRMATION ───────────────────────────────────────────────
    //

    /// Requests finishing the run. While reviewing this simply exits
    /// review (no progress can be lost); on a completed run it is a no-op.
    pub fn request_finish(&mut self) {
        if self.navigator.is_reviewing() {
            self.exit_review();
        } else if !self.is_complete() {
            self.pending = Some(PendingAction::Finish);
        }
    }

    /// Requests abandoning the run.
    pub fn request_exit(&mut self) {
        if !self.is_complete() {
            self.pending = Some(PendingAction::Exit);
        }
    }

    /// Cancels the pending action with no state change.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Confirms the pending action and returns it so the caller can react
    /// (an `Exit` means the session should be dropped).
    pub fn confirm_pending(&mut self) -> Option<PendingAction> {
        let action = self.pending.take()?;
        match action {
            PendingAction::Finish => self.complete(false),
            PendingAction::Exit => self.timer.stop(),
        }
        Some(action)
    }

    /// Stops the timer without completing; used when the session is being
    /// torn down from outside (screen change).
    pub fn abort(&mut self) {
        self.timer.stop();
        self.pending = None;
    }

    fn complete(&mut self, timed_out: bool) {
        if self.is_complete() {
            return;
        }
        self.timer.stop();
        self.phase = RunPhase::Completed;
        self.timed_out = timed_out;
        self.completed_at = Some(self.clock.now());
        self.pending = None;
    }

    //
    // ─── FLAGS ─────────────────────────────────────────────────────────────────
    //

    fn flags_allowed(&self, position: usize) -> bool {
        self.correction_mode() == CorrectionMode::Final
            && !self.is_complete()
            && position < self.total_questions()
    }

    /// Marks a position for later attention. Only legal under `Final`
    /// correction while the run is in progress; otherwise the set is left
    /// unchanged. Returns whether the set changed.
    pub fn flag(&mut self, position: usize) -> bool {
        if !self.flags_allowed(position) {
            return false;
        }
        self.flags.insert(position)
    }

    /// Removes a later-attention mark, under the same rules as
    /// [`QuizSession::flag`].
    pub fn unflag(&mut self, position: usize) -> bool {
        if !self.flags_allowed(position) {
            return false;
        }
        self.flags.remove(&position)
    }

    #[must_use]
    pub fn is_flagged(&self, position: usize) -> bool {
        self.flags.contains(&position)
    }

    /// Flagged positions in ascending order.
    #[must_use]
    pub fn flagged_positions(&self) -> Vec<usize> {
        self.flags.iter().copied().collect()
    }

    //
    // ─── TIMER ─────────────────────────────────────────────────────────────────
    //

    /// Accounts for one second. Countdown expiry is the one event that
    /// completes a run without explicit confirmation; any pending
    /// confirmation is dropped with it.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_complete() {
            return TickOutcome::Idle;
        }
        match self.timer.tick() {
            TimerEvent::Idle => TickOutcome::Idle,
            TimerEvent::Ticked => TickOutcome::Ticking,
            TimerEvent::Expired => {
                self.complete(true);
                TickOutcome::TimedOut
            }
        }
    }

    //
    // ─── REVIEW ────────────────────────────────────────────────────────────────
    //

    /// Enters the review sub-mode over a filtered subset of original
    /// positions. The run stays completed; review is a view layered on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` before completion and
    /// `SessionError::Empty` when the filter selects nothing.
    pub fn enter_review(&mut self, filter: ReviewFilter) -> Result<(), SessionError> {
        if !self.is_complete() {
            return Err(SessionError::NotCompleted);
        }
        let positions = self.review_positions_for(filter);
        if positions.is_empty() {
            return Err(SessionError::Empty);
        }
        self.navigator.enter_review(positions);
        Ok(())
    }

    /// Leaves review, restoring full-run addressing.
    pub fn exit_review(&mut self) {
        self.navigator.exit_review();
    }

    fn review_positions_for(&self, filter: ReviewFilter) -> Vec<usize> {
        match filter {
            ReviewFilter::All => (0..self.total_questions()).collect(),
            ReviewFilter::Wrong => self
                .ledger
                .snapshot()
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_none_or(|record| !record.is_correct()))
                .map(|(position, _)| position)
                .collect(),
        }
    }

    //
    // ─── RESULTS ───────────────────────────────────────────────────────────────
    //

    /// Final score snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while the run is in progress.
    pub fn results(&self) -> Result<RunResults, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::NotCompleted);
        }
        let results = RunResults::from_counts(
            self.run.total() as u32,
            self.ledger.correct_count() as u32,
            self.ledger.wrong_count() as u32,
            self.ledger.skipped_count() as u32,
            self.timer.time_taken(),
            self.timed_out,
        )?;
        Ok(results)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionId, RunSettings, TimeMode};
    use quiz_core::time::fixed_clock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::run::RunBuilder;

    /// Boolean questions whose key is always `true`, unshuffled for
    /// position-predictable tests.
    fn start_session(total: u64, settings: RunSettings) -> QuizSession {
        let pool: Vec<Question> = (0..total)
            .map(|i| Question::boolean(QuestionId::new(i), format!("Q{i}"), true, None).unwrap())
            .collect();
        let mut rng = StdRng::seed_from_u64(11);
        let run = RunBuilder::new(pool, total as usize)
            .with_settings(settings.with_shuffle(false))
            .build_with_rng(&mut rng)
            .unwrap();
        QuizSession::start(run, fixed_clock())
    }

    fn answer(session: &mut QuizSession, value: bool) {
        session.submit_answer(AnswerValue::Bool(value)).unwrap();
    }

    #[test]
    fn full_flow_completes_with_confirmation() {
        let mut session = start_session(2, RunSettings::default());
        assert_eq!(session.phase(), RunPhase::InProgress);

        answer(&mut session, true);
        assert_eq!(session.advance(), AdvanceEffect::Moved);
        answer(&mut session, false);

        assert_eq!(session.advance(), AdvanceEffect::FinishRequested);
        assert_eq!(session.pending(), Some(PendingAction::Finish));
        assert_eq!(session.confirm_pending(), Some(PendingAction::Finish));

        assert!(session.is_complete());
        let results = session.results().unwrap();
        assert_eq!(results.correct(), 1);
        assert_eq!(results.wrong(), 1);
        assert_eq!(results.percent(), 50);
        assert_eq!(session.completed_at(), Some(session.started_at()));
    }

    #[test]
    fn cancel_leaves_run_in_progress() {
        let mut session = start_session(1, RunSettings::default());
        session.request_finish();
        session.cancel_pending();
        assert!(!session.is_complete());
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn completion_counts_unanswered_as_skipped() {
        let mut session = start_session(3, RunSettings::default());
        answer(&mut session, true);

        session.request_finish();
        session.confirm_pending();

        let results = session.results().unwrap();
        assert_eq!(results.correct(), 1);
        assert_eq!(results.skipped(), 2);
        assert_eq!(
            results.correct() + results.wrong() + results.skipped(),
            results.total()
        );
    }

    #[test]
    fn instant_double_submission_is_idempotent() {
        let mut session = start_session(1, RunSettings::default());
        let first = session.submit_answer(AnswerValue::Bool(true)).unwrap();
        let second = session.submit_answer(AnswerValue::Bool(false)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn submissions_are_frozen_after_completion() {
        let mut session = start_session(1, RunSettings::default());
        session.request_finish();
        session.confirm_pending();

        let err = session.submit_answer(AnswerValue::Bool(true)).unwrap_err();
        assert!(matches!(err, SessionError::Completed));
    }

    #[test]
    fn review_wrong_filter_selects_skipped_and_incorrect() {
        use quiz_core::model::CorrectionMode;
        let mut session = start_session(
            4,
            RunSettings::default().with_correction_mode(CorrectionMode::Final),
        );
        // correct, skipped, wrong, correct
        answer(&mut session, true);
        session.jump(2);
        answer(&mut session, false);
        session.jump(3);
        answer(&mut session, true);

        session.request_finish();
        session.confirm_pending();

        session.enter_review(ReviewFilter::Wrong).unwrap();
        assert_eq!(session.navigator.review_positions(), Some(&[1, 2][..]));
        assert_eq!(session.current_position(), 1);

        // Advancing past the end of the review list exits review.
        session.advance();
        assert_eq!(session.advance(), AdvanceEffect::LeftReview);
        assert!(!session.is_reviewing());
        assert!(session.is_complete());
    }

    #[test]
    fn review_requires_completion() {
        let mut session = start_session(2, RunSettings::default());
        assert!(matches!(
            session.enter_review(ReviewFilter::All),
            Err(SessionError::NotCompleted)
        ));
    }

    #[test]
    fn perfect_run_has_empty_wrong_review() {
        let mut session = start_session(2, RunSettings::default());
        answer(&mut session, true);
        session.advance();
        answer(&mut session, true);
        session.request_finish();
        session.confirm_pending();

        assert!(matches!(
            session.enter_review(ReviewFilter::Wrong),
            Err(SessionError::Empty)
        ));
        session.enter_review(ReviewFilter::All).unwrap();
        assert_eq!(session.addressed_len(), 2);
    }

    #[test]
    fn finish_request_during_review_exits_review() {
        let mut session = start_session(2, RunSettings::default());
        session.request_finish();
        session.confirm_pending();
        session.enter_review(ReviewFilter::All).unwrap();

        session.request_finish();
        assert!(!session.is_reviewing());
        assert_eq!(session.pending(), None);
        assert!(session.is_complete());
    }

    #[test]
    fn countdown_expiry_forces_completion() {
        let settings = RunSettings::default().with_time_mode(TimeMode::countdown(1).unwrap());
        let mut session = start_session(3, settings);
        answer(&mut session, true);
        // A confirmation dialog is open when time runs out.
        session.request_exit();

        for _ in 0..59 {
            assert_eq!(session.tick(), TickOutcome::Ticking);
        }
        assert_eq!(session.tick(), TickOutcome::TimedOut);

        assert!(session.is_complete());
        assert!(session.timed_out());
        assert_eq!(session.pending(), None);

        let results = session.results().unwrap();
        assert!(results.timed_out());
        assert_eq!(results.time_taken_seconds(), Some(60));
        assert_eq!(results.skipped(), 2);
    }

    #[test]
    fn ticks_after_completion_are_idle() {
        let settings = RunSettings::default().with_time_mode(TimeMode::Stopwatch);
        let mut session = start_session(1, settings);
        session.tick();
        session.request_finish();
        session.confirm_pending();

        assert_eq!(session.tick(), TickOutcome::Idle);
        let results = session.results().unwrap();
        assert_eq!(results.time_taken_seconds(), Some(1));
    }

    #[test]
    fn flags_toggle_only_in_final_mode() {
        use quiz_core::model::CorrectionMode;
        let mut session = start_session(
            3,
            RunSettings::default().with_correction_mode(CorrectionMode::Final),
        );

        assert!(session.flag(1));
        assert!(session.is_flagged(1));
        assert!(session.unflag(1));
        assert!(!session.is_flagged(1));
        assert!(session.flagged_positions().is_empty());

        // Out of bounds is rejected.
        assert!(!session.flag(3));

        let mut instant = start_session(3, RunSettings::default());
        assert!(!instant.flag(1));
        assert!(instant.flagged_positions().is_empty());
    }

    #[test]
    fn flags_reject_after_completion() {
        use quiz_core::model::CorrectionMode;
        let mut session = start_session(
            2,
            RunSettings::default().with_correction_mode(CorrectionMode::Final),
        );
        session.flag(0);
        session.request_finish();
        session.confirm_pending();

        assert!(!session.flag(1));
        assert_eq!(session.flagged_positions(), vec![0]);
    }

    #[test]
    fn exit_confirmation_stops_timer() {
        let settings = RunSettings::default().with_time_mode(TimeMode::Stopwatch);
        let mut session = start_session(2, settings);
        session.tick();

        session.request_exit();
        assert_eq!(session.confirm_pending(), Some(PendingAction::Exit));
        assert!(!session.timer().is_running());
        assert!(!session.is_complete());
    }

    #[test]
    fn advance_boundary_after_completion_is_inert() {
        let mut session = start_session(1, RunSettings::default());
        session.request_finish();
        session.confirm_pending();
        assert_eq!(session.advance(), AdvanceEffect::Boundary);
    }

    #[test]
    fn progress_counts_answered_over_total() {
        let mut session = start_session(4, RunSettings::default());
        answer(&mut session, true);
        session.advance();
        answer(&mut session, false);

        let progress = session.progress();
        assert_eq!(progress.total, 4);
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);
    }
}
