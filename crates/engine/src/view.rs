//! Read-only snapshots of session state for a renderer.
//!
//! These are intentionally **not** UI view-models:
//! - no pre-formatted strings
//! - no localization assumptions
//!
//! The renderer maps them to widgets and may format numbers, labels, and
//! durations as it sees fit; it never mutates engine state except through
//! the session's documented operations.

use quiz_core::model::{
    AnswerValue, CorrectionMode, QuestionId, QuestionKind, TimeMode,
};
use quiz_core::score::{ResultBand, RunResults};

use crate::error::SessionError;
use crate::session::QuizSession;

//
// ─── QUESTION VIEW ─────────────────────────────────────────────────────────────
//

/// One selectable option, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    /// Underlying value to submit when this option is picked.
    pub value: AnswerValue,
    /// Whether this option is the recorded answer at this position.
    pub selected: bool,
    /// Highlight as the correct key. Only set when feedback is visible.
    pub marked_correct: bool,
    /// Highlight as a wrong pick. Only set when feedback is visible.
    pub marked_wrong: bool,
}

/// Everything the quiz screen needs for the question at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Original run position.
    pub position: usize,
    /// 1-based ordinal within the addressed space (run or review list).
    pub ordinal: usize,
    pub addressed_total: usize,
    pub question_id: QuestionId,
    pub kind: QuestionKind,
    pub prompt: String,
    pub options: Vec<OptionView>,
    /// Whether further submissions at this position are rejected.
    pub locked: bool,
    /// Whether right/wrong feedback may be shown. Suppressed until
    /// completion under `Final` correction; purely a display concern.
    pub feedback_visible: bool,
    /// Explanation text, present only when feedback is visible.
    pub explanation: Option<String>,
    pub flagged: bool,
    pub can_retreat: bool,
    pub is_last: bool,
}

//
// ─── NAVIGATOR / SCOREBOARD / TIMER / RESULTS ──────────────────────────────────
//

/// Answer status of a navigator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Unanswered,
    /// Answered, correctness withheld (`Final` mode before completion).
    Answered,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorDot {
    /// Original run position this dot jumps to.
    pub position: usize,
    pub state: DotState,
    pub current: bool,
    pub flagged: bool,
}

/// Running score header. `visible` is false while correctness feedback is
/// deferred; the counts themselves are always accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreboardView {
    pub correct: usize,
    pub wrong: usize,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub mode: TimeMode,
    pub elapsed_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
}

/// Results screen snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsView {
    pub results: RunResults,
    pub band: ResultBand,
    pub wrong_review_available: bool,
    pub timed_out: bool,
}

//
// ─── SNAPSHOT BUILDERS ─────────────────────────────────────────────────────────
//

impl QuizSession {
    /// Snapshot of the question at the cursor.
    ///
    /// Takes `&mut self` because the option display order is computed
    /// lazily on first display; the order is cached, so repeated calls for
    /// the same question are stable. `boolean_labels` carries the subject's
    /// (true-label, false-label) pair.
    pub fn question_view(&mut self, boolean_labels: &[String; 2]) -> Option<QuestionView> {
        let position = self.current_position();
        let feedback_visible = self.feedback_visible(position);
        let record = self.ledger().record(position).copied();
        let flagged = self.is_flagged(position);
        let ordinal = self.cursor() + 1;
        let addressed_total = self.addressed_len();
        let is_last = self.cursor() + 1 == addressed_total;
        let can_retreat = self.cursor() > 0;
        let locked = feedback_visible || self.is_complete();

        let display_order: Vec<usize> = self.run_mut().display_order(position)?.to_vec();
        let question = self.run().question(position)?;

        let selected_value = record.map(|r| r.selected());
        let mark = |value: AnswerValue| {
            let selected = selected_value == Some(value);
            let marked_correct = feedback_visible && question.is_correct(value);
            let marked_wrong =
                feedback_visible && selected && !question.is_correct(value);
            (selected, marked_correct, marked_wrong)
        };

        let options = match question.kind() {
            QuestionKind::Multiple => display_order
                .iter()
                .map(|&index| {
                    let value = AnswerValue::Choice(index);
                    let (selected, marked_correct, marked_wrong) = mark(value);
                    OptionView {
                        label: question.options()[index].clone(),
                        value,
                        selected,
                        marked_correct,
                        marked_wrong,
                    }
                })
                .collect(),
            QuestionKind::Boolean => [true, false]
                .into_iter()
                .zip(boolean_labels.iter())
                .map(|(truth, label)| {
                    let value = AnswerValue::Bool(truth);
                    let (selected, marked_correct, marked_wrong) = mark(value);
                    OptionView {
                        label: label.clone(),
                        value,
                        selected,
                        marked_correct,
                        marked_wrong,
                    }
                })
                .collect(),
        };

        let explanation = if feedback_visible {
            question.explanation().map(str::to_owned)
        } else {
            None
        };

        Some(QuestionView {
            position,
            ordinal,
            addressed_total,
            question_id: question.id(),
            kind: question.kind(),
            prompt: question.prompt().to_owned(),
            options,
            locked,
            feedback_visible,
            explanation,
            flagged,
            can_retreat,
            is_last,
        })
    }

    /// One dot per original position, regardless of review addressing, so
    /// the navigator always shows the whole run.
    #[must_use]
    pub fn navigator_view(&self) -> Vec<NavigatorDot> {
        let current = self.current_position();
        (0..self.total_questions())
            .map(|position| {
                let state = match self.ledger().record(position) {
                    None => DotState::Unanswered,
                    Some(_) if !self.feedback_visible(position) => DotState::Answered,
                    Some(record) if record.is_correct() => DotState::Correct,
                    Some(_) => DotState::Wrong,
                };
                NavigatorDot {
                    position,
                    state,
                    current: position == current,
                    flagged: self.is_flagged(position),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn scoreboard_view(&self) -> ScoreboardView {
        ScoreboardView {
            correct: self.ledger().correct_count(),
            wrong: self.ledger().wrong_count(),
            visible: self.correction_mode() == CorrectionMode::Instant || self.is_complete(),
        }
    }

    #[must_use]
    pub fn timer_view(&self) -> TimerView {
        TimerView {
            mode: self.timer().mode(),
            elapsed_seconds: self.timer().elapsed_seconds(),
            remaining_seconds: self.timer().remaining_seconds(),
            running: self.timer().is_running(),
        }
    }

    /// Results screen snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while the run is in progress.
    pub fn results_view(&self) -> Result<ResultsView, SessionError> {
        let results = self.results()?;
        Ok(ResultsView {
            results,
            band: results.band(),
            wrong_review_available: results.wrong_review_available(),
            timed_out: results.timed_out(),
        })
    }

    /// Whether correctness feedback may be shown at `position`: instantly
    /// after answering under `Instant` correction, only after completion
    /// under `Final`.
    fn feedback_visible(&self, position: usize) -> bool {
        match self.correction_mode() {
            CorrectionMode::Instant => self.ledger().is_answered(position),
            CorrectionMode::Final => self.is_complete(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
