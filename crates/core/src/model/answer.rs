use crate::model::question::{AnswerValue, Question};

/// Recorded answer for one position in a run.
///
/// `is_correct` is always derived from key equality at evaluation time, so
/// it can never drift from the question's answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    selected: AnswerValue,
    is_correct: bool,
}

impl AnswerRecord {
    /// Evaluates a selection against the question's answer key.
    #[must_use]
    pub fn evaluate(question: &Question, selected: AnswerValue) -> Self {
        Self {
            selected,
            is_correct: question.is_correct(selected),
        }
    }

    #[must_use]
    pub fn selected(&self) -> AnswerValue {
        self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}
