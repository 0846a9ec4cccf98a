use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("multiple-choice question needs at least 2 options, got {0}")]
    TooFewOptions(usize),

    #[error("option text cannot be empty")]
    EmptyOption,

    #[error("answer index {index} out of range for {options} options")]
    AnswerOutOfRange { index: usize, options: usize },
}

//
// ─── ANSWER VALUE ──────────────────────────────────────────────────────────────
//

/// A selectable answer value: the index of a multiple-choice option, or a
/// boolean for true/false questions.
///
/// The same type doubles as a question's answer key; a submitted value is
/// correct exactly when it equals the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerValue {
    Choice(usize),
    Bool(bool),
}

/// The two supported question shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// One correct option out of several.
    Multiple,
    /// True/false. Options are always (true, false); labeling is a
    /// renderer concern carried on the subject.
    Boolean,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Immutable question record owned by the question bank.
///
/// The engine only reads questions; any per-run state (like option display
/// order) lives in a side table owned by the run, never on the question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    kind: QuestionKind,
    options: Vec<String>,
    answer: AnswerValue,
    explanation: Option<String>,
}

impl Question {
    /// Creates a validated multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two
    /// options are given, an option is blank, or the answer index is out
    /// of range.
    pub fn multiple(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer_index: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption);
        }
        if answer_index >= options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                index: answer_index,
                options: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            kind: QuestionKind::Multiple,
            options,
            answer: AnswerValue::Choice(answer_index),
            explanation,
        })
    }

    /// Creates a validated true/false question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank.
    pub fn boolean(
        id: QuestionId,
        prompt: impl Into<String>,
        answer: bool,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        Ok(Self {
            id,
            prompt,
            kind: QuestionKind::Boolean,
            options: Vec::new(),
            answer: AnswerValue::Bool(answer),
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Option texts in their original (bank) order. Empty for boolean
    /// questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The answer key.
    #[must_use]
    pub fn answer(&self) -> AnswerValue {
        self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Whether a submitted value matches the answer key.
    #[must_use]
    pub fn is_correct(&self, selected: AnswerValue) -> bool {
        selected == self.answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
