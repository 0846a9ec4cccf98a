use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{Question, Subject, SubjectId};

/// Errors surfaced by question bank adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("subject not found: {0}")]
    SubjectNotFound(SubjectId),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed question data: {0}")]
    Malformed(String),

    #[error(transparent)]
    Invalid(#[from] quiz_core::Error),

    #[error("bank unavailable: {0}")]
    Unavailable(String),
}

/// A subject together with the number of questions backing it, for the
/// subject-selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectOverview {
    pub subject: Subject,
    pub question_count: usize,
}

/// Repository contract for subjects and their question lists.
///
/// The engine only consumes the ordered question list; it never writes
/// back. A load failure is fatal for subject selection but recoverable for
/// the application.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// List available subjects.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the subject manifest cannot be read.
    async fn subjects(&self) -> Result<Vec<Subject>, BankError>;

    /// Load the full ordered question list for a subject.
    ///
    /// # Errors
    ///
    /// Returns `BankError::SubjectNotFound` if the subject has no backing
    /// data, or `BankError::Malformed`/`BankError::Invalid` if the data
    /// cannot be mapped into valid questions.
    async fn load_questions(&self, subject: &SubjectId) -> Result<Vec<Question>, BankError>;
}

/// Simple in-memory bank for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryBank {
    subjects: Arc<Mutex<HashMap<SubjectId, (Subject, Vec<Question>)>>>,
}

impl InMemoryBank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subjects: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Registers a subject and its question list, replacing any previous
    /// entry for the same id.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Unavailable` if the bank lock is poisoned.
    pub fn insert_subject(
        &self,
        subject: Subject,
        questions: Vec<Question>,
    ) -> Result<(), BankError> {
        let mut guard = self
            .subjects
            .lock()
            .map_err(|e| BankError::Unavailable(e.to_string()))?;
        guard.insert(subject.id().clone(), (subject, questions));
        Ok(())
    }
}

#[async_trait]
impl QuestionBank for InMemoryBank {
    async fn subjects(&self) -> Result<Vec<Subject>, BankError> {
        let guard = self
            .subjects
            .lock()
            .map_err(|e| BankError::Unavailable(e.to_string()))?;
        let mut subjects: Vec<Subject> =
            guard.values().map(|(subject, _)| subject.clone()).collect();
        subjects.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(subjects)
    }

    async fn load_questions(&self, subject: &SubjectId) -> Result<Vec<Question>, BankError> {
        let guard = self
            .subjects
            .lock()
            .map_err(|e| BankError::Unavailable(e.to_string()))?;
        guard
            .get(subject)
            .map(|(_, questions)| questions.clone())
            .ok_or_else(|| BankError::SubjectNotFound(subject.clone()))
    }
}
