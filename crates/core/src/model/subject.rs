use thiserror::Error;

use crate::model::ids::SubjectId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject name cannot be empty")]
    EmptyName,

    #[error("boolean label cannot be empty")]
    EmptyBooleanLabel,
}

/// A quizzable subject: a display name plus per-subject labels for the two
/// boolean options (e.g. "Vero"/"Falso" for an Italian-language subject).
///
/// The engine only transports the labels; the underlying boolean values are
/// always `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: SubjectId,
    name: String,
    boolean_labels: [String; 2],
}

impl Subject {
    /// Creates a subject with the default "True"/"False" labels.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyName` if the name is blank.
    pub fn new(id: SubjectId, name: impl Into<String>) -> Result<Self, SubjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SubjectError::EmptyName);
        }

        Ok(Self {
            id,
            name,
            boolean_labels: ["True".to_string(), "False".to_string()],
        })
    }

    /// Replaces the boolean option labels (true-label, false-label).
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyBooleanLabel` if either label is blank.
    pub fn with_boolean_labels(
        mut self,
        labels: [String; 2],
    ) -> Result<Self, SubjectError> {
        if labels.iter().any(|l| l.trim().is_empty()) {
            return Err(SubjectError::EmptyBooleanLabel);
        }
        self.boolean_labels = labels;
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> &SubjectId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// (true-label, false-label) pair for rendering boolean options.
    #[must_use]
    pub fn boolean_labels(&self) -> &[String; 2] {
        &self.boolean_labels
    }
}
