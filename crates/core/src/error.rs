use thiserror::Error;

use crate::model::{QuestionError, SettingsError, SubjectError};
use crate::score::ScoreError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Subject(#[from] SubjectError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
