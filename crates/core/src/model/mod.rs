mod answer;
mod ids;
mod question;
mod settings;
mod subject;

pub use answer::AnswerRecord;
pub use ids::{ParseIdError, QuestionId, SubjectId};
pub use question::{AnswerValue, Question, QuestionError, QuestionKind};
pub use settings::{CorrectionMode, RunSettings, SettingsError, TimeMode};
pub use subject::{Subject, SubjectError};
