use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quiz_core::model::{Question, Subject, SubjectId};

use crate::mapping::{QuestionRecord, SubjectRecord, map_question, map_subject};
use crate::repository::{BankError, QuestionBank};

/// Name of the subject manifest inside the data directory.
const SUBJECTS_FILE: &str = "subjects.json";

/// File-backed question bank.
///
/// Reads `subjects.json` (subject manifest) and `<subject-id>.json`
/// (question array) from a data directory, mapping raw records into
/// validated domain types. Files are read per request; the bank keeps no
/// cache, so repeated runs always see the files as they are.
pub struct JsonBank {
    data_dir: PathBuf,
}

impl JsonBank {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn subject_path(&self, subject: &SubjectId) -> PathBuf {
        self.data_dir.join(format!("{}.json", subject.as_str()))
    }
}

#[async_trait]
impl QuestionBank for JsonBank {
    async fn subjects(&self) -> Result<Vec<Subject>, BankError> {
        let raw = tokio::fs::read(self.data_dir.join(SUBJECTS_FILE)).await?;
        let records: Vec<SubjectRecord> = serde_json::from_slice(&raw)
            .map_err(|e| BankError::Malformed(format!("{SUBJECTS_FILE}: {e}")))?;
        records.into_iter().map(map_subject).collect()
    }

    async fn load_questions(&self, subject: &SubjectId) -> Result<Vec<Question>, BankError> {
        let path = self.subject_path(subject);
        let raw = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BankError::SubjectNotFound(subject.clone()));
            }
            Err(e) => return Err(BankError::Io(e)),
        };

        let records: Vec<QuestionRecord> = serde_json::from_slice(&raw)
            .map_err(|e| BankError::Malformed(format!("{subject}.json: {e}")))?;
        records.into_iter().map(map_question).collect()
    }
}
