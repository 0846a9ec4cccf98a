use serde::Deserialize;

use quiz_core::model::{Question, QuestionId, Subject, SubjectId};

use crate::repository::BankError;

/// Raw question record as stored in `data/<subject>.json`.
///
/// This mirrors the file format so the domain `Question` can stay
/// validation-only and serde-free.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRecord {
    pub id: u64,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub answer: RawAnswer,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// The answer key is an option index for multiple-choice records and a
/// boolean for true/false records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawAnswer {
    Index(usize),
    Bool(bool),
}

/// Raw subject record as stored in `subjects.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct SubjectRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "booleanLabels", default)]
    pub boolean_labels: Option<[String; 2]>,
}

pub(crate) fn map_question(record: QuestionRecord) -> Result<Question, BankError> {
    let id = QuestionId::new(record.id);
    match record.kind.as_str() {
        "multiple" => {
            let options = record.options.ok_or_else(|| {
                BankError::Malformed(format!("question {id}: multiple without options"))
            })?;
            let RawAnswer::Index(answer_index) = record.answer else {
                return Err(BankError::Malformed(format!(
                    "question {id}: multiple needs an index answer"
                )));
            };
            Question::multiple(id, record.prompt, options, answer_index, record.explanation)
                .map_err(|e| BankError::Invalid(e.into()))
        }
        "boolean" => {
            let RawAnswer::Bool(answer) = record.answer else {
                return Err(BankError::Malformed(format!(
                    "question {id}: boolean needs a true/false answer"
                )));
            };
            Question::boolean(id, record.prompt, answer, record.explanation)
                .map_err(|e| BankError::Invalid(e.into()))
        }
        other => Err(BankError::Malformed(format!(
            "question {id}: unknown type \"{other}\""
        ))),
    }
}

pub(crate) fn map_subject(record: SubjectRecord) -> Result<Subject, BankError> {
    let subject = Subject::new(SubjectId::new(record.id), record.name)
        .map_err(|e| BankError::Invalid(e.into()))?;
    match record.boolean_labels {
        Some(labels) => subject
            .with_boolean_labels(labels)
            .map_err(|e| BankError::Invalid(e.into())),
        None => Ok(subject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerValue, QuestionKind};

    #[test]
    fn maps_multiple_record() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "question": "Which compound is softest?",
                "type": "multiple",
                "options": ["Hard", "Medium", "Soft"],
                "answer": 2,
                "explanation": "Softs grip most."
            }"#,
        )
        .unwrap();

        let q = map_question(record).unwrap();
        assert_eq!(q.kind(), QuestionKind::Multiple);
        assert_eq!(q.answer(), AnswerValue::Choice(2));
        assert_eq!(q.explanation(), Some("Softs grip most."));
    }

    #[test]
    fn maps_boolean_record() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{"id": 1, "question": "DRS opens on lap one", "type": "boolean", "answer": false}"#,
        )
        .unwrap();

        let q = map_question(record).unwrap();
        assert_eq!(q.kind(), QuestionKind::Boolean);
        assert_eq!(q.answer(), AnswerValue::Bool(false));
    }

    #[test]
    fn multiple_without_options_is_malformed() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{"id": 2, "question": "Q", "type": "multiple", "answer": 0}"#,
        )
        .unwrap();
        assert!(matches!(map_question(record), Err(BankError::Malformed(_))));
    }

    #[test]
    fn boolean_with_index_answer_is_malformed() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{"id": 3, "question": "Q", "type": "boolean", "answer": 1}"#,
        )
        .unwrap();
        assert!(matches!(map_question(record), Err(BankError::Malformed(_))));
    }

    #[test]
    fn unknown_type_is_malformed() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{"id": 4, "question": "Q", "type": "essay", "answer": 0}"#,
        )
        .unwrap();
        assert!(matches!(map_question(record), Err(BankError::Malformed(_))));
    }

    #[test]
    fn out_of_range_answer_is_invalid() {
        let record: QuestionRecord = serde_json::from_str(
            r#"{"id": 5, "question": "Q", "type": "multiple", "options": ["a", "b"], "answer": 5}"#,
        )
        .unwrap();
        assert!(matches!(map_question(record), Err(BankError::Invalid(_))));
    }

    #[test]
    fn maps_subject_with_labels() {
        let record: SubjectRecord = serde_json::from_str(
            r#"{"id": "f1", "name": "Formula 1", "booleanLabels": ["Vero", "Falso"]}"#,
        )
        .unwrap();
        let subject = map_subject(record).unwrap();
        assert_eq!(subject.name(), "Formula 1");
        assert_eq!(subject.boolean_labels()[0], "Vero");
    }
}
