use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DataError;

pub const QUESTION: &str = "question";
pub const ANSWERS: &str = "answers";
pub const CORRECT_ANSWERS: &str = "correct_answers";
pub const UUID: &str = "uuid";
pub const SOURCE: &str = "source";
pub const PART: &str = "part";
pub const QUESTION_NUMBER: &str = "question_number";

/// A question record as stored on disk.
///
/// The record keeps every field exactly as read, in file order, so rewriting
/// a file only changes the fields that were set. `null` stays `null` and
/// stays distinct from an absent field.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct RawQuestionData {
    fields: Map<String, Value>,
}

impl RawQuestionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets a field, keeping its position if it already exists.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_owned(), value.into());
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The id, if the record has a usable one.
    pub fn uuid(&self) -> Option<&str> {
        self.get(UUID).and_then(Value::as_str)
    }

    /// Whether a new id should be assigned. A `null` id counts as missing.
    pub fn lacks_uuid(&self) -> bool {
        self.get(UUID).map_or(true, Value::is_null)
    }

    pub fn location(&self) -> Location {
        Location {
            source: self.get(SOURCE).cloned(),
            part: self.get(PART).cloned(),
            question_number: self.get(QUESTION_NUMBER).cloned(),
        }
    }

    /// Borrows the fields that decide whether two records are duplicates.
    pub fn key(&self) -> Result<QuestionKey<'_>, DataError> {
        let field = |field: &'static str| {
            self.get(field).ok_or_else(|| DataError::MissingField {
                field,
                location: self.location().to_string(),
            })
        };

        Ok(QuestionKey {
            question: field(QUESTION)?,
            answers: field(ANSWERS)?,
            correct_answers: field(CORRECT_ANSWERS)?,
        })
    }
}

impl From<Map<String, Value>> for RawQuestionData {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuestionKey<'a> {
    pub question: &'a Value,
    pub answers: &'a Value,
    pub correct_answers: &'a Value,
}

impl QuestionKey<'_> {
    /// Hash of the question and the ordered answers. Equal keys always
    /// share a fingerprint; `correct_answers` is left out and compared on
    /// lookup.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();

        hash_value(&mut hasher, self.question);
        hash_value(&mut hasher, self.answers);

        hasher.finalize()
    }

    pub fn question_text(&self) -> String {
        text(self.question)
    }

    /// All answers concatenated.
    pub fn answers_text(&self) -> String {
        match self.answers {
            Value::Array(answers) => answers.iter().map(text).collect(),
            other => text(other),
        }
    }

    /// The question followed by all answers, as compared by the
    /// near-duplicate pass.
    pub fn joined_text(&self) -> String {
        format!("{}{}", self.question_text(), self.answers_text())
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Feeds a value into the hasher so that equal values hash equally. Objects
/// only contribute their size since their equality ignores key order.
fn hash_value(hasher: &mut blake3::Hasher, value: &Value) {
    match value {
        Value::Null => {
            hasher.update(b"z");
        }
        Value::Bool(flag) => {
            hasher.update(&[b'b', *flag as u8]);
        }
        Value::Number(number) => {
            let number = number.to_string();
            hasher.update(b"n");
            hasher.update(&(number.len() as u64).to_le_bytes());
            hasher.update(number.as_bytes());
        }
        Value::String(text) => {
            hasher.update(b"s");
            hasher.update(&(text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
        Value::Array(items) => {
            hasher.update(b"a");
            hasher.update(&(items.len() as u64).to_le_bytes());

            for item in items {
                hash_value(hasher, item);
            }
        }
        Value::Object(map) => {
            hasher.update(b"o");
            hasher.update(&(map.len() as u64).to_le_bytes());
        }
    }
}

/// Where a record came from, as stamped by the normalizer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub source: Option<Value>,
    pub part: Option<Value>,
    pub question_number: Option<Value>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |value: &Option<Value>| value.as_ref().map_or_else(|| "?".to_owned(), text);

        write!(
            f,
            "{} {} {}",
            field(&self.source),
            field(&self.part),
            field(&self.question_number)
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> RawQuestionData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn keeps_every_field_in_file_order() {
        let raw = record(json!({
            "uuid": "id-1",
            "question": "Q1",
            "zeta": 1,
            "answers": ["A", "B"],
            "alpha": {"nested": true},
            "correct_answers": ["A"],
        }));

        assert_eq!(
            raw.fields().keys().collect::<Vec<_>>(),
            vec!["uuid", "question", "zeta", "answers", "alpha", "correct_answers"]
        );

        let text = serde_json::to_string(&raw).unwrap();
        assert!(text.starts_with(r#"{"uuid":"id-1","question":"Q1","zeta":1"#));
    }

    #[test]
    fn null_fields_survive_a_rewrite() {
        let raw = record(json!({
            "question": "Q1",
            "answers": ["A", "B"],
            "correct_answers": null,
            "uuid": null,
        }));

        let value = serde_json::to_value(&raw).unwrap();

        assert_eq!(value["correct_answers"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("uuid"));
        assert!(raw.lacks_uuid());
        assert_eq!(raw.key().unwrap().correct_answers, &Value::Null);
    }

    #[test]
    fn set_replaces_in_place_and_appends_new_fields() {
        let mut raw = record(json!({"part": "1", "question": "Q1"}));

        raw.set(PART, 4);
        raw.set(SOURCE, "awslagi");

        assert_eq!(
            serde_json::to_string(&raw).unwrap(),
            r#"{"part":4,"question":"Q1","source":"awslagi"}"#
        );
    }

    #[test]
    fn key_reports_missing_field() {
        let raw = record(json!({
            "question": "Q1",
            "correct_answers": ["A"],
            "source": "examtopics",
            "part": 3,
            "question_number": 7,
        }));

        match raw.key() {
            Err(DataError::MissingField { field, location }) => {
                assert_eq!(field, "answers");
                assert_eq!(location, "examtopics 3 7");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn fingerprint_is_sensitive_to_answer_order() {
        let question = json!("Q1");
        let correct = json!(["A"]);
        let answers = json!(["A", "B"]);
        let swapped = json!(["B", "A"]);

        let a = QuestionKey {
            question: &question,
            answers: &answers,
            correct_answers: &correct,
        };
        let b = QuestionKey {
            answers: &swapped,
            ..a
        };

        assert_ne!(a, b);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_separates_answer_boundaries() {
        let question = json!("Q");
        let correct = json!([]);
        let split = json!(["AB", "C"]);
        let moved = json!(["A", "BC"]);

        let a = QuestionKey {
            question: &question,
            answers: &split,
            correct_answers: &correct,
        };
        let b = QuestionKey {
            answers: &moved,
            ..a
        };

        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.joined_text(), b.joined_text());
    }

    #[test]
    fn fingerprint_ignores_object_key_order() {
        let question = json!({"text": "Q", "lang": "en"});
        let reordered = json!({"lang": "en", "text": "Q"});
        let answers = json!(["A"]);

        let a = QuestionKey {
            question: &question,
            answers: &answers,
            correct_answers: &answers,
        };
        let b = QuestionKey {
            question: &reordered,
            ..a
        };

        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn location_prints_placeholders() {
        let raw = record(json!({"source": "", "part": 2}));

        assert_eq!(raw.location().to_string(), " 2 ?");
    }
}
