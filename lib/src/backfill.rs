use anyhow::Result;
use uuid::Uuid;

use crate::data::QuizFile;
use crate::filename;
use crate::provider::FileProvider;
use crate::raw_data::UUID;

/// Gives every question whose `uuid` is absent or `null` a fresh v4 one and
/// writes each file back in place. Existing ids are never touched.
///
/// Returns the number of ids that were assigned.
pub fn backfill_uuids(provider: &dyn FileProvider) -> Result<usize> {
    let mut assigned = 0;

    for name in provider.file_names()? {
        if !filename::is_question_file(&name) {
            continue;
        }

        let mut file = QuizFile::load(provider, &name)?;
        let count = assign_missing(&mut file);
        file.write(provider)?;

        if count > 0 {
            tracing::info!("assigned {count} uuids in {name}");
        }

        assigned += count;
    }

    Ok(assigned)
}

fn assign_missing(file: &mut QuizFile) -> usize {
    let mut count = 0;

    for question in file.questions.iter_mut().filter(|q| q.lacks_uuid()) {
        question.set(UUID, Uuid::new_v4().to_string());
        count += 1;
    }

    count
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::provider::MemoryProvider;

    fn uuids(provider: &MemoryProvider, name: &str) -> Vec<String> {
        let questions: Value = serde_json::from_slice(&provider.get(name).unwrap()).unwrap();

        questions
            .as_array()
            .unwrap()
            .iter()
            .map(|question| question["uuid"].as_str().unwrap().to_owned())
            .collect()
    }

    #[test]
    fn fills_only_missing_ids() {
        let provider = MemoryProvider::new().with_file(
            "a1.json",
            r#"[{"question":"Q1","uuid":"existing"},{"question":"Q2"}]"#,
        );

        assert_eq!(backfill_uuids(&provider).unwrap(), 1);

        let ids = uuids(&provider, "a1.json");
        assert_eq!(ids[0], "existing");
        let generated = Uuid::parse_str(&ids[1]).unwrap();
        assert_eq!(generated.get_version_num(), 4);
    }

    #[test]
    fn null_and_non_string_ids() {
        let provider = MemoryProvider::new().with_file(
            "a1.json",
            r#"[{"question":"Q1","uuid":null},{"question":"Q2","uuid":42}]"#,
        );

        assert_eq!(backfill_uuids(&provider).unwrap(), 1);

        let questions: Value = serde_json::from_slice(&provider.get("a1.json").unwrap()).unwrap();
        assert!(Uuid::parse_str(questions[0]["uuid"].as_str().unwrap()).is_ok());
        assert_eq!(questions[1]["uuid"], 42);
    }

    #[test]
    fn second_run_changes_nothing() {
        let provider = MemoryProvider::new()
            .with_file("a1.json", r#"[{"question":"Q1"},{"question":"Q2"}]"#)
            .with_file("b2.json", r#"[{"question":"Q3"}]"#)
            .with_file("notes.txt", "untouched");

        assert_eq!(backfill_uuids(&provider).unwrap(), 3);
        let first_a = provider.get("a1.json").unwrap();
        let first_b = provider.get("b2.json").unwrap();

        assert_eq!(backfill_uuids(&provider).unwrap(), 0);
        assert_eq!(provider.get("a1.json").unwrap(), first_a);
        assert_eq!(provider.get("b2.json").unwrap(), first_b);
        assert_eq!(provider.get("notes.txt").unwrap(), b"untouched");

        let ids = uuids(&provider, "a1.json");
        assert_ne!(ids[0], ids[1]);
    }
}
