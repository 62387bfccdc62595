use std::fs;

use quiz_dedup::{
    backfill_uuids, deduplicate, load_candidates, normalize, write_consolidated, DirProvider,
    FileProvider, SourcePolicy,
};
use serde_json::Value;
use tempfile::tempdir;

const RECORD: &str = r#"[
    {"question": "Welche Größe?", "answers": ["A. eins", "B. zwei"], "correct_answers": ["A"]}
]"#;

#[test]
fn lists_files_sorted_and_skips_directories() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b-2.json"), "[]").unwrap();
    fs::write(dir.path().join("a-1.json"), "[]").unwrap();
    fs::create_dir(dir.path().join("nested.json")).unwrap();

    let provider = DirProvider::new(dir.path());

    assert_eq!(provider.file_names().unwrap(), vec!["a-1.json", "b-2.json"]);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let provider = DirProvider::new(dir.path().join("absent"));

    assert!(provider.file_names().is_err());
}

#[test]
fn raw_files_become_one_consolidated_file() {
    let raw = tempdir().unwrap();
    let normalized = tempdir().unwrap();
    fs::write(raw.path().join("examtopics-part1.json"), RECORD).unwrap();
    fs::write(raw.path().join("clf_part2.json"), RECORD).unwrap();
    fs::write(raw.path().join("notes.txt"), "skip").unwrap();

    let raw_provider = DirProvider::new(raw.path());
    assert_eq!(backfill_uuids(&raw_provider).unwrap(), 2);

    let normalized_provider = DirProvider::create(normalized.path().join("jsonnew")).unwrap();
    let reports = normalize(&raw_provider, &normalized_provider, SourcePolicy::Classify).unwrap();
    assert_eq!(reports.len(), 2);

    let outcome = deduplicate(load_candidates(&normalized_provider).unwrap()).unwrap();
    assert_eq!(outcome.total, 2);
    assert_eq!(outcome.duplicate_count(), 1);
    assert_eq!(outcome.duplicates[0].original.to_string(), "awslagi 2 1");
    assert_eq!(outcome.duplicates[0].duplicate.to_string(), "examtopics 1 1");

    let output = DirProvider::new(normalized.path());
    write_consolidated(&outcome, &output, "all.json").unwrap();

    let text = fs::read_to_string(normalized.path().join("all.json")).unwrap();
    assert!(text.contains("Welche Größe?"));
    assert!(text.starts_with("[\n    {\n        \"question\""));
    assert!(text.ends_with("]\n"));

    let all: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(all[0]["source"], "awslagi");
    assert_eq!(all[0]["part"], 2);
    assert_eq!(all[0]["question_number"], 1);
    assert!(all[0]["uuid"].is_string());

    let raw_text = fs::read_to_string(raw.path().join("clf_part2.json")).unwrap();
    assert!(!raw_text.contains("\"source\""));
}
