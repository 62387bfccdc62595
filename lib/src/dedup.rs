use std::collections::HashMap;

use anyhow::Result;

use crate::data::{to_json_pretty, QuizFile};
use crate::filename;
use crate::provider::FileProvider;
use crate::raw_data::{Location, RawQuestionData};

/// A question dropped because an earlier one had the same text, answers and
/// correct answers.
#[derive(Clone, Debug, PartialEq)]
pub struct DuplicateReport {
    pub question: String,
    pub original: Location,
    pub duplicate: Location,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DedupOutcome {
    /// First occurrences, in candidate order.
    pub unique: Vec<RawQuestionData>,
    pub duplicates: Vec<DuplicateReport>,
    pub total: usize,
}

impl DedupOutcome {
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }

    /// Retained questions whose `uuid` also appears on an earlier retained
    /// question.
    pub fn uuid_collisions(&self) -> Vec<(Location, Location, &str)> {
        let mut seen: HashMap<&str, &RawQuestionData> = HashMap::new();
        let mut collisions = Vec::new();

        for question in &self.unique {
            let Some(uuid) = question.uuid() else {
                continue;
            };

            match seen.get(uuid) {
                Some(first) => collisions.push((first.location(), question.location(), uuid)),
                None => {
                    seen.insert(uuid, question);
                }
            }
        }

        collisions
    }
}

/// Concatenates the questions of every `.json` file, files in provider order
/// and questions in file order.
pub fn load_candidates(provider: &dyn FileProvider) -> Result<Vec<RawQuestionData>> {
    let mut candidates = Vec::new();

    for name in provider.file_names()? {
        if !filename::is_question_file(&name) {
            continue;
        }

        let file = QuizFile::load(provider, &name)?;
        tracing::debug!("{name}: {} candidates", file.questions.len());
        candidates.extend(file.questions);
    }

    Ok(candidates)
}

/// Keeps the first of every group of exact duplicates.
///
/// Fails if any candidate lacks `question`, `answers` or `correct_answers`.
pub fn deduplicate(candidates: Vec<RawQuestionData>) -> Result<DedupOutcome> {
    let total = candidates.len();
    let step = (total / 10).max(1);

    let mut unique: Vec<RawQuestionData> = Vec::new();
    let mut duplicates = Vec::new();
    let mut buckets: HashMap<blake3::Hash, Vec<usize>> = HashMap::new();

    for (index, candidate) in candidates.into_iter().enumerate() {
        if index % step == 0 {
            tracing::info!("scanning questions: {index}/{total}");
        }

        let key = candidate.key()?;
        let bucket = buckets.entry(key.fingerprint()).or_default();

        let original = bucket
            .iter()
            .map(|&position| &unique[position])
            .find(|existing| existing.key().map_or(false, |existing| existing == key));

        match original {
            Some(original) => {
                duplicates.push(DuplicateReport {
                    question: key.question_text(),
                    original: original.location(),
                    duplicate: candidate.location(),
                });
            }
            None => {
                bucket.push(unique.len());
                unique.push(candidate);
            }
        }
    }

    tracing::info!("scanning questions: {total}/{total}");

    Ok(DedupOutcome {
        unique,
        duplicates,
        total,
    })
}

pub fn write_consolidated(
    outcome: &DedupOutcome,
    provider: &dyn FileProvider,
    file_name: &str,
) -> Result<()> {
    provider.write(file_name, to_json_pretty(&outcome.unique)?)
}
