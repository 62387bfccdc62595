use anyhow::Result;

use crate::data::QuizFile;
use crate::filename::{self, SourcePolicy};
use crate::provider::FileProvider;
use crate::raw_data::{PART, QUESTION_NUMBER, SOURCE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedFile {
    pub name: String,
    pub source: String,
    pub part: u64,
    pub question_count: usize,
}

/// Stamps `source`, `part` and `question_number` on every question of every
/// `.json` file in `input` and writes each file under the same name to
/// `output`. Stops at the first file that fails.
pub fn normalize(
    input: &dyn FileProvider,
    output: &dyn FileProvider,
    policy: SourcePolicy,
) -> Result<Vec<NormalizedFile>> {
    let mut normalized = Vec::new();

    for name in input.file_names()? {
        if !filename::is_question_file(&name) {
            tracing::debug!("skipping {name}");
            continue;
        }

        let mut file = QuizFile::load(input, &name)?;
        let report = stamp(&mut file, policy)?;
        file.write(output)?;

        tracing::info!(
            "normalized {name}: source={:?} part={} questions={}",
            report.source,
            report.part,
            report.question_count
        );

        normalized.push(report);
    }

    Ok(normalized)
}

/// Overwrites the provenance of every question with what the file name says.
pub fn stamp(file: &mut QuizFile, policy: SourcePolicy) -> Result<NormalizedFile> {
    let source = policy.source(&file.name);
    let part = filename::part(&file.name)?;

    for (index, question) in file.questions.iter_mut().enumerate() {
        question.set(SOURCE, source.clone());
        question.set(PART, part);
        question.set(QUESTION_NUMBER, index + 1);
    }

    Ok(NormalizedFile {
        name: file.name.clone(),
        source,
        part,
        question_count: file.questions.len(),
    })
}
