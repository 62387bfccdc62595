use crate::error::DataError;

/// How the provenance tag is derived from a file name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourcePolicy {
    /// `_part` files are `awslagi`, `examtopics` files are `examtopics`,
    /// anything else gets an empty tag.
    #[default]
    Classify,
    /// Everything before the first `-`.
    Prefix,
}

impl SourcePolicy {
    pub fn source(self, file_name: &str) -> String {
        match self {
            Self::Classify => {
                if file_name.contains("_part") {
                    "awslagi".to_owned()
                } else if file_name.contains("examtopics") {
                    "examtopics".to_owned()
                } else {
                    String::new()
                }
            }
            Self::Prefix => file_name
                .split_once('-')
                .map_or(file_name, |(prefix, _)| prefix)
                .to_owned(),
        }
    }
}

/// Concatenates every digit of the file name and reads it as a number.
pub fn part(file_name: &str) -> Result<u64, DataError> {
    let digits = file_name
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();

    digits.parse().map_err(|_| DataError::Format {
        file: file_name.to_owned(),
    })
}

pub fn is_question_file(file_name: &str) -> bool {
    file_name.contains(".json")
}
