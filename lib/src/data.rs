use anyhow::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

use crate::error::DataError;
use crate::provider::FileProvider;
use crate::raw_data::RawQuestionData;

/// The questions of one file, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizFile {
    pub name: String,

    pub questions: Vec<RawQuestionData>,
}

impl QuizFile {
    pub fn new(name: String, questions: Vec<RawQuestionData>) -> Self {
        Self { name, questions }
    }

    pub fn load(provider: &dyn FileProvider, name: &str) -> Result<Self> {
        let raw_data = provider.read(name)?;
        let questions = Self::from_slice(name, &raw_data[..])?;

        tracing::debug!("loaded {} questions from {name}", questions.len());

        Ok(Self::new(name.to_owned(), questions))
    }

    pub fn write(&self, provider: &dyn FileProvider) -> Result<()> {
        provider.write(&self.name, to_json_pretty(&self.questions)?)
    }

    fn from_slice(name: &str, raw_data: &[u8]) -> Result<Vec<RawQuestionData>, DataError> {
        serde_json::from_slice(raw_data).map_err(|source| DataError::Parse {
            file: name.to_owned(),
            source,
        })
    }
}

/// Pretty JSON with four space indentation. Non-ASCII text is written as is.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));

    value.serialize(&mut serializer)?;

    Ok(String::from_utf8(buffer)?)
}
