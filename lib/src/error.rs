use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum DataError {
    /// The file content is not a JSON array of question records.
    Parse {
        file: String,
        source: serde_json::Error,
    },
    /// The file name has no digits to derive a part number from.
    Format { file: String },
    /// A record lacks one of the fields compared during deduplication.
    MissingField {
        field: &'static str,
        location: String,
    },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { file, source } => write!(f, "could not parse {file}: {source}"),
            Self::Format { file } => {
                write!(f, "file name {file} does not contain a valid part number")
            }
            Self::MissingField { field, location } => {
                write!(f, "question at {location} has no `{field}` field")
            }
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
