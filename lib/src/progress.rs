use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::DataError;

/// The part of a quiz progress file that records answered questions.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ProgressData {
    pub already_answered_uuids: Vec<String>,
}

impl ProgressData {
    pub fn load(path: &Path) -> Result<Self> {
        let raw_data =
            fs::read(path).with_context(|| format!("could not read {}", path.display()))?;

        Self::from_slice(&path.display().to_string(), &raw_data)
    }

    fn from_slice(name: &str, raw_data: &[u8]) -> Result<Self> {
        let progress: Self = serde_json::from_slice(raw_data).map_err(|source| DataError::Parse {
            file: name.to_owned(),
            source,
        })?;

        Ok(progress)
    }

    /// Every uuid that was answered more than once, in order of its second
    /// appearance.
    pub fn repeated_uuids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        self.already_answered_uuids
            .iter()
            .map(String::as_str)
            .filter(|uuid| !seen.insert(*uuid) && reported.insert(*uuid))
            .collect()
    }
}
