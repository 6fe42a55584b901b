use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, TutorError};

/// Common mispronunciations keyed by lowercase word
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ErrorTable {
    pub fn embedded() -> Result<Self> {
        Self::from_json(super::embedded("error_table.json")?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(data)?;
        Self::from_entries(raw)
    }

    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: AsRef<str>,
    {
        let mut table = BTreeMap::new();
        for (word, variants) in entries {
            let word = word.as_ref().trim().to_lowercase();
            if variants.is_empty() {
                return Err(TutorError::EmptyVariants(word));
            }
            if table.contains_key(&word) {
                return Err(TutorError::DuplicateWord(word));
            }
            table.insert(word, variants);
        }
        Ok(Self { entries: table })
    }

    pub fn variants(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
