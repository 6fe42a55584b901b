use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorError};

/// A sentence the learner is asked to pronounce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub label: String,
    pub text: String,
}

impl Phrase {
    /// Build a phrase from free text, rejecting text without any words
    pub fn custom(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.split_whitespace().next().is_none() {
            return Err(TutorError::EmptyPhrase);
        }

        Ok(Self {
            label: "Custom".to_string(),
            text: text.to_string(),
        })
    }

    /// Lowercased words compared during scoring
    pub fn words(&self) -> Vec<String> {
        self.text
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct PhraseCatalog {
    pub name: String,
    phrases: Vec<Phrase>,
}

impl PhraseCatalog {
    pub fn embedded() -> Result<Self> {
        Self::from_json(super::embedded("phrases.json")?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(data)?;
        if catalog.phrases.is_empty() {
            return Err(TutorError::EmptyPhrase);
        }
        Ok(catalog)
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Phrase> {
        self.phrases.get(idx)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.phrases
            .iter()
            .position(|p| p.label.eq_ignore_ascii_case(label.trim()))
    }

    /// Look up a phrase by label (case-insensitive) or by 0-based index
    pub fn find(&self, key: &str) -> Result<(usize, &Phrase)> {
        let idx = self
            .position(key)
            .or_else(|| key.trim().parse::<usize>().ok().filter(|&i| i < self.len()))
            .ok_or_else(|| TutorError::UnknownPhrase(key.to_string()))?;

        Ok((idx, &self.phrases[idx]))
    }
}
