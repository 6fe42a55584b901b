use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::ErrorTable,
    difficulty::{DifficultyLevel, DifficultyProfile},
};

/// How a recognized word came to differ from its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Replaced by a variant from the error table
    Substitution,
    /// Word unknown to the table, garbled with a trailing sound
    Suffix,
}

/// Fallback mutation for words the error table does not know
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixMutation {
    /// Multiplier applied to the difficulty probability
    pub scale: f64,
    pub suffixes: Vec<String>,
}

impl Default for SuffixMutation {
    fn default() -> Self {
        Self {
            scale: 0.5,
            suffixes: vec!["e".to_string(), "u".to_string()],
        }
    }
}

/// Fabricates a recognizer transcript from the target words
#[derive(Debug, Clone)]
pub struct Simulator {
    table: ErrorTable,
    profile: DifficultyProfile,
    suffix: Option<SuffixMutation>,
}

impl Simulator {
    pub fn new(table: ErrorTable, profile: DifficultyProfile) -> Self {
        Self {
            table,
            profile,
            suffix: Some(SuffixMutation::default()),
        }
    }

    pub fn with_suffix(mut self, suffix: Option<SuffixMutation>) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn simulate<R: Rng + ?Sized>(
        &self,
        target: &[String],
        difficulty: DifficultyLevel,
        rng: &mut R,
    ) -> Vec<String> {
        self.simulate_outcomes(target, difficulty, rng)
            .into_iter()
            .map(|(word, _)| word)
            .collect()
    }

    /// One recognized word per target word, tagged with what happened to it.
    /// Every word gets exactly one uniform draw, plus one more to pick the
    /// replacement when it mutates.
    pub fn simulate_outcomes<R: Rng + ?Sized>(
        &self,
        target: &[String],
        difficulty: DifficultyLevel,
        rng: &mut R,
    ) -> Vec<(String, Option<ErrorKind>)> {
        let probability = self.profile.probability(difficulty);

        target
            .iter()
            .map(|word| {
                let roll: f64 = rng.gen();
                match self.table.variants(word) {
                    Some(variants) if roll < probability => match variants.choose(rng) {
                        Some(variant) => (variant.clone(), Some(ErrorKind::Substitution)),
                        None => (word.clone(), None),
                    },
                    Some(_) => (word.clone(), None),
                    None => self.mutate_suffix(word, roll, probability, rng),
                }
            })
            .collect()
    }

    fn mutate_suffix<R: Rng + ?Sized>(
        &self,
        word: &str,
        roll: f64,
        probability: f64,
        rng: &mut R,
    ) -> (String, Option<ErrorKind>) {
        match &self.suffix {
            Some(suffix) if roll < probability * suffix.scale => match suffix.suffixes.choose(rng) {
                Some(ending) => (format!("{word}{ending}"), Some(ErrorKind::Suffix)),
                None => (word.to_string(), None),
            },
            _ => (word.to_string(), None),
        }
    }
}
