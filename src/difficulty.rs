use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, TutorError};

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn harder(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium | Self::Hard => Self::Hard,
        }
    }

    pub fn easier(self) -> Self {
        match self {
            Self::Hard => Self::Medium,
            Self::Medium | Self::Easy => Self::Easy,
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = TutorError;

    /// Accepts the English names as well as the labels of the original
    /// Spanish-language demo.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "fácil" | "facil" => Ok(Self::Easy),
            "medium" | "media" => Ok(Self::Medium),
            "hard" | "difícil" | "dificil" => Ok(Self::Hard),
            _ => Err(TutorError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Substitution probability for each difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self {
            easy: 0.2,
            medium: 0.4,
            hard: 0.6,
        }
    }
}

impl DifficultyProfile {
    /// Profile that never introduces errors
    pub fn flawless() -> Self {
        Self {
            easy: 0.0,
            medium: 0.0,
            hard: 0.0,
        }
    }

    pub fn probability(&self, level: DifficultyLevel) -> f64 {
        match level {
            DifficultyLevel::Easy => self.easy,
            DifficultyLevel::Medium => self.medium,
            DifficultyLevel::Hard => self.hard,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for level in DifficultyLevel::ALL {
            let value = self.probability(level);
            if !(0.0..=1.0).contains(&value) {
                return Err(TutorError::InvalidProbability { level, value });
            }
        }
        Ok(())
    }
}
