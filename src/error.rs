use thiserror::Error;

use crate::difficulty::DifficultyLevel;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("phrase has no words to practice")]
    EmptyPhrase,

    #[error("no phrase named or numbered `{0}` in the catalog")]
    UnknownPhrase(String),

    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("error probability for {level} must be within 0..=1, got {value}")]
    InvalidProbability { level: DifficultyLevel, value: f64 },

    #[error("error table entry `{0}` has no variants")]
    EmptyVariants(String),

    #[error("error table lists `{0}` more than once")]
    DuplicateWord(String),

    #[error("unable to parse catalog data: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TutorError>;
