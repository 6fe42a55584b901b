use chrono::{DateTime, Local};
use itertools::{EitherOrBoth, Itertools};
use serde::{Deserialize, Serialize};

use crate::{difficulty::DifficultyLevel, simulator::ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    KeepPracticing,
}

impl FeedbackTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Excellent,
            70..=89 => Self::Good,
            _ => Self::KeepPracticing,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! Your pronunciation is almost perfect.",
            Self::Good => "Good job, but there are a few details to polish.",
            Self::KeepPracticing => "Keep practicing. Pay attention to the difficult sounds.",
        }
    }
}

pub fn feedback_tier(score: u8) -> FeedbackTier {
    FeedbackTier::from_score(score)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOutcome {
    pub target: String,
    pub recognized: String,
    pub correct: bool,
    pub error_kind: Option<ErrorKind>,
}

/// Outcome of one simulated recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub phrase: String,
    pub difficulty: DifficultyLevel,
    pub recognized_text: String,
    pub score: u8,
    pub correct: usize,
    pub total: usize,
    pub outcomes: Vec<WordOutcome>,
    pub feedback: FeedbackTier,
    pub timestamp: DateTime<Local>,
}

impl AnalysisResult {
    /// e.g. `"3/4"`
    pub fn correct_words(&self) -> String {
        format!("{}/{}", self.correct, self.total)
    }

    pub fn mistakes(&self) -> impl Iterator<Item = &WordOutcome> {
        self.outcomes.iter().filter(|o| !o.correct)
    }
}

/// Truncating percentage; an empty phrase scores 0
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (correct.min(total) * 100 / total) as u8
}

pub fn score(target: &[String], recognized: &[String], difficulty: DifficultyLevel) -> AnalysisResult {
    score_at(target, recognized, difficulty, Local::now())
}

pub fn score_at(
    target: &[String],
    recognized: &[String],
    difficulty: DifficultyLevel,
    at: DateTime<Local>,
) -> AnalysisResult {
    let outcomes: Vec<WordOutcome> = target
        .iter()
        .zip_longest(recognized)
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(t, r) => Some(WordOutcome {
                target: t.clone(),
                recognized: r.clone(),
                correct: t == r,
                error_kind: None,
            }),
            EitherOrBoth::Left(t) => Some(WordOutcome {
                target: t.clone(),
                recognized: String::new(),
                correct: false,
                error_kind: None,
            }),
            EitherOrBoth::Right(_) => None,
        })
        .collect();

    let correct = outcomes.iter().filter(|o| o.correct).count();
    let total = target.len();
    let score = percentage(correct, total);

    AnalysisResult {
        phrase: target.join(" "),
        difficulty,
        recognized_text: recognized.iter().join(" "),
        score,
        correct,
        total,
        outcomes,
        feedback: FeedbackTier::from_score(score),
        timestamp: at,
    }
}
