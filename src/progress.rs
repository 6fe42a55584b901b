use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// Fixed Monday..Friday history
    #[default]
    Weekly,
    /// Steadily improving days ending with the latest score
    Trailing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub label: String,
    pub score: u8,
}

impl ProgressPoint {
    pub fn new(label: impl Into<String>, score: u8) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Simulated practice history shown under the results. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSeries {
    pub points: Vec<ProgressPoint>,
}

impl ProgressSeries {
    pub fn for_mode(mode: ProgressMode, latest: u8) -> Self {
        match mode {
            ProgressMode::Weekly => Self::weekly(),
            ProgressMode::Trailing => Self::trailing(latest),
        }
    }

    pub fn weekly() -> Self {
        let points = ["Mon", "Tue", "Wed", "Thu", "Fri"]
            .into_iter()
            .zip([65, 72, 68, 85, 88])
            .map(|(day, score)| ProgressPoint::new(day, score))
            .collect();
        Self { points }
    }

    pub fn trailing(latest: u8) -> Self {
        let points = [60, 65, 70, 75, latest.min(100)]
            .into_iter()
            .enumerate()
            .map(|(i, score)| ProgressPoint::new((i + 1).to_string(), score))
            .collect();
        Self { points }
    }

    /// (x, y) pairs for a line chart, x starting at 1
    pub fn coords(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| ((i + 1) as f64, p.score as f64))
            .collect()
    }

    pub fn average(&self) -> Option<f64> {
        match self.points.len() {
            0 => None,
            n => Some(self.points.iter().map(|p| p.score as f64).sum::<f64>() / n as f64),
        }
    }

    pub fn best(&self) -> Option<u8> {
        self.points.iter().map(|p| p.score).max()
    }
}
