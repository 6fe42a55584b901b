use rand::Rng;

use crate::{
    catalog::Phrase,
    difficulty::DifficultyLevel,
    scorer::{self, AnalysisResult},
    simulator::Simulator,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub phrase: Phrase,
    pub difficulty: DifficultyLevel,
}

/// Simulate a recording of the requested phrase and score it
pub fn analyze<R: Rng + ?Sized>(
    request: &AnalysisRequest,
    simulator: &Simulator,
    rng: &mut R,
) -> AnalysisResult {
    let target = request.phrase.words();
    let simulated = simulator.simulate_outcomes(&target, request.difficulty, rng);
    let recognized: Vec<String> = simulated.iter().map(|(w, _)| w.clone()).collect();

    let mut result = scorer::score(&target, &recognized, request.difficulty);
    result.phrase = request.phrase.text.clone();
    for (outcome, (_, kind)) in result.outcomes.iter_mut().zip(simulated) {
        if !outcome.correct {
            outcome.error_kind = kind;
        }
    }

    log::debug!(
        "analyzed {:?} at {}: {} ({}%)",
        request.phrase.label,
        request.difficulty,
        result.recognized_text,
        result.score
    );

    result
}

/// Per-session state handed to rendering on every redraw
#[derive(Debug, Clone)]
pub struct SessionState {
    pub request: AnalysisRequest,
    pub recorded: bool,
    pub result: Option<AnalysisResult>,
}

impl SessionState {
    pub fn new(request: AnalysisRequest) -> Self {
        Self {
            request,
            recorded: false,
            result: None,
        }
    }

    /// A new recording invalidates the previous result
    pub fn start_recording(&mut self) {
        self.recorded = true;
        self.result = None;
    }

    pub fn finish(&mut self, result: AnalysisResult) {
        self.result = Some(result);
    }

    pub fn select_phrase(&mut self, phrase: Phrase) {
        if phrase != self.request.phrase {
            self.request.phrase = phrase;
            self.clear();
        }
    }

    pub fn select_difficulty(&mut self, difficulty: DifficultyLevel) {
        if difficulty != self.request.difficulty {
            self.request.difficulty = difficulty;
            self.clear();
        }
    }

    fn clear(&mut self) {
        self.recorded = false;
        self.result = None;
    }
}
