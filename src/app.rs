use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use crate::{
    catalog::Phrase,
    difficulty::DifficultyLevel,
    progress::{ProgressMode, ProgressSeries},
    runtime::TutorEvent,
    session::{self, AnalysisRequest, SessionState},
    simulator::Simulator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Practice,
    Processing,
    Results,
    About,
}

/// Everything needed to start the tutor, resolved from CLI flags and config
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub phrases: Vec<Phrase>,
    pub selected: usize,
    pub difficulty: DifficultyLevel,
    pub simulator: Simulator,
    pub processing_delay: Duration,
    pub progress: ProgressMode,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub struct App {
    pub phrases: Vec<Phrase>,
    pub selected: usize,
    pub session: SessionState,
    pub state: AppState,
    /// One-line notice under the practice box
    pub status: Option<String>,
    pub processing_delay: Duration,
    pub processing_remaining: Duration,
    pub progress: ProgressMode,
    pub should_quit: bool,
    simulator: Simulator,
    rng: StdRng,
}

impl App {
    /// `settings.phrases` must not be empty
    pub fn new(settings: AppSettings) -> Self {
        let selected = settings.selected.min(settings.phrases.len().saturating_sub(1));
        let phrase = settings
            .phrases
            .get(selected)
            .cloned()
            .unwrap_or_else(|| Phrase {
                label: String::new(),
                text: String::new(),
            });
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            session: SessionState::new(AnalysisRequest {
                phrase,
                difficulty: settings.difficulty,
            }),
            phrases: settings.phrases,
            selected,
            state: AppState::Practice,
            status: None,
            processing_delay: settings.processing_delay,
            processing_remaining: Duration::ZERO,
            progress: settings.progress,
            should_quit: false,
            simulator: settings.simulator,
            rng,
        }
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.session.request.difficulty
    }

    pub fn current_phrase(&self) -> &Phrase {
        &self.session.request.phrase
    }

    pub fn progress_series(&self) -> Option<ProgressSeries> {
        self.session
            .result
            .as_ref()
            .map(|r| ProgressSeries::for_mode(self.progress, r.score))
    }

    pub fn select_next_phrase(&mut self) {
        if !self.phrases.is_empty() {
            self.select_phrase((self.selected + 1) % self.phrases.len());
        }
    }

    pub fn select_previous_phrase(&mut self) {
        if !self.phrases.is_empty() {
            let len = self.phrases.len();
            self.select_phrase((self.selected + len - 1) % len);
        }
    }

    fn select_phrase(&mut self, idx: usize) {
        self.selected = idx;
        self.session.select_phrase(self.phrases[idx].clone());
        self.status = None;
    }

    pub fn set_difficulty(&mut self, difficulty: DifficultyLevel) {
        self.session.select_difficulty(difficulty);
        self.status = None;
    }

    pub fn listen(&mut self) {
        self.status = Some(format!(
            "Playing model pronunciation of \"{}\"...",
            self.current_phrase().text
        ));
    }

    /// Begin a simulated recording; the result arrives after the processing delay
    pub fn record(&mut self) {
        self.session.start_recording();
        self.status = None;
        self.processing_remaining = self.processing_delay;
        self.state = AppState::Processing;
        if self.processing_remaining.is_zero() {
            self.finish_processing();
        }
    }

    /// Apply one runner event. `elapsed` is the wall time since the previous
    /// event of any kind, so keys and resizes still advance processing.
    pub fn handle(&mut self, event: TutorEvent, elapsed: Duration) {
        if let TutorEvent::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.on_key(key);
            }
        }
        self.on_tick(elapsed);
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if self.state == AppState::Processing {
            self.processing_remaining = self.processing_remaining.saturating_sub(elapsed);
            if self.processing_remaining.is_zero() {
                self.finish_processing();
            }
        }
    }

    fn finish_processing(&mut self) {
        let result = session::analyze(&self.session.request, &self.simulator, &mut self.rng);
        log::info!(
            "scored {} on {:?} ({})",
            result.score,
            self.session.request.phrase.label,
            result.correct_words()
        );
        self.session.finish(result);
        self.state = AppState::Results;
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Esc && self.state != AppState::About {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Practice => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.select_previous_phrase(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next_phrase(),
                KeyCode::Left | KeyCode::Char('h') => self.set_difficulty(self.difficulty().easier()),
                KeyCode::Right => self.set_difficulty(self.difficulty().harder()),
                KeyCode::Char('1') => self.set_difficulty(DifficultyLevel::Easy),
                KeyCode::Char('2') => self.set_difficulty(DifficultyLevel::Medium),
                KeyCode::Char('3') => self.set_difficulty(DifficultyLevel::Hard),
                KeyCode::Char('l') => self.listen(),
                KeyCode::Enter | KeyCode::Char('r') => self.record(),
                KeyCode::Char('a') => self.state = AppState::About,
                _ => {}
            },
            // input is ignored while the recording is "processed"
            AppState::Processing => {}
            AppState::Results => match key.code {
                KeyCode::Char('r') => self.record(),
                KeyCode::Char('n') | KeyCode::Backspace => self.state = AppState::Practice,
                KeyCode::Char('a') => self.state = AppState::About,
                _ => {}
            },
            AppState::About => {
                self.state = if self.session.result.is_some() {
                    AppState::Results
                } else {
                    AppState::Practice
                };
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        catalog::{ErrorTable, PhraseCatalog},
        difficulty::DifficultyProfile,
    };

    pub(crate) fn settings(delay_ms: u64) -> AppSettings {
        AppSettings {
            phrases: PhraseCatalog::embedded().unwrap().phrases().to_vec(),
            selected: 0,
            difficulty: DifficultyLevel::Easy,
            simulator: Simulator::new(ErrorTable::embedded().unwrap(), DifficultyProfile::default()),
            processing_delay: Duration::from_millis(delay_ms),
            progress: ProgressMode::Weekly,
            seed: Some(7),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(settings(2000));

        assert_eq!(app.state, AppState::Practice);
        assert_eq!(app.current_phrase().label, "Basic greeting");
        assert_eq!(app.difficulty(), DifficultyLevel::Easy);
        assert!(!app.session.recorded);
        assert!(app.progress_series().is_none());
    }

    #[test]
    fn test_app_new_clamps_selection() {
        let mut s = settings(0);
        s.selected = 99;
        let app = App::new(s);
        assert_eq!(app.selected, 3);
        assert_eq!(app.current_phrase().label, "Thanks");
    }

    #[test]
    fn test_phrase_navigation_wraps() {
        let mut app = App::new(settings(0));

        app.on_key(key(KeyCode::Up));
        assert_eq!(app.selected, 3);
        app.on_key(key(KeyCode::Down));
        assert_eq!(app.selected, 0);
        app.on_key(key(KeyCode::Char('j')));
        assert_eq!(app.current_phrase().text, "Good morning how are you");
    }

    #[test]
    fn test_difficulty_keys() {
        let mut app = App::new(settings(0));

        app.on_key(key(KeyCode::Right));
        assert_eq!(app.difficulty(), DifficultyLevel::Medium);
        app.on_key(key(KeyCode::Right));
        app.on_key(key(KeyCode::Right));
        assert_eq!(app.difficulty(), DifficultyLevel::Hard);
        app.on_key(key(KeyCode::Char('1')));
        assert_eq!(app.difficulty(), DifficultyLevel::Easy);
        app.on_key(key(KeyCode::Left));
        assert_eq!(app.difficulty(), DifficultyLevel::Easy);
    }

    #[test]
    fn test_record_waits_for_processing_delay() {
        let mut app = App::new(settings(250));

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Processing);
        assert!(app.session.recorded);

        // keys are ignored while processing
        app.on_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Processing);

        app.on_tick(Duration::from_millis(100));
        app.on_tick(Duration::from_millis(100));
        assert_eq!(app.state, AppState::Processing);
        assert!(app.session.result.is_none());

        app.on_tick(Duration::from_millis(100));
        assert_eq!(app.state, AppState::Results);
        let result = app.session.result.as_ref().unwrap();
        assert_eq!(result.total, 5);
        assert!(result.score <= 100);
        assert!(app.progress_series().is_some());
    }

    #[test]
    fn test_non_tick_events_advance_processing() {
        let mut app = App::new(settings(250));
        app.record();

        // a held key keeps the runner from ever timing out into a tick
        for _ in 0..2 {
            app.handle(TutorEvent::Key(key(KeyCode::Char('x'))), Duration::from_millis(100));
        }
        assert_eq!(app.state, AppState::Processing);
        app.handle(TutorEvent::Resize, Duration::from_millis(100));
        assert_eq!(app.state, AppState::Results);
    }

    #[test]
    fn test_handle_ignores_key_releases() {
        let mut app = App::new(settings(0));
        let mut release = key(KeyCode::Down);
        release.kind = KeyEventKind::Release;

        app.handle(TutorEvent::Key(release), Duration::ZERO);
        assert_eq!(app.selected, 0);
        app.handle(TutorEvent::Key(key(KeyCode::Down)), Duration::ZERO);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_zero_delay_records_immediately() {
        let mut app = App::new(settings(0));
        app.record();
        assert_eq!(app.state, AppState::Results);
    }

    #[test]
    fn test_results_navigation() {
        let mut app = App::new(settings(0));
        app.record();

        app.on_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Practice);
        assert!(app.session.result.is_some());

        app.on_key(key(KeyCode::Down));
        assert!(app.session.result.is_none());
        assert_eq!(app.selected, 1);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Results);
        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Results);
    }

    #[test]
    fn test_about_returns_to_previous_screen() {
        let mut app = App::new(settings(0));

        app.on_key(key(KeyCode::Char('a')));
        assert_eq!(app.state, AppState::About);
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Practice);
        assert!(!app.should_quit);

        app.record();
        app.on_key(key(KeyCode::Char('a')));
        app.on_key(key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Results);
    }

    #[test]
    fn test_listen_sets_status() {
        let mut app = App::new(settings(0));
        app.on_key(key(KeyCode::Char('l')));
        assert!(app.status.as_deref().unwrap().contains("Hello how are you today"));

        app.on_key(key(KeyCode::Down));
        assert!(app.status.is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(settings(0));
        app.on_key(key(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = App::new(settings(0));
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_seeded_apps_agree() {
        let mut a = App::new(settings(0));
        let mut b = App::new(settings(0));
        for _ in 0..5 {
            a.record();
            b.record();
            assert_eq!(
                a.session.result.as_ref().unwrap().recognized_text,
                b.session.result.as_ref().unwrap().recognized_text
            );
        }
    }
}
