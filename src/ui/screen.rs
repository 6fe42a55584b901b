use ratatui::{buffer::Buffer, layout::Rect};

use crate::{
    app::{App, AppState},
    ui::{render_about, render_practice, render_processing, render_results},
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Phrase and difficulty selection
pub struct PracticeScreen;

impl Screen for PracticeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_practice(app, area, buf);
    }
}

/// Waveform of the simulated recording while the delay runs
pub struct ProcessingScreen;

impl Screen for ProcessingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_processing(app, area, buf);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_results(app, area, buf);
    }
}

pub struct AboutScreen;

impl Screen for AboutScreen {
    fn render(&self, _app: &App, area: Rect, buf: &mut Buffer) {
        render_about(area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Practice => Box::new(PracticeScreen),
        AppState::Processing => Box::new(ProcessingScreen),
        AppState::Results => Box::new(ResultsScreen),
        AppState::About => Box::new(AboutScreen),
    }
}
