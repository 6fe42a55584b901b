// Library surface for the binary, headless runs and integration tests.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod logging;
pub mod progress;
pub mod report;
pub mod runtime;
pub mod scorer;
pub mod session;
pub mod simulator;
pub mod ui;
pub mod waveform;

pub use error::{Result, TutorError};
