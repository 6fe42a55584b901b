use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pronunciaid::{
    app::{App, AppSettings},
    app_dirs::AppDirs,
    catalog::{ErrorTable, Phrase, PhraseCatalog},
    config::{Config, ConfigStore, FileConfigStore},
    difficulty::DifficultyLevel,
    logging,
    progress::{ProgressMode, ProgressSeries},
    report,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::{self, AnalysisRequest},
    simulator::{Simulator, SuffixMutation},
    ui, TutorError,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

/// pronunciation practice with simulated recognition and word-level feedback
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice English phrases against a simulated speech recognizer. A recording is faked by substituting common mispronunciations, then scored word by word."
)]
pub struct Cli {
    /// custom phrase to practice
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// catalog phrase to start with, by label or 0-based index
    #[clap(long)]
    phrase: Option<String>,

    /// difficulty level: easy, medium or hard
    #[clap(short = 'd', long, value_parser = parse_difficulty)]
    difficulty: Option<DifficultyLevel>,

    /// seed the random source for reproducible runs
    #[clap(long)]
    seed: Option<u64>,

    /// simulated processing time in milliseconds
    #[clap(long)]
    delay_ms: Option<u64>,

    /// JSON file mapping words to their common misspellings
    #[clap(long)]
    error_table: Option<PathBuf>,

    /// only use error table substitutions, never garble unknown words
    #[clap(long)]
    no_suffix: bool,

    /// shape of the simulated progress chart
    #[clap(long, value_enum)]
    progress: Option<ProgressMode>,

    /// config file to use instead of the platform default
    #[clap(long)]
    config: Option<PathBuf>,

    /// analyze once and print a text report instead of starting the tui
    #[clap(long)]
    plain: bool,

    /// analyze once and print the result as JSON
    #[clap(long, conflicts_with = "plain")]
    json: bool,

    /// print the phrase catalog and exit
    #[clap(long)]
    list_phrases: bool,
}

fn parse_difficulty(s: &str) -> Result<DifficultyLevel, TutorError> {
    s.parse()
}

impl Cli {
    fn is_interactive(&self) -> bool {
        !(self.plain || self.json || self.list_phrases)
    }

    /// Flags win over stored settings
    fn apply(&self, mut config: Config) -> Config {
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(delay) = self.delay_ms {
            config.processing_delay_ms = delay;
        }
        if let Some(progress) = self.progress {
            config.progress = progress;
        }
        if self.no_suffix {
            config.suffix_mutation = false;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn resolve_phrases(
        &self,
        config: &Config,
        catalog: &PhraseCatalog,
    ) -> Result<(Vec<Phrase>, usize), TutorError> {
        let mut phrases = catalog.phrases().to_vec();

        if let Some(prompt) = &self.prompt {
            phrases.insert(0, Phrase::custom(prompt)?);
            return Ok((phrases, 0));
        }

        if let Some(key) = &self.phrase {
            let (idx, _) = catalog.find(key)?;
            return Ok((phrases, idx));
        }

        let idx = match config.phrase.as_deref() {
            Some(label) => catalog.position(label).unwrap_or_else(|| {
                log::warn!("stored phrase {label:?} is no longer in the catalog");
                0
            }),
            None => 0,
        };
        Ok((phrases, idx))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.is_interactive() {
        if !stdin().is_tty() {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::Io,
                "stdin must be a tty (use --plain or --json for a single analysis)",
            )
            .exit();
        }
        logging::init_file(&AppDirs::log_path())?;
    } else {
        logging::init_stderr();
    }

    let store = cli.config_store();
    let config = cli.apply(store.load());
    config.validate()?;

    let catalog = PhraseCatalog::embedded()?;
    if cli.list_phrases {
        for (idx, phrase) in catalog.phrases().iter().enumerate() {
            println!("{idx}  {:<18} {}", phrase.label, phrase.text);
        }
        return Ok(());
    }

    let (phrases, selected) = cli.resolve_phrases(&config, &catalog)?;
    let table = match &cli.error_table {
        Some(path) => ErrorTable::from_file(path)?,
        None => ErrorTable::embedded()?,
    };
    let simulator = Simulator::new(table, config.probabilities)
        .with_suffix(config.suffix_mutation.then(SuffixMutation::default));

    let settings = AppSettings {
        phrases,
        selected,
        difficulty: config.difficulty,
        simulator,
        processing_delay: Duration::from_millis(config.processing_delay_ms),
        progress: config.progress,
        seed: cli.seed,
    };

    if !cli.is_interactive() {
        return run_once(&cli, settings);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings);
    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    // custom prompts are not part of the catalog and are not remembered
    let phrase = app.current_phrase();
    let saved = Config {
        difficulty: app.difficulty(),
        phrase: catalog.position(&phrase.label).map(|_| phrase.label.clone()),
        ..store.load()
    };
    if let Err(e) = store.save(&saved) {
        log::warn!("unable to save config to {}: {e}", store.path().display());
    }

    Ok(())
}

/// Single analysis for --plain / --json
fn run_once(cli: &Cli, settings: AppSettings) -> Result<(), Box<dyn Error>> {
    let request = AnalysisRequest {
        phrase: settings.phrases[settings.selected].clone(),
        difficulty: settings.difficulty,
    };
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if !settings.processing_delay.is_zero() {
        thread::sleep(settings.processing_delay);
    }
    let result = session::analyze(&request, &settings.simulator, &mut rng);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let progress = ProgressSeries::for_mode(settings.progress, result.score);
        print!(
            "{}",
            report::text_report(&result, settings.processing_delay, &progress)
        );
    }
    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let mut last = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(app, f))?;

        let event = runner.step();
        let now = Instant::now();
        app.handle(event, now.duration_since(last));
        last = now;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["pronunciaid"]);

        assert_eq!(cli.prompt, None);
        assert_eq!(cli.phrase, None);
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.plain);
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_cli_difficulty() {
        let cli = Cli::parse_from(["pronunciaid", "-d", "hard"]);
        assert_eq!(cli.difficulty, Some(DifficultyLevel::Hard));

        let cli = Cli::parse_from(["pronunciaid", "--difficulty", "Media"]);
        assert_eq!(cli.difficulty, Some(DifficultyLevel::Medium));

        assert!(Cli::try_parse_from(["pronunciaid", "-d", "extreme"]).is_err());
    }

    #[test]
    fn test_cli_progress_and_modes() {
        let cli = Cli::parse_from(["pronunciaid", "--progress", "trailing", "--json"]);
        assert_eq!(cli.progress, Some(ProgressMode::Trailing));
        assert!(!cli.is_interactive());

        assert!(Cli::try_parse_from(["pronunciaid", "--plain", "--json"]).is_err());
    }

    #[test]
    fn test_cli_apply_overrides_config() {
        let cli = Cli::parse_from([
            "pronunciaid",
            "-d",
            "medium",
            "--delay-ms",
            "0",
            "--no-suffix",
            "--progress",
            "trailing",
        ]);
        let config = cli.apply(Config::default());

        assert_eq!(config.difficulty, DifficultyLevel::Medium);
        assert_eq!(config.processing_delay_ms, 0);
        assert!(!config.suffix_mutation);
        assert_eq!(config.progress, ProgressMode::Trailing);
    }

    #[test]
    fn test_cli_apply_keeps_config_without_flags() {
        let stored = Config {
            difficulty: DifficultyLevel::Hard,
            processing_delay_ms: 500,
            ..Config::default()
        };
        let config = Cli::parse_from(["pronunciaid"]).apply(stored.clone());
        assert_eq!(config, stored);
    }

    #[test]
    fn test_resolve_phrases() {
        let catalog = PhraseCatalog::embedded().unwrap();

        let cli = Cli::parse_from(["pronunciaid", "--phrase", "Thanks"]);
        let (phrases, idx) = cli.resolve_phrases(&Config::default(), &catalog).unwrap();
        assert_eq!(phrases[idx].text, "Thank you very much");

        let cli = Cli::parse_from(["pronunciaid", "-p", "Good evening"]);
        let (phrases, idx) = cli.resolve_phrases(&Config::default(), &catalog).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(phrases.len(), catalog.len() + 1);
        assert_eq!(phrases[0].label, "Custom");

        let stored = Config {
            phrase: Some("good morning".into()),
            ..Config::default()
        };
        let cli = Cli::parse_from(["pronunciaid"]);
        let (_, idx) = cli.resolve_phrases(&stored, &catalog).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_resolve_phrases_errors() {
        let catalog = PhraseCatalog::embedded().unwrap();

        let cli = Cli::parse_from(["pronunciaid", "-p", "   "]);
        assert_matches!(
            cli.resolve_phrases(&Config::default(), &catalog),
            Err(TutorError::EmptyPhrase)
        );

        let cli = Cli::parse_from(["pronunciaid", "--phrase", "farewell"]);
        assert_matches!(
            cli.resolve_phrases(&Config::default(), &catalog),
            Err(TutorError::UnknownPhrase(_))
        );
    }
}
