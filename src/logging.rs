use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::Result;

const DEFAULT_FILTER: &str = "warn";

/// Logs to stderr, filtered by `RUST_LOG`
pub fn init_stderr() {
    let _ = builder().target(Target::Stderr).try_init();
}

/// Logs appended to `path`; stderr belongs to the terminal UI
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = builder()
        .target(Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init();
    Ok(())
}

fn builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_file_creates_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("tutor.log");

        init_file(&path).unwrap();
        assert!(path.exists());
    }
}
