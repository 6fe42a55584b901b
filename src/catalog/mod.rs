pub mod core;
pub mod errors;

use include_dir::{include_dir, Dir};

use crate::error::{Result, TutorError};

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");

pub use self::core::{Phrase, PhraseCatalog};
pub use errors::ErrorTable;

/// Contents of a catalog file embedded at build time
fn embedded(file_name: &str) -> Result<&'static str> {
    DATA_DIR
        .get_file(file_name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| {
            TutorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("embedded catalog file {file_name} missing"),
            ))
        })
}
