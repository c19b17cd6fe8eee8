//! Domain errors for log parsing and node-map loading.
//!
//! These are returned as `anyhow::Error` from the pipeline but keep their
//! type, so callers (and tests) can `downcast_ref::<ProfileError>()` to tell
//! an unreadable file apart from a malformed row.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The input could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A numeric field in a `W`/`J` row did not parse as an unsigned integer.
    #[error("log parse error at {origin}:{line}: field {field} is not a number: {value:?}")]
    Parse {
        origin: String,
        line: usize,
        field: usize,
        value: String,
    },

    /// A row had the wrong number of numeric fields for its tag.
    #[error("log parse error at {origin}:{line}: {tag} row has {found} fields, expected {expected}")]
    RowWidth {
        origin: String,
        line: usize,
        tag: char,
        expected: usize,
        found: usize,
    },

    /// A node-map line was not of the form `<integer>:<name>`.
    #[error("node map error at {origin}:{line}: {reason}: {text:?}")]
    NodeMap {
        origin: String,
        line: usize,
        reason: &'static str,
        text: String,
    },
}

impl ProfileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProfileError::Io {
            path: path.into(),
            source,
        }
    }
}
