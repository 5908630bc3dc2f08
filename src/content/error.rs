//! Errors raised while loading posts

use std::io;
use std::path::PathBuf;

use super::date::DateError;
use super::markdown::RenderError;

/// A failed load or reload.
///
/// Every variant is fatal to the whole pass: the store never publishes an
/// index built from a partial set of files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("front matter {}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("date {}: {source}", path.display())]
    Date {
        path: PathBuf,
        #[source]
        source: DateError,
    },

    #[error("markdown {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl LoadError {
    /// The file or directory the failure refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::ReadDir { path, .. }
            | LoadError::ReadFile { path, .. }
            | LoadError::FrontMatter { path, .. }
            | LoadError::Date { path, .. }
            | LoadError::Render { path, .. } => path,
        }
    }

    /// Short name of the pipeline stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            LoadError::ReadDir { .. } => "scan",
            LoadError::ReadFile { .. } => "read",
            LoadError::FrontMatter { .. } => "front matter",
            LoadError::Date { .. } => "date",
            LoadError::Render { .. } => "markdown",
        }
    }
}
