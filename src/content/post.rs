//! Post model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title, or the file stem when the front matter has none
    pub title: String,

    /// Unique URL identifier within one loaded index
    pub slug: String,

    /// Publication date, `None` when the front matter has no date
    pub date: Option<DateTime<FixedOffset>>,

    /// Tags in declaration order
    pub tags: Vec<String>,

    pub draft: bool,

    pub summary: Option<String>,

    /// Rendered HTML body, embedded verbatim by templates
    pub html: String,

    /// Source file the post was read from
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Whether any tag matches `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}
