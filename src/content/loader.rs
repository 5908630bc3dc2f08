//! Content loader - reads and parses posts from the post directory

use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::date::{is_future, parse_date};
use super::scan::scan_posts;
use super::{slugify, FrontMatter, LoadError, Post, Render};

/// Source of "now" for future-date filtering
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// How a store finds and filters its posts
#[derive(Clone)]
pub struct StoreOptions {
    /// Directory holding the post files
    pub dir: PathBuf,
    /// Keep drafts and future-dated posts
    pub show_drafts: bool,
    pub now: Clock,
}

impl StoreOptions {
    /// Options for `dir` with drafts hidden and the system clock
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            show_drafts: false,
            now: Arc::new(Utc::now),
        }
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("dir", &self.dir)
            .field("show_drafts", &self.show_drafts)
            .finish_non_exhaustive()
    }
}

/// Whether a post with these attributes belongs in the index.
///
/// `show_drafts` lifts both the draft and the future-date filter.
pub fn is_visible(
    draft: bool,
    date: Option<&DateTime<FixedOffset>>,
    now: DateTime<Utc>,
    show_drafts: bool,
) -> bool {
    if show_drafts {
        return true;
    }
    if draft {
        return false;
    }
    !date.is_some_and(|d| is_future(d, now))
}

/// Loads visible posts from a directory
pub struct ContentLoader<'a> {
    options: &'a StoreOptions,
    renderer: &'a dyn Render,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(options: &'a StoreOptions, renderer: &'a dyn Render) -> Self {
        Self { options, renderer }
    }

    /// Scan the directory and parse every candidate file, in scan order.
    ///
    /// Hidden posts are dropped here. The first failing file aborts the load.
    pub fn load_posts(&self) -> Result<Vec<Post>, LoadError> {
        let now = (self.options.now)();
        let mut posts = Vec::new();

        for path in scan_posts(&self.options.dir)? {
            if let Some(post) = self.load_post(&path, now)? {
                posts.push(post);
            }
        }

        Ok(posts)
    }

    /// Load a single post, `None` when the visibility policy hides it
    fn load_post(&self, path: &Path, now: DateTime<Utc>) -> Result<Option<Post>, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|source| LoadError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let date = parse_date(fm.date.as_deref().unwrap_or_default()).map_err(|source| {
            LoadError::Date {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if !is_visible(fm.draft, date.as_ref(), now, self.options.show_drafts) {
            tracing::debug!("Skipping hidden post {:?}", path);
            return Ok(None);
        }

        // Get title from front-matter or filename
        let title = fm
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(path));

        let slug = match fm.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slugify(slug),
            _ => slugify(&title),
        };

        let html = self
            .renderer
            .render(body)
            .map_err(|source| LoadError::Render {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Some(Post {
            title,
            slug,
            date,
            tags: fm.tags,
            draft: fm.draft,
            summary: fm.summary.filter(|s| !s.trim().is_empty()),
            html,
            source: path.to_path_buf(),
        }))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string())
}
