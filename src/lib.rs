//! personal-site: a personal website with a Markdown blog
//!
//! Posts live as Markdown files with YAML front matter. They are loaded into
//! an in-memory [`content::PostStore`] and served as HTML pages rendered
//! from embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{LoadError, MarkdownRenderer, PostStore, StoreOptions};

/// Site configuration file, relative to the base directory
pub const CONFIG_FILE: &str = "configs/site.json";
/// Default post directory, relative to the base directory
pub const POSTS_DIR: &str = "content/posts";
/// Static asset directory, relative to the base directory
pub const STATIC_DIR: &str = "web/static";

/// A site rooted at one directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the Markdown posts
    pub posts_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading its config file if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };

        Ok(Self {
            config,
            posts_dir: base_dir.join(POSTS_DIR),
            static_dir: base_dir.join(STATIC_DIR),
            base_dir,
        })
    }

    /// Use a different post directory; relative paths resolve against the base
    pub fn with_posts_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        let dir = dir.as_ref();
        self.posts_dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.base_dir.join(dir)
        };
        self
    }

    /// Store options for this site's post directory
    pub fn store_options(&self, show_drafts: bool) -> StoreOptions {
        let mut options = StoreOptions::new(&self.posts_dir);
        options.show_drafts = show_drafts;
        options
    }

    /// Load the post store with the default Markdown renderer
    pub fn open_store(&self, show_drafts: bool) -> Result<PostStore, LoadError> {
        PostStore::load(
            self.store_options(show_drafts),
            Arc::new(MarkdownRenderer::new()),
        )
    }
}
