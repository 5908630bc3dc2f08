//! Validate the post directory without starting the server

use anyhow::{Context, Result};

use crate::Site;

/// Load every post, drafts included, and report the first failure.
///
/// Returns the number of posts that loaded.
pub fn run(site: &Site) -> Result<usize> {
    let store = site
        .open_store(true)
        .inspect_err(|e| {
            tracing::error!(stage = e.stage(), path = %e.path().display(), "Check failed")
        })
        .with_context(|| format!("checking {}", site.posts_dir.display()))?;

    let drafts = store.all().iter().filter(|p| p.draft).count();
    tracing::info!(
        "{} posts OK ({} drafts, {} tags)",
        store.len(),
        drafts,
        store.tags().len()
    );
    Ok(store.len())
}
