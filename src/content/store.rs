//! Read-only post store with atomic reload
//!
//! A load runs three stages in sequence: scan the directory, parse each file
//! (front matter, date, visibility, markdown), then build the sorted index.
//! The finished [`PostIndex`] is published with a single `ArcSwap` store, so
//! readers see either the previous complete index or the new one.

use arc_swap::ArcSwap;
use std::sync::Arc;

use super::loader::{ContentLoader, StoreOptions};
use super::{LoadError, Post, PostIndex, Render};

/// In-memory index of the posts in one directory
pub struct PostStore {
    options: StoreOptions,
    renderer: Arc<dyn Render>,
    index: ArcSwap<PostIndex>,
}

impl PostStore {
    /// Load every post under `options.dir`.
    ///
    /// Fails without returning a store if any stage fails for any file.
    pub fn load(options: StoreOptions, renderer: Arc<dyn Render>) -> Result<Self, LoadError> {
        let index = build_index(&options, renderer.as_ref())?;
        Ok(Self {
            options,
            renderer,
            index: ArcSwap::from_pointee(index),
        })
    }

    /// Rebuild the index from disk and swap it in.
    ///
    /// On error the current index is left untouched.
    pub fn reload(&self) -> Result<(), LoadError> {
        let index = build_index(&self.options, self.renderer.as_ref())?;
        self.index.store(Arc::new(index));
        Ok(())
    }

    /// All posts, newest first
    pub fn all(&self) -> Vec<Post> {
        self.index.load().posts().to_vec()
    }

    /// Look up a post by slug
    pub fn by_slug(&self, slug: &str) -> Option<Post> {
        self.index.load().get(slug).cloned()
    }

    /// Posts tagged `tag` (case-insensitive), newest first
    pub fn by_tag(&self, tag: &str) -> Vec<Post> {
        self.index.load().tagged(tag).cloned().collect()
    }

    /// Tag names with post counts
    pub fn tags(&self) -> Vec<(String, usize)> {
        self.index.load().tags()
    }

    /// The current index, unaffected by later reloads
    pub fn snapshot(&self) -> Arc<PostIndex> {
        self.index.load_full()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.index.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.load().is_empty()
    }
}

fn build_index(options: &StoreOptions, renderer: &dyn Render) -> Result<PostIndex, LoadError> {
    let posts = ContentLoader::new(options, renderer).load_posts()?;
    let index = PostIndex::build(posts);
    tracing::info!("Loaded {} posts from {:?}", index.len(), options.dir);
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{slugify, MarkdownRenderer, RenderError};
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn open(dir: &Path) -> PostStore {
        PostStore::load(StoreOptions::new(dir), Arc::new(MarkdownRenderer::new())).unwrap()
    }

    fn titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_loads_and_sorts() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "b.md", "---\ntitle: \"B\"\ndate: 2025-08-02\n---\nb");
        write(td.path(), "a.md", "---\ntitle: \"A\"\ndate: 2025-08-01\n---\na");

        let store = open(td.path());
        let all = store.all();
        assert_eq!(titles(&all), vec!["B", "A"]);
        assert!(store.by_slug(&slugify("B")).is_some());
        assert_eq!(all[0].html, "<p>b</p>\n");
    }

    #[test]
    fn test_drafts_and_future() {
        let td = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 8, 10, 12, 0, 0).unwrap();
        let future = (now + Duration::hours(48)).format("%Y-%m-%d").to_string();
        write(
            td.path(),
            "draft.md",
            "---\ntitle: \"Draft\"\ndate: 2025-08-01\ndraft: true\n---\nx",
        );
        write(
            td.path(),
            "future.md",
            &format!("---\ntitle: \"Future\"\ndate: {}\n---\nx", future),
        );

        let mut options = StoreOptions::new(td.path());
        options.now = Arc::new(move || now);

        let store = PostStore::load(options.clone(), Arc::new(MarkdownRenderer::new())).unwrap();
        assert!(store.all().is_empty());

        options.show_drafts = true;
        let store = PostStore::load(options, Arc::new(MarkdownRenderer::new())).unwrap();
        let mut got = titles(&store.all()).iter().map(|t| t.to_string()).collect::<Vec<_>>();
        got.sort();
        assert_eq!(got, vec!["Draft", "Future"]);
    }

    #[test]
    fn test_hidden_posts_do_not_claim_slugs() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "a.md", "---\ntitle: Same\ndate: 2025-08-03\ndraft: true\n---\n");
        write(td.path(), "b.md", "---\ntitle: Same\ndate: 2025-08-01\n---\n");

        let store = open(td.path());
        assert_eq!(store.all()[0].slug, "same");
    }

    #[test]
    fn test_duplicate_slugs() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "one.md", "---\ntitle: \"Same Title\"\ndate: 2025-08-01\n---\nx");
        write(td.path(), "two.md", "---\ntitle: \"Same Title\"\ndate: 2025-08-02\n---\ny");

        let store = open(td.path());
        let all = store.all();
        assert_ne!(all[0].slug, all[1].slug);

        let first = store.by_slug("same-title").unwrap();
        assert_eq!(first.source, td.path().join("two.md"));
        let second = store.by_slug("same-title-2").unwrap();
        assert_eq!(second.source, td.path().join("one.md"));
    }

    #[test]
    fn test_slugs_unique_across_many_collisions() {
        let td = tempfile::tempdir().unwrap();
        for i in 0..12 {
            let title = if i % 2 == 0 { "Post" } else { "post!" };
            write(
                td.path(),
                &format!("{i:02}.md"),
                &format!("---\ntitle: {title}\ndate: 2025-01-{:02}\n---\n", i + 1),
            );
        }
        write(td.path(), "explicit.md", "---\ntitle: X\nslug: post-2\n---\n");
        write(td.path(), "untitled.md", "no front matter at all");

        let store = open(td.path());
        let all = store.all();
        let unique: HashSet<_> = all.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(all.len(), 14);
        for post in &all {
            assert_eq!(store.by_slug(&post.slug).as_ref(), Some(post));
        }
    }

    #[test]
    fn test_by_tag_is_case_insensitive() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "a.md", "---\ntitle: A\ndate: 2025-08-01\ntags: [go, web]\n---\n");
        write(td.path(), "b.md", "---\ntitle: B\ndate: 2025-08-03\ntags: [Go]\n---\n");
        write(td.path(), "c.md", "---\ntitle: C\ndate: 2025-08-02\ntags: [rust]\n---\n");

        let store = open(td.path());
        assert_eq!(titles(&store.by_tag("GO")), vec!["B", "A"]);
        assert!(store.by_tag("python").is_empty());
        assert!(store.by_slug("missing").is_none());
    }

    #[test]
    fn test_all_returns_a_copy() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "a.md", "---\ntitle: A\n---\n");

        let store = open(td.path());
        let mut all = store.all();
        all[0].title = "changed".to_string();
        all.clear();
        assert_eq!(store.all()[0].title, "A");
    }

    #[test]
    fn test_missing_directory_fails() {
        let td = tempfile::tempdir().unwrap();
        let result = PostStore::load(
            StoreOptions::new(td.path().join("absent")),
            Arc::new(MarkdownRenderer::new()),
        );
        assert!(matches!(result, Err(LoadError::ReadDir { .. })));
    }

    #[test]
    fn test_malformed_front_matter_fails_whole_load() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "good.md", "---\ntitle: Good\n---\n");
        write(td.path(), "bad.md", "---\ntitle: [oops\n---\n");

        let result = PostStore::load(StoreOptions::new(td.path()), Arc::new(MarkdownRenderer::new()));
        match result {
            Err(err @ LoadError::FrontMatter { .. }) => {
                assert_eq!(err.path(), &td.path().join("bad.md"));
                assert_eq!(err.stage(), "front matter");
            }
            other => panic!("expected front matter error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_render_failure_fails_load() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "a.md", "body");

        let failing = |_: &str| -> Result<String, RenderError> { Err(RenderError("broken".into())) };
        let result = PostStore::load(StoreOptions::new(td.path()), Arc::new(failing));
        assert!(matches!(result, Err(LoadError::Render { .. })));
    }

    #[test]
    fn test_reload_swaps_and_keeps_old_on_error() {
        let td = tempfile::tempdir().unwrap();
        write(td.path(), "a.md", "---\ntitle: A\ndate: 2025-08-01\n---\n");

        let store = open(td.path());
        let before = store.snapshot();
        assert_eq!(store.len(), 1);

        write(td.path(), "b.md", "---\ntitle: B\ndate: 2025-08-02\n---\n");
        store.reload().unwrap();
        assert_eq!(titles(&store.all()), vec!["B", "A"]);
        assert_eq!(before.len(), 1);

        write(td.path(), "c.md", "---\ndate: not a date\n---\n");
        assert!(store.reload().is_err());
        assert_eq!(titles(&store.all()), vec!["B", "A"]);
    }

    #[test]
    fn test_concurrent_readers_see_complete_indexes() {
        let td = tempfile::tempdir().unwrap();
        for i in 0..5 {
            write(
                td.path(),
                &format!("{i}.md"),
                &format!("---\ntitle: P{i}\ndate: 2025-08-0{}\n---\n", i + 1),
            );
        }

        let store = Arc::new(open(td.path()));
        std::thread::scope(|s| {
            for _ in 0..4 {
                let store = store.clone();
                s.spawn(move || {
                    for _ in 0..50 {
                        assert_eq!(store.all().len(), 5);
                    }
                });
            }
            for _ in 0..10 {
                store.reload().unwrap();
            }
        });
    }
}
