//! Sorted, slug-unique post index

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::Post;

/// An immutable snapshot of the loaded posts.
///
/// Posts are ordered newest first and every slug is unique.
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
}

impl PostIndex {
    /// Sort `posts`, make slugs unique and build the lookup table
    pub fn build(mut posts: Vec<Post>) -> Self {
        posts.sort_by(compare_posts);
        assign_unique_slugs(&mut posts);

        let by_slug = posts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.slug.clone(), i))
            .collect();

        Self { posts, by_slug }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.by_slug.get(slug).map(|&i| &self.posts[i])
    }

    /// Posts carrying `tag` (any case), in index order
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts.iter().filter(move |p| p.has_tag(tag))
    }

    /// Tag names with post counts, most used first.
    ///
    /// Tags differing only in case are counted together under the first
    /// spelling met in index order.
    pub fn tags(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();

        for post in &self.posts {
            let mut seen_here = HashSet::new();
            for tag in &post.tags {
                let key = tag.to_lowercase();
                if !seen_here.insert(key.clone()) {
                    continue;
                }
                match position.get(&key) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        position.insert(key, counts.len());
                        counts.push((tag.clone(), 1));
                    }
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Newest first; undated posts last, ordered by title among themselves.
/// Remaining ties keep their input order (the sort is stable).
fn compare_posts(a: &Post, b: &Post) -> Ordering {
    match (&a.date, &b.date) {
        (Some(da), Some(db)) => db.cmp(da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    }
}

/// Suffix repeated slugs with `-2`, `-3`, ... in current order
fn assign_unique_slugs(posts: &mut [Post]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(posts.len());

    for post in posts.iter_mut() {
        let mut slug = post.slug.clone();
        let mut k = 2;
        while taken.contains(&slug) {
            slug = format!("{}-{}", post.slug, k);
            k += 1;
        }
        taken.insert(slug.clone());
        post.slug = slug;
    }
}
