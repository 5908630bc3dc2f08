//! URL slugs for posts

use lazy_static::lazy_static;
use regex::Regex;

/// Slug used when a title has no ASCII letters or digits at all
pub const FALLBACK_SLUG: &str = "post";

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new("[^a-z0-9]+").unwrap();
}

/// Convert a title into a URL-safe identifier.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen and trims hyphens from both ends.
///
/// # Examples
/// ```
/// use personal_site::content::slugify;
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("???"), "post");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let slug = NON_ALNUM.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Same Title"), "same-title");
        assert_eq!(slugify("Same Title"), slugify("Same Title"));
    }

    #[test]
    fn test_runs_collapse_and_trim() {
        assert_eq!(slugify("  Go -- stdlib / web!  "), "go-stdlib-web");
        assert_eq!(slugify("--a--"), "a");
    }

    #[test]
    fn test_non_ascii_is_separator() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("Rust 2024 版本"), "rust-2024");
    }

    #[test]
    fn test_empty_falls_back() {
        assert_eq!(slugify(""), FALLBACK_SLUG);
        assert_eq!(slugify("版本"), FALLBACK_SLUG);
        assert_eq!(slugify("!!!"), FALLBACK_SLUG);
    }
}
