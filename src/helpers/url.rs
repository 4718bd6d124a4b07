//! URL helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SAFE_SLUG: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
}

/// Whether a derived slug can be embedded in a URL without escaping
pub fn is_url_safe_slug(slug: &str) -> bool {
    SAFE_SLUG.is_match(slug)
}

/// Join a type's url prefix with a record slug
///
/// # Examples
/// ```ignore
/// join_url("/blog/", "first-post") // -> "/blog/first-post"
/// ```
pub fn join_url(prefix: &str, slug: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("/blog/", "first-post"), "/blog/first-post");
        assert_eq!(join_url("/projects", "mdshelf"), "/projects/mdshelf");
        assert_eq!(join_url("/", "about"), "/about");
    }

    #[test]
    fn test_safe_slugs() {
        assert!(is_url_safe_slug("hello-world"));
        assert!(is_url_safe_slug("notes_2024.03"));
        assert!(!is_url_safe_slug("hello world"));
        assert!(!is_url_safe_slug("caf\u{e9}"));
        assert!(!is_url_safe_slug(""));
    }
}
