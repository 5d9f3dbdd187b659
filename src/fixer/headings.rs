// SPDX-License-Identifier: PMPL-1.0-or-later
//! Empty heading removal
//!
//! Text-level rewrite: matching `<hN ...>` and `</hN>` pairs whose content
//! is only whitespace, `&nbsp;` or U+00A0 are deleted from the markup. The
//! regex engine has no backreferences, so each level gets its own pattern.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static EMPTY_HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| {
            Regex::new(&format!(
                r"(?i)<h{level}(?:\s[^>]*)?>(?:\s|&nbsp;|\x{{A0}})*</h{level}\s*>"
            ))
            .expect("valid regex")
        })
        .collect()
});

/// Remove every empty heading.
///
/// Runs until nothing matches, so a heading that only becomes empty after
/// an inner one is removed is stripped too, and a second call is a no-op.
pub fn remove_empty_headings(html: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(html);

    loop {
        let mut changed = false;
        for pattern in EMPTY_HEADINGS.iter() {
            if pattern.is_match(&current) {
                current = Cow::Owned(pattern.replace_all(&current, "").into_owned());
                changed = true;
            }
        }
        if !changed {
            return current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_whitespace_only_headings() {
        let html = "<h1>Title</h1><h2></h2><h3>  \n </h3><h4 class=\"x\">&nbsp;</h4><h5>\u{a0}</h5><p>Body</p>";
        assert_eq!(remove_empty_headings(html), "<h1>Title</h1><p>Body</p>");
    }

    #[test]
    fn test_keeps_headings_with_content() {
        let html = "<h2><img src=\"a.png\" alt=\"\"></h2><h3>&nbsp;x</h3>";
        assert_eq!(remove_empty_headings(html), html);
    }

    #[test]
    fn test_levels_must_match() {
        let html = "<h2> </h3>";
        assert_eq!(remove_empty_headings(html), html);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(remove_empty_headings("<H2 ID=\"a\"> </H2>ok"), "ok");
    }

    #[test]
    fn test_does_not_match_longer_tag_names() {
        let html = "<header></header>";
        assert_eq!(remove_empty_headings(html), html);
    }

    #[test]
    fn test_nested_empty_headings_collapse() {
        assert_eq!(remove_empty_headings("<h1> <h2></h2> </h1>after"), "after");
    }

    #[test]
    fn test_idempotent() {
        let html = "<h1>A</h1><h2> </h2><h3>&nbsp;&nbsp;</h3><h2>B</h2>";
        let once = remove_empty_headings(html).into_owned();
        assert_eq!(remove_empty_headings(&once), once);
    }

    #[test]
    fn test_untouched_input_is_borrowed() {
        assert!(matches!(remove_empty_headings("<p>x</p>"), Cow::Borrowed(_)));
    }
}
