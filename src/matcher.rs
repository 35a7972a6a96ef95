//! # Pattern Matcher
//!
//! Pulls Play Store application ids out of a single line of text. The
//! pattern is fixed: an id follows the `store/apps/details?id=` anchor and
//! must be followed, later on the same line and before any `>`, by a
//! `title=` anchor. That shape matches the anchor tags of a store listing
//! page.

use once_cell::sync::Lazy;
use regex::Regex;

static APP_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"store/apps/details\?id=([\w.\d_]+)[^>]+title=")
        .expect("app link pattern is valid")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Identifiers found in `line`, left to right.
    pub fn extract<'a>(&self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        APP_LINK
            .captures_iter(line)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    }
}
