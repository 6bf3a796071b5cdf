use regex::{Regex, RegexBuilder};

/// Case-insensitive literal-substring matcher over title and description.
///
/// The raw query is escaped before compilation, so regex metacharacters in
/// user input match themselves instead of acting as a pattern.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    pattern: String,
    regex: Regex,
}

impl SearchMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank inputs.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        let pattern = regex::escape(trimmed);
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .ok()?;
        Some(Self { pattern, regex })
    }

    /// The escaped pattern the matcher compiled.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether title OR description contains the query.
    #[must_use]
    pub fn matches(&self, title: &str, description: Option<&str>) -> bool {
        self.regex.is_match(title) || description.is_some_and(|body| self.regex.is_match(body))
    }
}
