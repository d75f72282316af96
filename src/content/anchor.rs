//! Heading anchor ids (GitHub-compatible)

use std::collections::HashMap;

/// Produces unique, stable anchor ids for the headings of one document
#[derive(Debug, Default)]
pub struct HeadingSlugger {
    occurrences: HashMap<String, usize>,
}

impl HeadingSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor id for a heading; repeated headings get `-1`, `-2`, ... suffixes
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify_heading(text);
        let mut candidate = base.clone();

        while self.occurrences.contains_key(&candidate) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{}-{}", base, count);
        }

        self.occurrences.insert(candidate.clone(), 0);
        candidate
    }

    /// Mark an id as taken without generating one, e.g. an explicit `{#id}`
    pub fn reserve(&mut self, id: &str) {
        self.occurrences.entry(id.to_string()).or_insert(0);
    }
}

/// Lowercase, drop punctuation, turn spaces into hyphens.
/// Letters of any script are kept, so Cyrillic headings stay readable.
pub fn slugify_heading(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c == ' ' {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}
