//! Autocomplete candidates for the question input.

/// Fixed, ordered list of candidate questions. Static configuration, not
/// derived from the uploaded document; injectable so tests can use a small
/// list.
#[derive(Debug, Clone)]
pub struct SuggestionCatalog {
    entries: Vec<String>,
}

const PREDEFINED_SUGGESTIONS: [&str; 10] = [
    "What is the summary of this document?",
    "What are the main points discussed?",
    "Can you provide an overview?",
    "What is the conclusion?",
    "Can you explain the key concepts?",
    "Give me bullet points for each section",
    "Are there any important dates or deadlines listed?",
    "Are there any references or citations to other works?",
    "What are the recommendations or action items mentioned?",
    "Are there any notable quotes or statements?",
];

impl Default for SuggestionCatalog {
    fn default() -> Self {
        Self::new(PREDEFINED_SUGGESTIONS.iter().map(|s| s.to_string()))
    }
}

impl SuggestionCatalog {
    pub fn new(entries: impl IntoIterator<Item = String>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Ordered case-insensitive substring filter. Empty input matches
    /// nothing: the UI only shows suggestions once the user starts typing.
    pub fn matching(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }
        let needle = input.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
