use indexmap::IndexSet;
use podlex_core::normalize::normalize_key;

/// Frequency-ordered English words used to extend dictionary coverage
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: IndexSet<String>,
}

impl WordList {
    /// Create empty word list
    pub fn new() -> Self {
        Self::default()
    }

    /// Embedded list of common words, used when no remote list is reachable
    pub fn embedded() -> Self {
        let text = include_str!("../data/fallback_words.txt");
        let mut list = Self::new();
        list.extend_from_text(text.split_whitespace());
        list
    }

    /// Parse a newline-delimited list; invalid lines are skipped
    pub fn from_text(text: &str) -> Self {
        let mut list = Self::new();
        list.extend_from_text(text.lines());
        list
    }

    /// Append normalized words in order, ignoring duplicates.
    /// Returns the number of new words.
    pub fn extend_from_text<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> usize {
        let before = self.words.len();
        self.words.extend(lines.into_iter().filter_map(normalize_key));
        self.words.len() - before
    }

    /// Append another list after this one
    pub fn merge(mut self, other: WordList) -> Self {
        self.words.extend(other.words);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
