use indexmap::IndexMap;

use crate::Translation;
use crate::normalize::canonical_key;

/// Read-only translation lookup used by the merge engine and the resolver
pub trait TranslationSource: Send + Sync {
    /// Exact lookup of a canonical key
    fn lookup(&self, key: &str) -> Option<&Translation>;

    /// All entries in source order
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Translation)> + '_>;

    /// Get source metadata
    fn metadata(&self) -> SourceMetadata;

    fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub entry_count: usize,
}

/// In-memory source: curated glossary, phrasal verbs or a bilingual dump.
///
/// Placeholder values are never stored, so a hit is always a usable
/// translation.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    name: String,
    entries: IndexMap<String, Translation>,
}

impl Glossary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// Build from raw pairs, canonicalizing keys. The first occurrence of a
    /// key wins.
    pub fn from_pairs<I, K>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Translation)>,
        K: AsRef<str>,
    {
        let mut glossary = Self::new(name);
        for (key, translation) in pairs {
            glossary.insert(key.as_ref(), translation);
        }
        glossary
    }

    /// Insert when the key is new and the value is not a placeholder.
    /// Returns true if inserted.
    pub fn insert(&mut self, key: &str, translation: Translation) -> bool {
        let key = canonical_key(key);
        if key.is_empty() || translation.is_placeholder() || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, translation);
        true
    }

    /// Merge another glossary into this one; existing keys are kept
    pub fn merge(mut self, other: Glossary) -> Self {
        for (key, translation) in other.entries {
            self.insert(&key, translation);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslationSource for Glossary {
    fn lookup(&self, key: &str) -> Option<&Translation> {
        self.entries.get(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Translation)> + '_> {
        Box::new(self.entries.iter().map(|(k, v)| (k.as_str(), v)))
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: self.name.clone(),
            entry_count: self.entries.len(),
        }
    }
}
