use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker stored in the artifact for keys without a known translation
pub const PLACEHOLDER: &str = "—";

/// Ordered, deduplicated set of Russian translations for one key.
///
/// The first value is the primary meaning, later values are alternates in
/// discovery order. An empty set is the unresolved placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    values: Vec<String>,
}

impl Translation {
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn single(value: impl Into<String>) -> Self {
        let mut translation = Self::default();
        translation.push(value);
        translation
    }

    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut translation = Self::default();
        for value in values {
            translation.push(value);
        }
        translation
    }

    /// Append a value, ignoring blanks, the placeholder and duplicates.
    /// Returns true if the value was new.
    pub fn push(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() || value == PLACEHOLDER || self.values.iter().any(|v| v == value) {
            return false;
        }
        self.values.push(value.to_string());
        true
    }

    /// Append every value of `other` this set does not hold yet, keeping the
    /// current primary in place. Returns the number of values added.
    pub fn extend_with(&mut self, other: &Translation) -> usize {
        other
            .values
            .iter()
            .filter(|value| self.push(value.as_str()))
            .count()
    }

    pub fn is_placeholder(&self) -> bool {
        self.values.is_empty()
    }

    pub fn primary(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rewrite every value, dropping those that become blank
    pub fn map_values(self, mut f: impl FnMut(&str) -> String) -> Self {
        Self::from_values(self.values.iter().map(|v| f(v)))
    }

    /// Display string for the player: variants joined with a comma
    pub fn display(&self) -> String {
        self.values.join(", ")
    }
}

impl Serialize for Translation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.values.as_slice() {
            [] => serializer.serialize_str(PLACEHOLDER),
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTranslation {
    One(String),
    Many(Vec<Option<String>>),
}

impl<'de> Deserialize<'de> for Translation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawTranslation>::deserialize(deserializer)?;
        Ok(match raw {
            None => Translation::placeholder(),
            Some(RawTranslation::One(value)) => Translation::single(value),
            Some(RawTranslation::Many(values)) => Translation::from_values(values.into_iter().flatten()),
        })
    }
}

/// Key to translation mapping, in insertion order.
///
/// Keys are expected to be canonical (lowercase, trimmed, unquoted); callers
/// normalize before inserting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: IndexMap<String, Translation>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Translation> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Translation> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace, keeping the original position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, translation: Translation) -> Option<Translation> {
        self.entries.insert(key.into(), translation)
    }

    /// Insert only when the key is absent. Returns true if inserted.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, translation: Translation) -> bool {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(translation);
                true
            }
        }
    }

    /// Remove a key, preserving the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Translation> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Translation)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Translation)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys still holding the placeholder, in dictionary order
    pub fn unresolved_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, v)| v.is_placeholder())
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.values().filter(|v| !v.is_placeholder()).count()
    }
}

impl<K: Into<String>> FromIterator<(K, Translation)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Translation)>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        for (key, translation) in iter {
            dictionary.insert_if_absent(key, translation);
        }
        dictionary
    }
}
