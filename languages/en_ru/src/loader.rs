use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use podlex_core::dictionary::Glossary;
use podlex_core::error::SourceError;
use podlex_core::normalize::{canonical_key, normalize_translation};
use podlex_core::{Dictionary, PLACEHOLDER, Translation};

pub struct GlossaryLoader;

impl GlossaryLoader {
    /// Parse an EN-RU dump (`{"word": ["перевод", ...]}` or `{"word": "перевод"}`).
    ///
    /// Only the first candidate of each entry is kept, normalized to sentence
    /// case. The first spelling of a key wins when several differ only by case.
    pub fn bilingual_from_json(name: &str, json: &str) -> Result<Glossary, SourceError> {
        let data: IndexMap<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut glossary = Glossary::new(name);
        for (word, candidates) in &data {
            let primary = match candidates {
                serde_json::Value::Array(list) => list.first().and_then(|v| v.as_str()),
                serde_json::Value::String(single) => Some(single.as_str()),
                _ => None,
            };

            let Some(primary) = primary.map(str::trim).filter(|t| !t.is_empty() && *t != PLACEHOLDER) else {
                continue;
            };

            glossary.insert(word, Translation::single(normalize_translation(primary)));
        }

        tracing::info!("Loaded {} EN-RU translations from {}", glossary.len(), name);
        Ok(glossary)
    }

    /// Parse a hand-maintained list (curated glossary, phrasal verbs).
    /// Values are kept verbatim; string and array values are both accepted.
    pub fn curated_from_json(name: &str, json: &str) -> Result<Glossary, SourceError> {
        let data: IndexMap<String, Translation> = serde_json::from_str(json)?;
        Ok(Glossary::from_pairs(name, data))
    }

    /// Load a hand-maintained list from disk
    pub fn load_curated_file(name: &str, path: &Path) -> Result<Glossary, SourceError> {
        tracing::info!("Loading {} from file: {}", name, path.display());
        let json = read_file(path)?;
        let glossary = Self::curated_from_json(name, &json)?;
        tracing::info!("Loaded {} {} translations", glossary.len(), name);
        Ok(glossary)
    }

    /// Parse a previously written artifact. Keys are canonicalized; when two
    /// keys collapse into one, the first keeps its value.
    pub fn dictionary_from_json(json: &str) -> Result<Dictionary, SourceError> {
        let data: IndexMap<String, Translation> = serde_json::from_str(json)?;
        Ok(data
            .into_iter()
            .map(|(key, translation)| (canonical_key(&key), translation))
            .filter(|(key, _)| !key.is_empty())
            .collect())
    }

    /// Load an artifact from disk
    pub fn load_dictionary_file(path: &Path) -> Result<Dictionary, SourceError> {
        let json = read_file(path)?;
        Self::dictionary_from_json(&json)
    }
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::FileNotFound(path.display().to_string()),
        _ => SourceError::IoError(e),
    })
}
