use crate::dictionary::TranslationSource;
use crate::language::BaseFormResolver;
use crate::normalize::{is_shouting, normalize_translation};
use crate::{Dictionary, Translation};

/// Counters reported at the end of a merge pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub removed: usize,
    pub added: usize,
    pub filled: usize,
    pub phrasal_added: usize,
    pub curated_applied: usize,
    pub renormalized: usize,
}

/// Owns the dictionary for one run and folds every local source into it.
///
/// Precedence per key: curated, existing resolved value, bilingual hit,
/// base-form resolution, placeholder. Only the curated pass may replace a
/// resolved value.
pub struct MergeEngine<'a> {
    dictionary: Dictionary,
    curated: &'a dyn TranslationSource,
    bilingual: &'a dyn TranslationSource,
    resolver: &'a dyn BaseFormResolver,
    report: MergeReport,
}

impl<'a> MergeEngine<'a> {
    pub fn new(
        existing: Dictionary,
        curated: &'a dyn TranslationSource,
        bilingual: &'a dyn TranslationSource,
        resolver: &'a dyn BaseFormResolver,
    ) -> Self {
        let (curated_meta, bilingual_meta) = (curated.metadata(), bilingual.metadata());
        tracing::debug!(
            "Merging with {} ({} entries) and {} ({} entries)",
            curated_meta.name,
            curated_meta.entry_count,
            bilingual_meta.name,
            bilingual_meta.entry_count
        );

        Self {
            dictionary: existing,
            curated,
            bilingual,
            resolver,
            report: MergeReport::default(),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn report(&self) -> &MergeReport {
        &self.report
    }

    /// Drop acronym keys that should never be offered as lookups
    pub fn remove_abbreviations<S: AsRef<str>>(&mut self, abbreviations: &[S]) -> usize {
        let mut removed = 0;
        for abbreviation in abbreviations {
            if self.dictionary.remove(abbreviation.as_ref()).is_some() {
                tracing::info!("Removed abbreviation: {}", abbreviation.as_ref());
                removed += 1;
            }
        }
        self.report.removed += removed;
        removed
    }

    /// Best translation currently known for `key`
    pub fn pick(&self, key: &str) -> Translation {
        if let Some(curated) = self.curated.lookup(key) {
            return curated.clone();
        }

        if let Some(current) = self.dictionary.get(key)
            && !current.is_placeholder()
        {
            return current.clone();
        }

        self.lookup_local(key).unwrap_or_default()
    }

    fn lookup_local(&self, key: &str) -> Option<Translation> {
        if let Some(direct) = self.bilingual.lookup(key) {
            return Some(direct.clone());
        }

        self.resolver
            .resolve(key, self.curated, self.bilingual)
            .map(|resolution| {
                tracing::debug!(
                    "Resolved {} via {} ({})",
                    key,
                    resolution.candidate.base_form,
                    resolution.candidate.rule
                );
                resolution.translation
            })
    }

    /// Append new word-list keys, in list order, until the dictionary holds
    /// `target` entries. Existing keys keep their place and value.
    pub fn extend_from_word_list<I, S>(&mut self, words: I, target: usize) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for word in words {
            if self.dictionary.len() >= target {
                break;
            }
            let key = word.as_ref();
            if self.dictionary.contains_key(key) {
                continue;
            }
            let translation = self.pick(key);
            self.dictionary.insert(key, translation);
            added += 1;
        }
        tracing::info!("Added {} words from word lists", added);
        self.report.added += added;
        added
    }

    /// Retry every placeholder against the bilingual source and the resolver
    pub fn fill_placeholders(&mut self) -> usize {
        let mut filled = 0;
        for key in self.dictionary.unresolved_keys() {
            if let Some(translation) = self.lookup_local(&key)
                && let Some(slot) = self.dictionary.get_mut(&key)
            {
                *slot = translation;
                filled += 1;
            }
        }
        if filled > 0 {
            tracing::info!("Filled {} entries from EN-RU (direct + base form)", filled);
        }
        self.report.filled += filled;
        filled
    }

    /// Add phrasal verbs for keys not present yet
    pub fn merge_phrasal(&mut self, phrasal: &dyn TranslationSource) -> usize {
        let mut added = 0;
        for (key, translation) in phrasal.entries() {
            if self.dictionary.insert_if_absent(key, translation.clone()) {
                added += 1;
            }
        }
        tracing::info!("Phrasal verbs merged from {}: {}", phrasal.metadata().name, added);
        self.report.phrasal_added += added;
        added
    }

    /// Apply the curated override pass and casing cleanup, then hand the
    /// dictionary back to the caller.
    pub fn finish(mut self) -> (Dictionary, MergeReport) {
        self.report.curated_applied += apply_curated(&mut self.dictionary, self.curated);
        self.report.renormalized += normalize_shouting(&mut self.dictionary, self.curated);
        (self.dictionary, self.report)
    }
}

/// Overwrite every key the curated source knows and append curated keys that
/// are missing. Returns the number of entries changed.
pub fn apply_curated(dictionary: &mut Dictionary, curated: &dyn TranslationSource) -> usize {
    let mut changed = 0;
    for (key, translation) in curated.entries() {
        match dictionary.get_mut(key) {
            Some(current) if current == translation => {}
            Some(current) => {
                *current = translation.clone();
                changed += 1;
            }
            None if !translation.is_placeholder() => {
                dictionary.insert(key, translation.clone());
                changed += 1;
            }
            None => {}
        }
    }
    changed
}

/// Sentence-case all-caps values longer than an acronym. Keys held by
/// `curated` keep their value as written. Returns the number of entries touched.
pub fn normalize_shouting(dictionary: &mut Dictionary, curated: &dyn TranslationSource) -> usize {
    let mut touched = 0;
    for (key, translation) in dictionary.iter_mut() {
        if curated.contains(key) || !translation.values().iter().any(|v| is_shouting(v)) {
            continue;
        }
        let fixed = std::mem::take(translation).map_values(|v| {
            if is_shouting(v) {
                normalize_translation(v)
            } else {
                v.to_string()
            }
        });
        *translation = fixed;
        touched += 1;
    }
    touched
}
