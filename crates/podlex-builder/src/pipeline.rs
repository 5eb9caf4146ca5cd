use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use podlex_config::BuildConfig;
use podlex_core::Dictionary;
use podlex_core::dictionary::{Glossary, TranslationSource};
use podlex_core::language::NoResolver;
use podlex_core::merge::{MergeEngine, MergeReport, apply_curated, normalize_shouting};
use podlex_core::schedule::TokioDelay;
use podlex_lang_en_ru::{EnglishMorphology, GlossaryLoader, WordList};

use crate::enrich::{Enricher, FileCheckpoint, Providers};
use crate::persist::{DictionaryStats, save_dictionary, summarize};
use crate::sources::{self, SourceFetcher};

/// Every local source the merge step consumes
pub struct MergeInputs<'a> {
    pub curated: &'a dyn TranslationSource,
    pub bilingual: &'a dyn TranslationSource,
    pub phrasal: &'a dyn TranslationSource,
    pub words: &'a WordList,
}

/// Fold all local sources into `existing`. No network access.
pub fn merge_sources(existing: Dictionary, inputs: &MergeInputs<'_>, config: &BuildConfig) -> (Dictionary, MergeReport) {
    let resolver = EnglishMorphology::new();
    let mut engine = MergeEngine::new(existing, inputs.curated, inputs.bilingual, &resolver);

    let is_abbreviation = |word: &str| config.abbreviations.iter().any(|a| a == word);

    engine.remove_abbreviations(&config.abbreviations);
    // Word lists contain some of the acronyms too
    engine.extend_from_word_list(inputs.words.iter().filter(|w| !is_abbreviation(*w)), config.target_size);
    engine.fill_placeholders();
    engine.merge_phrasal(inputs.phrasal);
    engine.finish()
}

/// Full pipeline: load, fetch, merge, enrich, save
pub async fn run_build(config: &BuildConfig) -> anyhow::Result<DictionaryStats> {
    let paths = &config.paths;

    let existing = sources::load_existing(&paths.dictionary)
        .with_context(|| format!("Failed to load existing dictionary {}", paths.dictionary.display()))?;
    let curated = sources::load_curated(&paths.curated);
    let phrasal = sources::load_phrasal(&paths.phrasal);
    tracing::info!("IT-curated: {} terms, phrasal verbs: {}", curated.len(), phrasal.len());

    let fetcher = SourceFetcher::new(config.sources.fetch_timeout()).context("Failed to create HTTP client")?;
    let (bilingual, words) = fetcher.fetch_all(&config.sources).await;

    let inputs = MergeInputs {
        curated: &curated,
        bilingual: &bilingual,
        phrasal: &phrasal,
        words: &words,
    };
    let (mut dictionary, report) = merge_sources(existing, &inputs, config);
    tracing::info!(
        "Merged: {} words (+{} new, {} filled locally, {} phrasal, {} curated, {} removed)",
        dictionary.len(),
        report.added,
        report.filled,
        report.phrasal_added,
        report.curated_applied,
        report.removed
    );

    if config.enrich.enabled {
        enrich(config, &mut dictionary, &curated).await?;
    } else {
        tracing::info!("Remote enrichment disabled");
    }

    save_dictionary(&paths.dictionary, &dictionary)
        .with_context(|| format!("Failed to save dictionary {}", paths.dictionary.display()))?;

    let stats = summarize(&dictionary);
    tracing::info!("Wrote {}: {}", paths.dictionary.display(), stats);
    Ok(stats)
}

async fn enrich(config: &BuildConfig, dictionary: &mut Dictionary, curated: &Glossary) -> anyhow::Result<()> {
    let unresolved = dictionary.unresolved_keys().len();
    if unresolved == 0 && !config.enrich.synonyms {
        return Ok(());
    }
    tracing::info!("Remote enrichment for {} unresolved words", unresolved);

    let providers = Providers::from_config(&config.enrich).context("Failed to create translation clients")?;
    let checkpoint = FileCheckpoint::new(&config.paths.dictionary);
    let enricher = Enricher::new(&config.enrich, providers, Arc::new(TokioDelay), &checkpoint);

    let report = enricher.run(dictionary, curated).await;
    tracing::info!(
        "Enrichment: +{} batch, +{} individual, {} synonyms, {} checkpoints",
        report.batch_filled,
        report.individual_filled,
        report.synonyms_extended,
        report.checkpoints
    );

    // Remote output must never shadow a curated value
    apply_curated(dictionary, curated);
    normalize_shouting(dictionary, curated);
    Ok(())
}

/// Quick offline update: drop abbreviations, add phrasal verbs, save
pub fn run_apply_updates(config: &BuildConfig) -> anyhow::Result<DictionaryStats> {
    let paths = &config.paths;

    let existing = sources::load_existing(&paths.dictionary)
        .with_context(|| format!("Failed to load existing dictionary {}", paths.dictionary.display()))?;
    let phrasal = sources::load_phrasal(&paths.phrasal);

    let empty = Glossary::new("none");
    let mut engine = MergeEngine::new(existing, &empty, &empty, &NoResolver);
    engine.remove_abbreviations(&config.abbreviations);
    engine.merge_phrasal(&phrasal);
    let (dictionary, report) = engine.finish();

    save_dictionary(&paths.dictionary, &dictionary)
        .with_context(|| format!("Failed to save dictionary {}", paths.dictionary.display()))?;

    tracing::info!(
        "Removed {} abbreviations, added {} phrasal verbs",
        report.removed,
        report.phrasal_added
    );
    Ok(summarize(&dictionary))
}

pub fn run_stats(path: &Path) -> anyhow::Result<DictionaryStats> {
    let dictionary = GlossaryLoader::load_dictionary_file(path)
        .with_context(|| format!("Failed to read dictionary {}", path.display()))?;
    Ok(summarize(&dictionary))
}
