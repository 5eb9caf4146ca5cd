use std::path::PathBuf;
use std::sync::Arc;

use podlex_config::enrich::EnrichConfig;
use podlex_core::dictionary::TranslationSource;
use podlex_core::normalize::accept_remote;
use podlex_core::schedule::{Delay, RateLimitedQueue};
use podlex_core::{Dictionary, Translation};
use podlex_lang_en_ru::{GoogleSynonymTranslator, LibreTranslator, MyMemoryTranslator};
use podlex_translator::{BatchTranslator, TranslateError, Translator};

use crate::persist::{PersistError, save_dictionary};

/// Remote services used to fill unresolved entries
pub struct Providers {
    pub bulk: Arc<dyn BatchTranslator>,
    pub primary: Arc<dyn Translator>,
    pub fallback: Arc<dyn Translator>,
    pub synonyms: Option<Arc<dyn Translator>>,
}

impl Providers {
    /// MyMemory for batches and as fallback, LibreTranslate as primary,
    /// Google alternates when synonyms are enabled. Every request shares
    /// one client bounded by the configured timeout.
    pub fn from_config(config: &EnrichConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let mymemory = Arc::new(MyMemoryTranslator::new(client.clone(), config.mymemory_url.clone()));
        let synonyms = config.synonyms.then(|| {
            Arc::new(GoogleSynonymTranslator::new(client.clone(), config.google_url.clone()))
                as Arc<dyn Translator>
        });

        Ok(Self {
            bulk: mymemory.clone(),
            primary: Arc::new(LibreTranslator::new(client, config.libretranslate_url.clone())),
            fallback: mymemory,
            synonyms,
        })
    }
}

/// Destination for intermediate saves during a long enrichment run
pub trait CheckpointSink: Send + Sync {
    fn save(&self, dictionary: &Dictionary) -> Result<(), PersistError>;
}

/// Checkpoints straight to the artifact path
pub struct FileCheckpoint {
    path: PathBuf,
}

impl FileCheckpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CheckpointSink for FileCheckpoint {
    fn save(&self, dictionary: &Dictionary) -> Result<(), PersistError> {
        save_dictionary(&self.path, dictionary)
    }
}

/// Saves after every `every` successful writes. A failed save only warns.
struct Checkpointer<'a> {
    sink: &'a dyn CheckpointSink,
    every: usize,
    pending: usize,
    written: usize,
}

impl<'a> Checkpointer<'a> {
    fn new(sink: &'a dyn CheckpointSink, every: usize) -> Self {
        Self {
            sink,
            every,
            pending: 0,
            written: 0,
        }
    }

    fn record(&mut self, dictionary: &Dictionary) {
        self.pending += 1;
        if self.every == 0 || self.pending < self.every {
            return;
        }
        self.pending = 0;

        match self.sink.save(dictionary) {
            Ok(()) => {
                self.written += 1;
                tracing::info!(
                    "Checkpoint: {} words, {} translated",
                    dictionary.len(),
                    dictionary.resolved_count()
                );
            }
            Err(e) => tracing::warn!("Checkpoint failed, continuing: {}", e),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub batch_filled: usize,
    pub individual_filled: usize,
    pub synonyms_extended: usize,
    pub checkpoints: usize,
}

/// Fills placeholders through remote services, strictly one request at a time
pub struct Enricher<'a> {
    config: &'a EnrichConfig,
    providers: Providers,
    delay: Arc<dyn Delay>,
    sink: &'a dyn CheckpointSink,
}

impl<'a> Enricher<'a> {
    pub fn new(
        config: &'a EnrichConfig,
        providers: Providers,
        delay: Arc<dyn Delay>,
        sink: &'a dyn CheckpointSink,
    ) -> Self {
        Self {
            config,
            providers,
            delay,
            sink,
        }
    }

    /// Run the batch and individual phases, then the synonym phase when a
    /// synonym provider is configured. Curated keys are never touched by
    /// the synonym phase.
    pub async fn run(&self, dictionary: &mut Dictionary, curated: &dyn TranslationSource) -> EnrichReport {
        let mut checkpointer = Checkpointer::new(self.sink, self.config.checkpoint_every);
        let mut report = EnrichReport {
            batch_filled: self.batch_phase(dictionary, &mut checkpointer).await,
            individual_filled: self.individual_phase(dictionary, &mut checkpointer).await,
            ..Default::default()
        };

        if let Some(provider) = &self.providers.synonyms {
            report.synonyms_extended = self
                .synonym_phase(provider.as_ref(), dictionary, curated, &mut checkpointer)
                .await;
        }

        report.checkpoints = checkpointer.written;
        report
    }

    async fn batch_phase(&self, dictionary: &mut Dictionary, checkpointer: &mut Checkpointer<'_>) -> usize {
        let unresolved = dictionary.unresolved_keys();
        if unresolved.is_empty() {
            return 0;
        }

        let batches: Vec<Vec<String>> = unresolved
            .chunks(self.config.batch_size.max(1))
            .map(<[String]>::to_vec)
            .collect();
        let total = batches.len();
        tracing::info!("Batch phase: {} words in {} batches", unresolved.len(), total);

        let mut queue = RateLimitedQueue::new(batches, self.config.batch_delay(), self.delay.clone());
        let mut filled = 0;

        while let Some(batch) = queue.next().await {
            let lines = match self
                .providers
                .bulk
                .translate_batch(&batch, self.config.from_lang.clone(), self.config.to_lang.clone())
                .await
            {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!("Batch {}/{} failed: {}", queue.released(), total, e);
                    continue;
                }
            };

            let mut batch_filled = 0;
            for (j, word) in batch.iter().enumerate() {
                // The service collapses trailing empty lines
                let Some(line) = lines.get(j).or(lines.last()) else {
                    break;
                };
                let Some(accepted) = accept_remote(word, line) else {
                    tracing::debug!("Rejected {:?} for {}", line, word);
                    continue;
                };
                if let Some(slot) = dictionary.get_mut(word) {
                    *slot = Translation::single(accepted);
                    batch_filled += 1;
                    checkpointer.record(dictionary);
                }
            }

            filled += batch_filled;
            tracing::info!("Batch {}/{}: +{} (total {})", queue.released(), total, batch_filled, filled);
        }

        filled
    }

    async fn individual_phase(&self, dictionary: &mut Dictionary, checkpointer: &mut Checkpointer<'_>) -> usize {
        let pending: Vec<String> = dictionary
            .unresolved_keys()
            .into_iter()
            .take(self.config.individual_cap)
            .collect();
        if pending.is_empty() {
            return 0;
        }
        tracing::info!("Individual phase: {} words", pending.len());

        let mut queue = RateLimitedQueue::new(pending, self.config.word_delay(), self.delay.clone());
        let mut filled = 0;

        while let Some(word) = queue.next().await {
            let Some(accepted) = self.translate_single(&word).await else {
                continue;
            };
            if let Some(slot) = dictionary.get_mut(&word) {
                *slot = Translation::single(accepted);
                filled += 1;
                checkpointer.record(dictionary);
            }
        }

        tracing::info!("Individual phase: +{}", filled);
        filled
    }

    /// Primary service first, fallback on failure or rejection
    async fn translate_single(&self, word: &str) -> Option<String> {
        for provider in [&self.providers.primary, &self.providers.fallback] {
            let name = provider.metadata().name;
            match provider
                .translate(word, self.config.from_lang.clone(), self.config.to_lang.clone())
                .await
            {
                Ok(translation) => match accept_remote(word, &translation.text) {
                    Some(accepted) => {
                        tracing::debug!("{} <- {} ({})", word, accepted, translation.provider);
                        return Some(accepted);
                    }
                    None => tracing::debug!("{} rejected {:?} for {}", name, translation.text, word),
                },
                Err(e) if e.is_timeout() => tracing::debug!("{} timed out for {}", name, word),
                Err(e) => tracing::debug!("{} failed for {}: {}", name, word, e),
            }
        }
        None
    }

    async fn synonym_phase(
        &self,
        provider: &dyn Translator,
        dictionary: &mut Dictionary,
        curated: &dyn TranslationSource,
        checkpointer: &mut Checkpointer<'_>,
    ) -> usize {
        let keys: Vec<String> = dictionary
            .keys()
            .filter(|key| !curated.contains(key))
            .map(str::to_string)
            .collect();
        tracing::info!("Synonym phase: {} words", keys.len());

        let mut queue = RateLimitedQueue::new(keys, self.config.synonym_delay(), self.delay.clone());
        let mut extended = 0;

        while let Some(key) = queue.next().await {
            let found = match provider
                .translate(&key, self.config.from_lang.clone(), self.config.to_lang.clone())
                .await
            {
                Ok(translation) => Translation::from_values(
                    std::iter::once(translation.text)
                        .chain(translation.alternatives)
                        .filter_map(|candidate| accept_remote(&key, &candidate)),
                ),
                Err(e) => {
                    tracing::debug!("Synonyms failed for {}: {}", key, e);
                    continue;
                }
            };

            let Some(slot) = dictionary.get_mut(&key) else {
                continue;
            };
            let changed = if slot.is_placeholder() {
                let resolved = !found.is_placeholder();
                if resolved {
                    *slot = found;
                }
                resolved
            } else {
                slot.extend_with(&found) > 0
            };

            if changed {
                tracing::debug!("{}: {}", key, slot.display());
                extended += 1;
                checkpointer.record(dictionary);
            }
            if queue.released() % 100 == 0 {
                tracing::info!("Synonyms: {} processed, {} extended", queue.released(), extended);
            }
        }

        extended
    }
}
