use std::path::Path;
use std::time::Duration;

use futures_util::future::join_all;
use podlex_config::sources::SourcesConfig;
use podlex_core::Dictionary;
use podlex_core::dictionary::Glossary;
use podlex_core::error::SourceError;
use podlex_lang_en_ru::{GlossaryLoader, WordList};

/// Previous artifact, or an empty dictionary when none exists yet.
///
/// A file that exists but does not parse is an error: carrying on would
/// overwrite it with a fresh build.
pub fn load_existing(path: &Path) -> Result<Dictionary, SourceError> {
    match GlossaryLoader::load_dictionary_file(path) {
        Ok(dictionary) => {
            tracing::info!("Existing dictionary: {} words", dictionary.len());
            Ok(dictionary)
        }
        Err(SourceError::FileNotFound(_)) => {
            tracing::info!("No dictionary at {}, starting empty", path.display());
            Ok(Dictionary::new())
        }
        Err(e) => Err(e),
    }
}

pub fn load_curated(path: &Path) -> Glossary {
    load_optional("it-curated", path)
}

pub fn load_phrasal(path: &Path) -> Glossary {
    load_optional("phrasal-verbs", path)
}

fn load_optional(name: &str, path: &Path) -> Glossary {
    GlossaryLoader::load_curated_file(name, path).unwrap_or_else(|e| {
        tracing::warn!("{} unavailable ({}), continuing without it", name, e);
        Glossary::new(name)
    })
}

/// HTTP access to the remote bilingual dumps and word lists
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("podlex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, SourceError> {
        let fetch_failed = |reason: String| SourceError::FetchFailed {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_failed(format!("HTTP {}", response.status())));
        }

        response.text().await.map_err(|e| fetch_failed(e.to_string()))
    }

    /// Union of every dump that could be fetched and parsed; earlier URLs win per key
    pub async fn fetch_bilingual(&self, urls: &[String]) -> Glossary {
        let results = join_all(urls.iter().map(|url| async move {
            let json = self.fetch_text(url).await?;
            GlossaryLoader::bilingual_from_json(url, &json)
        }))
        .await;

        let mut merged = Glossary::new("bilingual");
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(glossary) => merged = merged.merge(glossary),
                Err(e) => tracing::warn!("EN-RU dictionary {} unavailable: {}", url, e),
            }
        }

        if merged.is_empty() {
            tracing::warn!("No EN-RU dictionary loaded, coverage will rely on curated and remote sources");
        }
        merged
    }

    /// Frequency lists concatenated in URL order. Falls back to the embedded
    /// list when none of them could be fetched.
    pub async fn fetch_word_lists(&self, urls: &[String]) -> WordList {
        let results = join_all(urls.iter().map(|url| self.fetch_text(url))).await;

        let mut words = WordList::new();
        let mut fetched = 0;
        for (url, result) in urls.iter().zip(results) {
            match result {
                Ok(text) => {
                    let list = WordList::from_text(&text);
                    tracing::info!("Word list {}: {} words", url, list.len());
                    words = words.merge(list);
                    fetched += 1;
                }
                Err(e) => tracing::warn!("Word list {} unavailable: {}", url, e),
            }
        }

        if fetched == 0 {
            let embedded = WordList::embedded();
            tracing::warn!("Using embedded word list ({} words)", embedded.len());
            return embedded;
        }
        words
    }

    /// Fetch dumps and word lists concurrently; both finish before returning
    pub async fn fetch_all(&self, config: &SourcesConfig) -> (Glossary, WordList) {
        tokio::join!(
            self.fetch_bilingual(&config.bilingual_urls),
            self.fetch_word_lists(&config.word_list_urls),
        )
    }
}
