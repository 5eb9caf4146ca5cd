use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_synonyms() -> bool {
    false
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "ru".to_string()
}

fn default_batch_size() -> usize {
    30
}

fn default_batch_delay_ms() -> u64 {
    300
}

fn default_individual_cap() -> usize {
    300
}

fn default_word_delay_ms() -> u64 {
    250
}

fn default_synonym_delay_ms() -> u64 {
    1200
}

fn default_checkpoint_every() -> usize {
    200
}

fn default_request_timeout_ms() -> u64 {
    8000
}

fn default_mymemory_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_libretranslate_url() -> String {
    "https://libretranslate.com/translate".to_string()
}

fn default_google_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichConfig {
    /// Query remote services for keys left unresolved by local sources
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Append alternate meanings from the synonym service to resolved keys
    #[serde(default = "default_synonyms")]
    pub synonyms: bool,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// Words per bulk request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
    /// Upper bound on one-word requests per run
    #[serde(default = "default_individual_cap")]
    pub individual_cap: usize,
    #[serde(default = "default_word_delay_ms")]
    pub word_delay_ms: u64,
    #[serde(default = "default_synonym_delay_ms")]
    pub synonym_delay_ms: u64,
    /// Successful writes between checkpoints, 0 disables checkpointing
    #[serde(default = "default_checkpoint_every")]
    pub checkpoint_every: usize,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_mymemory_url")]
    pub mymemory_url: String,
    #[serde(default = "default_libretranslate_url")]
    pub libretranslate_url: String,
    #[serde(default = "default_google_url")]
    pub google_url: String,
}

impl EnrichConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn word_delay(&self) -> Duration {
        Duration::from_millis(self.word_delay_ms)
    }

    pub fn synonym_delay(&self) -> Duration {
        Duration::from_millis(self.synonym_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            synonyms: default_synonyms(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            individual_cap: default_individual_cap(),
            word_delay_ms: default_word_delay_ms(),
            synonym_delay_ms: default_synonym_delay_ms(),
            checkpoint_every: default_checkpoint_every(),
            request_timeout_ms: default_request_timeout_ms(),
            mymemory_url: default_mymemory_url(),
            libretranslate_url: default_libretranslate_url(),
            google_url: default_google_url(),
        }
    }
}
