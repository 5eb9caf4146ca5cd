use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_bilingual_urls() -> Vec<String> {
    vec![
        "https://raw.githubusercontent.com/spishniak/rus-eng-eng-rus-txt-json/master/eng-rus.json"
            .to_string(),
    ]
}

fn default_word_list_urls() -> Vec<String> {
    vec![
        "https://raw.githubusercontent.com/tgmgroup/Word-List-from-Oxford-Longman-5000/master/Oxford%205000.txt"
            .to_string(),
        "https://raw.githubusercontent.com/first20hours/google-10000-english/master/20k.txt"
            .to_string(),
    ]
}

fn default_fetch_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    /// EN-RU dumps, earlier urls win on duplicate keys
    #[serde(default = "default_bilingual_urls")]
    pub bilingual_urls: Vec<String>,
    /// Frequency lists, newline delimited
    #[serde(default = "default_word_list_urls")]
    pub word_list_urls: Vec<String>,
    /// Dumps are large, so they get a longer budget than translation calls
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl SourcesConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            bilingual_urls: default_bilingual_urls(),
            word_list_urls: default_word_list_urls(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}
