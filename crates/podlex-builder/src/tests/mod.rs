mod enrich_tests;

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use podlex_core::Dictionary;
use podlex_core::schedule::Delay;
use podlex_translator::{
    BatchTranslator, LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};

use crate::enrich::CheckpointSink;
use crate::persist::PersistError;

fn metadata(name: &str) -> ProviderMetadata {
    ProviderMetadata {
        name: name.to_string(),
    }
}

/// Records requested waits instead of sleeping
#[derive(Default)]
pub struct RecordingDelay {
    pub waits: Mutex<Vec<Duration>>,
}

#[async_trait::async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

/// Bulk service answering from a queue of scripted replies
#[derive(Default)]
pub struct ScriptedBulk {
    pub replies: Mutex<VecDeque<Result<Vec<String>, TranslateError>>>,
    pub requests: Mutex<Vec<Vec<String>>>,
}

impl ScriptedBulk {
    pub fn with_replies(replies: Vec<Result<Vec<&str>, TranslateError>>) -> Self {
        let replies = replies
            .into_iter()
            .map(|reply| reply.map(|lines| lines.into_iter().map(str::to_string).collect()))
            .collect();
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BatchTranslator for ScriptedBulk {
    async fn translate_batch(
        &self,
        texts: &[String],
        _from: LanguageCode,
        _to: LanguageCode,
    ) -> Result<Vec<String>, TranslateError> {
        self.requests.lock().unwrap().push(texts.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TranslateError::ApiError("no scripted reply".to_string())))
    }

    fn metadata(&self) -> ProviderMetadata {
        metadata("scripted-bulk")
    }
}

/// Single-word service backed by a lookup function
pub struct FnTranslator {
    name: &'static str,
    answer: fn(&str) -> Result<Translation, TranslateError>,
    pub calls: Mutex<Vec<String>>,
}

impl FnTranslator {
    pub fn new(name: &'static str, answer: fn(&str) -> Result<Translation, TranslateError>) -> Self {
        Self {
            name,
            answer,
            calls: Mutex::default(),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self::new(name, |_| Err(TranslateError::RateLimitExceeded))
    }
}

#[async_trait::async_trait]
impl Translator for FnTranslator {
    async fn translate(
        &self,
        text: &str,
        _from: LanguageCode,
        _to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls.lock().unwrap().push(text.to_string());
        (self.answer)(text)
    }

    fn metadata(&self) -> ProviderMetadata {
        metadata(self.name)
    }
}

pub fn remote(text: &str, alternatives: &[&str]) -> Translation {
    Translation {
        text: text.to_string(),
        provider: "fake".to_string(),
        alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
    }
}

/// Keeps the resolved count of every checkpoint instead of writing files
#[derive(Default)]
pub struct RecordingSink {
    pub saves: Mutex<Vec<usize>>,
    pub fail: bool,
}

impl CheckpointSink for RecordingSink {
    fn save(&self, dictionary: &Dictionary) -> Result<(), PersistError> {
        if self.fail {
            return Err(PersistError::Write {
                path: "checkpoint".to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.saves.lock().unwrap().push(dictionary.resolved_count());
        Ok(())
    }
}
