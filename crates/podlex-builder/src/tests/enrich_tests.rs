use std::sync::Arc;
use std::time::Duration;

use podlex_config::enrich::EnrichConfig;
use podlex_core::dictionary::Glossary;
use podlex_core::{Dictionary, Translation};
use podlex_translator::{BatchTranslator, TranslateError, Translator};

use super::{FnTranslator, RecordingDelay, RecordingSink, ScriptedBulk, remote};
use crate::enrich::{EnrichReport, Enricher, Providers};

fn unresolved(keys: &[&str]) -> Dictionary {
    keys.iter().map(|k| (*k, Translation::placeholder())).collect()
}

fn config() -> EnrichConfig {
    EnrichConfig {
        batch_size: 30,
        batch_delay_ms: 300,
        word_delay_ms: 250,
        synonym_delay_ms: 1200,
        individual_cap: 300,
        checkpoint_every: 200,
        ..EnrichConfig::default()
    }
}

fn providers(bulk: ScriptedBulk, primary: FnTranslator, fallback: FnTranslator) -> Providers {
    Providers {
        bulk: Arc::new(bulk),
        primary: Arc::new(primary),
        fallback: Arc::new(fallback),
        synonyms: None,
    }
}

async fn enrich(
    config: &EnrichConfig,
    providers: Providers,
    dictionary: &mut Dictionary,
) -> (EnrichReport, Arc<RecordingDelay>) {
    let delay = Arc::new(RecordingDelay::default());
    let sink = RecordingSink::default();
    let enricher = Enricher::new(config, providers, delay.clone(), &sink);
    let report = enricher.run(dictionary, &Glossary::new("curated")).await;
    (report, delay)
}

fn single(value: &str) -> Option<Translation> {
    Some(Translation::single(value))
}

#[tokio::test]
async fn batch_rejects_echoes_and_latin_output() {
    let mut dictionary = unresolved(&["core", "length", "unmappable", "node"]);
    let bulk = ScriptedBulk::with_replies(vec![Ok(vec!["ядро", "LENGTH", "xyz"])]);
    let fallback = FnTranslator::new("fallback", |word| match word {
        "node" => Ok(remote("узел", &[])),
        _ => Err(TranslateError::EmptyResponse),
    });

    let (report, _) = enrich(
        &config(),
        providers(bulk, FnTranslator::failing("primary"), fallback),
        &mut dictionary,
    )
    .await;

    assert_eq!(dictionary.get("core").cloned(), single("Ядро"));
    assert_eq!(dictionary.get("node").cloned(), single("Узел"));
    assert!(dictionary.get("length").is_some_and(Translation::is_placeholder));
    assert!(dictionary.get("unmappable").is_some_and(Translation::is_placeholder));
    assert_eq!(report.batch_filled, 1);
    assert_eq!(report.individual_filled, 1);
}

#[tokio::test]
async fn missing_batch_lines_fall_back_to_last_line() {
    let mut dictionary = unresolved(&["cat", "kitty"]);
    let bulk = ScriptedBulk::with_replies(vec![Ok(vec!["кошка"])]);

    let (report, _) = enrich(
        &config(),
        providers(bulk, FnTranslator::failing("primary"), FnTranslator::failing("fallback")),
        &mut dictionary,
    )
    .await;

    assert_eq!(report.batch_filled, 2);
    assert_eq!(dictionary.get("kitty").cloned(), single("Кошка"));
}

#[tokio::test]
async fn failed_batch_is_skipped_and_phases_are_paced() {
    let mut dictionary = unresolved(&["alpha", "beta", "gamma"]);
    let bulk = ScriptedBulk::with_replies(vec![
        Err(TranslateError::RateLimitExceeded),
        Ok(vec!["гамма"]),
    ]);
    let config = EnrichConfig {
        batch_size: 2,
        ..config()
    };

    let (report, delay) = enrich(
        &config,
        providers(bulk, FnTranslator::failing("primary"), FnTranslator::failing("fallback")),
        &mut dictionary,
    )
    .await;

    assert_eq!(report.batch_filled, 1);
    assert_eq!(report.individual_filled, 0);
    assert_eq!(dictionary.unresolved_keys(), ["alpha", "beta"]);

    // One wait between the two batches, one between the two single lookups
    assert_eq!(
        *delay.waits.lock().unwrap(),
        [Duration::from_millis(300), Duration::from_millis(250)]
    );
}

#[tokio::test]
async fn individual_phase_respects_cap_and_falls_back() {
    let mut dictionary = unresolved(&["one", "two", "three", "four", "five"]);
    let primary = Arc::new(FnTranslator::new("primary", |word| Ok(remote(word, &[]))));
    let fallback = Arc::new(FnTranslator::new("fallback", |_| Ok(remote("перевод", &[]))));
    let config = EnrichConfig {
        individual_cap: 2,
        ..config()
    };

    let providers = Providers {
        bulk: Arc::new(ScriptedBulk::failing()),
        primary: primary.clone(),
        fallback: fallback.clone(),
        synonyms: None,
    };
    let (report, _) = enrich(&config, providers, &mut dictionary).await;

    assert_eq!(report.individual_filled, 2);
    assert_eq!(*primary.calls.lock().unwrap(), ["one", "two"]);
    assert_eq!(*fallback.calls.lock().unwrap(), ["one", "two"]);
    assert_eq!(dictionary.get("two").cloned(), single("Перевод"));
    assert_eq!(dictionary.unresolved_keys(), ["three", "four", "five"]);
}

#[tokio::test]
async fn checkpoints_follow_success_count() {
    let mut dictionary = unresolved(&["one", "two", "three", "four", "five"]);
    let bulk = ScriptedBulk::with_replies(vec![Ok(vec!["один", "два", "три", "четыре", "пять"])]);
    let config = EnrichConfig {
        checkpoint_every: 2,
        ..config()
    };

    let sink = RecordingSink::default();
    let enricher = Enricher::new(
        &config,
        providers(bulk, FnTranslator::failing("primary"), FnTranslator::failing("fallback")),
        Arc::new(RecordingDelay::default()),
        &sink,
    );
    let report = enricher.run(&mut dictionary, &Glossary::new("curated")).await;

    assert_eq!(report.batch_filled, 5);
    assert_eq!(report.checkpoints, 2);
    assert_eq!(*sink.saves.lock().unwrap(), [2, 4]);
}

#[tokio::test]
async fn failing_checkpoint_does_not_stop_enrichment() {
    let mut dictionary = unresolved(&["one", "two", "three"]);
    let bulk = ScriptedBulk::with_replies(vec![Ok(vec!["один", "два", "три"])]);
    let config = EnrichConfig {
        checkpoint_every: 1,
        ..config()
    };

    let sink = RecordingSink {
        fail: true,
        ..Default::default()
    };
    let enricher = Enricher::new(
        &config,
        providers(bulk, FnTranslator::failing("primary"), FnTranslator::failing("fallback")),
        Arc::new(RecordingDelay::default()),
        &sink,
    );
    let report = enricher.run(&mut dictionary, &Glossary::new("curated")).await;

    assert_eq!(report.batch_filled, 3);
    assert_eq!(report.checkpoints, 0);
    assert_eq!(dictionary.resolved_count(), 3);
}

#[tokio::test]
async fn synonyms_extend_without_replacing_primary() {
    let mut dictionary: Dictionary = [
        ("break", Translation::single("Ломать")),
        ("core", Translation::single("ядро")),
        ("node", Translation::placeholder()),
    ]
    .into_iter()
    .collect();
    let curated = Glossary::from_pairs("curated", [("core", Translation::single("ядро"))]);

    let google = Arc::new(FnTranslator::new("google", |word| match word {
        "break" => Ok(remote("перерыв", &["ломать", "разбивать", "break"])),
        "node" => Ok(remote("узел", &["вершина"])),
        _ => Err(TranslateError::EmptyResponse),
    }));
    let providers = Providers {
        bulk: Arc::new(ScriptedBulk::failing()),
        primary: Arc::new(FnTranslator::failing("primary")),
        fallback: Arc::new(FnTranslator::failing("fallback")),
        synonyms: Some(google.clone() as Arc<dyn Translator>),
    };

    let delay = Arc::new(RecordingDelay::default());
    let sink = RecordingSink::default();
    let config = config();
    let enricher = Enricher::new(&config, providers, delay.clone(), &sink);
    let report = enricher.run(&mut dictionary, &curated).await;

    assert_eq!(report.synonyms_extended, 2);
    assert_eq!(*google.calls.lock().unwrap(), ["break", "node"]);
    assert_eq!(
        dictionary.get("break"),
        Some(&Translation::from_values(["Ломать", "Перерыв", "Разбивать"]))
    );
    assert_eq!(
        dictionary.get("node"),
        Some(&Translation::from_values(["Узел", "Вершина"]))
    );
    assert_eq!(dictionary.get("core"), Some(&Translation::single("ядро")));
}

#[tokio::test]
async fn stalled_services_time_out_without_aborting() {
    // Accepts connections and never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = EnrichConfig {
        request_timeout_ms: 200,
        synonyms: false,
        mymemory_url: url.clone(),
        libretranslate_url: url,
        ..config()
    };
    let providers = Providers::from_config(&config).unwrap();

    let err = providers
        .primary
        .translate("core", "en".to_string(), "ru".to_string())
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    let err = providers
        .bulk
        .translate_batch(&["core".to_string()], "en".to_string(), "ru".to_string())
        .await
        .unwrap_err();
    assert!(err.is_timeout());

    let mut dictionary = unresolved(&["core", "node"]);
    let (report, _) = enrich(&config, providers, &mut dictionary).await;

    assert_eq!(report, EnrichReport::default());
    assert_eq!(dictionary.unresolved_keys(), ["core", "node"]);
    server.abort();
}
