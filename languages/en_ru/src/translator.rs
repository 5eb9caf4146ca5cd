use async_trait::async_trait;
use podlex_translator::{
    BatchTranslator, LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};
use reqwest::StatusCode;

fn check_status(status: StatusCode) -> Result<(), TranslateError> {
    if status == 429 {
        return Err(TranslateError::RateLimitExceeded);
    }

    if !status.is_success() {
        return Err(TranslateError::ApiError(format!("HTTP {}", status)));
    }

    Ok(())
}

async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, TranslateError> {
    check_status(response.status())?;
    response
        .json()
        .await
        .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))
}

/// MyMemory free API. One GET translates a single word or a newline-joined batch.
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl MyMemoryTranslator {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    async fn request(&self, text: &str, from: &str, to: &str) -> Result<String, TranslateError> {
        let langpair = format!("{}|{}", from, to);
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        let json = read_json(response).await?;
        parse_mymemory(&json)
    }
}

/// Extract `responseData.translatedText`, honoring the in-body status code
pub fn parse_mymemory(json: &serde_json::Value) -> Result<String, TranslateError> {
    let status = json["responseStatus"]
        .as_u64()
        .or_else(|| json["responseStatus"].as_str().and_then(|s| s.parse().ok()));

    match status {
        Some(200) => {}
        Some(429) => return Err(TranslateError::RateLimitExceeded),
        Some(code) => return Err(TranslateError::ApiError(format!("MyMemory status {}", code))),
        None => return Err(TranslateError::ApiError("Missing responseStatus".to_string())),
    }

    json["responseData"]["translatedText"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(TranslateError::EmptyResponse)
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let translated = self.request(text, &from, &to).await?;

        Ok(Translation {
            text: translated,
            provider: "mymemory".to_string(),
            alternatives: vec![],
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MyMemory".to_string(),
        }
    }
}

#[async_trait]
impl BatchTranslator for MyMemoryTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Vec<String>, TranslateError> {
        let joined = texts.join("\n");
        let translated = self.request(&joined, &from, &to).await?;
        Ok(translated.split('\n').map(|line| line.trim().to_string()).collect())
    }

    fn metadata(&self) -> ProviderMetadata {
        Translator::metadata(self)
    }
}

/// LibreTranslate instance, tends to do better on IT vocabulary
#[derive(Clone)]
pub struct LibreTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl LibreTranslator {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

pub fn parse_libre(json: &serde_json::Value) -> Result<String, TranslateError> {
    if let Some(error) = json["error"].as_str() {
        return Err(TranslateError::ApiError(error.to_string()));
    }

    json["translatedText"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(TranslateError::EmptyResponse)
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let body = serde_json::json!({
            "q": text,
            "source": from,
            "target": to,
            "format": "text",
        });

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let json = read_json(response).await?;
        let translated = parse_libre(&json)?;

        Ok(Translation {
            text: translated,
            provider: "libretranslate".to_string(),
            alternatives: vec![],
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "LibreTranslate".to_string(),
        }
    }
}

/// Google Translate `gtx` endpoint with alternate translations (`dt=at`)
#[derive(Clone)]
pub struct GoogleSynonymTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleSynonymTranslator {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

/// Primary translation from `data[0][0][0]`, then alternates from the
/// per-part-of-speech blocks in `data[1]`, deduplicated in order.
pub fn parse_google(json: &serde_json::Value) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();
    let mut push = |value: &str| {
        let value = value.trim();
        if !value.is_empty() && !variants.iter().any(|v| v == value) {
            variants.push(value.to_string());
        }
    };

    if let Some(primary) = json[0][0][0].as_str() {
        push(primary);
    }

    if let Some(blocks) = json[1].as_array() {
        for block in blocks {
            if let Some(alternatives) = block[1].as_array() {
                alternatives.iter().filter_map(|v| v.as_str()).for_each(&mut push);
            }
        }
    }

    variants
}

#[async_trait]
impl Translator for GoogleSynonymTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", from.as_str()),
                ("tl", to.as_str()),
                ("dt", "t"),
                ("dt", "at"),
                ("q", text),
            ])
            .send()
            .await?;

        let json = read_json(response).await?;
        let mut variants = parse_google(&json).into_iter();
        let primary = variants.next().ok_or(TranslateError::EmptyResponse)?;

        Ok(Translation {
            text: primary,
            provider: "google".to_string(),
            alternatives: variants.collect(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
        }
    }
}
