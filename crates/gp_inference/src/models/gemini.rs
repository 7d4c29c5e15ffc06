use async_trait::async_trait;
use gp_core::{Error, GeneratedFeed, GenerativeSource, Result, SourceAttribution};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::prompt::{MASTER_PROMPT, SYSTEM_INSTRUCTIONS};
use crate::repair::repair;
use crate::Config;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<Value>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "category": {
                    "type": "STRING",
                    "enum": ["industry", "culture", "video_parts", "event_2025_recap", "event_2026_schedule", "brand_history"]
                },
                "region": { "type": "STRING", "enum": ["BRAZIL", "EUROPE", "USA", "GLOBAL"] },
                "date": { "type": "STRING" },
                "title": { "type": "STRING" },
                "summary": { "type": "STRING" },
                "content": { "type": "STRING" },
                "url": { "type": "STRING" },
                "is_hero": { "type": "BOOLEAN" },
                "youtube_id": { "type": "STRING" },
                "image_url": { "type": "STRING" }
            },
            "required": ["category", "title", "summary", "url", "is_hero", "content"]
        }
    })
}

/// Turns a raw generateContent answer into a feed.
pub(crate) fn feed_from_response(response: GenerateContentResponse) -> Result<GeneratedFeed> {
    let candidate = response.candidates.into_iter().next();

    let text = candidate
        .as_ref()
        .map(|c| {
            c.content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "[]".to_string());

    let articles = repair(&text)?;

    let attribution = candidate
        .and_then(|c| c.grounding_metadata)
        .map(|m| {
            m.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .map(|web| SourceAttribution { uri: web.uri, title: web.title })
                .collect()
        })
        .unwrap_or_default();

    Ok(GeneratedFeed { articles, attribution })
}

pub struct GeminiSource {
    client: Arc<Client>,
    api_key: Option<String>,
    model_name: String,
    base_url: String,
}

impl GeminiSource {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model_name: config.model_name.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn endpoint(&self, api_key: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        ))
        .map_err(|e| Error::Uplink(format!("Invalid endpoint: {}", e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

impl fmt::Debug for GeminiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSource")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl GenerativeSource for GeminiSource {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn fetch(&self) -> Result<GeneratedFeed> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Uplink("API key is missing from environment.".to_string()))?;

        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: Some(SYSTEM_INSTRUCTIONS.to_string()) }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(MASTER_PROMPT.to_string()) }],
            }],
            tools: vec![json!({ "googleSearch": {} })],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        tracing::debug!("Requesting feed from {} ({})", self.name(), self.model_name);

        let response = self
            .client
            .post(self.endpoint(api_key)?)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini scan failed: {}", e);
                Error::Uplink(e.to_string())
            })?
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| Error::CorruptResponse(format!("Unexpected response envelope: {}", e.without_url())))?;

        feed_from_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_missing_api_key_is_uplink_error() {
        let source = GeminiSource::new(&Config::default());
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, Error::Uplink(ref msg) if msg.contains("API key is missing")));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config { api_key: Some("secret".to_string()), ..Config::default() };
        let rendered = format!("{:?}", GeminiSource::new(&config));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_endpoint_carries_key() {
        let config = Config { api_key: Some("k".to_string()), ..Config::default() };
        let source = GeminiSource::new(&config);
        let url = source.endpoint("k").unwrap();
        assert!(url.path().ends_with(":generateContent"));
        assert_eq!(url.query(), Some("key=k"));
    }

    #[test]
    fn test_feed_with_grounding() {
        let articles = r#"[{"category":"video_parts","title":"New part drops","summary":"s","content":"Kickflip lines","url":"https://x.example","is_hero":true,"youtube_id":"abcdefghijk"}]"#;
        let feed = feed_from_response(response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": articles }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://thrashermagazine.com", "title": "Thrasher" } },
                        {}
                    ]
                }
            }]
        })))
        .unwrap();

        assert_eq!(feed.articles.len(), 1);
        assert!(feed.articles[0].is_featured);
        assert_eq!(feed.attribution, vec![SourceAttribution {
            uri: "https://thrashermagazine.com".to_string(),
            title: "Thrasher".to_string(),
        }]);
    }

    #[test]
    fn test_empty_answer_is_empty_feed() {
        let feed = feed_from_response(response(json!({ "candidates": [] }))).unwrap();
        assert!(feed.articles.is_empty());
        assert!(feed.attribution.is_empty());
    }

    #[test]
    fn test_garbage_answer_is_corrupt() {
        let err = feed_from_response(response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "no json here" }] } }]
        })))
        .unwrap_err();
        assert!(matches!(err, Error::CorruptResponse(_)));
    }
}
