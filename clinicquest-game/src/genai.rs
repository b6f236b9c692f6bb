//! REST client for the hosted generative text/image API, implementing both
//! service seams.
//!
//! One attempt per call, no retries; the generator and avatar layers turn
//! any error raised here into their deterministic fallbacks.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

use crate::avatar::{AvatarRequest, ImageService};
use crate::generator::{QuizRequest, QuizService};
use crate::mission::Question;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a Gemini-style generate-content / generate-images API.
pub struct GenAiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GenAiClient {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different endpoint (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .context("failed to reach the generative service")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("generative service returned {status}: {error_text}");
        }

        response
            .json()
            .await
            .context("failed to parse the generative service response")
    }
}

/// Structured output schema forced onto the quiz model.
fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "answer": { "type": "STRING" },
                "points": { "type": "INTEGER" }
            },
            "required": ["question", "options", "answer", "points"]
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateImagesResponse {
    #[serde(default)]
    generated_images: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    image: ImagePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagePayload {
    image_bytes: String,
}

/// Pull the JSON array out of a model reply that may wrap it in prose.
fn extract_json_array(text: &str) -> &str {
    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']'))
        && start < end
    {
        return &text[start..=end];
    }
    text
}

/// Parse the model's text payload into questions.
fn parse_quiz_payload(text: &str) -> Result<Vec<Question>> {
    let trimmed = text.trim();
    let questions: Vec<Question> = serde_json::from_str(extract_json_array(trimmed))
        .context("quiz payload is not a question array")?;
    if questions.is_empty() {
        bail!("quiz payload carried no questions");
    }
    Ok(questions)
}

#[async_trait]
impl QuizService for GenAiClient {
    async fn fetch_questions(&self, request: &QuizRequest) -> Result<Vec<Question>> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": quiz_schema()
            }
        });

        let payload = self.post_json(&url, &body).await?;
        let response: GenerateContentResponse =
            serde_json::from_value(payload).context("unexpected generate-content shape")?;
        let text = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .unwrap_or_default();
        parse_quiz_payload(text)
    }
}

#[async_trait]
impl ImageService for GenAiClient {
    async fn generate_png(&self, request: &AvatarRequest) -> Result<String> {
        let url = format!("{}/models/{}:generateImages", self.base_url, request.model);
        let body = json!({
            "prompt": request.prompt,
            "config": {
                "numberOfImages": 1,
                "outputMimeType": "image/png",
                "aspectRatio": "1:1"
            }
        });

        let payload = self.post_json(&url, &body).await?;
        let response: GenerateImagesResponse =
            serde_json::from_value(payload).context("unexpected generate-images shape")?;
        let image = response
            .generated_images
            .into_iter()
            .next()
            .context("generative service returned no images")?;
        Ok(image.image.image_bytes)
    }
}
