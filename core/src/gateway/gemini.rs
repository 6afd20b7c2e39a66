//! Gemini Gateway Implementation
//!
//! Quote gateway backed by the Gemini REST API.
//!
//! # Gemini API
//!
//! Two endpoints cover the whole product:
//! - `/v1beta/models/{model}:generateContent` - text generation, optionally
//!   constrained by a JSON response schema
//! - `/v1beta/models/{model}:predict` - image generation (Imagen)
//!
//! Quote and listing calls declare a response schema so the model answers
//! in the wire shape of [`QuotePayload`]; explanations are plain text. The
//! API key travels in the `x-goog-api-key` header on every request.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GeminiConfig;
use crate::quote::Quote;

use super::traits::{GatewayError, QuoteGateway, QuoteImage, QUOTES_PER_LISTING};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Wire shape of one quote, as the response schema asks for it.
///
/// Fields default to empty so a missing field becomes an invalid entry
/// instead of a parse failure; validation decides its fate.
#[derive(Debug, Deserialize)]
struct QuotePayload {
    #[serde(default)]
    quote: String,
    #[serde(default)]
    author: String,
}

/// Gemini gateway client
#[derive(Clone)]
pub struct GeminiGateway {
    /// Resolved gateway configuration
    config: GeminiConfig,
    /// HTTP client
    http_client: reqwest::Client,
}

impl GeminiGateway {
    /// Create a new Gemini gateway
    pub fn new(config: GeminiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            config,
            http_client,
        }
    }

    /// Get the generateContent endpoint URL for the text model
    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.quote_model
        )
    }

    /// Get the predict endpoint URL for the image model
    fn predict_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:predict",
            self.config.base_url, self.config.image_model
        )
    }

    /// POST a JSON body and parse the response envelope.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream(format!(
                "Gemini returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            if e.is_decode() {
                GatewayError::MalformedResponse(e.to_string())
            } else {
                GatewayError::Upstream(e.to_string())
            }
        })
    }
}

/// Pull the concatenated text of the first candidate out of a
/// generateContent response envelope.
fn candidate_text(data: &serde_json::Value) -> Option<String> {
    let parts = data
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if let Some(fragment) = part.get("text").and_then(|t| t.as_str()) {
            text.push_str(fragment);
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Response schema for a single quote, shared by generation and listings.
fn quote_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "quote": {
                "type": "STRING",
                "description": "The generated quote text.",
            },
            "author": {
                "type": "STRING",
                "description": "The author of the quote. This can be a real or fictional persona that fits the quote's theme.",
            },
        },
        "required": ["quote", "author"],
    })
}

/// Response schema for a category listing.
fn quote_list_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": quote_schema(),
    })
}

fn quote_prompt(topic: &str) -> String {
    format!(
        "Generate a profound, insightful, and unique quote about \"{topic}\". \
         The quote should be inspiring and thought-provoking."
    )
}

fn listing_prompt(category: &str) -> String {
    format!(
        "Generate a list of {QUOTES_PER_LISTING} famous and inspiring quotes \
         related to the category: \"{category}\"."
    )
}

fn explain_prompt(quote: &str, author: &str) -> String {
    format!(
        "Provide a brief, insightful explanation of the following quote by \
         {author}: \"{quote}\". Explain its deeper meaning and how it can be \
         applied to modern life. Keep it concise, under 150 words."
    )
}

fn image_prompt(quote_text: &str) -> String {
    format!(
        "Create a visually stunning, artistic, and thematic background image \
         that represents the essence of the quote: \"{quote_text}\". The style \
         should be cinematic, atmospheric, and abstract. Do NOT include any \
         text, letters, or words in the image. Focus on mood and symbolism."
    )
}

/// Parse a single-quote payload, applying quote validation.
fn parse_quote_payload(text: &str) -> Result<Quote, GatewayError> {
    let payload: QuotePayload = serde_json::from_str(text.trim())
        .map_err(|e| GatewayError::MalformedResponse(format!("quote payload: {e}")))?;

    Quote::validated(payload.quote, payload.author).ok_or_else(|| {
        GatewayError::MalformedResponse("quote payload missing text or author".to_string())
    })
}

/// Parse a listing payload.
///
/// Invalid entries are dropped; a payload that does not parse at all
/// degrades to an empty list. Both paths leave a trace in the log.
fn parse_listing_payload(text: &str) -> Vec<Quote> {
    match serde_json::from_str::<Vec<QuotePayload>>(text.trim()) {
        Ok(entries) => {
            let total = entries.len();
            let quotes: Vec<Quote> = entries
                .into_iter()
                .filter_map(|entry| Quote::validated(entry.quote, entry.author))
                .collect();
            if quotes.len() < total {
                warn!(
                    dropped = total - quotes.len(),
                    kept = quotes.len(),
                    "Dropped invalid listing entries"
                );
            }
            quotes
        }
        Err(e) => {
            warn!(error = %e, "Listing payload did not parse, returning no quotes");
            Vec::new()
        }
    }
}

#[async_trait]
impl QuoteGateway for GeminiGateway {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate_quote(&self, topic: &str) -> Result<Quote, GatewayError> {
        debug!(topic, "Generating quote");

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": quote_prompt(topic) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": quote_schema(),
            },
        });

        let data = self.post_json(&self.generate_content_url(), &body).await?;
        let text = candidate_text(&data).ok_or_else(|| {
            GatewayError::MalformedResponse("response contained no candidate text".to_string())
        })?;

        parse_quote_payload(&text)
    }

    async fn list_quotes_by_category(&self, category: &str) -> Result<Vec<Quote>, GatewayError> {
        debug!(category, "Listing quotes");

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": listing_prompt(category) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": quote_list_schema(),
            },
        });

        let data = self.post_json(&self.generate_content_url(), &body).await?;
        let text = candidate_text(&data).ok_or_else(|| {
            GatewayError::MalformedResponse("response contained no candidate text".to_string())
        })?;

        Ok(parse_listing_payload(&text))
    }

    async fn explain_quote(&self, quote: &str, author: &str) -> Result<String, GatewayError> {
        debug!(author, "Explaining quote");

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": explain_prompt(quote, author) }] }],
        });

        let data = self.post_json(&self.generate_content_url(), &body).await?;

        // Free text; a candidate-less success renders as silence, not an error.
        Ok(candidate_text(&data).unwrap_or_default())
    }

    async fn generate_quote_image(&self, quote_text: &str) -> Result<QuoteImage, GatewayError> {
        debug!("Generating quote image");

        let body = serde_json::json!({
            "instances": [{ "prompt": image_prompt(quote_text) }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "1:1",
                "outputMimeType": "image/jpeg",
            },
        });

        let data = self.post_json(&self.predict_url(), &body).await?;

        let prediction = data
            .get("predictions")
            .and_then(|p| p.get(0))
            .ok_or(GatewayError::ImageGenerationFailed)?;

        let encoded = prediction
            .get("bytesBase64Encoded")
            .and_then(|b| b.as_str())
            .ok_or(GatewayError::ImageGenerationFailed)?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| GatewayError::MalformedResponse(format!("image payload: {e}")))?;

        let mime_type = prediction
            .get("mimeType")
            .and_then(|m| m.as_str())
            .unwrap_or("image/jpeg")
            .to_string();

        Ok(QuoteImage { bytes, mime_type })
    }
}
