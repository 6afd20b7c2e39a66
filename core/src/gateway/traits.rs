//! Quote Gateway Traits
//!
//! Trait definitions for the generative backend. This abstraction keeps the
//! product logic independent of any particular vendor API and gives tests a
//! seam to drive with recording stubs.
//!
//! # Design Philosophy
//!
//! Every operation returns a typed [`GatewayError`] instead of a panic or a
//! stringly anyhow chain: the surface layer decides what a user sees, the
//! error value decides what the log sees. Payload validation happens here,
//! at the boundary, so no half-populated [`Quote`] ever escapes.

use async_trait::async_trait;
use thiserror::Error;

use crate::quote::Quote;

/// How many quotes a category listing asks the model for.
pub const QUOTES_PER_LISTING: usize = 5;

/// Errors produced by gateway operations.
///
/// Values, never panics. Messages are log material; surfaces render the
/// notices in [`crate::notices`] instead. The exception is
/// [`GatewayError::Validation`], whose display is the user message itself.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The remote call itself failed: network, HTTP status, auth, quota.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The remote call succeeded but the payload did not match the declared
    /// shape or failed quote validation.
    #[error("malformed response from model: {0}")]
    MalformedResponse(String),

    /// The remote call succeeded but produced no image.
    #[error("image generation returned no images")]
    ImageGenerationFailed,

    /// A local precondition failed; no remote call was issued.
    #[error("{0}")]
    Validation(String),
}

/// A generated quote visual.
#[derive(Clone, PartialEq, Eq)]
pub struct QuoteImage {
    /// Decoded binary image data, ready to write to disk.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, e.g. `image/jpeg`.
    pub mime_type: String,
}

impl std::fmt::Debug for QuoteImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteImage")
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Quote Gateway trait
///
/// Implement this trait to back the product with a generative vendor.
#[async_trait]
pub trait QuoteGateway: Send + Sync {
    /// Get the gateway name (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Generate a single quote about a free-text topic.
    ///
    /// The topic must be non-empty; callers validate before invoking.
    /// The returned quote is complete, both fields passed validation.
    async fn generate_quote(&self, topic: &str) -> Result<Quote, GatewayError>;

    /// List quotes for a category.
    ///
    /// Asks for [`QUOTES_PER_LISTING`] entries. Entries failing validation
    /// are dropped silently, and a payload that does not parse at all
    /// yields an empty list rather than an error: a browsing shelf prefers
    /// emptiness over an error banner. Transport failures still error.
    async fn list_quotes_by_category(&self, category: &str) -> Result<Vec<Quote>, GatewayError>;

    /// Explain a quote in under 150 words.
    ///
    /// Free text; there is no structure to validate. Only transport
    /// failures error.
    async fn explain_quote(&self, quote: &str, author: &str) -> Result<String, GatewayError>;

    /// Render a quote as an artistic background image.
    ///
    /// One image, JPEG, square. The prompt forbids any text in the image.
    async fn generate_quote_image(&self, quote_text: &str) -> Result<QuoteImage, GatewayError>;
}
