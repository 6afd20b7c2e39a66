//! AI Quote Gateway
//!
//! This module provides abstracted access to the generative backend behind
//! the product through a common trait interface. Surfaces and controllers
//! depend on [`QuoteGateway`]; the Gemini implementation is constructed once
//! at startup and injected, and tests drive the same seam with stubs.
//!
//! # Operations
//!
//! - **generate_quote**: one quote from a free-text topic
//! - **list_quotes_by_category**: five quotes for a catalog category
//! - **explain_quote**: prose explanation, capped at 150 words
//! - **generate_quote_image**: an artistic background image for a quote
//!
//! # Usage
//!
//! ```ignore
//! use quotes_core::gateway::{GeminiGateway, QuoteGateway};
//!
//! let gateway = GeminiGateway::new(config.gateway_config()?);
//! let quote = gateway.generate_quote("resilience").await?;
//! ```

mod gemini;
mod traits;

pub use gemini::GeminiGateway;
pub use traits::{GatewayError, QuoteGateway, QuoteImage, QUOTES_PER_LISTING};
