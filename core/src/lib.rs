//! Quotes Core - Headless Orchestration for Alpha Quotes
//!
//! This crate provides the product logic for Alpha Quotes, completely
//! independent of any UI framework. It can drive a TUI, web UI, native GUI,
//! or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                           │
//! │   ┌─────────┐   ┌─────────┐   ┌────────────────────────┐     │
//! │   │   TUI   │   │   Web   │   │   Headless / Testing   │     │
//! │   │(ratatui)│   │         │   │                        │     │
//! │   └────┬────┘   └────┬────┘   └───────────┬────────────┘     │
//! │        └─────────────┴────────────────────┘                  │
//! │                        │                                     │
//! │        trigger / poll one RequestController per concern      │
//! │                        │                                     │
//! └────────────────────────┼─────────────────────────────────────┘
//!                          │
//! ┌────────────────────────┼─────────────────────────────────────┐
//! │                   QUOTES CORE                                │
//! │   ┌────────────────────┴───────────────────────────────┐     │
//! │   │   RequestController (per concern, latest wins)     │     │
//! │   │        │                                           │     │
//! │   │   QuoteGateway trait ──── GeminiGateway (HTTP)     │     │
//! │   │        │                                           │     │
//! │   │   Quote validation · catalog · notices · config    │     │
//! │   └────────────────────────────────────────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Quote`]: validated quote value, the unit surfaces render
//! - [`QuoteGateway`]: trait over the generative backend
//! - [`GeminiGateway`]: the production Gemini REST implementation
//! - [`RequestController`]: per-concern async state with latest-wins
//!   ordering
//! - [`RequestState`]: Idle / Loading / Success / Failure
//!
//! # Module Overview
//!
//! - [`quote`]: the validated `Quote` type and feed helpers
//! - [`catalog`]: the fixed category catalog
//! - [`gateway`]: generative backend abstraction and Gemini client
//! - [`request`]: per-concern request-state controllers
//! - [`notices`]: user-facing notice strings
//! - [`config`]: layered TOML + environment configuration
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure product logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod gateway;
pub mod notices;
pub mod quote;
pub mod request;

// Re-exports for convenience
pub use catalog::{find_category, random_category, Category, CATEGORIES};
pub use config::{load_config, ConfigError, ConfigSource, GeminiConfig, QuotesConfig};
pub use gateway::{GatewayError, GeminiGateway, QuoteGateway, QuoteImage, QUOTES_PER_LISTING};
pub use quote::{dedup_by_text, Quote};
pub use request::{RequestController, RequestState};
