//! Alpha Quotes TUI - Terminal surface for AI-curated quotes
//!
//! A full-screen terminal UI over `quotes-core`: browse quotes by category,
//! generate new ones from a topic, explain a quote's meaning, and render a
//! quote as an artistic image saved to disk.
//!
//! # Architecture
//!
//! - **App**: key handling, one `RequestController` per concern, the
//!   event loop (crossterm `EventStream` + tick under `tokio::select!`)
//! - **Ui**: per-frame rendering of views and overlays from controller state
//! - **Theme**: the amber-on-slate palette and spinner glyphs

pub mod app;
pub mod theme;

mod ui;

pub use app::App;
