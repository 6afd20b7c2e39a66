//! Theme and Colors
//!
//! Alpha Quotes' amber-on-slate palette, carried over from the product's
//! visual identity: amber accents for anything featured, slate greys for
//! chrome and body text, a muted red for failure notices.

use ratatui::style::Color;

// ============================================================================
// Palette
// ============================================================================

/// Featured accent - amber
pub const ACCENT: Color = Color::Rgb(251, 191, 36);

/// Dimmer accent for secondary highlights (attributions, icons)
pub const ACCENT_DIM: Color = Color::Rgb(252, 211, 77);

/// Primary body text - light slate
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

/// Muted text - mid slate
pub const TEXT_MUTED: Color = Color::Rgb(148, 163, 184);

/// Dim chrome text (hints, separators)
pub const TEXT_DIM: Color = Color::Rgb(100, 116, 139);

/// Panel borders - dark slate
pub const BORDER: Color = Color::Rgb(51, 65, 85);

/// Failure notices - soft red
pub const ERROR: Color = Color::Rgb(248, 113, 113);

/// Transient confirmations ("Copied!")
pub const SUCCESS: Color = Color::Rgb(74, 222, 128);

// ============================================================================
// Loading Spinner
// ============================================================================

/// Braille spinner frames, advanced once per render tick.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The spinner glyph for a given frame counter.
pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}
