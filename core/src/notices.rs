//! User-facing notice strings.
//!
//! Exactly what a surface renders when a concern fails or is loading. Raw
//! error detail never reaches these strings; it goes to the log instead.
//! Keeping them in one module lets surfaces and tests agree byte for byte.

/// Home feed could not be fetched.
pub const FEED_UNAVAILABLE: &str =
    "Failed to fetch initial quotes. The wisdom of the ages is currently unavailable.";

/// Generation failed after a valid topic was submitted.
pub const GENERATOR_FAILED: &str = "Failed to generate a quote. The AI muse is currently resting.";

/// Explanation request failed.
pub const EXPLAIN_FAILED: &str =
    "Could not get an explanation. The wisdom remains a mystery for now.";

/// Image generation failed.
pub const VISUALIZE_FAILED: &str = "Could not generate image. Please try another quote.";

/// The generator was submitted without a topic.
pub const EMPTY_TOPIC: &str = "Please enter a topic.";

/// Category listing failed for a named category.
pub fn category_unavailable(category: &str) -> String {
    format!("Could not fetch quotes for {category}.")
}

/// Loading flavor lines, one per concern that shows one.
pub mod loading {
    /// Generator is working on a topic.
    pub const GENERATOR: &str = "Consulting the digital oracle...";
    /// Visualize panel is waiting on an image.
    pub const VISUALIZE: &str = "Generating visual harmony...";
}
