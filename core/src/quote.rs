//! Quote domain type.
//!
//! A [`Quote`] is the unit every surface renders: a body of text plus an
//! attribution. Construction is validating, so a `Quote` that exists is
//! complete. Raw vendor payloads live in the gateway and become `Quote`s
//! only through [`Quote::validated`].

use std::collections::HashSet;

/// A single quote with its attribution.
///
/// Both fields are non-empty. [`Quote::validated`] is the only way to build
/// one from untrusted input; surfaces treat the value as read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    text: String,
    author: String,
}

impl Quote {
    /// Validate and construct a quote from untrusted parts.
    ///
    /// Returns `None` when either part is empty after trimming. The same
    /// predicate applies to every payload entering the crate, whether a
    /// single generation or one entry of a category listing.
    pub fn validated(text: impl Into<String>, author: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let author = author.into();
        if text.trim().is_empty() || author.trim().is_empty() {
            return None;
        }
        Some(Self { text, author })
    }

    /// The quote body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The attribution. Vendors may answer "Unknown"; that is a valid author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Clipboard and share form: `“{text}” - {author}`.
    pub fn attribution_line(&self) -> String {
        format!("“{}” - {}", self.text, self.author)
    }
}

/// Drop repeated quote bodies, keeping the first occurrence in order.
///
/// Vendor listings sometimes repeat a famous line under different
/// attributions; the home feed shows each line once.
pub fn dedup_by_text(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut seen = HashSet::new();
    quotes
        .into_iter()
        .filter(|quote| seen.insert(quote.text.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validated_accepts_complete_parts() {
        let quote = Quote::validated("Fall, rise, repeat.", "Unknown").unwrap();
        assert_eq!(quote.text(), "Fall, rise, repeat.");
        assert_eq!(quote.author(), "Unknown");
    }

    #[test]
    fn validated_rejects_empty_text() {
        assert!(Quote::validated("", "Seneca").is_none());
    }

    #[test]
    fn validated_rejects_empty_author() {
        assert!(Quote::validated("Know thyself.", "").is_none());
    }

    #[test]
    fn validated_rejects_whitespace_only_parts() {
        assert!(Quote::validated("   ", "Seneca").is_none());
        assert!(Quote::validated("Know thyself.", " \t").is_none());
    }

    #[test]
    fn attribution_line_uses_share_format() {
        let quote = Quote::validated("Know thyself.", "Socrates").unwrap();
        assert_eq!(quote.attribution_line(), "“Know thyself.” - Socrates");
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let quotes = vec![
            Quote::validated("A", "First").unwrap(),
            Quote::validated("B", "Second").unwrap(),
            Quote::validated("A", "Third").unwrap(),
        ];
        let deduped = dedup_by_text(quotes);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].author(), "First");
        assert_eq!(deduped[1].text(), "B");
    }

    #[test]
    fn dedup_preserves_distinct_quotes() {
        let quotes = vec![
            Quote::validated("A", "X").unwrap(),
            Quote::validated("B", "X").unwrap(),
        ];
        assert_eq!(dedup_by_text(quotes.clone()), quotes);
    }
}
