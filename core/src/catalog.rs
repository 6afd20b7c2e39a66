//! The fixed category catalog.
//!
//! Categories are static product configuration: ten browsing shelves, each
//! with a one-glyph icon. Nothing here is persisted or mutated at runtime.
//! The random pick feeds the home feed, which curates a different shelf on
//! every launch.

use rand::seq::SliceRandom;

/// A browsing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Display name, also the token interpolated into listing prompts.
    pub name: &'static str,
    /// One-glyph display token, rendered before the name. Geometric
    /// Unicode, safe in any terminal font.
    pub icon: &'static str,
}

/// Every category the product offers, in display order.
pub const CATEGORIES: &[Category] = &[
    Category { name: "Wisdom", icon: "◈" },
    Category { name: "Love", icon: "♥" },
    Category { name: "Success", icon: "▲" },
    Category { name: "Life", icon: "●" },
    Category { name: "Happiness", icon: "◉" },
    Category { name: "Courage", icon: "◆" },
    Category { name: "Friendship", icon: "◎" },
    Category { name: "Hope", icon: "○" },
    Category { name: "Humor", icon: "◐" },
    Category { name: "Motivation", icon: "▶" },
];

/// Pick a category uniformly at random.
pub fn random_category() -> &'static Category {
    let mut rng = rand::thread_rng();
    // The catalog is a non-empty const; choose fails only on empty slices.
    CATEGORIES.choose(&mut rng).unwrap_or(&CATEGORIES[0])
}

/// Look up a category by name, ignoring ASCII case.
pub fn find_category(name: &str) -> Option<&'static Category> {
    CATEGORIES
        .iter()
        .find(|category| category.name.eq_ignore_ascii_case(name))
}
