//! Guarded LAKE predicate.
//!
//! A bare substring test on "lake" tags every road that merely leads *to* a
//! lake. A tile is a lake only when its name designates one, or its text
//! refers to "the lake" / "a pond" as a body of water.

use std::sync::LazyLock;

use regex::Regex;

/// Whole-word "the lake" / "a pond" style reference to a body of water.
static LAKE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(the|a|this|in the|on the|of the|into the|across the) (lake|pond)\b")
        .expect("lake phrase regex is valid")
});

/// Literal phrases that tag LAKE on a plain substring match.
const LITERAL_PHRASES: &[&str] = &[
    "on the lake",
    "in the lake",
    "across the lake",
    "middle of the lake",
];

/// Name words that mark the location itself as a body of water.
const NAME_SUFFIXES: &[&str] = &["lake", "lakes", "pond", "ponds"];

/// `name_lower` is the lowercase name; `text_lower` the lowercase
/// `description + " " + name`.
pub(crate) fn is_lake(name_lower: &str, text_lower: &str) -> bool {
    name_designates_lake(name_lower)
        || has_lake_phrase(text_lower)
        || LITERAL_PHRASES.iter().any(|p| text_lower.contains(p))
}

/// "Crystal Lake" and "Mill Pond" qualify; "Lake Rainier Pass" does not.
fn name_designates_lake(name_lower: &str) -> bool {
    name_lower
        .split_whitespace()
        .last()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|w| NAME_SUFFIXES.contains(&w))
}

fn has_lake_phrase(text: &str) -> bool {
    LAKE_PHRASE.is_match(text)
}
