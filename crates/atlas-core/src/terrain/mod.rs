//! Free text → terrain tags.
//!
//! Classification is case-insensitive and runs over `description + " " + name`.
//! Every tag except LAKE is a plain keyword hit (see [`keywords`]); LAKE goes
//! through the guarded predicate in [`lake`].

pub mod keywords;
mod lake;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::location::Location;
use keywords::KEYWORD_RULES;

/// Closed set of terrain features a tile can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainTag {
    Road,
    Forest,
    Stream,
    River,
    Lake,
    Water,
    Mountain,
    Hills,
    Grass,
    Building,
    Castle,
    Church,
    Cave,
    Desert,
    Coast,
    Swamp,
    Port,
    Ruins,
}

impl TerrainTag {
    pub const ALL: [TerrainTag; 18] = [
        TerrainTag::Road,
        TerrainTag::Forest,
        TerrainTag::Stream,
        TerrainTag::River,
        TerrainTag::Lake,
        TerrainTag::Water,
        TerrainTag::Mountain,
        TerrainTag::Hills,
        TerrainTag::Grass,
        TerrainTag::Building,
        TerrainTag::Castle,
        TerrainTag::Church,
        TerrainTag::Cave,
        TerrainTag::Desert,
        TerrainTag::Coast,
        TerrainTag::Swamp,
        TerrainTag::Port,
        TerrainTag::Ruins,
    ];

    /// Running water that should visually connect across tiles.
    pub fn is_watercourse(self) -> bool {
        matches!(self, TerrainTag::River | TerrainTag::Stream)
    }
}

/// The set of tags attached to one location. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainProfile {
    tags: BTreeSet<TerrainTag>,
}

impl TerrainProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: TerrainTag) -> bool {
        self.tags.insert(tag)
    }

    pub fn contains(&self, tag: TerrainTag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Tags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = TerrainTag> + '_ {
        self.tags.iter().copied()
    }

    pub fn has_watercourse(&self) -> bool {
        self.iter().any(TerrainTag::is_watercourse)
    }
}

impl FromIterator<TerrainTag> for TerrainProfile {
    fn from_iter<I: IntoIterator<Item = TerrainTag>>(iter: I) -> Self {
        Self { tags: iter.into_iter().collect() }
    }
}

impl<const N: usize> From<[TerrainTag; N]> for TerrainProfile {
    fn from(tags: [TerrainTag; N]) -> Self {
        tags.into_iter().collect()
    }
}

/// Classify a location from its name and free-text description.
pub fn classify(name: &str, description: &str) -> TerrainProfile {
    let name_lower = name.to_lowercase();
    let text = format!("{description} {name}").to_lowercase();

    let mut profile: TerrainProfile = KEYWORD_RULES
        .iter()
        .filter(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(tag, _)| *tag)
        .collect();

    if lake::is_lake(&name_lower, &text) {
        profile.insert(TerrainTag::Lake);
    }
    profile
}

pub fn classify_location(location: &Location) -> TerrainProfile {
    classify(&location.name, &location.description)
}
