//! Per-tag keyword lists for substring classification.
//!
//! The lists are matched as raw lowercase substrings, so `"way"` also fires on
//! "always" and `"crumbl"` covers crumbling/crumbled. Other tools key off the
//! same lists; keep them byte-for-byte stable.

use super::TerrainTag;

/// Every substring-matched tag with its keywords. LAKE is absent: it goes
/// through the guarded predicate in `super::lake`.
pub const KEYWORD_RULES: &[(TerrainTag, &[&str])] = &[
    (TerrainTag::Road, &["road", "path", "trail", "highway", "street", "lane", "way"]),
    (
        TerrainTag::Forest,
        &["forest", "tree", "wood", "grove", "copse", "timber", "oak", "pine", "jungle"],
    ),
    (TerrainTag::Stream, &["stream", "creek", "brook"]),
    (TerrainTag::River, &["river"]),
    (TerrainTag::Water, &["water", "falls", "fountain"]),
    (TerrainTag::Mountain, &["mountain", "peak", "summit", "alpine"]),
    (
        TerrainTag::Hills,
        &["hill", "cliff", "ridge", "highland", "slope", "knoll", "mound"],
    ),
    (
        TerrainTag::Grass,
        &["grass", "meadow", "field", "plain", "pasture", "clearing", "prairie"],
    ),
    (
        TerrainTag::Building,
        &["town", "village", "inn", "tavern", "house", "building", "shop", "market", "hamlet"],
    ),
    (
        TerrainTag::Castle,
        &["castle", "fortress", "citadel", "stronghold", "keep", "palace"],
    ),
    (
        TerrainTag::Church,
        &["church", "temple", "cathedral", "shrine", "chapel", "monastery", "abbey"],
    ),
    (
        TerrainTag::Cave,
        &["cave", "cavern", "underground", "tunnel", "grotto", "mine", "dungeon"],
    ),
    (
        TerrainTag::Desert,
        &["desert", "sand", "dune", "arid", "wasteland", "barren"],
    ),
    (
        TerrainTag::Coast,
        &["coast", "shore", "beach", "sea", "ocean", "bay", "harbor", "cove"],
    ),
    (
        TerrainTag::Swamp,
        &["swamp", "marsh", "bog", "wetland", "fen", "mire", "bayou"],
    ),
    (
        TerrainTag::Port,
        &["port", "dock", "pier", "wharf", "marina", "shipyard", "quay"],
    ),
    (
        TerrainTag::Ruins,
        &["ruin", "ancient", "crumbl", "decay", "abandon", "forgotten", "lost"],
    ),
];

/// Keywords registered for `tag`; empty for LAKE.
pub fn keywords_for(tag: TerrainTag) -> &'static [&'static str] {
    KEYWORD_RULES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}
