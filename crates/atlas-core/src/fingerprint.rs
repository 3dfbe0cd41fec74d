//! Content-hash keys for caller-side memoisation.
//!
//! Keys are stable within one process run only; do not persist them.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::location::Location;

/// Key for a classifier result: covers exactly what `classify` reads.
pub fn profile_key(name: &str, description: &str) -> u64 {
    let mut h = DefaultHasher::new();
    name.hash(&mut h);
    description.hash(&mut h);
    h.finish()
}

/// Key for a layout or snapshot over the whole location list. Order-sensitive,
/// since input order drives seeding and BFS.
pub fn layout_key(locations: &[Location]) -> u64 {
    let mut h = DefaultHasher::new();
    locations.len().hash(&mut h);
    for loc in locations {
        loc.id.hash(&mut h);
        loc.name.hash(&mut h);
        loc.description.hash(&mut h);
        loc.grid_x.hash(&mut h);
        loc.grid_y.hash(&mut h);
        loc.elevation_override.map(f32::to_bits).hash(&mut h);
        loc.exits.hash(&mut h);
    }
    h.finish()
}
