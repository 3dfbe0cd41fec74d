//! Per-tile neighbour lookups built from a location's own cardinal exits.
//!
//! Only NORTH/SOUTH/EAST/WEST exits contribute. Exits to ids that are not in
//! the lookup are skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::flow::NeighborElevations;
use crate::location::{Direction, Location};
use crate::terrain::TerrainProfile;

/// Which cardinal neighbours carry running water (RIVER or STREAM).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeighborRivers {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl NeighborRivers {
    pub fn count(&self) -> usize {
        [self.north, self.south, self.east, self.west]
            .into_iter()
            .filter(|&b| b)
            .count()
    }

    pub fn any(&self) -> bool {
        self.count() > 0
    }
}

/// Walk the cardinal exits of `location`, handing each resolvable target to
/// `f` along with the exit direction.
fn for_each_cardinal<'a, T>(
    location: &Location,
    lookup: &'a HashMap<&str, T>,
    mut f: impl FnMut(Direction, &'a T),
) {
    for exit in location.exits.iter().filter(|e| e.direction.is_cardinal()) {
        match lookup.get(exit.target_location_id.as_str()) {
            Some(value) => f(exit.direction, value),
            None => tracing::trace!(
                from = %location.id,
                to = %exit.target_location_id,
                "neighbour lookup skipped unknown exit target"
            ),
        }
    }
}

/// Elevations of the neighbours reachable through `location`'s cardinal exits.
/// With more than one exit in a direction the first wins.
pub fn neighbor_elevations(location: &Location, elevations: &HashMap<&str, f32>) -> NeighborElevations {
    let mut out = NeighborElevations::default();
    for_each_cardinal(location, elevations, |dir, &e| {
        let slot = match dir {
            Direction::North => &mut out.north,
            Direction::South => &mut out.south,
            Direction::East => &mut out.east,
            Direction::West => &mut out.west,
            _ => return,
        };
        slot.get_or_insert(e);
    });
    out
}

/// River continuity flags for the neighbours reachable through cardinal exits.
pub fn neighbor_rivers(location: &Location, profiles: &HashMap<&str, TerrainProfile>) -> NeighborRivers {
    let mut out = NeighborRivers::default();
    for_each_cardinal(location, profiles, |dir, profile| {
        let flowing = profile.has_watercourse();
        match dir {
            Direction::North => out.north |= flowing,
            Direction::South => out.south |= flowing,
            Direction::East => out.east |= flowing,
            Direction::West => out.west |= flowing,
            _ => {}
        }
    });
    out
}

/// Scale factor in [0.5, 1] for drawing a lake on a tile: full size when no
/// neighbour rises above it, shrinking linearly as the highest neighbour climbs
/// up to one full unit above.
pub fn lake_shrink(own: f32, neighbors: &NeighborElevations) -> f32 {
    let rise = neighbors
        .highest()
        .map(|h| (h - own).clamp(0.0, 1.0))
        .unwrap_or(0.0);
    1.0 - 0.5 * rise
}
