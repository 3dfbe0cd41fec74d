//! Full pass over a location list: layout plus per-tile terrain, bundled into
//! one snapshot for the renderer.
//!
//! The snapshot carries a caller-owned version number. Callers bump it on every
//! edit that should force a redraw; nothing in this crate keeps a counter.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::elevation::{compute_elevation, ElevationBand};
use crate::flow::{flow_direction, FlowVector, NeighborElevations};
use crate::layout::{compute_layout_with, GraphLayout, LayoutParams};
use crate::location::Location;
use crate::neighbors::{lake_shrink, neighbor_elevations, neighbor_rivers, NeighborRivers};
use crate::terrain::{classify_location, TerrainProfile, TerrainTag};

/// Everything the renderer needs for one tile besides its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileTerrain {
    pub profile: TerrainProfile,
    pub elevation: f32,
    pub band: ElevationBand,
    pub flow: FlowVector,
    pub neighbor_elevations: NeighborElevations,
    pub neighbor_rivers: NeighborRivers,
    /// Lake drawing scale in [0.5, 1]; 1 for tiles without LAKE.
    pub lake_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasSnapshot {
    pub version: u64,
    pub layout: GraphLayout,
    pub tiles: BTreeMap<String, TileTerrain>,
}

impl AtlasSnapshot {
    pub fn is_newer_than(&self, other: &AtlasSnapshot) -> bool {
        self.version > other.version
    }

    pub fn tile(&self, id: &str) -> Option<&TileTerrain> {
        self.tiles.get(id)
    }
}

#[cfg(feature = "threading")]
fn classify_all(locations: &[Location]) -> Vec<TerrainProfile> {
    use rayon::prelude::*;
    locations.par_iter().map(classify_location).collect()
}

#[cfg(not(feature = "threading"))]
fn classify_all(locations: &[Location]) -> Vec<TerrainProfile> {
    locations.iter().map(classify_location).collect()
}

pub fn build_atlas(locations: &[Location], version: u64) -> AtlasSnapshot {
    build_atlas_with(locations, version, &LayoutParams::default())
}

/// Classify every location, derive elevations, then neighbour lookups and flow
/// from the finished elevation table; lay the graph out independently.
///
/// With duplicate ids the first occurrence wins, matching the layout.
pub fn build_atlas_with(locations: &[Location], version: u64, params: &LayoutParams) -> AtlasSnapshot {
    let mut profiles: HashMap<&str, TerrainProfile> = HashMap::with_capacity(locations.len());
    let mut elevations: HashMap<&str, f32> = HashMap::with_capacity(locations.len());
    for (loc, profile) in locations.iter().zip(classify_all(locations)) {
        if profiles.contains_key(loc.id.as_str()) {
            continue;
        }
        elevations.insert(loc.id.as_str(), compute_elevation(&profile, loc.elevation_override));
        profiles.insert(loc.id.as_str(), profile);
    }

    let mut tiles = BTreeMap::new();
    for loc in locations {
        if tiles.contains_key(&loc.id) {
            continue;
        }
        let (Some(profile), Some(&elevation)) =
            (profiles.get(loc.id.as_str()), elevations.get(loc.id.as_str()))
        else {
            continue;
        };
        let neighbors = neighbor_elevations(loc, &elevations);
        let lake_scale = if profile.contains(TerrainTag::Lake) {
            lake_shrink(elevation, &neighbors)
        } else {
            1.0
        };
        tiles.insert(
            loc.id.clone(),
            TileTerrain {
                profile: profile.clone(),
                elevation,
                band: ElevationBand::of(elevation),
                flow: flow_direction(elevation, &neighbors),
                neighbor_elevations: neighbors,
                neighbor_rivers: neighbor_rivers(loc, &profiles),
                lake_scale,
            },
        );
    }

    let layout = compute_layout_with(locations, params);

    tracing::debug!(version, tiles = tiles.len(), "atlas snapshot built");

    AtlasSnapshot { version, layout, tiles }
}
