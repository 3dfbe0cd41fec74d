//! Terrain tags → scalar elevation in [-1, 1].
//!
//! -1 is the deepest water, 0 sea level, 1 a mountain peak.

use serde::{Deserialize, Serialize};

use crate::terrain::{TerrainProfile, TerrainTag};

// ── Tag contributions ─────────────────────────────────────────────────────────

/// Raise pass: the accumulator takes the max with each present tag's value.
const RAISE: &[(TerrainTag, f32)] = &[
    (TerrainTag::Mountain, 0.9),
    (TerrainTag::Hills, 0.4),
    (TerrainTag::Castle, 0.3),
    (TerrainTag::Church, 0.2),
    (TerrainTag::Forest, 0.15),
    (TerrainTag::Desert, 0.1),
    (TerrainTag::Grass, 0.05),
    (TerrainTag::Building, 0.05),
    (TerrainTag::Road, 0.0),
];

/// Lower pass: the accumulator takes the min with each present tag's value.
/// Runs after the raise pass, so any water tag wins over high ground.
const LOWER: &[(TerrainTag, f32)] = &[
    (TerrainTag::Swamp, -0.1),
    (TerrainTag::Coast, 0.0),
    (TerrainTag::River, -0.2),
    (TerrainTag::Stream, -0.1),
    (TerrainTag::Lake, -0.4),
    (TerrainTag::Port, -0.1),
];

/// Elevation for a profile, or the clamped override when one is given.
///
/// Generic WATER has no entry in either pass and leaves the value untouched.
/// A non-finite override is ignored.
pub fn compute_elevation(profile: &TerrainProfile, override_value: Option<f32>) -> f32 {
    if let Some(v) = override_value.filter(|v| v.is_finite()) {
        return v.clamp(-1.0, 1.0);
    }

    let mut elevation = 0.0f32;
    for &(tag, value) in RAISE {
        if profile.contains(tag) {
            elevation = elevation.max(value);
        }
    }
    for &(tag, value) in LOWER {
        if profile.contains(tag) {
            elevation = elevation.min(value);
        }
    }
    elevation
}

// ── Display buckets ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElevationBand {
    MountainPeak,
    HighHills,
    Hills,
    GentleRise,
    SeaLevel,
    LowGround,
    LakeBasin,
    DeepWater,
}

impl ElevationBand {
    /// Bucket an elevation; thresholds are inclusive lower bounds.
    pub fn of(elevation: f32) -> Self {
        if elevation >= 0.8 {
            ElevationBand::MountainPeak
        } else if elevation >= 0.5 {
            ElevationBand::HighHills
        } else if elevation >= 0.3 {
            ElevationBand::Hills
        } else if elevation >= 0.1 {
            ElevationBand::GentleRise
        } else if elevation >= -0.1 {
            ElevationBand::SeaLevel
        } else if elevation >= -0.3 {
            ElevationBand::LowGround
        } else if elevation >= -0.5 {
            ElevationBand::LakeBasin
        } else {
            ElevationBand::DeepWater
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElevationBand::MountainPeak => "Mountain Peak",
            ElevationBand::HighHills => "High Hills",
            ElevationBand::Hills => "Hills",
            ElevationBand::GentleRise => "Gentle Rise",
            ElevationBand::SeaLevel => "Flat/Sea Level",
            ElevationBand::LowGround => "Low Ground",
            ElevationBand::LakeBasin => "Lake Basin",
            ElevationBand::DeepWater => "Deep Water",
        }
    }
}
