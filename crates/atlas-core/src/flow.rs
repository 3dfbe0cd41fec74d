//! Downhill flow direction from a tile's own elevation and up to four cardinal
//! neighbours.
//!
//! Screen axes: +x east, +y south.

use serde::{Deserialize, Serialize};

/// Flow vectors shorter than this are treated as flat.
const FLAT_MAGNITUDE: f32 = 0.01;

/// Elevations of the cardinal neighbours reachable through a tile's own exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborElevations {
    pub north: Option<f32>,
    pub south: Option<f32>,
    pub east: Option<f32>,
    pub west: Option<f32>,
}

impl NeighborElevations {
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Present neighbour elevations in N, S, E, W order.
    pub fn iter(&self) -> impl Iterator<Item = f32> {
        [self.north, self.south, self.east, self.west].into_iter().flatten()
    }

    pub fn lowest(&self) -> Option<f32> {
        self.iter().reduce(f32::min)
    }

    pub fn highest(&self) -> Option<f32> {
        self.iter().reduce(f32::max)
    }
}

/// Unit direction water travels across a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowVector {
    pub x: f32,
    pub y: f32,
}

impl FlowVector {
    /// Used when the terrain is flat or no neighbour data exists.
    pub const SOUTH: FlowVector = FlowVector { x: 0.0, y: 1.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// One-axis gradient: central difference when both sides exist, one-sided
/// difference otherwise. `lo` is the west/north side, `hi` the east/south side.
fn axis_gradient(own: f32, lo: Option<f32>, hi: Option<f32>) -> f32 {
    match (lo, hi) {
        (Some(lo), Some(hi)) => (hi - lo) / 2.0,
        (None, Some(hi)) => hi - own,
        (Some(lo), None) => own - lo,
        (None, None) => 0.0,
    }
}

/// Downhill direction: the normalised negative gradient, or due south when
/// the gradient is negligible.
pub fn flow_direction(elevation: f32, neighbors: &NeighborElevations) -> FlowVector {
    let gx = axis_gradient(elevation, neighbors.west, neighbors.east);
    let gy = axis_gradient(elevation, neighbors.north, neighbors.south);

    let downhill = FlowVector::new(-gx, -gy);
    let magnitude = downhill.length();
    if magnitude.is_nan() || magnitude < FLAT_MAGNITUDE {
        return FlowVector::SOUTH;
    }
    FlowVector::new(downhill.x / magnitude, downhill.y / magnitude)
}
