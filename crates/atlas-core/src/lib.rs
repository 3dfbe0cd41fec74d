//! Map-grid core: places a sparse graph of locations onto a stable 2D grid and
//! derives a per-tile terrain, elevation and flow model from free-text
//! descriptions.
//!
//! Everything here is a pure function over in-memory data. Drawing is left to
//! an external renderer that consumes [`atlas::AtlasSnapshot`].

pub mod atlas;
pub mod elevation;
pub mod error;
pub mod fingerprint;
pub mod flow;
pub mod layout;
pub mod location;
pub mod neighbors;
pub mod terrain;

pub use atlas::{build_atlas, build_atlas_with, AtlasSnapshot, TileTerrain};
pub use elevation::{compute_elevation, ElevationBand};
pub use error::{AtlasError, Result};
pub use flow::{flow_direction, FlowVector, NeighborElevations};
pub use layout::{compute_layout, compute_layout_with, GraphLayout, GridBounds, LayoutParams};
pub use location::{Direction, Exit, GridCoord, Location};
pub use neighbors::NeighborRivers;
pub use terrain::{classify, classify_location, TerrainProfile, TerrainTag};
