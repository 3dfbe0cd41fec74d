//! Location graph input types.
//!
//! Records arrive wholesale from an external data-access layer. Grid axes:
//! +x is east, +y is south.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

/// An integer cell on the layout grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step from this cell by `(dx, dy)`, pinned to the edge of the `i32` grid.
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Compass label on an exit. Anything that is not one of the eight compass
/// points (up, down, portal names, typos) is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Unknown,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Unknown,
    ];

    /// Grid step for an exit in this direction. `Unknown` is placed south.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
            Direction::Unknown => (0, 1),
        }
    }

    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::Unknown => Direction::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::NorthEast => "NORTHEAST",
            Direction::East => "EAST",
            Direction::SouthEast => "SOUTHEAST",
            Direction::South => "SOUTH",
            Direction::SouthWest => "SOUTHWEST",
            Direction::West => "WEST",
            Direction::NorthWest => "NORTHWEST",
            Direction::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = std::convert::Infallible;

    /// Lenient parse: full names with or without separators, or the usual
    /// one/two letter abbreviations. Never fails.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let dir = match key.as_str() {
            "NORTH" | "N" => Direction::North,
            "NORTHEAST" | "NE" => Direction::NorthEast,
            "EAST" | "E" => Direction::East,
            "SOUTHEAST" | "SE" => Direction::SouthEast,
            "SOUTH" | "S" => Direction::South,
            "SOUTHWEST" | "SW" => Direction::SouthWest,
            "WEST" | "W" => Direction::West,
            "NORTHWEST" | "NW" => Direction::NorthWest,
            _ => Direction::Unknown,
        };
        Ok(dir)
    }
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(d) => d,
            Err(never) => match never {},
        }
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.as_str().to_string()
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// A directed, compass-labelled edge to another location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exit {
    pub direction: Direction,
    pub target_location_id: String,
}

impl Exit {
    pub fn new(direction: Direction, target: impl Into<String>) -> Self {
        Self { direction, target_location_id: target.into() }
    }
}

/// One node of the player-curated location graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub grid_x: Option<i32>,
    #[serde(default)]
    pub grid_y: Option<i32>,
    /// Carried through untouched; the layout is strictly 2D.
    #[serde(default)]
    pub grid_z: Option<i32>,
    /// Manual elevation in [-1, 1]; bypasses the tag-derived value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_override: Option<f32>,
    /// Ordered; the layout walks exits in this order.
    #[serde(default)]
    pub exits: Vec<Exit>,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            grid_x: None,
            grid_y: None,
            grid_z: None,
            elevation_override: None,
            exits: Vec::new(),
        }
    }

    pub fn with_grid(mut self, x: i32, y: i32) -> Self {
        self.grid_x = Some(x);
        self.grid_y = Some(y);
        self
    }

    pub fn with_exit(mut self, direction: Direction, target: impl Into<String>) -> Self {
        self.exits.push(Exit::new(direction, target));
        self
    }

    pub fn with_elevation_override(mut self, value: f32) -> Self {
        self.elevation_override = Some(value);
        self
    }

    /// The stored grid cell, if both axes were stored.
    pub fn stored_coord(&self) -> Option<GridCoord> {
        match (self.grid_x, self.grid_y) {
            (Some(x), Some(y)) => Some(GridCoord::new(x, y)),
            _ => None,
        }
    }

    /// First exit in `direction`, if any.
    pub fn exit_towards(&self, direction: Direction) -> Option<&Exit> {
        self.exits.iter().find(|e| e.direction == direction)
    }
}

/// Decode a JSON array of location records.
pub fn parse_locations(json: &str) -> Result<Vec<Location>> {
    Ok(serde_json::from_str(json)?)
}

/// Check the invariants callers are expected to uphold: unique ids and at most
/// one exit per compass direction on each location. `Unknown` exits may repeat.
///
/// Layout and terrain never call this themselves.
pub fn validate_locations(locations: &[Location]) -> Result<()> {
    let mut ids = HashSet::with_capacity(locations.len());
    for loc in locations {
        if !ids.insert(loc.id.as_str()) {
            return Err(AtlasError::DuplicateLocationId(loc.id.clone()));
        }
        let mut seen = HashSet::new();
        for exit in &loc.exits {
            if exit.direction != Direction::Unknown && !seen.insert(exit.direction) {
                return Err(AtlasError::DuplicateExit {
                    location: loc.id.clone(),
                    direction: exit.direction,
                });
            }
        }
    }
    Ok(())
}
