//! Integer grid → resolution-independent [0, 1]² positions.

use serde::{Deserialize, Serialize};

use crate::location::GridCoord;

/// A tile position rescaled into the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPos {
    pub x: f64,
    pub y: f64,
}

/// Extent of all placed cells plus the padding used for normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub padding: f64,
}

impl GridBounds {
    /// Bounds of `cells`, or `None` when there are none.
    pub fn from_cells<I>(cells: I, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = GridCoord>,
    {
        let mut iter = cells.into_iter();
        let first = iter.next()?;
        let init = GridBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
            padding,
        };
        Some(iter.fold(init, |b, c| GridBounds {
            min_x: b.min_x.min(c.x),
            max_x: b.max_x.max(c.x),
            min_y: b.min_y.min(c.y),
            max_y: b.max_y.max(c.y),
            padding,
        }))
    }

    /// Spans are `i64`: stored coordinates may sit at opposite ends of `i32`.
    pub fn width(&self) -> i64 {
        i64::from(self.max_x) - i64::from(self.min_x)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.max_y) - i64::from(self.min_y)
    }

    pub fn normalize(&self, cell: GridCoord) -> NormalizedPos {
        NormalizedPos {
            x: normalize_axis(cell.x, self.min_x, self.max_x, self.padding),
            y: normalize_axis(cell.y, self.min_y, self.max_y, self.padding),
        }
    }
}

/// Linear map of `v` from `[min, max]` into `[padding, 1 - padding]`; a
/// degenerate axis collapses to its centre.
fn normalize_axis(v: i32, min: i32, max: i32, padding: f64) -> f64 {
    if max == min {
        return 0.5;
    }
    let t = (f64::from(v) - f64::from(min)) / (f64::from(max) - f64::from(min));
    padding + t * (1.0 - 2.0 * padding)
}
