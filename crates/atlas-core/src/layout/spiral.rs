//! Collision resolution: nearest free cell by square rings.

use std::collections::HashSet;

use crate::location::GridCoord;

use super::LayoutParams;

/// Cells at Chebyshev distance exactly `radius` from `center`, row by row from
/// the top-left corner.
pub fn ring(center: GridCoord, radius: i32) -> impl Iterator<Item = GridCoord> {
    (-radius..=radius).flat_map(move |dy| {
        (-radius..=radius)
            .filter(move |dx| dx.abs() == radius || dy.abs() == radius)
            .map(move |dx| center.offset((dx, dy)))
    })
}

/// First unoccupied cell on rings `1..=max_radius` around `target`, or `None`
/// when every ring is full. `target` itself is not considered.
pub fn ring_search(target: GridCoord, occupied: &HashSet<GridCoord>, max_radius: i32) -> Option<GridCoord> {
    (1..=max_radius)
        .flat_map(|r| ring(target, r))
        .find(|cell| !occupied.contains(cell))
}

/// `target` if free; otherwise the nearest free ring cell; otherwise a fixed
/// offset east of `target`. Never fails.
pub fn find_free_cell(target: GridCoord, occupied: &HashSet<GridCoord>, params: &LayoutParams) -> GridCoord {
    if !occupied.contains(&target) {
        return target;
    }
    ring_search(target, occupied, params.max_ring_radius).unwrap_or_else(|| {
        let fallback = target.offset((params.fallback_x_offset, 0));
        tracing::warn!(
            target_x = target.x,
            target_y = target.y,
            rings = params.max_ring_radius,
            fallback_x = fallback.x,
            fallback_y = fallback.y,
            "no free grid cell near collision, using fallback offset"
        );
        fallback
    })
}
