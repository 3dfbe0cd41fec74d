//! Location graph → stable 2D grid placement.
//!
//! Stored coordinates anchor the layout; everything else is reached by a
//! breadth-first walk that steps one cell per exit in the exit's compass
//! direction. Collisions are pushed to the nearest free ring cell and
//! unreachable locations are parked in a row below everything else.
//!
//! Iteration order is fixed throughout (input order for seeding, exit order
//! per location, row-major ring scan), so the same input always yields the
//! same output.

pub mod normalize;
pub mod spiral;

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};
use crate::location::{GridCoord, Location};
pub use normalize::{GridBounds, NormalizedPos};
pub use spiral::find_free_cell;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Layout tuning. The defaults are what renderers expect; change them only for
/// experiments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Margin on each side of the unit square, per axis.
    pub padding: f64,
    /// Rings searched around a collision before giving up.
    pub max_ring_radius: i32,
    /// Eastward offset used once the ring search is exhausted.
    pub fallback_x_offset: i32,
    /// Rows left between the connected layout and parked disconnected nodes.
    pub disconnected_row_gap: i32,
}

/// Largest padding that still keeps the axes in order; padding must stay
/// below one half.
const MAX_PADDING: f64 = 0.49;

impl LayoutParams {
    /// Reject parameters that would break the layout's guarantees: padding
    /// outside `[0, 0.5)` flips or escapes the unit square, and negative
    /// counts are meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.padding.is_finite() && (0.0..0.5).contains(&self.padding)) {
            return Err(AtlasError::InvalidParams(format!(
                "padding must be in [0, 0.5), got {}",
                self.padding
            )));
        }
        if self.max_ring_radius < 0 {
            return Err(AtlasError::InvalidParams(format!(
                "max_ring_radius must be >= 0, got {}",
                self.max_ring_radius
            )));
        }
        if self.disconnected_row_gap < 0 {
            return Err(AtlasError::InvalidParams(format!(
                "disconnected_row_gap must be >= 0, got {}",
                self.disconnected_row_gap
            )));
        }
        Ok(())
    }

    /// Nearest valid parameters. A non-finite padding falls back to the
    /// default.
    pub fn clamped(&self) -> Self {
        let padding = if self.padding.is_finite() {
            self.padding.clamp(0.0, MAX_PADDING)
        } else {
            LayoutParams::default().padding
        };
        Self {
            padding,
            max_ring_radius: self.max_ring_radius.max(0),
            fallback_x_offset: self.fallback_x_offset,
            disconnected_row_gap: self.disconnected_row_gap.max(0),
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            padding: 0.15,
            max_ring_radius: 10,
            fallback_x_offset: 10,
            disconnected_row_gap: 2,
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Result of one layout pass. Maps are keyed by location id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLayout {
    pub positions: BTreeMap<String, NormalizedPos>,
    pub grid: BTreeMap<String, GridCoord>,
    /// `None` only for empty input.
    pub bounds: Option<GridBounds>,
}

impl GraphLayout {
    fn empty() -> Self {
        Self {
            positions: BTreeMap::new(),
            grid: BTreeMap::new(),
            bounds: None,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<NormalizedPos> {
        self.positions.get(id).copied()
    }

    pub fn cell(&self, id: &str) -> Option<GridCoord> {
        self.grid.get(id).copied()
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Lay out `locations` with default parameters.
pub fn compute_layout(locations: &[Location]) -> GraphLayout {
    compute_layout_with(locations, &LayoutParams::default())
}

/// Lay out `locations`.
///
/// 1. Every location with a stored (x, y) is seeded there; with none stored,
///    the first location is seeded at the origin.
/// 2. BFS from the seeds in input order. Each unvisited exit target is placed
///    one step from the current cell in the exit direction, moved to the
///    nearest free cell if that one is taken.
/// 3. Locations never reached are placed left to right on one shared row,
///    `disconnected_row_gap` below the lowest cell placed by the BFS. The row
///    is fixed before the first of them is placed.
/// 4. All cells are normalised into `[padding, 1 - padding]` per axis.
///
/// Ids are assumed unique; if not, the first occurrence wins. Out-of-range
/// params are clamped (see [`LayoutParams::clamped`]).
pub fn compute_layout_with(locations: &[Location], params: &LayoutParams) -> GraphLayout {
    if locations.is_empty() {
        return GraphLayout::empty();
    }
    if let Err(e) = params.validate() {
        tracing::warn!(error = %e, "clamping layout parameters");
    }
    let params = &params.clamped();

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(locations.len());
    for (i, loc) in locations.iter().enumerate() {
        index.entry(loc.id.as_str()).or_insert(i);
    }

    let mut cells: Vec<Option<GridCoord>> = vec![None; locations.len()];
    let mut occupied: HashSet<GridCoord> = HashSet::with_capacity(locations.len());
    let mut queue: VecDeque<usize> = VecDeque::new();

    // Seeding.
    for (i, loc) in locations.iter().enumerate() {
        if index[loc.id.as_str()] != i {
            continue;
        }
        if let Some(cell) = loc.stored_coord() {
            cells[i] = Some(cell);
            occupied.insert(cell);
            queue.push_back(i);
        }
    }
    let seeded = queue.len();
    if seeded == 0 {
        cells[0] = Some(GridCoord::ORIGIN);
        occupied.insert(GridCoord::ORIGIN);
        queue.push_back(0);
    }

    // Breadth-first expansion. Stored coordinates were all seeded above, so
    // every target reached here is positioned from its exit direction.
    while let Some(current) = queue.pop_front() {
        let Some(here) = cells[current] else { continue };
        for exit in &locations[current].exits {
            let Some(&target) = index.get(exit.target_location_id.as_str()) else {
                tracing::trace!(
                    from = %locations[current].id,
                    to = %exit.target_location_id,
                    "layout skipped exit to unknown location"
                );
                continue;
            };
            if cells[target].is_some() {
                continue;
            }
            let candidate = here.offset(exit.direction.offset());
            let cell = find_free_cell(candidate, &occupied, params);
            cells[target] = Some(cell);
            occupied.insert(cell);
            queue.push_back(target);
        }
    }

    // Disconnected remainder.
    let unplaced: Vec<usize> = (0..locations.len())
        .filter(|&i| cells[i].is_none() && index[locations[i].id.as_str()] == i)
        .collect();
    if !unplaced.is_empty() {
        let max_y = cells.iter().flatten().map(|c| c.y).max().unwrap_or(0);
        let row = max_y.saturating_add(params.disconnected_row_gap);
        for (k, &i) in unplaced.iter().enumerate() {
            let start = GridCoord::new(i32::try_from(k).unwrap_or(i32::MAX), row);
            let cell = find_free_cell(start, &occupied, params);
            cells[i] = Some(cell);
            occupied.insert(cell);
        }
    }

    let placed: Vec<(&str, GridCoord)> = locations
        .iter()
        .zip(&cells)
        .filter_map(|(loc, cell)| cell.map(|c| (loc.id.as_str(), c)))
        .collect();

    let Some(bounds) = GridBounds::from_cells(placed.iter().map(|&(_, c)| c), params.padding) else {
        return GraphLayout::empty();
    };

    let mut grid = BTreeMap::new();
    let mut positions = BTreeMap::new();
    for (id, cell) in placed {
        grid.insert(id.to_string(), cell);
        positions.insert(id.to_string(), bounds.normalize(cell));
    }

    tracing::debug!(
        nodes = locations.len(),
        seeded,
        disconnected = unplaced.len(),
        min_x = bounds.min_x,
        max_x = bounds.max_x,
        min_y = bounds.min_y,
        max_y = bounds.max_y,
        "graph layout computed"
    );

    GraphLayout { positions, grid, bounds: Some(bounds) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Direction;
    use approx::assert_relative_eq;

    fn loc(id: &str) -> Location {
        Location::new(id, id.to_uppercase(), "")
    }

    fn south_chain(ids: &[&str]) -> Vec<Location> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| match ids.get(i + 1) {
                Some(next) => loc(id).with_exit(Direction::South, *next),
                None => loc(id),
            })
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_layout() {
        let layout = compute_layout(&[]);
        assert!(layout.is_empty());
        assert!(layout.grid.is_empty());
        assert!(layout.bounds.is_none());
    }

    #[test]
    fn single_location_is_centred_even_with_stored_coord() {
        for l in [loc("a"), loc("a").with_grid(40, -12)] {
            let layout = compute_layout(&[l]);
            let p = layout.position("a").unwrap();
            assert_eq!((p.x, p.y), (0.5, 0.5));
        }
    }

    #[test]
    fn south_chain_steps_down_one_row_per_exit() {
        let locs = south_chain(&["a", "b", "c", "d", "e"]);
        let layout = compute_layout(&locs);

        let ys: Vec<i32> = ["a", "b", "c", "d", "e"].iter().map(|id| layout.cell(id).unwrap().y).collect();
        assert_eq!(ys, vec![0, 1, 2, 3, 4]);
        assert!(["a", "b", "c", "d", "e"].iter().all(|id| layout.cell(id).unwrap().x == 0));

        let norm: Vec<f64> = ["a", "b", "c", "d", "e"].iter().map(|id| layout.position(id).unwrap().y).collect();
        assert!(norm.windows(2).all(|w| w[0] < w[1]), "normalised y not increasing: {norm:?}");
        assert_relative_eq!(norm[0], 0.15);
        assert_relative_eq!(norm[4], 0.85);
        assert_relative_eq!(layout.position("c").unwrap().x, 0.5);
    }

    #[test]
    fn every_direction_steps_by_its_offset() {
        let mut hub = loc("hub");
        let mut locs = Vec::new();
        for (i, d) in Direction::ALL.iter().enumerate() {
            if *d == Direction::Unknown {
                continue;
            }
            let id = format!("t{i}");
            hub = hub.with_exit(*d, id.clone());
            locs.push(loc(&id));
        }
        locs.insert(0, hub);
        let layout = compute_layout(&locs);
        for exit in &locs[0].exits {
            let cell = layout.cell(&exit.target_location_id).unwrap();
            assert_eq!((cell.x, cell.y), exit.direction.offset(), "{}", exit.direction);
        }
    }

    #[test]
    fn stored_coordinates_anchor_their_neighbours() {
        let locs = vec![
            loc("a").with_grid(5, 5).with_exit(Direction::West, "b"),
            loc("b").with_exit(Direction::North, "c"),
            loc("c"),
        ];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("a"), Some(GridCoord::new(5, 5)));
        assert_eq!(layout.cell("b"), Some(GridCoord::new(4, 5)));
        assert_eq!(layout.cell("c"), Some(GridCoord::new(4, 4)));
    }

    #[test]
    fn stored_target_keeps_its_coordinate() {
        // b is stored far from where a's exit would put it.
        let locs = vec![
            loc("a").with_exit(Direction::East, "b").with_exit(Direction::South, "c"),
            loc("b").with_grid(20, 0),
            loc("c"),
        ];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("b"), Some(GridCoord::new(20, 0)));
        // a is unstored and unreachable from b: parked below.
        assert_eq!(layout.cell("a"), Some(GridCoord::new(0, 2)));
    }

    #[test]
    fn collision_moves_to_first_free_ring_cell() {
        let locs = vec![
            loc("a").with_exit(Direction::East, "b").with_exit(Direction::South, "c"),
            loc("b").with_exit(Direction::South, "d"),
            loc("c").with_exit(Direction::East, "e"),
            loc("d"),
            loc("e"),
        ];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("d"), Some(GridCoord::new(1, 1)));
        // (1,1) is taken; ring 1 row-major: (0,0) a, (1,0) b, (2,0) free.
        assert_eq!(layout.cell("e"), Some(GridCoord::new(2, 0)));
    }

    #[test]
    fn unknown_direction_places_south() {
        let locs = vec![loc("a").with_exit(Direction::Unknown, "b"), loc("b")];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("b"), Some(GridCoord::new(0, 1)));
    }

    #[test]
    fn disconnected_nodes_park_below_the_graph() {
        let locs = vec![
            loc("a").with_exit(Direction::South, "b"),
            loc("b"),
            loc("island1"),
            loc("island2"),
        ];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("island1"), Some(GridCoord::new(0, 3)));
        assert_eq!(layout.cell("island2"), Some(GridCoord::new(1, 3)));
    }

    #[test]
    fn exits_to_missing_ids_are_ignored() {
        let locs = vec![loc("a").with_exit(Direction::North, "ghost"), loc("b")];
        let layout = compute_layout(&locs);
        assert_eq!(layout.len(), 2);
        assert!(layout.position("ghost").is_none());
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let locs = vec![loc("a").with_grid(1, 1), loc("a").with_grid(9, 9)];
        let layout = compute_layout(&locs);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.cell("a"), Some(GridCoord::new(1, 1)));
    }

    #[test]
    fn custom_padding_is_applied() {
        let params = LayoutParams { padding: 0.0, ..Default::default() };
        let layout = compute_layout_with(&south_chain(&["a", "b"]), &params);
        assert_eq!(layout.position("a").unwrap().y, 0.0);
        assert_eq!(layout.position("b").unwrap().y, 1.0);
        assert_eq!(layout.bounds.unwrap().padding, 0.0);
    }

    #[test]
    fn stored_cells_may_coincide() {
        let locs = vec![loc("a").with_grid(2, 2), loc("b").with_grid(2, 2), loc("c").with_grid(4, 2)];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("a"), Some(GridCoord::new(2, 2)));
        assert_eq!(layout.cell("b"), Some(GridCoord::new(2, 2)));
        assert_eq!(layout.position("a"), layout.position("b"));
    }

    #[test]
    fn derived_cell_on_stored_seed_moves_to_ring() {
        // a's east step lands on c's stored cell (1,0).
        let locs = vec![
            loc("a").with_grid(0, 0).with_exit(Direction::East, "b"),
            loc("b"),
            loc("c").with_grid(1, 0),
        ];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("c"), Some(GridCoord::new(1, 0)));
        // Ring 1 around (1,0), row-major: (0,-1) is the first free cell.
        assert_eq!(layout.cell("b"), Some(GridCoord::new(0, -1)));
    }

    #[test]
    fn exhausted_rings_fall_back_east_in_full_layout() {
        // Stored seeds fill every cell within 10 rings of (1,0).
        let mut locs = Vec::new();
        for y in -10..=10 {
            for x in -9..=11 {
                let mut l = loc(&format!("s{x}_{y}")).with_grid(x, y);
                if (x, y) == (0, 0) {
                    l = l.with_exit(Direction::East, "b");
                }
                locs.push(l);
            }
        }
        locs.push(loc("b"));
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("b"), Some(GridCoord::new(11, 0)));
    }

    #[test]
    fn zero_rings_fall_back_immediately() {
        let locs = vec![
            loc("a").with_grid(0, 0).with_exit(Direction::East, "b"),
            loc("b"),
            loc("c").with_grid(1, 0),
        ];
        let params = LayoutParams { max_ring_radius: 0, ..Default::default() };
        let layout = compute_layout_with(&locs, &params);
        assert_eq!(layout.cell("b"), Some(GridCoord::new(11, 0)));
    }

    #[test]
    fn wide_stored_span_normalises_without_overflow() {
        let locs = vec![
            loc("w").with_grid(-2_000_000_000, 0),
            loc("e").with_grid(2_000_000_000, 0),
        ];
        let layout = compute_layout(&locs);
        assert_relative_eq!(layout.position("w").unwrap().x, 0.15);
        assert_relative_eq!(layout.position("e").unwrap().x, 0.85);
    }

    #[test]
    fn step_off_grid_edge_stays_on_grid() {
        let locs = vec![
            loc("edge").with_grid(i32::MAX, 0).with_exit(Direction::East, "beyond"),
            loc("beyond"),
        ];
        let layout = compute_layout(&locs);
        // The east step saturates onto the anchor; ring 1 yields (MAX-1, -1).
        assert_eq!(layout.cell("beyond"), Some(GridCoord::new(i32::MAX - 1, -1)));
        for p in layout.positions.values() {
            assert!((0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn islands_park_near_the_lower_grid_edge() {
        let locs = vec![loc("low").with_grid(0, i32::MAX - 1), loc("island")];
        let layout = compute_layout(&locs);
        assert_eq!(layout.cell("island"), Some(GridCoord::new(0, i32::MAX)));
    }

    #[test]
    fn params_validation() {
        assert!(LayoutParams::default().validate().is_ok());
        for padding in [0.5, 0.8, -0.1, 1.5, f64::NAN] {
            let p = LayoutParams { padding, ..Default::default() };
            assert!(matches!(p.validate(), Err(AtlasError::InvalidParams(_))), "padding {padding}");
        }
        let p = LayoutParams { max_ring_radius: -1, ..Default::default() };
        assert!(p.validate().is_err());
        let p = LayoutParams { max_ring_radius: 0, padding: 0.0, ..Default::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn oversized_padding_is_clamped_and_keeps_axis_order() {
        let params = LayoutParams { padding: 0.8, ..Default::default() };
        let layout = compute_layout_with(&south_chain(&["a", "b"]), &params);
        let (a, b) = (layout.position("a").unwrap(), layout.position("b").unwrap());
        assert!(a.y < b.y, "south node must sit below: a = {a:?}, b = {b:?}");
        assert!((0.0..=1.0).contains(&a.y) && (0.0..=1.0).contains(&b.y));
        assert_relative_eq!(layout.bounds.unwrap().padding, 0.49);
    }

    #[test]
    fn negative_padding_is_clamped_into_unit_square() {
        let params = LayoutParams { padding: -0.3, ..Default::default() };
        let layout = compute_layout_with(&south_chain(&["a", "b"]), &params);
        assert_eq!(layout.position("a").unwrap().y, 0.0);
        assert_eq!(layout.position("b").unwrap().y, 1.0);
    }

    /// Pseudo-random graph: every node gets up to three exits to arbitrary
    /// nodes, some nodes get stored coordinates.
    fn scrambled_graph(n: usize, seed: u64) -> Vec<Location> {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as usize
        };
        (0..n)
            .map(|i| {
                let mut l = loc(&format!("n{i}"));
                let mut used = HashSet::new();
                for _ in 0..3 {
                    let d = Direction::ALL[next() % Direction::ALL.len()];
                    if used.insert(d) {
                        l = l.with_exit(d, format!("n{}", next() % n));
                    }
                }
                if next() % 7 == 0 {
                    l = l.with_grid((next() % 9) as i32 - 4, (next() % 9) as i32 - 4);
                }
                l
            })
            .collect()
    }

    #[test]
    fn every_id_gets_one_position_inside_unit_square() {
        for seed in [1, 7, 42, 1234] {
            let locs = scrambled_graph(150, seed);
            let layout = compute_layout(&locs);
            assert_eq!(layout.len(), locs.len());
            assert_eq!(layout.grid.len(), locs.len());
            for (id, p) in &layout.positions {
                assert!((0.0..=1.0).contains(&p.x), "{id}: x = {}", p.x);
                assert!((0.0..=1.0).contains(&p.y), "{id}: y = {}", p.y);
            }
        }
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let locs = scrambled_graph(200, 99);
        let a = serde_json::to_string(&compute_layout(&locs)).unwrap();
        let b = serde_json::to_string(&compute_layout(&locs)).unwrap();
        assert_eq!(a, b);
    }
}
