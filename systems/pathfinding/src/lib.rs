#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic grid pathfinder that turns a click into a route.
//!
//! The grid is assumed to be open: routes are straight interpolated lines
//! between the unit's tile and the clicked tile rather than the result of a
//! search around obstacles. Rounding makes the walk direction-sensitive, so a
//! route and the reverse of its opposite route may visit different tiles.

use wayfarer_core::{GridCell, Route, Unit, WorldPoint};

/// Plans a route from the unit's tile to the tile containing `target`.
///
/// Both positions are converted to grid indices by floor division on
/// `tile_length`, which must be positive. The route always starts on the
/// unit's tile; a target on that same tile yields a zero-cost route.
/// Estimates are derived against `max_allowance`.
#[must_use]
pub fn find_route(unit: &Unit, target: WorldPoint, tile_length: f32, max_allowance: u32) -> Route {
    debug_assert!(tile_length > 0.0, "tile length must be positive");

    let start = GridCell::containing(unit.position(), tile_length);
    let end = GridCell::containing(target, tile_length);
    let mut cells = grid_line(start, end).into_iter();
    let first = cells.next().unwrap_or(start);

    Route::from_start(
        first.waypoint(tile_length),
        cells.map(|cell| cell.waypoint(tile_length)),
        max_allowance,
    )
}

/// Walks from `start` to `end`, one tile per step, along an interpolated line.
///
/// The result begins with `start` and contains `steps + 1` cells where
/// `steps` is the Chebyshev distance between the endpoints. Each intermediate
/// cell is `start + delta * (i / steps)` rounded per axis with ties toward
/// positive infinity.
#[must_use]
pub fn grid_line(start: GridCell, end: GridCell) -> Vec<GridCell> {
    let steps = start.chebyshev_distance(end);
    let mut cells = Vec::with_capacity(usize::try_from(steps).unwrap_or(0) + 1);
    cells.push(start);
    if steps == 0 {
        return cells;
    }

    let delta_column = f64::from(end.column()) - f64::from(start.column());
    let delta_row = f64::from(end.row()) - f64::from(start.row());
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        cells.push(GridCell::new(
            round_half_up(f64::from(start.column()) + delta_column * t),
            round_half_up(f64::from(start.row()) + delta_row * t),
        ));
    }

    cells
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
