//! Reconciles a persisted route with the unit's current tile and allowance.

use wayfarer_core::{Advance, GridCell, PlannedRoute, Route, Unit};

/// Result of spending the unit's allowance along its pending route.
#[derive(Debug)]
pub(crate) struct Continuation {
    /// Unit movement produced by walking the route.
    pub(crate) advance: Advance,
    /// Route left to walk, starting at the unit's new tile. `None` once the
    /// destination is reached.
    pub(crate) remaining: Option<Route>,
}

/// Walks the plan from the unit's tile, bounded by its current allowance.
///
/// The unit's tile is located by exact grid comparison. A unit standing off
/// the route does not move and the whole route stays pending.
pub(crate) fn continue_route(unit: &Unit, plan: &PlannedRoute) -> Continuation {
    let cell = GridCell::containing(unit.position(), plan.tile_length);
    let index = plan.route.position_of(cell).unwrap_or(0);
    let suffix = &plan.route.waypoints()[index..];

    let advance = unit.advance_along_route(suffix, unit.movement());
    let walked = advance.consumed.len().saturating_sub(1);
    let left = &suffix[walked..];

    let remaining = if left.len() > 1 {
        Route::new(left.to_vec(), unit.max_movement())
    } else {
        None
    };

    Continuation { advance, remaining }
}
