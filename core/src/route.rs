//! Routes, planned routes and the immutable route state snapshot.

use serde::{Deserialize, Serialize};

use crate::{GridCell, Unit, UnitId, WorldPoint};

/// Tile-centered point on a route, carrying its grid indices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Grid tile the waypoint sits on.
    pub cell: GridCell,
    /// World-space center of that tile.
    pub position: WorldPoint,
}

impl Waypoint {
    /// Creates a waypoint from a cell and its world-space center.
    #[must_use]
    pub const fn new(cell: GridCell, position: WorldPoint) -> Self {
        Self { cell, position }
    }
}

/// Ordered, non-empty sequence of waypoints with derived cost estimates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RouteRecord")]
pub struct Route {
    waypoints: Vec<Waypoint>,
    cost: u32,
    turns_needed: u32,
    reachable: bool,
}

impl Route {
    /// Builds a route, deriving its estimates against the provided allowance.
    ///
    /// Returns `None` when `waypoints` is empty. `turns_needed` is zero for a
    /// zero-cost route and saturates at `u32::MAX` when a positive cost meets a
    /// zero allowance.
    #[must_use]
    pub fn new(waypoints: Vec<Waypoint>, allowance: u32) -> Option<Self> {
        let (start, rest) = waypoints.split_first()?;
        Some(Self::from_start(*start, rest.iter().copied(), allowance))
    }

    /// Builds a route from its starting waypoint followed by `rest`.
    #[must_use]
    pub fn from_start<I>(start: Waypoint, rest: I, allowance: u32) -> Self
    where
        I: IntoIterator<Item = Waypoint>,
    {
        let mut waypoints = vec![start];
        waypoints.extend(rest);

        let cost = u32::try_from(waypoints.len() - 1).unwrap_or(u32::MAX);
        let turns_needed = match (cost, allowance) {
            (0, _) => 0,
            (_, 0) => u32::MAX,
            (cost, allowance) => cost.div_ceil(allowance),
        };

        Self {
            waypoints,
            cost,
            turns_needed,
            reachable: cost <= allowance,
        }
    }

    /// Waypoints in walking order; the first one is the starting tile.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of steps required to walk the route.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Turns required to walk the route at the allowance it was built with.
    #[must_use]
    pub const fn turns_needed(&self) -> u32 {
        self.turns_needed
    }

    /// Whether the route fits the allowance it was built with.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// Waypoint the route starts from.
    #[must_use]
    pub fn start(&self) -> Waypoint {
        self.waypoints[0]
    }

    /// Waypoint the route terminates at.
    #[must_use]
    pub fn destination(&self) -> Waypoint {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Index of the waypoint located on `cell`, if the route visits it.
    #[must_use]
    pub fn position_of(&self, cell: GridCell) -> Option<usize> {
        self.waypoints
            .iter()
            .position(|waypoint| waypoint.cell == cell)
    }

    /// Waypoints starting at `cell`, or the whole route when `cell` is not on it.
    #[must_use]
    pub fn remaining_from(&self, cell: GridCell) -> &[Waypoint] {
        let index = self.position_of(cell).unwrap_or(0);
        &self.waypoints[index..]
    }
}

/// Wire form of a [`Route`], checked before it becomes one.
#[derive(Deserialize)]
struct RouteRecord {
    waypoints: Vec<Waypoint>,
    cost: u32,
    turns_needed: u32,
    reachable: bool,
}

impl TryFrom<RouteRecord> for Route {
    type Error = &'static str;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        let steps = record
            .waypoints
            .len()
            .checked_sub(1)
            .ok_or("route has no waypoints")?;
        if usize::try_from(record.cost).ok() != Some(steps) {
            return Err("route cost does not match its waypoints");
        }
        Ok(Self {
            waypoints: record.waypoints,
            cost: record.cost,
            turns_needed: record.turns_needed,
            reachable: record.reachable,
        })
    }
}

/// Execution phase of a stored route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutePhase {
    /// The route was computed from a click but not confirmed yet.
    Previewing,
    /// The route was confirmed and is being consumed turn by turn.
    Executing,
}

/// Lifecycle of the active unit's route interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteLifecycle {
    /// Nothing is selected and no route exists.
    Idle,
    /// The unit is selected without a route.
    Selected,
    /// A route preview awaits confirmation.
    Previewing,
    /// A confirmed route is being consumed.
    Executing,
}

/// Route persisted by the route state together with its original target.
///
/// Keeping both in one optional value means a route is stored exactly when its
/// target is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Remaining route; once executing, it starts at the unit's tile.
    pub route: Route,
    /// Destination the player clicked when the route was planned.
    pub target: Waypoint,
    /// Tile length the route was planned with.
    pub tile_length: f32,
    /// Whether the route is previewed or executing.
    pub phase: RoutePhase,
}

impl PlannedRoute {
    /// Creates a previewed plan ending at the route's destination.
    #[must_use]
    pub fn preview(route: Route, tile_length: f32) -> Self {
        Self {
            target: route.destination(),
            route,
            tile_length,
            phase: RoutePhase::Previewing,
        }
    }
}

/// Immutable copy of the route state handed to systems and adapters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStateSnapshot {
    /// Authoritative copy of the active unit.
    pub unit: Unit,
    /// Selected unit, which can only be the active unit.
    pub selected: Option<UnitId>,
    /// Previewed or executing route, if any.
    pub plan: Option<PlannedRoute>,
    /// Current turn number, starting at one.
    pub turn: u32,
}

impl RouteStateSnapshot {
    /// Derives the lifecycle state from the selection and the stored plan.
    #[must_use]
    pub fn lifecycle(&self) -> RouteLifecycle {
        match (&self.plan, self.selected) {
            (Some(plan), _) if plan.phase == RoutePhase::Executing => RouteLifecycle::Executing,
            (Some(_), _) => RouteLifecycle::Previewing,
            (None, Some(_)) => RouteLifecycle::Selected,
            (None, None) => RouteLifecycle::Idle,
        }
    }

    /// Reports whether the active unit is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected == Some(self.unit.id())
    }

    /// Tile currently occupied by the unit, measured with the plan's tile length.
    #[must_use]
    pub fn unit_cell(&self, tile_length: f32) -> GridCell {
        GridCell::containing(self.unit.position(), tile_length)
    }

    /// Stored waypoints from the unit's tile onward, empty without a plan.
    #[must_use]
    pub fn remaining_waypoints(&self) -> &[Waypoint] {
        match &self.plan {
            Some(plan) => plan
                .route
                .remaining_from(self.unit_cell(plan.tile_length)),
            None => &[],
        }
    }

    /// Whether the `index`-th step after the unit's tile fits this turn's allowance.
    #[must_use]
    pub fn within_allowance(&self, index: usize) -> bool {
        u32::try_from(index).map_or(false, |index| index < self.unit.movement())
    }

    /// Advisory flag telling the HUD whether ending the turn gains anything.
    #[must_use]
    pub fn end_turn_suggested(&self) -> bool {
        !self.unit.has_full_allowance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: f32 = 32.0;

    fn straight_route(length: i32, allowance: u32) -> Route {
        let waypoints = (0..length)
            .map(|column| GridCell::new(column, 0).waypoint(TILE))
            .collect();
        Route::new(waypoints, allowance).expect("non-empty")
    }

    #[test]
    fn empty_routes_are_rejected() {
        assert!(Route::new(Vec::new(), 5).is_none());
    }

    #[test]
    fn estimates_derive_from_length_and_allowance() {
        let route = straight_route(8, 5);
        assert_eq!(route.cost(), 7);
        assert_eq!(route.turns_needed(), 2);
        assert!(!route.is_reachable());

        let route = straight_route(4, 5);
        assert_eq!(route.cost(), 3);
        assert_eq!(route.turns_needed(), 1);
        assert!(route.is_reachable());
    }

    #[test]
    fn zero_cost_route_needs_no_turns() {
        let route = straight_route(1, 0);
        assert_eq!(route.cost(), 0);
        assert_eq!(route.turns_needed(), 0);
        assert!(route.is_reachable());
    }

    #[test]
    fn zero_allowance_saturates_turns() {
        let route = straight_route(3, 0);
        assert_eq!(route.turns_needed(), u32::MAX);
        assert!(!route.is_reachable());
    }

    #[test]
    fn remaining_from_unknown_cell_starts_at_beginning() {
        let route = straight_route(5, 5);
        assert_eq!(route.remaining_from(GridCell::new(2, 0)).len(), 3);
        assert_eq!(route.remaining_from(GridCell::new(9, 9)).len(), 5);
    }

    #[test]
    fn lifecycle_follows_selection_and_plan() {
        let unit = Unit::new(UnitId::new(7), "Scout", GridCell::new(0, 0).center(TILE), 5);
        let mut snapshot = RouteStateSnapshot {
            unit,
            selected: None,
            plan: None,
            turn: 1,
        };
        assert_eq!(snapshot.lifecycle(), RouteLifecycle::Idle);

        snapshot.selected = Some(UnitId::new(7));
        assert_eq!(snapshot.lifecycle(), RouteLifecycle::Selected);

        snapshot.plan = Some(PlannedRoute::preview(straight_route(3, 5), TILE));
        assert_eq!(snapshot.lifecycle(), RouteLifecycle::Previewing);

        if let Some(plan) = snapshot.plan.as_mut() {
            plan.phase = RoutePhase::Executing;
        }
        assert_eq!(snapshot.lifecycle(), RouteLifecycle::Executing);
    }

    #[test]
    fn within_allowance_compares_step_index_with_movement() {
        let unit = Unit::new(UnitId::new(1), "Hero", GridCell::new(0, 0).center(TILE), 2);
        let snapshot = RouteStateSnapshot {
            unit,
            selected: None,
            plan: None,
            turn: 1,
        };
        assert!(snapshot.within_allowance(0));
        assert!(snapshot.within_allowance(1));
        assert!(!snapshot.within_allowance(2));
        assert!(!snapshot.end_turn_suggested());
    }
}
