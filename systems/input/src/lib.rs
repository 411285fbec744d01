#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating pointer presses into route commands.
//!
//! Presses are resolved with a fixed priority: a press on the unit always
//! selects it, a press on the planned route's terminal tile confirms the
//! route, and any other tile previews a fresh route while the unit is
//! selected. Without a selection, presses away from the unit do nothing.

use wayfarer_core::{Command, GridCell, RouteStateSnapshot, UnitId, WorldPoint};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointerInput {
    /// World-space position of a pointer press on this frame, if any.
    pub press: Option<WorldPoint>,
    /// Whether the player activated the end-turn control on this frame.
    pub end_turn: bool,
    /// Whether the player asked to drop the current route on this frame.
    pub cancel: bool,
}

impl PointerInput {
    /// Creates an input descriptor for a single pointer press.
    #[must_use]
    pub const fn press(position: WorldPoint) -> Self {
        Self {
            press: Some(position),
            end_turn: false,
            cancel: false,
        }
    }
}

/// Meaning assigned to a pointer press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerIntent {
    /// The press landed on the unit.
    SelectUnit(UnitId),
    /// The press landed on the confirmation marker of the stored route.
    ConfirmRoute,
    /// The press landed on another tile; carries the tile center.
    PreviewRoute(WorldPoint),
}

/// Maps pointer input onto route state commands for a fixed tile size.
#[derive(Clone, Copy, Debug)]
pub struct PointerRouter {
    tile_length: f32,
}

impl PointerRouter {
    /// Creates a router for tiles of the provided edge length.
    #[must_use]
    pub const fn new(tile_length: f32) -> Self {
        Self { tile_length }
    }

    /// Edge length of a tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Consumes one frame of input and emits the resulting commands.
    pub fn handle(&self, snapshot: &RouteStateSnapshot, input: PointerInput, out: &mut Vec<Command>) {
        if input.cancel && snapshot.plan.is_some() {
            out.push(Command::CancelRoute);
        }

        if let Some(position) = input.press {
            match self.classify(snapshot, position) {
                Some(PointerIntent::SelectUnit(unit)) => out.push(Command::SelectUnit { unit }),
                Some(PointerIntent::ConfirmRoute) => out.push(Command::ConfirmRoute),
                Some(PointerIntent::PreviewRoute(target)) => out.push(Command::PreviewRoute {
                    target,
                    tile_length: self.tile_length,
                }),
                None => {}
            }
        }

        if input.end_turn {
            out.push(Command::EndTurn);
        }
    }

    /// Resolves what a press at `position` means in the current state.
    #[must_use]
    pub fn classify(
        &self,
        snapshot: &RouteStateSnapshot,
        position: WorldPoint,
    ) -> Option<PointerIntent> {
        if position.distance(snapshot.unit.position()) < self.tile_length * 0.5 {
            return Some(PointerIntent::SelectUnit(snapshot.unit.id()));
        }

        if !snapshot.is_selected() {
            return None;
        }

        let cell = GridCell::containing(position, self.tile_length);
        if let Some(plan) = &snapshot.plan {
            if plan.target.cell == cell {
                return Some(PointerIntent::ConfirmRoute);
            }
        }

        Some(PointerIntent::PreviewRoute(cell.center(self.tile_length)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{PlannedRoute, Route, RoutePhase, Unit};

    const TILE: f32 = 32.0;
    const HERO: UnitId = UnitId::new(1);

    fn snapshot(selected: bool) -> RouteStateSnapshot {
        RouteStateSnapshot {
            unit: Unit::new(HERO, "Hero", GridCell::new(2, 2).center(TILE), 5),
            selected: selected.then_some(HERO),
            plan: None,
            turn: 1,
        }
    }

    fn with_plan(mut snapshot: RouteStateSnapshot, column: i32, phase: RoutePhase) -> RouteStateSnapshot {
        let waypoints = (2..=column)
            .map(|column| GridCell::new(column, 2).waypoint(TILE))
            .collect();
        let route = Route::new(waypoints, 5).expect("non-empty");
        let mut plan = PlannedRoute::preview(route, TILE);
        plan.phase = phase;
        snapshot.plan = Some(plan);
        snapshot
    }

    #[test]
    fn press_near_unit_center_selects_it() {
        let router = PointerRouter::new(TILE);
        let near = WorldPoint::new(2.0 * TILE + 10.0, 2.0 * TILE + 20.0);

        assert_eq!(
            router.classify(&snapshot(false), near),
            Some(PointerIntent::SelectUnit(HERO))
        );
    }

    #[test]
    fn press_on_unit_tile_edge_is_not_a_selection() {
        let router = PointerRouter::new(TILE);
        let corner = WorldPoint::new(2.0 * TILE + 1.0, 2.0 * TILE + 1.0);

        assert_eq!(router.classify(&snapshot(false), corner), None);
    }

    #[test]
    fn press_without_selection_is_ignored() {
        let router = PointerRouter::new(TILE);
        let mut out = Vec::new();

        router.handle(
            &snapshot(false),
            PointerInput::press(GridCell::new(8, 8).center(TILE)),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn press_snaps_preview_target_to_tile_center() {
        let router = PointerRouter::new(TILE);
        let mut out = Vec::new();

        router.handle(
            &snapshot(true),
            PointerInput::press(WorldPoint::new(5.0 * TILE + 3.0, 1.0 * TILE + 30.0)),
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::PreviewRoute {
                target: GridCell::new(5, 1).center(TILE),
                tile_length: TILE,
            }]
        );
    }

    #[test]
    fn press_on_route_terminal_confirms() {
        let router = PointerRouter::new(TILE);
        let state = with_plan(snapshot(true), 6, RoutePhase::Previewing);

        assert_eq!(
            router.classify(&state, WorldPoint::new(6.0 * TILE + 2.0, 2.0 * TILE + 2.0)),
            Some(PointerIntent::ConfirmRoute)
        );
        assert_eq!(
            router.classify(&state, GridCell::new(5, 2).center(TILE)),
            Some(PointerIntent::PreviewRoute(GridCell::new(5, 2).center(TILE)))
        );
    }

    #[test]
    fn unit_wins_over_zero_cost_marker() {
        let router = PointerRouter::new(TILE);
        let state = with_plan(snapshot(true), 2, RoutePhase::Previewing);

        assert_eq!(
            router.classify(&state, GridCell::new(2, 2).center(TILE)),
            Some(PointerIntent::SelectUnit(HERO))
        );
    }

    #[test]
    fn buttons_map_to_turn_and_cancel_commands() {
        let router = PointerRouter::new(TILE);
        let state = with_plan(snapshot(true), 4, RoutePhase::Executing);
        let mut out = Vec::new();

        router.handle(
            &state,
            PointerInput {
                press: None,
                end_turn: true,
                cancel: true,
            },
            &mut out,
        );

        assert_eq!(out, vec![Command::CancelRoute, Command::EndTurn]);
    }

    #[test]
    fn cancel_without_route_emits_nothing() {
        let router = PointerRouter::new(TILE);
        let mut out = Vec::new();

        router.handle(
            &snapshot(true),
            PointerInput {
                cancel: true,
                ..PointerInput::default()
            },
            &mut out,
        );

        assert!(out.is_empty());
    }
}
