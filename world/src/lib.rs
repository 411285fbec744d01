#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative route state for the Wayfarer adventure map.
//!
//! The world owns the only mutable copy of the active unit, its selection, the
//! previewed or executing route and the turn counter. Adapters and systems
//! never write to it directly: they submit [`Command`] values through
//! [`apply`] and read immutable snapshots through the [`query`] module.

mod continuation;

use tracing::{debug, trace};
use wayfarer_core::{
    Command, Event, GridCell, PlannedRoute, RoutePhase, Unit, UnitId, WorldPoint, FIRST_TURN,
};
use wayfarer_system_pathfinding::find_route;

use self::continuation::continue_route;

/// Represents the authoritative Wayfarer route state.
#[derive(Debug)]
pub struct World {
    unit: Unit,
    selected: Option<UnitId>,
    plan: Option<PlannedRoute>,
    turn: u32,
}

impl World {
    /// Creates a world on the first turn around the provided unit.
    ///
    /// The unit starts unselected with its allowance restored.
    #[must_use]
    pub fn new(unit: Unit) -> Self {
        Self {
            unit: unit.reset_allowance(),
            selected: None,
            plan: None,
            turn: FIRST_TURN,
        }
    }

    fn select_unit(&mut self, unit: UnitId, out_events: &mut Vec<Event>) {
        if unit != self.unit.id() {
            trace!(unit = unit.get(), "ignoring selection of unknown unit");
            return;
        }

        if self.plan.take().is_some() {
            debug!(unit = unit.get(), "selection discarded stored route");
        }
        self.selected = Some(unit);
        out_events.push(Event::UnitSelected { unit });
    }

    fn preview_route(&mut self, target: WorldPoint, tile_length: f32, out_events: &mut Vec<Event>) {
        if !(tile_length.is_finite() && tile_length > 0.0) {
            trace!(tile_length, "ignoring preview with invalid tile length");
            return;
        }
        if self.selected != Some(self.unit.id()) {
            trace!("ignoring preview without a selected unit");
            return;
        }

        let route = find_route(&self.unit, target, tile_length, self.unit.max_movement());
        debug!(
            turn = self.turn,
            cost = route.cost(),
            turns_needed = route.turns_needed(),
            reachable = route.is_reachable(),
            "route previewed"
        );
        out_events.push(Event::RoutePreviewed {
            unit: self.unit.id(),
            destination: route.destination(),
            cost: route.cost(),
            turns_needed: route.turns_needed(),
            reachable: route.is_reachable(),
        });
        self.plan = Some(PlannedRoute::preview(route, tile_length));
    }

    fn confirm_route(&mut self, out_events: &mut Vec<Event>) {
        let Some(plan) = self.plan.as_mut() else {
            trace!("ignoring confirmation without a route");
            return;
        };
        if plan.phase != RoutePhase::Previewing {
            trace!("ignoring confirmation of a route already executing");
            return;
        }

        plan.phase = RoutePhase::Executing;
        debug!(turn = self.turn, cost = plan.route.cost(), "route confirmed");
        out_events.push(Event::RouteConfirmed {
            unit: self.unit.id(),
        });
    }

    fn cancel_route(&mut self, out_events: &mut Vec<Event>) {
        if self.plan.take().is_none() {
            trace!("ignoring cancellation without a route");
            return;
        }

        debug!(turn = self.turn, "route cancelled");
        out_events.push(Event::RouteCancelled {
            unit: self.unit.id(),
        });
    }

    fn advance_step(&mut self, out_events: &mut Vec<Event>) {
        let Some(mut plan) = self.plan.take() else {
            trace!("ignoring advance without a route");
            return;
        };
        if plan.phase != RoutePhase::Executing {
            trace!("ignoring advance of an unconfirmed route");
            self.plan = Some(plan);
            return;
        }

        let from = GridCell::containing(self.unit.position(), plan.tile_length);
        let continuation = continue_route(&self.unit, &plan);
        let steps = continuation.advance.steps();
        self.unit = continuation.advance.unit;
        let to = GridCell::containing(self.unit.position(), plan.tile_length);
        let remaining_cost = continuation
            .remaining
            .as_ref()
            .map_or(0, |route| route.cost());

        if steps > 0 {
            debug!(
                turn = self.turn,
                steps,
                remaining_cost,
                movement = self.unit.movement(),
                "unit advanced along route"
            );
            out_events.push(Event::UnitAdvanced {
                unit: self.unit.id(),
                from,
                to,
                steps,
                remaining_cost,
            });
        }

        match continuation.remaining {
            Some(route) => {
                plan.route = route;
                self.plan = Some(plan);
            }
            None => {
                debug!(turn = self.turn, "route completed");
                out_events.push(Event::RouteCompleted {
                    unit: self.unit.id(),
                    destination: plan.target,
                });
            }
        }
    }

    fn end_turn(&mut self, out_events: &mut Vec<Event>) {
        self.turn = self.turn.saturating_add(1);
        self.unit = self.unit.reset_allowance();
        out_events.push(Event::AllowanceRestored {
            unit: self.unit.id(),
            movement: self.unit.movement(),
        });

        self.selected = Some(self.unit.id());
        let route_pending = self
            .plan
            .as_ref()
            .is_some_and(|plan| plan.phase == RoutePhase::Executing);

        debug!(turn = self.turn, route_pending, "turn started");
        out_events.push(Event::TurnStarted {
            turn: self.turn,
            route_pending,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectUnit { unit } => world.select_unit(unit, out_events),
        Command::PreviewRoute {
            target,
            tile_length,
        } => world.preview_route(target, tile_length, out_events),
        Command::ConfirmRoute => world.confirm_route(out_events),
        Command::CancelRoute => world.cancel_route(out_events),
        Command::AdvanceStep => world.advance_step(out_events),
        Command::EndTurn => world.end_turn(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use wayfarer_core::{PlannedRoute, RouteLifecycle, RouteStateSnapshot, Unit};

    /// Captures an owned, immutable copy of the route state.
    #[must_use]
    pub fn snapshot(world: &World) -> RouteStateSnapshot {
        RouteStateSnapshot {
            unit: world.unit.clone(),
            selected: world.selected,
            plan: world.plan.clone(),
            turn: world.turn,
        }
    }

    /// Provides read-only access to the active unit.
    #[must_use]
    pub fn unit(world: &World) -> &Unit {
        &world.unit
    }

    /// Current turn number.
    #[must_use]
    pub fn turn(world: &World) -> u32 {
        world.turn
    }

    /// Provides read-only access to the previewed or executing route.
    #[must_use]
    pub fn plan(world: &World) -> Option<&PlannedRoute> {
        world.plan.as_ref()
    }

    /// Lifecycle state of the active unit's route interaction.
    #[must_use]
    pub fn lifecycle(world: &World) -> RouteLifecycle {
        snapshot(world).lifecycle()
    }
}
