//! Scripted headless sessions used for automation and smoke checks.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use wayfarer_core::{Event, GridCell, RouteLifecycle};
use wayfarer_system_input::PointerInput;

use crate::simulation::Simulation;

/// Single player action replayed by the headless runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScriptAction {
    /// Press the pointer on the center of a tile.
    Click(GridCell),
    /// Press the pointer on the hero.
    Select,
    /// Press the pointer on the confirmation marker of the stored route.
    Confirm,
    /// Abort the stored route.
    Cancel,
    /// End the current turn.
    EndTurn,
}

impl FromStr for ScriptAction {
    type Err = ScriptError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(coordinates) = trimmed.strip_prefix("click:") {
            let invalid = || ScriptError::InvalidClick(trimmed.to_owned());
            let (column, row) = coordinates.split_once(',').ok_or_else(invalid)?;
            let column = column.trim().parse().map_err(|_| invalid())?;
            let row = row.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::Click(GridCell::new(column, row)));
        }

        match trimmed {
            "select" => Ok(Self::Select),
            "confirm" => Ok(Self::Confirm),
            "cancel" => Ok(Self::Cancel),
            "end-turn" => Ok(Self::EndTurn),
            other => Err(ScriptError::UnknownAction(other.to_owned())),
        }
    }
}

impl fmt::Display for ScriptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click(cell) => write!(f, "click:{},{}", cell.column(), cell.row()),
            Self::Select => f.write_str("select"),
            Self::Confirm => f.write_str("confirm"),
            Self::Cancel => f.write_str("cancel"),
            Self::EndTurn => f.write_str("end-turn"),
        }
    }
}

/// Errors raised while parsing script actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// The action name is not recognised.
    #[error("unknown action `{0}` (expected click:COLUMN,ROW, select, confirm, cancel or end-turn)")]
    UnknownAction(String),
    /// A click lacks valid tile coordinates.
    #[error("invalid click `{0}` (expected click:COLUMN,ROW)")]
    InvalidClick(String),
}

/// Route state observed after one scripted action.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct StepReport {
    /// Action that produced this state.
    pub(crate) action: String,
    /// Current turn number.
    pub(crate) turn: u32,
    /// Route lifecycle after the action.
    pub(crate) lifecycle: RouteLifecycle,
    /// Tile occupied by the hero.
    pub(crate) cell: GridCell,
    /// Movement points left this turn.
    pub(crate) movement: u32,
    /// Movement points restored every turn.
    pub(crate) max_movement: u32,
    /// Remaining cost of the stored route, if any.
    pub(crate) route_cost: Option<u32>,
    /// Target tile of the stored route, if any.
    pub(crate) route_target: Option<GridCell>,
    /// Events the world emitted while applying the action.
    pub(crate) events: Vec<String>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} turn {} | {:?} | at {},{} | movement {}/{}",
            self.action,
            self.turn,
            self.lifecycle,
            self.cell.column(),
            self.cell.row(),
            self.movement,
            self.max_movement,
        )?;
        if let (Some(cost), Some(target)) = (self.route_cost, self.route_target) {
            write!(f, " | route to {},{} costs {cost}", target.column(), target.row())?;
        }
        if !self.events.is_empty() {
            write!(f, " | {}", self.events.join("; "))?;
        }
        Ok(())
    }
}

/// Replays the actions against the simulation and reports every step.
pub(crate) fn run_script(simulation: &mut Simulation, actions: &[ScriptAction]) -> Vec<StepReport> {
    actions
        .iter()
        .map(|action| {
            let events = simulation.handle_pointer(pointer_input(simulation, *action));
            report(simulation, *action, &events)
        })
        .collect()
}

fn pointer_input(simulation: &Simulation, action: ScriptAction) -> PointerInput {
    let tile_length = simulation.tile_length();
    match action {
        ScriptAction::Click(cell) if simulation.on_map(cell) => {
            PointerInput::press(cell.center(tile_length))
        }
        ScriptAction::Click(cell) => {
            debug!(
                column = cell.column(),
                row = cell.row(),
                "ignoring click outside the map"
            );
            PointerInput::default()
        }
        ScriptAction::Select => PointerInput::press(simulation.snapshot().unit.position()),
        ScriptAction::Confirm => simulation
            .snapshot()
            .plan
            .map(|plan| PointerInput::press(plan.target.position))
            .unwrap_or_default(),
        ScriptAction::Cancel => PointerInput {
            cancel: true,
            ..PointerInput::default()
        },
        ScriptAction::EndTurn => PointerInput {
            end_turn: true,
            ..PointerInput::default()
        },
    }
}

fn report(simulation: &Simulation, action: ScriptAction, events: &[Event]) -> StepReport {
    let tile_length = simulation.tile_length();
    let snapshot = simulation.snapshot();
    StepReport {
        action: action.to_string(),
        turn: snapshot.turn,
        lifecycle: snapshot.lifecycle(),
        cell: snapshot.unit_cell(tile_length),
        movement: snapshot.unit.movement(),
        max_movement: snapshot.unit.max_movement(),
        route_cost: snapshot.plan.as_ref().map(|plan| plan.route.cost()),
        route_target: snapshot.plan.as_ref().map(|plan| plan.target.cell),
        events: events.iter().map(describe_event).collect(),
    }
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::UnitSelected { .. } => "unit selected".to_owned(),
        Event::RoutePreviewed {
            cost,
            turns_needed,
            reachable,
            ..
        } => {
            if *reachable {
                format!("route previewed ({cost} MP, {turns_needed} turn(s))")
            } else {
                "route previewed (unreachable)".to_owned()
            }
        }
        Event::RouteCancelled { .. } => "route cancelled".to_owned(),
        Event::RouteConfirmed { .. } => "route confirmed".to_owned(),
        Event::UnitAdvanced { to, steps, .. } => {
            format!("advanced {steps} step(s) to {},{}", to.column(), to.row())
        }
        Event::RouteCompleted { .. } => "route completed".to_owned(),
        Event::AllowanceRestored { movement, .. } => format!("allowance restored to {movement}"),
        Event::TurnStarted { turn, .. } => format!("turn {turn} started"),
    }
}
