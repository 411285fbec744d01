#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wayfarer adventure engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative route state, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! [`RouteStateSnapshot`] values, and respond exclusively with new command
//! batches.

mod route;
mod unit;

use serde::{Deserialize, Serialize};

pub use route::{PlannedRoute, Route, RoutePhase, RouteLifecycle, RouteStateSnapshot, Waypoint};
pub use unit::{Advance, Unit};

/// Title shown by adapters when the experience boots.
pub const GAME_TITLE: &str = "Wayfarer";

/// Turn number assigned to a freshly created world.
pub const FIRST_TURN: u32 = 1;

/// Commands that express all permissible route state mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Selects the provided unit, discarding any previewed or pending route.
    SelectUnit {
        /// Identifier of the unit the player clicked.
        unit: UnitId,
    },
    /// Computes a route from the selected unit toward the provided point.
    PreviewRoute {
        /// Tile-snapped world position the player clicked.
        target: WorldPoint,
        /// Edge length of a single square tile in world units.
        tile_length: f32,
    },
    /// Commits the previewed route so the unit starts consuming it.
    ConfirmRoute,
    /// Drops the previewed or pending route without moving the unit.
    CancelRoute,
    /// Spends the unit's current allowance along the pending route.
    AdvanceStep,
    /// Ends the current turn and restores the unit's allowance.
    EndTurn,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the unit became the current selection.
    UnitSelected {
        /// Identifier of the selected unit.
        unit: UnitId,
    },
    /// Announces that a new route preview replaced any previous plan.
    RoutePreviewed {
        /// Unit the route was planned for.
        unit: UnitId,
        /// Terminal waypoint of the previewed route.
        destination: Waypoint,
        /// Number of steps required to walk the route.
        cost: u32,
        /// Number of full turns required at maximum allowance.
        turns_needed: u32,
        /// Whether the route fits within the unit's maximum allowance.
        reachable: bool,
    },
    /// Reports that a previewed or pending route was discarded on request.
    RouteCancelled {
        /// Unit whose route was dropped.
        unit: UnitId,
    },
    /// Reports that the previewed route was committed for execution.
    RouteConfirmed {
        /// Unit that will walk the route.
        unit: UnitId,
    },
    /// Confirms that the unit walked part of its pending route.
    UnitAdvanced {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Tile the unit occupied before moving.
        from: GridCell,
        /// Tile the unit occupies after moving.
        to: GridCell,
        /// Number of allowance points spent.
        steps: u32,
        /// Steps still separating the unit from its destination.
        remaining_cost: u32,
    },
    /// Reports that the unit reached the destination of its route.
    RouteCompleted {
        /// Unit that finished walking.
        unit: UnitId,
        /// Waypoint the route terminated at.
        destination: Waypoint,
    },
    /// Confirms that the unit's allowance was restored to its maximum.
    AllowanceRestored {
        /// Unit whose allowance was reset.
        unit: UnitId,
        /// Allowance available after the reset.
        movement: u32,
    },
    /// Announces the beginning of a new turn.
    TurnStarted {
        /// Number of the turn that just started.
        turn: u32,
        /// Whether a confirmed route still awaits execution.
        route_pending: bool,
    },
}

/// Unique identifier assigned to a unit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position expressed in continuous world units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate, increasing to the right.
    pub x: f32,
    /// Vertical coordinate, increasing downward.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a new world-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Location of a single grid tile expressed as column and row indices.
///
/// Indices are signed because floor division of world coordinates left of or
/// above the origin yields negative tiles.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridCell {
    column: i32,
    row: i32,
}

impl GridCell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the tile containing the provided world position.
    #[must_use]
    pub fn containing(point: WorldPoint, tile_length: f32) -> Self {
        Self {
            column: (point.x / tile_length).floor() as i32,
            row: (point.y / tile_length).floor() as i32,
        }
    }

    /// World-space center of the tile: `index * tile_length + tile_length / 2`.
    #[must_use]
    pub fn center(self, tile_length: f32) -> WorldPoint {
        let half = tile_length / 2.0;
        WorldPoint::new(
            self.column as f32 * tile_length + half,
            self.row as f32 * tile_length + half,
        )
    }

    /// Waypoint located at the center of this tile.
    #[must_use]
    pub fn waypoint(self, tile_length: f32) -> Waypoint {
        Waypoint::new(self, self.center(tile_length))
    }

    /// Number of king moves separating two cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: GridCell) -> u32 {
        self.column
            .abs_diff(other.column)
            .max(self.row.abs_diff(other.row))
    }
}
