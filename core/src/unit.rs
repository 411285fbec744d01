//! Movable actor whose allowance bounds how far it may travel each turn.

use serde::{Deserialize, Serialize};

use crate::{UnitId, Waypoint, WorldPoint};

/// Immutable record describing a unit's position and movement allowance.
///
/// Every operation returns a new value; the world swaps its authoritative copy
/// only after a command succeeds. The allowance never exceeds the maximum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    name: String,
    position: WorldPoint,
    movement: u32,
    max_movement: u32,
}

impl Unit {
    /// Creates a unit at the provided tile-centered position with full allowance.
    #[must_use]
    pub fn new<N>(id: UnitId, name: N, position: WorldPoint, max_movement: u32) -> Self
    where
        N: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            position,
            movement: max_movement,
            max_movement,
        }
    }

    /// Identifier assigned to the unit.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Display name shown by the HUD.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tile-centered world position currently occupied by the unit.
    #[must_use]
    pub const fn position(&self) -> WorldPoint {
        self.position
    }

    /// Movement points left to spend this turn.
    #[must_use]
    pub const fn movement(&self) -> u32 {
        self.movement
    }

    /// Movement points restored at the start of every turn.
    #[must_use]
    pub const fn max_movement(&self) -> u32 {
        self.max_movement
    }

    /// Reports whether the unit has not spent anything this turn.
    #[must_use]
    pub const fn has_full_allowance(&self) -> bool {
        self.movement == self.max_movement
    }

    /// Moves directly to `target` when the Manhattan tile cost fits the allowance.
    ///
    /// The cost is `round(|dx| / tile) + round(|dy| / tile)`. A move the unit
    /// cannot afford returns an unchanged copy rather than an error.
    #[must_use]
    pub fn move_to(&self, target: WorldPoint, tile_length: f32) -> Self {
        let columns = ((target.x - self.position.x).abs() / tile_length).round();
        let rows = ((target.y - self.position.y).abs() / tile_length).round();
        let cost = columns + rows;
        if !cost.is_finite() || cost > self.movement as f32 {
            return self.clone();
        }

        Self {
            position: target,
            movement: self.movement - cost as u32,
            ..self.clone()
        }
    }

    /// Restores the allowance to its maximum.
    #[must_use]
    pub fn reset_allowance(&self) -> Self {
        Self {
            movement: self.max_movement,
            ..self.clone()
        }
    }

    /// Walks `waypoints` in order, paying one allowance point per waypoint.
    ///
    /// The first waypoint must sit on the unit's own position; it is consumed
    /// for free. Walking stops after `max_steps` paid waypoints or when the
    /// allowance runs out, whichever comes first, so the allowance never goes
    /// negative. An empty slice, or one starting anywhere else, yields an
    /// unchanged unit and no waypoints.
    #[must_use]
    pub fn advance_along_route(&self, waypoints: &[Waypoint], max_steps: u32) -> Advance {
        let stay = || Advance {
            unit: self.clone(),
            consumed: Vec::new(),
        };
        let Some((start, rest)) = waypoints.split_first() else {
            return stay();
        };
        if start.position != self.position {
            return stay();
        }

        let budget = usize::try_from(max_steps.min(self.movement)).unwrap_or(usize::MAX);
        let paid = rest.len().min(budget);

        let mut consumed = Vec::with_capacity(paid + 1);
        consumed.push(*start);
        consumed.extend_from_slice(&rest[..paid]);

        let mut unit = self.clone();
        if paid > 0 {
            if let Some(last) = consumed.last() {
                unit.position = last.position;
            }
            // `paid` is bounded by `self.movement`, which is a u32.
            unit.movement -= paid as u32;
        }

        Advance { unit, consumed }
    }
}

/// Outcome of walking part of a route.
#[derive(Clone, Debug, PartialEq)]
pub struct Advance {
    /// Unit after paying for the consumed waypoints.
    pub unit: Unit,
    /// Waypoints walked in order, starting with the identity step.
    pub consumed: Vec<Waypoint>,
}

impl Advance {
    /// Number of allowance points spent, excluding the identity step.
    #[must_use]
    pub fn steps(&self) -> u32 {
        u32::try_from(self.consumed.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }
}
