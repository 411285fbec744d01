//! Overlay describing the remaining route from the hero's tile onward.

use glam::Vec2;
use wayfarer_core::RouteStateSnapshot;

use crate::{to_vec2, Color};

/// Arrow drawn on one waypoint of the remaining route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteArrow {
    /// World-space center of the waypoint.
    pub position: Vec2,
    /// Unit vector the arrow points along.
    pub direction: Vec2,
    /// Whether the step can be paid with the allowance left this turn.
    pub within_allowance: bool,
}

impl RouteArrow {
    /// Fill color for steps reachable this turn.
    pub const AVAILABLE_COLOR: Color = Color::from_hex(0xff_ff_ff);

    /// Fill color for steps that spill into later turns.
    pub const EXHAUSTED_COLOR: Color = Color::from_hex(0xff_00_00);

    /// Fill color matching the arrow's allowance flag.
    #[must_use]
    pub const fn color(&self) -> Color {
        if self.within_allowance {
            Self::AVAILABLE_COLOR
        } else {
            Self::EXHAUSTED_COLOR
        }
    }

    /// Arrowhead outline as `[tip, left wing, base, right wing]`.
    #[must_use]
    pub fn outline(&self, tile_length: f32) -> [Vec2; 4] {
        let size = tile_length * 0.3;
        let width = size * 0.6;

        let tip = self.position + self.direction * size;
        let base = self.position - self.direction * size * 0.3;
        let perpendicular = self.direction.perp() * width;

        [tip, base + perpendicular, base, base - perpendicular]
    }
}

/// Cost label drawn beside the route's terminal waypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteLabel {
    /// World-space position of the label's left edge.
    pub anchor: Vec2,
    /// Text content, such as `7 MP`.
    pub text: String,
    /// Whether the whole remaining route fits this turn's allowance.
    pub affordable: bool,
}

impl RouteLabel {
    /// Text color for an affordable route.
    pub const AFFORDABLE_COLOR: Color = Color::from_hex(0x00_ff_00);

    /// Text color for a route that needs more turns.
    pub const UNAFFORDABLE_COLOR: Color = Color::from_hex(0xff_00_00);

    /// Text color matching the affordability flag.
    #[must_use]
    pub const fn color(&self) -> Color {
        if self.affordable {
            Self::AFFORDABLE_COLOR
        } else {
            Self::UNAFFORDABLE_COLOR
        }
    }
}

/// Clickable marker confirming the route, drawn on its terminal waypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfirmationMarker {
    /// World-space center of the marker.
    pub position: Vec2,
    /// Radius of the marker disc.
    pub radius: f32,
    /// Half the extent of the cross drawn inside the disc.
    pub cross_half_extent: f32,
}

impl ConfirmationMarker {
    /// Reports whether the world-space point lies on the marker disc.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.radius
    }
}

/// Arrows, cost label and confirmation marker of the remaining route.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePresentation {
    /// One arrow per waypoint after the hero's tile.
    pub arrows: Vec<RouteArrow>,
    /// Cost label beside the terminal waypoint.
    pub label: RouteLabel,
    /// Marker that confirms the route when clicked.
    pub marker: ConfirmationMarker,
}

impl RoutePresentation {
    /// Builds the overlay for the snapshot's stored route.
    ///
    /// Returns `None` without a stored route or when nothing lies beyond the
    /// hero's tile.
    #[must_use]
    pub fn from_snapshot(snapshot: &RouteStateSnapshot, tile_length: f32) -> Option<Self> {
        let (_, ahead) = snapshot.remaining_waypoints().split_first()?;
        let points: Vec<Vec2> = ahead.iter().map(|waypoint| to_vec2(waypoint.position)).collect();
        let last = *points.last()?;

        let arrows = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let heading = match (index.checked_sub(1), points.get(index + 1)) {
                    (_, Some(next)) => *next - *point,
                    (Some(previous), None) => *point - points[previous],
                    (None, None) => Vec2::ZERO,
                };
                RouteArrow {
                    position: *point,
                    direction: heading.try_normalize().unwrap_or(Vec2::X),
                    within_allowance: snapshot.within_allowance(index),
                }
            })
            .collect();

        let cost = u32::try_from(points.len()).unwrap_or(u32::MAX);
        let label = RouteLabel {
            anchor: last + Vec2::new(15.0, -15.0),
            text: format!("{cost} MP"),
            affordable: cost <= snapshot.unit.movement(),
        };

        let marker_size = tile_length * 0.6;
        let marker = ConfirmationMarker {
            position: last,
            radius: marker_size * 0.8,
            cross_half_extent: marker_size * 0.5,
        };

        Some(Self {
            arrows,
            label,
            marker,
        })
    }
}
