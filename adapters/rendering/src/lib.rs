#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Wayfarer adapters.

pub mod route;
pub mod stages;

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;
use wayfarer_core::{GridCell, RouteStateSnapshot, Unit, WorldPoint};

pub use self::route::{ConfirmationMarker, RouteArrow, RouteLabel, RoutePresentation};
pub use self::stages::{
    HudPresentation, MenuAction, MenuItem, MenuPresentation, PlaceholderPresentation,
    SplashPresentation, Stage,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Converts a world point into the vector type used by presentations.
#[must_use]
pub fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}

/// Converts a presentation vector back into a world point.
#[must_use]
pub fn to_world_point(position: Vec2) -> WorldPoint {
    WorldPoint::new(position.x, position.y)
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position expressed in world units, if it lies over the map.
    pub cursor_world_space: Option<Vec2>,
    /// Whether the primary pointer button was pressed over the map this frame.
    pub pointer_pressed: bool,
    /// Whether the player activated the End Turn control.
    pub end_turn: bool,
    /// Whether the player asked to drop the current route.
    pub cancel: bool,
    /// Whether the player asked to leave the current non-map stage.
    pub advance_stage: bool,
    /// Whether the player asked to open the town screen.
    pub open_town: bool,
    /// Whether the player asked to start a battle.
    pub start_battle: bool,
    /// Menu entry activated on this frame, if any.
    pub menu_selection: Option<MenuAction>,
}

impl FrameInput {
    /// World position of a pointer press on this frame, if any.
    #[must_use]
    pub fn press(&self) -> Option<Vec2> {
        if self.pointer_pressed {
            self.cursor_world_space
        } else {
            None
        }
    }
}

/// Describes the checkerboard tile grid of the adventure map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
    /// Shade of tiles whose column and row sum to an even number.
    pub even_shade: Color,
    /// Shade of the remaining tiles.
    pub odd_shade: Color,
}

impl TileGridPresentation {
    /// Shade used for even tiles by default.
    pub const DEFAULT_EVEN_SHADE: Color = Color::from_hex(0x2b_2b_2b);

    /// Shade used for odd tiles by default.
    pub const DEFAULT_ODD_SHADE: Color = Color::from_hex(0x33_33_33);

    /// Creates a new tile grid descriptor with the default checkerboard shades.
    ///
    /// Returns an error when the tile length is not a positive finite number or
    /// the grid has no tiles.
    pub fn new(columns: u32, rows: u32, tile_length: f32) -> Result<Self, RenderingError> {
        if !(tile_length.is_finite() && tile_length > 0.0) {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyGrid { columns, rows });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            even_shade: Self::DEFAULT_EVEN_SHADE,
            odd_shade: Self::DEFAULT_ODD_SHADE,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Shade of the tile at the provided indices.
    #[must_use]
    pub const fn shade_at(&self, column: u32, row: u32) -> Color {
        if (column + row) % 2 == 0 {
            self.even_shade
        } else {
            self.odd_shade
        }
    }

    /// Reports whether the world-space position lies on the grid.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x < self.width()
            && position.y < self.height()
    }

    /// Reports whether the tile lies on the grid.
    #[must_use]
    pub fn contains_cell(&self, cell: GridCell) -> bool {
        let inside = |index: i32, extent: u32| u32::try_from(index).is_ok_and(|index| index < extent);
        inside(cell.column(), self.columns) && inside(cell.row(), self.rows)
    }

    /// Clamps a world-space position to the grid bounds.
    #[must_use]
    pub fn clamp_world_position(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(0.0, self.width()),
            position.y.clamp(0.0, self.height()),
        )
    }

    /// Tile containing the world-space position, or `None` outside the grid.
    #[must_use]
    pub fn snap_world_to_cell(&self, position: Vec2) -> Option<GridCell> {
        if !self.contains(position) {
            return None;
        }
        Some(GridCell::containing(to_world_point(position), self.tile_length))
    }

    /// World-space center of the provided tile.
    #[must_use]
    pub fn cell_center(&self, cell: GridCell) -> Vec2 {
        to_vec2(cell.center(self.tile_length))
    }
}

/// Hero marker drawn on the adventure map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroPresentation {
    /// World-space center of the hero.
    pub position: Vec2,
    /// Radius of the hero's body.
    pub radius: f32,
    /// Radius of the selection ring.
    pub highlight_radius: f32,
    /// Fill color of the hero's body.
    pub body_color: Color,
    /// Whether the selection ring is visible.
    pub selected: bool,
}

impl HeroPresentation {
    /// Body color of the hero.
    pub const BODY_COLOR: Color = Color::from_hex(0x4a_9e_ff);

    /// Color of the selection ring.
    pub const HIGHLIGHT_COLOR: Color = Color::from_hex(0xff_ff_00);

    /// Describes the provided unit drawn on tiles of the given length.
    #[must_use]
    pub fn from_unit(unit: &Unit, selected: bool, tile_length: f32) -> Self {
        Self {
            position: to_vec2(unit.position()),
            radius: tile_length * 0.3,
            highlight_radius: tile_length * 0.4,
            body_color: Self::BODY_COLOR,
            selected,
        }
    }
}

/// Scene description combining the active stage and the adventure map.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Stage currently displayed.
    pub stage: Stage,
    /// Tile grid that composes the adventure map.
    pub tile_grid: TileGridPresentation,
    /// Hero marker on the adventure map.
    pub hero: HeroPresentation,
    /// Remaining route overlay, if a route is stored.
    pub route: Option<RoutePresentation>,
    /// Heads-up display describing the hero and the turn.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a scene showing `stage` with the map populated from `snapshot`.
    #[must_use]
    pub fn new(stage: Stage, tile_grid: TileGridPresentation, snapshot: &RouteStateSnapshot) -> Self {
        let tile_length = tile_grid.tile_length;
        Self {
            stage,
            tile_grid,
            hero: HeroPresentation::from_unit(&snapshot.unit, snapshot.is_selected(), tile_length),
            route: RoutePresentation::from_snapshot(snapshot, tile_length),
            hud: HudPresentation::from_snapshot(snapshot, tile_length),
        }
    }

    /// Refreshes the map layers from a newer route state snapshot.
    pub fn sync(&mut self, snapshot: &RouteStateSnapshot) {
        let tile_length = self.tile_grid.tile_length;
        self.hero = HeroPresentation::from_unit(&snapshot.unit, snapshot.is_selected(), tile_length);
        self.route = RoutePresentation::from_snapshot(snapshot, tile_length);
        self.hud = HudPresentation::from_snapshot(snapshot, tile_length);
    }

    /// Reports whether the adventure map is the active stage.
    #[must_use]
    pub fn shows_map(&self) -> bool {
        matches!(self.stage, Stage::Adventure)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Wayfarer scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and mutates the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Tiles must have a positive, finite edge length.
    #[error("tile_length must be positive and finite (received {tile_length})")]
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
    /// The grid must contain at least one tile.
    #[error("grid must contain at least one tile (received {columns}x{rows})")]
    EmptyGrid {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
}
