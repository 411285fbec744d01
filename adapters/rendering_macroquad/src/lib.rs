#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Wayfarer.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The HUD and the title menu use Macroquad's immediate-mode UI module. All
//! UI-specific calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_hud_ui, draw_menu_ui, hud_contains};
use anyhow::Result;
use glam::Vec2;
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    color::BLACK,
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
    shapes::{draw_circle, draw_circle_lines, draw_line, draw_rectangle, draw_triangle},
    text::{draw_text, measure_text},
};
use std::time::Duration;
use tracing::{debug, info};
use wayfarer_core::GridCell;
use wayfarer_rendering::{
    Color, FrameInput, HeroPresentation, MenuAction, MenuPresentation, PlaceholderPresentation,
    Presentation, RenderingBackend, RoutePresentation, Scene, SplashPresentation, Stage,
    TileGridPresentation,
};

/// Tracks UI-sourced interactions so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct UiInputState {
    end_turn_latched: bool,
    menu_latched: Option<MenuAction>,
}

impl UiInputState {
    /// Returns whether the HUD requested the end of the turn and clears the
    /// latch so the action fires only once.
    pub fn take_end_turn(&mut self) -> bool {
        let latched = self.end_turn_latched;
        self.end_turn_latched = false;
        latched
    }

    /// Records that the HUD button requested the end of the turn this frame.
    pub fn register_end_turn(&mut self) {
        self.end_turn_latched = true;
    }

    /// Returns the latched menu action, clearing it so the action fires once.
    pub fn take_menu_selection(&mut self) -> Option<MenuAction> {
        self.menu_latched.take()
    }

    /// Records that a menu entry was activated this frame.
    pub fn register_menu_selection(&mut self, action: MenuAction) {
        self.menu_latched = Some(action);
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` quits the game loop.
    quit_requested: bool,
    /// `E` ends the turn.
    end_turn: bool,
    /// `Escape` drops the current route.
    cancel: bool,
    /// `Enter` or `Space` leaves the splash, menu or placeholder stages.
    advance_stage: bool,
    /// `T` opens the town screen.
    open_town: bool,
    /// `B` starts a battle.
    start_battle: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Q),
            end_turn: is_key_pressed(KeyCode::E),
            cancel: is_key_pressed(KeyCode::Escape),
            advance_stage: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space),
            open_town: is_key_pressed(KeyCode::T),
            start_battle: is_key_pressed(KeyCode::B),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.tile_grid.width().round() as i32,
            window_height: scene.tile_grid.height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        info!(
            width = config.window_width,
            height = config.window_height,
            "opening window"
        );

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut ui_input = UiInputState::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    debug!("quit requested from keyboard");
                    break;
                }

                let menu_selection = ui_input.take_menu_selection();
                if menu_selection == Some(MenuAction::Exit) {
                    debug!("quit requested from menu");
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let frame_dt = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));

                let metrics = SceneMetrics::from_grid(&scene.tile_grid, screen_width, screen_height);
                let (cursor_x, cursor_y) = mouse_position();
                let cursor = Vec2::new(cursor_x, cursor_y);
                let frame_input = gather_frame_input(
                    &scene,
                    &metrics,
                    cursor,
                    is_mouse_button_pressed(MouseButton::Left),
                    keyboard,
                    ui_input.take_end_turn(),
                    menu_selection,
                );

                update_scene(frame_dt, frame_input, &mut scene);

                match &scene.stage {
                    Stage::Splash(splash) => draw_splash(splash, screen_width, screen_height),
                    Stage::MainMenu(menu) => {
                        draw_menu_title(menu, screen_width, screen_height);
                        let mut root_ui = macroquad::ui::root_ui();
                        if let Some(action) = draw_menu_ui(&mut root_ui, menu, screen_width) {
                            ui_input.register_menu_selection(action);
                        }
                    }
                    Stage::Adventure => {
                        let hovered = frame_input
                            .cursor_world_space
                            .and_then(|position| scene.tile_grid.snap_world_to_cell(position));
                        draw_tile_grid(&scene.tile_grid, &metrics, hovered);
                        draw_hero(&scene.hero, &metrics);
                        if let Some(route) = &scene.route {
                            let marker_hovered = frame_input
                                .cursor_world_space
                                .is_some_and(|position| route.marker.contains(position));
                            draw_route(route, scene.tile_grid.tile_length, &metrics, marker_hovered);
                        }
                        let mut root_ui = macroquad::ui::root_ui();
                        if draw_hud_ui(&mut root_ui, &scene.hud) {
                            ui_input.register_end_turn();
                        }
                    }
                    Stage::Placeholder(placeholder) => {
                        draw_placeholder(placeholder, screen_width, screen_height)
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    tile_step: f32,
}

impl SceneMetrics {
    fn from_grid(tile_grid: &TileGridPresentation, screen_width: f32, screen_height: f32) -> Self {
        let world_width = tile_grid.width();
        let world_height = tile_grid.height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        Self {
            scale,
            offset_x: ((screen_width - world_width * scale) * 0.5).max(0.0),
            offset_y: ((screen_height - world_height * scale) * 0.5).max(0.0),
            tile_step: tile_grid.tile_length * scale,
        }
    }

    fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + world.x * self.scale,
            self.offset_y + world.y * self.scale,
        )
    }

    fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }
}

fn gather_frame_input(
    scene: &Scene,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    left_click: bool,
    keyboard: KeyboardShortcuts,
    hud_end_turn: bool,
    menu_selection: Option<MenuAction>,
) -> FrameInput {
    let mut input = FrameInput {
        end_turn: keyboard.end_turn || hud_end_turn,
        cancel: keyboard.cancel,
        advance_stage: keyboard.advance_stage,
        open_town: keyboard.open_town,
        start_battle: keyboard.start_battle,
        menu_selection,
        ..FrameInput::default()
    };

    if metrics.scale <= f32::EPSILON || !scene.shows_map() {
        return input;
    }

    let world_position = metrics.to_world(cursor_position);
    if scene.tile_grid.contains(world_position) {
        input.cursor_world_space = Some(world_position);
        input.pointer_pressed = left_click && !hud_contains(to_macroquad_vec2(cursor_position));
    }

    input
}

fn draw_tile_grid(
    tile_grid: &TileGridPresentation,
    metrics: &SceneMetrics,
    hovered: Option<GridCell>,
) {
    for row in 0..tile_grid.rows {
        for column in 0..tile_grid.columns {
            let mut shade = tile_grid.shade_at(column, row);
            if hovered == Some(GridCell::new(column as i32, row as i32)) {
                shade = shade.lighten(0.08);
            }
            let origin = metrics.to_screen(Vec2::new(
                column as f32 * tile_grid.tile_length,
                row as f32 * tile_grid.tile_length,
            ));
            draw_rectangle(
                origin.x,
                origin.y,
                metrics.tile_step,
                metrics.tile_step,
                to_macroquad_color(shade),
            );
        }
    }
}

fn draw_hero(hero: &HeroPresentation, metrics: &SceneMetrics) {
    let center = metrics.to_screen(hero.position);
    if hero.selected {
        draw_circle_lines(
            center.x,
            center.y,
            hero.highlight_radius * metrics.scale,
            3.0,
            to_macroquad_color(HeroPresentation::HIGHLIGHT_COLOR),
        );
    }
    let radius = hero.radius * metrics.scale;
    draw_circle(center.x, center.y, radius, to_macroquad_color(hero.body_color));
    draw_circle_lines(center.x, center.y, radius, 2.0, macroquad::color::WHITE);
}

fn draw_route(route: &RoutePresentation, tile_length: f32, metrics: &SceneMetrics, marker_hovered: bool) {
    for arrow in &route.arrows {
        let [tip, left, base, right] = arrow
            .outline(tile_length)
            .map(|point| to_macroquad_vec2(metrics.to_screen(point)));
        let fill = to_macroquad_color(arrow.color());
        draw_triangle(tip, left, base, fill);
        draw_triangle(tip, base, right, fill);
        let outline = macroquad::color::Color::new(0.0, 0.0, 0.0, 0.8);
        for (from, to) in [(tip, left), (left, base), (base, right), (right, tip)] {
            draw_line(from.x, from.y, to.x, to.y, 1.0, outline);
        }
    }

    let marker = route.marker;
    let center = metrics.to_screen(marker.position);
    let radius = marker.radius * metrics.scale;
    let disc = if marker_hovered {
        Color::from_hex(0xff_ff_00)
    } else {
        Color::from_hex(0xff_ff_ff)
    };
    draw_circle(center.x, center.y, radius, to_macroquad_color(disc.with_alpha(0.9)));
    draw_circle_lines(center.x, center.y, radius, 3.0, BLACK);
    let half = marker.cross_half_extent * metrics.scale;
    let cross = macroquad::color::RED;
    draw_line(center.x - half, center.y - half, center.x + half, center.y + half, 6.0, cross);
    draw_line(center.x + half, center.y - half, center.x - half, center.y + half, 6.0, cross);

    let anchor = metrics.to_screen(route.label.anchor);
    let _ = draw_text(
        &route.label.text,
        anchor.x,
        anchor.y,
        20.0 * metrics.scale.max(0.5),
        to_macroquad_color(route.label.color()),
    );
}

fn draw_centered_text(text: &str, center_x: f32, baseline: f32, font_size: u16, color: Color) {
    let dimensions = measure_text(text, None, font_size, 1.0);
    let _ = draw_text(
        text,
        center_x - dimensions.width * 0.5,
        baseline,
        f32::from(font_size),
        to_macroquad_color(color),
    );
}

fn draw_splash(splash: &SplashPresentation, screen_width: f32, screen_height: f32) {
    draw_rectangle(
        0.0,
        0.0,
        screen_width,
        screen_height,
        to_macroquad_color(Color::from_hex(0x1a_1a_2e)),
    );
    let center_x = screen_width * 0.5;
    let center_y = screen_height * 0.5;
    draw_centered_text(&splash.headline, center_x, center_y - 30.0, 48, Color::from_hex(0xff_ff_ff));
    draw_centered_text(&splash.tagline, center_x, center_y + 20.0, 24, Color::from_hex(0xaa_aa_aa));

    let bar_left = center_x - 150.0;
    let bar_top = center_y + 100.0;
    draw_rectangle(bar_left, bar_top, 300.0, 8.0, to_macroquad_color(Color::from_hex(0x33_33_33)));
    draw_rectangle(
        bar_left,
        bar_top,
        300.0 * splash.progress.clamp(0.0, 1.0),
        8.0,
        to_macroquad_color(Color::from_hex(0x4a_9e_ff)),
    );
}

fn draw_menu_title(menu: &MenuPresentation, screen_width: f32, screen_height: f32) {
    draw_centered_text(&menu.title, screen_width * 0.5, 150.0, 48, Color::from_hex(0xff_ff_ff));
    let _ = draw_text(
        &menu.version,
        12.0,
        screen_height - 12.0,
        16.0,
        to_macroquad_color(Color::from_hex(0x66_66_66)),
    );
}

fn draw_placeholder(placeholder: &PlaceholderPresentation, screen_width: f32, screen_height: f32) {
    let center_x = screen_width * 0.5;
    let center_y = screen_height * 0.5;
    draw_centered_text(&placeholder.title, center_x, center_y, 40, Color::from_hex(0xff_ff_ff));
    draw_centered_text(&placeholder.hint, center_x, center_y + 40.0, 20, Color::from_hex(0xaa_aa_aa));
}

fn to_macroquad_vec2(position: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(position.x, position.y)
}

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::{RouteStateSnapshot, Unit, UnitId};

    fn scene(stage: Stage) -> Scene {
        let grid = TileGridPresentation::new(10, 5, 32.0).expect("valid grid");
        let snapshot = RouteStateSnapshot {
            unit: Unit::new(UnitId::new(1), "Hero", GridCell::new(2, 2).center(32.0), 5),
            selected: None,
            plan: None,
            turn: 1,
        };
        Scene::new(stage, grid, &snapshot)
    }

    #[test]
    fn scene_metrics_fit_grid_inside_screen() {
        let scene = scene(Stage::Adventure);
        let metrics = SceneMetrics::from_grid(&scene.tile_grid, 640.0, 480.0);

        assert!((metrics.scale - 2.0).abs() <= f32::EPSILON);
        assert_eq!(metrics.offset_x, 0.0);
        assert_eq!(metrics.offset_y, 80.0);
        assert_eq!(metrics.to_world(metrics.to_screen(Vec2::new(40.0, 20.0))), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn click_inside_grid_is_reported_in_world_space() {
        let scene = scene(Stage::Adventure);
        let metrics = SceneMetrics::from_grid(&scene.tile_grid, 320.0, 160.0);

        let input = gather_frame_input(
            &scene,
            &metrics,
            Vec2::new(300.0, 150.0),
            true,
            KeyboardShortcuts::default(),
            false,
            None,
        );

        assert_eq!(input.press(), Some(Vec2::new(300.0, 150.0)));
    }

    #[test]
    fn click_on_hud_panel_does_not_reach_the_map() {
        let scene = scene(Stage::Adventure);
        let metrics = SceneMetrics::from_grid(&scene.tile_grid, 320.0, 160.0);

        let input = gather_frame_input(
            &scene,
            &metrics,
            Vec2::new(40.0, 40.0),
            true,
            KeyboardShortcuts::default(),
            true,
            None,
        );

        assert!(input.press().is_none());
        assert!(input.cursor_world_space.is_some());
        assert!(input.end_turn, "HUD button still ends the turn");
    }

    #[test]
    fn pointer_is_ignored_outside_the_map_stage() {
        let scene = scene(Stage::Splash(SplashPresentation::default()));
        let metrics = SceneMetrics::from_grid(&scene.tile_grid, 320.0, 160.0);
        let keyboard = KeyboardShortcuts {
            advance_stage: true,
            ..KeyboardShortcuts::default()
        };

        let input = gather_frame_input(
            &scene,
            &metrics,
            Vec2::new(300.0, 150.0),
            true,
            keyboard,
            false,
            Some(MenuAction::NewGame),
        );

        assert!(input.cursor_world_space.is_none());
        assert!(input.advance_stage);
        assert_eq!(input.menu_selection, Some(MenuAction::NewGame));
    }

    #[test]
    fn keyboard_shortcuts_map_onto_frame_input() {
        let scene = scene(Stage::Adventure);
        let metrics = SceneMetrics::from_grid(&scene.tile_grid, 320.0, 160.0);
        let keyboard = KeyboardShortcuts {
            end_turn: true,
            cancel: true,
            open_town: true,
            ..KeyboardShortcuts::default()
        };

        let input = gather_frame_input(
            &scene,
            &metrics,
            Vec2::new(-5.0, -5.0),
            false,
            keyboard,
            false,
            None,
        );

        assert!(input.end_turn);
        assert!(input.cancel);
        assert!(input.open_town);
        assert!(!input.start_battle);
        assert!(input.cursor_world_space.is_none());
    }
}
