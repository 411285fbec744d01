//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use crate::to_macroquad_color;
use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Skin, Ui},
};
use wayfarer_rendering::{HudPresentation, MenuAction, MenuPresentation};

/// Top-left corner of the HUD panel in screen coordinates.
pub(crate) const HUD_ORIGIN: Vec2 = Vec2::new(12.0, 12.0);

/// HUD panel dimensions in screen space.
pub(crate) const HUD_SIZE: Vec2 = Vec2::new(220.0, 150.0);

const MENU_ITEM_SIZE: Vec2 = Vec2::new(220.0, 40.0);
const MENU_FIRST_ITEM_Y: f32 = 250.0;
const MENU_ITEM_SPACING: f32 = 50.0;

const ACCENT: wayfarer_rendering::Color = wayfarer_rendering::Color::from_hex(0x4a_9e_ff);
const MUTED: wayfarer_rendering::Color = wayfarer_rendering::Color::from_hex(0x66_66_66);
const MENU_BUTTON: wayfarer_rendering::Color = wayfarer_rendering::Color::from_hex(0x29_29_38);

/// Reports whether a screen-space point lies on the HUD panel.
pub(crate) fn hud_contains(point: Vec2) -> bool {
    point.x >= HUD_ORIGIN.x
        && point.y >= HUD_ORIGIN.y
        && point.x <= HUD_ORIGIN.x + HUD_SIZE.x
        && point.y <= HUD_ORIGIN.y + HUD_SIZE.y
}

fn panel_skin(ui: &mut Ui, button: Color) -> Skin {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let background = Color::new(0.0, 0.0, 0.0, 0.7);
    skin.window_style = ui
        .style_builder()
        .color(background)
        .color_hovered(background)
        .color_clicked(background)
        .color_inactive(background)
        .text_color(WHITE)
        .margin(RectOffset::new(12.0, 12.0, 12.0, 12.0))
        .build();

    skin.label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 2.0, 2.0))
        .build();

    skin.button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(button)
        .color_hovered(button)
        .color_clicked(button)
        .color_inactive(button)
        .margin(RectOffset::new(16.0, 16.0, 8.0, 8.0))
        .build();

    skin
}

/// Draws the adventure HUD and reports whether End Turn was pressed.
///
/// The button stays clickable when ending the turn is not suggested; it is
/// only drawn muted.
pub(crate) fn draw_hud_ui(ui: &mut Ui, hud: &HudPresentation) -> bool {
    let button = to_macroquad_color(if hud.end_turn_enabled { ACCENT } else { MUTED });
    let skin = panel_skin(ui, button);
    ui.push_skin(&skin);

    let mut pressed = false;
    let _ = ui.window(hash!("adventure_hud"), HUD_ORIGIN, HUD_SIZE, |ui| {
        for line in hud.lines() {
            ui.label(None, &line);
        }
        pressed = ui.button(None, HudPresentation::END_TURN_LABEL);
    });

    ui.pop_skin();
    pressed
}

/// Draws the title menu entries and returns the activated action, if any.
pub(crate) fn draw_menu_ui(
    ui: &mut Ui,
    menu: &MenuPresentation,
    screen_width: f32,
) -> Option<MenuAction> {
    let skin = panel_skin(ui, to_macroquad_color(MENU_BUTTON));
    ui.push_skin(&skin);

    let mut selected = None;
    let left = (screen_width - MENU_ITEM_SIZE.x) * 0.5;
    for (index, item) in menu.items.iter().enumerate() {
        let top = MENU_FIRST_ITEM_Y + MENU_ITEM_SPACING * index as f32;
        let position = Vec2::new(left, top);
        match item.action {
            Some(action) => {
                if ui.button(Some(position), item.label.as_str()) {
                    selected = Some(action);
                }
            }
            None => ui.label(Some(position), item.label.as_str()),
        }
    }

    ui.pop_skin();
    selected
}
