//! Non-map stages and the adventure HUD.

use wayfarer_core::{GridCell, RouteStateSnapshot, GAME_TITLE};

/// Stage currently occupying the window.
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    /// Boot splash with a loading bar.
    Splash(SplashPresentation),
    /// Title menu.
    MainMenu(MenuPresentation),
    /// Adventure map with the hero, the route overlay and the HUD.
    Adventure,
    /// Screen that is not built yet, such as the town or a battle.
    Placeholder(PlaceholderPresentation),
}

/// Boot splash content.
#[derive(Clone, Debug, PartialEq)]
pub struct SplashPresentation {
    /// Large title line.
    pub headline: String,
    /// Smaller line below the title.
    pub tagline: String,
    /// Loading bar fill in the range 0.0..=1.0.
    pub progress: f32,
}

impl Default for SplashPresentation {
    fn default() -> Self {
        Self {
            headline: GAME_TITLE.to_owned(),
            tagline: "A turn-based adventure".to_owned(),
            progress: 0.0,
        }
    }
}

/// Actions a menu entry can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    /// Start a new game on the adventure map.
    NewGame,
    /// Close the client.
    Exit,
}

/// Single entry of the title menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    /// Text shown for the entry.
    pub label: String,
    /// Action triggered by the entry; `None` renders it disabled.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn new(label: &str, action: Option<MenuAction>) -> Self {
        Self {
            label: label.to_owned(),
            action,
        }
    }
}

/// Title menu content.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuPresentation {
    /// Title drawn above the entries.
    pub title: String,
    /// Entries in display order.
    pub items: Vec<MenuItem>,
    /// Build string drawn in the corner.
    pub version: String,
}

impl Default for MenuPresentation {
    fn default() -> Self {
        Self {
            title: GAME_TITLE.to_owned(),
            items: vec![
                MenuItem::new("New Game", Some(MenuAction::NewGame)),
                MenuItem::new("Load Game", None),
                MenuItem::new("Options", None),
                MenuItem::new("Exit", Some(MenuAction::Exit)),
            ],
            version: concat!("v", env!("CARGO_PKG_VERSION"), " - Development Build").to_owned(),
        }
    }
}

/// Stand-in screen for the town and battle scenes.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderPresentation {
    /// Name of the screen.
    pub title: String,
    /// Instruction telling the player how to leave.
    pub hint: String,
}

impl PlaceholderPresentation {
    /// Creates a placeholder with the provided title and the default hint.
    #[must_use]
    pub fn new<T>(title: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            hint: "Press Enter to return to the map".to_owned(),
        }
    }
}

/// Heads-up display describing the hero and the turn.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Current turn number.
    pub turn: u32,
    /// Display name of the hero.
    pub unit_name: String,
    /// Whether the hero is selected.
    pub selected: bool,
    /// Movement points left this turn.
    pub movement: u32,
    /// Movement points restored every turn.
    pub max_movement: u32,
    /// Tile occupied by the hero.
    pub cell: GridCell,
    /// Advisory flag for the End Turn button.
    pub end_turn_enabled: bool,
}

impl HudPresentation {
    /// Label of the end-turn control.
    pub const END_TURN_LABEL: &'static str = "End Turn";

    /// Describes the snapshot for tiles of the given length.
    #[must_use]
    pub fn from_snapshot(snapshot: &RouteStateSnapshot, tile_length: f32) -> Self {
        Self {
            turn: snapshot.turn,
            unit_name: snapshot.unit.name().to_owned(),
            selected: snapshot.is_selected(),
            movement: snapshot.unit.movement(),
            max_movement: snapshot.unit.max_movement(),
            cell: snapshot.unit_cell(tile_length),
            end_turn_enabled: snapshot.end_turn_suggested(),
        }
    }

    /// Text lines shown above the End Turn button.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let name = if self.selected {
            format!("{} \u{25cf} Selected", self.unit_name)
        } else {
            self.unit_name.clone()
        };

        vec![
            format!("Turn {}", self.turn),
            name,
            format!("Movement: {}/{}", self.movement, self.max_movement),
            format!("Position: {},{}", self.cell.column(), self.cell.row()),
        ]
    }
}
