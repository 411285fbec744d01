//! Frame-level orchestration of the world, the pure systems and the scene flow.

use std::time::Duration;

use tracing::{debug, info};
use wayfarer_core::{Command, Event, GridCell, RouteStateSnapshot, Unit, UnitId};
use wayfarer_rendering::{
    to_world_point, FrameInput, MenuAction, MenuPresentation, PlaceholderPresentation,
    RenderingError, Scene, SplashPresentation, Stage, TileGridPresentation,
};
use wayfarer_system_input::{PointerInput, PointerRouter};
use wayfarer_system_scenes::{SceneKind, SceneSignal, SceneSupervisor, SceneTransition};
use wayfarer_system_turn::TurnController;
use wayfarer_world::{self as world, query, World};

use crate::config::WayfarerConfig;

/// Identifier of the single hero on the adventure map.
pub(crate) const HERO: UnitId = UnitId::new(1);

/// Owns the world and drives the systems once per frame.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    turn_controller: TurnController,
    pointer_router: PointerRouter,
    scenes: SceneSupervisor,
    tile_grid: TileGridPresentation,
}

impl Simulation {
    /// Creates a session from a validated configuration.
    pub(crate) fn new(config: &WayfarerConfig, skip_intro: bool) -> Result<Self, RenderingError> {
        let tile_grid = TileGridPresentation::new(config.columns, config.rows, config.tile_length)?;
        let hero = Unit::new(
            HERO,
            config.hero_name.as_str(),
            config.start_cell().center(config.tile_length),
            config.max_movement,
        );
        let scenes = if skip_intro {
            SceneSupervisor::starting_at(SceneKind::Adventure)
        } else {
            SceneSupervisor::new(config.splash_duration())
        };

        Ok(Self {
            world: World::new(hero),
            turn_controller: TurnController::default(),
            pointer_router: PointerRouter::new(config.tile_length),
            scenes,
            tile_grid,
        })
    }

    /// Captures the current route state.
    #[must_use]
    pub(crate) fn snapshot(&self) -> RouteStateSnapshot {
        query::snapshot(&self.world)
    }

    /// Scene currently shown.
    #[must_use]
    pub(crate) fn scene_kind(&self) -> SceneKind {
        self.scenes.current()
    }

    /// Edge length of a map tile.
    #[must_use]
    pub(crate) fn tile_length(&self) -> f32 {
        self.tile_grid.tile_length
    }

    /// Reports whether the tile lies on the adventure map.
    #[must_use]
    pub(crate) fn on_map(&self, cell: GridCell) -> bool {
        self.tile_grid.contains_cell(cell)
    }

    /// Applies commands and every follow-up command the systems emit.
    ///
    /// Returns all events observed, in the order the world produced them.
    pub(crate) fn submit(&mut self, mut commands: Vec<Command>) -> Vec<Event> {
        let mut observed = Vec::new();
        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.turn_controller.handle(&events, &mut commands);
            for event in &events {
                if let Event::TurnStarted {
                    turn,
                    route_pending,
                } = event
                {
                    info!(
                        turn,
                        route_pending,
                        turns_observed = self.turn_controller.turns_observed(),
                        "turn started"
                    );
                }
            }
            observed.extend(events);
        }
        observed
    }

    /// Routes one frame of pointer input into the world.
    pub(crate) fn handle_pointer(&mut self, input: PointerInput) -> Vec<Event> {
        let mut commands = Vec::new();
        self.pointer_router
            .handle(&self.snapshot(), input, &mut commands);
        if commands.is_empty() {
            return Vec::new();
        }
        debug!(?commands, "pointer input routed");
        self.submit(commands)
    }

    fn signal(&mut self, signal: SceneSignal) -> Option<SceneTransition> {
        let transition = self.scenes.signal(signal);
        log_transition(transition);
        transition
    }

    /// Builds a scene reflecting the current stage and route state.
    #[must_use]
    pub(crate) fn build_scene(&self) -> Scene {
        Scene::new(self.stage(), self.tile_grid, &self.snapshot())
    }

    fn stage(&self) -> Stage {
        match self.scenes.current() {
            SceneKind::Splash => Stage::Splash(SplashPresentation {
                progress: self.scenes.splash_progress(),
                ..SplashPresentation::default()
            }),
            SceneKind::MainMenu => Stage::MainMenu(MenuPresentation::default()),
            SceneKind::Adventure => Stage::Adventure,
            SceneKind::Town => Stage::Placeholder(PlaceholderPresentation::new("Town")),
            SceneKind::Battle => Stage::Placeholder(PlaceholderPresentation::new("Battle")),
        }
    }

    /// Advances one frame: scene flow first, then map interaction.
    pub(crate) fn update(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        log_transition(self.scenes.advance(dt));

        let _ = match self.scenes.current() {
            SceneKind::Splash if input.advance_stage => self.signal(SceneSignal::SplashElapsed),
            SceneKind::MainMenu
                if input.advance_stage || input.menu_selection == Some(MenuAction::NewGame) =>
            {
                self.signal(SceneSignal::NewGame)
            }
            SceneKind::Adventure if input.open_town => self.signal(SceneSignal::OpenTown),
            SceneKind::Adventure if input.start_battle => self.signal(SceneSignal::StartBattle),
            SceneKind::Adventure => {
                let _ = self.handle_pointer(PointerInput {
                    press: input.press().map(to_world_point),
                    end_turn: input.end_turn,
                    cancel: input.cancel,
                });
                None
            }
            SceneKind::Town if input.advance_stage => self.signal(SceneSignal::ExitTown),
            SceneKind::Battle if input.advance_stage => self.signal(SceneSignal::BattleResolved),
            _ => None,
        };

        scene.stage = self.stage();
        scene.sync(&self.snapshot());
    }
}

fn log_transition(transition: Option<SceneTransition>) {
    if let Some(SceneTransition { from, to }) = transition {
        info!(?from, ?to, "scene changed");
    }
}
