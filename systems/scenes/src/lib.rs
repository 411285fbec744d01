#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Finite-state supervisor for the high-level scene flow.
//!
//! The supervisor only knows scene names and the signals that move between
//! them. It never inspects route state; adapters decide which signal a frame
//! raises and react to the returned [`SceneTransition`].

use std::time::Duration;

/// Delay before the splash hands over to the main menu.
pub const DEFAULT_SPLASH_DURATION: Duration = Duration::from_secs(3);

/// Scenes the client can display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneKind {
    /// Studio splash shown once at boot.
    Splash,
    /// Title menu offering a new game.
    MainMenu,
    /// Adventure map where the hero moves.
    Adventure,
    /// Town screen entered from the adventure map.
    Town,
    /// Battle screen entered from the adventure map.
    Battle,
}

/// Signals raised by adapters to request a scene change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneSignal {
    /// The splash delay elapsed or the player skipped it.
    SplashElapsed,
    /// The player picked "New Game" from the menu.
    NewGame,
    /// The hero entered a town.
    OpenTown,
    /// The player left the town screen.
    ExitTown,
    /// A battle was triggered on the adventure map.
    StartBattle,
    /// The active battle ended.
    BattleResolved,
}

/// Scene change applied by the supervisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneTransition {
    /// Scene that was active before the signal.
    pub from: SceneKind,
    /// Scene that is active after the signal.
    pub to: SceneKind,
}

/// Tracks the active scene and the splash timer.
#[derive(Clone, Debug)]
pub struct SceneSupervisor {
    current: SceneKind,
    splash_duration: Duration,
    splash_elapsed: Duration,
}

impl Default for SceneSupervisor {
    fn default() -> Self {
        Self::new(DEFAULT_SPLASH_DURATION)
    }
}

impl SceneSupervisor {
    /// Creates a supervisor that starts on the splash scene.
    #[must_use]
    pub fn new(splash_duration: Duration) -> Self {
        Self {
            current: SceneKind::Splash,
            splash_duration,
            splash_elapsed: Duration::ZERO,
        }
    }

    /// Creates a supervisor that starts directly on the provided scene.
    #[must_use]
    pub fn starting_at(scene: SceneKind) -> Self {
        Self {
            current: scene,
            ..Self::default()
        }
    }

    /// Scene currently displayed.
    #[must_use]
    pub const fn current(&self) -> SceneKind {
        self.current
    }

    /// Fraction of the splash delay that has elapsed, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn splash_progress(&self) -> f32 {
        if self.splash_duration.is_zero() {
            return 1.0;
        }
        (self.splash_elapsed.as_secs_f32() / self.splash_duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Advances the splash timer, leaving the splash once the delay elapsed.
    pub fn advance(&mut self, dt: Duration) -> Option<SceneTransition> {
        if self.current != SceneKind::Splash {
            return None;
        }

        self.splash_elapsed = self.splash_elapsed.saturating_add(dt);
        if self.splash_elapsed >= self.splash_duration {
            self.signal(SceneSignal::SplashElapsed)
        } else {
            None
        }
    }

    /// Applies a signal, returning the transition or `None` when the signal
    /// has no meaning in the current scene.
    pub fn signal(&mut self, signal: SceneSignal) -> Option<SceneTransition> {
        let to = match (self.current, signal) {
            (SceneKind::Splash, SceneSignal::SplashElapsed) => SceneKind::MainMenu,
            (SceneKind::MainMenu, SceneSignal::NewGame) => SceneKind::Adventure,
            (SceneKind::Adventure, SceneSignal::OpenTown) => SceneKind::Town,
            (SceneKind::Adventure, SceneSignal::StartBattle) => SceneKind::Battle,
            (SceneKind::Town, SceneSignal::ExitTown) => SceneKind::Adventure,
            (SceneKind::Battle, SceneSignal::BattleResolved) => SceneKind::Adventure,
            _ => return None,
        };

        let transition = SceneTransition {
            from: self.current,
            to,
        };
        self.current = to;
        Some(transition)
    }
}
