use std::time::Duration;

use wayfarer_system_scenes::{SceneKind, SceneSignal, SceneSupervisor, SceneTransition};

const FRAME: Duration = Duration::from_millis(500);

#[test]
fn splash_hands_over_to_menu_after_three_seconds() {
    let mut supervisor = SceneSupervisor::default();

    let transitions: Vec<_> = (0..6).filter_map(|_| supervisor.advance(FRAME)).collect();

    assert_eq!(
        transitions,
        vec![SceneTransition {
            from: SceneKind::Splash,
            to: SceneKind::MainMenu,
        }]
    );
    assert_eq!(supervisor.current(), SceneKind::MainMenu);
}

#[test]
fn splash_stays_until_delay_elapses() {
    let mut supervisor = SceneSupervisor::default();

    for _ in 0..5 {
        assert!(supervisor.advance(FRAME).is_none());
    }

    assert_eq!(supervisor.current(), SceneKind::Splash);
}

#[test]
fn new_game_enters_adventure_from_menu() {
    let mut supervisor = SceneSupervisor::default();
    let _ = supervisor.signal(SceneSignal::SplashElapsed);

    let transition = supervisor.signal(SceneSignal::NewGame);

    assert_eq!(
        transition,
        Some(SceneTransition {
            from: SceneKind::MainMenu,
            to: SceneKind::Adventure,
        })
    );
}

#[test]
fn town_and_battle_return_to_adventure() {
    let mut supervisor = SceneSupervisor::starting_at(SceneKind::Adventure);

    assert_eq!(
        supervisor.signal(SceneSignal::OpenTown).map(|t| t.to),
        Some(SceneKind::Town)
    );
    assert_eq!(
        supervisor.signal(SceneSignal::ExitTown).map(|t| t.to),
        Some(SceneKind::Adventure)
    );
    assert_eq!(
        supervisor.signal(SceneSignal::StartBattle).map(|t| t.to),
        Some(SceneKind::Battle)
    );
    assert_eq!(
        supervisor.signal(SceneSignal::BattleResolved).map(|t| t.to),
        Some(SceneKind::Adventure)
    );
}

#[test]
fn invalid_signals_are_rejected_without_changing_scene() {
    let mut supervisor = SceneSupervisor::default();

    assert!(supervisor.signal(SceneSignal::NewGame).is_none());
    assert!(supervisor.signal(SceneSignal::OpenTown).is_none());
    assert_eq!(supervisor.current(), SceneKind::Splash);

    let mut supervisor = SceneSupervisor::starting_at(SceneKind::Town);
    assert!(supervisor.signal(SceneSignal::StartBattle).is_none());
    assert!(supervisor.signal(SceneSignal::BattleResolved).is_none());
    assert_eq!(supervisor.current(), SceneKind::Town);
}
