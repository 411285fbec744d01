use wayfarer_core::{Command, Event, GridCell, RouteLifecycle, Unit, UnitId};
use wayfarer_system_turn::TurnController;
use wayfarer_world::{self as world, query, World};

const TILE: f32 = 32.0;
const HERO: UnitId = UnitId::new(1);

fn world_with_hero(max_movement: u32) -> World {
    World::new(Unit::new(
        HERO,
        "Hero",
        GridCell::new(0, 0).center(TILE),
        max_movement,
    ))
}

/// Applies `command` and feeds every resulting event back through the
/// controller until it stops emitting commands. Returns all events observed.
fn submit(world: &mut World, controller: &mut TurnController, command: Command) -> Vec<Event> {
    let mut observed = Vec::new();
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    loop {
        if events.is_empty() {
            break;
        }
        observed.extend(events.iter().cloned());
        let mut commands = Vec::new();
        controller.handle(&events, &mut commands);
        if commands.is_empty() {
            break;
        }
        events.clear();
        for command in commands {
            world::apply(world, command, &mut events);
        }
    }
    observed
}

fn steps_in(events: &[Event]) -> u32 {
    events
        .iter()
        .map(|event| match event {
            Event::UnitAdvanced { steps, .. } => *steps,
            _ => 0,
        })
        .sum()
}

fn plan_and_confirm(
    world: &mut World,
    controller: &mut TurnController,
    column: i32,
    row: i32,
) -> Vec<Event> {
    let _ = submit(world, controller, Command::SelectUnit { unit: HERO });
    let _ = submit(
        world,
        controller,
        Command::PreviewRoute {
            target: GridCell::new(column, row).center(TILE),
            tile_length: TILE,
        },
    );
    submit(world, controller, Command::ConfirmRoute)
}

#[test]
fn seven_step_route_spans_two_turns_with_five_allowance() {
    let mut world = world_with_hero(5);
    let mut controller = TurnController::default();
    let target = GridCell::new(7, 0).waypoint(TILE);

    let first_turn = plan_and_confirm(&mut world, &mut controller, 7, 0);

    assert_eq!(steps_in(&first_turn), 5);
    assert_eq!(query::unit(&world).movement(), 0);
    assert_eq!(query::lifecycle(&world), RouteLifecycle::Executing);
    let plan = query::plan(&world).expect("route pending after turn one");
    assert_eq!(plan.route.cost(), 2);
    assert_eq!(plan.target, target);

    let second_turn = submit(&mut world, &mut controller, Command::EndTurn);

    assert_eq!(steps_in(&second_turn), 2);
    assert!(second_turn.contains(&Event::RouteCompleted {
        unit: HERO,
        destination: target,
    }));
    assert_eq!(query::unit(&world).position(), target.position);
    assert_eq!(query::unit(&world).movement(), 3);
    assert!(query::plan(&world).is_none());
    assert_eq!(query::lifecycle(&world), RouteLifecycle::Selected);
    assert_eq!(query::turn(&world), 2);
}

#[test]
fn short_allowance_finishes_on_following_turn() {
    let mut world = world_with_hero(2);
    let mut controller = TurnController::default();

    let first_turn = plan_and_confirm(&mut world, &mut controller, 3, 0);
    assert_eq!(steps_in(&first_turn), 2);

    let second_turn = submit(&mut world, &mut controller, Command::EndTurn);
    assert_eq!(steps_in(&second_turn), 1);
    assert_eq!(
        query::unit(&world).position(),
        GridCell::new(3, 0).center(TILE)
    );
    assert_eq!(query::unit(&world).movement(), 1);
}

#[test]
fn long_route_continues_over_many_turns_without_overshooting() {
    let mut world = world_with_hero(3);
    let mut controller = TurnController::default();
    let target = GridCell::new(10, 4);

    let mut per_turn = vec![steps_in(&plan_and_confirm(
        &mut world,
        &mut controller,
        target.column(),
        target.row(),
    ))];
    while query::plan(&world).is_some() {
        let events = submit(&mut world, &mut controller, Command::EndTurn);
        per_turn.push(steps_in(&events));
        assert!(per_turn.len() < 10, "route never finished");
    }

    assert_eq!(per_turn, vec![3, 3, 3, 1]);
    assert_eq!(
        query::unit(&world).position(),
        target.center(TILE)
    );
    assert_eq!(controller.turns_observed(), 3);
}

#[test]
fn remaining_route_always_starts_on_unit_tile() {
    let mut world = world_with_hero(2);
    let mut controller = TurnController::default();

    let _ = plan_and_confirm(&mut world, &mut controller, 6, 3);
    while let Some(plan) = query::plan(&world) {
        let unit_cell = GridCell::containing(query::unit(&world).position(), TILE);
        assert_eq!(plan.route.start().cell, unit_cell);
        let _ = submit(&mut world, &mut controller, Command::EndTurn);
    }
}

#[test]
fn previewed_route_is_not_executed_at_turn_end() {
    let mut world = world_with_hero(4);
    let mut controller = TurnController::default();
    let _ = submit(&mut world, &mut controller, Command::SelectUnit { unit: HERO });
    let _ = submit(
        &mut world,
        &mut controller,
        Command::PreviewRoute {
            target: GridCell::new(2, 2).center(TILE),
            tile_length: TILE,
        },
    );

    let events = submit(&mut world, &mut controller, Command::EndTurn);

    assert_eq!(steps_in(&events), 0);
    assert_eq!(query::lifecycle(&world), RouteLifecycle::Previewing);
    assert_eq!(
        query::unit(&world).position(),
        GridCell::new(0, 0).center(TILE)
    );
}

#[test]
fn end_turn_is_suggested_only_after_spending() {
    let mut world = world_with_hero(4);
    let mut controller = TurnController::default();
    assert!(!controller.end_turn_suggested(&query::snapshot(&world)));

    let _ = plan_and_confirm(&mut world, &mut controller, 1, 0);
    assert!(controller.end_turn_suggested(&query::snapshot(&world)));

    let _ = submit(&mut world, &mut controller, Command::EndTurn);
    assert!(!controller.end_turn_suggested(&query::snapshot(&world)));
}
