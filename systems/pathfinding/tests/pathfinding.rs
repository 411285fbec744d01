use wayfarer_core::{GridCell, Unit, UnitId, WorldPoint};
use wayfarer_system_pathfinding::find_route;

const TILE: f32 = 32.0;

fn hero_at(column: i32, row: i32, max_movement: u32) -> Unit {
    Unit::new(
        UnitId::new(1),
        "Hero",
        GridCell::new(column, row).center(TILE),
        max_movement,
    )
}

#[test]
fn straight_click_within_allowance_is_reachable_in_one_turn() {
    let hero = hero_at(0, 0, 5);
    let target = GridCell::new(3, 0).center(TILE);

    let route = find_route(&hero, target, TILE, hero.max_movement());

    assert_eq!(route.waypoints().len(), 4, "three waypoints beyond the start");
    assert_eq!(route.cost(), 3);
    assert!(route.is_reachable());
    assert_eq!(route.turns_needed(), 1);
    assert_eq!(route.start().position, hero.position());
    assert_eq!(route.destination().position, target);
}

#[test]
fn click_beyond_allowance_is_advisory_not_rejected() {
    let hero = hero_at(0, 0, 2);
    let target = GridCell::new(3, 0).center(TILE);

    let route = find_route(&hero, target, TILE, hero.max_movement());

    assert_eq!(route.cost(), 3);
    assert!(!route.is_reachable());
    assert_eq!(route.turns_needed(), 2);
}

#[test]
fn click_inside_a_tile_snaps_to_its_center() {
    let hero = hero_at(1, 1, 10);
    let click = WorldPoint::new(4.0 * TILE + 3.0, 2.0 * TILE + 30.0);

    let route = find_route(&hero, click, TILE, 10);

    assert_eq!(route.destination().cell, GridCell::new(4, 2));
    assert_eq!(route.destination().position, GridCell::new(4, 2).center(TILE));
}

#[test]
fn click_on_own_tile_yields_zero_cost_route() {
    let hero = hero_at(5, 5, 10);

    let route = find_route(&hero, hero.position(), TILE, 10);

    assert_eq!(route.waypoints().len(), 1);
    assert_eq!(route.cost(), 0);
    assert_eq!(route.turns_needed(), 0);
    assert!(route.is_reachable());
}

#[test]
fn routes_span_start_to_target_with_connected_steps() {
    let hero = hero_at(6, 6, 20);
    for column in -3..16 {
        for row in -2..14 {
            let target_cell = GridCell::new(column, row);
            let route = find_route(&hero, target_cell.center(TILE), TILE, 20);
            let steps = GridCell::new(6, 6).chebyshev_distance(target_cell);

            assert_eq!(route.cost(), steps);
            assert_eq!(route.waypoints().len(), steps as usize + 1);
            assert_eq!(route.start().position, hero.position());
            assert_eq!(route.destination().cell, target_cell);

            for pair in route.waypoints().windows(2) {
                assert_eq!(
                    pair[0].cell.chebyshev_distance(pair[1].cell),
                    1,
                    "route toward {target_cell:?} skipped or repeated a tile"
                );
                assert_eq!(pair[1].position, pair[1].cell.center(TILE));
            }
        }
    }
}

#[test]
fn planning_twice_yields_identical_routes() {
    let hero = hero_at(2, 9, 7);
    let target = GridCell::new(13, 4).center(TILE);

    let first = find_route(&hero, target, TILE, 7);
    let second = find_route(&hero, target, TILE, 7);

    assert_eq!(first, second);
}

#[test]
fn negative_cells_are_supported() {
    let hero = hero_at(0, 0, 4);
    let target = WorldPoint::new(-40.0, -10.0);

    let route = find_route(&hero, target, TILE, 4);

    assert_eq!(route.destination().cell, GridCell::new(-2, -1));
    assert_eq!(route.cost(), 2);
}
