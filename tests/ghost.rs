use glam::IVec2;
use speculoos::prelude::*;

use chomper::entity::ghost::{choose_step, Ghost, GhostKind, TargetContext};
use chomper::entity::Direction;
use chomper::map::Map;

fn corridor_map() -> Map {
    let board = [
        "#######", //
        "#=#####",
        "#P#####",
        "# #####",
        "#.....#",
        "#######",
    ];
    Map::new(&board, 0).unwrap()
}

#[test]
fn test_ghost_never_reverses_with_another_option() {
    let map = corridor_map();

    // Mid-corridor, heading right, target behind it: left is the reversal and
    // stays excluded, up/down are walls, so it keeps going right.
    let step = choose_step(&map, IVec2::new(3, 4), Direction::Right, IVec2::new(1, 4));
    assert_that(&step).is_equal_to(Some((Direction::Right, IVec2::new(4, 4))));
}

#[test]
fn test_ghost_reverses_as_last_resort() {
    let map = corridor_map();

    // At the corridor's dead end every non-reversal is a wall.
    let step = choose_step(&map, IVec2::new(5, 4), Direction::Right, IVec2::new(1, 4));
    assert_that(&step).is_equal_to(Some((Direction::Left, IVec2::new(4, 4))));
}

#[test]
fn test_boxed_ghost_stays_put() {
    let board = [
        "#####", //
        "#=###",
        "#P ##",
        "### #",
        "#####",
    ];
    let map = Map::new(&board, 0).unwrap();

    let step = choose_step(&map, IVec2::new(3, 3), Direction::Up, IVec2::new(1, 2));
    assert_that(&step).is_none();
}

#[test]
fn test_tie_breaks_follow_fixed_priority() {
    let board = [
        "#######", //
        "#=#####",
        "#P    #",
        "#     #",
        "#     #",
        "#######",
    ];
    let map = Map::new(&board, 0).unwrap();

    // Up and left are both one cell from the target; up has priority.
    let step = choose_step(&map, IVec2::new(3, 3), Direction::Up, IVec2::new(2, 2));
    assert_that(&step).is_equal_to(Some((Direction::Up, IVec2::new(3, 2))));
}

#[test]
fn test_step_distance_is_measured_post_wrap() {
    let board = [
        "#####", //
        "#=###",
        "#P ##",
        ".   .",
        "#####",
    ];
    let map = Map::new(&board, 0).unwrap();

    // Stepping left off the edge wraps to (4, 3), which sits on the target.
    let step = choose_step(&map, IVec2::new(0, 3), Direction::Down, IVec2::new(4, 3));
    assert_that(&step).is_equal_to(Some((Direction::Left, IVec2::new(4, 3))));
}

#[test]
fn test_house_egress_counts_down_then_ascends() {
    let board = [
        "#########", //
        "#==######",
        "#  ######",
        "#  ######",
        "#..P....#",
        "#########",
    ];
    let map = Map::new(&board, 0).unwrap();
    let mut ghost = Ghost::new(GhostKind::Chaser, map.house.center, 2);

    // Two waiting ticks: countdown only, no movement.
    assert!(ghost.house_tick(&map));
    assert!(ghost.house_tick(&map));
    assert_that(&ghost.pos).is_equal_to(map.house.center);
    assert_that(&ghost.release).is_equal_to(0);

    // Ascending: one cell up per tick.
    assert!(ghost.house_tick(&map));
    assert_that(&ghost.pos).is_equal_to(IVec2::new(1, 2));
    assert!(ghost.in_house);

    // Reaches the door row and goes free, heading right.
    assert!(ghost.house_tick(&map));
    assert_that(&ghost.pos).is_equal_to(IVec2::new(1, 1));
    assert!(!ghost.in_house);
    assert_that(&ghost.heading).is_equal_to(Direction::Right);

    // From here the house machine no longer claims the tick.
    assert!(!ghost.house_tick(&map));
}

#[test]
fn test_frightened_target_flees_pacman() {
    let ctx = TargetContext {
        pacman_pos: IVec2::new(25, 28),
        pacman_heading: Direction::Right.as_ivec2(),
        chaser_pos: IVec2::new(1, 1),
        frightened: true,
        board: glam::UVec2::new(28, 31),
    };

    // Pac-Man sits near the bottom-right corner, so everyone runs top-left.
    for kind in GhostKind::ALL {
        assert_that(&kind.target(IVec2::new(10, 10), &ctx)).is_equal_to(IVec2::ZERO);
    }
}
