//! This module contains the board layout and the simulation tunables.

use std::time::Duration;

use glam::UVec2;

/// The size of the game board, in cells.
pub const BOARD_SIZE: UVec2 = UVec2::new(28, 31);

/// Number of ghosts; the coordinator spawns one worker thread per ghost.
pub const GHOST_COUNT: usize = 4;

/// Points awarded for a regular token.
pub const TOKEN_SCORE: u32 = 10;
/// Points awarded for a power pellet.
pub const POWER_SCORE: u32 = 50;
/// Points awarded for catching a ghost while frightened.
pub const GHOST_SCORE: u32 = 200;

/// The default pause between simulation ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Countdown values and other knobs that varied between drafts of the game.
///
/// These are deliberately configuration, not constants: the tests only pin the
/// behavior that must hold for any value (e.g. power mode clears after exactly
/// `power_ticks` cycles).
#[derive(Debug, Clone, Copy)]
pub struct Tunables {
    /// How many ticks frightened mode lasts after a power pellet.
    pub power_ticks: u32,
    /// House countdown applied to a ghost caught while frightened.
    pub respawn_ticks: u32,
    /// Ticks each ghost waits in the house before it may leave, in
    /// Chaser/Ambusher/Flanker/Timid order.
    pub release_ticks: [u32; GHOST_COUNT],
    /// Starting lives.
    pub lives: u32,
    /// Consumables with squared distance to the house center at or below this
    /// are pre-cleared, so no tokens spawn inside or just above the house.
    pub house_clear_radius_sq: i32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            power_ticks: 40,
            respawn_ticks: 12,
            release_ticks: [0, 20, 40, 60],
            lives: 3,
            house_clear_radius_sq: 25,
        }
    }
}

/// The raw layout of the game board, as a 2D array of characters.
///
/// `#` wall, `.` token, `o` power pellet, `=` house door, `P` Pac-Man's
/// starting position, space is plain floor. Rows open at the left/right edge
/// wrap toroidally.
pub const RAW_BOARD: [&str; BOARD_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "      .   #      #   .      ",
    "######.## ######## ##.######",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "######.##.########.##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......P .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_dimensions() {
        assert_eq!(RAW_BOARD.len(), BOARD_SIZE.y as usize);

        for row in RAW_BOARD.iter() {
            assert_eq!(row.len(), BOARD_SIZE.x as usize);
        }
    }

    #[test]
    fn test_board_has_single_spawn() {
        let spawns: usize = RAW_BOARD.iter().map(|row| row.matches('P').count()).sum();
        assert_eq!(spawns, 1);
    }

    #[test]
    fn test_board_door_run_is_contiguous() {
        let door_rows: Vec<&&str> = RAW_BOARD.iter().filter(|row| row.contains('=')).collect();
        assert_eq!(door_rows.len(), 1);

        let row = door_rows[0];
        let first = row.find('=').unwrap();
        let last = row.rfind('=').unwrap();
        assert!(row[first..=last].chars().all(|c| c == '='));
    }

    #[test]
    fn test_board_power_pellets() {
        let pellets: usize = RAW_BOARD.iter().map(|row| row.matches('o').count()).sum();
        assert_eq!(pellets, 4);
    }

    #[test]
    fn test_board_boundaries_are_walls() {
        assert!(RAW_BOARD[0].chars().all(|c| c == '#'));
        assert!(RAW_BOARD[RAW_BOARD.len() - 1].chars().all(|c| c == '#'));
    }

    #[test]
    fn test_default_tunables() {
        let tunables = Tunables::default();
        assert!(tunables.power_ticks > 0);
        assert!(tunables.lives > 0);
        // The chaser is always the first ghost released.
        assert_eq!(tunables.release_ticks[0], 0);
    }
}
