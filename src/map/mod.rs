//! The maze model: geometry and consumable bookkeeping.
//!
//! The board is split into an immutable *base* layout and a mutable *live*
//! overlay. Walls and the house door are always answered from the base; the
//! live overlay only ever loses consumables.

pub mod parser;

use glam::{IVec2, UVec2};
use tracing::debug;

use crate::error::GameResult;
use crate::map::parser::BoardParser;

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Solid for everyone.
    Wall,
    /// A regular token.
    Token,
    /// A power pellet.
    Power,
    /// Plain floor.
    Empty,
    /// The house door: solid for Pac-Man, passable for ghosts.
    Door,
}

impl Cell {
    /// Whether this cell is a consumable (token or power pellet).
    pub const fn is_consumable(self) -> bool {
        matches!(self, Cell::Token | Cell::Power)
    }
}

/// The class of agent asking a solidity question; Pac-Man and ghosts disagree
/// about the house door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentClass {
    Pacman,
    Ghost,
}

/// What a successful [`Map::eat`] consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Token,
    Power,
}

/// House geometry, derived once from the contiguous door run.
#[derive(Debug, Clone, Copy)]
pub struct HouseGeometry {
    /// The row the door sits in.
    pub door_row: i32,
    /// Inclusive column span of the door run.
    pub door_cols: (i32, i32),
    /// The cell ghosts start at and return to when caught.
    pub center: IVec2,
}

/// The game board: base layout, live consumable overlay and house geometry.
pub struct Map {
    size: UVec2,
    base: Vec<Cell>,
    live: Vec<Cell>,
    remaining: u32,
    /// The house geometry.
    pub house: HouseGeometry,
    /// Pac-Man's spawn cell.
    pub spawn: IVec2,
}

impl Map {
    /// Creates a new `Map` from a raw board layout.
    ///
    /// Scans the base layout once: derives the house geometry, pre-clears
    /// consumables within `clear_radius_sq` (squared cells) of the house
    /// center and counts what remains.
    pub fn new(raw_board: &[&str], clear_radius_sq: i32) -> GameResult<Map> {
        let parsed = BoardParser::parse_board(raw_board)?;

        let mut live = parsed.cells.clone();
        let mut remaining = 0u32;

        for (index, cell) in live.iter_mut().enumerate() {
            if !cell.is_consumable() {
                continue;
            }
            let pos = IVec2::new(
                (index % parsed.size.x as usize) as i32,
                (index / parsed.size.x as usize) as i32,
            );
            if (pos - parsed.house.center).length_squared() <= clear_radius_sq {
                *cell = Cell::Empty;
            } else {
                remaining += 1;
            }
        }

        debug!(
            size = ?parsed.size,
            tokens = remaining,
            door_row = parsed.house.door_row,
            "board initialized"
        );

        Ok(Map {
            size: parsed.size,
            base: parsed.cells,
            live,
            remaining,
            house: parsed.house,
            spawn: parsed.spawn,
        })
    }

    /// The board dimensions, in cells.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// How many consumables are left on the live overlay.
    pub fn remaining_tokens(&self) -> u32 {
        self.remaining
    }

    /// Toroidal wrap on both axes independently.
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        pos.rem_euclid(self.size.as_ivec2())
    }

    fn index(&self, pos: IVec2) -> usize {
        let pos = self.wrap(pos);
        pos.y as usize * self.size.x as usize + pos.x as usize
    }

    /// The base-layout cell at a (wrapped) position.
    pub fn base_cell(&self, pos: IVec2) -> Cell {
        self.base[self.index(pos)]
    }

    /// The live cell at a (wrapped) position. Walls and the door always read
    /// from the base layout.
    pub fn live_cell(&self, pos: IVec2) -> Cell {
        match self.base[self.index(pos)] {
            cell @ (Cell::Wall | Cell::Door) => cell,
            _ => self.live[self.index(pos)],
        }
    }

    /// Class-differentiated solidity: Pac-Man is blocked by walls and the
    /// house door, ghosts by walls only.
    pub fn solid_for(&self, class: AgentClass, pos: IVec2) -> bool {
        match self.base_cell(pos) {
            Cell::Wall => true,
            Cell::Door => class == AgentClass::Pacman,
            _ => false,
        }
    }

    /// Consumes the live cell at a position, if it holds a consumable.
    pub fn eat(&mut self, pos: IVec2) -> Option<Consumed> {
        let index = self.index(pos);
        if matches!(self.base[index], Cell::Wall | Cell::Door) {
            return None;
        }

        let consumed = match self.live[index] {
            Cell::Token => Consumed::Token,
            Cell::Power => Consumed::Power,
            _ => return None,
        };

        self.live[index] = Cell::Empty;
        self.remaining -= 1;
        Some(consumed)
    }

    /// A row-major copy of the live grid, for snapshots.
    pub fn grid_view(&self) -> Vec<Vec<Cell>> {
        (0..self.size.y as i32)
            .map(|y| (0..self.size.x as i32).map(|x| self.live_cell(IVec2::new(x, y))).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_map() -> Map {
        let board = [
            "#########", //
            "#==######",
            "#  ######",
            "#  ######",
            "#...o..P#",
            "#########",
        ];
        Map::new(&board, 0).unwrap()
    }

    #[test]
    fn test_wrap_both_axes() {
        let map = small_map();
        assert_eq!(map.wrap(IVec2::new(-1, 2)), IVec2::new(8, 2));
        assert_eq!(map.wrap(IVec2::new(9, 2)), IVec2::new(0, 2));
        assert_eq!(map.wrap(IVec2::new(3, -1)), IVec2::new(3, 5));
        assert_eq!(map.wrap(IVec2::new(3, 6)), IVec2::new(3, 0));
    }

    #[test]
    fn test_solidity_per_class() {
        let map = small_map();
        let door = IVec2::new(1, 1);
        let wall = IVec2::new(0, 0);
        let floor = IVec2::new(1, 2);

        assert!(map.solid_for(AgentClass::Pacman, door));
        assert!(!map.solid_for(AgentClass::Ghost, door));
        assert!(map.solid_for(AgentClass::Pacman, wall));
        assert!(map.solid_for(AgentClass::Ghost, wall));
        assert!(!map.solid_for(AgentClass::Pacman, floor));
        assert!(!map.solid_for(AgentClass::Ghost, floor));
    }

    #[test]
    fn test_eat_is_single_shot() {
        let mut map = small_map();
        let token = IVec2::new(1, 4);
        let before = map.remaining_tokens();

        assert_eq!(map.eat(token), Some(Consumed::Token));
        assert_eq!(map.remaining_tokens(), before - 1);
        assert_eq!(map.live_cell(token), Cell::Empty);

        // Second bite is a no-op.
        assert_eq!(map.eat(token), None);
        assert_eq!(map.remaining_tokens(), before - 1);
    }

    #[test]
    fn test_eat_power_pellet() {
        let mut map = small_map();
        assert_eq!(map.eat(IVec2::new(4, 4)), Some(Consumed::Power));
    }

    #[test]
    fn test_house_radius_preclear() {
        let board = [
            "#########", //
            "#==######",
            "#  ######",
            "#  ######",
            "#...o..P#",
            "#########",
        ];
        // House center is (1, 3); a radius of 4 squared cells swallows the
        // two tokens directly beneath the house.
        let map = Map::new(&board, 4).unwrap();
        assert_eq!(map.live_cell(IVec2::new(1, 4)), Cell::Empty);
        assert_eq!(map.live_cell(IVec2::new(2, 4)), Cell::Empty);
        assert_eq!(map.live_cell(IVec2::new(3, 4)), Cell::Token);
        assert_eq!(map.remaining_tokens(), 4);
    }

    #[test]
    fn test_base_layout_survives_eating() {
        let mut map = small_map();
        let token = IVec2::new(1, 4);
        map.eat(token);
        assert_eq!(map.base_cell(token), Cell::Token);
    }
}
