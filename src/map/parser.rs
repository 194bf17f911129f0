//! Board parsing functionality for converting raw character layouts into structured data.

use glam::{IVec2, UVec2};

use crate::error::ParseError;
use crate::map::{Cell, HouseGeometry};

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedBoard {
    /// The board dimensions, in cells.
    pub size: UVec2,
    /// The parsed cell layout, row-major.
    pub cells: Vec<Cell>,
    /// Pac-Man's starting position.
    pub spawn: IVec2,
    /// The house geometry derived from the door run.
    pub house: HouseGeometry,
}

/// Parser for converting raw board layouts into structured board data.
pub struct BoardParser;

impl BoardParser {
    /// Parses a single character into a cell.
    pub fn parse_character(c: char) -> Result<Cell, ParseError> {
        match c {
            '#' => Ok(Cell::Wall),
            '.' => Ok(Cell::Token),
            'o' => Ok(Cell::Power),
            ' ' => Ok(Cell::Empty),
            '=' => Ok(Cell::Door),
            'P' => Ok(Cell::Empty), // Pac-Man's starting position, treated as floor
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured board data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty or ragged, contains unknown
    /// characters, lacks a spawn marker, or if the house door cells do not
    /// form exactly one contiguous horizontal run.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedBoard, ParseError> {
        if raw_board.is_empty() || raw_board[0].is_empty() {
            return Err(ParseError::EmptyBoard);
        }

        let width = raw_board[0].len();
        let height = raw_board.len();

        let mut cells = Vec::with_capacity(width * height);
        let mut spawn: Option<IVec2> = None;
        let mut door: Vec<IVec2> = Vec::new();

        for (y, line) in raw_board.iter().enumerate() {
            if line.len() != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    found: line.len(),
                    expected: width,
                });
            }

            for (x, character) in line.chars().enumerate() {
                let cell = Self::parse_character(character)?;

                match cell {
                    Cell::Door => door.push(IVec2::new(x as i32, y as i32)),
                    _ if character == 'P' => spawn = Some(IVec2::new(x as i32, y as i32)),
                    _ => {}
                }

                cells.push(cell);
            }
        }

        let spawn = spawn.ok_or(ParseError::MissingSpawn)?;
        let house = Self::derive_house(&door)?;

        Ok(ParsedBoard {
            size: UVec2::new(width as u32, height as u32),
            cells,
            spawn,
            house,
        })
    }

    /// Derives the house geometry from the door cells.
    ///
    /// The door must be a single contiguous horizontal run; the house center
    /// sits two rows below the midpoint of that run.
    fn derive_house(door: &[IVec2]) -> Result<HouseGeometry, ParseError> {
        let first = match door.first() {
            Some(cell) => *cell,
            None => return Err(ParseError::InvalidDoorRun(0)),
        };

        let contiguous = door
            .iter()
            .enumerate()
            .all(|(i, cell)| cell.y == first.y && cell.x == first.x + i as i32);
        if !contiguous {
            return Err(ParseError::InvalidDoorRun(door.len()));
        }

        let last = door[door.len() - 1];
        let mid_x = (first.x + last.x) / 2;

        Ok(HouseGeometry {
            door_row: first.y,
            door_cols: (first.x, last.x),
            center: IVec2::new(mid_x, first.y + 2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RAW_BOARD;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_character() {
        assert!(matches!(BoardParser::parse_character('#').unwrap(), Cell::Wall));
        assert!(matches!(BoardParser::parse_character('.').unwrap(), Cell::Token));
        assert!(matches!(BoardParser::parse_character('o').unwrap(), Cell::Power));
        assert!(matches!(BoardParser::parse_character(' ').unwrap(), Cell::Empty));
        assert!(matches!(BoardParser::parse_character('=').unwrap(), Cell::Door));
        assert!(matches!(BoardParser::parse_character('P').unwrap(), Cell::Empty));

        assert!(BoardParser::parse_character('Z').is_err());
    }

    #[test]
    fn test_parse_board() {
        let parsed = BoardParser::parse_board(&RAW_BOARD).unwrap();

        assert_eq!(parsed.size, glam::UVec2::new(28, 31));
        assert_eq!(parsed.cells.len(), 28 * 31);
        assert_eq!(parsed.spawn, IVec2::new(13, 23));

        // The door run sits in row 12, columns 13..=14, so the house center
        // is two rows below its midpoint.
        assert_eq!(parsed.house.door_row, 12);
        assert_eq!(parsed.house.door_cols, (13, 14));
        assert_eq!(parsed.house.center, IVec2::new(13, 14));
    }

    #[test]
    fn test_parse_board_unknown_character() {
        let board = ["###", "#Z#", "###"];
        let result = BoardParser::parse_board(&board);
        assert!(matches!(result.unwrap_err(), ParseError::UnknownCharacter('Z')));
    }

    #[test]
    fn test_parse_board_ragged_row() {
        let board = ["####", "##", "####"];
        let result = BoardParser::parse_board(&board);
        assert!(matches!(result.unwrap_err(), ParseError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn test_parse_board_missing_door() {
        let board = ["####", "#P.#", "####"];
        let result = BoardParser::parse_board(&board);
        assert!(matches!(result.unwrap_err(), ParseError::InvalidDoorRun(0)));
    }

    #[test]
    fn test_parse_board_split_door_rejected() {
        let board = ["#####", "#=#=#", "#P..#", "#####"];
        let result = BoardParser::parse_board(&board);
        assert!(matches!(result.unwrap_err(), ParseError::InvalidDoorRun(2)));
    }
}
