//! Pac-Man's record: position, heading, lives and score.

use glam::IVec2;

use crate::entity::direction::Direction;

/// The player's agent.
#[derive(Debug, Clone)]
pub struct Pacman {
    /// Current cell.
    pub pos: IVec2,
    /// Current heading; also feeds the Ambusher/Flanker target math.
    pub heading: Direction,
    pub lives: u32,
    pub score: u32,
    spawn: IVec2,
}

impl Pacman {
    pub fn new(spawn: IVec2, lives: u32) -> Self {
        Self {
            pos: spawn,
            heading: Direction::default(),
            lives,
            score: 0,
            spawn,
        }
    }

    /// Returns Pac-Man to his spawn cell with the default heading. Score and
    /// lives are untouched; the caller decides when a life is lost.
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.heading = Direction::default();
    }

    /// The spawn cell this Pac-Man resets to.
    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }
}
