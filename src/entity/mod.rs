//! Agent records: Pac-Man, the four ghosts and the shared direction type.

pub mod direction;
pub mod ghost;
pub mod pacman;

pub use direction::Direction;
pub use ghost::{Ghost, GhostKind};
pub use pacman::Pacman;
