//! Input events and the collaborator traits the simulation core depends on.
//!
//! The core never talks to a terminal directly: it pulls events from an
//! [`InputSource`] and pushes per-cycle snapshots into a [`RenderSink`].

use crate::entity::Direction;
use crate::error::GameResult;
use crate::game::Snapshot;

/// One input event. Absence of events is routine, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Steer Pac-Man.
    Turn(Direction),
    /// Steer the human-controlled ghost, when the active mode has one.
    GhostTurn(Direction),
    /// End the session.
    Quit,
}

/// A non-blocking source of input events.
///
/// `poll` must return `Ok(None)` frequently and non-fatally; the driver calls
/// it once per pending event at the top of every cycle.
pub trait InputSource {
    fn poll(&mut self) -> GameResult<Option<InputEvent>>;
}

/// Consumes one immutable snapshot per completed cycle.
pub trait RenderSink {
    fn draw(&mut self, snapshot: &Snapshot) -> GameResult<()>;
}
