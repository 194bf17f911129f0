//! The collision & power resolver, run by the driver once per cycle after
//! all four ghosts have stepped.

use tracing::debug;

use crate::constants::GHOST_SCORE;
use crate::game::{Outcome, SessionState};

/// Resolves ghost contacts, ticks the power countdown and checks for the end
/// of the session.
///
/// Contacts are evaluated against Pac-Man's *current* cell: a life-losing
/// reset moves him away, so a second ghost on the old cell costs nothing
/// extra.
pub fn resolve(state: &mut SessionState) {
    for idx in 0..state.ghosts.len() {
        let ghost = &state.ghosts[idx];
        if ghost.in_house || ghost.pos != state.pacman.pos {
            continue;
        }

        if state.power.active() {
            state.pacman.score += GHOST_SCORE;
            let center = state.map.house.center;
            let respawn = state.tunables.respawn_ticks;
            let ghost = &mut state.ghosts[idx];
            ghost.rehouse(center, respawn);
            debug!(ghost = ghost.kind.as_ref(), "ghost caught, sent home");
        } else {
            state.pacman.lives = state.pacman.lives.saturating_sub(1);
            state.pacman.reset();
            debug!(lives = state.pacman.lives, "Pac-Man caught");
        }
    }

    state.power.tick_down();

    if state.map.remaining_tokens() == 0 {
        state.finish(Outcome::Win);
    } else if state.pacman.lives == 0 {
        state.finish(Outcome::Loss);
    }
}
