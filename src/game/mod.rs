//! Session state: the one shared record every thread contends for.
//!
//! Exactly one mutex (owned by the coordinator) guards a [`SessionState`];
//! every mutation below assumes the caller holds it.

pub mod collision;
pub mod coordinator;

use std::time::Duration;

use glam::IVec2;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::{Tunables, DEFAULT_TICK_INTERVAL, GHOST_COUNT, POWER_SCORE, TOKEN_SCORE};
use crate::entity::ghost::{choose_step, TargetContext};
use crate::entity::{Direction, Ghost, GhostKind, Pacman};
use crate::error::GameResult;
use crate::events::InputEvent;
use crate::map::{AgentClass, Cell, Consumed, Map};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every token eaten.
    Win,
    /// No lives left.
    Loss,
    /// Stopped from outside before either.
    Aborted,
}

/// The menu's choices for one session.
#[derive(Debug, Clone, Copy)]
pub struct ModeConfig {
    pub tick_interval: Duration,
    /// When set, the chaser ghost takes queued human commands instead of AI.
    pub human_ghost: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            human_ghost: false,
        }
    }
}

/// Power mode: active while the countdown is positive. Re-activation
/// overwrites the countdown, never extends past the configured duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerMode {
    remaining: u32,
}

impl PowerMode {
    pub fn active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn activate(&mut self, duration: u32) {
        self.remaining = duration;
    }

    /// One per-cycle decrement; reaching zero clears the mode.
    pub fn tick_down(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// An immutable per-cycle view for the render sink.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Row-major live grid.
    pub grid: Vec<Vec<Cell>>,
    pub pacman: IVec2,
    /// Kind, position and in-house flag per ghost.
    pub ghosts: SmallVec<[(GhostKind, IVec2, bool); GHOST_COUNT]>,
    pub score: u32,
    pub lives: u32,
    pub frightened: bool,
    pub remaining_tokens: u32,
    pub tick: u64,
}

/// The authoritative world for one game instance.
pub struct SessionState {
    pub map: Map,
    pub pacman: Pacman,
    pub ghosts: SmallVec<[Ghost; GHOST_COUNT]>,
    pub power: PowerMode,
    pub tunables: Tunables,
    /// Whether the chaser is under manual control this session.
    pub human_ghost: bool,

    /// Monotonic tick id, incremented once per driver cycle.
    pub tick: u64,
    /// How many ghosts have stepped for the current tick.
    pub done: usize,
    /// Cooperative cancellation flag; checked at every wait predicate.
    pub stop: bool,
    pub outcome: Option<Outcome>,

    /// Pac-Man's queued movement command for the next tick.
    pub queued_move: Option<Direction>,
    /// Queued command for the human-controlled ghost.
    pub queued_ghost_move: Option<Direction>,
}

impl SessionState {
    /// Builds a fresh session: parsed board, Pac-Man at his spawn, all four
    /// ghosts housed at the house center with their release countdowns.
    pub fn new(raw_board: &[&str], tunables: Tunables, mode: &ModeConfig) -> GameResult<Self> {
        let map = Map::new(raw_board, tunables.house_clear_radius_sq)?;
        let pacman = Pacman::new(map.spawn, tunables.lives);

        let ghosts = GhostKind::ALL
            .iter()
            .zip(tunables.release_ticks)
            .map(|(&kind, release)| Ghost::new(kind, map.house.center, release))
            .collect();

        Ok(Self {
            map,
            pacman,
            ghosts,
            power: PowerMode::default(),
            tunables,
            human_ghost: mode.human_ghost,
            tick: 0,
            done: 0,
            stop: false,
            outcome: None,
            queued_move: None,
            queued_ghost_move: None,
        })
    }

    /// Queues one input event; `Quit` sets the stop flag directly.
    pub fn queue_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Turn(dir) => self.queued_move = Some(dir),
            InputEvent::GhostTurn(dir) => self.queued_ghost_move = Some(dir),
            InputEvent::Quit => self.stop = true,
        }
    }

    /// Applies Pac-Man's queued command: turn, then move one cell if the way
    /// is open, then eat whatever the landing cell holds. An invalid move is
    /// a silent no-op.
    pub fn apply_pacman_move(&mut self) {
        let Some(dir) = self.queued_move.take() else {
            return;
        };

        let next = self.map.wrap(self.pacman.pos + dir.as_ivec2());
        if self.map.solid_for(AgentClass::Pacman, next) {
            return;
        }

        self.pacman.heading = dir;
        self.pacman.pos = next;
        self.eat_at(next);
    }

    /// Consumes the cell Pac-Man landed on, scoring it and arming power mode.
    fn eat_at(&mut self, pos: IVec2) {
        match self.map.eat(pos) {
            Some(Consumed::Token) => self.pacman.score += TOKEN_SCORE,
            Some(Consumed::Power) => {
                self.pacman.score += POWER_SCORE;
                self.power.activate(self.tunables.power_ticks);
                debug!(ticks = self.tunables.power_ticks, "power mode armed");
            }
            None => {}
        }
    }

    /// Exactly one step for ghost `idx`: the house egress machine, a manual
    /// command when that ghost is human-controlled, or the AI.
    pub fn step_ghost(&mut self, idx: usize) {
        let ctx = TargetContext {
            pacman_pos: self.pacman.pos,
            pacman_heading: self.pacman.heading.as_ivec2(),
            chaser_pos: self.ghosts[0].pos,
            frightened: self.power.active(),
            board: self.map.size(),
        };
        let manual = self.human_ghost && self.ghosts[idx].kind == GhostKind::Chaser;
        let command = if manual { self.queued_ghost_move.take() } else { None };

        let Self { map, ghosts, .. } = self;
        let ghost = &mut ghosts[idx];

        if ghost.house_tick(map) {
            return;
        }

        if manual {
            // A manual ghost holds position when no command is queued.
            if let Some(dir) = command {
                let next = map.wrap(ghost.pos + dir.as_ivec2());
                if !map.solid_for(AgentClass::Ghost, next) {
                    ghost.heading = dir;
                    ghost.pos = next;
                }
            }
            return;
        }

        let target = ghost.kind.target(ghost.pos, &ctx);
        if let Some((dir, next)) = choose_step(map, ghost.pos, ghost.heading, target) {
            ghost.heading = dir;
            ghost.pos = next;
            trace!(ghost = ghost.kind.as_ref(), pos = ?ghost.pos, target = ?target, "ghost stepped");
        }
    }

    /// Records the outcome and raises the stop flag, once.
    pub fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            debug!(?outcome, tick = self.tick, score = self.pacman.score, "session over");
            self.outcome = Some(outcome);
        }
        self.stop = true;
    }

    /// Builds the immutable per-cycle snapshot for the render sink.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.map.grid_view(),
            pacman: self.pacman.pos,
            ghosts: self.ghosts.iter().map(|g| (g.kind, g.pos, g.in_house)).collect(),
            score: self.pacman.score,
            lives: self.pacman.lives,
            frightened: self.power.active(),
            remaining_tokens: self.map.remaining_tokens(),
            tick: self.tick,
        }
    }
}
