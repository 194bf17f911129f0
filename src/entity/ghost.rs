//! Ghost records, the four pursuit variants and the greedy step rule.

use glam::{IVec2, UVec2};
use strum_macros::AsRefStr;
use tracing::trace;

use crate::entity::direction::Direction;
use crate::map::{AgentClass, Map};

/// The four fixed pursuit/flee strategies. A closed enum, so adding a variant
/// forces every dispatch site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostKind {
    /// Targets Pac-Man's current cell.
    Chaser,
    /// Targets four cells ahead of Pac-Man.
    Ambusher,
    /// Mirrors the chaser through a point two cells ahead of Pac-Man.
    Flanker,
    /// Chases from afar, bolts for a corner when Pac-Man gets close.
    Timid,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [GhostKind::Chaser, GhostKind::Ambusher, GhostKind::Flanker, GhostKind::Timid];
}

/// Everything a target function needs to know about the rest of the world.
#[derive(Debug, Clone, Copy)]
pub struct TargetContext {
    pub pacman_pos: IVec2,
    /// Pac-Man's heading as a unit cell offset.
    pub pacman_heading: IVec2,
    /// The chaser's position, which the flanker mirrors through.
    pub chaser_pos: IVec2,
    /// Whether power mode is active; overrides every pursuit strategy.
    pub frightened: bool,
    /// Board dimensions, for clamping and corner targets.
    pub board: UVec2,
}

impl TargetContext {
    fn clamp(&self, pos: IVec2) -> IVec2 {
        pos.clamp(IVec2::ZERO, self.board.as_ivec2() - IVec2::ONE)
    }

    fn corners(&self) -> [IVec2; 4] {
        let max = self.board.as_ivec2() - IVec2::ONE;
        [IVec2::ZERO, IVec2::new(max.x, 0), IVec2::new(0, max.y), max]
    }
}

impl GhostKind {
    /// The raw, pre-clamp pursuit target for this variant.
    pub fn raw_target(self, from: IVec2, ctx: &TargetContext) -> IVec2 {
        match self {
            GhostKind::Chaser => ctx.pacman_pos,
            GhostKind::Ambusher => ctx.pacman_pos + ctx.pacman_heading * 4,
            GhostKind::Flanker => {
                let pivot = ctx.pacman_pos + ctx.pacman_heading * 2;
                pivot * 2 - ctx.chaser_pos
            }
            GhostKind::Timid => {
                if (ctx.pacman_pos - from).length_squared() > 64 {
                    ctx.pacman_pos
                } else {
                    // Bottom-left corner.
                    IVec2::new(0, ctx.board.y as i32 - 1)
                }
            }
        }
    }

    /// The effective target cell: the variant's clamped pursuit target, or
    /// the flee corner while frightened.
    pub fn target(self, from: IVec2, ctx: &TargetContext) -> IVec2 {
        if ctx.frightened {
            flee_target(ctx)
        } else {
            ctx.clamp(self.raw_target(from, ctx))
        }
    }
}

/// The corner with the greatest squared distance from Pac-Man. Ties go to the
/// first corner in scan order, keeping the flee deterministic.
pub fn flee_target(ctx: &TargetContext) -> IVec2 {
    let mut best = ctx.corners()[0];
    let mut best_dist = (best - ctx.pacman_pos).length_squared();
    for &corner in &ctx.corners()[1..] {
        let dist = (corner - ctx.pacman_pos).length_squared();
        if dist > best_dist {
            best = corner;
            best_dist = dist;
        }
    }
    best
}

/// One greedy step toward a target cell.
///
/// The exact reversal of the current heading is excluded unless nothing else
/// is legal; among legal candidates the one minimizing squared distance
/// (post-wrap) to the target wins, ties broken by the fixed
/// [`Direction::DIRECTIONS`] priority. Returns `None` when the ghost is
/// completely boxed in.
pub fn choose_step(map: &Map, pos: IVec2, heading: Direction, target: IVec2) -> Option<(Direction, IVec2)> {
    let opposite = heading.opposite();
    let mut best: Option<(Direction, IVec2, i32)> = None;

    for dir in Direction::DIRECTIONS {
        if dir == opposite {
            continue;
        }
        let next = map.wrap(pos + dir.as_ivec2());
        if map.solid_for(AgentClass::Ghost, next) {
            continue;
        }
        let dist = (next - target).length_squared();
        // Strict comparison keeps the first minimum, which is the tie-break.
        if best.map_or(true, |(_, _, best_dist)| dist < best_dist) {
            best = Some((dir, next, dist));
        }
    }

    if let Some((dir, next, _)) = best {
        return Some((dir, next));
    }

    // Reversal as last resort.
    let next = map.wrap(pos + opposite.as_ivec2());
    if !map.solid_for(AgentClass::Ghost, next) {
        return Some((opposite, next));
    }
    None
}

/// One ghost's record. `last_tick` is the barrier stamp: it trails the tick
/// id except at the instant this ghost has stepped for the current tick.
#[derive(Debug, Clone)]
pub struct Ghost {
    pub kind: GhostKind,
    pub pos: IVec2,
    pub heading: Direction,
    /// While true the ghost is counting down or ascending, never AI-driven.
    pub in_house: bool,
    /// Ticks until the ghost may begin leaving the house.
    pub release: u32,
    /// The last tick id this ghost has processed.
    pub last_tick: u64,
}

impl Ghost {
    pub fn new(kind: GhostKind, pos: IVec2, release: u32) -> Self {
        Self {
            kind,
            pos,
            heading: Direction::Right,
            in_house: true,
            release,
            last_tick: 0,
        }
    }

    /// Sends the ghost back to the house center with a fresh countdown.
    pub fn rehouse(&mut self, center: IVec2, respawn_ticks: u32) {
        self.pos = center;
        self.in_house = true;
        self.release = respawn_ticks;
    }

    /// Runs one tick of the house egress machine: Waiting (countdown), then
    /// Ascending (one cell up per tick toward the door), then Free.
    ///
    /// Returns `true` if the ghost was housed this tick and has been handled;
    /// `false` means the caller should run the regular AI step.
    pub fn house_tick(&mut self, map: &Map) -> bool {
        if !self.in_house {
            return false;
        }

        if self.release > 0 {
            self.release -= 1;
            return true;
        }

        if self.pos.y > map.house.door_row {
            let next = self.pos + Direction::Up.as_ivec2();
            if !map.solid_for(AgentClass::Ghost, next) {
                self.pos = next;
            }
        }

        if self.pos.y <= map.house.door_row {
            self.in_house = false;
            self.heading = Direction::Right;
            trace!(ghost = self.kind.as_ref(), pos = ?self.pos, "ghost left the house");
        }

        true
    }
}
