//! Agent roster types and per-species turn policies.

pub mod predator;
pub mod prey;
pub mod spawner;

pub use spawner::SpawnerState;

use crate::grid::{Grid, Pos};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Stable agent identifier, unique for the lifetime of a world
pub type AgentId = u64;

/// Species tag carried by every agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
    Spawner,
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prey => write!(f, "prey"),
            Self::Predator => write!(f, "predator"),
            Self::Spawner => write!(f, "spawner"),
        }
    }
}

/// Species-specific state carried by an agent
#[derive(Clone, Debug)]
pub enum AgentKind {
    Prey { vision: u16 },
    Predator { vision: u16, attack_range: u32 },
    Spawner(SpawnerState),
}

/// One simulation entity. Position is authoritative here; the grid's
/// occupancy index mirrors it and is kept in sync by the world.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub pos: Pos,
    pub kind: AgentKind,
    alive: bool,
}

impl Agent {
    pub fn prey(id: AgentId, pos: Pos, vision: u16) -> Self {
        Self {
            id,
            pos,
            kind: AgentKind::Prey { vision },
            alive: true,
        }
    }

    pub fn predator(id: AgentId, pos: Pos, vision: u16) -> Self {
        Self {
            id,
            pos,
            kind: AgentKind::Predator {
                vision,
                attack_range: 1,
            },
            alive: true,
        }
    }

    pub fn spawner(id: AgentId, pos: Pos, state: SpawnerState) -> Self {
        Self {
            id,
            pos,
            kind: AgentKind::Spawner(state),
            alive: true,
        }
    }

    #[inline]
    pub fn species(&self) -> Species {
        match self.kind {
            AgentKind::Prey { .. } => Species::Prey,
            AgentKind::Predator { .. } => Species::Predator,
            AgentKind::Spawner(_) => Species::Spawner,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Liveness is flipped only by the world's elimination path
    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    /// Prey and predators take turns; spawners only advance their counter
    #[inline]
    pub fn is_mobile(&self) -> bool {
        matches!(
            self.kind,
            AgentKind::Prey { .. } | AgentKind::Predator { .. }
        )
    }

    /// Vision radius for fog-of-war, None for sightless structures
    #[inline]
    pub fn vision_range(&self) -> Option<u16> {
        match self.kind {
            AgentKind::Prey { vision } => Some(vision),
            AgentKind::Predator { vision, .. } => Some(vision),
            AgentKind::Spawner(_) => None,
        }
    }
}

/// What an agent chose to do with its turn. Applied by the world, never
/// by the deciding agent itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Step onto a cell (adjacent for planned moves, 8-connected for walks)
    MoveTo(Pos),
    /// Eliminate the target; the attacker stays put this turn
    Attack(AgentId),
    Stay,
}

/// Fallback move: uniform over the 8-connected in-bounds neighborhood.
/// The obstacle flag is deliberately not consulted; only planned movement
/// respects it.
pub(crate) fn random_walk(pos: Pos, grid: &Grid, rng: &mut ChaCha8Rng) -> Action {
    const DELTAS: [(i32, i32); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];
    let neighbors: Vec<Pos> = DELTAS
        .iter()
        .filter_map(|&(dx, dy)| {
            let nx = pos.x as i32 + dx;
            let ny = pos.y as i32 + dy;
            if nx >= 0 && ny >= 0 && nx < grid.width() as i32 && ny < grid.height() as i32 {
                Some(Pos::new(nx as u16, ny as u16))
            } else {
                None
            }
        })
        .collect();
    match neighbors.choose(rng) {
        Some(&next) => Action::MoveTo(next),
        None => Action::Stay,
    }
}
