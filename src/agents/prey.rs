//! Prey policy: run from the nearest predator toward far, reachable ground.

use super::{random_walk, Action, Agent, AgentKind};
use crate::grid::{Grid, Pos};
use crate::path;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Random flee candidates sampled each turn, on top of the four corners
const SAMPLED_CANDIDATES: usize = 12;
/// Penalty per path cell; biases the choice toward nearer refuges
const PATH_LENGTH_PENALTY: f32 = 0.5;

/// Pick this prey's turn: flee toward the best-scoring reachable candidate,
/// wander if there is no predator or no reachable candidate at all.
pub(crate) fn decide(me: &Agent, agents: &[Agent], grid: &Grid, rng: &mut ChaCha8Rng) -> Action {
    let threat = match nearest_predator(me.pos, agents) {
        Some(pos) => pos,
        None => return random_walk(me.pos, grid, rng),
    };

    let width = grid.width();
    let height = grid.height();
    // corners are always considered, reachable or not; random samples follow
    let mut candidates = vec![
        Pos::new(0, 0),
        Pos::new(0, height - 1),
        Pos::new(width - 1, 0),
        Pos::new(width - 1, height - 1),
    ];
    for _ in 0..SAMPLED_CANDIDATES {
        candidates.push(Pos::new(rng.gen_range(0..width), rng.gen_range(0..height)));
    }

    let mut best: Option<Vec<Pos>> = None;
    let mut best_score = f32::NEG_INFINITY;
    for cand in candidates {
        let path = match path::find_path(grid, me.pos, cand) {
            Some(path) => path,
            None => continue,
        };
        let score = cand.manhattan(threat) as f32 - PATH_LENGTH_PENALTY * path.len() as f32;
        // strict comparison keeps the first enumerated candidate on ties
        if score > best_score {
            best_score = score;
            best = Some(path);
        }
    }

    match best {
        Some(path) if path.len() >= 2 => Action::MoveTo(path[1]),
        // already standing on the winning candidate
        Some(_) => Action::Stay,
        None => random_walk(me.pos, grid, rng),
    }
}

/// Nearest live predator by Manhattan distance; roster order breaks ties
fn nearest_predator(from: Pos, agents: &[Agent]) -> Option<Pos> {
    agents
        .iter()
        .filter(|a| a.is_alive() && matches!(a.kind, AgentKind::Predator { .. }))
        .min_by_key(|a| from.manhattan(a.pos))
        .map(|a| a.pos)
}
