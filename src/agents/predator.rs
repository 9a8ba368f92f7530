//! Predator policy: close on the nearest prey, strike when in reach.

use super::{random_walk, Action, Agent, AgentId, AgentKind};
use crate::grid::{Grid, Pos};
use crate::path;
use rand_chacha::ChaCha8Rng;

/// Pick this predator's turn: attack a prey within reach, otherwise step
/// along the cheapest path toward the nearest one, or wander when no prey
/// exists or no path is found.
pub(crate) fn decide(me: &Agent, agents: &[Agent], grid: &Grid, rng: &mut ChaCha8Rng) -> Action {
    let attack_range = match me.kind {
        AgentKind::Predator { attack_range, .. } => attack_range,
        _ => return Action::Stay,
    };

    let (target_id, target_pos) = match nearest_prey(me.pos, agents) {
        Some(target) => target,
        None => return random_walk(me.pos, grid, rng),
    };

    if me.pos.manhattan(target_pos) <= attack_range {
        return Action::Attack(target_id);
    }

    match path::find_path(grid, me.pos, target_pos) {
        Some(path) if path.len() >= 2 => Action::MoveTo(path[1]),
        _ => random_walk(me.pos, grid, rng),
    }
}

/// Nearest live prey by Manhattan distance; roster order breaks ties
fn nearest_prey(from: Pos, agents: &[Agent]) -> Option<(AgentId, Pos)> {
    agents
        .iter()
        .filter(|a| a.is_alive() && matches!(a.kind, AgentKind::Prey { .. }))
        .min_by_key(|a| from.manhattan(a.pos))
        .map(|a| (a.id, a.pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_attacks_adjacent_prey() {
        let grid = Grid::new(5, 5);
        let hunter = Agent::predator(1, Pos::new(2, 2), 6);
        let target = Agent::prey(2, Pos::new(2, 3), 5);
        let agents = vec![hunter.clone(), target];

        assert_eq!(
            decide(&hunter, &agents, &grid, &mut rng(31)),
            Action::Attack(2)
        );
    }

    #[test]
    fn test_attacks_prey_on_same_cell() {
        let grid = Grid::new(5, 5);
        let hunter = Agent::predator(1, Pos::new(2, 2), 6);
        let target = Agent::prey(2, Pos::new(2, 2), 5);
        let agents = vec![hunter.clone(), target];

        assert_eq!(
            decide(&hunter, &agents, &grid, &mut rng(32)),
            Action::Attack(2)
        );
    }

    #[test]
    fn test_chases_distant_prey() {
        let grid = Grid::new(5, 5);
        let hunter = Agent::predator(1, Pos::new(0, 0), 6);
        let target = Agent::prey(2, Pos::new(4, 4), 5);
        let agents = vec![hunter.clone(), target];

        match decide(&hunter, &agents, &grid, &mut rng(33)) {
            Action::MoveTo(next) => {
                assert_eq!(hunter.pos.manhattan(next), 1);
                assert_eq!(next.manhattan(Pos::new(4, 4)), 7, "the step closes distance");
            }
            other => panic!("expected a chase step, got {:?}", other),
        }
    }

    #[test]
    fn test_nearest_prey_first_wins_ties() {
        let grid = Grid::new(5, 5);
        let hunter = Agent::predator(1, Pos::new(1, 1), 6);
        let first = Agent::prey(2, Pos::new(1, 0), 5);
        let second = Agent::prey(3, Pos::new(0, 1), 5);
        let agents = vec![hunter.clone(), first, second];

        assert_eq!(
            decide(&hunter, &agents, &grid, &mut rng(34)),
            Action::Attack(2),
            "equal distances resolve to the earlier roster entry"
        );
    }

    #[test]
    fn test_dead_prey_is_ignored() {
        let grid = Grid::new(5, 5);
        let hunter = Agent::predator(1, Pos::new(2, 2), 6);
        let mut gone = Agent::prey(2, Pos::new(2, 3), 5);
        gone.kill();
        let agents = vec![hunter.clone(), gone];

        // nothing left to hunt: wander
        match decide(&hunter, &agents, &grid, &mut rng(35)) {
            Action::MoveTo(next) => assert_eq!(hunter.pos.chebyshev(next), 1),
            other => panic!("expected a wander move, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_prey_triggers_wander() {
        let mut grid = Grid::new(5, 5);
        // wall the prey into the east column
        for y in 0..5 {
            grid.set_obstacle(Pos::new(3, y), true);
        }
        let hunter = Agent::predator(1, Pos::new(0, 2), 6);
        let target = Agent::prey(2, Pos::new(4, 2), 5);
        let agents = vec![hunter.clone(), target];

        match decide(&hunter, &agents, &grid, &mut rng(36)) {
            Action::MoveTo(next) => assert_eq!(hunter.pos.chebyshev(next), 1),
            other => panic!("expected a wander move, got {:?}", other),
        }
    }
}
