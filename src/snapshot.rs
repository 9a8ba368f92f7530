//! Snapshot structures for render and export consumers.
//!
//! Lightweight copies of simulation state. Consumers read these instead
//! of holding a borrow on the live world.

use crate::agents::{AgentId, Species};
use crate::grid::Pos;
use crate::world::World;
use serde::Serialize;
use std::collections::HashSet;

/// Lightweight view of an agent for rendering
#[derive(Clone, Debug, Serialize)]
pub struct AgentView {
    pub id: AgentId,
    pub species: Species,
    pub pos: Pos,
}

/// Complete world snapshot for rendering
#[derive(Clone, Debug, Serialize)]
pub struct WorldSnapshot {
    /// Current simulation tick
    pub tick: u64,
    /// Grid dimensions
    pub width: u16,
    pub height: u16,
    /// Flattened terrain costs (row-major, width x height)
    pub terrain_costs: Vec<f32>,
    /// Flattened obstacle flags (row-major)
    pub obstacles: Vec<bool>,
    /// All live agents
    pub agents: Vec<AgentView>,
    /// Cells lit this tick
    pub visible: HashSet<Pos>,
    /// Cells ever lit
    pub explored: HashSet<Pos>,
    /// Population counters
    pub prey_count: usize,
    pub predator_count: usize,
}

impl WorldSnapshot {
    /// Create a snapshot from the current world state
    pub fn from_world(world: &World) -> Self {
        let width = world.grid.width();
        let height = world.grid.height();

        // Convert agents to lightweight views
        let agents: Vec<AgentView> = world
            .agents()
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| AgentView {
                id: a.id,
                species: a.species(),
                pos: a.pos,
            })
            .collect();

        // Flatten terrain and obstacle layers
        let cells = width as usize * height as usize;
        let mut terrain_costs = Vec::with_capacity(cells);
        let mut obstacles = Vec::with_capacity(cells);
        for y in 0..height {
            for x in 0..width {
                let pos = Pos::new(x, y);
                terrain_costs.push(world.grid.movement_cost(pos));
                obstacles.push(world.grid.is_blocked(pos));
            }
        }

        Self {
            tick: world.tick,
            width,
            height,
            terrain_costs,
            obstacles,
            agents,
            visible: world.visibility().visible().clone(),
            explored: world.visibility().explored().clone(),
            prey_count: world.prey_count(),
            predator_count: world.predator_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.world.width = 8;
        config.world.height = 6;
        config.world.obstacle_fraction = 0.1;
        config.agents.initial_prey = 3;
        config.agents.initial_predators = 2;
        config.spawner.interval = 500;
        config
    }

    #[test]
    fn test_snapshot_layout() {
        let world = World::new_with_seed(test_config(), 9).unwrap();
        let snap = WorldSnapshot::from_world(&world);

        assert_eq!(snap.tick, 0);
        assert_eq!(snap.width, 8);
        assert_eq!(snap.height, 6);
        assert_eq!(snap.terrain_costs.len(), 48);
        assert_eq!(snap.obstacles.len(), 48);
        assert_eq!(snap.prey_count, 3);
        assert_eq!(snap.predator_count, 2);
        assert_eq!(snap.agents.len(), world.agents().len());

        let flagged = snap.obstacles.iter().filter(|&&b| b).count();
        assert_eq!(flagged, world.grid.obstacle_count());
        assert_eq!(&snap.visible, world.visibility().visible());
        assert_eq!(&snap.explored, world.visibility().explored());
    }

    #[test]
    fn test_snapshot_row_major_order() {
        let mut config = test_config();
        config.world.obstacle_fraction = 0.0;
        let mut world = World::new_with_seed(config, 11).unwrap();
        world.grid.set_obstacle(Pos::new(3, 2), true);
        world.grid.set_movement_cost(Pos::new(1, 4), 3.0);

        let snap = WorldSnapshot::from_world(&world);

        assert!(snap.obstacles[2 * 8 + 3]);
        assert_eq!(snap.terrain_costs[4 * 8 + 1], 3.0);
    }

    #[test]
    fn test_snapshot_skips_eliminated_agents() {
        let mut config = test_config();
        config.world.obstacle_fraction = 0.0;
        config.agents.initial_prey = 0;
        config.agents.initial_predators = 0;
        let mut world = World::new_with_seed(config, 13).unwrap();
        world.spawn_predator(Pos::new(2, 2));
        let prey_id = world.spawn_prey(Pos::new(2, 2));
        world.step();

        let snap = WorldSnapshot::from_world(&world);

        assert_eq!(snap.prey_count, 0);
        assert!(snap.agents.iter().all(|v| v.id != prey_id));
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new_with_seed(test_config(), 15).unwrap();
        let snap = WorldSnapshot::from_world(&world);

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"tick\""));
        assert!(json.contains("\"agents\""));
    }
}
