//! World simulation engine - main tick loop.

use crate::agents::{predator, prey, Action, Agent, AgentId, AgentKind, Species, SpawnerState};
use crate::config::{Config, ConfigError};
use crate::grid::{Grid, Pos};
use crate::stats::StatsHistory;
use crate::visibility::VisibilityMap;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Lifecycle of a run. Terminal is entered when a species dies out and
/// is never left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Terminal,
}

/// The simulation world
#[derive(Clone)]
pub struct World {
    // Environment
    pub grid: Grid,

    // Population
    agents: Vec<Agent>,

    // State
    pub tick: u64,
    state: RunState,

    // Configuration
    pub config: Config,

    // Fog of war
    visibility: VisibilityMap,

    // Statistics
    history: StatsHistory,

    // ID generation
    next_agent_id: u64,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl World {
    /// Create a new world with the given configuration
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new world with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let width = config.world.width;
        let height = config.world.height;

        // Terrain first, obstacles scattered on top of it
        let mut grid = Grid::new(width, height);
        grid.generate_terrain(&config.terrain, &mut rng);
        let cells = width as usize * height as usize;
        let obstacle_target = (cells as f32 * config.world.obstacle_fraction) as usize;
        grid.scatter_obstacles(obstacle_target, &mut rng);

        let spawner_count = (config.agents.initial_predators / 2).max(1);
        let initial_predators = config.agents.initial_predators;
        let initial_prey = config.agents.initial_prey;

        let mut world = Self {
            grid,
            agents: Vec::new(),
            tick: 0,
            state: RunState::Idle,
            config,
            visibility: VisibilityMap::new(),
            history: StatsHistory::new(),
            next_agent_id: 0,
            rng,
            seed,
        };

        // Structures first, then hunters, then prey
        for _ in 0..spawner_count {
            let pos = world.random_free_cell()?;
            world.spawn_spawner(pos);
        }
        for _ in 0..initial_predators {
            let pos = world.random_free_cell()?;
            world.spawn_predator(pos);
        }
        for _ in 0..initial_prey {
            let pos = world.random_free_cell()?;
            world.spawn_prey(pos);
        }

        world
            .visibility
            .recompute(&world.agents, width, height);
        world
            .history
            .record(0, world.prey_count(), world.predator_count());

        log::info!(
            "World created: {}x{} seed={} prey={} predators={} spawners={}",
            width,
            height,
            seed,
            initial_prey,
            initial_predators,
            spawner_count
        );

        Ok(world)
    }

    /// Add a prey at the given position, returning its id
    pub fn spawn_prey(&mut self, pos: Pos) -> AgentId {
        let id = self.alloc_id();
        self.grid.place_agent(id, pos);
        self.agents
            .push(Agent::prey(id, pos, self.config.agents.prey_vision));
        id
    }

    /// Add a predator at the given position, returning its id
    pub fn spawn_predator(&mut self, pos: Pos) -> AgentId {
        let id = self.alloc_id();
        self.grid.place_agent(id, pos);
        self.agents
            .push(Agent::predator(id, pos, self.config.agents.predator_vision));
        id
    }

    /// Add a spawner at the given position, returning its id
    pub fn spawn_spawner(&mut self, pos: Pos) -> AgentId {
        let id = self.alloc_id();
        let state = SpawnerState::new(
            self.config.spawner.interval,
            self.config.spawner.min_interval,
            self.config.spawner.accelerate,
        );
        self.grid.place_agent(id, pos);
        self.agents.push(Agent::spawner(id, pos, state));
        id
    }

    fn alloc_id(&mut self) -> AgentId {
        let id = self.next_agent_id;
        self.next_agent_id += 1;
        id
    }

    fn random_free_cell(&mut self) -> Result<Pos, ConfigError> {
        self.grid
            .random_unblocked_cell(&mut self.rng)
            .ok_or(ConfigError::NoFreeCells)
    }

    /// Advance the simulation by one tick. Returns false without acting
    /// when a stop condition holds.
    pub fn step(&mut self) -> bool {
        if self.check_stop() {
            return false;
        }

        // Phase 1: activate live mobile agents in shuffled order
        self.activate_agents();

        // Phase 2: advance spawners; emitted predators act next tick
        self.advance_spawners();

        // Phase 3: drop eliminated agents from the roster
        self.agents.retain(|a| a.is_alive());

        // Phase 4: recompute fog of war from post-move positions
        self.visibility
            .recompute(&self.agents, self.grid.width(), self.grid.height());

        // Phase 5: sample population counters
        self.tick += 1;
        self.history
            .record(self.tick, self.prey_count(), self.predator_count());

        self.check_stop();
        true
    }

    /// Evaluate the stop condition, entering Terminal when it holds
    fn check_stop(&mut self) -> bool {
        if self.state == RunState::Terminal {
            return true;
        }
        let prey = self.prey_count();
        let predators = self.predator_count();
        if prey == 0 || predators == 0 {
            self.state = RunState::Terminal;
            log::info!(
                "Run terminal at tick {}: prey={} predators={}",
                self.tick,
                prey,
                predators
            );
            return true;
        }
        false
    }

    /// Give every live mobile agent one turn, in shuffled order
    fn activate_agents(&mut self) {
        let mut order: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| a.is_alive() && a.is_mobile())
            .map(|a| a.id)
            .collect();
        order.shuffle(&mut self.rng);

        for id in order {
            // The agent may have been eliminated earlier this tick
            let idx = match self.agents.iter().position(|a| a.id == id) {
                Some(idx) if self.agents[idx].is_alive() => idx,
                _ => continue,
            };
            let action = match self.agents[idx].kind {
                AgentKind::Prey { .. } => {
                    prey::decide(&self.agents[idx], &self.agents, &self.grid, &mut self.rng)
                }
                AgentKind::Predator { .. } => {
                    predator::decide(&self.agents[idx], &self.agents, &self.grid, &mut self.rng)
                }
                AgentKind::Spawner(_) => Action::Stay,
            };
            self.apply_action(idx, action);
        }
    }

    /// Apply one agent's chosen action to the world
    fn apply_action(&mut self, idx: usize, action: Action) {
        match action {
            Action::MoveTo(next) => {
                let id = self.agents[idx].id;
                let from = self.agents[idx].pos;
                self.grid.move_agent(id, from, next);
                self.agents[idx].pos = next;
            }
            Action::Attack(target) => self.eliminate(target),
            Action::Stay => {}
        }
    }

    /// Remove an agent from play. A second call for the same id is a no-op.
    fn eliminate(&mut self, id: AgentId) {
        if let Some(victim) = self.agents.iter_mut().find(|a| a.id == id) {
            if victim.is_alive() {
                let species = victim.species();
                let pos = victim.pos;
                victim.kill();
                self.grid.remove_agent(id, pos);
                log::debug!("Agent {} ({}) eliminated at {}", id, species, pos);
            }
        }
    }

    /// Advance every spawner's counter; spawn a predator per completion
    fn advance_spawners(&mut self) {
        let mut emissions = Vec::new();
        for agent in &mut self.agents {
            if !agent.is_alive() {
                continue;
            }
            if let AgentKind::Spawner(ref mut state) = agent.kind {
                if state.advance() {
                    emissions.push(agent.pos);
                }
            }
        }
        for pos in emissions {
            let id = self.spawn_predator(pos);
            log::debug!("Spawner emission: predator {} at {}", id, pos);
        }
    }

    /// Run up to `ticks` further ticks, stopping early on a stop condition.
    /// Returns the number of ticks actually processed.
    pub fn run(&mut self, ticks: u64) -> u64 {
        let mut processed = 0;
        for _ in 0..ticks {
            if !self.step() {
                break;
            }
            processed += 1;
        }
        processed
    }

    /// Live prey count
    pub fn prey_count(&self) -> usize {
        self.count_species(Species::Prey)
    }

    /// Live predator count
    pub fn predator_count(&self) -> usize {
        self.count_species(Species::Predator)
    }

    /// Spawner count
    pub fn spawner_count(&self) -> usize {
        self.count_species(Species::Spawner)
    }

    fn count_species(&self, species: Species) -> usize {
        self.agents
            .iter()
            .filter(|a| a.is_alive() && a.species() == species)
            .count()
    }

    /// True once a stop condition has been observed
    pub fn is_terminal(&self) -> bool {
        self.state == RunState::Terminal
    }

    /// All agents still on the roster
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Current fog-of-war state
    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    /// Population samples recorded so far, one per tick
    pub fn history(&self) -> &StatsHistory {
        &self.history
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
