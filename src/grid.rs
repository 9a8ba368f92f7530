//! Bounded 2D grid of terrain costs and obstacles, with per-cell occupancy.

use crate::agents::AgentId;
use crate::config::TerrainConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Grid coordinate. No wraparound; all arithmetic is bounds-checked by the owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance (4-connected move count)
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        let dx = (self.x as i32 - other.x as i32).unsigned_abs();
        let dy = (self.y as i32 - other.y as i32).unsigned_abs();
        dx + dy
    }

    /// Chebyshev distance (square-radius metric used for vision)
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u32 {
        let dx = (self.x as i32 - other.x as i32).unsigned_abs();
        let dy = (self.y as i32 - other.y as i32).unsigned_abs();
        dx.max(dy)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One grid cell and the agents standing on it
#[derive(Clone, Debug)]
pub struct Cell {
    /// Cost paid to enter this cell
    pub movement_cost: f32,
    /// Impassable for planned movement
    pub obstacle: bool,
    occupants: Vec<AgentId>,
}

impl Cell {
    fn open(movement_cost: f32) -> Self {
        Self {
            movement_cost,
            obstacle: false,
            occupants: Vec::new(),
        }
    }

    /// Agents currently standing on this cell
    #[inline]
    pub fn occupants(&self) -> &[AgentId] {
        &self.occupants
    }
}

/// Fixed-size grid owning all cells. Dimensions never change after construction.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Row-major: index = y * width + x
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an open grid with uniform cost 1.0
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::open(1.0); len],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Cell at a position, or None outside the grid
    #[inline]
    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if self.in_bounds(pos) {
            Some(&self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// True outside the grid or on an obstacle
    #[inline]
    pub fn is_blocked(&self, pos: Pos) -> bool {
        match self.cell(pos) {
            Some(cell) => cell.obstacle,
            None => true,
        }
    }

    /// Terrain cost to enter. Callers must stay in bounds.
    #[inline]
    pub fn movement_cost(&self, pos: Pos) -> f32 {
        assert!(self.in_bounds(pos), "movement_cost out of bounds at {}", pos);
        self.cells[self.index(pos)].movement_cost
    }

    /// In-bounds, unblocked orthogonal neighbors.
    /// The yield order is fixed; path search relies on it for deterministic ties.
    pub fn neighbors4(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        const DELTAS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        DELTAS.into_iter().filter_map(move |(dx, dy)| {
            let nx = pos.x as i32 + dx;
            let ny = pos.y as i32 + dy;
            if nx < 0 || ny < 0 {
                return None;
            }
            let next = Pos::new(nx as u16, ny as u16);
            if self.in_bounds(next) && !self.cells[self.index(next)].obstacle {
                Some(next)
            } else {
                None
            }
        })
    }

    /// Agents standing at a position (empty outside the grid)
    #[inline]
    pub fn agents_at(&self, pos: Pos) -> &[AgentId] {
        match self.cell(pos) {
            Some(cell) => &cell.occupants,
            None => &[],
        }
    }

    /// Register an agent on a cell
    pub fn place_agent(&mut self, id: AgentId, pos: Pos) {
        assert!(self.in_bounds(pos), "place_agent out of bounds at {}", pos);
        let idx = self.index(pos);
        self.cells[idx].occupants.push(id);
    }

    /// Move an agent between cells. Obstacle cells are legal targets here;
    /// planned movement avoids them upstream, the fallback walk does not.
    pub fn move_agent(&mut self, id: AgentId, from: Pos, to: Pos) {
        assert!(self.in_bounds(from), "move_agent out of bounds at {}", from);
        assert!(self.in_bounds(to), "move_agent out of bounds at {}", to);
        let from_idx = self.index(from);
        self.cells[from_idx].occupants.retain(|&o| o != id);
        let to_idx = self.index(to);
        self.cells[to_idx].occupants.push(id);
    }

    /// Remove an agent from a cell. No-op if it is not there.
    pub fn remove_agent(&mut self, id: AgentId, pos: Pos) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx].occupants.retain(|&o| o != id);
        }
    }

    /// Set the obstacle flag of one cell
    pub fn set_obstacle(&mut self, pos: Pos, blocked: bool) {
        assert!(self.in_bounds(pos), "set_obstacle out of bounds at {}", pos);
        let idx = self.index(pos);
        self.cells[idx].obstacle = blocked;
    }

    /// Set the terrain cost of one cell
    pub fn set_movement_cost(&mut self, pos: Pos, cost: f32) {
        assert!(self.in_bounds(pos), "set_movement_cost out of bounds at {}", pos);
        let idx = self.index(pos);
        self.cells[idx].movement_cost = cost;
    }

    /// Assign every cell its terrain cost: rough with the configured
    /// probability, ordinary otherwise. One RNG draw per cell.
    pub fn generate_terrain(&mut self, terrain: &TerrainConfig, rng: &mut ChaCha8Rng) {
        for cell in &mut self.cells {
            cell.movement_cost = if rng.gen::<f32>() < terrain.high_cost_prob {
                terrain.high_cost
            } else {
                terrain.default_cost
            };
        }
    }

    /// Flag up to `count` distinct cells as obstacles by rejection sampling,
    /// bounded at 10 attempts per requested obstacle. Returns how many were
    /// actually placed.
    pub fn scatter_obstacles(&mut self, count: usize, rng: &mut ChaCha8Rng) -> usize {
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count && attempts < count * 10 {
            attempts += 1;
            let pos = Pos::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            let idx = self.index(pos);
            if !self.cells[idx].obstacle {
                self.cells[idx].obstacle = true;
                placed += 1;
            }
        }
        placed
    }

    /// Uniformly pick a non-obstacle cell, or None if every cell is blocked
    pub fn random_unblocked_cell(&self, rng: &mut ChaCha8Rng) -> Option<Pos> {
        let open: Vec<Pos> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Pos::new(x, y)))
            .filter(|&pos| !self.cells[self.index(pos)].obstacle)
            .collect();
        open.choose(rng).copied()
    }

    /// Number of obstacle cells
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.obstacle).count()
    }
}
