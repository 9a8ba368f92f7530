//! Fog-of-war: what is seen this tick, and what has ever been seen.

use crate::agents::Agent;
use crate::grid::Pos;
use std::collections::HashSet;

/// Per-tick visible set plus the monotonically growing explored set.
#[derive(Clone, Debug, Default)]
pub struct VisibilityMap {
    visible: HashSet<Pos>,
    explored: HashSet<Pos>,
}

impl VisibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the visible set from every live, sighted agent: a Chebyshev
    /// square of its vision range, clipped to the grid. The previous visible
    /// set is discarded; the explored set only ever grows.
    pub fn recompute(&mut self, agents: &[Agent], width: u16, height: u16) {
        self.visible.clear();
        for agent in agents {
            if !agent.is_alive() {
                continue;
            }
            let vision = match agent.vision_range() {
                Some(vision) => vision as u32,
                None => continue,
            };
            let x_min = (agent.pos.x as u32).saturating_sub(vision);
            let x_max = (agent.pos.x as u32 + vision).min(width as u32 - 1);
            let y_min = (agent.pos.y as u32).saturating_sub(vision);
            let y_max = (agent.pos.y as u32 + vision).min(height as u32 - 1);
            for y in y_min..=y_max {
                for x in x_min..=x_max {
                    self.visible.insert(Pos::new(x as u16, y as u16));
                }
            }
        }
        self.explored.extend(self.visible.iter().copied());
    }

    /// Cells seen by at least one agent this tick
    #[inline]
    pub fn visible(&self) -> &HashSet<Pos> {
        &self.visible
    }

    /// Cells seen at any point since construction
    #[inline]
    pub fn explored(&self) -> &HashSet<Pos> {
        &self.explored
    }

    #[inline]
    pub fn is_visible(&self, pos: Pos) -> bool {
        self.visible.contains(&pos)
    }

    #[inline]
    pub fn is_explored(&self, pos: Pos) -> bool {
        self.explored.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SpawnerState;

    #[test]
    fn test_zero_vision_contributes_own_cell() {
        let watcher = Agent::prey(1, Pos::new(4, 4), 0);
        let mut map = VisibilityMap::new();
        map.recompute(&[watcher], 10, 10);

        assert_eq!(map.visible().len(), 1);
        assert!(map.is_visible(Pos::new(4, 4)));
    }

    #[test]
    fn test_vision_box_clips_at_borders() {
        let watcher = Agent::prey(1, Pos::new(0, 0), 2);
        let mut map = VisibilityMap::new();
        map.recompute(&[watcher], 10, 10);

        // quarter box: x and y in 0..=2
        assert_eq!(map.visible().len(), 9);
        assert!(map.is_visible(Pos::new(2, 2)));
        assert!(!map.is_visible(Pos::new(3, 0)));
    }

    #[test]
    fn test_wider_vision_never_shrinks_the_box() {
        let narrow = Agent::prey(1, Pos::new(5, 5), 1);
        let wide = Agent::prey(1, Pos::new(5, 5), 3);

        let mut map_narrow = VisibilityMap::new();
        map_narrow.recompute(&[narrow], 12, 12);
        let mut map_wide = VisibilityMap::new();
        map_wide.recompute(&[wide], 12, 12);

        assert!(map_narrow.visible().is_subset(map_wide.visible()));
        assert_eq!(map_narrow.visible().len(), 9);
        assert_eq!(map_wide.visible().len(), 49);
    }

    #[test]
    fn test_union_across_agents() {
        let a = Agent::prey(1, Pos::new(0, 0), 1);
        let b = Agent::predator(2, Pos::new(9, 9), 1);
        let mut map = VisibilityMap::new();
        map.recompute(&[a, b], 10, 10);

        assert_eq!(map.visible().len(), 8);
        assert!(map.is_visible(Pos::new(1, 1)));
        assert!(map.is_visible(Pos::new(8, 8)));
        assert!(!map.is_visible(Pos::new(5, 5)));
    }

    #[test]
    fn test_visible_replaced_explored_accumulates() {
        let mut watcher = Agent::prey(1, Pos::new(0, 0), 0);
        let mut map = VisibilityMap::new();
        map.recompute(&[watcher.clone()], 10, 10);
        assert!(map.is_visible(Pos::new(0, 0)));

        watcher.pos = Pos::new(5, 5);
        map.recompute(&[watcher], 10, 10);

        assert!(!map.is_visible(Pos::new(0, 0)), "old cells leave the visible set");
        assert!(map.is_visible(Pos::new(5, 5)));
        assert!(map.is_explored(Pos::new(0, 0)), "explored keeps them");
        assert!(map.is_explored(Pos::new(5, 5)));
        assert_eq!(map.explored().len(), 2);
    }

    #[test]
    fn test_sightless_and_dead_agents_contribute_nothing() {
        let spawner = Agent::spawner(1, Pos::new(3, 3), SpawnerState::new(30, 5, true));
        let mut dead = Agent::prey(2, Pos::new(7, 7), 4);
        dead.kill();

        let mut map = VisibilityMap::new();
        map.recompute(&[spawner, dead], 10, 10);
        assert!(map.visible().is_empty());
        assert!(map.explored().is_empty());
    }
}
