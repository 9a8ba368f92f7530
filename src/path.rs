//! Weighted shortest-path search over the grid.
//!
//! A* with Manhattan heuristic. Edge weight is the terrain cost of the cell
//! being entered; obstacle cells are not part of the graph. The heuristic is
//! admissible while every terrain cost stays >= 1; cheaper terrain breaks
//! admissibility and is accepted as-is.

use crate::grid::{Grid, Pos};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Frontier entry ordered by f-cost, then by insertion order.
/// `BinaryHeap` is a max-heap, so the comparison is reversed on both keys.
struct FrontierEntry {
    f: f32,
    g: f32,
    seq: u64,
    pos: Pos,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Find the cheapest 4-connected path from `start` to `goal`, both inclusive.
///
/// Returns None when the goal is an obstacle or unreachable. `start == goal`
/// short-circuits to a single-element path before the blocked-goal check.
/// Ties between equally-priced frontier entries always resolve to the one
/// inserted first, so repeated searches on an unchanged grid return the same
/// path.
pub fn find_path(grid: &Grid, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if start == goal {
        return Some(vec![start]);
    }
    if grid.is_blocked(goal) {
        return None;
    }

    let mut frontier = BinaryHeap::new();
    let mut came_from: HashMap<Pos, Pos> = HashMap::new();
    let mut cost_so_far: HashMap<Pos, f32> = HashMap::new();
    let mut seq = 0u64;

    cost_so_far.insert(start, 0.0);
    frontier.push(FrontierEntry {
        f: start.manhattan(goal) as f32,
        g: 0.0,
        seq,
        pos: start,
    });

    while let Some(entry) = frontier.pop() {
        let current = entry.pos;
        if current == goal {
            return Some(reconstruct(&came_from, goal));
        }
        // A cheaper route to this cell was relaxed after this entry was
        // queued; expanding it again could not improve anything.
        let best = cost_so_far.get(&current).copied().unwrap_or(f32::INFINITY);
        if entry.g > best {
            continue;
        }

        for next in grid.neighbors4(current) {
            let new_cost = best + grid.movement_cost(next);
            let known = cost_so_far.get(&next).copied().unwrap_or(f32::INFINITY);
            if new_cost < known {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                seq += 1;
                frontier.push(FrontierEntry {
                    f: new_cost + next.manhattan(goal) as f32,
                    g: new_cost,
                    seq,
                    pos: next,
                });
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Pos, Pos>, goal: Pos) -> Vec<Pos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        path.push(current);
    }
    path.reverse();
    path
}
