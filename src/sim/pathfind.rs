//! Pathfinding over the terrain cost grid.
//!
//! The search runs Dijkstra outward from any number of goal roots at once, so
//! "path to the nearest of several goals" is a single query. Step weights are
//! octile: entering a cell costs its `move_cost` times 2 for a cardinal step
//! or times 3 for a diagonal one.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::ecs::components::MapGrid;
use crate::model::tile::TileDb;

const CARDINAL_WEIGHT: u64 = 2;
const DIAGONAL_WEIGHT: u64 = 3;

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Per-cell movement costs snapshot of one map. Cost 0 means impassable.
#[derive(Debug, Clone)]
pub struct CostGrid {
    width: i32,
    height: i32,
    cost: Vec<u64>,
}

impl CostGrid {
    pub fn new(width: i32, height: i32, cost: Vec<u64>) -> Self {
        assert_eq!(cost.len(), (width * height) as usize);
        Self {
            width,
            height,
            cost,
        }
    }

    /// Snapshot a map's `move_cost` layer.
    pub fn from_map(grid: &MapGrid, tiles: &TileDb) -> Self {
        let mut cost = Vec::with_capacity((grid.width() * grid.height()) as usize);
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                cost.push(u64::from(tiles.get(grid.tile_at(x, y)).move_cost));
            }
        }
        Self::new(grid.width(), grid.height(), cost)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    fn at(&self, x: i32, y: i32) -> u64 {
        self.cost[(y * self.width + x) as usize]
    }
}

/// Multi-root shortest-path query over a [`CostGrid`].
pub struct Pathfinder {
    grid: CostGrid,
    roots: Vec<(i32, i32)>,
}

impl Pathfinder {
    pub fn new(grid: CostGrid) -> Self {
        Self {
            grid,
            roots: Vec::new(),
        }
    }

    /// Register a goal cell. Roots outside the grid are ignored.
    pub fn add_root(&mut self, cell: (i32, i32)) {
        if self.grid.in_bounds(cell.0, cell.1) {
            self.roots.push(cell);
        }
    }

    /// Some shortest path from `start` to the nearest reachable root,
    /// inclusive of both endpoints. Empty when no root is reachable. Ties
    /// among equal-cost roots fall to whichever the search settles first.
    pub fn path_from(&self, start: (i32, i32)) -> Vec<(i32, i32)> {
        if !self.grid.in_bounds(start.0, start.1) || self.roots.is_empty() {
            return Vec::new();
        }
        if self.roots.contains(&start) {
            return vec![start];
        }

        // Dijkstra from all roots at once; `came_from` points one step back
        // toward the settling root.
        let mut dist: HashMap<(i32, i32), u64> = HashMap::new();
        let mut came_from: HashMap<(i32, i32), (i32, i32)> = HashMap::new();
        let mut frontier = BinaryHeap::new();
        for &root in &self.roots {
            dist.insert(root, 0);
            frontier.push(Reverse((0u64, root)));
        }

        while let Some(Reverse((d, cell))) = frontier.pop() {
            if d > dist.get(&cell).copied().unwrap_or(u64::MAX) {
                continue;
            }
            if cell == start {
                break;
            }
            for (dx, dy) in NEIGHBORS {
                let next = (cell.0 + dx, cell.1 + dy);
                if !self.grid.in_bounds(next.0, next.1) {
                    continue;
                }
                let step = self.grid.at(next.0, next.1);
                if step == 0 {
                    continue;
                }
                let weight = if dx == 0 || dy == 0 {
                    CARDINAL_WEIGHT
                } else {
                    DIAGONAL_WEIGHT
                };
                let next_dist = d + step * weight;
                if next_dist < dist.get(&next).copied().unwrap_or(u64::MAX) {
                    dist.insert(next, next_dist);
                    came_from.insert(next, cell);
                    frontier.push(Reverse((next_dist, next)));
                }
            }
        }

        if !dist.contains_key(&start) {
            return Vec::new();
        }
        let mut path = vec![start];
        let mut cell = start;
        while let Some(&prev) = came_from.get(&cell) {
            path.push(prev);
            cell = prev;
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: i32, height: i32) -> CostGrid {
        CostGrid::new(width, height, vec![100; (width * height) as usize])
    }

    #[test]
    fn straight_path_to_single_root() {
        let mut pf = Pathfinder::new(open_grid(5, 5));
        pf.add_root((4, 2));
        let path = pf.path_from((0, 2));
        assert_eq!(path.first(), Some(&(0, 2)));
        assert_eq!(path.last(), Some(&(4, 2)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn diagonal_steps_cost_more_than_cardinal() {
        // Reaching (2, 2) from (0, 0): two diagonals cost 2 * 3 * 100 = 600,
        // four cardinals cost 4 * 2 * 100 = 800. Diagonals win.
        let mut pf = Pathfinder::new(open_grid(5, 5));
        pf.add_root((2, 2));
        let path = pf.path_from((0, 0));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn nearest_of_several_roots_wins() {
        let mut pf = Pathfinder::new(open_grid(9, 1));
        pf.add_root((8, 0));
        pf.add_root((3, 0));
        let path = pf.path_from((1, 0));
        assert_eq!(path.last(), Some(&(3, 0)));
    }

    #[test]
    fn walls_are_routed_around() {
        // A vertical wall with a gap at the bottom.
        let mut cost = vec![100u64; 25];
        for y in 0..4 {
            cost[(y * 5 + 2) as usize] = 0;
        }
        let mut pf = Pathfinder::new(CostGrid::new(5, 5, cost));
        pf.add_root((4, 0));
        let path = pf.path_from((0, 0));
        assert_eq!(path.last(), Some(&(4, 0)));
        assert!(path.iter().all(|&(x, y)| !(x == 2 && y < 4)));
        assert!(path.len() > 5);
    }

    #[test]
    fn unreachable_root_yields_empty_path() {
        // Solid wall straight across.
        let mut cost = vec![100u64; 25];
        for y in 0..5 {
            cost[(y * 5 + 2) as usize] = 0;
        }
        let mut pf = Pathfinder::new(CostGrid::new(5, 5, cost));
        pf.add_root((4, 2));
        assert!(pf.path_from((0, 2)).is_empty());
    }

    #[test]
    fn standing_on_a_root_is_a_one_cell_path() {
        let mut pf = Pathfinder::new(open_grid(3, 3));
        pf.add_root((1, 1));
        assert_eq!(pf.path_from((1, 1)), vec![(1, 1)]);
    }

    #[test]
    fn no_roots_means_no_path() {
        let pf = Pathfinder::new(open_grid(3, 3));
        assert!(pf.path_from((0, 0)).is_empty());
    }
}
