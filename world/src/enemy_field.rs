//! Enemy-distance field builder used to rank capture targets.

use std::{cmp::Reverse, collections::BinaryHeap};

use katamari_core::{Location, PlayerId};

use crate::Grid;

/// Sentinel stored for cells no enemy can reach through foreign territory.
pub const UNREACHABLE: u32 = u32::MAX;

/// Dense strength-weighted distance grid seeded from every opponent cell.
///
/// Costs accumulate the strength of each cell pushed through on the way out
/// from the nearest enemy mass. Our own cells are walls: they never receive a
/// finite cost and never propagate one, so enclaves sealed off by our
/// territory stay at [`UNREACHABLE`].
#[derive(Clone, Debug, Default)]
pub struct EnemyDistanceField {
    width: u16,
    height: u16,
    costs: Vec<u32>,
}

impl EnemyDistanceField {
    /// Runs a multi-source Dijkstra search from every enemy of `player`.
    #[must_use]
    pub fn build(grid: &Grid, player: PlayerId) -> Self {
        let cell_count = grid.cells().len();
        let mut costs = vec![UNREACHABLE; cell_count];
        let mut visited = vec![false; cell_count];
        let mut horizon = BinaryHeap::new();

        for (index, cell) in grid.cells().iter().enumerate() {
            if cell.is_enemy_of(player) {
                costs[index] = 0;
                horizon.push(Reverse((0_u32, index)));
            }
        }

        while let Some(Reverse((cost, index))) = horizon.pop() {
            if visited[index] {
                continue;
            }
            visited[index] = true;

            for neighbor in grid.neighbors(grid.location_at(index)) {
                let neighbor_index = grid.index(neighbor);
                if visited[neighbor_index] {
                    continue;
                }

                let cell = grid.cell(neighbor);
                if cell.is_owned_by(player) {
                    visited[neighbor_index] = true;
                    continue;
                }

                let next_cost = cost.saturating_add(cell.strength());
                if next_cost < costs[neighbor_index] {
                    costs[neighbor_index] = next_cost;
                    horizon.push(Reverse((next_cost, neighbor_index)));
                }
            }
        }

        Self {
            width: grid.width(),
            height: grid.height(),
            costs,
        }
    }

    /// Cost captured for the location, or `None` when no enemy reaches it.
    #[must_use]
    pub fn cost(&self, location: Location) -> Option<u32> {
        if location.x() >= self.width || location.y() >= self.height {
            return None;
        }

        let index = usize::from(location.y()) * usize::from(self.width) + usize::from(location.x());
        self.costs
            .get(index)
            .copied()
            .filter(|cost| *cost != UNREACHABLE)
    }

    /// Sort key that places unreachable cells after every reachable one.
    #[must_use]
    pub fn rank_key(&self, location: Location) -> u32 {
        self.cost(location).unwrap_or(UNREACHABLE)
    }
}
