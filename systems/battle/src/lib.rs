#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cascade allocator that pulls friendly strength toward contact points.
//!
//! Starting from a contact cell the allocator floods our territory breadth
//! first. Every friendly cell it meets is either pulled one step toward the
//! cell it was discovered from, when that keeps the strength gathered there
//! under the ceiling, or left settled in place. Either way the cell is claimed
//! so later stages leave it alone for the rest of the turn.

use std::collections::VecDeque;

use katamari_core::{AdjacencyError, ClaimedSet, Location, Move, PlayerId, STRENGTH_CEILING};
use katamari_world::{frontier::owned_neighbors, Grid};
use tracing::{debug, trace};

const DEFAULT_MAX_BATTLES: usize = 1;
const DEFAULT_DEPTH_LIMIT: u32 = 10;

/// Configuration parameters required to construct the battle allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_battles: usize,
    depth_limit: u32,
    strength_ceiling: u32,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// `max_battles` caps how many contact points are served per turn,
    /// `depth_limit` bounds how far from a contact point cells are expanded,
    /// and nothing is pulled into a cell once it would reach `strength_ceiling`.
    #[must_use]
    pub const fn new(max_battles: usize, depth_limit: u32, strength_ceiling: u32) -> Self {
        Self {
            max_battles,
            depth_limit,
            strength_ceiling,
        }
    }

    /// Maximum number of contact points served in one turn.
    #[must_use]
    pub const fn max_battles(&self) -> usize {
        self.max_battles
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BATTLES, DEFAULT_DEPTH_LIMIT, STRENGTH_CEILING)
    }
}

/// Moves and claims produced for a single contact point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleAssignment {
    moves: Vec<Move>,
    claimed: Vec<Location>,
}

impl BattleAssignment {
    /// Pull moves in the order they were decided.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Friendly cells committed to the battle, pulled or settled.
    #[must_use]
    pub fn claimed(&self) -> &[Location] {
        &self.claimed
    }
}

/// Pure system that routes strength into active battles.
#[derive(Clone, Copy, Debug, Default)]
pub struct BattleAllocator {
    config: Config,
}

impl BattleAllocator {
    /// Creates a new allocator using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Serves contact points in the given order, up to the configured maximum.
    ///
    /// Each battle sees the cells claimed by the battles before it. Returns
    /// the number of battles that were served.
    pub fn handle(
        &self,
        grid: &Grid,
        player: PlayerId,
        contacts: &[Location],
        claimed: &mut ClaimedSet,
        out: &mut Vec<Move>,
    ) -> Result<usize, AdjacencyError> {
        let mut served = 0;

        for contact in contacts.iter().take(self.config.max_battles) {
            let assignment = self.assign(grid, player, *contact, claimed)?;
            debug!(
                %contact,
                pulled = assignment.moves.len(),
                claimed = assignment.claimed.len(),
                "battle assigned"
            );
            out.extend_from_slice(&assignment.moves);
            claimed.extend(assignment.claimed);
            served += 1;
        }

        Ok(served)
    }

    /// Plans the pull cascade for one contact point.
    ///
    /// Cells already in `claimed` are treated as absent: they are neither
    /// pulled nor expanded through.
    pub fn assign(
        &self,
        grid: &Grid,
        player: PlayerId,
        contact: Location,
        claimed: &ClaimedSet,
    ) -> Result<BattleAssignment, AdjacencyError> {
        let cell_count = grid.cells().len();
        let mut visited = vec![false; cell_count];
        let mut assigned = vec![false; cell_count];
        let mut gathered = vec![0_u32; cell_count];
        let mut assignment = BattleAssignment::default();

        let mut unexplored = VecDeque::from([(contact, 0_u32)]);
        visited[grid.index(contact)] = true;

        while let Some((current, depth)) = unexplored.pop_front() {
            let current_index = grid.index(current);
            let cell = grid.cell(current);

            if !assigned[current_index] {
                // Nobody closer to the battle pulled this cell, so it holds.
                gathered[current_index] += cell.strength();
                assigned[current_index] = true;
                if cell.is_owned_by(player) {
                    assignment.claimed.push(current);
                }
            }

            for neighbor in owned_neighbors(grid, player, current) {
                let neighbor_index = grid.index(neighbor);
                if visited[neighbor_index] || claimed.contains(neighbor) {
                    continue;
                }
                visited[neighbor_index] = true;

                let strength = grid.cell(neighbor).strength();
                if strength + gathered[current_index] < self.config.strength_ceiling {
                    let direction = grid.direction_between(neighbor, current)?;
                    assignment.moves.push(Move::new(neighbor, direction));
                    assignment.claimed.push(neighbor);
                    assigned[neighbor_index] = true;
                    gathered[current_index] += strength;
                    trace!(from = %neighbor, into = %current, depth, "pulled toward battle");
                }

                if depth < self.config.depth_limit {
                    unexplored.push_back((neighbor, depth + 1));
                }
            }
        }

        Ok(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use katamari_core::Cell;

    #[test]
    fn default_serves_a_single_battle_ten_deep() {
        let config = Config::default();
        assert_eq!(config.max_battles(), 1);
        assert_eq!(config, Config::new(1, 10, 255));
    }

    #[test]
    fn isolated_contact_produces_nothing() {
        let grid = Grid::from_fn(3, 3, |_| Cell::neutral(0)).expect("valid grid");
        let assignment = BattleAllocator::default()
            .assign(&grid, PlayerId::new(1), Location::new(1, 1), &ClaimedSet::new())
            .expect("no directions requested");
        assert_eq!(assignment, BattleAssignment::default());
    }
}
