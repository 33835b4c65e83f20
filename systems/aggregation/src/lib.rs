#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Backward search that gathers enough friendly strength to take one cell.
//!
//! The search starts at the capture target and walks outwards through our
//! territory, cheapest remaining need first. Each friendly cell it passes
//! through becomes a relay that will merge its strength forward next turn; the
//! first cell strong enough to cover whatever is still missing becomes the
//! mover and steps onto the cell it was discovered from.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashSet},
};

use katamari_core::{AdjacencyError, ClaimedSet, Location, Move, PlayerId};
use katamari_world::{frontier::owned_neighbors, Grid};
use tracing::{debug, trace};

/// Configuration parameters required to construct the aggregation search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    counter_reinforcement: bool,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// With `counter_reinforcement` enabled the strength required to take a
    /// target also covers every enemy cell touching it, since those cells can
    /// pour their strength in on the same turn.
    #[must_use]
    pub const fn new(counter_reinforcement: bool) -> Self {
        Self {
            counter_reinforcement,
        }
    }
}

/// Successful outcome of a search: one move plus every cell it relies on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregation {
    mover: Move,
    consumed: Vec<Location>,
    required: u32,
}

impl Aggregation {
    /// The only move issued this turn for the aggregation.
    #[must_use]
    pub const fn mover(&self) -> Move {
        self.mover
    }

    /// Relays ordered from the one touching the target outwards, followed by
    /// the mover. The target itself is never included.
    #[must_use]
    pub fn consumed(&self) -> &[Location] {
        &self.consumed
    }

    /// Strength the search had to exceed when it started.
    #[must_use]
    pub const fn required(&self) -> u32 {
        self.required
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    remaining: u32,
    sequence: u64,
    node: usize,
}

#[derive(Clone, Copy, Debug)]
struct Node {
    location: Location,
    parent: Option<usize>,
}

/// Pure system that plans single-target captures.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrengthAggregation {
    config: Config,
}

impl StrengthAggregation {
    /// Creates a new aggregation search using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Strength that must be exceeded to take `target` this turn.
    #[must_use]
    pub fn required_strength(&self, grid: &Grid, player: PlayerId, target: Location) -> u32 {
        let defence = grid.cell(target).strength();
        if !self.config.counter_reinforcement {
            return defence;
        }

        grid.neighbors(target)
            .into_iter()
            .map(|neighbor| grid.cell(neighbor))
            .filter(|cell| cell.is_enemy_of(player))
            .fold(defence, |total, cell| total + cell.strength())
    }

    /// Searches for a mover able to capture `target`.
    ///
    /// Returns `Ok(None)` when the connected friendly strength reachable
    /// without touching `claimed` cannot exceed the requirement. Nothing is
    /// consumed in that case.
    pub fn search(
        &self,
        grid: &Grid,
        player: PlayerId,
        target: Location,
        claimed: &ClaimedSet,
    ) -> Result<Option<Aggregation>, AdjacencyError> {
        let required = self.required_strength(grid, player, target);
        trace!(%target, required, "aggregation search started");

        let mut nodes = vec![Node {
            location: target,
            parent: None,
        }];
        let mut visited = HashSet::from([target]);
        let mut horizon = BinaryHeap::from([Reverse(Pending {
            remaining: required,
            sequence: 0,
            node: 0,
        })]);
        let mut sequence = 1_u64;

        while let Some(Reverse(pending)) = horizon.pop() {
            let candidate = nodes[pending.node].location;

            for neighbor in owned_neighbors(grid, player, candidate) {
                if visited.contains(&neighbor) || claimed.contains(neighbor) {
                    continue;
                }

                let strength = grid.cell(neighbor).strength();
                if strength > pending.remaining {
                    let direction = grid.direction_between(neighbor, candidate)?;
                    let consumed = consumed_path(&nodes, pending.node, neighbor);
                    debug!(
                        %target,
                        mover = %neighbor,
                        required,
                        relays = consumed.len() - 1,
                        "aggregation found a mover"
                    );
                    return Ok(Some(Aggregation {
                        mover: Move::new(neighbor, direction),
                        consumed,
                        required,
                    }));
                }

                let _ = visited.insert(neighbor);
                let node = nodes.len();
                nodes.push(Node {
                    location: neighbor,
                    parent: Some(pending.node),
                });
                horizon.push(Reverse(Pending {
                    remaining: pending.remaining - strength,
                    sequence,
                    node,
                }));
                sequence += 1;
            }
        }

        debug!(%target, required, explored = nodes.len() - 1, "insufficient strength");
        Ok(None)
    }
}

/// Walks parent links from `from` back to the root, excluding the root itself.
fn consumed_path(nodes: &[Node], from: usize, mover: Location) -> Vec<Location> {
    let mut relays = Vec::new();
    let mut cursor = Some(from);
    while let Some(index) = cursor {
        let node = nodes[index];
        if node.parent.is_none() {
            break;
        }
        relays.push(node.location);
        cursor = node.parent;
    }
    relays.reverse();
    relays.push(mover);
    relays
}

#[cfg(test)]
mod tests {
    use super::*;
    use katamari_core::Cell;

    const ME: PlayerId = PlayerId::new(1);
    const THEM: PlayerId = PlayerId::new(2);

    #[test]
    fn requirement_counts_adjacent_enemies_only_when_enabled() {
        let target = Location::new(2, 2);
        let grid = Grid::from_fn(5, 5, |_| Cell::neutral(1))
            .expect("valid grid")
            .with_cell(target, Cell::neutral(7))
            .with_cell(Location::new(2, 1), Cell::new(THEM, 30, 1))
            .with_cell(Location::new(3, 2), Cell::new(THEM, 12, 1))
            .with_cell(Location::new(1, 2), Cell::new(ME, 200, 1));

        let plain = StrengthAggregation::default();
        let guarded = StrengthAggregation::new(Config::new(true));

        assert_eq!(plain.required_strength(&grid, ME, target), 7);
        assert_eq!(guarded.required_strength(&grid, ME, target), 49);
    }

    #[test]
    fn pending_entries_pop_lowest_need_then_oldest() {
        let mut heap = BinaryHeap::new();
        for (remaining, sequence) in [(9, 0), (4, 2), (4, 1), (6, 3)] {
            heap.push(Reverse(Pending {
                remaining,
                sequence,
                node: 0,
            }));
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|Reverse(pending)| (pending.remaining, pending.sequence))
            .collect();
        assert_eq!(order, vec![(4, 1), (4, 2), (6, 3), (9, 0)]);
    }

    #[test]
    fn consumed_path_excludes_root() {
        let nodes = [
            Node {
                location: Location::new(0, 0),
                parent: None,
            },
            Node {
                location: Location::new(1, 0),
                parent: Some(0),
            },
            Node {
                location: Location::new(2, 0),
                parent: Some(1),
            },
        ];
        assert_eq!(
            consumed_path(&nodes, 2, Location::new(3, 0)),
            vec![
                Location::new(1, 0),
                Location::new(2, 0),
                Location::new(3, 0)
            ]
        );
        assert_eq!(
            consumed_path(&nodes, 0, Location::new(0, 1)),
            vec![Location::new(0, 1)]
        );
    }
}
