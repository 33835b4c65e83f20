#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement of idle territory toward the frontier.
//!
//! Interior cells that nobody claimed this turn drift one step toward the
//! nearest perimeter cell so their strength is useful at the edge. An
//! [`OvercapLedger`] records how much strength each location will receive and
//! vetoes steps that would pile too much into one cell. The crate also hosts
//! the [`PerimeterAssault`] stage used by the simpler strategies.

pub mod assault;
pub mod index;

use std::collections::{HashMap, HashSet};

use katamari_core::{AdjacencyError, ClaimedSet, Direction, Location, Move};
use katamari_world::Grid;
use tracing::{debug, trace};

pub use assault::PerimeterAssault;
pub use index::PerimeterIndex;

const DEFAULT_MIN_STRENGTH: u32 = 50;
const DEFAULT_OVERCAP_LIMIT: u32 = 300;

/// Configuration parameters required to construct the frontier router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    min_strength: u32,
    overcap_limit: u32,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// Cells weaker than `min_strength` stay put to keep producing, and no
    /// step may push the strength headed for a location past `overcap_limit`.
    #[must_use]
    pub const fn new(min_strength: u32, overcap_limit: u32) -> Self {
        Self {
            min_strength,
            overcap_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_STRENGTH, DEFAULT_OVERCAP_LIMIT)
    }
}

/// Strength expected to end the turn on each location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OvercapLedger {
    inbound: HashMap<Location, u32>,
}

impl OvercapLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger reflecting decisions made by earlier stages this turn.
    ///
    /// Every move credits its source strength to the destination; every
    /// claimed cell that is not moving credits its strength to itself.
    #[must_use]
    pub fn seeded(grid: &Grid, moves: &[Move], claimed: &ClaimedSet) -> Self {
        let mut ledger = Self::new();
        let mut moving = HashSet::with_capacity(moves.len());

        for planned in moves {
            let strength = grid.cell(planned.source()).strength();
            ledger.add(grid.step(planned.source(), planned.direction()), strength);
            let _ = moving.insert(grid.step(planned.source(), Direction::Still));
        }

        for location in claimed.iter() {
            let location = grid.step(location, Direction::Still);
            if !moving.contains(&location) {
                ledger.add(location, grid.cell(location).strength());
            }
        }

        ledger
    }

    /// Credits `strength` to `location`.
    pub fn add(&mut self, location: Location, strength: u32) {
        *self.inbound.entry(location).or_default() += strength;
    }

    /// Strength currently headed for `location`.
    #[must_use]
    pub fn inbound(&self, location: Location) -> u32 {
        self.inbound.get(&location).copied().unwrap_or(0)
    }
}

/// Counts describing one routing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteSummary {
    /// Cells that stepped toward the frontier.
    pub moved: usize,
    /// Cells that stayed, either too weak or boxed in by the ledger.
    pub held: usize,
}

/// Pure system that routes unclaimed interior cells toward the perimeter.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontierRouter {
    config: Config,
}

impl FrontierRouter {
    /// Creates a new router using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Routes every unclaimed cell in `interior`, appending moves to `out`.
    ///
    /// Weak cells are booked into the ledger before any strong cell picks a
    /// step, and strong cells are then handled greedily in the given order.
    /// Every routed cell, moving or not, is claimed.
    pub fn route(
        &self,
        grid: &Grid,
        perimeter: &[Location],
        interior: &[Location],
        claimed: &mut ClaimedSet,
        ledger: &mut OvercapLedger,
        out: &mut Vec<Move>,
    ) -> Result<RouteSummary, AdjacencyError> {
        let mut summary = RouteSummary::default();
        let (weak, strong): (Vec<Location>, Vec<Location>) = interior
            .iter()
            .copied()
            .filter(|location| !claimed.contains(*location))
            .partition(|location| grid.cell(*location).strength() < self.config.min_strength);

        for location in weak {
            ledger.add(location, grid.cell(location).strength());
            let _ = claimed.claim(location);
            summary.held += 1;
        }

        let index = PerimeterIndex::build(perimeter);
        for location in strong {
            let strength = grid.cell(location).strength();
            let _ = claimed.claim(location);

            let step = index.nearest(location).and_then(|goal| {
                grid.neighbors(location)
                    .into_iter()
                    .filter(|neighbor| {
                        strength + ledger.inbound(*neighbor) <= self.config.overcap_limit
                    })
                    .min_by_key(|neighbor| grid.distance(*neighbor, goal))
            });

            let Some(destination) = step else {
                trace!(%location, strength, "boxed in, holding");
                ledger.add(location, strength);
                summary.held += 1;
                continue;
            };

            let direction = grid.direction_between(location, destination)?;
            out.push(Move::new(location, direction));
            ledger.add(destination, strength);
            summary.moved += 1;
        }

        debug!(
            moved = summary.moved,
            held = summary.held,
            perimeter = index.len(),
            "frontier routing finished"
        );
        Ok(summary)
    }
}
