#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-turn bookkeeping of how the territory is doing.
//!
//! Reports are derived from the snapshot and the moves already decided. They
//! are written to the log and never read back by the planner.

use std::collections::HashSet;

use katamari_core::{Move, PlayerId};
use katamari_world::{Frontier, Grid};
use serde::Serialize;

/// Summary of one planned turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Turn number, starting at 1 for the first planned frame.
    pub turn: u32,
    /// Cells we own.
    pub territory: usize,
    /// Strength stationed across our territory.
    pub total_strength: u32,
    /// Strength our territory produces per turn.
    pub total_production: u32,
    /// Owned cells touching foreign territory.
    pub perimeter: usize,
    /// Foreign cells touching our territory.
    pub border: usize,
    /// Zero-strength cells fought over with an opponent.
    pub contacts: usize,
    /// Moves issued this turn.
    pub moves: usize,
    /// Owned cells left without a move.
    pub idle: usize,
}

impl TurnReport {
    /// Builds the report for `moves` planned on `grid`.
    #[must_use]
    pub fn compute(
        turn: u32,
        grid: &Grid,
        player: PlayerId,
        frontier: &Frontier,
        moves: &[Move],
    ) -> Self {
        let (total_strength, total_production) = grid
            .cells()
            .iter()
            .filter(|cell| cell.is_owned_by(player))
            .fold((0, 0), |(strength, production), cell| {
                (strength + cell.strength(), production + u32::from(cell.production))
            });

        let movers: HashSet<_> = moves
            .iter()
            .map(Move::source)
            .filter(|source| grid.cell(*source).is_owned_by(player))
            .collect();
        let territory = frontier.territory();

        Self {
            turn,
            territory,
            total_strength,
            total_production,
            perimeter: frontier.perimeter().len(),
            border: frontier.border().len(),
            contacts: frontier.contact().len(),
            moves: moves.len(),
            idle: territory.saturating_sub(movers.len()),
        }
    }
}

/// Pure analytics system that tracks reports across a session.
#[derive(Debug, Default)]
pub struct Analytics {
    turns: u32,
    peak_territory: usize,
    last_report: Option<TurnReport>,
}

impl Analytics {
    /// Creates a new analytics system with no recorded turns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of the next turn and returns its report.
    pub fn record(
        &mut self,
        grid: &Grid,
        player: PlayerId,
        frontier: &Frontier,
        moves: &[Move],
    ) -> TurnReport {
        self.turns += 1;
        let report = TurnReport::compute(self.turns, grid, player, frontier, moves);
        self.peak_territory = self.peak_territory.max(report.territory);
        self.last_report = Some(report);
        report
    }

    /// Number of turns recorded so far.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Largest territory observed in any recorded turn.
    #[must_use]
    pub const fn peak_territory(&self) -> usize {
        self.peak_territory
    }

    /// Returns the last report recorded, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&TurnReport> {
        self.last_report.as_ref()
    }
}
