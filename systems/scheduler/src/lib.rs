#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn scheduler that runs one aggregation search per ranked border cell.

use katamari_core::{AdjacencyError, ClaimedSet, Location, Move, PlayerId};
use katamari_system_aggregation::{self as aggregation, StrengthAggregation};
use katamari_world::{EnemyDistanceField, Grid};
use tracing::{debug, trace};

/// Order in which border cells are offered to the aggregation search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetRanking {
    /// Weakest defenders first.
    Strength,
    /// Cells closest to an opponent, measured by strength pushed through, first.
    #[default]
    EnemyDistance,
}

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    ranking: TargetRanking,
    counter_reinforcement: bool,
}

impl Config {
    /// Creates a new configuration using the provided ranking and requirement rule.
    #[must_use]
    pub const fn new(ranking: TargetRanking, counter_reinforcement: bool) -> Self {
        Self {
            ranking,
            counter_reinforcement,
        }
    }
}

/// Counts describing one scheduling pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScheduleSummary {
    /// Border cells offered to the search.
    pub targets: usize,
    /// Targets that produced a move.
    pub scheduled: usize,
    /// Cells newly claimed as movers or relays.
    pub consumed: usize,
}

/// Pure system that turns ranked border cells into capture moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnScheduler {
    ranking: TargetRanking,
    search: StrengthAggregation,
}

impl TurnScheduler {
    /// Creates a new scheduler using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            ranking: config.ranking,
            search: StrengthAggregation::new(aggregation::Config::new(
                config.counter_reinforcement,
            )),
        }
    }

    /// Orders `border` according to the configured ranking.
    ///
    /// The sort is stable, so cells with equal keys keep their incoming order.
    /// Under [`TargetRanking::EnemyDistance`] cells no opponent can reach are
    /// placed last.
    #[must_use]
    pub fn rank_targets(
        &self,
        grid: &Grid,
        player: PlayerId,
        border: &[Location],
    ) -> Vec<Location> {
        let mut ranked = border.to_vec();
        match self.ranking {
            TargetRanking::Strength => {
                ranked.sort_by_key(|location| grid.cell(*location).strength());
            }
            TargetRanking::EnemyDistance => {
                let field = EnemyDistanceField::build(grid, player);
                ranked.sort_by_key(|location| field.rank_key(*location));
            }
        }
        ranked
    }

    /// Schedules captures for `border`, appending moves to `out`.
    ///
    /// Each successful search claims its mover and relays before the next
    /// target is considered, so no cell is committed twice. Targets without
    /// enough reachable strength are skipped.
    pub fn schedule(
        &self,
        grid: &Grid,
        player: PlayerId,
        border: &[Location],
        claimed: &mut ClaimedSet,
        out: &mut Vec<Move>,
    ) -> Result<ScheduleSummary, AdjacencyError> {
        let mut summary = ScheduleSummary::default();

        for target in self.rank_targets(grid, player, border) {
            summary.targets += 1;

            let Some(found) = self.search.search(grid, player, target, claimed)? else {
                trace!(%target, "target skipped");
                continue;
            };

            out.push(found.mover());
            for location in found.consumed() {
                if claimed.claim(*location) {
                    summary.consumed += 1;
                }
            }
            summary.scheduled += 1;
        }

        debug!(
            targets = summary.targets,
            scheduled = summary.scheduled,
            consumed = summary.consumed,
            "scheduler finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use katamari_core::Cell;

    const ME: PlayerId = PlayerId::new(1);

    #[test]
    fn strength_ranking_is_stable() {
        let grid = Grid::from_fn(4, 1, |_| Cell::neutral(9))
            .expect("valid grid")
            .with_cell(Location::new(2, 0), Cell::neutral(1));
        let scheduler = TurnScheduler::new(Config::new(TargetRanking::Strength, false));
        let border = [
            Location::new(3, 0),
            Location::new(0, 0),
            Location::new(2, 0),
            Location::new(1, 0),
        ];

        assert_eq!(
            scheduler.rank_targets(&grid, ME, &border),
            vec![
                Location::new(2, 0),
                Location::new(3, 0),
                Location::new(0, 0),
                Location::new(1, 0),
            ]
        );
    }

    #[test]
    fn empty_border_schedules_nothing() {
        let grid = Grid::from_fn(2, 2, |_| Cell::new(ME, 10, 1)).expect("valid grid");
        let mut claimed = ClaimedSet::new();
        let mut moves = Vec::new();

        let summary = TurnScheduler::default()
            .schedule(&grid, ME, &[], &mut claimed, &mut moves)
            .expect("nothing to search");

        assert_eq!(summary, ScheduleSummary::default());
        assert!(moves.is_empty());
        assert!(claimed.is_empty());
    }
}
