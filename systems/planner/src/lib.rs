#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn planner composing the individual systems into one decision pass.
//!
//! A [`Planner`] is built once per game from the [`Session`] and a
//! [`PlannerConfig`]. Every turn it classifies the snapshot, runs the stages
//! its [`Strategy`] selects in a fixed order and threads a single
//! [`ClaimedSet`] through them, so a cell committed by an earlier stage is
//! never moved by a later one.

mod config;
mod strategy;

use std::collections::HashSet;

use katamari_core::{AdjacencyError, ClaimedSet, Location, Move, Session};
use katamari_system_battle::BattleAllocator;
use katamari_system_routing::{FrontierRouter, OvercapLedger, PerimeterAssault};
use katamari_system_scheduler::TurnScheduler;
use katamari_world::{Frontier, Grid};
use thiserror::Error;
use tracing::debug;

pub use config::PlannerConfig;
pub use strategy::{Strategy, UnknownStrategy};

/// Reasons a turn could not be planned.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// A stage asked for a direction between cells that do not touch.
    #[error(transparent)]
    Adjacency(#[from] AdjacencyError),
    /// The snapshot does not have the dimensions announced at startup.
    #[error("snapshot is {actual_width}x{actual_height}, session expects {width}x{height}")]
    DimensionMismatch {
        /// Columns announced at startup.
        width: u16,
        /// Rows announced at startup.
        height: u16,
        /// Columns in the snapshot.
        actual_width: u16,
        /// Rows in the snapshot.
        actual_height: u16,
    },
    /// Two stages produced a move for the same cell.
    #[error("{location} was given more than one move")]
    DuplicateSource {
        /// Cell that was moved twice.
        location: Location,
    },
}

/// Outcome of planning a single turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnPlan {
    moves: Vec<Move>,
    frontier: Frontier,
    claimed: usize,
}

impl TurnPlan {
    /// Moves to send, in the order the stages produced them.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Classification of the snapshot the plan was made for.
    #[must_use]
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Number of cells committed by any stage.
    #[must_use]
    pub const fn claimed(&self) -> usize {
        self.claimed
    }

    /// Consumes the plan and returns its moves.
    #[must_use]
    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }
}

/// Planner holding the per-game session and stage configuration.
#[derive(Clone, Debug)]
pub struct Planner {
    session: Session,
    config: PlannerConfig,
    battles: BattleAllocator,
    assault: PerimeterAssault,
    scheduler: Option<TurnScheduler>,
    router: FrontierRouter,
}

impl Planner {
    /// Creates a planner for `session` using the supplied configuration.
    #[must_use]
    pub fn new(session: Session, config: PlannerConfig) -> Self {
        Self {
            session,
            config,
            battles: BattleAllocator::new(config.battle()),
            assault: PerimeterAssault::new(),
            scheduler: config.scheduler().map(TurnScheduler::new),
            router: FrontierRouter::new(config.routing()),
        }
    }

    /// Plans every move for one snapshot.
    pub fn plan_turn(&self, grid: &Grid) -> Result<TurnPlan, PlanError> {
        if grid.width() != self.session.width() || grid.height() != self.session.height() {
            return Err(PlanError::DimensionMismatch {
                width: self.session.width(),
                height: self.session.height(),
                actual_width: grid.width(),
                actual_height: grid.height(),
            });
        }

        let player = self.session.player();
        let strategy = self.config.strategy;
        let frontier = Frontier::classify(grid, player);
        let mut claimed = ClaimedSet::new();
        let mut moves = Vec::new();

        if strategy.fights_battles() {
            let served =
                self.battles
                    .handle(grid, player, frontier.contact(), &mut claimed, &mut moves)?;
            debug!(served, contacts = frontier.contact().len(), "battle stage done");
        }

        if strategy.assaults_perimeter() {
            let _ = self.assault.handle(
                grid,
                player,
                frontier.perimeter(),
                &mut claimed,
                &mut moves,
            )?;
        }

        if let Some(scheduler) = &self.scheduler {
            let _ = scheduler.schedule(grid, player, frontier.border(), &mut claimed, &mut moves)?;
        }

        if strategy.routes_interior() {
            let mut ledger = OvercapLedger::seeded(grid, &moves, &claimed);
            let _ = self.router.route(
                grid,
                frontier.perimeter(),
                frontier.interior(),
                &mut claimed,
                &mut ledger,
                &mut moves,
            )?;
        }

        ensure_unique_sources(grid, &moves)?;
        debug!(
            %strategy,
            moves = moves.len(),
            claimed = claimed.len(),
            "turn planned"
        );

        Ok(TurnPlan {
            moves,
            frontier,
            claimed: claimed.len(),
        })
    }
}

fn ensure_unique_sources(grid: &Grid, moves: &[Move]) -> Result<(), PlanError> {
    let mut seen = HashSet::with_capacity(moves.len());
    for planned in moves {
        let location = grid.location_at(grid.index(planned.source()));
        if !seen.insert(location) {
            return Err(PlanError::DuplicateSource { location });
        }
    }
    Ok(())
}
