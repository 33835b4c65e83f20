//! Tunable parameters of the planner, loadable from a configuration file.

use katamari_core::STRENGTH_CEILING;
use katamari_system_battle as battle;
use katamari_system_routing as routing;
use katamari_system_scheduler as scheduler;
use serde::{Deserialize, Serialize};

use crate::Strategy;

/// Planner settings. Every field falls back to its default when omitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Stage composition used every turn.
    pub strategy: Strategy,
    /// Contact points served by the battle allocator per turn.
    pub max_battles: usize,
    /// Breadth-first depth explored around each contact point.
    pub battle_depth: u32,
    /// Strength a battle pull may not reach in a single cell.
    pub strength_ceiling: u32,
    /// Interior cells weaker than this hold position instead of routing.
    pub router_min_strength: u32,
    /// Largest strength the router lets converge on one location.
    pub overcap_limit: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_battles: 1,
            battle_depth: 10,
            strength_ceiling: STRENGTH_CEILING,
            router_min_strength: 50,
            overcap_limit: 300,
        }
    }
}

impl PlannerConfig {
    /// Returns the configuration with `strategy` swapped in.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub(crate) const fn battle(&self) -> battle::Config {
        battle::Config::new(self.max_battles, self.battle_depth, self.strength_ceiling)
    }

    pub(crate) const fn routing(&self) -> routing::Config {
        let overcap_limit = if self.strategy.vetoes_overcap() {
            self.overcap_limit
        } else {
            u32::MAX
        };
        routing::Config::new(self.router_min_strength, overcap_limit)
    }

    pub(crate) fn scheduler(&self) -> Option<scheduler::Config> {
        self.strategy.target_ranking().map(|ranking| {
            scheduler::Config::new(ranking, self.strategy.counter_reinforcement())
        })
    }
}
