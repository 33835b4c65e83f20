//! Named presets selecting which planning stages run each turn.

use std::{fmt, str::FromStr};

use katamari_system_scheduler::TargetRanking;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Composition of planning stages used for a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Perimeter cells attack their weakest neighbour; nothing else moves.
    Amoeba,
    /// Perimeter assault followed by interior routing that ignores overcap.
    Lance,
    /// Perimeter assault followed by frontier routing of the interior.
    ThermalLance,
    /// Aggregated captures of the weakest border cells first.
    Katamari,
    /// Aggregated captures ranked by distance to the enemy, counting enemy
    /// reinforcements against each target.
    Damacy,
    /// Battle cascades first, then the damacy captures.
    PointDefense,
    /// Battle cascades, damacy captures and frontier routing.
    #[default]
    Combined,
}

impl Strategy {
    /// Every preset, in the order they are listed to users.
    pub const ALL: [Strategy; 7] = [
        Strategy::Amoeba,
        Strategy::Lance,
        Strategy::ThermalLance,
        Strategy::Katamari,
        Strategy::Damacy,
        Strategy::PointDefense,
        Strategy::Combined,
    ];

    /// Kebab-case name used on the command line and in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Amoeba => "amoeba",
            Self::Lance => "lance",
            Self::ThermalLance => "thermal-lance",
            Self::Katamari => "katamari",
            Self::Damacy => "damacy",
            Self::PointDefense => "point-defense",
            Self::Combined => "combined",
        }
    }

    /// Reports whether contact points are served by the battle allocator.
    #[must_use]
    pub const fn fights_battles(self) -> bool {
        matches!(self, Self::PointDefense | Self::Combined)
    }

    /// Reports whether perimeter cells attack on their own.
    #[must_use]
    pub const fn assaults_perimeter(self) -> bool {
        matches!(self, Self::Amoeba | Self::Lance | Self::ThermalLance)
    }

    /// Ranking used by the turn scheduler, or `None` when it does not run.
    #[must_use]
    pub const fn target_ranking(self) -> Option<TargetRanking> {
        match self {
            Self::Amoeba | Self::Lance | Self::ThermalLance => None,
            Self::Katamari => Some(TargetRanking::Strength),
            Self::Damacy | Self::PointDefense | Self::Combined => {
                Some(TargetRanking::EnemyDistance)
            }
        }
    }

    /// Reports whether enemy strength next to a target raises its requirement.
    #[must_use]
    pub const fn counter_reinforcement(self) -> bool {
        matches!(self, Self::Damacy | Self::PointDefense | Self::Combined)
    }

    /// Reports whether idle interior cells are routed toward the perimeter.
    #[must_use]
    pub const fn routes_interior(self) -> bool {
        matches!(self, Self::Lance | Self::ThermalLance | Self::Combined)
    }

    /// Reports whether the router refuses steps that would pile strength past
    /// the overcap limit.
    #[must_use]
    pub const fn vetoes_overcap(self) -> bool {
        !matches!(self, Self::Lance)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a strategy name does not match any preset.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown strategy `{0}`, expected one of amoeba, lance, thermal-lance, katamari, damacy, point-defense, combined")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == value)
            .ok_or_else(|| UnknownStrategy(value.to_owned()))
    }
}
