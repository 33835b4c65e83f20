#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Katamari planning engine.
//!
//! This crate defines the vocabulary every other crate speaks. The transport
//! decodes snapshots into [`Cell`] values addressed by [`Location`], the world
//! crate wraps them into a toroidal grid, and the pure planning systems answer
//! with [`Move`] values. Systems coordinate exclusively through a
//! [`ClaimedSet`] threaded explicitly through a single turn's planning pass.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest strength a single cell can hold; anything merged beyond it is lost.
pub const STRENGTH_CEILING: u32 = 255;

/// Identifier of a participant in the game.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Owner assigned to cells that no player controls.
    pub const NEUTRAL: PlayerId = PlayerId(0);

    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Reports whether the identifier denotes unowned territory.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    x: u16,
    y: u16,
}

impl Location {
    /// Creates a new grid location.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the location.
    #[must_use]
    pub const fn x(&self) -> u16 {
        self.x
    }

    /// Zero-based row index of the location.
    #[must_use]
    pub const fn y(&self) -> u16 {
        self.y
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement choices available to a cell each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Keeps the cell's strength in place.
    Still,
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// The four directions that actually leave a cell, in canonical order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Numeric code used by the game's text protocol.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Still => 0,
            Self::North => 1,
            Self::East => 2,
            Self::South => 3,
            Self::West => 4,
        }
    }
}

/// State of a single grid cell within one snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Player controlling the cell, or [`PlayerId::NEUTRAL`].
    pub owner: PlayerId,
    /// Strength currently stationed on the cell.
    pub strength: u8,
    /// Strength the cell regenerates each turn it stays put.
    pub production: u8,
}

impl Cell {
    /// Creates a new cell description.
    #[must_use]
    pub const fn new(owner: PlayerId, strength: u8, production: u8) -> Self {
        Self {
            owner,
            strength,
            production,
        }
    }

    /// Creates an unowned cell with the provided strength and no production.
    #[must_use]
    pub const fn neutral(strength: u8) -> Self {
        Self::new(PlayerId::NEUTRAL, strength, 0)
    }

    /// Strength widened for accumulation arithmetic.
    #[must_use]
    pub const fn strength(&self) -> u32 {
        self.strength as u32
    }

    /// Reports whether the provided player owns the cell.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == player
    }

    /// Reports whether the cell belongs to a player other than `player`.
    #[must_use]
    pub fn is_enemy_of(&self, player: PlayerId) -> bool {
        !self.owner.is_neutral() && self.owner != player
    }
}

/// Decision to move the strength on `source` one step in `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    source: Location,
    direction: Direction,
}

impl Move {
    /// Creates a new move.
    #[must_use]
    pub const fn new(source: Location, direction: Direction) -> Self {
        Self { source, direction }
    }

    /// Cell whose strength moves.
    #[must_use]
    pub const fn source(&self) -> Location {
        self.source
    }

    /// Direction the strength travels in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Facts fixed when the game starts: who we are and how large the board is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    player: PlayerId,
    width: u16,
    height: u16,
}

impl Session {
    /// Creates a new session descriptor.
    #[must_use]
    pub const fn new(player: PlayerId, width: u16, height: u16) -> Self {
        Self {
            player,
            width,
            height,
        }
    }

    /// Player the planner acts for.
    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }
}

/// Locations committed to a move or reserved as a relay during one turn.
///
/// The set only ever grows while a turn is planned. Each planning stage reads
/// it to skip cells an earlier stage already spoke for and writes the cells it
/// consumed before the next stage runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimedSet {
    cells: HashSet<Location>,
}

impl ClaimedSet {
    /// Creates an empty claimed set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the location, returning `false` when it was already claimed.
    pub fn claim(&mut self, location: Location) -> bool {
        self.cells.insert(location)
    }

    /// Reports whether the location has been claimed this turn.
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.cells.contains(&location)
    }

    /// Number of claimed locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether nothing has been claimed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterator over the claimed locations in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Location> + '_ {
        self.cells.iter().copied()
    }
}

impl Extend<Location> for ClaimedSet {
    fn extend<T: IntoIterator<Item = Location>>(&mut self, iter: T) {
        self.cells.extend(iter);
    }
}

impl FromIterator<Location> for ClaimedSet {
    fn from_iter<T: IntoIterator<Item = Location>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Raised when a direction is requested between two cells that do not touch.
///
/// This always indicates a bug in the caller; the planning step that hit it
/// should be abandoned.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{to} is not a cardinal neighbour of {from}")]
pub struct AdjacencyError {
    /// Location the direction was requested from.
    pub from: Location,
    /// Location that was expected to be adjacent.
    pub to: Location,
}

/// Reasons a grid snapshot cannot be assembled.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// One of the dimensions was zero.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// Requested number of columns.
        width: u16,
        /// Requested number of rows.
        height: u16,
    },
    /// The number of supplied cells does not match `width * height`.
    #[error("expected {expected} cells for the grid, got {actual}")]
    CellCountMismatch {
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Cell count actually supplied.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cell, ClaimedSet, Direction, Location, Move, PlayerId};

    #[test]
    fn direction_codes_match_protocol() {
        for (code, direction) in [
            (0, Direction::Still),
            (1, Direction::North),
            (2, Direction::East),
            (3, Direction::South),
            (4, Direction::West),
        ] {
            assert_eq!(direction.code(), code);
        }
    }

    #[test]
    fn default_cell_is_empty_neutral_ground() {
        assert_eq!(PlayerId::default(), PlayerId::NEUTRAL);
        assert_eq!(Cell::default(), Cell::neutral(0));
        assert_eq!(Cell::default().production, 0);
    }

    #[test]
    fn enemy_ownership_excludes_neutral_and_self() {
        let me = PlayerId::new(1);
        assert!(!Cell::neutral(10).is_enemy_of(me));
        assert!(!Cell::new(me, 10, 1).is_enemy_of(me));
        assert!(Cell::new(PlayerId::new(2), 10, 1).is_enemy_of(me));
    }

    #[test]
    fn claiming_twice_reports_duplicate() {
        let mut claimed = ClaimedSet::new();
        assert!(claimed.claim(Location::new(2, 3)));
        assert!(!claimed.claim(Location::new(2, 3)));
        assert_eq!(claimed.len(), 1);
        assert!(claimed.contains(Location::new(2, 3)));
    }

    #[test]
    fn move_round_trips_through_bincode() {
        let original = Move::new(Location::new(7, 4), Direction::West);
        let bytes = bincode::serialize(&original).expect("serialize");
        let restored: Move = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, original);
    }
}
