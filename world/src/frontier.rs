//! Classification of cells along the contact line between territories.

use katamari_core::{Location, PlayerId};

use crate::Grid;

/// Reports whether `location` is ours and touches at least one cell that is not.
#[must_use]
pub fn is_perimeter(grid: &Grid, player: PlayerId, location: Location) -> bool {
    grid.cell(location).is_owned_by(player)
        && grid
            .neighbors(location)
            .into_iter()
            .any(|neighbor| !grid.cell(neighbor).is_owned_by(player))
}

/// Reports whether `location` is not ours but touches at least one cell that is.
#[must_use]
pub fn is_border(grid: &Grid, player: PlayerId, location: Location) -> bool {
    !grid.cell(location).is_owned_by(player)
        && grid
            .neighbors(location)
            .into_iter()
            .any(|neighbor| grid.cell(neighbor).is_owned_by(player))
}

/// Reports whether `location` is an empty cell wedged between us and an opponent.
///
/// Strength drained to zero on a cell that both sides touch marks the point
/// where the two territories are actively fighting.
#[must_use]
pub fn is_contact(grid: &Grid, player: PlayerId, location: Location) -> bool {
    let cell = grid.cell(location);
    if cell.strength != 0 || cell.is_owned_by(player) {
        return false;
    }

    let mut next_to_mine = false;
    let mut next_to_enemy = false;
    for neighbor in grid.neighbors(location) {
        let neighbor = grid.cell(neighbor);
        next_to_mine |= neighbor.is_owned_by(player);
        next_to_enemy |= neighbor.is_enemy_of(player);
    }
    next_to_mine && next_to_enemy
}

/// Cardinal neighbours of `location` owned by `player`, in cardinal order.
pub fn owned_neighbors(
    grid: &Grid,
    player: PlayerId,
    location: Location,
) -> impl Iterator<Item = Location> + '_ {
    grid.neighbors(location)
        .into_iter()
        .filter(move |neighbor| grid.cell(*neighbor).is_owned_by(player))
}

/// One-pass partition of the grid relative to a player, in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontier {
    perimeter: Vec<Location>,
    interior: Vec<Location>,
    border: Vec<Location>,
    contact: Vec<Location>,
}

impl Frontier {
    /// Classifies every cell on the grid.
    #[must_use]
    pub fn classify(grid: &Grid, player: PlayerId) -> Self {
        let mut frontier = Self::default();

        for location in grid.locations() {
            if grid.cell(location).is_owned_by(player) {
                if is_perimeter(grid, player, location) {
                    frontier.perimeter.push(location);
                } else {
                    frontier.interior.push(location);
                }
                continue;
            }

            if is_border(grid, player, location) {
                frontier.border.push(location);
                if is_contact(grid, player, location) {
                    frontier.contact.push(location);
                }
            }
        }

        frontier
    }

    /// Owned cells touching territory we do not own.
    #[must_use]
    pub fn perimeter(&self) -> &[Location] {
        &self.perimeter
    }

    /// Owned cells surrounded entirely by our own territory.
    #[must_use]
    pub fn interior(&self) -> &[Location] {
        &self.interior
    }

    /// Foreign cells touching our territory; the capture candidates.
    #[must_use]
    pub fn border(&self) -> &[Location] {
        &self.border
    }

    /// Zero-strength border cells that also touch an opponent.
    #[must_use]
    pub fn contact(&self) -> &[Location] {
        &self.contact
    }

    /// Number of cells we own.
    #[must_use]
    pub fn territory(&self) -> usize {
        self.perimeter.len() + self.interior.len()
    }
}
