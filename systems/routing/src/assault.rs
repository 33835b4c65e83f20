//! Greedy single-cell captures straight off the perimeter.

use katamari_core::{AdjacencyError, ClaimedSet, Location, Move, PlayerId};
use katamari_world::Grid;
use tracing::debug;

/// Pure system that sends each perimeter cell into its weakest foreign neighbour.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerimeterAssault;

impl PerimeterAssault {
    /// Creates a new assault system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Weakest neighbour of `location` that `player` does not own.
    ///
    /// Equal strengths resolve in cardinal order.
    #[must_use]
    pub fn weakest_foreign_neighbor(
        &self,
        grid: &Grid,
        player: PlayerId,
        location: Location,
    ) -> Option<Location> {
        grid.neighbors(location)
            .into_iter()
            .filter(|neighbor| !grid.cell(*neighbor).is_owned_by(player))
            .min_by_key(|neighbor| grid.cell(*neighbor).strength())
    }

    /// Attacks from every unclaimed perimeter cell that is at least as strong
    /// as its weakest foreign neighbour. Returns the number of moves issued.
    pub fn handle(
        &self,
        grid: &Grid,
        player: PlayerId,
        perimeter: &[Location],
        claimed: &mut ClaimedSet,
        out: &mut Vec<Move>,
    ) -> Result<usize, AdjacencyError> {
        let mut issued = 0;

        for location in perimeter {
            if claimed.contains(*location) {
                continue;
            }
            let Some(target) = self.weakest_foreign_neighbor(grid, player, *location) else {
                continue;
            };
            if grid.cell(target).strength() > grid.cell(*location).strength() {
                continue;
            }

            let direction = grid.direction_between(*location, target)?;
            out.push(Move::new(*location, direction));
            let _ = claimed.claim(*location);
            issued += 1;
        }

        debug!(issued, perimeter = perimeter.len(), "perimeter assault finished");
        Ok(issued)
    }
}
