#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Toroidal grid model and the read-only queries built on top of it.
//!
//! A [`Grid`] is assembled once per turn from a decoded snapshot and never
//! mutated afterwards; planning systems only ever read it. Every coordinate
//! operation wraps around both axes, so neighbour lookups cannot fail.

pub mod dump;
pub mod enemy_field;
pub mod frontier;

use katamari_core::{AdjacencyError, Cell, Direction, GridError, Location};

pub use dump::{Layer, LayerDump};
pub use enemy_field::EnemyDistanceField;
pub use frontier::Frontier;

/// Immutable snapshot of every cell on the torus, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Wraps the provided row-major cells into a grid.
    pub fn new(width: u16, height: u16, cells: Vec<Cell>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }

        let expected = usize::from(width) * usize::from(height);
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid by evaluating `cell_at` for every location in row-major order.
    pub fn from_fn<F>(width: u16, height: u16, mut cell_at: F) -> Result<Self, GridError>
    where
        F: FnMut(Location) -> Cell,
    {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Location::new(x, y)))
            .map(&mut cell_at)
            .collect();
        Self::new(width, height, cells)
    }

    /// Returns the grid with the cell at `location` replaced.
    #[must_use]
    pub fn with_cell(mut self, location: Location, cell: Cell) -> Self {
        let index = self.index(location);
        self.cells[index] = cell;
        self
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Row-major cell storage.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell stored at the location. Out-of-range coordinates wrap.
    #[must_use]
    pub fn cell(&self, location: Location) -> &Cell {
        &self.cells[self.index(location)]
    }

    /// Row-major offset of the location. Out-of-range coordinates wrap.
    #[must_use]
    pub fn index(&self, location: Location) -> usize {
        let x = usize::from(location.x() % self.width);
        let y = usize::from(location.y() % self.height);
        y * usize::from(self.width) + x
    }

    /// Location stored at a row-major offset.
    #[must_use]
    pub fn location_at(&self, index: usize) -> Location {
        let width = usize::from(self.width);
        let cell_count = self.cells.len();
        let index = index % cell_count;
        // Both quotients are bounded by the u16 dimensions.
        Location::new((index % width) as u16, (index / width) as u16)
    }

    /// Every location on the grid in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (0..self.cells.len()).map(|index| self.location_at(index))
    }

    /// Location reached by moving one step from `location` in `direction`.
    #[must_use]
    pub fn step(&self, location: Location, direction: Direction) -> Location {
        let width = u32::from(self.width);
        let height = u32::from(self.height);
        let x = u32::from(location.x()) % width;
        let y = u32::from(location.y()) % height;

        let (x, y) = match direction {
            Direction::Still => (x, y),
            Direction::North => (x, (y + height - 1) % height),
            Direction::East => ((x + 1) % width, y),
            Direction::South => (x, (y + 1) % height),
            Direction::West => ((x + width - 1) % width, y),
        };

        // Wrapped coordinates stay below the u16 dimensions.
        Location::new(x as u16, y as u16)
    }

    /// The four cardinal neighbours in North, East, South, West order.
    #[must_use]
    pub fn neighbors(&self, location: Location) -> [Location; 4] {
        Direction::CARDINALS.map(|direction| self.step(location, direction))
    }

    /// Manhattan distance on the torus, taking the shorter wrap on each axis.
    #[must_use]
    pub fn distance(&self, from: Location, to: Location) -> u32 {
        let width = u32::from(self.width);
        let height = u32::from(self.height);
        let dx = (u32::from(from.x()) % width).abs_diff(u32::from(to.x()) % width);
        let dy = (u32::from(from.y()) % height).abs_diff(u32::from(to.y()) % height);
        dx.min(width - dx) + dy.min(height - dy)
    }

    /// Direction that moves `from` onto its cardinal neighbour `to`.
    pub fn direction_between(
        &self,
        from: Location,
        to: Location,
    ) -> Result<Direction, AdjacencyError> {
        let target = self.step(to, Direction::Still);
        Direction::CARDINALS
            .into_iter()
            .find(|direction| self.step(from, *direction) == target)
            .ok_or(AdjacencyError { from, to })
    }
}
