//! Plain-text rendering of a single grid layer for diagnostic logs.

use std::fmt;

use crate::Grid;

/// Per-cell quantity rendered by [`LayerDump`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Owning player identifier.
    Owner,
    /// Stationed strength.
    Strength,
    /// Per-turn production.
    Production,
}

impl Layer {
    const fn column_width(self) -> usize {
        match self {
            Self::Owner | Self::Production => 2,
            Self::Strength => 3,
        }
    }
}

/// Displays one layer of a grid as comma separated, right-aligned rows.
#[derive(Clone, Copy, Debug)]
pub struct LayerDump<'a> {
    grid: &'a Grid,
    layer: Layer,
}

impl<'a> LayerDump<'a> {
    /// Captures a view of `layer` on `grid`.
    #[must_use]
    pub const fn new(grid: &'a Grid, layer: Layer) -> Self {
        Self { grid, layer }
    }
}

impl fmt::Display for LayerDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = usize::from(self.grid.width());
        let column_width = self.layer.column_width();

        for (row_index, row) in self.grid.cells().chunks(width).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for (column, cell) in row.iter().enumerate() {
                if column > 0 {
                    f.write_str(",")?;
                }
                let value = match self.layer {
                    Layer::Owner => cell.owner.get(),
                    Layer::Strength => cell.strength,
                    Layer::Production => cell.production,
                };
                write!(f, "{value:>column_width$}")?;
            }
        }

        Ok(())
    }
}
