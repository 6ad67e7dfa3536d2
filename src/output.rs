//! The collapsed result grid.
//!
//! Once every cell is a singleton, the solver reads the grid into a plain
//! `(x, z, y) → (prototype id, rotation)` mapping. The ids index the
//! prototype list the catalog was built from; the consumer resolves them to
//! tile payloads and rotates each payload by `90° × rotation` around the
//! vertical axis.

use crate::grid::{CellGrid, GridDims};
use crate::prototype::{Catalog, PrototypeId};
use serde::{Deserialize, Serialize};

/// One collapsed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedCell {
    pub prototype: PrototypeId,
    pub rotation: u8,
}

/// Fully collapsed grid, the solver's only output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedGrid {
    dims: GridDims,
    cells: Vec<CollapsedCell>,
}

impl CollapsedGrid {
    /// Read a finished cell grid. Callers guarantee every cell is collapsed.
    pub(crate) fn extract<T>(grid: &CellGrid, catalog: &Catalog<T>) -> Self {
        let cells = grid
            .cells()
            .iter()
            .map(|cell| {
                let prototype = cell
                    .collapsed_prototype()
                    .expect("result extraction requires a fully collapsed grid");
                CollapsedCell {
                    prototype,
                    rotation: catalog.get(prototype).rotation,
                }
            })
            .collect();
        Self {
            dims: grid.dims(),
            cells,
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn get(&self, x: usize, z: usize, y: usize) -> CollapsedCell {
        self.cells[self.dims.index(x, z, y)]
    }

    /// Iterate cells with their coordinates, in linear index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, CollapsedCell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &cell)| {
            let (x, z, y) = self.dims.coords(i);
            (x, z, y, cell)
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
