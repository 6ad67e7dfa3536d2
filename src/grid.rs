//! Cell grid storage and index math.
//!
//! Cells are stored in a flat `Vec` indexed `x + z*W + y*W*D`, following
//! the `[x, z, y]` convention of the output grid: `x` runs along width,
//! `z` along depth, `y` along height.

use crate::cell::{Cell, Contradiction};
use crate::direction::Direction;
use crate::prototype::NeighborTable;
use serde::{Deserialize, Serialize};

/// Grid dimensions `W × D × H`, all at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub width: usize,
    pub depth: usize,
    pub height: usize,
}

impl GridDims {
    pub fn new(width: usize, depth: usize, height: usize) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.width * self.depth * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of `(x, z, y)`.
    #[inline]
    pub fn index(&self, x: usize, z: usize, y: usize) -> usize {
        debug_assert!(x < self.width && z < self.depth && y < self.height);
        x + z * self.width + y * self.width * self.depth
    }

    /// Coordinates of a linear index.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let x = index % self.width;
        let z = (index / self.width) % self.depth;
        let y = index / (self.width * self.depth);
        (x, z, y)
    }

    /// The cell one step in `dir` from `(x, z, y)`, or `None` at the edge.
    pub fn step(&self, x: usize, z: usize, y: usize, dir: Direction) -> Option<(usize, usize, usize)> {
        let (dx, dz, dy) = dir.offset();
        let nx = x.checked_add_signed(dx as isize)?;
        let nz = z.checked_add_signed(dz as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        if nx < self.width && nz < self.depth && ny < self.height {
            Some((nx, nz, ny))
        } else {
            None
        }
    }
}

/// The mutable solver grid: one `Cell` per position.
///
/// Built fresh at the start of every attempt and discarded on retry.
#[derive(Debug, Clone)]
pub struct CellGrid {
    dims: GridDims,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Allocate a grid with every cell holding the full catalog.
    pub fn new(table: &NeighborTable, dims: GridDims) -> Self {
        let full = table.full_set();
        let cells = (0..dims.len())
            .map(|i| {
                let (x, z, y) = dims.coords(i);
                Cell::new(full.clone(), table, x, z, y)
            })
            .collect();
        Self { dims, cells }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn get(&self, x: usize, z: usize, y: usize) -> &Cell {
        &self.cells[self.dims.index(x, z, y)]
    }

    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Linear index of the neighbor of `index` in `dir`, if in bounds.
    pub fn neighbor_index(&self, index: usize, dir: Direction) -> Option<usize> {
        let (x, z, y) = self.dims.coords(index);
        self.dims
            .step(x, z, y, dir)
            .map(|(nx, nz, ny)| self.dims.index(nx, nz, ny))
    }

    /// True iff every cell is collapsed (entropy 0 everywhere).
    pub fn is_finished(&self) -> bool {
        self.cells.iter().all(|c| c.is_collapsed())
    }

    /// Restrict every cell's domain through a prototype predicate.
    ///
    /// This is the boundary-hook applier: `keep(x, z, y, id)` decides
    /// whether prototype `id` stays possible at `(x, z, y)`. A cell emptied
    /// by the predicate is a contradiction.
    pub fn restrict_with<F>(&mut self, table: &NeighborTable, mut keep: F) -> Result<(), Contradiction>
    where
        F: FnMut(usize, usize, usize, usize) -> bool,
    {
        for index in 0..self.cells.len() {
            let (x, z, y) = self.dims.coords(index);
            self.cells[index].restrict(|id| keep(x, z, y, id), table)?;
        }
        Ok(())
    }

    /// Check that no cell has an empty domain (invariant I5).
    pub fn check_valid(&self) -> Result<(), Contradiction> {
        for cell in &self.cells {
            if cell.domain().is_empty() {
                let (x, z, y) = cell.position();
                return Err(Contradiction { x, z, y });
            }
        }
        Ok(())
    }
}
