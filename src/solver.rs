//! Observation/propagation engine with the retry policy.
//!
//! One attempt allocates a fresh cell grid, applies the boundary predicate,
//! collapses one uniformly random seed cell, then repeatedly collapses the
//! lowest-entropy open cell and propagates the constraint until every cell
//! is a singleton. A contradiction abandons the whole attempt and restarts
//! from allocation; the retry limit caps how often that may happen.
//!
//! Propagation runs on an explicit work stack instead of recursing, so deep
//! cascades on large grids cannot overflow the call stack. Each processed
//! cell is checked against all six in-bounds neighbors: members without
//! support from a neighbor are removed here, and neighbors whose domains
//! exceed what this cell allows are pushed for their own pass. The optional
//! depth limit bounds how far pushes may chain from the collapsed cell; the
//! processed cell's own consistency check always runs, which keeps every
//! returned grid pairwise socket-compatible even at depth limit 0.

use crate::bitset::PrototypeSet;
use crate::boundary::BoundaryPredicate;
use crate::cell::Contradiction;
use crate::direction::Direction;
use crate::grid::{CellGrid, GridDims};
use crate::output::CollapsedGrid;
use crate::prototype::{Catalog, NeighborTable};
use crate::rng::{SolverRng, StdRandom};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Solver tuning knobs.
///
/// `None` means unbounded for the two limits and entropy-seeded for the
/// RNG.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// How far a propagation cascade may chain from the collapsed cell.
    pub propagation_depth: Option<u32>,
    /// How many contradiction-driven restarts are allowed.
    pub retry_limit: Option<u32>,
    /// RNG seed for deterministic replay.
    pub seed: Option<u64>,
}

/// Cloneable cancellation handle.
///
/// The solver polls the flag between observation iterations and at the
/// start of each propagation pass; once set, `generate` returns
/// `SolveError::Cancelled` without a grid.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fatal solver failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A grid dimension was zero.
    ZeroDimension {
        width: usize,
        depth: usize,
        height: usize,
    },
    /// Too many contradictions in a row; `attempts` counts the failures.
    RetryLimitExceeded { attempts: u32 },
    /// The host requested cancellation. No partial grid is returned.
    Cancelled,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::ZeroDimension {
                width,
                depth,
                height,
            } => write!(
                f,
                "grid dimensions must all be >= 1, got {}x{}x{}",
                width, depth, height
            ),
            SolveError::RetryLimitExceeded { attempts } => {
                write!(f, "retry limit exceeded after {} failed attempts", attempts)
            }
            SolveError::Cancelled => write!(f, "solve cancelled by host"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Outcome of a single attempt; contradictions stay internal to the retry
/// loop.
enum AttemptError {
    Contradiction(Contradiction),
    Cancelled,
}

impl From<Contradiction> for AttemptError {
    fn from(c: Contradiction) -> Self {
        AttemptError::Contradiction(c)
    }
}

/// The WFC solver.
///
/// Borrows a frozen catalog; any number of solvers may share one. All
/// per-attempt state lives in the attempt itself.
pub struct Solver<'a, T> {
    catalog: &'a Catalog<T>,
    config: SolverConfig,
    boundary: Option<BoundaryPredicate>,
    cancel: CancelFlag,
}

impl<'a, T> Solver<'a, T> {
    pub fn new(catalog: &'a Catalog<T>, config: SolverConfig) -> Self {
        Self {
            catalog,
            config,
            boundary: None,
            cancel: CancelFlag::new(),
        }
    }

    /// Install a boundary predicate, applied once per attempt before the
    /// seed step.
    pub fn with_boundary(mut self, predicate: BoundaryPredicate) -> Self {
        self.boundary = Some(predicate);
        self
    }

    /// Handle the host can use to abort the run from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Solve a `dims` grid, drawing randomness from the configured seed.
    pub fn generate(&self, dims: GridDims) -> Result<CollapsedGrid, SolveError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRandom::from_seed(seed),
            None => StdRandom::from_entropy(),
        };
        self.generate_with_rng(dims, &mut rng)
    }

    /// Solve with a caller-supplied RNG.
    pub fn generate_with_rng(
        &self,
        dims: GridDims,
        rng: &mut dyn SolverRng,
    ) -> Result<CollapsedGrid, SolveError> {
        if dims.width < 1 || dims.depth < 1 || dims.height < 1 {
            return Err(SolveError::ZeroDimension {
                width: dims.width,
                depth: dims.depth,
                height: dims.height,
            });
        }

        let table = self.catalog.table();
        let mut failed_attempts: u32 = 0;
        loop {
            if self.cancel.is_cancelled() {
                return Err(SolveError::Cancelled);
            }
            debug!(attempt = failed_attempts, "starting solve attempt");

            match self.attempt(table, dims, rng) {
                Ok(grid) => {
                    info!(
                        attempts = failed_attempts + 1,
                        cells = dims.len(),
                        "grid fully collapsed"
                    );
                    return Ok(CollapsedGrid::extract(&grid, self.catalog));
                }
                Err(AttemptError::Cancelled) => return Err(SolveError::Cancelled),
                Err(AttemptError::Contradiction(c)) => {
                    failed_attempts += 1;
                    warn!(
                        x = c.x,
                        z = c.z,
                        y = c.y,
                        attempt = failed_attempts,
                        "contradiction, restarting attempt"
                    );
                    if let Some(limit) = self.config.retry_limit {
                        if failed_attempts > limit {
                            return Err(SolveError::RetryLimitExceeded {
                                attempts: failed_attempts,
                            });
                        }
                    }
                }
            }
        }
    }

    /// One full attempt: allocate, constrain, seed, observe to completion.
    fn attempt(
        &self,
        table: &NeighborTable,
        dims: GridDims,
        rng: &mut dyn SolverRng,
    ) -> Result<CellGrid, AttemptError> {
        let mut grid = CellGrid::new(table, dims);

        if let Some(predicate) = &self.boundary {
            grid.restrict_with(table, |x, z, y, id| predicate(x, z, y, &dims, id))?;
            grid.check_valid()?;
        }

        // Seed step: a uniformly random cell regardless of entropy.
        // Boundary-constrained cells start with the lowest entropy, so a
        // pure lowest-entropy start would always begin on the shell and
        // bias the layout outward-in.
        let seed_index = rng.next_index(dims.len());
        self.collapse_and_propagate(&mut grid, table, seed_index, rng)?;

        while !grid.is_finished() {
            if self.cancel.is_cancelled() {
                return Err(AttemptError::Cancelled);
            }
            let selected = lowest_entropy_cell(&grid)
                .expect("an unfinished grid has at least one open cell");
            self.collapse_and_propagate(&mut grid, table, selected, rng)?;
        }

        Ok(grid)
    }

    fn collapse_and_propagate(
        &self,
        grid: &mut CellGrid,
        table: &NeighborTable,
        index: usize,
        rng: &mut dyn SolverRng,
    ) -> Result<(), AttemptError> {
        grid.cell_mut(index).collapse(table, rng);
        self.propagate(grid, table, index)
    }

    /// Work-stack constraint propagation from a changed cell.
    fn propagate(
        &self,
        grid: &mut CellGrid,
        table: &NeighborTable,
        origin: usize,
    ) -> Result<(), AttemptError> {
        if self.cancel.is_cancelled() {
            return Err(AttemptError::Cancelled);
        }

        let universe = table.len();
        let mut stack: Vec<(usize, u32)> = vec![(origin, 0)];

        while let Some((index, depth)) = stack.pop() {
            let mut invalid = PrototypeSet::empty(universe);
            let mut needs_pass: Vec<usize> = Vec::new();

            for dir in Direction::ALL {
                let Some(neighbor_index) = grid.neighbor_index(index, dir) else {
                    continue;
                };
                let cell = grid.cell(index);
                let neighbor = grid.cell(neighbor_index);

                // Members of this cell with no remaining support across the
                // shared face.
                let unsupported = cell
                    .domain()
                    .difference(neighbor.neighbor_union(dir.opposite()));
                invalid.union_with(&unsupported);

                // The neighbor holds members this cell no longer allows; it
                // needs its own pass to shrink.
                let excess = neighbor.domain().difference(cell.neighbor_union(dir));
                if !excess.is_empty() {
                    needs_pass.push(neighbor_index);
                }
            }

            if !invalid.is_empty() {
                grid.cell_mut(index).remove(&invalid, table)?;
            }

            let within_depth = match self.config.propagation_depth {
                Some(limit) => depth < limit,
                None => true,
            };
            if within_depth {
                for neighbor_index in needs_pass {
                    stack.push((neighbor_index, depth + 1));
                }
            }
        }

        Ok(())
    }
}

/// Linear scan for the open cell with the smallest positive entropy.
///
/// Ties keep the earliest cell in traversal order, which makes selection
/// deterministic for a given grid state.
fn lowest_entropy_cell(grid: &CellGrid) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, cell) in grid.cells().iter().enumerate() {
        let entropy = cell.entropy();
        if entropy > 0.0 {
            match best {
                Some((_, lowest)) if lowest <= entropy => {}
                _ => best = Some((index, entropy)),
            }
        }
    }
    best.map(|(index, _)| index)
}
