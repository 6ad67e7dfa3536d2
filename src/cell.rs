//! Per-position solver state.
//!
//! A cell tracks the set of prototypes still possible at its grid position,
//! a cached Shannon entropy over the domain's weights, and six cached
//! neighbor unions: per face direction, the union of the neighbor sets of
//! every prototype still in the domain. Propagation reads the unions to
//! decide what the cell across each face may keep.

use crate::bitset::PrototypeSet;
use crate::direction::Direction;
use crate::prototype::{NeighborTable, PrototypeId};
use crate::rng::SolverRng;
use std::fmt;

/// A cell's domain was emptied: the grid is unsatisfiable under the
/// choices made so far. Recovered by the solver's retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    pub x: usize,
    pub z: usize,
    pub y: usize,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "domain emptied at cell ({}, {}, {})",
            self.x, self.z, self.y
        )
    }
}

impl std::error::Error for Contradiction {}

/// Mutable per-position state.
#[derive(Debug, Clone)]
pub struct Cell {
    x: usize,
    z: usize,
    y: usize,
    domain: PrototypeSet,
    entropy: f64,
    neighbor_union: [PrototypeSet; 6],
}

impl Cell {
    /// Build a cell from an initial domain and refresh all caches.
    pub fn new(domain: PrototypeSet, table: &NeighborTable, x: usize, z: usize, y: usize) -> Self {
        let universe = domain.universe();
        let mut cell = Self {
            x,
            z,
            y,
            domain,
            entropy: 0.0,
            neighbor_union: std::array::from_fn(|_| PrototypeSet::empty(universe)),
        };
        cell.refresh(table);
        cell
    }

    pub fn position(&self) -> (usize, usize, usize) {
        (self.x, self.z, self.y)
    }

    pub fn domain(&self) -> &PrototypeSet {
        &self.domain
    }

    /// Cached Shannon entropy; exactly `0.0` iff the cell is collapsed.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    pub fn is_collapsed(&self) -> bool {
        self.domain.count() == 1
    }

    /// Union over the domain of each member's neighbor set for `dir`.
    pub fn neighbor_union(&self, dir: Direction) -> &PrototypeSet {
        &self.neighbor_union[dir.index()]
    }

    /// The sole remaining prototype once collapsed.
    pub fn collapsed_prototype(&self) -> Option<PrototypeId> {
        self.domain.sole()
    }

    /// Remove `removed` from the domain.
    ///
    /// Fails with `Contradiction` if the domain empties; otherwise refreshes
    /// the entropy and neighbor-union caches. Returns `true` iff the cell is
    /// now a singleton.
    pub fn remove(
        &mut self,
        removed: &PrototypeSet,
        table: &NeighborTable,
    ) -> Result<bool, Contradiction> {
        self.domain.subtract(removed);
        if self.domain.is_empty() {
            return Err(Contradiction {
                x: self.x,
                z: self.z,
                y: self.y,
            });
        }
        self.refresh(table);
        Ok(self.is_collapsed())
    }

    /// Drop every domain member the predicate rejects.
    ///
    /// Boundary hooks restrict cells through this before solving.
    pub fn restrict<F: FnMut(PrototypeId) -> bool>(
        &mut self,
        mut keep: F,
        table: &NeighborTable,
    ) -> Result<(), Contradiction> {
        self.domain.retain(&mut keep);
        if self.domain.is_empty() {
            return Err(Contradiction {
                x: self.x,
                z: self.z,
                y: self.y,
            });
        }
        self.refresh(table);
        Ok(())
    }

    /// Collapse to a single prototype by weighted random draw.
    ///
    /// Draws `r` uniformly from `[1, W]` where `W` is the domain's total
    /// weight, then walks the domain in id order accumulating weights until
    /// the running sum reaches `r`. No-op when already collapsed.
    pub fn collapse(&mut self, table: &NeighborTable, rng: &mut dyn SolverRng) {
        if self.is_collapsed() {
            return;
        }

        let total: u64 = self.domain.iter().map(|id| table.weight(id) as u64).sum();
        let threshold = rng.next_weight(total);

        let mut running = 0u64;
        let mut chosen = None;
        for id in self.domain.iter() {
            running += table.weight(id) as u64;
            if running >= threshold {
                chosen = Some(id);
                break;
            }
        }
        // The running sum reaches `total >= threshold` by the last member.
        let chosen = chosen.expect("weighted draw must select a domain member");

        self.domain.clear();
        self.domain.insert(chosen);
        self.refresh(table);
    }

    /// Recompute entropy and the six neighbor unions from the domain.
    fn refresh(&mut self, table: &NeighborTable) {
        for union in &mut self.neighbor_union {
            union.clear();
        }
        for id in self.domain.iter() {
            for dir in Direction::ALL {
                self.neighbor_union[dir.index()].union_with(table.neighbors(id, dir));
            }
        }
        self.entropy = self.shannon_entropy(table);
    }

    /// `H = ln(W) − Σ w·ln(w) / W`, with a hard zero for singletons.
    fn shannon_entropy(&self, table: &NeighborTable) -> f64 {
        if self.domain.count() <= 1 {
            return 0.0;
        }
        let mut total = 0.0f64;
        let mut weight_log_sum = 0.0f64;
        for id in self.domain.iter() {
            let w = table.weight(id) as f64;
            total += w;
            weight_log_sum += w * w.ln();
        }
        total.ln() - weight_log_sum / total
    }
}
