//! Socket-based wave function collapse for 3D module grids.
//!
//! Given a catalog of tile prototypes annotated with per-face socket
//! labels, the solver produces a fully collapsed `W × D × H` grid in which
//! every cell holds exactly one prototype and every pair of face-adjacent
//! cells is socket-compatible. 2D worlds are the `H = 1` specialization
//! with matching vertical labels.
//!
//! This crate provides:
//! - `Prototype` / `Catalog`: tile records and their derived per-face
//!   neighbor sets
//! - `sockets_match`: the label matching rules (flipped/symmetric/sentinel)
//! - `Solver`: observation, constraint propagation, and the retry policy
//! - `CollapsedGrid`: the `(x, z, y) → (prototype, rotation)` result
//! - `BoundaryPredicate`: pre-solve domain restriction at the grid shell
//! - `SolverRng`: seedable randomness for deterministic replay
//!
//! ## Example
//!
//! ```
//! use wavegrid::{
//!     Catalog, FaceSockets, GridDims, Prototype, Solver, SolverConfig,
//! };
//!
//! let catalog = Catalog::build(vec![Prototype {
//!     description: "ground".to_string(),
//!     tile: "ground_mesh",
//!     weight: 1,
//!     rotation: 0,
//!     sockets: FaceSockets::uniform("0S"),
//! }])
//! .unwrap();
//!
//! let solver = Solver::new(
//!     &catalog,
//!     SolverConfig {
//!         seed: Some(42),
//!         ..SolverConfig::default()
//!     },
//! );
//! let grid = solver.generate(GridDims::new(4, 4, 2)).unwrap();
//! assert_eq!(grid.get(0, 0, 0).prototype, 0);
//! ```

pub mod bitset;
pub mod boundary;
pub mod cell;
pub mod direction;
pub mod grid;
pub mod output;
pub mod prototype;
pub mod rng;
pub mod socket;
pub mod solver;

pub use bitset::PrototypeSet;
pub use boundary::{sealed_shell, BoundaryPredicate};
pub use cell::{Cell, Contradiction};
pub use direction::{Axis, Direction};
pub use grid::{CellGrid, GridDims};
pub use output::{CollapsedCell, CollapsedGrid};
pub use prototype::{Catalog, CatalogError, NeighborTable, Prototype, PrototypeId};
pub use rng::{SolverRng, StdRandom, XorShiftRandom};
pub use socket::{sockets_match, FaceSockets};
pub use solver::{CancelFlag, SolveError, Solver, SolverConfig};
