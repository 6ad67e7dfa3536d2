//! Boundary constraints applied before solving.
//!
//! A boundary predicate declaratively restricts which prototypes remain
//! possible at each grid position. The solver applies it once per attempt,
//! right after cell allocation and before the seed step. Predicates cannot
//! resize the grid, so every restriction stays within the allocated cells.

use crate::grid::GridDims;
use crate::prototype::{Catalog, PrototypeId};

/// Decides whether `prototype` stays possible at `(x, z, y)`.
///
/// Returning `false` removes the prototype from that cell's domain before
/// the first observation.
pub type BoundaryPredicate =
    Box<dyn Fn(usize, usize, usize, &GridDims, PrototypeId) -> bool + Send + Sync>;

/// The canonical shell-sealing constraint.
///
/// Reproduces the reference world's boundary rules:
/// - side faces keep only prototypes whose outward socket is the `"-1"`
///   sentinel (`pos_x` on the `x = W−1` face, and so on);
/// - the top layer keeps only prototypes with `pos_y == "-1"`, at interior
///   `x, z` positions only;
/// - interior cells below the top layer drop prototypes whose description
///   contains `"Vertical"`;
/// - vertical edges take the conjunction of their two side-face
///   conditions; the top-layer condition never reaches them.
///
/// The per-prototype facts are captured up front so the predicate itself
/// never touches the catalog.
pub fn sealed_shell<T>(catalog: &Catalog<T>) -> BoundaryPredicate {
    let count = catalog.len();
    let mut is_vertical = Vec::with_capacity(count);
    let mut sealed_pos_x = Vec::with_capacity(count);
    let mut sealed_neg_x = Vec::with_capacity(count);
    let mut sealed_pos_z = Vec::with_capacity(count);
    let mut sealed_neg_z = Vec::with_capacity(count);
    let mut sealed_top = Vec::with_capacity(count);

    for (_, proto) in catalog.iter() {
        is_vertical.push(proto.description.contains("Vertical"));
        sealed_pos_x.push(proto.sockets.pos_x == "-1");
        sealed_neg_x.push(proto.sockets.neg_x == "-1");
        sealed_pos_z.push(proto.sockets.pos_z == "-1");
        sealed_neg_z.push(proto.sockets.neg_z == "-1");
        sealed_top.push(proto.sockets.pos_y == "-1");
    }

    Box::new(move |x, z, y, dims, id| {
        let last_x = dims.width - 1;
        let last_z = dims.depth - 1;
        let last_y = dims.height - 1;

        if x == last_x && !sealed_pos_x[id] {
            return false;
        }
        if x == 0 && !sealed_neg_x[id] {
            return false;
        }
        if z == last_z && !sealed_pos_z[id] {
            return false;
        }
        if z == 0 && !sealed_neg_z[id] {
            return false;
        }

        let interior_xz = x > 0 && x < last_x && z > 0 && z < last_z;
        if interior_xz && y == last_y && !sealed_top[id] {
            return false;
        }
        if interior_xz && y < last_y && is_vertical[id] {
            return false;
        }

        true
    })
}
