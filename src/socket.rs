//! Socket labels and the face matching rules.
//!
//! Each prototype face carries a short ASCII label. Two labels on opposing
//! faces mate according to structural markers in the label text:
//!
//! - `F`: flipped variant; mates with the unflipped form of the same label
//!   (and vice versa), never with itself.
//! - `S`: symmetrical; mates with an identical label.
//! - `-`: sentinel labels such as `"-1"`; treated like symmetrical labels.
//!   `"-1"` conventionally marks a face with no neighbor, used by boundary
//!   hooks to seal the grid shell.
//! - anything else: unflipped asymmetric; mates only with its `F` form.
//!
//! Vertical faces (±Y) ignore the markers and mate on plain equality.
//! Rotated variants are authored as distinct prototypes, so no label
//! rewriting happens at runtime.

use crate::direction::{Axis, Direction};
use serde::{Deserialize, Serialize};

/// The six face socket labels of a prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceSockets {
    pub pos_x: String,
    pub neg_x: String,
    pub pos_z: String,
    pub neg_z: String,
    pub pos_y: String,
    pub neg_y: String,
}

impl FaceSockets {
    /// Build from labels in `(+X, -X, +Z, -Z, +Y, -Y)` order.
    pub fn new(
        pos_x: impl Into<String>,
        neg_x: impl Into<String>,
        pos_z: impl Into<String>,
        neg_z: impl Into<String>,
        pos_y: impl Into<String>,
        neg_y: impl Into<String>,
    ) -> Self {
        Self {
            pos_x: pos_x.into(),
            neg_x: neg_x.into(),
            pos_z: pos_z.into(),
            neg_z: neg_z.into(),
            pos_y: pos_y.into(),
            neg_y: neg_y.into(),
        }
    }

    /// The same label on all six faces.
    pub fn uniform(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(
            label.clone(),
            label.clone(),
            label.clone(),
            label.clone(),
            label.clone(),
            label,
        )
    }

    /// Label of the face pointing in `dir`.
    pub fn get(&self, dir: Direction) -> &str {
        match dir {
            Direction::PosX => &self.pos_x,
            Direction::NegX => &self.neg_x,
            Direction::PosZ => &self.pos_z,
            Direction::NegZ => &self.neg_z,
            Direction::PosY => &self.pos_y,
            Direction::NegY => &self.neg_y,
        }
    }
}

/// Decide whether socket `a` mates with socket `b` across opposing faces
/// on the given axis.
///
/// Symmetric per axis: `sockets_match(a, b, axis) == sockets_match(b, a, axis)`.
pub fn sockets_match(a: &str, b: &str, axis: Axis) -> bool {
    match axis {
        Axis::Vertical => a == b,
        Axis::Horizontal => {
            if a.contains('F') {
                // a == b + "F"
                a.strip_suffix('F') == Some(b)
            } else if a.contains('S') || a.contains('-') {
                a == b
            } else {
                // a + "F" == b
                b.strip_suffix('F') == Some(a)
            }
        }
    }
}
