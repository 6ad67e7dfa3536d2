//! Face directions of a grid cell.
//!
//! Six directions, one per cube face. Horizontal faces (±X, ±Z) and
//! vertical faces (±Y) follow different socket matching rules, so the
//! axis split is exposed alongside the direction itself.

use serde::{Deserialize, Serialize};

/// One of the six face directions of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosZ,
    NegZ,
    PosY,
    NegY,
}

/// Which matching rule a face uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    /// All six directions, in neighbor-table index order.
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosZ,
        Direction::NegZ,
        Direction::PosY,
        Direction::NegY,
    ];

    /// Index into per-direction tables (matches `ALL` order).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::PosX => 0,
            Direction::NegX => 1,
            Direction::PosZ => 2,
            Direction::NegZ => 3,
            Direction::PosY => 4,
            Direction::NegY => 5,
        }
    }

    /// The direction pointing back at this one.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
        }
    }

    /// Grid offset as `(dx, dz, dy)`.
    #[inline]
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::PosX => (1, 0, 0),
            Direction::NegX => (-1, 0, 0),
            Direction::PosZ => (0, 1, 0),
            Direction::NegZ => (0, -1, 0),
            Direction::PosY => (0, 0, 1),
            Direction::NegY => (0, 0, -1),
        }
    }

    /// Matching-rule axis for this face.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::PosY | Direction::NegY => Axis::Vertical,
            _ => Axis::Horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involutive() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_opposite_offsets_cancel() {
        for dir in Direction::ALL {
            let (dx, dz, dy) = dir.offset();
            let (ox, oz, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dz + oz, dy + oy), (0, 0, 0));
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_axis_split() {
        assert_eq!(Direction::PosX.axis(), Axis::Horizontal);
        assert_eq!(Direction::NegZ.axis(), Axis::Horizontal);
        assert_eq!(Direction::PosY.axis(), Axis::Vertical);
        assert_eq!(Direction::NegY.axis(), Axis::Vertical);
    }
}
