//! Prototype records and the derived adjacency catalog.
//!
//! A `Prototype` is an immutable tile archetype: six face sockets, a
//! weight, a rotation index, and an opaque payload the core never inspects.
//! `Catalog::build` derives, for every prototype and face direction, the set
//! of prototypes that can legally sit across that face. The derivation is a
//! pure function of the socket labels and is frozen after construction, so
//! a catalog can be shared read-only between any number of solvers.

use crate::bitset::PrototypeSet;
use crate::direction::Direction;
use crate::socket::{sockets_match, FaceSockets};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a prototype in the catalog's input order.
pub type PrototypeId = usize;

/// A tile archetype.
///
/// `tile` is passed through to the consumer untouched (typically a mesh or
/// scene reference). `rotation` is likewise pass-through: rotated variants
/// are authored as distinct prototypes with pre-rotated sockets, and the
/// consumer applies `90° × rotation` around the vertical axis when placing
/// the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prototype<T> {
    /// Free-form description; only boundary hooks and debugging read it.
    pub description: String,
    /// Opaque payload for the consumer.
    pub tile: T,
    /// Relative frequency for the weighted collapse; must be at least 1.
    pub weight: u32,
    /// Quarter-turn count in `0..=3`, passed through to the output.
    pub rotation: u8,
    /// The six face socket labels.
    pub sockets: FaceSockets,
}

/// Catalog construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The prototype list was empty.
    Empty,
    /// A prototype had weight zero.
    ZeroWeight { index: usize },
    /// A prototype's rotation was outside `0..=3`.
    RotationOutOfRange { index: usize, rotation: u8 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "prototype list is empty"),
            CatalogError::ZeroWeight { index } => {
                write!(f, "prototype {} has weight 0 (must be >= 1)", index)
            }
            CatalogError::RotationOutOfRange { index, rotation } => {
                write!(
                    f,
                    "prototype {} has rotation {} (must be in 0..=3)",
                    index, rotation
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Non-generic adjacency view of a catalog.
///
/// Cells, grids, and the solver only need weights and neighbor sets, never
/// the tile payload, so they operate on this table instead of `Catalog<T>`.
#[derive(Debug, Clone)]
pub struct NeighborTable {
    weights: Vec<u32>,
    /// `neighbors[id][dir.index()]` = prototypes compatible across that face.
    neighbors: Vec<[PrototypeSet; 6]>,
}

impl NeighborTable {
    /// Number of prototypes.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight(&self, id: PrototypeId) -> u32 {
        self.weights[id]
    }

    /// Prototypes that can sit across the `dir` face of `id`.
    pub fn neighbors(&self, id: PrototypeId, dir: Direction) -> &PrototypeSet {
        &self.neighbors[id][dir.index()]
    }

    /// The set of every prototype id.
    pub fn full_set(&self) -> PrototypeSet {
        PrototypeSet::full(self.len())
    }
}

/// Frozen prototype catalog with derived neighbor sets.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    prototypes: Vec<Prototype<T>>,
    table: NeighborTable,
}

impl<T> Catalog<T> {
    /// Validate the prototypes and derive all six neighbor sets per entry.
    ///
    /// Every ordered pair is tested, including `(p, p)`: a prototype can be
    /// its own neighbor. An empty neighbor set is legal (that face simply
    /// never mates); only structural input errors fail the build.
    pub fn build(prototypes: Vec<Prototype<T>>) -> Result<Self, CatalogError> {
        if prototypes.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, proto) in prototypes.iter().enumerate() {
            if proto.weight < 1 {
                return Err(CatalogError::ZeroWeight { index });
            }
            if proto.rotation > 3 {
                return Err(CatalogError::RotationOutOfRange {
                    index,
                    rotation: proto.rotation,
                });
            }
        }

        let count = prototypes.len();
        let mut neighbors: Vec<[PrototypeSet; 6]> = (0..count)
            .map(|_| std::array::from_fn(|_| PrototypeSet::empty(count)))
            .collect();

        for (p, proto) in prototypes.iter().enumerate() {
            for dir in Direction::ALL {
                let own = proto.sockets.get(dir);
                for (q, other) in prototypes.iter().enumerate() {
                    let facing = other.sockets.get(dir.opposite());
                    if sockets_match(own, facing, dir.axis()) {
                        neighbors[p][dir.index()].insert(q);
                    }
                }
            }
        }

        let weights = prototypes.iter().map(|p| p.weight).collect();
        Ok(Self {
            prototypes,
            table: NeighborTable { weights, neighbors },
        })
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn get(&self, id: PrototypeId) -> &Prototype<T> {
        &self.prototypes[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrototypeId, &Prototype<T>)> {
        self.prototypes.iter().enumerate()
    }

    /// The adjacency view consumed by cells and the solver.
    pub fn table(&self) -> &NeighborTable {
        &self.table
    }

    /// Prototypes compatible across the `dir` face of `id`.
    pub fn neighbors(&self, id: PrototypeId, dir: Direction) -> &PrototypeSet {
        self.table.neighbors(id, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proto(description: &str, sockets: FaceSockets) -> Prototype<()> {
        Prototype {
            description: description.to_string(),
            tile: (),
            weight: 1,
            rotation: 0,
            sockets,
        }
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::<()>::build(vec![]);
        assert_eq!(result.err(), Some(CatalogError::Empty));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut p = proto("a", FaceSockets::uniform("0S"));
        p.weight = 0;
        let result = Catalog::build(vec![p]);
        assert_eq!(result.err(), Some(CatalogError::ZeroWeight { index: 0 }));
    }

    #[test]
    fn test_rotation_out_of_range_rejected() {
        let mut p = proto("a", FaceSockets::uniform("0S"));
        p.rotation = 4;
        let result = Catalog::build(vec![p]);
        assert_eq!(
            result.err(),
            Some(CatalogError::RotationOutOfRange {
                index: 0,
                rotation: 4
            })
        );
    }

    #[test]
    fn test_symmetric_prototype_is_own_neighbor() {
        let catalog = Catalog::build(vec![proto("a", FaceSockets::uniform("0S"))]).unwrap();
        for dir in Direction::ALL {
            assert!(
                catalog.neighbors(0, dir).contains(0),
                "symmetric prototype should neighbor itself across {:?}",
                dir
            );
        }
    }

    #[test]
    fn test_asymmetric_pair_neighbors() {
        // A carries the unflipped label on both X faces, B the flipped one,
        // so A only mates with B across X and neither mates with itself.
        let a = proto("A", FaceSockets::new("a", "a", "0S", "0S", "0", "0"));
        let b = proto("B", FaceSockets::new("aF", "aF", "0S", "0S", "0", "0"));
        let catalog = Catalog::build(vec![a, b]).unwrap();

        assert!(catalog.neighbors(0, Direction::PosX).contains(1));
        assert!(!catalog.neighbors(0, Direction::PosX).contains(0));
        assert!(catalog.neighbors(1, Direction::PosX).contains(0));
        assert!(!catalog.neighbors(1, Direction::PosX).contains(1));
        assert!(catalog.neighbors(0, Direction::NegX).contains(1));
        assert!(!catalog.neighbors(0, Direction::NegX).contains(0));
    }

    #[test]
    fn test_catalog_symmetry() {
        // Mixed catalog exercising all three horizontal label kinds.
        let protos = vec![
            proto("p0", FaceSockets::new("1", "1F", "0S", "0S", "top", "bot")),
            proto("p1", FaceSockets::new("1F", "1", "2S", "0S", "bot", "top")),
            proto("p2", FaceSockets::new("-1", "2S", "2S", "-1", "top", "top")),
            proto("p3", FaceSockets::uniform("0S")),
        ];
        let catalog = Catalog::build(protos).unwrap();

        for p in 0..catalog.len() {
            for q in 0..catalog.len() {
                for dir in Direction::ALL {
                    assert_eq!(
                        catalog.neighbors(p, dir).contains(q),
                        catalog.neighbors(q, dir.opposite()).contains(p),
                        "neighbor symmetry violated for p={} q={} dir={:?}",
                        p,
                        q,
                        dir
                    );
                }
            }
        }
    }

    #[test]
    fn test_unmatched_vertical_socket_gives_empty_set() {
        let a = proto("a", FaceSockets::new("0S", "0S", "0S", "0S", "roof", "floor"));
        let catalog = Catalog::build(vec![a]).unwrap();

        // "roof" on +Y never meets "floor" on -Y, so the prototype cannot
        // stack on itself.
        assert!(catalog.neighbors(0, Direction::PosY).is_empty());
        assert!(catalog.neighbors(0, Direction::NegY).is_empty());
    }

    #[test]
    fn test_neighbor_table_weights() {
        let mut a = proto("a", FaceSockets::uniform("0S"));
        a.weight = 7;
        let catalog = Catalog::build(vec![a]).unwrap();
        assert_eq!(catalog.table().weight(0), 7);
        assert_eq!(catalog.table().len(), 1);
        assert_eq!(catalog.table().full_set().count(), 1);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CatalogError::ZeroWeight { index: 3 }.to_string(),
            "prototype 3 has weight 0 (must be >= 1)"
        );
        assert_eq!(CatalogError::Empty.to_string(), "prototype list is empty");
    }
}
