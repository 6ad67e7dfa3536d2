//! End-to-end solve of a sealed world through the public API.
//!
//! Builds a small catalog in the reference-world authoring convention
//! (`"-1"` sentinel sockets on sealed faces, `"Vertical"` description
//! marker) and solves it under the canonical shell constraint.

use wavegrid::{
    sealed_shell, Catalog, Direction, FaceSockets, GridDims, Prototype, Solver, SolverConfig,
};

fn world_catalog() -> Catalog<&'static str> {
    Catalog::build(vec![
        // 0: air, legal everywhere, sealed on all faces
        Prototype {
            description: "Empty".to_string(),
            tile: "empty",
            weight: 3,
            rotation: 0,
            sockets: FaceSockets::uniform("-1"),
        },
        // 1: sealed support strut, banished from the interior by its
        // description marker
        Prototype {
            description: "Vertical_Pillar".to_string(),
            tile: "pillar",
            weight: 1,
            rotation: 0,
            sockets: FaceSockets::uniform("-1"),
        },
        // 2: open terrain piece; its faces never mate with the sealed
        // shell, so it can only survive where the shell never reaches
        Prototype {
            description: "Ground".to_string(),
            tile: "ground",
            weight: 2,
            rotation: 1,
            sockets: FaceSockets::new("gS", "gS", "gS", "gS", "g", "g"),
        },
    ])
    .expect("world catalog must build")
}

fn config(seed: u64) -> SolverConfig {
    SolverConfig {
        propagation_depth: None,
        retry_limit: Some(50),
        seed: Some(seed),
    }
}

#[test]
fn sealed_world_collapses_with_valid_adjacency() {
    let catalog = world_catalog();
    let dims = GridDims::new(4, 4, 3);

    let solver = Solver::new(&catalog, config(99)).with_boundary(sealed_shell(&catalog));
    let result = solver.generate(dims).expect("sealed world must solve");

    assert_eq!(result.len(), dims.len());
    for (x, z, y, cell) in result.iter() {
        for dir in [Direction::PosX, Direction::PosZ, Direction::PosY] {
            if let Some((nx, nz, ny)) = dims.step(x, z, y, dir) {
                let neighbor = result.get(nx, nz, ny);
                assert!(
                    catalog
                        .neighbors(cell.prototype, dir)
                        .contains(neighbor.prototype),
                    "incompatible pair {} / {} across {:?} at ({}, {}, {})",
                    cell.prototype,
                    neighbor.prototype,
                    dir,
                    x,
                    z,
                    y
                );
            }
        }
    }
}

#[test]
fn sealed_world_keeps_vertical_pieces_out_of_the_interior() {
    let catalog = world_catalog();
    let dims = GridDims::new(4, 4, 3);

    let solver = Solver::new(&catalog, config(7)).with_boundary(sealed_shell(&catalog));
    let result = solver.generate(dims).expect("sealed world must solve");

    for (x, z, y, cell) in result.iter() {
        let interior_xz = x > 0 && x < dims.width - 1 && z > 0 && z < dims.depth - 1;
        if interior_xz && y < dims.height - 1 {
            assert_ne!(
                cell.prototype, 1,
                "Vertical piece placed in the interior at ({}, {}, {})",
                x, z, y
            );
        }
        // Ground can never mate with the sealed shell, so propagation must
        // have eliminated it everywhere in a grid this small.
        assert_ne!(
            cell.prototype, 2,
            "unreachable Ground piece survived at ({}, {}, {})",
            x, z, y
        );
    }
}

#[test]
fn sealed_world_replays_under_a_fixed_seed() {
    let catalog = world_catalog();
    let dims = GridDims::new(4, 4, 3);

    let run = |seed| {
        Solver::new(&catalog, config(seed))
            .with_boundary(sealed_shell(&catalog))
            .generate(dims)
            .expect("sealed world must solve")
    };

    assert_eq!(run(123), run(123), "identical seeds must replay exactly");
}

#[test]
fn rotation_passes_through_to_the_output() {
    // A one-piece catalog built from the Ground prototype alone: no shell
    // hook, so its rotation index must surface at every cell.
    let catalog = Catalog::build(vec![Prototype {
        description: "Ground".to_string(),
        tile: "ground",
        weight: 1,
        rotation: 1,
        sockets: FaceSockets::new("gS", "gS", "gS", "gS", "g", "g"),
    }])
    .expect("catalog must build");

    let result = Solver::new(&catalog, config(1))
        .generate(GridDims::new(2, 2, 2))
        .expect("must solve");

    for (_, _, _, cell) in result.iter() {
        assert_eq!(cell.rotation, 1);
    }
}
