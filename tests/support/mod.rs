#![allow(dead_code)]

use glam::DVec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pentakis::{
    barycentric_to_cartesian, FaceEntry, FaceTable, Polyhedron, StarmapAnchors, StarmapVector,
};

/// Build a geometrically valid pentakis dodecahedron face table: each
/// icosahedron apex paired with consecutive corners of its surrounding
/// dodecahedron pentagon, wound clockwise viewed from outside the sphere.
///
/// The real table's symbol assignment is a world-specific permutation of
/// this; for testing, any assignment that actually tiles the sphere will do.
pub fn reference_table(poly: &Polyhedron) -> FaceTable {
    let mut entries = Vec::with_capacity(60);

    for (ico, &apex) in poly.icosahedron.iter().enumerate() {
        // The five nearest dodecahedron vertices form the pentagon around
        // this apex.
        let mut ring: Vec<usize> = (0..20).collect();
        ring.sort_by(|&a, &b| {
            poly.dodecahedron[b]
                .dot(apex)
                .partial_cmp(&poly.dodecahedron[a].dot(apex))
                .unwrap()
        });
        ring.truncate(5);

        // Sort the corners by descending angle in the tangent plane, which is
        // clockwise when viewed from outside.
        let arbitrary = if apex.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
        let e1 = apex.cross(arbitrary).normalize();
        let e2 = apex.cross(e1);
        let angle = |idx: usize| {
            let d = poly.dodecahedron[idx];
            d.dot(e2).atan2(d.dot(e1))
        };
        ring.sort_by(|&a, &b| angle(b).partial_cmp(&angle(a)).unwrap());

        for k in 0..5 {
            entries.push(FaceEntry {
                ico,
                dod_a: ring[k],
                dod_b: ring[(k + 1) % 5],
            });
        }
    }

    FaceTable::new(entries).unwrap()
}

/// Starmap vector equal to a face's own intrinsic direction.
pub fn centroid_vector(poly: &Polyhedron, table: &FaceTable, symbol: u32) -> StarmapVector {
    StarmapVector {
        symbol,
        direction: poly.face_direction(table.entry(symbol).unwrap()),
    }
}

/// Anchor pair built from two faces' own intrinsic directions.
pub fn centroid_anchors(
    poly: &Polyhedron,
    table: &FaceTable,
    symbol_a: u32,
    symbol_b: u32,
) -> StarmapAnchors {
    StarmapAnchors {
        a: centroid_vector(poly, table, symbol_a),
        b: centroid_vector(poly, table, symbol_b),
    }
}

/// One starmap vector per symbol, all equal to the intrinsic directions.
pub fn centroid_starmap(poly: &Polyhedron, table: &FaceTable) -> Vec<StarmapVector> {
    (1..=60).map(|s| centroid_vector(poly, table, s)).collect()
}

/// Random directions strictly inside random faces (in the table's intrinsic
/// orientation), tagged with the face symbol they belong to. Samples keep a
/// barycentric margin from the face edges so face identification is
/// unambiguous.
pub fn interior_targets(
    poly: &Polyhedron,
    table: &FaceTable,
    n: usize,
    seed: u64,
) -> Vec<(u32, DVec3)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let symbol = rng.gen_range(1..=60u32);
            let tri = poly.face_triangle(table.entry(symbol).unwrap());
            let (u, v) = loop {
                let u: f64 = rng.gen_range(0.01..0.99);
                let v: f64 = rng.gen_range(0.01..0.99);
                if u + v < 0.98 {
                    break (u, v);
                }
            };
            (symbol, barycentric_to_cartesian(u, v, &tri).normalize())
        })
        .collect()
}
