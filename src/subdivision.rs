//! Recursive subdivision of a face into its 64-way triangle hierarchy.
//!
//! Each level splits the current triangle along a flat 8x8 barycentric grid:
//! 45 lattice vertices (`i + j <= 8`) bounding 36 upright and 28 inverted
//! sub-triangles. The address of a target direction inside a face is the
//! 7-element path of sub-triangle slots it descends through.
//!
//! Two independent resolvers produce that path: one by literally raycasting
//! against all 64 candidates at every level, one by integer arithmetic on the
//! target's barycentric coordinates. They are a cross-check pair: divergence
//! on any input is itself a correctness signal, so both stay first-class and
//! neither is folded into the other.

use glam::DVec3;

use crate::intersect::{cartesian_to_barycentric, intersect};
use crate::types::{LEVELS, SUB_TRIANGLES};
use crate::PentakisError;

/// Subdivision factor per level.
const GRID: usize = 8;

/// Lattice vertices per subdivided triangle: one per `i + j <= 8`.
const LATTICE_VERTICES: usize = 45;

/// 8^7, the finest lattice resolution across all levels.
const LATTICE_SCALE: i64 = (GRID as i64).pow(LEVELS as u32);

/// Slack for the outside-the-face rejection in the lattice resolver.
const FACE_TOL: f64 = 1e-9;

/// One sub-triangle slot: three lattice vertex ids plus its orientation
/// within the parent.
#[derive(Debug, Clone, Copy)]
struct Slot {
    verts: [u8; 3],
    inverted: bool,
}

/// The up-to-two slots anchored at a lattice vertex. When both exist the
/// inverted one always precedes the upright one in slot order.
#[derive(Debug, Clone, Copy, Default)]
struct AnchorSlots {
    inverted: Option<u8>,
    upright: Option<u8>,
}

/// Linear index of lattice vertex `(i, j)`: row `j` begins at the running
/// sum of the shrinking row widths 9, 8, 7, ...
#[inline]
fn vertex_index(i: usize, j: usize) -> usize {
    debug_assert!(i + j <= GRID);
    j * (2 * GRID + 3 - j) / 2 + i
}

/// The fixed 64-slot subdivision table.
///
/// Traversal order is row-major in `j`; within a row, each cell contributes
/// its upright triangle and then, where the lattice still has room, the
/// inverted triangle filling the other half of the rhombus.
///
/// The inverted vertex listing `(V(i+1,j+1), V(i,j+1), V(i+1,j))` is load
/// bearing: it makes an inverted cell's intrinsic frame the exact point
/// reflection of the global one, which is what the lattice resolver's
/// per-component `8 - (c + 1)` fold relies on.
#[derive(Debug, Clone)]
pub(crate) struct SubdivisionGrid {
    slots: [Slot; SUB_TRIANGLES],
    anchors: [AnchorSlots; LATTICE_VERTICES],
}

impl SubdivisionGrid {
    pub(crate) fn new() -> Self {
        let mut slots = [Slot {
            verts: [0; 3],
            inverted: false,
        }; SUB_TRIANGLES];
        let mut anchors = [AnchorSlots::default(); LATTICE_VERTICES];

        let mut next = 0usize;
        for j in 0..GRID {
            for i in 0..GRID - j {
                slots[next] = Slot {
                    verts: [
                        vertex_index(i, j) as u8,
                        vertex_index(i + 1, j) as u8,
                        vertex_index(i, j + 1) as u8,
                    ],
                    inverted: false,
                };
                anchors[vertex_index(i, j)].upright = Some(next as u8);
                next += 1;

                if i + j + 2 <= GRID {
                    slots[next] = Slot {
                        verts: [
                            vertex_index(i + 1, j + 1) as u8,
                            vertex_index(i, j + 1) as u8,
                            vertex_index(i + 1, j) as u8,
                        ],
                        inverted: true,
                    };
                    anchors[vertex_index(i + 1, j)].inverted = Some(next as u8);
                    next += 1;
                }
            }
        }
        debug_assert_eq!(next, SUB_TRIANGLES);

        Self { slots, anchors }
    }
}

/// The 45 lattice points of one subdivided triangle, by flat linear
/// interpolation (no re-projection onto the sphere).
fn lattice_points(tri: &[DVec3; 3]) -> [DVec3; LATTICE_VERTICES] {
    let [v0, v1, v2] = *tri;
    let du = (v1 - v0) / GRID as f64;
    let dv = (v2 - v0) / GRID as f64;

    let mut points = [DVec3::ZERO; LATTICE_VERTICES];
    for j in 0..=GRID {
        for i in 0..=(GRID - j) {
            points[vertex_index(i, j)] = v0 + du * i as f64 + dv * j as f64;
        }
    }
    points
}

/// Resolve a target's 7-level path by raycasting at every level.
///
/// `face` must be a triangle the target ray is known to intersect; a miss at
/// any level signals that the starting face or an earlier path element was
/// mis-identified.
pub fn resolve_by_raycast(target: DVec3, face: &[DVec3; 3]) -> Result<[u8; LEVELS], PentakisError> {
    resolve_by_raycast_with(&SubdivisionGrid::new(), target, face)
}

pub(crate) fn resolve_by_raycast_with(
    grid: &SubdivisionGrid,
    target: DVec3,
    face: &[DVec3; 3],
) -> Result<[u8; LEVELS], PentakisError> {
    let mut tri = *face;
    let mut path = [0u8; LEVELS];

    for (level, out) in path.iter_mut().enumerate() {
        let points = lattice_points(&tri);

        let mut found = None;
        for (slot, entry) in grid.slots.iter().enumerate() {
            let candidate = [
                points[entry.verts[0] as usize],
                points[entry.verts[1] as usize],
                points[entry.verts[2] as usize],
            ];
            if intersect(target, &candidate).is_some() {
                // By construction the 64 slots tile the parent, so the first
                // hit is the only one.
                found = Some((slot as u8, candidate));
                break;
            }
        }

        match found {
            Some((slot, candidate)) => {
                *out = slot;
                tri = candidate;
            }
            None => return Err(PentakisError::SubdivisionMiss { level }),
        }
    }

    Ok(path)
}

/// Resolve a target's 7-level path by integer arithmetic on its barycentric
/// coordinates, without constructing or scanning any triangles.
///
/// Must produce the same path as [`resolve_by_raycast`] for any target
/// strictly inside the face.
pub fn resolve_by_lattice(target: DVec3, face: &[DVec3; 3]) -> Result<[u8; LEVELS], PentakisError> {
    resolve_by_lattice_with(&SubdivisionGrid::new(), target, face)
}

pub(crate) fn resolve_by_lattice_with(
    grid: &SubdivisionGrid,
    target: DVec3,
    face: &[DVec3; 3],
) -> Result<[u8; LEVELS], PentakisError> {
    let (u, v) = cartesian_to_barycentric(target, face)?;
    if u < -FACE_TOL || v < -FACE_TOL || u + v > 1.0 + FACE_TOL {
        return Err(PentakisError::OutsideFace { u, v });
    }
    let u = u.max(0.0);
    let v = v.max(0.0);
    let w = (1.0 - u - v).max(0.0);

    // Position in the finest lattice. Flooring all three coordinates
    // independently makes the triple sum to 8^7 - 1 (upright finest cell) or
    // 8^7 - 2 (inverted), which is exactly what keeps the per-level digit
    // arithmetic below consistent.
    let scale = LATTICE_SCALE as f64;
    let mut bx = ((u * scale) as i64).min(LATTICE_SCALE - 1);
    let mut by = ((v * scale) as i64).min(LATTICE_SCALE - 1);
    let mut bz = ((w * scale) as i64).min(LATTICE_SCALE - 1);

    // Float noise on an exact lattice boundary can push the sum off by one;
    // repair toward the upright cell, a permitted boundary tie-break.
    let excess = bx + by + bz - (LATTICE_SCALE - 1);
    if !(-1..=1).contains(&excess) {
        return Err(PentakisError::ResolutionFailed(format!(
            "lattice coordinate sum off by {}",
            excess
        )));
    }
    if excess == 1 {
        if bz > 0 {
            bz -= 1;
        } else if by > 0 {
            by -= 1;
        } else {
            bx -= 1;
        }
    }

    // Walk finest to coarsest, then flip the path into face-to-leaf order.
    let mut path = [0u8; LEVELS];
    for (step, out) in path.iter_mut().enumerate() {
        let mut lx = (bx % 8) as usize;
        let mut ly = (by % 8) as usize;
        let mut lz = (bz % 8) as usize;
        let mut digit_sum = lx + ly + lz;

        // A digit sum of 8 or more happens exactly when the parent cell is
        // inverted: its intrinsic frame is the point reflection of the
        // global one, so the local coordinates fold back through 8 - (c + 1).
        if digit_sum >= 8 {
            lx = 7 - lx;
            ly = 7 - ly;
            lz = 7 - lz;
            digit_sum = 21 - digit_sum;
        }

        let slot = match digit_sum {
            // Odd digit sum: upright cell, anchored at its own corner vertex.
            7 => grid.anchors[vertex_index(lx, ly)].upright,
            // Even digit sum: inverted cell, sharing the anchor one step over.
            6 => grid.anchors[vertex_index(lx + 1, ly)].inverted,
            _ => None,
        };
        *out = slot.ok_or_else(|| {
            PentakisError::ResolutionFailed(format!(
                "no sub-triangle at digits ({}, {}, {}) while walking level {}",
                lx,
                ly,
                lz,
                LEVELS - step
            ))
        })?;
        debug_assert_eq!(grid.slots[*out as usize].inverted, digit_sum == 6);

        bx /= 8;
        by /= 8;
        bz /= 8;
    }
    path.reverse();

    Ok(path)
}
