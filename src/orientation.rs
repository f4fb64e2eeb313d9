//! Orientation solving: aligning the polyhedron's intrinsic frame with
//! externally measured starmap vectors.
//!
//! Two starmap vectors are enough to pin the orientation: each side yields an
//! orthonormal frame (forward along the first direction, right along the
//! normalized cross with the second, up completing the triad), each frame
//! yields a quaternion, and the solved rotation is the difference of the two.
//! Any further starmap vectors serve as held-out checks: their cosine
//! similarity against the solved directions should sit at machine precision
//! when the face table and the anchor pair are sound.

use glam::{DMat3, DQuat, DVec3};

use crate::intersect::intersect;
use crate::polyhedron::Polyhedron;
use crate::types::{FaceTable, FACE_COUNT};
use crate::PentakisError;

/// Cross products shorter than this cannot define a frame axis.
const FRAME_EPS: f64 = 1e-9;

/// One externally measured direction, tagged with the symbol it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct StarmapVector {
    pub symbol: u32,
    pub direction: DVec3,
}

/// The two starmap vectors used to anchor the orientation. Any extras beyond
/// these two only ever verify the result.
#[derive(Debug, Clone, Copy)]
pub struct StarmapAnchors {
    pub a: StarmapVector,
    pub b: StarmapVector,
}

/// Per-symbol verification diagnostic: cosine similarity between the solved
/// absolute direction and an independently measured one. Near 1.0 signals
/// correctness; anything far below points at a faulty face table, a faulty
/// anchor pair, or a winding bug.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityCheck {
    pub symbol: u32,
    pub similarity: f64,
    pub computed: DVec3,
    pub starmap: DVec3,
}

/// The solved orientation.
#[derive(Debug, Clone)]
pub struct OrientationSolution {
    /// Rotation from the table's intrinsic orientation to absolute space.
    pub rotation: DQuat,
    /// Absolute (rotated) face direction per symbol; index `k` is symbol `k+1`.
    pub directions: [DVec3; FACE_COUNT],
    /// One verification entry per extra starmap vector supplied.
    pub similarities: Vec<SimilarityCheck>,
}

impl OrientationSolution {
    /// Rotate every face triangle into absolute space.
    pub fn orient_faces(&self, poly: &Polyhedron, table: &FaceTable) -> OrientedFaces {
        let mut triangles = [[DVec3::ZERO; 3]; FACE_COUNT];
        for (symbol, entry) in table.iter() {
            let tri = poly.face_triangle(entry);
            triangles[(symbol - 1) as usize] = tri.map(|v| self.rotation * v);
        }
        OrientedFaces { triangles }
    }

    /// Worst similarity over all verification entries, if any were supplied.
    pub fn min_similarity(&self) -> Option<f64> {
        self.similarities
            .iter()
            .map(|s| s.similarity)
            .fold(None, |acc, s| match acc {
                None => Some(s),
                Some(a) => Some(a.min(s)),
            })
    }
}

/// The 60 face triangles in absolute space, ready for address resolution.
#[derive(Debug, Clone)]
pub struct OrientedFaces {
    /// Face triangle per symbol; index `k` is symbol `k+1`.
    pub triangles: [[DVec3; 3]; FACE_COUNT],
}

impl OrientedFaces {
    /// Faces in the table's intrinsic orientation (identity rotation).
    pub fn intrinsic(poly: &Polyhedron, table: &FaceTable) -> Self {
        let mut triangles = [[DVec3::ZERO; 3]; FACE_COUNT];
        for (symbol, entry) in table.iter() {
            triangles[(symbol - 1) as usize] = poly.face_triangle(entry);
        }
        Self { triangles }
    }

    /// Triangle for a 1-based symbol id.
    pub fn triangle(&self, symbol: u32) -> Result<&[DVec3; 3], PentakisError> {
        if symbol == 0 || symbol as usize > FACE_COUNT {
            return Err(PentakisError::SymbolOutOfRange(symbol));
        }
        Ok(&self.triangles[symbol as usize - 1])
    }
}

/// Quaternion for the right-handed orthonormal frame spanned by `forward`
/// and a second direction.
fn anchor_frame(forward: DVec3, toward: DVec3) -> Result<DQuat, PentakisError> {
    let (Some(forward), Some(toward)) = (forward.try_normalize(), toward.try_normalize()) else {
        return Err(PentakisError::DegenerateAnchors { similarity: 0.0 });
    };

    let right = forward.cross(toward);
    if right.length_squared() < FRAME_EPS * FRAME_EPS {
        return Err(PentakisError::DegenerateAnchors {
            similarity: forward.dot(toward),
        });
    }
    let right = right.normalize();
    let up = forward.cross(right).normalize();

    Ok(DQuat::from_mat3(&DMat3::from_cols(forward, right, up)))
}

/// Solve the rotation aligning two known face directions with their starmap
/// measurements, recover all 60 absolute face directions, and score every
/// extra starmap vector against the result.
pub fn solve_orientation(
    poly: &Polyhedron,
    table: &FaceTable,
    anchors: &StarmapAnchors,
    extra: &[StarmapVector],
) -> Result<OrientationSolution, PentakisError> {
    // Reject out-of-range ids before any computation proceeds.
    let entry_a = table.entry(anchors.a.symbol)?;
    let entry_b = table.entry(anchors.b.symbol)?;
    for sv in extra {
        table.entry(sv.symbol)?;
    }

    let q_intrinsic = anchor_frame(
        poly.face_direction(entry_a),
        poly.face_direction(entry_b),
    )?;
    let q_starmap = anchor_frame(anchors.a.direction, anchors.b.direction)?;

    let rotation = q_starmap * q_intrinsic.inverse();

    let mut directions = [DVec3::ZERO; FACE_COUNT];
    for (symbol, entry) in table.iter() {
        directions[(symbol - 1) as usize] = rotation * poly.face_direction(entry);
    }

    let similarities = extra
        .iter()
        .map(|sv| {
            let computed = directions[(sv.symbol - 1) as usize];
            SimilarityCheck {
                symbol: sv.symbol,
                similarity: computed.dot(sv.direction)
                    / (computed.length() * sv.direction.length()),
                computed,
                starmap: sv.direction,
            }
        })
        .collect();

    Ok(OrientationSolution {
        rotation,
        directions,
        similarities,
    })
}

/// Find the single face a target direction strikes.
///
/// Exactly one hit is required for a well-posed target. Zero hits should not
/// happen for a unit-length, non-edge-case direction; multiple hits mean an
/// edge-straddling target or a corrupted face table, and are reported rather
/// than resolved by tie-breaking.
pub fn locate_face(faces: &OrientedFaces, dir: DVec3) -> Result<u32, PentakisError> {
    let mut hits = Vec::new();
    for (idx, tri) in faces.triangles.iter().enumerate() {
        if intersect(dir, tri).is_some() {
            hits.push(idx as u32 + 1);
        }
    }
    match hits.len() {
        0 => Err(PentakisError::NoFaceHit),
        1 => Ok(hits[0]),
        _ => Err(PentakisError::AmbiguousFace(hits)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FaceEntry;

    fn modular_table() -> FaceTable {
        FaceTable::new(
            (0..FACE_COUNT)
                .map(|k| FaceEntry {
                    ico: k % 12,
                    dod_a: k % 20,
                    dod_b: (k + 1) % 20,
                })
                .collect(),
        )
        .unwrap()
    }

    fn centroid_anchors(poly: &Polyhedron, table: &FaceTable, a: u32, b: u32) -> StarmapAnchors {
        StarmapAnchors {
            a: StarmapVector {
                symbol: a,
                direction: poly.face_direction(table.entry(a).unwrap()),
            },
            b: StarmapVector {
                symbol: b,
                direction: poly.face_direction(table.entry(b).unwrap()),
            },
        }
    }

    #[test]
    fn test_identity_when_anchors_match_intrinsic() {
        let poly = Polyhedron::new();
        let table = modular_table();
        let anchors = centroid_anchors(&poly, &table, 14, 13);

        let solution = solve_orientation(&poly, &table, &anchors, &[]).unwrap();
        assert!(
            (solution.rotation.w.abs() - 1.0).abs() < 1e-9,
            "expected identity rotation, got {:?}",
            solution.rotation
        );
        for (symbol, entry) in table.iter() {
            let intrinsic = poly.face_direction(entry);
            let solved = solution.directions[(symbol - 1) as usize];
            assert!((solved - intrinsic).length() < 1e-9);
        }
    }

    #[test]
    fn test_known_rotation_recovered() {
        let poly = Polyhedron::new();
        let table = modular_table();
        let applied = DQuat::from_axis_angle(DVec3::new(1.0, 2.0, 3.0).normalize(), 0.7);

        let rotated = |symbol: u32| applied * poly.face_direction(table.entry(symbol).unwrap());
        let anchors = StarmapAnchors {
            a: StarmapVector {
                symbol: 14,
                direction: rotated(14),
            },
            b: StarmapVector {
                symbol: 13,
                direction: rotated(13),
            },
        };
        let extra: Vec<StarmapVector> = (1..=FACE_COUNT as u32)
            .map(|symbol| StarmapVector {
                symbol,
                direction: rotated(symbol),
            })
            .collect();

        let solution = solve_orientation(&poly, &table, &anchors, &extra).unwrap();
        // q and -q encode the same rotation.
        assert!((solution.rotation.dot(applied).abs() - 1.0).abs() < 1e-9);
        assert!(solution.min_similarity().unwrap() > 0.999_999_999);
    }

    #[test]
    fn test_out_of_range_symbol_rejected() {
        let poly = Polyhedron::new();
        let table = modular_table();
        let mut anchors = centroid_anchors(&poly, &table, 14, 13);
        anchors.a.symbol = 61;
        assert!(matches!(
            solve_orientation(&poly, &table, &anchors, &[]),
            Err(PentakisError::SymbolOutOfRange(61))
        ));
    }

    #[test]
    fn test_parallel_anchors_rejected() {
        let poly = Polyhedron::new();
        let table = modular_table();
        let dir = poly.face_direction(table.entry(14).unwrap());
        let anchors = StarmapAnchors {
            a: StarmapVector {
                symbol: 14,
                direction: dir,
            },
            b: StarmapVector {
                symbol: 13,
                direction: dir,
            },
        };
        assert!(matches!(
            solve_orientation(&poly, &table, &anchors, &[]),
            Err(PentakisError::DegenerateAnchors { .. })
        ));
    }

    #[test]
    fn test_zero_anchor_rejected() {
        let poly = Polyhedron::new();
        let table = modular_table();
        let mut anchors = centroid_anchors(&poly, &table, 14, 13);
        anchors.b.direction = DVec3::ZERO;
        assert!(matches!(
            solve_orientation(&poly, &table, &anchors, &[]),
            Err(PentakisError::DegenerateAnchors { .. })
        ));
    }
}
