//! Hierarchical direction addressing on an oriented pentakis dodecahedron.
//!
//! This crate resolves an arbitrary 3D direction into an address on a fixed
//! combinatorial polyhedron: 60 triangular faces (an icosahedron apex over
//! each dodecahedron edge), each face recursively subdivided into 64
//! sub-triangles across 7 nested levels. The polyhedron's absolute
//! orientation is unknown up front; it is solved by aligning two known face
//! directions with two externally measured "starmap" vectors, and every
//! additional starmap vector verifies the result.
//!
//! Address resolution runs twice, independently: once by raycasting through
//! the subdivision hierarchy and once by integer arithmetic on barycentric
//! coordinates. The two paths must agree; their divergence on any input is a
//! correctness signal, so both are kept first-class.
//!
//! # Example
//!
//! ```
//! use pentakis::{solve_orientation, FaceEntry, FaceTable, Polyhedron};
//! use pentakis::{StarmapAnchors, StarmapVector};
//!
//! let poly = Polyhedron::new();
//! let table = FaceTable::new(
//!     (0..60usize)
//!         .map(|k| FaceEntry { ico: k % 12, dod_a: k % 20, dod_b: (k + 1) % 20 })
//!         .collect(),
//! )
//! .unwrap();
//!
//! // Anchor the orientation on the faces' own directions: the solved
//! // rotation must be the identity.
//! let anchor = |symbol: u32| StarmapVector {
//!     symbol,
//!     direction: poly.face_direction(table.entry(symbol).unwrap()),
//! };
//! let anchors = StarmapAnchors { a: anchor(14), b: anchor(13) };
//!
//! let solution = solve_orientation(&poly, &table, &anchors, &[]).unwrap();
//! assert!((solution.rotation.w.abs() - 1.0).abs() < 1e-9);
//! ```

mod error;
mod intersect;
mod orientation;
mod polyhedron;
mod subdivision;
mod types;

pub mod loader;
pub mod validation;

pub use error::PentakisError;
pub use intersect::{barycentric_to_cartesian, cartesian_to_barycentric, intersect, RayHit};
pub use orientation::{
    locate_face, solve_orientation, OrientationSolution, OrientedFaces, SimilarityCheck,
    StarmapAnchors, StarmapVector,
};
pub use polyhedron::Polyhedron;
pub use subdivision::{resolve_by_lattice, resolve_by_raycast};
pub use types::{FaceEntry, FaceTable, SymbolMap, FACE_COUNT, LEVELS, SUB_TRIANGLES};

use glam::DVec3;
use subdivision::SubdivisionGrid;

/// A fully resolved address: the face a target strikes plus both resolvers'
/// 7-level descent paths, raw and translated through the symbol map.
#[derive(Debug, Clone)]
pub struct Address {
    /// 1-based symbol id of the face the target intersects.
    pub face_symbol: u32,
    /// Slot path from the raycast resolver, coarsest level first.
    pub raycast_path: [u8; LEVELS],
    /// Slot path from the lattice resolver, coarsest level first.
    pub lattice_path: [u8; LEVELS],
    /// `raycast_path` translated through the symbol map.
    pub raycast_symbols: [u32; LEVELS],
    /// `lattice_path` translated through the symbol map.
    pub lattice_symbols: [u32; LEVELS],
}

impl Address {
    /// True when both resolvers produced the same path. Disagreement means a
    /// numerical or hierarchy problem and the address should not be trusted.
    pub fn methods_agree(&self) -> bool {
        self.raycast_path == self.lattice_path
    }
}

/// Output from a full resolve, including diagnostics.
#[derive(Debug, Clone)]
pub struct ResolveOutput {
    pub orientation: OrientationSolution,
    pub address: Address,
    pub diagnostics: ResolveDiagnostics,
}

/// Diagnostic information from a full resolve.
#[derive(Debug, Clone)]
pub struct ResolveDiagnostics {
    /// Whether the raycast and lattice resolvers agreed.
    pub methods_agree: bool,
    /// Worst cosine similarity over the held-out starmap vectors, if any
    /// were supplied. How close to 1.0 is close enough depends on the
    /// measurement quality, so no threshold is applied here.
    pub min_similarity: Option<f64>,
}

impl ResolveDiagnostics {
    /// Returns true if no issues were detected.
    pub fn is_clean(&self) -> bool {
        self.methods_agree
    }
}

/// Resolve a target direction within an already-oriented face set.
///
/// Fails if the target does not intersect exactly one face, or if either
/// subdivision resolver cannot complete all 7 levels.
pub fn resolve_address(
    faces: &OrientedFaces,
    symbols: &SymbolMap,
    target: DVec3,
) -> Result<Address, PentakisError> {
    let dir = target
        .try_normalize()
        .ok_or(PentakisError::DegenerateTarget)?;

    let face_symbol = locate_face(faces, dir)?;
    let tri = faces.triangle(face_symbol)?;

    let grid = SubdivisionGrid::new();
    let raycast_path = subdivision::resolve_by_raycast_with(&grid, dir, tri)?;
    let lattice_path = subdivision::resolve_by_lattice_with(&grid, dir, tri)?;

    Ok(Address {
        face_symbol,
        raycast_symbols: symbols.translate(&raycast_path),
        lattice_symbols: symbols.translate(&lattice_path),
        raycast_path,
        lattice_path,
    })
}

/// Solve the orientation from the starmap anchors, then resolve the target
/// direction to its full address.
pub fn resolve(
    poly: &Polyhedron,
    table: &FaceTable,
    symbols: &SymbolMap,
    anchors: &StarmapAnchors,
    extra: &[StarmapVector],
    target: DVec3,
) -> Result<ResolveOutput, PentakisError> {
    let orientation = solve_orientation(poly, table, anchors, extra)?;
    let faces = orientation.orient_faces(poly, table);
    let address = resolve_address(&faces, symbols, target)?;

    let diagnostics = ResolveDiagnostics {
        methods_agree: address.methods_agree(),
        min_similarity: orientation.min_similarity(),
    };

    Ok(ResolveOutput {
        orientation,
        address,
        diagnostics,
    })
}
