//! Fixed vertex sets of the combinatorial polyhedron.
//!
//! The pentakis dodecahedron is built from a regular icosahedron (pyramid
//! apices) and a regular dodecahedron (pentagon corners) sharing a common
//! center. Which apex pairs with which corners is the face table's business;
//! this module only owns the raw geometry.

use glam::DVec3;

use crate::types::FaceEntry;
use crate::types::{DOD_VERTICES, ICO_VERTICES};

/// The two fixed vertex sets, projected onto the unit sphere.
///
/// Passed by reference into solves so that solves stay independently testable;
/// nothing in this crate keeps polyhedron state in globals.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    pub icosahedron: [DVec3; ICO_VERTICES],
    pub dodecahedron: [DVec3; DOD_VERTICES],
}

impl Polyhedron {
    /// Build the vertex sets and normalize every vertex once.
    pub fn new() -> Self {
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let iphi = 1.0 / phi;

        // Icosahedron: cyclic permutations of (0, +/-1, +/-phi).
        let icosahedron = [
            DVec3::new(0.0, 1.0, phi),
            DVec3::new(0.0, -1.0, phi),
            DVec3::new(0.0, 1.0, -phi),
            DVec3::new(0.0, -1.0, -phi),
            DVec3::new(phi, 0.0, 1.0),
            DVec3::new(phi, 0.0, -1.0),
            DVec3::new(-phi, 0.0, 1.0),
            DVec3::new(-phi, 0.0, -1.0),
            DVec3::new(1.0, phi, 0.0),
            DVec3::new(-1.0, phi, 0.0),
            DVec3::new(1.0, -phi, 0.0),
            DVec3::new(-1.0, -phi, 0.0),
        ];

        // Dodecahedron: (+/-1, +/-1, +/-1) and cyclic permutations of
        // (+/-phi, +/-1/phi, 0).
        let dodecahedron = [
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(-1.0, 1.0, 1.0),
            DVec3::new(1.0, -1.0, 1.0),
            DVec3::new(-1.0, -1.0, 1.0),
            DVec3::new(1.0, 1.0, -1.0),
            DVec3::new(-1.0, 1.0, -1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::new(phi, iphi, 0.0),
            DVec3::new(-phi, iphi, 0.0),
            DVec3::new(phi, -iphi, 0.0),
            DVec3::new(-phi, -iphi, 0.0),
            DVec3::new(0.0, phi, iphi),
            DVec3::new(0.0, -phi, iphi),
            DVec3::new(0.0, phi, -iphi),
            DVec3::new(0.0, -phi, -iphi),
            DVec3::new(iphi, 0.0, phi),
            DVec3::new(iphi, 0.0, -phi),
            DVec3::new(-iphi, 0.0, phi),
            DVec3::new(-iphi, 0.0, -phi),
        ];

        Self {
            icosahedron: icosahedron.map(|v| v.normalize()),
            dodecahedron: dodecahedron.map(|v| v.normalize()),
        }
    }

    /// The three vertices of a face, in table order (apex, then the two
    /// dodecahedron corners).
    #[inline]
    pub fn face_triangle(&self, entry: &FaceEntry) -> [DVec3; 3] {
        [
            self.icosahedron[entry.ico],
            self.dodecahedron[entry.dod_a],
            self.dodecahedron[entry.dod_b],
        ]
    }

    /// The direction vector associated with a face. Note that this is *not*
    /// the triangle's normal: it is the midpoint of the triangle, computed by
    /// summing the vertex positions and normalizing.
    #[inline]
    pub fn face_direction(&self, entry: &FaceEntry) -> DVec3 {
        let [a, b, c] = self.face_triangle(entry);
        (a + b + c).normalize()
    }
}

impl Default for Polyhedron {
    fn default() -> Self {
        Self::new()
    }
}
