//! Error types for orientation solving and address resolution.

use std::fmt;

/// Errors that can occur while solving an orientation or resolving an address.
///
/// All of these are local, recoverable failures: the solve did not produce an
/// answer for this input. None of them should abort the process.
#[derive(Debug, Clone)]
pub enum PentakisError {
    /// A symbol id outside `1..=60` was used to index the face table.
    SymbolOutOfRange(u32),

    /// The face table did not contain exactly 60 entries.
    WrongFaceCount(usize),

    /// The symbol map did not contain exactly 64 entries.
    WrongSymbolCount(usize),

    /// A face entry referenced a vertex that does not exist
    /// (icosahedron indices are `0..12`, dodecahedron indices `0..20`).
    VertexOutOfRange {
        symbol: u32,
        ico: usize,
        dod_a: usize,
        dod_b: usize,
    },

    /// The two starmap anchor directions are (anti)parallel, so no
    /// orthonormal frame can be built from them.
    DegenerateAnchors { similarity: f64 },

    /// The target vector is too short to define a direction.
    DegenerateTarget,

    /// Near-zero determinant in a barycentric solve. This never happens for
    /// a point genuinely inside a non-degenerate triangle, so mid-resolve it
    /// indicates a corrupted hierarchy rather than bad user input.
    DegenerateTriangle,

    /// The target direction intersected none of the 60 faces.
    NoFaceHit,

    /// The target direction intersected more than one face. Carries every
    /// hit symbol id; the caller decides, we never silently pick one.
    AmbiguousFace(Vec<u32>),

    /// The queried point lies measurably outside the face triangle.
    OutsideFace { u: f64, v: f64 },

    /// A subdivision level produced no sub-triangle hit, which means the
    /// starting face or an earlier path element was mis-identified.
    SubdivisionMiss { level: usize },

    /// Internal inconsistency. This should not happen with valid input and
    /// indicates a bug.
    ResolutionFailed(String),
}

impl fmt::Display for PentakisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PentakisError::SymbolOutOfRange(id) => {
                write!(f, "symbol id {} out of range (expected 1..=60)", id)
            }
            PentakisError::WrongFaceCount(n) => {
                write!(f, "face table has {} entries, expected exactly 60", n)
            }
            PentakisError::WrongSymbolCount(n) => {
                write!(f, "symbol map has {} entries, expected exactly 64", n)
            }
            PentakisError::VertexOutOfRange {
                symbol,
                ico,
                dod_a,
                dod_b,
            } => {
                write!(
                    f,
                    "face entry for symbol {} references out-of-range vertices \
                     (ico {}, dod {} and {})",
                    symbol, ico, dod_a, dod_b
                )
            }
            PentakisError::DegenerateAnchors { similarity } => {
                write!(
                    f,
                    "anchor directions are too close to parallel (cos = {}) to span a frame",
                    similarity
                )
            }
            PentakisError::DegenerateTarget => {
                write!(f, "target vector has near-zero length")
            }
            PentakisError::DegenerateTriangle => {
                write!(f, "degenerate triangle: barycentric determinant near zero")
            }
            PentakisError::NoFaceHit => {
                write!(f, "target direction does not intersect the polyhedron")
            }
            PentakisError::AmbiguousFace(symbols) => {
                write!(f, "target direction intersects {} faces: ", symbols.len())?;
                for (i, s) in symbols.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                Ok(())
            }
            PentakisError::OutsideFace { u, v } => {
                write!(
                    f,
                    "point lies outside the face triangle (u = {}, v = {})",
                    u, v
                )
            }
            PentakisError::SubdivisionMiss { level } => {
                write!(f, "no sub-triangle hit at subdivision level {}", level)
            }
            PentakisError::ResolutionFailed(msg) => {
                write!(f, "resolution failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for PentakisError {}
