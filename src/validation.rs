//! Geometric validation sweeps for an oriented face set.
//!
//! The 60 faces must tile the sphere: a dense sample of directions should
//! classify each sample into exactly one face, with ties only on shared
//! edges. Useful for debugging face tables and catching numerical issues.

use glam::DVec3;

use crate::intersect::intersect;
use crate::orientation::OrientedFaces;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

macro_rules! maybe_par_iter {
    ($v:expr) => {{
        #[cfg(feature = "parallel")]
        {
            $v.par_iter()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $v.iter()
        }
    }};
}

/// Result of sweeping a direction sample over an oriented face set.
#[derive(Debug, Clone)]
pub struct TilingReport {
    /// Number of directions tested.
    pub samples: usize,
    /// Directions classified into exactly one face.
    pub unique_hits: usize,
    /// Directions hitting exactly two faces (shared-edge ties; permitted).
    pub edge_ties: usize,
    /// Directions hitting no face at all.
    pub gaps: usize,
    /// Directions hitting three or more faces.
    pub overlaps: usize,
    /// Face vertices whose length strays from 1 by more than 1e-9.
    pub vertices_off_sphere: usize,
}

impl TilingReport {
    /// No gaps, no overlaps, all vertices on the sphere. Edge ties are
    /// boundary behavior, not a defect.
    pub fn is_valid(&self) -> bool {
        self.gaps == 0 && self.overlaps == 0 && self.vertices_off_sphere == 0
    }

    /// Format a summary of any issues found.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return format!(
                "valid ({} unique, {} edge ties)",
                self.unique_hits, self.edge_ties
            );
        }
        let mut issues = Vec::new();
        if self.gaps > 0 {
            issues.push(format!("{} gaps", self.gaps));
        }
        if self.overlaps > 0 {
            issues.push(format!("{} overlaps", self.overlaps));
        }
        if self.vertices_off_sphere > 0 {
            issues.push(format!("{} vertices off sphere", self.vertices_off_sphere));
        }
        issues.join(", ")
    }
}

impl std::fmt::Display for TilingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TilingReport {{ samples={}, {} }}",
            self.samples,
            self.summary()
        )
    }
}

/// Deterministic quasi-uniform direction sample (Fibonacci spiral).
pub fn fibonacci_directions(n: usize) -> Vec<DVec3> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - (2.0 * i as f64 + 1.0) / n as f64;
            let radius = (1.0 - y * y).sqrt();
            let theta = golden_angle * i as f64;
            DVec3::new(radius * theta.cos(), y, radius * theta.sin())
        })
        .collect()
}

/// Sweep `samples` quasi-uniform directions over the face set and count how
/// many faces each one strikes.
pub fn validate_tiling(faces: &OrientedFaces, samples: usize) -> TilingReport {
    let directions = fibonacci_directions(samples);

    let hit_counts: Vec<usize> = maybe_par_iter!(directions)
        .map(|&dir| {
            faces
                .triangles
                .iter()
                .filter(|tri| intersect(dir, tri).is_some())
                .count()
        })
        .collect();

    let mut report = TilingReport {
        samples,
        unique_hits: 0,
        edge_ties: 0,
        gaps: 0,
        overlaps: 0,
        vertices_off_sphere: 0,
    };
    for count in hit_counts {
        match count {
            0 => report.gaps += 1,
            1 => report.unique_hits += 1,
            2 => report.edge_ties += 1,
            _ => report.overlaps += 1,
        }
    }

    for tri in &faces.triangles {
        for v in tri {
            if (v.length() - 1.0).abs() > 1e-9 {
                report.vertices_off_sphere += 1;
            }
        }
    }

    report
}
