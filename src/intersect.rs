//! Origin-anchored ray–triangle intersection and barycentric conversion.
//!
//! Every ray in this crate starts at the coordinate-system origin (the center
//! of the polyhedron), which lets the Möller–Trumbore setup drop the ray
//! origin term: the source vector `s = origin - v0` is just `-v0`.

use glam::DVec3;

use crate::PentakisError;

/// Determinant guard for parallel/degenerate triangles.
///
/// This cannot be the usual 1e-7: after 7 subdivision levels the triangle
/// edges are about `1.1 / 8^7 ~ 5e-7` long, so legitimate determinants scale
/// like their squared length, around 1e-13. The guard sits far below that and
/// only catches exact-parallel or collapsed-triangle degeneracy.
pub(crate) const DET_EPS: f64 = 1e-30;

/// Positive-parameter guard rejecting behind-origin intersections.
///
/// `t` is the distance along the (unit) target direction to the triangle
/// plane, which stays O(1) at every subdivision depth, so this guard does not
/// need the same treatment as `DET_EPS`.
pub(crate) const T_EPS: f64 = 1e-12;

/// An accepted ray–triangle intersection.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Intersection point, `dir * t`.
    pub point: DVec3,
    /// Barycentric weight of `v1` at the hit.
    pub u: f64,
    /// Barycentric weight of `v2` at the hit.
    pub v: f64,
    /// Ray parameter of the hit.
    pub t: f64,
}

/// Test whether the ray from the origin along `dir` crosses the triangle at a
/// positive parameter.
///
/// A near-zero determinant means the ray is parallel to the triangle's plane;
/// that is a degenerate (miss) case, not an error.
pub fn intersect(dir: DVec3, tri: &[DVec3; 3]) -> Option<RayHit> {
    let [v0, v1, v2] = *tri;
    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let h = dir.cross(e2);
    let a = e1.dot(h);
    if a.abs() < DET_EPS {
        return None;
    }

    let f = 1.0 / a;
    let u = f * (-v0).dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = (-v0).cross(e1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * e2.dot(q);
    if t > T_EPS {
        Some(RayHit {
            point: dir * t,
            u,
            v,
            t,
        })
    } else {
        None
    }
}

/// Barycentric coordinates of the point where the ray through `p` crosses the
/// triangle's plane.
///
/// Solves the same system as [`intersect`] with `p` as the ray direction, but
/// without any range or sidedness rejection: for a `p` on the triangle's
/// plane this is plain Cartesian-to-barycentric conversion, and for any other
/// `p` it is the central projection through the origin. The third coordinate
/// is the implied `1 - u - v`.
pub fn cartesian_to_barycentric(p: DVec3, tri: &[DVec3; 3]) -> Result<(f64, f64), PentakisError> {
    let [v0, v1, v2] = *tri;
    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let h = p.cross(e2);
    let a = e1.dot(h);
    if a.abs() < DET_EPS {
        return Err(PentakisError::DegenerateTriangle);
    }

    let f = 1.0 / a;
    let u = f * (-v0).dot(h);
    let q = (-v0).cross(e1);
    let v = f * p.dot(q);
    Ok((u, v))
}

/// The point at barycentric `(u, v)` on the triangle's plane.
#[inline]
pub fn barycentric_to_cartesian(u: f64, v: f64, tri: &[DVec3; 3]) -> DVec3 {
    let [v0, v1, v2] = *tri;
    v0 * (1.0 - u - v) + v1 * u + v2 * v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_triangle() -> [DVec3; 3] {
        [
            DVec3::new(0.2, -0.3, 1.0),
            DVec3::new(0.9, 0.1, 0.8),
            DVec3::new(-0.1, 0.8, 0.7),
        ]
    }

    #[test]
    fn test_hit_through_interior() {
        let tri = test_triangle();
        let interior = barycentric_to_cartesian(0.3, 0.3, &tri);
        let hit = intersect(interior.normalize(), &tri).expect("interior ray must hit");
        assert!((hit.u - 0.3).abs() < 1e-12);
        assert!((hit.v - 0.3).abs() < 1e-12);
        assert!((hit.point - interior).length() < 1e-12);
        assert!(hit.t > 0.0);
    }

    #[test]
    fn test_miss_outside() {
        let tri = test_triangle();
        let outside = barycentric_to_cartesian(0.8, 0.8, &tri);
        assert!(intersect(outside.normalize(), &tri).is_none());
    }

    #[test]
    fn test_behind_origin_rejected() {
        let tri = test_triangle();
        let interior = barycentric_to_cartesian(0.25, 0.4, &tri);
        assert!(intersect(-interior.normalize(), &tri).is_none());
    }

    #[test]
    fn test_parallel_ray_is_a_miss() {
        // Plane x = 1, ray along +y: exactly parallel, determinant exactly 0.
        let tri = [
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
        ];
        assert!(intersect(DVec3::Y, &tri).is_none());
    }

    #[test]
    fn test_barycentric_round_trip() {
        let tri = test_triangle();
        for &(u, v) in &[(0.1, 0.1), (0.05, 0.9), (1.0 / 3.0, 1.0 / 3.0), (0.0, 0.0)] {
            let p = barycentric_to_cartesian(u, v, &tri);
            let (u2, v2) = cartesian_to_barycentric(p, &tri).unwrap();
            assert!((u - u2).abs() < 1e-9, "u: {} vs {}", u, u2);
            assert!((v - v2).abs() < 1e-9, "v: {} vs {}", v, v2);
        }
    }

    #[test]
    fn test_central_projection_is_scale_invariant() {
        let tri = test_triangle();
        let p = barycentric_to_cartesian(0.2, 0.5, &tri);
        let (u1, v1) = cartesian_to_barycentric(p, &tri).unwrap();
        let (u2, v2) = cartesian_to_barycentric(p * 7.5, &tri).unwrap();
        assert!((u1 - u2).abs() < 1e-12);
        assert!((v1 - v2).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_triangle_reported() {
        // Integer-valued colinear vertices keep every product exact, so the
        // determinant is exactly zero rather than rounding noise.
        let collapsed = [
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(2.0, 4.0, 6.0),
            DVec3::new(3.0, 6.0, 9.0),
        ];
        assert!(matches!(
            cartesian_to_barycentric(DVec3::X, &collapsed),
            Err(PentakisError::DegenerateTriangle)
        ));
    }
}
