//! Distance between two solid triangles in 3D.
//!
//! The closest pair is attained either on an edge of one triangle against
//! the other triangle or at interior-interior contact, which the edge
//! sweeps also detect because intersecting triangles meet at an edge
//! crossing. All six edge-triangle queries are run and the minimum kept.

use crate::primitives::{Segment3, Triangle3};
use crate::query::Distance;
use nalgebra::{Point3, RealField};

/// Result of a triangle-triangle distance query. `closest[i]` lies on
/// triangle `i` with coordinates `barycentric[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleTriangleDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub barycentric: [[T; 3]; 2],
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for TriangleTriangleDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            barycentric: [[T::zero(); 3]; 2],
            closest: [Point3::origin(); 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Triangle3<T>> for Triangle3<T> {
    type Output = TriangleTriangleDistance3<T>;

    fn distance(&self, other: &Triangle3<T>) -> Self::Output {
        let zero = T::zero();
        let one = T::one();
        let mut result = TriangleTriangleDistance3::default();
        let mut best_sqr: Option<T> = None;

        // Edges of self against the other triangle.
        let mut i0 = 2;
        for i1 in 0..3 {
            let edge = Segment3::new(self.v[i0], self.v[i1]);
            let st_result = edge.distance(other);
            if best_sqr.is_none_or(|best| st_result.sqr_distance < best) {
                best_sqr = Some(st_result.sqr_distance);
                result.sqr_distance = st_result.sqr_distance;
                result.closest = st_result.closest;
                result.barycentric[0] = [zero; 3];
                result.barycentric[0][i0] = one - st_result.parameter;
                result.barycentric[0][i1] = st_result.parameter;
                result.barycentric[1] = st_result.barycentric;
            }
            if result.sqr_distance == zero {
                result.distance = zero;
                return result;
            }
            i0 = i1;
        }

        // Edges of the other triangle against self.
        let mut i0 = 2;
        for i1 in 0..3 {
            let edge = Segment3::new(other.v[i0], other.v[i1]);
            let st_result = edge.distance(self);
            if best_sqr.is_none_or(|best| st_result.sqr_distance < best) {
                best_sqr = Some(st_result.sqr_distance);
                result.sqr_distance = st_result.sqr_distance;
                result.closest = [st_result.closest[1], st_result.closest[0]];
                result.barycentric[0] = st_result.barycentric;
                result.barycentric[1] = [zero; 3];
                result.barycentric[1][i0] = one - st_result.parameter;
                result.barycentric[1][i1] = st_result.parameter;
            }
            if result.sqr_distance == zero {
                result.distance = zero;
                return result;
            }
            i0 = i1;
        }

        result.distance = result.sqr_distance.sqrt();
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn base_triangle() -> Triangle3<f64> {
        Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        )
    }

    #[test]
    fn stacked_parallel_triangles() {
        let other = Triangle3::new(
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(2.0, 0.0, 3.0),
            Point3::new(0.0, 2.0, 3.0),
        );
        let result = base_triangle().distance(&other);
        assert!((result.distance - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn intersecting_triangles_have_zero_distance() {
        let other = Triangle3::new(
            Point3::new(0.5, 0.5, -1.0),
            Point3::new(0.5, 0.5, 1.0),
            Point3::new(3.0, 3.0, 1.0),
        );
        let result = base_triangle().distance(&other);
        assert!(result.distance < TOLERANCE);
    }

    #[test]
    fn query_is_symmetric() {
        let other = Triangle3::new(
            Point3::new(4.0, 0.0, 1.0),
            Point3::new(6.0, 0.0, 1.0),
            Point3::new(4.0, 2.0, 1.0),
        );
        let forward = base_triangle().distance(&other);
        let reverse = other.distance(&base_triangle());
        assert!((forward.distance - reverse.distance).abs() < TOLERANCE);
        assert!((forward.closest[0] - reverse.closest[1]).norm() < TOLERANCE);
    }

    #[test]
    fn vertex_to_vertex_configuration() {
        // The apex (3, 1, 0) of the second triangle is nearest to the
        // vertex (2, 0, 0) of the first.
        let other = Triangle3::new(
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(5.0, 2.0, 0.0),
        );
        let result = base_triangle().distance(&other);
        assert!((result.closest[1] - Point3::new(3.0, 1.0, 0.0)).norm() < TOLERANCE);
        assert!((result.closest[0] - Point3::new(2.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((result.distance - 2.0_f64.sqrt()).abs() < TOLERANCE);
    }
}
