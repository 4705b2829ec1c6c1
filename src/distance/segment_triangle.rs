//! Distance between a 3D segment and a solid triangle.

use crate::primitives::{Line3, Segment3, Triangle3};
use crate::query::Distance;
use nalgebra::{Point3, RealField};

/// Result of a 3D segment-triangle distance query. `closest[0]` is on the
/// segment at `parameter`, `closest[1]` on the triangle at `barycentric`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTriangleDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub parameter: T,
    pub barycentric: [T; 3],
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for SegmentTriangleDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            parameter: T::zero(),
            barycentric: [T::zero(); 3],
            closest: [Point3::origin(); 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Triangle3<T>> for Segment3<T> {
    type Output = SegmentTriangleDistance3<T>;

    fn distance(&self, triangle: &Triangle3<T>) -> Self::Output {
        let zero = T::zero();
        let one = T::one();

        let line = Line3::new(self.p0, self.p1 - self.p0);
        let lt_result = line.distance(triangle);
        if lt_result.parameter >= zero && lt_result.parameter <= one {
            return SegmentTriangleDistance3 {
                distance: lt_result.distance,
                sqr_distance: lt_result.sqr_distance,
                parameter: lt_result.parameter,
                barycentric: lt_result.barycentric,
                closest: lt_result.closest,
            };
        }

        // The line minimum is outside the segment; the nearer endpoint is
        // closest to the triangle.
        let (endpoint, parameter) = if lt_result.parameter < zero {
            (self.p0, zero)
        } else {
            (self.p1, one)
        };
        let pt_result = endpoint.distance(triangle);
        SegmentTriangleDistance3 {
            distance: pt_result.distance,
            sqr_distance: pt_result.sqr_distance,
            parameter,
            barycentric: pt_result.barycentric,
            closest: [endpoint, pt_result.closest[1]],
        }
    }
}
