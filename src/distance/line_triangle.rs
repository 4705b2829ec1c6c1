//! Distance between a 3D line and a solid triangle.

use crate::primitives::{Line3, Segment3, Triangle3};
use crate::query::Distance;
use nalgebra::{Point3, RealField};

/// Result of a 3D line-triangle distance query. `closest[0]` is on the
/// line at `parameter`, `closest[1]` on the triangle at `barycentric`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTriangleDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub parameter: T,
    pub barycentric: [T; 3],
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for LineTriangleDistance3<T> {
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

impl<T: RealField + Copy> Distance<Triangle3<T>> for Line3<T> {
    type Output = LineTriangleDistance3<T>;

    fn distance(&self, triangle: &Triangle3<T>) -> Self::Output {
        let zero = T::zero();
        let one = T::one();
        let mut result = LineTriangleDistance3::default();

        // If the line pierces the triangle interior the distance is zero.
        // The triangle normal need not be unit length.
        let e1 = triangle.v[1] - triangle.v[0];
        let e2 = triangle.v[2] - triangle.v[0];
        let normal = e1.cross(&e2);
        let n_dot_d = normal.dot(&self.direction);
        if n_dot_d.abs() > zero {
            let n_dot_diff = normal.dot(&(self.origin - triangle.v[0]));
            let t_intersect = -n_dot_diff / n_dot_d;
            let y = self.point_at(t_intersect);
            let y_m_v0 = y - triangle.v[0];

            // Barycentric coordinates of the plane intersection.
            let e1_e1 = e1.dot(&e1);
            let e1_e2 = e1.dot(&e2);
            let e2_e2 = e2.dot(&e2);
            let e1_y = e1.dot(&y_m_v0);
            let e2_y = e2.dot(&y_m_v0);
            let det = e1_e1 * e2_e2 - e1_e2 * e1_e2;
            let b1 = (e2_e2 * e1_y - e1_e2 * e2_y) / det;
            let b2 = (e1_e1 * e2_y - e1_e2 * e1_y) / det;
            let b0 = one - b1 - b2;

            if b0 >= zero && b1 >= zero && b2 >= zero {
                result.parameter = t_intersect;
                result.barycentric = [b0, b1, b2];
                result.closest = [y, y];
                return result;
            }
        }

        // The line is parallel to the triangle or exits the plane outside
        // it; the closest triangle point is on an edge.
        let mut best_sqr: Option<T> = None;
        let mut i0 = 2;
        for i1 in 0..3 {
            let i2 = (i1 + 1) % 3;
            let edge = Segment3::new(triangle.v[i0], triangle.v[i1]);
            let (s, t) = line_segment_parameters(self, &edge);
            let line_closest = self.point_at(s);
            let edge_closest = edge.point_at(t);
            let sqr = (line_closest - edge_closest).norm_squared();
            if best_sqr.is_none_or(|best| sqr < best) {
                best_sqr = Some(sqr);
                result.sqr_distance = sqr;
                result.distance = sqr.sqrt();
                result.parameter = s;
                result.barycentric = [zero; 3];
                result.barycentric[i0] = one - t;
                result.barycentric[i1] = t;
                result.barycentric[i2] = zero;
                result.closest = [line_closest, edge_closest];
            }
            i0 = i1;
        }

        result
    }
}

// Closest-point parameters for a line against a segment. The segment
// parameter is clamped to [0, 1]; the line parameter is unconstrained.
pub(crate) fn line_segment_parameters<T: RealField + Copy>(
    line: &Line3<T>,
    segment: &Segment3<T>,
) -> (T, T) {
    let zero = T::zero();
    let seg_dir = segment.p1 - segment.p0;
    let diff = line.origin - segment.p0;
    let a = line.direction.dot(&line.direction);
    let b = line.direction.dot(&seg_dir);
    let c = seg_dir.dot(&seg_dir);
    let d = line.direction.dot(&diff);
    let e = seg_dir.dot(&diff);
    let det = a * c - b * b;

    let t = if det > zero {
        // Unconstrained minimum, then clamp the segment parameter.
        crate::math::saturate((a * e - b * d) / det)
    } else {
        // Parallel; any segment point works, pick its start.
        zero
    };
    let s = if a > zero { (b * t - d) / a } else { zero };
    (s, t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::Vector3;

    fn unit_triangle() -> Triangle3<f64> {
        Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn line_through_interior() {
        let line = Line3::new(Point3::new(0.25, 0.25, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let result = line.distance(&unit_triangle());
        assert!(result.distance < TOLERANCE);
        assert!((result.parameter - 5.0).abs() < TOLERANCE);
        assert!((result.closest[1] - Point3::new(0.25, 0.25, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn parallel_line_above_triangle() {
        let line = Line3::new(Point3::new(0.0, 0.0, 2.0), Vector3::new(1.0, 0.0, 0.0));
        let result = line.distance(&unit_triangle());
        assert!((result.distance - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_missing_triangle_uses_edge() {
        // Vertical line beyond the hypotenuse.
        let line = Line3::new(Point3::new(1.0, 1.0, -3.0), Vector3::new(0.0, 0.0, 1.0));
        let result = line.distance(&unit_triangle());
        assert!((result.closest[1] - Point3::new(0.5, 0.5, 0.0)).norm() < TOLERANCE);
        assert!((result.distance - std::f64::consts::FRAC_1_SQRT_2).abs() < TOLERANCE);
        let b = result.barycentric;
        assert!(b[0].abs() < TOLERANCE);
        assert!((b[1] - 0.5).abs() < TOLERANCE);
        assert!((b[2] - 0.5).abs() < TOLERANCE);
    }
}
