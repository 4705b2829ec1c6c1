//! Intersection of a plane with a circle in 3D. The circle is a curve.

use crate::primitives::{Circle3, Plane3};
use crate::query::{FindIntersection, TestIntersection};
use nalgebra::{Point3, RealField, Vector3};

/// Result of a plane-circle find-intersection query.
///
/// The intersection is empty, one tangent point, two points, or the whole
/// circle when the circle lies in the plane. The whole-circle case sets
/// `num_intersections` to `usize::MAX` and returns the input circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneCircleIntersection3<T: RealField + Copy> {
    pub intersect: bool,
    pub num_intersections: usize,
    pub point: [Point3<T>; 2],
    pub circle: Circle3<T>,
}

impl<T: RealField + Copy> Default for PlaneCircleIntersection3<T> {
    fn default() -> Self {
        Self {
            intersect: false,
            num_intersections: 0,
            point: [Point3::origin(); 2],
            circle: Circle3 {
                center: Point3::origin(),
                normal: Vector3::zeros(),
                radius: T::zero(),
            },
        }
    }
}

impl<T: RealField + Copy> TestIntersection<Circle3<T>> for Plane3<T> {
    fn test_intersection(&self, circle: &Circle3<T>) -> bool {
        let circle_plane = Plane3::from_point_normal(circle.center, circle.normal);
        let pp_result = self.find_intersection(&circle_plane);
        if !pp_result.intersect {
            return false;
        }
        if !pp_result.is_line {
            // The circle lies in the plane.
            return true;
        }

        // Real roots of the line-circle quadratic imply intersection.
        let diff = pp_result.line.origin - circle.center;
        let a2 = pp_result.line.direction.dot(&pp_result.line.direction);
        let a1 = diff.dot(&pp_result.line.direction);
        let a0 = diff.dot(&diff) - circle.radius * circle.radius;
        a1 * a1 - a0 * a2 >= T::zero()
    }
}

impl<T: RealField + Copy> FindIntersection<Circle3<T>> for Plane3<T> {
    type Output = PlaneCircleIntersection3<T>;

    fn find_intersection(&self, circle: &Circle3<T>) -> Self::Output {
        let zero = T::zero();
        let mut result = PlaneCircleIntersection3::default();

        let circle_plane = Plane3::from_point_normal(circle.center, circle.normal);
        let pp_result = self.find_intersection(&circle_plane);
        if !pp_result.intersect {
            return result;
        }
        if !pp_result.is_line {
            result.intersect = true;
            result.num_intersections = usize::MAX;
            result.circle = *circle;
            return result;
        }

        // Intersect the plane-plane line with the circle:
        // r^2 = |t D + P - C|^2 gives a2 t^2 + 2 a1 t + a0 = 0.
        let diff = pp_result.line.origin - circle.center;
        let a2 = pp_result.line.direction.dot(&pp_result.line.direction);
        let a1 = diff.dot(&pp_result.line.direction);
        let a0 = diff.dot(&diff) - circle.radius * circle.radius;
        let discr = a1 * a1 - a0 * a2;
        if discr < zero {
            return result;
        }

        if discr == zero {
            // Tangency.
            result.intersect = true;
            result.num_intersections = 1;
            let point = pp_result.line.origin - pp_result.line.direction * (a1 / a2);
            result.point = [point, point];
            return result;
        }

        let root = discr.sqrt();
        result.intersect = true;
        result.num_intersections = 2;
        result.point[0] = pp_result.line.origin - pp_result.line.direction * ((a1 + root) / a2);
        result.point[1] = pp_result.line.origin - pp_result.line.direction * ((a1 - root) / a2);
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn xz_circle() -> Circle3<f64> {
        // Unit circle in the y = 0 plane.
        Circle3::new(Point3::origin(), Vector3::y(), 1.0)
    }

    #[test]
    fn crossing_plane_gives_two_points() {
        let plane = Plane3::new(Vector3::z(), 0.0);
        let circle = xz_circle();
        assert!(plane.test_intersection(&circle));
        let result = plane.find_intersection(&circle);
        assert_eq!(result.num_intersections, 2);
        for p in &result.point {
            assert!(p.z.abs() < TOLERANCE);
            assert!((p.coords.norm() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn tangent_plane_gives_one_point() {
        let plane = Plane3::new(Vector3::z(), 1.0);
        let result = plane.find_intersection(&xz_circle());
        assert!(result.intersect);
        assert_eq!(result.num_intersections, 1);
        assert!((result.point[0] - Point3::new(0.0, 0.0, 1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn missing_plane() {
        let plane = Plane3::new(Vector3::z(), 2.0);
        assert!(!plane.test_intersection(&xz_circle()));
        assert!(!plane.find_intersection(&xz_circle()).intersect);
    }

    #[test]
    fn coplanar_circle_reports_whole_circle() {
        let plane = Plane3::new(Vector3::y(), 0.0);
        let circle = xz_circle();
        let result = plane.find_intersection(&circle);
        assert!(result.intersect);
        assert_eq!(result.num_intersections, usize::MAX);
        assert_eq!(result.circle, circle);
    }

    #[test]
    fn parallel_offset_circle_plane() {
        let plane = Plane3::new(Vector3::y(), 5.0);
        assert!(!plane.test_intersection(&xz_circle()));
    }
}
