//! Intersection of a 3D line or ray with a triangle.
//!
//! Solves Q + t * D = b1 * E1 + b2 * E2 with the sign-normalized triple
//! products so every rejection happens before any division. A line
//! parallel to the triangle reports no intersection even when coplanar.

use crate::primitives::{Line3, Ray3, Triangle3};
use crate::query::{FindIntersection, TestIntersection};
use nalgebra::{Point3, RealField, Vector3};

/// Result of a line/ray vs triangle find-intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTriangleIntersection3<T: RealField + Copy> {
    pub intersect: bool,
    pub parameter: T,
    pub triangle_bary: [T; 3],
    pub point: Point3<T>,
}

impl<T: RealField + Copy> Default for LineTriangleIntersection3<T> {
    fn default() -> Self {
        Self {
            intersect: false,
            parameter: T::zero(),
            triangle_bary: [T::zero(); 3],
            point: Point3::origin(),
        }
    }
}

// Sign-normalized setup shared by the four queries. Returns
// (sign-adjusted DdN, b1 numerator, b2 numerator, t numerator) when the
// barycentric rejections pass.
fn setup<T: RealField + Copy>(
    origin: &Point3<T>,
    direction: &Vector3<T>,
    triangle: &Triangle3<T>,
) -> Option<(T, T, T, T)> {
    let zero = T::zero();
    let diff = origin - triangle.v[0];
    let edge1 = triangle.v[1] - triangle.v[0];
    let edge2 = triangle.v[2] - triangle.v[0];
    let normal = edge1.cross(&edge2);

    let mut d_dot_n = direction.dot(&normal);
    let sign = if d_dot_n > zero {
        T::one()
    } else if d_dot_n < zero {
        d_dot_n = -d_dot_n;
        -T::one()
    } else {
        // Parallel; coplanar overlap is still reported as no intersection.
        return None;
    };

    let b1_numer = sign * direction.dot(&diff.cross(&edge2));
    if b1_numer < zero {
        return None;
    }
    let b2_numer = sign * direction.dot(&edge1.cross(&diff));
    if b2_numer < zero {
        return None;
    }
    if b1_numer + b2_numer > d_dot_n {
        return None;
    }
    let t_numer = -sign * diff.dot(&normal);
    Some((d_dot_n, b1_numer, b2_numer, t_numer))
}

fn finish<T: RealField + Copy>(
    origin: &Point3<T>,
    direction: &Vector3<T>,
    d_dot_n: T,
    b1_numer: T,
    b2_numer: T,
    t_numer: T,
) -> LineTriangleIntersection3<T> {
    let inv = T::one() / d_dot_n;
    let parameter = t_numer * inv;
    let b1 = b1_numer * inv;
    let b2 = b2_numer * inv;
    LineTriangleIntersection3 {
        intersect: true,
        parameter,
        triangle_bary: [T::one() - b1 - b2, b1, b2],
        point: origin + direction * parameter,
    }
}

impl<T: RealField + Copy> TestIntersection<Triangle3<T>> for Line3<T> {
    fn test_intersection(&self, triangle: &Triangle3<T>) -> bool {
        setup(&self.origin, &self.direction, triangle).is_some()
    }
}

impl<T: RealField + Copy> FindIntersection<Triangle3<T>> for Line3<T> {
    type Output = LineTriangleIntersection3<T>;

    fn find_intersection(&self, triangle: &Triangle3<T>) -> Self::Output {
        match setup(&self.origin, &self.direction, triangle) {
            Some((d_dot_n, b1, b2, t)) => {
                finish(&self.origin, &self.direction, d_dot_n, b1, b2, t)
            }
            None => LineTriangleIntersection3::default(),
        }
    }
}

impl<T: RealField + Copy> TestIntersection<Triangle3<T>> for Ray3<T> {
    fn test_intersection(&self, triangle: &Triangle3<T>) -> bool {
        // The ray additionally requires a nonnegative parameter.
        matches!(
            setup(&self.origin, &self.direction, triangle),
            Some((_, _, _, t_numer)) if t_numer >= T::zero()
        )
    }
}

impl<T: RealField + Copy> FindIntersection<Triangle3<T>> for Ray3<T> {
    type Output = LineTriangleIntersection3<T>;

    fn find_intersection(&self, triangle: &Triangle3<T>) -> Self::Output {
        match setup(&self.origin, &self.direction, triangle) {
            Some((d_dot_n, b1, b2, t)) if t >= T::zero() => {
                finish(&self.origin, &self.direction, d_dot_n, b1, b2, t)
            }
            _ => LineTriangleIntersection3::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn unit_triangle() -> Triangle3<f64> {
        Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn line_hits_interior() {
        let line = Line3::new(Point3::new(0.25, 0.25, 2.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(line.test_intersection(&unit_triangle()));
        let result = line.find_intersection(&unit_triangle());
        assert!(result.intersect);
        assert!((result.parameter - 2.0).abs() < TOLERANCE);
        assert!((result.point - Point3::new(0.25, 0.25, 0.0)).norm() < TOLERANCE);
        assert!((result.triangle_bary[0] - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn line_misses_triangle() {
        let line = Line3::new(Point3::new(2.0, 2.0, 2.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(!line.test_intersection(&unit_triangle()));
        assert!(!line.find_intersection(&unit_triangle()).intersect);
    }

    #[test]
    fn coplanar_line_reports_no_intersection() {
        let line = Line3::new(Point3::new(-1.0, 0.25, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(!line.test_intersection(&unit_triangle()));
    }

    #[test]
    fn ray_pointing_away_misses() {
        let ray = Ray3::new(Point3::new(0.25, 0.25, 2.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!ray.test_intersection(&unit_triangle()));
        assert!(!ray.find_intersection(&unit_triangle()).intersect);
        // The supporting line does intersect.
        let line = Line3::new(ray.origin, ray.direction);
        assert!(line.test_intersection(&unit_triangle()));
    }

    #[test]
    fn ray_toward_triangle_hits() {
        let ray = Ray3::new(Point3::new(0.25, 0.25, 2.0), Vector3::new(0.0, 0.0, -2.0));
        let result = ray.find_intersection(&unit_triangle());
        assert!(result.intersect);
        assert!((result.parameter - 1.0).abs() < TOLERANCE);
    }
}
