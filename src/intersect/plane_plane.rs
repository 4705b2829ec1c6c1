//! Intersection of two planes. Both normals must be unit length.

use crate::primitives::{Line3, Plane3};
use crate::query::{FindIntersection, TestIntersection};
use nalgebra::{Point3, RealField};

/// Result of a plane-plane find-intersection query.
///
/// Distinct nonparallel planes meet in `line` (`is_line` true). Identical
/// planes intersect in the whole plane, returned in `plane` with `is_line`
/// false. Parallel distinct planes do not intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePlaneIntersection3<T: RealField + Copy> {
    pub intersect: bool,
    pub is_line: bool,
    pub line: Line3<T>,
    pub plane: Plane3<T>,
}

impl<T: RealField + Copy> Default for PlanePlaneIntersection3<T> {
    fn default() -> Self {
        Self {
            intersect: false,
            is_line: false,
            line: Line3::new(Point3::origin(), nalgebra::Vector3::zeros()),
            plane: Plane3 {
                normal: nalgebra::Vector3::zeros(),
                constant: T::zero(),
            },
        }
    }
}

impl<T: RealField + Copy> TestIntersection<Plane3<T>> for Plane3<T> {
    fn test_intersection(&self, other: &Plane3<T>) -> bool {
        let one = T::one();
        let dot = self.normal.dot(&other.normal);
        if dot.abs() < one {
            return true;
        }
        // Parallel planes intersect only when coincident.
        let diff = if dot >= T::zero() {
            self.constant - other.constant
        } else {
            self.constant + other.constant
        };
        diff == T::zero()
    }
}

impl<T: RealField + Copy> FindIntersection<Plane3<T>> for Plane3<T> {
    type Output = PlanePlaneIntersection3<T>;

    fn find_intersection(&self, other: &Plane3<T>) -> Self::Output {
        let zero = T::zero();
        let one = T::one();
        let mut result = PlanePlaneIntersection3::default();

        let dot = self.normal.dot(&other.normal);
        if dot.abs() < one {
            // The point c0 * N0 + c1 * N1 satisfies both plane equations;
            // the line direction is the normal cross product.
            let inv_det = one / (one - dot * dot);
            let c0 = (self.constant - dot * other.constant) * inv_det;
            let c1 = (other.constant - dot * self.constant) * inv_det;
            result.intersect = true;
            result.is_line = true;
            result.line = Line3::new(
                Point3::from(self.normal * c0 + other.normal * c1),
                self.normal.cross(&other.normal).normalize(),
            );
            return result;
        }

        let diff = if dot >= zero {
            self.constant - other.constant
        } else {
            self.constant + other.constant
        };
        if diff == zero {
            result.intersect = true;
            result.is_line = false;
            result.plane = *self;
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::Vector3;

    #[test]
    fn orthogonal_planes_meet_in_line() {
        let xy: Plane3<f64> = Plane3::new(Vector3::z(), 0.0);
        let xz = Plane3::new(Vector3::y(), 0.0);
        assert!(xy.test_intersection(&xz));
        let result = xy.find_intersection(&xz);
        assert!(result.intersect && result.is_line);
        // The line is the x axis.
        assert!(result.line.origin.coords.norm() < TOLERANCE);
        assert!(result.line.direction.y.abs() < TOLERANCE);
        assert!(result.line.direction.z.abs() < TOLERANCE);
    }

    #[test]
    fn parallel_distinct_planes_miss() {
        let low = Plane3::new(Vector3::z(), 0.0);
        let high = Plane3::new(Vector3::z(), 3.0);
        assert!(!low.test_intersection(&high));
        assert!(!low.find_intersection(&high).intersect);
    }

    #[test]
    fn coincident_planes_with_opposite_normals() {
        let up = Plane3::new(Vector3::z(), 2.0);
        let down = Plane3::new(-Vector3::z(), -2.0);
        assert!(up.test_intersection(&down));
        let result = up.find_intersection(&down);
        assert!(result.intersect && !result.is_line);
    }

    #[test]
    fn offset_planes_line_lies_on_both() {
        let p0: Plane3<f64> = Plane3::new(Vector3::z(), 1.0);
        let p1 = Plane3::new(Vector3::x(), -2.0);
        let result = p0.find_intersection(&p1);
        assert!(result.is_line);
        let origin = result.line.origin;
        assert!((p0.normal.dot(&origin.coords) - p0.constant).abs() < TOLERANCE);
        assert!((p1.normal.dot(&origin.coords) - p1.constant).abs() < TOLERANCE);
    }
}
