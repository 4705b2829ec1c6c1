use nalgebra::{Point3, RealField, Vector3};

/// Plane in 3D: the set of points `X` with `dot(normal, X) = constant`.
///
/// Queries that report true distances assume `normal` is unit length;
/// classification-only queries work with any nonzero normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3<T: RealField + Copy> {
    pub normal: Vector3<T>,
    pub constant: T,
}

impl<T: RealField + Copy> Plane3<T> {
    pub fn new(normal: Vector3<T>, constant: T) -> Self {
        Self { normal, constant }
    }

    /// Plane through `point` with the given normal.
    pub fn from_point_normal(point: Point3<T>, normal: Vector3<T>) -> Self {
        Self {
            normal,
            constant: normal.dot(&point.coords),
        }
    }

    /// Signed distance from `point` to the plane (exact when the normal is
    /// unit length, scaled by `|normal|` otherwise).
    #[must_use]
    pub fn signed_distance(&self, point: &Point3<T>) -> T {
        self.normal.dot(&point.coords) - self.constant
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn signed_distance_sides() {
        let plane: Plane3<f64> = Plane3::from_point_normal(Point3::new(0.0, 0.0, 2.0), Vector3::z());
        assert!((plane.signed_distance(&Point3::new(5.0, -3.0, 2.0))).abs() < TOLERANCE);
        assert!((plane.signed_distance(&Point3::new(0.0, 0.0, 5.0)) - 3.0).abs() < TOLERANCE);
        assert!((plane.signed_distance(&Point3::new(0.0, 0.0, 0.0)) + 2.0).abs() < TOLERANCE);
    }
}
