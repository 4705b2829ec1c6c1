use nalgebra::{Point2, Point3, RealField, Vector2, Vector3};

/// Line in 2D, parameterized as `origin + t * direction` for all real `t`.
///
/// The direction is not required to be unit length; queries that need a
/// normalized direction say so.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2<T: RealField + Copy> {
    pub origin: Point2<T>,
    pub direction: Vector2<T>,
}

impl<T: RealField + Copy> Line2<T> {
    pub fn new(origin: Point2<T>, direction: Vector2<T>) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: T) -> Point2<T> {
        self.origin + self.direction * t
    }
}

/// Ray in 2D, parameterized as `origin + t * direction` for `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2<T: RealField + Copy> {
    pub origin: Point2<T>,
    pub direction: Vector2<T>,
}

impl<T: RealField + Copy> Ray2<T> {
    pub fn new(origin: Point2<T>, direction: Vector2<T>) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: T) -> Point2<T> {
        self.origin + self.direction * t
    }
}

/// Segment in 2D with endpoints `p0` and `p1`, parameterized as
/// `(1 - t) * p0 + t * p1` for `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<T: RealField + Copy> {
    pub p0: Point2<T>,
    pub p1: Point2<T>,
}

impl<T: RealField + Copy> Segment2<T> {
    pub fn new(p0: Point2<T>, p1: Point2<T>) -> Self {
        Self { p0, p1 }
    }

    /// Point at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: T) -> Point2<T> {
        self.p0 + (self.p1 - self.p0) * t
    }

    /// Centered form `(center, direction, extent)` with a unit-length
    /// direction and `extent` half the segment length.
    #[must_use]
    pub fn centered_form(&self) -> (Point2<T>, Vector2<T>, T) {
        let half: T = nalgebra::convert(0.5);
        let center = self.p0 + (self.p1 - self.p0) * half;
        let diff = self.p1 - self.p0;
        let length = diff.norm();
        let direction = if length > T::zero() {
            diff / length
        } else {
            diff
        };
        (center, direction, half * length)
    }
}

/// Line in 3D, parameterized as `origin + t * direction` for all real `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3<T: RealField + Copy> {
    pub origin: Point3<T>,
    pub direction: Vector3<T>,
}

impl<T: RealField + Copy> Line3<T> {
    pub fn new(origin: Point3<T>, direction: Vector3<T>) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: T) -> Point3<T> {
        self.origin + self.direction * t
    }
}

/// Ray in 3D, parameterized as `origin + t * direction` for `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3<T: RealField + Copy> {
    pub origin: Point3<T>,
    pub direction: Vector3<T>,
}

impl<T: RealField + Copy> Ray3<T> {
    pub fn new(origin: Point3<T>, direction: Vector3<T>) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: T) -> Point3<T> {
        self.origin + self.direction * t
    }
}

/// Segment in 3D with endpoints `p0` and `p1`, parameterized as
/// `(1 - t) * p0 + t * p1` for `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment3<T: RealField + Copy> {
    pub p0: Point3<T>,
    pub p1: Point3<T>,
}

impl<T: RealField + Copy> Segment3<T> {
    pub fn new(p0: Point3<T>, p1: Point3<T>) -> Self {
        Self { p0, p1 }
    }

    /// Point at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: T) -> Point3<T> {
        self.p0 + (self.p1 - self.p0) * t
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::{Point2, Vector2};

    #[test]
    fn segment_centered_form() {
        let segment = Segment2::new(Point2::new(1.0, 0.0), Point2::new(5.0, 0.0));
        let (center, direction, extent): (Point2<f64>, Vector2<f64>, f64) = segment.centered_form();
        assert!((center.x - 3.0).abs() < TOLERANCE);
        assert!((direction - Vector2::new(1.0, 0.0)).norm() < TOLERANCE);
        assert!((extent - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn point_at_interpolates_endpoints() {
        let segment = Segment2::new(Point2::new(-1.0, 2.0), Point2::new(3.0, -2.0));
        assert!((segment.point_at(0.0) - segment.p0).norm() < TOLERANCE);
        assert!((segment.point_at(1.0) - segment.p1).norm() < TOLERANCE);
    }
}
