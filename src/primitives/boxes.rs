use nalgebra::{Point2, Point3, RealField, Vector2, Vector3};

/// Axis-aligned box in 2D with `min[i] <= max[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedBox2<T: RealField + Copy> {
    pub min: Point2<T>,
    pub max: Point2<T>,
}

impl<T: RealField + Copy> AlignedBox2<T> {
    pub fn new(min: Point2<T>, max: Point2<T>) -> Self {
        Self { min, max }
    }

    /// Centered form `(center, extent)` with `extent` the half-widths.
    #[must_use]
    pub fn centered_form(&self) -> (Point2<T>, Vector2<T>) {
        let half: T = nalgebra::convert(0.5);
        let center = self.min + (self.max - self.min) * half;
        let extent = (self.max - self.min) * half;
        (center, extent)
    }
}

/// Axis-aligned box in 3D with `min[i] <= max[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedBox3<T: RealField + Copy> {
    pub min: Point3<T>,
    pub max: Point3<T>,
}

impl<T: RealField + Copy> AlignedBox3<T> {
    pub fn new(min: Point3<T>, max: Point3<T>) -> Self {
        Self { min, max }
    }

    /// Centered form `(center, extent)` with `extent` the half-widths.
    #[must_use]
    pub fn centered_form(&self) -> (Point3<T>, Vector3<T>) {
        let half: T = nalgebra::convert(0.5);
        let center = self.min + (self.max - self.min) * half;
        let extent = (self.max - self.min) * half;
        (center, extent)
    }
}

/// Oriented box in 3D: center plus three unit-length, mutually
/// perpendicular axes and half-extents along them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox3<T: RealField + Copy> {
    pub center: Point3<T>,
    pub axis: [Vector3<T>; 3],
    pub extent: [T; 3],
}

impl<T: RealField + Copy> OrientedBox3<T> {
    pub fn new(center: Point3<T>, axis: [Vector3<T>; 3], extent: [T; 3]) -> Self {
        Self {
            center,
            axis,
            extent,
        }
    }
}

/// Rectangle in 3D: center plus two unit-length, mutually perpendicular
/// axes and half-extents along them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle3<T: RealField + Copy> {
    pub center: Point3<T>,
    pub axis: [Vector3<T>; 2],
    pub extent: [T; 2],
}

impl<T: RealField + Copy> Rectangle3<T> {
    pub fn new(center: Point3<T>, axis: [Vector3<T>; 2], extent: [T; 2]) -> Self {
        Self {
            center,
            axis,
            extent,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn aligned_box_centered_form() {
        let b = AlignedBox3::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 4.0, 6.0));
        let (center, extent) = b.centered_form();
        assert!((center - Point3::new(1.0, 2.0, 4.0)).norm() < TOLERANCE);
        assert!((extent - Vector3::new(2.0, 2.0, 2.0)).norm() < TOLERANCE);
    }
}
