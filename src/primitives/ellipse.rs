use nalgebra::{Point2, Point3, RealField, Vector2, Vector3};

/// Ellipse in 2D in factored form: points `X` with
/// `sum_i (dot(axis[i], X - center) / extent[i])^2 = 1`.
///
/// The axes are assumed to be unit length and mutually perpendicular, with
/// positive extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse2<T: RealField + Copy> {
    pub center: Point2<T>,
    pub axis: [Vector2<T>; 2],
    pub extent: [T; 2],
}

impl<T: RealField + Copy> Ellipse2<T> {
    pub fn new(center: Point2<T>, axis: [Vector2<T>; 2], extent: [T; 2]) -> Self {
        Self {
            center,
            axis,
            extent,
        }
    }
}

/// Ellipsoid in 3D in factored form: points `X` with
/// `sum_i (dot(axis[i], X - center) / extent[i])^2 = 1`.
///
/// The axes are assumed to be unit length and mutually perpendicular, with
/// positive extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid3<T: RealField + Copy> {
    pub center: Point3<T>,
    pub axis: [Vector3<T>; 3],
    pub extent: [T; 3],
}

impl<T: RealField + Copy> Ellipsoid3<T> {
    pub fn new(center: Point3<T>, axis: [Vector3<T>; 3], extent: [T; 3]) -> Self {
        Self {
            center,
            axis,
            extent,
        }
    }

    /// Axis-aligned ellipsoid centered at the origin.
    pub fn axis_aligned(extent: [T; 3]) -> Self {
        Self {
            center: Point3::origin(),
            axis: [Vector3::x(), Vector3::y(), Vector3::z()],
            extent,
        }
    }
}
