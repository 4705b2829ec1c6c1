use nalgebra::{Point2, Point3, RealField, Vector3};

/// Circle in 2D with center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle2<T: RealField + Copy> {
    pub center: Point2<T>,
    pub radius: T,
}

impl<T: RealField + Copy> Circle2<T> {
    pub fn new(center: Point2<T>, radius: T) -> Self {
        Self { center, radius }
    }
}

/// Circular arc in 2D, traversed counterclockwise from `end0` to `end1`.
///
/// Both endpoints are assumed to lie on the circle `(center, radius)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc2<T: RealField + Copy> {
    pub center: Point2<T>,
    pub radius: T,
    pub end0: Point2<T>,
    pub end1: Point2<T>,
}

impl<T: RealField + Copy> Arc2<T> {
    pub fn new(center: Point2<T>, radius: T, end0: Point2<T>, end1: Point2<T>) -> Self {
        Self {
            center,
            radius,
            end0,
            end1,
        }
    }

    /// Tests whether `point`, assumed to be on the full circle, lies on the
    /// arc. The chord test works for arcs of any angular extent because the
    /// arc is counterclockwise: the arc points are exactly those on or to
    /// the right of the directed chord from `end0` to `end1`.
    #[must_use]
    pub fn contains(&self, point: &Point2<T>) -> bool {
        let diff_pe0 = point - self.end0;
        let diff_e1e0 = self.end1 - self.end0;
        diff_pe0.perp(&diff_e1e0) >= T::zero()
    }
}

/// Circle in 3D: the set of points at distance `radius` from `center` in
/// the plane through `center` with the given unit-length `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle3<T: RealField + Copy> {
    pub center: Point3<T>,
    pub normal: Vector3<T>,
    pub radius: T,
}

impl<T: RealField + Copy> Circle3<T> {
    pub fn new(center: Point3<T>, normal: Vector3<T>, radius: T) -> Self {
        Self {
            center,
            normal,
            radius,
        }
    }
}

/// Sphere in 3D with center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere3<T: RealField + Copy> {
    pub center: Point3<T>,
    pub radius: T,
}

impl<T: RealField + Copy> Sphere3<T> {
    pub fn new(center: Point3<T>, radius: T) -> Self {
        Self { center, radius }
    }
}
