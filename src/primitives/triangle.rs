use nalgebra::{Point2, Point3, RealField};

/// Triangle in 2D with vertices `v[0]`, `v[1]`, `v[2]`.
///
/// Intersection queries assume counterclockwise ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2<T: RealField + Copy> {
    pub v: [Point2<T>; 3],
}

impl<T: RealField + Copy> Triangle2<T> {
    pub fn new(v0: Point2<T>, v1: Point2<T>, v2: Point2<T>) -> Self {
        Self { v: [v0, v1, v2] }
    }
}

/// Triangle in 3D with vertices `v[0]`, `v[1]`, `v[2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3<T: RealField + Copy> {
    pub v: [Point3<T>; 3],
}

impl<T: RealField + Copy> Triangle3<T> {
    pub fn new(v0: Point3<T>, v1: Point3<T>, v2: Point3<T>) -> Self {
        Self { v: [v0, v1, v2] }
    }
}
