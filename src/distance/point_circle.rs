//! Distance from a point to a circle (2D and 3D) or an arc.
//!
//! The circle is treated as a curve. When the query point is equidistant
//! from every circle point (the center in 2D, any axis point in 3D), the
//! `equidistant` flag is raised and one representative closest point is
//! reported.

use crate::primitives::{Arc2, Circle2, Circle3};
use crate::query::Distance;
use nalgebra::{Point2, Point3, RealField, Vector3};

/// Result of a 2D point-circle distance query. `closest[0]` is the query
/// point, `closest[1]` the closest circle point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCircleDistance2<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub closest: [Point2<T>; 2],
    pub equidistant: bool,
}

impl<T: RealField + Copy> Default for PointCircleDistance2<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            closest: [Point2::origin(); 2],
            equidistant: false,
        }
    }
}

/// Result of a 2D point-arc distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointArcDistance2<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub closest: [Point2<T>; 2],
}

impl<T: RealField + Copy> Default for PointArcDistance2<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            closest: [Point2::origin(); 2],
        }
    }
}

/// Result of a 3D point-circle distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCircleDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub closest: [Point3<T>; 2],
    pub equidistant: bool,
}

impl<T: RealField + Copy> Default for PointCircleDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            closest: [Point3::origin(); 2],
            equidistant: false,
        }
    }
}

impl<T: RealField + Copy> Distance<Circle2<T>> for Point2<T> {
    type Output = PointCircleDistance2<T>;

    fn distance(&self, circle: &Circle2<T>) -> Self::Output {
        let diff = self - circle.center;
        let length = diff.norm();
        if length > T::zero() {
            let circle_closest = circle.center + diff * (circle.radius / length);
            let distance = (length - circle.radius).abs();
            PointCircleDistance2 {
                distance,
                sqr_distance: distance * distance,
                closest: [*self, circle_closest],
                equidistant: false,
            }
        } else {
            // The point is the center; every circle point is closest.
            let circle_closest =
                circle.center + nalgebra::Vector2::new(circle.radius, T::zero());
            PointCircleDistance2 {
                distance: circle.radius,
                sqr_distance: circle.radius * circle.radius,
                closest: [*self, circle_closest],
                equidistant: true,
            }
        }
    }
}

impl<T: RealField + Copy> Distance<Arc2<T>> for Point2<T> {
    type Output = PointArcDistance2<T>;

    fn distance(&self, arc: &Arc2<T>) -> Self::Output {
        let circle = Circle2::new(arc.center, arc.radius);
        let pc_result = self.distance(&circle);
        if !pc_result.equidistant && arc.contains(&pc_result.closest[1]) {
            return PointArcDistance2 {
                distance: pc_result.distance,
                sqr_distance: pc_result.sqr_distance,
                closest: pc_result.closest,
            };
        }

        // The circle closest point is off the arc; an arc endpoint is
        // closest. Ties resolve to end0.
        let sqr0 = (self - arc.end0).norm_squared();
        let sqr1 = (self - arc.end1).norm_squared();
        let (sqr_distance, endpoint) = if sqr0 <= sqr1 {
            (sqr0, arc.end0)
        } else {
            (sqr1, arc.end1)
        };
        PointArcDistance2 {
            distance: sqr_distance.sqrt(),
            sqr_distance,
            closest: [*self, endpoint],
        }
    }
}

impl<T: RealField + Copy> Distance<Circle3<T>> for Point3<T> {
    type Output = PointCircleDistance3<T>;

    fn distance(&self, circle: &Circle3<T>) -> Self::Output {
        let delta = self - circle.center;
        let height = circle.normal.dot(&delta);
        let radial = delta - circle.normal * height;
        let radial_length = radial.norm();
        if radial_length > T::zero() {
            let circle_closest = circle.center + radial * (circle.radius / radial_length);
            let radial_gap = radial_length - circle.radius;
            let sqr_distance = height * height + radial_gap * radial_gap;
            PointCircleDistance3 {
                distance: sqr_distance.sqrt(),
                sqr_distance,
                closest: [*self, circle_closest],
                equidistant: false,
            }
        } else {
            // The point is on the circle axis; every circle point is
            // closest.
            let circle_closest = circle.center + orthogonal_to(&circle.normal) * circle.radius;
            let sqr_distance = height * height + circle.radius * circle.radius;
            PointCircleDistance3 {
                distance: sqr_distance.sqrt(),
                sqr_distance,
                closest: [*self, circle_closest],
                equidistant: true,
            }
        }
    }
}

/// Unit vector orthogonal to the unit-length `n`.
fn orthogonal_to<T: RealField + Copy>(n: &Vector3<T>) -> Vector3<T> {
    let v = if n.x.abs() > n.z.abs() {
        Vector3::new(-n.y, n.x, T::zero())
    } else {
        Vector3::new(T::zero(), -n.z, n.y)
    };
    v / v.norm()
}
