//! Distance from a point to a line, ray, or segment.

use crate::math::saturate;
use crate::primitives::{Line2, Line3, Ray2, Ray3, Segment2, Segment3};
use crate::query::Distance;
use nalgebra::{Point2, Point3, RealField};

/// Result of a 2D point vs line/ray/segment distance query.
///
/// `closest[0]` is the query point, `closest[1]` the closest point on the
/// primitive at the reported parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLinearDistance2<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub parameter: T,
    pub closest: [Point2<T>; 2],
}

impl<T: RealField + Copy> Default for PointLinearDistance2<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            parameter: T::zero(),
            closest: [Point2::origin(); 2],
        }
    }
}

/// Result of a 3D point vs line/ray/segment distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLinearDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub parameter: T,
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for PointLinearDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            parameter: T::zero(),
            closest: [Point3::origin(); 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Line2<T>> for Point2<T> {
    type Output = PointLinearDistance2<T>;

    fn distance(&self, line: &Line2<T>) -> Self::Output {
        let t = line.direction.dot(&(self - line.origin)) / line.direction.norm_squared();
        finish2(*self, line.point_at(t), t)
    }
}

impl<T: RealField + Copy> Distance<Ray2<T>> for Point2<T> {
    type Output = PointLinearDistance2<T>;

    fn distance(&self, ray: &Ray2<T>) -> Self::Output {
        let t = ray.direction.dot(&(self - ray.origin)) / ray.direction.norm_squared();
        let t = t.max(T::zero());
        finish2(*self, ray.point_at(t), t)
    }
}

impl<T: RealField + Copy> Distance<Segment2<T>> for Point2<T> {
    type Output = PointLinearDistance2<T>;

    fn distance(&self, segment: &Segment2<T>) -> Self::Output {
        let direction = segment.p1 - segment.p0;
        let t = saturate(direction.dot(&(self - segment.p0)) / direction.norm_squared());
        finish2(*self, segment.point_at(t), t)
    }
}

impl<T: RealField + Copy> Distance<Line3<T>> for Point3<T> {
    type Output = PointLinearDistance3<T>;

    fn distance(&self, line: &Line3<T>) -> Self::Output {
        let t = line.direction.dot(&(self - line.origin)) / line.direction.norm_squared();
        finish3(*self, line.point_at(t), t)
    }
}

impl<T: RealField + Copy> Distance<Ray3<T>> for Point3<T> {
    type Output = PointLinearDistance3<T>;

    fn distance(&self, ray: &Ray3<T>) -> Self::Output {
        let t = ray.direction.dot(&(self - ray.origin)) / ray.direction.norm_squared();
        let t = t.max(T::zero());
        finish3(*self, ray.point_at(t), t)
    }
}

impl<T: RealField + Copy> Distance<Segment3<T>> for Point3<T> {
    type Output = PointLinearDistance3<T>;

    fn distance(&self, segment: &Segment3<T>) -> Self::Output {
        let direction = segment.p1 - segment.p0;
        let t = saturate(direction.dot(&(self - segment.p0)) / direction.norm_squared());
        finish3(*self, segment.point_at(t), t)
    }
}

fn finish2<T: RealField + Copy>(
    point: Point2<T>,
    closest: Point2<T>,
    parameter: T,
) -> PointLinearDistance2<T> {
    let sqr_distance = (point - closest).norm_squared();
    PointLinearDistance2 {
        distance: sqr_distance.sqrt(),
        sqr_distance,
        parameter,
        closest: [point, closest],
    }
}

fn finish3<T: RealField + Copy>(
    point: Point3<T>,
    closest: Point3<T>,
    parameter: T,
) -> PointLinearDistance3<T> {
    let sqr_distance = (point - closest).norm_squared();
    PointLinearDistance3 {
        distance: sqr_distance.sqrt(),
        sqr_distance,
        parameter,
        closest: [point, closest],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::Vector2;

    #[test]
    fn point_to_line() {
        let line: Line2<f64> = Line2::new(Point2::new(0.0, 0.0), Vector2::new(2.0, 0.0));
        let result = Point2::new(3.0, 4.0).distance(&line);
        assert!((result.distance - 4.0).abs() < TOLERANCE);
        assert!((result.parameter - 1.5).abs() < TOLERANCE);
        assert!((result.closest[1] - Point2::new(3.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn point_behind_ray_clamps_to_origin() {
        let ray: Ray2<f64> = Ray2::new(Point2::new(1.0, 1.0), Vector2::new(1.0, 0.0));
        let result = Point2::new(-2.0, 1.0).distance(&ray);
        assert!((result.distance - 3.0).abs() < TOLERANCE);
        assert!(result.parameter.abs() < TOLERANCE);
        assert!((result.closest[1] - ray.origin).norm() < TOLERANCE);
    }

    #[test]
    fn point_past_segment_clamps_to_endpoint() {
        let segment: Segment2<f64> = Segment2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        let result = Point2::new(5.0, 0.0).distance(&segment);
        assert!((result.distance - 4.0).abs() < TOLERANCE);
        assert!((result.parameter - 1.0).abs() < TOLERANCE);
    }
}
