//! Intersection of lines with aligned and oriented boxes.
//!
//! The boxes are solids. Test queries use separating axes on the box's
//! centered form; find queries clip the line parameter interval against
//! each face plane (Liang-Barsky), yielding zero, one, or two
//! intersections.

use crate::primitives::{AlignedBox2, AlignedBox3, Line2, Line3, OrientedBox3};
use crate::query::{FindIntersection, TestIntersection};
use nalgebra::{Point2, Point3, RealField, Vector2, Vector3};

/// Result of a 2D line-box find-intersection query. The line meets the
/// solid box in nothing, a point (`num_intersections == 1`), or a segment
/// with parameter interval `[parameter[0], parameter[1]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBoxIntersection2<T: RealField + Copy> {
    pub intersect: bool,
    pub num_intersections: usize,
    pub parameter: [T; 2],
    pub point: [Point2<T>; 2],
}

impl<T: RealField + Copy> Default for LineBoxIntersection2<T> {
    fn default() -> Self {
        Self {
            intersect: false,
            num_intersections: 0,
            parameter: [T::zero(); 2],
            point: [Point2::origin(); 2],
        }
    }
}

/// Result of a 3D line-box find-intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBoxIntersection3<T: RealField + Copy> {
    pub intersect: bool,
    pub num_intersections: usize,
    pub parameter: [T; 2],
    pub point: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for LineBoxIntersection3<T> {
    fn default() -> Self {
        Self {
            intersect: false,
            num_intersections: 0,
            parameter: [T::zero(); 2],
            point: [Point3::origin(); 2],
        }
    }
}

// Clips [t0, t1] against denom * t <= numer. Returns false when the
// interval is culled entirely.
fn clip<T: RealField + Copy>(denom: T, numer: T, t0: &mut T, t1: &mut T) -> bool {
    let zero = T::zero();
    if denom > zero {
        if numer > denom * *t1 {
            return false;
        }
        if numer > denom * *t0 {
            *t0 = numer / denom;
        }
        true
    } else if denom < zero {
        if numer > denom * *t0 {
            return false;
        }
        if numer > denom * *t1 {
            *t1 = numer / denom;
        }
        true
    } else {
        numer <= zero
    }
}

// Interval of line parameters inside a centered box, or None.
fn clip_parameters3<T: RealField + Copy>(
    origin: &Vector3<T>,
    direction: &Vector3<T>,
    extent: &Vector3<T>,
) -> Option<(T, T)> {
    let huge = crate::math::cast::<T>(f64::MAX);
    let mut t0 = -huge;
    let mut t1 = huge;
    for i in 0..3 {
        if !clip(direction[i], -origin[i] - extent[i], &mut t0, &mut t1)
            || !clip(-direction[i], origin[i] - extent[i], &mut t0, &mut t1)
        {
            return None;
        }
    }
    Some((t0, t1))
}

fn clip_parameters2<T: RealField + Copy>(
    origin: &Vector2<T>,
    direction: &Vector2<T>,
    extent: &Vector2<T>,
) -> Option<(T, T)> {
    let huge = crate::math::cast::<T>(f64::MAX);
    let mut t0 = -huge;
    let mut t1 = huge;
    for i in 0..2 {
        if !clip(direction[i], -origin[i] - extent[i], &mut t0, &mut t1)
            || !clip(-direction[i], origin[i] - extent[i], &mut t0, &mut t1)
        {
            return None;
        }
    }
    Some((t0, t1))
}

impl<T: RealField + Copy> TestIntersection<AlignedBox2<T>> for Line2<T> {
    fn test_intersection(&self, box2: &AlignedBox2<T>) -> bool {
        let (center, extent) = box2.centered_form();
        let origin = self.origin - center;
        let lhs = self.direction.perp(&origin).abs();
        let rhs = extent[0] * self.direction[1].abs() + extent[1] * self.direction[0].abs();
        lhs <= rhs
    }
}

impl<T: RealField + Copy> FindIntersection<AlignedBox2<T>> for Line2<T> {
    type Output = LineBoxIntersection2<T>;

    fn find_intersection(&self, box2: &AlignedBox2<T>) -> Self::Output {
        let (center, extent) = box2.centered_form();
        let origin = self.origin - center;
        let mut result = LineBoxIntersection2::default();
        if let Some((t0, t1)) = clip_parameters2(&origin, &self.direction, &extent) {
            result.intersect = true;
            result.num_intersections = if t1 > t0 { 2 } else { 1 };
            result.parameter = [t0, if t1 > t0 { t1 } else { t0 }];
            result.point = [self.point_at(result.parameter[0]), self.point_at(result.parameter[1])];
        }
        result
    }
}

impl<T: RealField + Copy> TestIntersection<AlignedBox3<T>> for Line3<T> {
    fn test_intersection(&self, box3: &AlignedBox3<T>) -> bool {
        let (center, extent) = box3.centered_form();
        let origin = self.origin - center;
        test_centered3(&origin, &self.direction, &extent)
    }
}

// Separating-axis test against the three axes Cross(D, U[i]).
fn test_centered3<T: RealField + Copy>(
    origin: &Vector3<T>,
    direction: &Vector3<T>,
    extent: &Vector3<T>,
) -> bool {
    let wxd = direction.cross(origin);
    let abs_d = direction.map(|v| v.abs());

    wxd[0].abs() <= extent[1] * abs_d[2] + extent[2] * abs_d[1]
        && wxd[1].abs() <= extent[0] * abs_d[2] + extent[2] * abs_d[0]
        && wxd[2].abs() <= extent[0] * abs_d[1] + extent[1] * abs_d[0]
}

impl<T: RealField + Copy> FindIntersection<AlignedBox3<T>> for Line3<T> {
    type Output = LineBoxIntersection3<T>;

    fn find_intersection(&self, box3: &AlignedBox3<T>) -> Self::Output {
        let (center, extent) = box3.centered_form();
        let origin = self.origin - center;
        let mut result = LineBoxIntersection3::default();
        if let Some((t0, t1)) = clip_parameters3(&origin, &self.direction, &extent) {
            result.intersect = true;
            result.num_intersections = if t1 > t0 { 2 } else { 1 };
            result.parameter = [t0, if t1 > t0 { t1 } else { t0 }];
            result.point = [self.point_at(result.parameter[0]), self.point_at(result.parameter[1])];
        }
        result
    }
}

impl<T: RealField + Copy> TestIntersection<OrientedBox3<T>> for Line3<T> {
    fn test_intersection(&self, box3: &OrientedBox3<T>) -> bool {
        // Transform the line into the box frame, then reuse the aligned
        // test.
        let diff = self.origin - box3.center;
        let origin = Vector3::new(
            diff.dot(&box3.axis[0]),
            diff.dot(&box3.axis[1]),
            diff.dot(&box3.axis[2]),
        );
        let direction = Vector3::new(
            self.direction.dot(&box3.axis[0]),
            self.direction.dot(&box3.axis[1]),
            self.direction.dot(&box3.axis[2]),
        );
        let extent = Vector3::new(box3.extent[0], box3.extent[1], box3.extent[2]);
        test_centered3(&origin, &direction, &extent)
    }
}

impl<T: RealField + Copy> FindIntersection<OrientedBox3<T>> for Line3<T> {
    type Output = LineBoxIntersection3<T>;

    fn find_intersection(&self, box3: &OrientedBox3<T>) -> Self::Output {
        let diff = self.origin - box3.center;
        let origin = Vector3::new(
            diff.dot(&box3.axis[0]),
            diff.dot(&box3.axis[1]),
            diff.dot(&box3.axis[2]),
        );
        let direction = Vector3::new(
            self.direction.dot(&box3.axis[0]),
            self.direction.dot(&box3.axis[1]),
            self.direction.dot(&box3.axis[2]),
        );
        let extent = Vector3::new(box3.extent[0], box3.extent[1], box3.extent[2]);

        let mut result = LineBoxIntersection3::default();
        if let Some((t0, t1)) = clip_parameters3(&origin, &direction, &extent) {
            result.intersect = true;
            result.num_intersections = if t1 > t0 { 2 } else { 1 };
            result.parameter = [t0, if t1 > t0 { t1 } else { t0 }];
            // Points are reported in the original coordinates.
            result.point = [self.point_at(result.parameter[0]), self.point_at(result.parameter[1])];
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn unit_box3() -> AlignedBox3<f64> {
        AlignedBox3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn line_through_box() {
        let line = Line3::new(Point3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(line.test_intersection(&unit_box3()));
        let result = line.find_intersection(&unit_box3());
        assert!(result.intersect);
        assert_eq!(result.num_intersections, 2);
        assert!((result.point[0] - Point3::new(-1.0, 0.0, 0.0)).norm() < TOLERANCE);
        assert!((result.point[1] - Point3::new(1.0, 0.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn line_missing_box() {
        let line = Line3::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(!line.test_intersection(&unit_box3()));
        assert!(!line.find_intersection(&unit_box3()).intersect);
    }

    #[test]
    fn line_touching_edge() {
        // Diagonal line grazing the edge x = 1, y = 1.
        let line = Line3::new(Point3::new(0.0, 2.0, 0.0), Vector3::new(1.0, -1.0, 0.0));
        let result = line.find_intersection(&unit_box3());
        assert!(result.intersect);
        assert_eq!(result.num_intersections, 1);
        assert!((result.point[0] - Point3::new(1.0, 1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn test_and_find_agree_2d() {
        let box2 = AlignedBox2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0));
        let hit = Line2::new(Point2::new(-1.0, 0.5), Vector2::new(1.0, 0.0));
        let miss = Line2::new(Point2::new(-1.0, 3.0), Vector2::new(1.0, 0.0));
        assert!(hit.test_intersection(&box2));
        assert!(hit.find_intersection(&box2).intersect);
        assert!(!miss.test_intersection(&box2));
        assert!(!miss.find_intersection(&box2).intersect);
    }

    #[test]
    fn oriented_box_matches_rotated_aligned_box() {
        // A box rotated 45 degrees about z, pierced along the rotated x
        // axis.
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let obox = OrientedBox3::new(
            Point3::new(0.0, 0.0, 0.0),
            [
                Vector3::new(s, s, 0.0),
                Vector3::new(-s, s, 0.0),
                Vector3::z(),
            ],
            [2.0, 1.0, 1.0],
        );
        let line = Line3::new(Point3::new(-10.0 * s, -10.0 * s, 0.0), Vector3::new(s, s, 0.0));
        assert!(line.test_intersection(&obox));
        let result = line.find_intersection(&obox);
        assert_eq!(result.num_intersections, 2);
        assert!((result.point[0] - Point3::new(-2.0 * s, -2.0 * s, 0.0)).norm() < TOLERANCE);
        assert!((result.point[1] - Point3::new(2.0 * s, 2.0 * s, 0.0)).norm() < TOLERANCE);
    }
}
