//! Distance between a 2D line and a circle.
//!
//! The circle is a curve, not a disk. The query reports one closest pair
//! when the line misses or touches the circle, and both intersection points
//! when it crosses (distance zero, two pairs).

use crate::primitives::{Circle2, Line2};
use crate::query::Distance;
use nalgebra::{Point2, RealField, Vector2};

/// Result shared by the 2D line/ray/segment vs circle/arc distance
/// queries.
///
/// `closest[j][0]` is the point on the linear primitive of pair `j`,
/// `closest[j][1]` its partner on the circle or arc; `parameter[j]` is the
/// linear-primitive parameter of pair `j`. Only the first
/// `num_closest_pairs` entries are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCircleDistance<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub num_closest_pairs: usize,
    pub parameter: [T; 2],
    pub closest: [[Point2<T>; 2]; 2],
}

impl<T: RealField + Copy> Default for LinearCircleDistance<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            num_closest_pairs: 0,
            parameter: [T::zero(); 2],
            closest: [[Point2::origin(); 2]; 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Circle2<T>> for Line2<T> {
    type Output = LinearCircleDistance<T>;

    fn distance(&self, circle: &Circle2<T>) -> Self::Output {
        // Work in coordinates where the circle center is the origin.
        let delta = self.origin - circle.center;
        let mut result = do_query(delta, self.direction, circle.radius);
        finish(&mut result, circle.center);
        result
    }
}

/// Core line-circle query in circle-centered coordinates. The caller must
/// translate the closest points back and fill in the distances with
/// [`finish`].
pub(crate) fn do_query<T: RealField + Copy>(
    delta: Vector2<T>,
    direction: Vector2<T>,
    radius: T,
) -> LinearCircleDistance<T> {
    let mut result = LinearCircleDistance::default();
    let zero = T::zero();

    // The line-origin distance is |DotPerp(D, delta)| / |D|. Instead of
    // normalizing D, classify with the sign of
    // DotPerp(D, delta)^2 - r^2 * |D|^2.
    let dot_dir_dir = direction.dot(&direction);
    let dot_dir_del = direction.dot(&delta);
    let dot_perp_dir_del = direction.perp(&delta);
    let test = dot_perp_dir_del * dot_perp_dir_del - radius * radius * dot_dir_dir;

    if test >= zero {
        // The line misses the circle (test > 0) or is tangent (test = 0).
        result.num_closest_pairs = 1;
        result.parameter[0] = -dot_dir_del / dot_dir_dir;
        let line_closest = Point2::from(delta + direction * result.parameter[0]);
        result.closest[0][0] = line_closest;
        result.closest[0][1] = line_closest;
        if test > zero {
            let radial = line_closest.coords.normalize() * radius;
            result.closest[0][1] = Point2::from(radial);
        }
    } else {
        // Two intersection points: solve a2 t^2 + 2 a1 t + a0 = 0 with the
        // cancellation-avoiding form of the quadratic formula.
        let a0 = delta.dot(&delta) - radius * radius;
        let a1 = dot_dir_del;
        let a2 = dot_dir_dir;
        let discr = (a1 * a1 - a0 * a2).max(zero);
        let sqrt_discr = discr.sqrt();

        let temp = -dot_dir_del
            + if dot_dir_del > zero {
                -sqrt_discr
            } else {
                sqrt_discr
            };
        result.num_closest_pairs = 2;
        result.parameter[0] = temp / dot_dir_dir;
        result.parameter[1] = a0 / temp;
        if result.parameter[0] > result.parameter[1] {
            result.parameter.swap(0, 1);
        }

        let p0 = Point2::from(delta + direction * result.parameter[0]);
        let p1 = Point2::from(delta + direction * result.parameter[1]);
        result.closest[0] = [p0, p0];
        result.closest[1] = [p1, p1];
    }

    result
}

/// Translates the closest points of a centered query back by `center` and
/// recomputes the distances from the first pair.
pub(crate) fn finish<T: RealField + Copy>(
    result: &mut LinearCircleDistance<T>,
    center: Point2<T>,
) {
    for j in 0..result.num_closest_pairs {
        for i in 0..2 {
            result.closest[j][i] += center.coords;
        }
    }
    let diff = result.closest[0][0] - result.closest[0][1];
    result.sqr_distance = diff.dot(&diff);
    result.distance = result.sqr_distance.sqrt();
}
