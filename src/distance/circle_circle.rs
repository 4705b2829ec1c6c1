//! Distance between two circles in 2D. The circles are curves, not disks.

use crate::primitives::Circle2;
use crate::query::Distance;
use nalgebra::{Point2, RealField, Vector2};

/// Result of a circle-circle distance query.
///
/// One closest pair is reported when the circles are separated or nested,
/// tangent included. Two pairs are the intersection points of transversely
/// crossing circles. Concentric circles have infinitely many closest
/// pairs; two representative pairs along the x axis are reported and the
/// `concentric` flag is raised (`cocircular` additionally when the radii
/// match).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCircleDistance2<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub num_closest_pairs: usize,
    pub closest: [[Point2<T>; 2]; 2],
    pub concentric: bool,
    pub cocircular: bool,
}

impl<T: RealField + Copy> Default for CircleCircleDistance2<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            num_closest_pairs: 0,
            closest: [[Point2::origin(); 2]; 2],
            concentric: false,
            cocircular: false,
        }
    }
}

impl<T: RealField + Copy> Distance<Circle2<T>> for Circle2<T> {
    type Output = CircleCircleDistance2<T>;

    fn distance(&self, other: &Circle2<T>) -> Self::Output {
        let mut result = if self.radius >= other.radius {
            do_query(self, other)
        } else {
            let mut swapped = do_query(other, self);
            for pair in &mut swapped.closest {
                pair.swap(0, 1);
            }
            swapped
        };
        result.distance = result.sqr_distance.sqrt();
        result
    }
}

// Requires circle0.radius >= circle1.radius.
fn do_query<T: RealField + Copy>(
    circle0: &Circle2<T>,
    circle1: &Circle2<T>,
) -> CircleCircleDistance2<T> {
    let zero = T::zero();
    let mut result = CircleCircleDistance2::default();

    if circle0.center == circle1.center {
        result.distance = (circle0.radius - circle1.radius).abs();
        result.sqr_distance = result.distance * result.distance;
        result.num_closest_pairs = 2;
        let offset0 = Vector2::new(circle0.radius, zero);
        let offset1 = Vector2::new(circle1.radius, zero);
        result.closest[0] = [circle0.center - offset0, circle1.center - offset1];
        result.closest[1] = [circle0.center + offset0, circle1.center + offset1];
        result.concentric = true;
        result.cocircular = circle0.radius == circle1.radius;
        return result;
    }

    let delta = circle1.center - circle0.center;
    let len_delta = delta.norm();
    let r_sum = circle0.radius + circle1.radius;
    let separation = len_delta - r_sum;
    if separation >= zero {
        // Separated, tangent when the distance is zero.
        result.sqr_distance = separation * separation;
        result.num_closest_pairs = 1;
        let unit = delta / len_delta;
        result.closest[0][0] = circle0.center + unit * circle0.radius;
        result.closest[0][1] = if separation > zero {
            circle1.center - unit * circle1.radius
        } else {
            result.closest[0][0]
        };
        return result;
    }

    let r_dif = circle0.radius - circle1.radius;
    let nesting = r_dif - len_delta;
    if nesting >= zero {
        // The smaller circle is inside the larger, internally tangent when
        // the distance is zero.
        result.sqr_distance = nesting * nesting;
        result.num_closest_pairs = 1;
        let unit = delta / len_delta;
        result.closest[0][0] = circle0.center + unit * circle0.radius;
        result.closest[0][1] = if nesting > zero {
            circle1.center + unit * circle1.radius
        } else {
            result.closest[0][0]
        };
        return result;
    }

    // Transverse intersection. With D = C1 - C0, the crossings are
    // X = C0 + u * D +/- v * Perp(D) where
    // u = (1 + (r0^2 - r1^2) / |D|^2) / 2 and v = sqrt(r0^2 / |D|^2 - u^2).
    let one = T::one();
    let half = crate::math::cast::<T>(0.5);
    let r_sum_div_len = r_sum / len_delta;
    let r_dif_div_len = r_dif / len_delta;
    let r0_div_len = circle0.radius / len_delta;
    let u = half * (one + r_sum_div_len * r_dif_div_len);
    let v = (r0_div_len * r0_div_len - u * u).max(zero).sqrt();

    result.num_closest_pairs = 2;
    let mid = circle0.center + delta * u;
    let perp = Vector2::new(delta.y, -delta.x) * v;
    result.closest[0] = [mid + perp, mid + perp];
    result.closest[1] = [mid - perp, mid - perp];
    result
}
