//! Distance between two segments (2D and 3D).
//!
//! The squared distance R(s, t) is quadratic over the unit square of the
//! segment parameters. A conjugate-gradient style search along the line
//! dR/ds = 0 locates the minimum without the divisions that make the
//! closed-form solution fragile for nearly parallel segments.

use crate::primitives::{Segment2, Segment3};
use crate::query::Distance;
use nalgebra::{Point2, Point3, RealField};

/// Result of a 2D segment-segment distance query. `closest[i]` lies on
/// segment `i` at `parameter[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSegmentDistance2<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub parameter: [T; 2],
    pub closest: [Point2<T>; 2],
}

impl<T: RealField + Copy> Default for SegmentSegmentDistance2<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            parameter: [T::zero(); 2],
            closest: [Point2::origin(); 2],
        }
    }
}

/// Result of a 3D segment-segment distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSegmentDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub parameter: [T; 2],
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for SegmentSegmentDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            parameter: [T::zero(); 2],
            closest: [Point3::origin(); 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Segment2<T>> for Segment2<T> {
    type Output = SegmentSegmentDistance2<T>;

    fn distance(&self, other: &Segment2<T>) -> Self::Output {
        let d0 = self.p1 - self.p0;
        let d1 = other.p1 - other.p0;
        let delta = self.p0 - other.p0;
        let (s, t) = minimize_parameters(
            d0.dot(&d0),
            d0.dot(&d1),
            d1.dot(&d1),
            d0.dot(&delta),
            d1.dot(&delta),
        );
        let closest0 = self.point_at(s);
        let closest1 = other.point_at(t);
        let sqr_distance = (closest0 - closest1).norm_squared();
        SegmentSegmentDistance2 {
            distance: sqr_distance.sqrt(),
            sqr_distance,
            parameter: [s, t],
            closest: [closest0, closest1],
        }
    }
}

impl<T: RealField + Copy> Distance<Segment3<T>> for Segment3<T> {
    type Output = SegmentSegmentDistance3<T>;

    fn distance(&self, other: &Segment3<T>) -> Self::Output {
        let d0 = self.p1 - self.p0;
        let d1 = other.p1 - other.p0;
        let delta = self.p0 - other.p0;
        let (s, t) = minimize_parameters(
            d0.dot(&d0),
            d0.dot(&d1),
            d1.dot(&d1),
            d0.dot(&delta),
            d1.dot(&delta),
        );
        let closest0 = self.point_at(s);
        let closest1 = other.point_at(t);
        let sqr_distance = (closest0 - closest1).norm_squared();
        SegmentSegmentDistance3 {
            distance: sqr_distance.sqrt(),
            sqr_distance,
            parameter: [s, t],
            closest: [closest0, closest1],
        }
    }
}

// Minimizes R(s, t) = a s^2 - 2 b s t + c t^2 + 2 d s - 2 e t + f over
// the unit square, where a, b, c are the Gram products of the directions
// and d, e involve the offset between the segment starts. Degenerate
// segments (a = 0 or c = 0) are allowed.
#[allow(clippy::many_single_char_names)]
fn minimize_parameters<T: RealField + Copy>(a: T, b: T, c: T, d: T, e: T) -> (T, T) {
    let zero = T::zero();
    let one = T::one();

    // dR/ds and dR/dt at the corners of the domain.
    let f00 = d;
    let f10 = f00 + a;
    let f01 = f00 - b;
    let f11 = f10 - b;
    let g00 = -e;
    let g10 = g00 - b;
    let g01 = g00 + c;
    let g11 = g10 + c;

    if a > zero && c > zero {
        // Clamped roots of dR/ds(s, 0) = 0 and dR/ds(s, 1) = 0 classify
        // where the minimizing line crosses the square.
        let s_value = [clamped_root(a, f00, f10), clamped_root(a, f01, f11)];
        let classify = s_value.map(|s| {
            if s <= zero {
                -1
            } else if s >= one {
                1
            } else {
                0
            }
        });

        if classify == [-1, -1] {
            // The minimum is on the edge s = 0.
            (zero, clamped_root(c, g00, g01))
        } else if classify == [1, 1] {
            // The minimum is on the edge s = 1.
            (one, clamped_root(c, g10, g11))
        } else {
            let (edge, end) = compute_intersection(&s_value, &classify, b, f00, f10);
            compute_minimum_parameters(&edge, &end, b, c, e, g00, g10, g01, g11)
        }
    } else if a > zero {
        // The second segment is a point.
        (clamped_root(a, f00, f10), zero)
    } else if c > zero {
        // The first segment is a point.
        (zero, clamped_root(c, g00, g01))
    } else {
        (zero, zero)
    }
}

// Root of h(z) = h0 + slope * z clamped to [0, 1]. Rounding can push the
// quotient outside the interval when the slope is nearly zero; any value
// then serves because the quadratic is nearly constant.
fn clamped_root<T: RealField + Copy>(slope: T, h0: T, h1: T) -> T {
    let zero = T::zero();
    let one = T::one();
    if h0 < zero {
        if h1 > zero {
            let r = -h0 / slope;
            if r > one {
                crate::math::cast::<T>(0.5)
            } else {
                r
            }
        } else {
            one
        }
    } else {
        zero
    }
}

// Endpoints of the intersection of the line dR/ds = 0 with the unit
// square. edge[i] records the square edge holding end[i]: 0 (s=0),
// 1 (s=1), 2 (t=0), 3 (t=1).
fn compute_intersection<T: RealField + Copy>(
    s_value: &[T; 2],
    classify: &[i32; 2],
    b: T,
    f00: T,
    f10: T,
) -> ([i32; 2], [[T; 2]; 2]) {
    let zero = T::zero();
    let one = T::one();
    let half = crate::math::cast::<T>(0.5);
    let clamp01 = |value: T| {
        if value < zero || value > one {
            half
        } else {
            value
        }
    };

    let mut edge = [0; 2];
    let mut end = [[zero; 2]; 2];

    if classify[0] < 0 {
        edge[0] = 0;
        end[0] = [zero, clamp01(f00 / b)];
        if classify[1] == 0 {
            edge[1] = 3;
            end[1] = [s_value[1], one];
        } else {
            edge[1] = 1;
            end[1] = [one, clamp01(f10 / b)];
        }
    } else if classify[0] == 0 {
        edge[0] = 2;
        end[0] = [s_value[0], zero];
        if classify[1] < 0 {
            edge[1] = 0;
            end[1] = [zero, clamp01(f00 / b)];
        } else if classify[1] == 0 {
            edge[1] = 3;
            end[1] = [s_value[1], one];
        } else {
            edge[1] = 1;
            end[1] = [one, clamp01(f10 / b)];
        }
    } else {
        edge[0] = 1;
        end[0] = [one, clamp01(f10 / b)];
        if classify[1] == 0 {
            edge[1] = 3;
            end[1] = [s_value[1], one];
        } else {
            edge[1] = 0;
            end[1] = [zero, clamp01(f00 / b)];
        }
    }

    (edge, end)
}

// Minimum of R on the intersection segment. The directional derivative
// along it involves only dR/dt because dR/ds vanishes there.
#[allow(clippy::too_many_arguments)]
fn compute_minimum_parameters<T: RealField + Copy>(
    edge: &[i32; 2],
    end: &[[T; 2]; 2],
    b: T,
    c: T,
    e: T,
    g00: T,
    g10: T,
    g01: T,
    g11: T,
) -> (T, T) {
    let zero = T::zero();
    let one = T::one();
    let delta = end[1][1] - end[0][1];
    let h0 = delta * (-b * end[0][0] + c * end[0][1] - e);
    if h0 >= zero {
        match edge[0] {
            0 => (zero, clamped_root(c, g00, g01)),
            1 => (one, clamped_root(c, g10, g11)),
            _ => (end[0][0], end[0][1]),
        }
    } else {
        let h1 = delta * (-b * end[1][0] + c * end[1][1] - e);
        if h1 <= zero {
            match edge[1] {
                0 => (zero, clamped_root(c, g00, g01)),
                1 => (one, clamped_root(c, g10, g11)),
                _ => (end[1][0], end[1][1]),
            }
        } else {
            let z = (h0 / (h0 - h1)).max(zero).min(one);
            let omz = one - z;
            (
                omz * end[0][0] + z * end[1][0],
                omz * end[0][1] + z * end[1][1],
            )
        }
    }
}
