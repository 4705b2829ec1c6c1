//! Distance from a point to an ellipse (2D) or ellipsoid (3D), treated as
//! curves/surfaces rather than solids.
//!
//! The query reduces to axis-aligned, first-octant coordinates with the
//! extents sorted in decreasing order, then finds the unique root of the
//! orthogonality condition by bisection.

use crate::primitives::{Ellipse2, Ellipsoid3};
use crate::query::Distance;
use nalgebra::{Point2, Point3, RealField};

/// Result of a 2D point-ellipse distance query. `closest[1]` is the
/// closest point on the ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEllipseDistance2<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub closest: [Point2<T>; 2],
}

impl<T: RealField + Copy> Default for PointEllipseDistance2<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            closest: [Point2::origin(); 2],
        }
    }
}

/// Result of a 3D point-ellipsoid distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEllipsoidDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for PointEllipsoidDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            closest: [Point3::origin(); 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Ellipse2<T>> for Point2<T> {
    type Output = PointEllipseDistance2<T>;

    fn distance(&self, ellipse: &Ellipse2<T>) -> Self::Output {
        // Coordinates of the point in the ellipse axis frame.
        let diff = self - ellipse.center;
        let y = [ellipse.axis[0].dot(&diff), ellipse.axis[1].dot(&diff)];
        let mut x = [T::zero(); 2];
        let sqr_distance = sqr_distance::<T, 2>(&ellipse.extent, &y, &mut x);

        let closest = ellipse.center + ellipse.axis[0] * x[0] + ellipse.axis[1] * x[1];
        PointEllipseDistance2 {
            distance: sqr_distance.sqrt(),
            sqr_distance,
            closest: [*self, closest],
        }
    }
}

impl<T: RealField + Copy> Distance<Ellipsoid3<T>> for Point3<T> {
    type Output = PointEllipsoidDistance3<T>;

    fn distance(&self, ellipsoid: &Ellipsoid3<T>) -> Self::Output {
        let diff = self - ellipsoid.center;
        let y = [
            ellipsoid.axis[0].dot(&diff),
            ellipsoid.axis[1].dot(&diff),
            ellipsoid.axis[2].dot(&diff),
        ];
        let mut x = [T::zero(); 3];
        let sqr_distance = sqr_distance::<T, 3>(&ellipsoid.extent, &y, &mut x);

        let closest = ellipsoid.center
            + ellipsoid.axis[0] * x[0]
            + ellipsoid.axis[1] * x[1]
            + ellipsoid.axis[2] * x[2];
        PointEllipsoidDistance3 {
            distance: sqr_distance.sqrt(),
            sqr_distance,
            closest: [*self, closest],
        }
    }
}

// Axis-aligned query with arbitrary extent order and point signs. Reduces
// to the first octant with extents sorted decreasing, then restores the
// permutation and reflections.
fn sqr_distance<T: RealField + Copy, const N: usize>(
    e: &[T; N],
    y: &[T; N],
    x: &mut [T; N],
) -> T {
    let zero = T::zero();

    let mut negate = [false; N];
    for i in 0..N {
        negate[i] = y[i] < zero;
    }

    let mut order: [usize; N] = [0; N];
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = i;
    }
    order.sort_by(|&a, &b| e[b].partial_cmp(&e[a]).unwrap_or(std::cmp::Ordering::Equal));

    let mut loc_e = [zero; N];
    let mut loc_y = [zero; N];
    for i in 0..N {
        loc_e[i] = e[order[i]];
        loc_y[i] = y[order[i]].abs();
    }

    let mut loc_x = [zero; N];
    let result = sqr_distance_special::<T, N>(&loc_e, &loc_y, &mut loc_x);

    for i in 0..N {
        let value = if negate[order[i]] { -loc_x[i] } else { loc_x[i] };
        x[order[i]] = value;
    }

    result
}

// Requires e sorted decreasing and y componentwise nonnegative; produces
// x componentwise nonnegative.
fn sqr_distance_special<T: RealField + Copy, const N: usize>(
    e: &[T; N],
    y: &[T; N],
    x: &mut [T; N],
) -> T {
    let zero = T::zero();
    let one = T::one();

    let mut e_pos = [zero; N];
    let mut y_pos = [zero; N];
    let mut x_pos = [zero; N];
    let mut num_pos = 0;
    for i in 0..N {
        if y[i] > zero {
            e_pos[num_pos] = e[i];
            y_pos[num_pos] = y[i];
            num_pos += 1;
        } else {
            x[i] = zero;
        }
    }

    let mut sqr_distance = zero;
    if y[N - 1] > zero {
        sqr_distance = bisector(num_pos, &e_pos, &y_pos, &mut x_pos);
    } else {
        // The point lies in the hyperplane of the smallest axis. The
        // closest point may have a positive last component, reached when
        // the point is inside the degenerate sub-ellipsoid.
        let e_last_sqr = e[N - 1] * e[N - 1];
        let mut numer = [zero; N];
        let mut denom = [zero; N];
        for i in 0..num_pos {
            numer[i] = e_pos[i] * y_pos[i];
            denom[i] = e_pos[i] * e_pos[i] - e_last_sqr;
        }

        // Guards the division when e_pos[i] equals e[N-1].
        let in_sub_box = (0..num_pos).all(|i| numer[i] < denom[i]);

        let mut in_sub_ellipsoid = false;
        if in_sub_box {
            let mut xde = [zero; N];
            let mut discr = one;
            for i in 0..num_pos {
                xde[i] = numer[i] / denom[i];
                discr -= xde[i] * xde[i];
            }
            if discr > zero {
                sqr_distance = zero;
                for i in 0..num_pos {
                    x_pos[i] = e_pos[i] * xde[i];
                    let diff = x_pos[i] - y_pos[i];
                    sqr_distance += diff * diff;
                }
                x[N - 1] = e[N - 1] * discr.sqrt();
                sqr_distance += x[N - 1] * x[N - 1];
                in_sub_ellipsoid = true;
            }
        }

        if !in_sub_ellipsoid {
            x[N - 1] = zero;
            sqr_distance = bisector(num_pos, &e_pos, &y_pos, &mut x_pos);
        }
    }

    let mut k = 0;
    for i in 0..N {
        if y[i] > zero {
            x[i] = x_pos[k];
            k += 1;
        }
    }

    sqr_distance
}

// Bisection for the unique root of
// F(s) = sum_i (p_i^2 z_i / (s + p_i^2))^2 - 1, where p_i = e_i / e_min.
fn bisector<T: RealField + Copy, const N: usize>(
    num_components: usize,
    e: &[T; N],
    y: &[T; N],
    x: &mut [T; N],
) -> T {
    let zero = T::zero();
    let one = T::one();
    let half = crate::math::cast::<T>(0.5);

    let mut z = [zero; N];
    let mut sum_z_sqr = zero;
    for i in 0..num_components {
        z[i] = y[i] / e[i];
        sum_z_sqr += z[i] * z[i];
    }

    if sum_z_sqr == one {
        // The point is on the surface.
        x[..num_components].copy_from_slice(&y[..num_components]);
        return zero;
    }

    let e_min = e[num_components - 1];
    let mut p_sqr = [zero; N];
    let mut numerator = [zero; N];
    for i in 0..num_components {
        let p = e[i] / e_min;
        p_sqr[i] = p * p;
        numerator[i] = p_sqr[i] * z[i];
    }

    let mut s_min = z[num_components - 1] - one;
    let mut s_max = if sum_z_sqr < one {
        zero
    } else {
        let mut sum = zero;
        for value in numerator.iter().take(num_components) {
            sum += *value * *value;
        }
        sum.sqrt() - one
    };

    let mut s = zero;
    // The interval shrinks until it cannot be split in floating point.
    for _ in 0..2048 {
        s = half * (s_min + s_max);
        if s == s_min || s == s_max {
            break;
        }

        let mut g = -one;
        for i in 0..num_components {
            let ratio = numerator[i] / (s + p_sqr[i]);
            g += ratio * ratio;
        }

        if g > zero {
            s_min = s;
        } else if g < zero {
            s_max = s;
        } else {
            break;
        }
    }

    let mut sqr_distance = zero;
    for i in 0..num_components {
        x[i] = p_sqr[i] * y[i] / (s + p_sqr[i]);
        let diff = x[i] - y[i];
        sqr_distance += diff * diff;
    }
    sqr_distance
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::Vector2;

    #[test]
    fn point_on_major_axis() {
        let ellipse: Ellipse2<f64> = Ellipse2 {
            center: Point2::new(0.0, 0.0),
            axis: [Vector2::x(), Vector2::y()],
            extent: [3.0, 2.0],
        };
        let result = Point2::new(7.0, 0.0).distance(&ellipse);
        assert!((result.distance - 4.0).abs() < TOLERANCE);
        assert!((result.closest[1] - Point2::new(3.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn point_on_ellipse_has_zero_distance() {
        let ellipse: Ellipse2<f64> = Ellipse2 {
            center: Point2::new(0.0, 0.0),
            axis: [Vector2::x(), Vector2::y()],
            extent: [3.0, 2.0],
        };
        let result = Point2::new(0.0, 2.0).distance(&ellipse);
        assert!(result.distance < 1e-8);
    }

    #[test]
    fn center_of_ellipse() {
        // From the center the nearest surface point is along the minor
        // axis.
        let ellipse: Ellipse2<f64> = Ellipse2 {
            center: Point2::new(1.0, -1.0),
            axis: [Vector2::x(), Vector2::y()],
            extent: [3.0, 2.0],
        };
        let result = ellipse.center.distance(&ellipse);
        assert!((result.distance - 2.0).abs() < 1e-8);
    }

    #[test]
    fn closest_point_satisfies_ellipse_equation() {
        let ellipse: Ellipse2<f64> = Ellipse2 {
            center: Point2::new(0.0, 0.0),
            axis: [Vector2::x(), Vector2::y()],
            extent: [3.0, 2.0],
        };
        let result = Point2::new(4.0, 3.0).distance(&ellipse);
        let c = result.closest[1];
        let level = (c.x / 3.0).powi(2) + (c.y / 2.0).powi(2);
        assert!((level - 1.0).abs() < 1e-8);
        assert!(result.distance > 0.0);
    }

    #[test]
    fn sphere_like_ellipsoid_matches_sphere_distance() {
        let ellipsoid: Ellipsoid3<f64> = Ellipsoid3::axis_aligned([2.0, 2.0, 2.0]);
        let result = Point3::new(0.0, 0.0, 5.0).distance(&ellipsoid);
        assert!((result.distance - 3.0).abs() < 1e-8);
        assert!((result.closest[1] - Point3::new(0.0, 0.0, 2.0)).norm() < 1e-8);
    }

    #[test]
    fn rotated_ellipse() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let ellipse: Ellipse2<f64> = Ellipse2 {
            center: Point2::new(0.0, 0.0),
            axis: [Vector2::new(s, s), Vector2::new(-s, s)],
            extent: [3.0, 1.0],
        };
        // Query along the rotated major axis.
        let result = Point2::new(5.0 * s, 5.0 * s).distance(&ellipse);
        assert!((result.distance - 2.0).abs() < 1e-8);
        assert!((result.closest[1] - Point2::new(3.0 * s, 3.0 * s)).norm() < 1e-8);
    }

    #[test]
    fn ellipsoid_point_with_zero_component() {
        let ellipsoid: Ellipsoid3<f64> = Ellipsoid3::axis_aligned([4.0, 3.0, 2.0]);
        let result = Point3::new(0.5, 0.5, 0.0).distance(&ellipsoid);
        // The interior point is inside the degenerate sub-ellipsoid, so
        // the closest surface point leaves the z = 0 plane.
        assert!(result.closest[1].z > 0.0);
        let c = result.closest[1];
        let level = (c.x / 4.0).powi(2) + (c.y / 3.0).powi(2) + (c.z / 2.0).powi(2);
        assert!((level - 1.0).abs() < 1e-8);
    }
}
