//! Distance from a point to a solid triangle (2D and 3D).
//!
//! The closest point is found by minimizing the quadratic
//! Q(s, t) = |V0 + s * E0 + t * E1 - P|^2 over the parameter-plane
//! triangle s >= 0, t >= 0, s + t <= 1. The plane partitions into the
//! triangle interior and six exterior regions; each region projects the
//! unconstrained minimum onto the active edge or vertex.

use crate::primitives::{Triangle2, Triangle3};
use crate::query::Distance;
use nalgebra::{Point2, Point3, RealField};

/// Result of a 2D point-triangle distance query. `closest[1]` is the
/// closest triangle point, with barycentric coordinates over the vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTriangleDistance2<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub barycentric: [T; 3],
    pub closest: [Point2<T>; 2],
}

impl<T: RealField + Copy> Default for PointTriangleDistance2<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            barycentric: [T::zero(); 3],
            closest: [Point2::origin(); 2],
        }
    }
}

/// Result of a 3D point-triangle distance query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTriangleDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub barycentric: [T; 3],
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for PointTriangleDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            barycentric: [T::zero(); 3],
            closest: [Point3::origin(); 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Triangle2<T>> for Point2<T> {
    type Output = PointTriangleDistance2<T>;

    fn distance(&self, triangle: &Triangle2<T>) -> Self::Output {
        let diff = triangle.v[0] - self;
        let edge0 = triangle.v[1] - triangle.v[0];
        let edge1 = triangle.v[2] - triangle.v[0];
        let (s, t) = minimize_parameters(
            edge0.dot(&edge0),
            edge0.dot(&edge1),
            edge1.dot(&edge1),
            diff.dot(&edge0),
            diff.dot(&edge1),
        );
        let closest = triangle.v[0] + edge0 * s + edge1 * t;
        let sqr_distance = (self - closest).norm_squared();
        PointTriangleDistance2 {
            distance: sqr_distance.sqrt(),
            sqr_distance,
            barycentric: [T::one() - s - t, s, t],
            closest: [*self, closest],
        }
    }
}

impl<T: RealField + Copy> Distance<Triangle3<T>> for Point3<T> {
    type Output = PointTriangleDistance3<T>;

    fn distance(&self, triangle: &Triangle3<T>) -> Self::Output {
        let diff = triangle.v[0] - self;
        let edge0 = triangle.v[1] - triangle.v[0];
        let edge1 = triangle.v[2] - triangle.v[0];
        let (s, t) = minimize_parameters(
            edge0.dot(&edge0),
            edge0.dot(&edge1),
            edge1.dot(&edge1),
            diff.dot(&edge0),
            diff.dot(&edge1),
        );
        let closest = triangle.v[0] + edge0 * s + edge1 * t;
        let sqr_distance = (self - closest).norm_squared();
        PointTriangleDistance3 {
            distance: sqr_distance.sqrt(),
            sqr_distance,
            barycentric: [T::one() - s - t, s, t],
            closest: [*self, closest],
        }
    }
}

// Minimizes Q over the parameter-plane triangle, given the Gram products
// a00 = E0.E0, a01 = E0.E1, a11 = E1.E1 and b0 = (V0-P).E0, b1 = (V0-P).E1.
#[allow(clippy::many_single_char_names)]
fn minimize_parameters<T: RealField + Copy>(a00: T, a01: T, a11: T, b0: T, b1: T) -> (T, T) {
    let zero = T::zero();
    let one = T::one();
    let two = crate::math::cast::<T>(2.0);
    let det = (a00 * a11 - a01 * a01).max(zero);
    let mut s = a01 * b1 - a11 * b0;
    let mut t = a01 * b0 - a00 * b1;

    if s + t <= det {
        if s < zero {
            if t < zero {
                // Region 4: the minimum is on one of the edges meeting at
                // vertex 0.
                if b0 < zero {
                    t = zero;
                    s = if -b0 >= a00 { one } else { -b0 / a00 };
                } else {
                    s = zero;
                    t = if b1 >= zero {
                        zero
                    } else if -b1 >= a11 {
                        one
                    } else {
                        -b1 / a11
                    };
                }
            } else {
                // Region 3: the edge s = 0.
                s = zero;
                t = if b1 >= zero {
                    zero
                } else if -b1 >= a11 {
                    one
                } else {
                    -b1 / a11
                };
            }
        } else if t < zero {
            // Region 5: the edge t = 0.
            t = zero;
            s = if b0 >= zero {
                zero
            } else if -b0 >= a00 {
                one
            } else {
                -b0 / a00
            };
        } else {
            // Region 0: the interior minimum.
            s /= det;
            t /= det;
        }
    } else if s < zero {
        // Region 2: vertex 2 or one of its edges.
        let tmp0 = a01 + b0;
        let tmp1 = a11 + b1;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a00 - two * a01 + a11;
            if numer >= denom {
                s = one;
                t = zero;
            } else {
                s = numer / denom;
                t = one - s;
            }
        } else {
            s = zero;
            t = if tmp1 <= zero {
                one
            } else if b1 >= zero {
                zero
            } else {
                -b1 / a11
            };
        }
    } else if t < zero {
        // Region 6: vertex 1 or one of its edges.
        let tmp0 = a01 + b1;
        let tmp1 = a00 + b0;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a00 - two * a01 + a11;
            if numer >= denom {
                t = one;
                s = zero;
            } else {
                t = numer / denom;
                s = one - t;
            }
        } else {
            t = zero;
            s = if tmp1 <= zero {
                one
            } else if b0 >= zero {
                zero
            } else {
                -b0 / a00
            };
        }
    } else {
        // Region 1: the edge s + t = 1.
        let numer = a11 + b1 - a01 - b0;
        if numer <= zero {
            s = zero;
            t = one;
        } else {
            let denom = a00 - two * a01 + a11;
            if numer >= denom {
                s = one;
                t = zero;
            } else {
                s = numer / denom;
                t = one - s;
            }
        }
    }

    (s, t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn unit_triangle3() -> Triangle3<f64> {
        Triangle3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn point_above_interior() {
        let result = Point3::new(0.25, 0.25, 3.0).distance(&unit_triangle3());
        assert!((result.distance - 3.0).abs() < TOLERANCE);
        assert!((result.closest[1] - Point3::new(0.25, 0.25, 0.0)).norm() < TOLERANCE);
        assert!((result.barycentric[0] - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn point_beyond_vertex() {
        let result = Point3::new(-1.0, -1.0, 0.0).distance(&unit_triangle3());
        assert!((result.closest[1] - Point3::origin()).norm() < TOLERANCE);
        assert!((result.distance - 2.0_f64.sqrt()).abs() < TOLERANCE);
        assert!((result.barycentric[0] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn point_beyond_hypotenuse() {
        let result = Point3::new(1.0, 1.0, 0.0).distance(&unit_triangle3());
        assert!((result.closest[1] - Point3::new(0.5, 0.5, 0.0)).norm() < TOLERANCE);
        assert!((result.distance - std::f64::consts::FRAC_1_SQRT_2).abs() < TOLERANCE);
    }

    #[test]
    fn interior_point_has_zero_distance() {
        let triangle = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        let result = Point2::new(1.0, 1.0).distance(&triangle);
        assert!(result.distance < TOLERANCE);
        let sum: f64 = result.barycentric.iter().sum();
        assert!((sum - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn barycentric_reconstructs_closest() {
        let triangle = Triangle2::new(
            Point2::new(1.0, 0.0),
            Point2::new(3.0, 1.0),
            Point2::new(2.0, 5.0),
        );
        let result = Point2::new(-2.0, 3.0).distance(&triangle);
        let b = result.barycentric;
        let rebuilt = Point2::from(
            triangle.v[0].coords * b[0] + triangle.v[1].coords * b[1] + triangle.v[2].coords * b[2],
        );
        assert!((rebuilt - result.closest[1]).norm() < TOLERANCE);
    }
}
