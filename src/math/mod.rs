//! Scalar utilities shared by the query implementations.

use nalgebra::RealField;

/// 2D point with `f64` coordinates.
pub type Point2 = nalgebra::Point2<f64>;
/// 3D point with `f64` coordinates.
pub type Point3 = nalgebra::Point3<f64>;
/// 2D vector with `f64` coordinates.
pub type Vector2 = nalgebra::Vector2<f64>;
/// 3D vector with `f64` coordinates.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Default tolerance for `f64` geometric comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Converts an `f64` literal into the working scalar type.
#[inline]
pub fn cast<T: RealField>(value: f64) -> T {
    nalgebra::convert(value)
}

/// Clamps `x` to the interval `[lo, hi]`.
#[inline]
#[must_use]
pub fn clamp<T: RealField + Copy>(x: T, lo: T, hi: T) -> T {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Clamps `x` to `[0, 1]`.
#[inline]
#[must_use]
pub fn saturate<T: RealField + Copy>(x: T) -> T {
    clamp(x, T::zero(), T::one())
}

/// Returns `-1`, `0`, or `+1` according to the sign of `x`.
#[inline]
#[must_use]
pub fn sign<T: RealField + Copy>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else if x < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Computes `a * b - c * d` with an FMA correction term, which avoids the
/// catastrophic cancellation of the naive expression when `a * b` and
/// `c * d` are nearly equal.
#[inline]
#[must_use]
pub fn difference_of_products<T: RealField + Copy>(a: T, b: T, c: T, d: T) -> T {
    let cd = c * d;
    let error = (-c).mul_add(d, cd);
    let dop = a.mul_add(b, -cd);
    dop + error
}

/// Computes `a * b + c * d` with an FMA correction term.
#[inline]
#[must_use]
pub fn sum_of_products<T: RealField + Copy>(a: T, b: T, c: T, d: T) -> T {
    difference_of_products(a, b, -c, d)
}
