//! Hermite basis polynomials for lattice interpolation.
//!
//! The cubic basis is `P(i, t) = (1-t)^(3-i) * t^i` for `0 <= i <= 3`
//! and the quintic basis is `P(i, t) = (1-t)^(5-i) * t^i` for
//! `0 <= i <= 5`, both on `[0, 1]`. Derivatives of any order are
//! available; orders past the degree are zero.

use nalgebra::RealField;

// order-th derivative of t^b.
fn power_derivative<T: RealField + Copy>(b: usize, order: usize, t: T) -> T {
    if order > b {
        return T::zero();
    }
    let mut factor = T::one();
    for k in 0..order {
        factor *= crate::math::cast::<T>((b - k) as f64);
    }
    factor * t.powi((b - order) as i32)
}

// order-th derivative of (1-t)^a t^b by the Leibniz product rule.
fn basis_derivative<T: RealField + Copy>(a: usize, b: usize, order: usize, t: T) -> T {
    let one = T::one();
    let mut binom: usize = 1;
    let mut sum = T::zero();
    for j in 0..=order {
        if j > 0 {
            binom = binom * (order - j + 1) / j;
        }
        // d^j (1-t)^a carries a sign of (-1)^j.
        let left = power_derivative(a, j, one - t);
        let left = if j % 2 == 0 { left } else { -left };
        let right = power_derivative(b, order - j, t);
        sum += crate::math::cast::<T>(binom as f64) * left * right;
    }
    sum
}

/// Cubic Hermite basis value or derivative `P(i, t)^(order)`.
#[must_use]
pub fn cubic<T: RealField + Copy>(i: usize, order: usize, t: T) -> T {
    if i > 3 || order > 3 {
        return T::zero();
    }
    basis_derivative(3 - i, i, order, t)
}

/// Quintic Hermite basis value or derivative `P(i, t)^(order)`.
#[must_use]
pub fn quintic<T: RealField + Copy>(i: usize, order: usize, t: T) -> T {
    if i > 5 || order > 5 {
        return T::zero();
    }
    basis_derivative(5 - i, i, order, t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn cubic_values_at_endpoints() {
        assert!((cubic(0, 0, 0.0_f64) - 1.0).abs() < TOLERANCE);
        assert!((cubic(3, 0, 1.0_f64) - 1.0).abs() < TOLERANCE);
        for i in 1..3 {
            assert!(cubic(i, 0, 0.0_f64).abs() < TOLERANCE);
            assert!(cubic(i, 0, 1.0_f64).abs() < TOLERANCE);
        }
    }

    #[test]
    fn cubic_first_derivatives_at_endpoints() {
        // P0' (0) = -3, P1'(0) = 1, P2'(1) = -1, P3'(1) = 3.
        assert!((cubic(0, 1, 0.0_f64) + 3.0).abs() < TOLERANCE);
        assert!((cubic(1, 1, 0.0_f64) - 1.0).abs() < TOLERANCE);
        assert!((cubic(2, 1, 1.0_f64) + 1.0).abs() < TOLERANCE);
        assert!((cubic(3, 1, 1.0_f64) - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for i in 0..=5 {
            for &t in &[0.2_f64, 0.5, 0.8] {
                let fd = (quintic(i, 0, t + h) - quintic(i, 0, t - h)) / (2.0 * h);
                assert!((quintic(i, 1, t) - fd).abs() < 1e-5, "i={i} t={t}");
                let fd2 = (quintic(i, 1, t + h) - quintic(i, 1, t - h)) / (2.0 * h);
                assert!((quintic(i, 2, t) - fd2).abs() < 1e-4, "i={i} t={t}");
            }
        }
    }

    #[test]
    fn orders_past_the_degree_vanish() {
        assert!(cubic::<f64>(1, 4, 0.3).abs() < TOLERANCE);
        assert!(quintic::<f64>(2, 6, 0.3).abs() < TOLERANCE);
        assert!(cubic::<f64>(4, 0, 0.3).abs() < TOLERANCE);
    }
}
