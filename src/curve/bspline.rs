//! B-spline curves built on [`BasisFunction`].

use crate::curve::{BasisFunction, ParametricCurve};
use crate::error::Result;
use nalgebra::{RealField, SVector};

/// B-spline curve with caller-visible degree and control points. The
/// domain is `[t[degree], t[num_controls]]` of the knot vector, which is
/// `[0, 1]` for open uniform knots.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineCurve<T: RealField + Copy, const D: usize> {
    basis: BasisFunction<T>,
    controls: Vec<SVector<T, D>>,
}

impl<T: RealField + Copy, const D: usize> BSplineCurve<T, D> {
    /// Curve with open uniform knots on `[0, 1]`.
    pub fn open_uniform(degree: usize, controls: Vec<SVector<T, D>>) -> Result<Self> {
        let basis = BasisFunction::open_uniform(controls.len(), degree)?;
        Ok(Self { basis, controls })
    }

    /// Curve with a caller-supplied knot vector of length
    /// `controls.len() + degree + 1`.
    pub fn from_knots(
        degree: usize,
        controls: Vec<SVector<T, D>>,
        knots: &[T],
    ) -> Result<Self> {
        let basis = BasisFunction::from_knots(controls.len(), degree, knots)?;
        Ok(Self { basis, controls })
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.basis.degree()
    }

    #[must_use]
    pub fn controls(&self) -> &[SVector<T, D>] {
        &self.controls
    }

    #[must_use]
    pub fn basis(&self) -> &BasisFunction<T> {
        &self.basis
    }
}

impl<T: RealField + Copy, const D: usize> ParametricCurve<T, D> for BSplineCurve<T, D> {
    fn domain(&self) -> (T, T) {
        (self.basis.min_domain(), self.basis.max_domain())
    }

    fn evaluate(&self, t: T, order: usize) -> [SVector<T, D>; 4] {
        let eval = self.basis.evaluate(t, order.min(3));
        let mut jet = [SVector::zeros(); 4];
        for (k, entry) in jet.iter_mut().enumerate().take(order.min(3) + 1) {
            for i in eval.min_index..=eval.max_index {
                *entry += self.controls[i] * eval.value(k, i);
            }
        }
        jet
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::{Vector2, Vector3};

    fn zigzag() -> BSplineCurve<f64, 2> {
        BSplineCurve::open_uniform(
            2,
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(2.0, -1.0),
                Vector2::new(3.0, 1.0),
                Vector2::new(4.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn open_curve_interpolates_end_controls() {
        let curve = zigzag();
        assert!((curve.position(0.0) - Vector2::new(0.0, 0.0)).norm() < TOLERANCE);
        assert!((curve.position(1.0) - Vector2::new(4.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn curve_stays_in_convex_hull() {
        let curve = zigzag();
        for step in 0..=20 {
            let p = curve.position(f64::from(step) / 20.0);
            assert!(p.x >= -TOLERANCE && p.x <= 4.0 + TOLERANCE);
            assert!(p.y >= -1.0 - TOLERANCE && p.y <= 1.0 + TOLERANCE);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let curve = zigzag();
        let t = 0.4;
        let h = 1e-6;
        let jet = curve.evaluate(t, 2);
        let fd1 = (curve.position(t + h) - curve.position(t - h)) / (2.0 * h);
        assert!((jet[1] - fd1).norm() < 1e-5);
        let fd2 =
            (curve.position(t + h) - curve.position(t) * 2.0 + curve.position(t - h)) / (h * h);
        assert!((jet[2] - fd2).norm() < 1e-3);
    }

    #[test]
    fn collinear_controls_give_a_line_in_3d() {
        let controls: Vec<Vector3<f64>> = (0..6)
            .map(|i| Vector3::new(f64::from(i), 2.0 * f64::from(i), 0.0))
            .collect();
        let curve = BSplineCurve::open_uniform(3, controls).unwrap();
        let expected = 5.0 * 5.0_f64.sqrt();
        assert!((curve.total_length() - expected).abs() < 1e-6);
    }

    #[test]
    fn caller_knots_are_respected() {
        let knots: [f64; 6] = [0.0, 0.0, 0.0, 2.0, 2.0, 2.0];
        let curve = BSplineCurve::from_knots(
            2,
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 2.0),
                Vector2::new(2.0, 0.0),
            ],
            &knots,
        )
        .unwrap();
        let (tmin, tmax) = curve.domain();
        assert!((tmin - 0.0).abs() < TOLERANCE);
        assert!((tmax - 2.0).abs() < TOLERANCE);
        // The single-span curve is the quadratic Bezier curve over [0, 2].
        assert!((curve.position(1.0) - Vector2::new(1.0, 1.0)).norm() < TOLERANCE);
    }
}
