//! Rational B-spline (NURBS) curves.
//!
//! With homogeneous sums `A(t) = sum_i N_i(t) w_i P_i` and
//! `w(t) = sum_i N_i(t) w_i`, the curve is `X(t) = A(t) / w(t)` and the
//! derivatives come from the quotient rule,
//! `X' = (A' - w' X) / w`,
//! `X'' = (A'' - 2 w' X' - w'' X) / w`,
//! `X''' = (A''' - 3 w' X'' - 3 w'' X' - w''' X) / w`.

use crate::curve::{BasisFunction, ParametricCurve};
use crate::error::{GeometryError, Result};
use nalgebra::{RealField, SVector};

/// NURBS curve with per-control-point weights.
#[derive(Debug, Clone, PartialEq)]
pub struct NurbsCurve<T: RealField + Copy, const D: usize> {
    basis: BasisFunction<T>,
    controls: Vec<SVector<T, D>>,
    weights: Vec<T>,
}

impl<T: RealField + Copy, const D: usize> NurbsCurve<T, D> {
    /// Curve with open uniform knots on `[0, 1]`.
    pub fn open_uniform(
        degree: usize,
        controls: Vec<SVector<T, D>>,
        weights: Vec<T>,
    ) -> Result<Self> {
        let basis = BasisFunction::open_uniform(controls.len(), degree)?;
        Self::assemble(basis, controls, weights)
    }

    /// Curve with a caller-supplied knot vector.
    pub fn from_knots(
        degree: usize,
        controls: Vec<SVector<T, D>>,
        weights: Vec<T>,
        knots: &[T],
    ) -> Result<Self> {
        let basis = BasisFunction::from_knots(controls.len(), degree, knots)?;
        Self::assemble(basis, controls, weights)
    }

    fn assemble(
        basis: BasisFunction<T>,
        controls: Vec<SVector<T, D>>,
        weights: Vec<T>,
    ) -> Result<Self> {
        if weights.len() != controls.len() {
            return Err(GeometryError::Degenerate(format!(
                "{} weights for {} control points",
                weights.len(),
                controls.len()
            ))
            .into());
        }
        if weights.iter().any(|w| *w <= T::zero()) {
            return Err(
                GeometryError::Degenerate("weights must be positive".to_string()).into(),
            );
        }
        Ok(Self {
            basis,
            controls,
            weights,
        })
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
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    // Weighted homogeneous sum of the given derivative order.
    fn homogeneous(
        &self,
        eval: &crate::curve::BasisEval<T>,
        order: usize,
    ) -> (SVector<T, D>, T) {
        let mut x = SVector::zeros();
        let mut w = T::zero();
        for i in eval.min_index..=eval.max_index {
            let coeff = eval.value(order, i) * self.weights[i];
            x += self.controls[i] * coeff;
            w += coeff;
        }
        (x, w)
    }
}

impl<T: RealField + Copy, const D: usize> ParametricCurve<T, D> for NurbsCurve<T, D> {
    fn domain(&self) -> (T, T) {
        (self.basis.min_domain(), self.basis.max_domain())
    }

    fn evaluate(&self, t: T, order: usize) -> [SVector<T, D>; 4] {
        let two = crate::math::cast::<T>(2.0);
        let three = crate::math::cast::<T>(3.0);
        let eval = self.basis.evaluate(t, order.min(3));
        let mut jet = [SVector::zeros(); 4];

        let (x, w) = self.homogeneous(&eval, 0);
        let inv_w = T::one() / w;
        jet[0] = x * inv_w;

        if order >= 1 {
            let (x1, w1) = self.homogeneous(&eval, 1);
            jet[1] = (x1 - jet[0] * w1) * inv_w;
            if order >= 2 {
                let (x2, w2) = self.homogeneous(&eval, 2);
                jet[2] = (x2 - jet[1] * (two * w1) - jet[0] * w2) * inv_w;
                if order >= 3 {
                    let (x3, w3) = self.homogeneous(&eval, 3);
                    jet[3] = (x3 - jet[2] * (three * w1) - jet[1] * (three * w2)
                        - jet[0] * w3)
                        * inv_w;
                }
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
    use nalgebra::Vector2;

    // Quadratic NURBS quarter circle: controls (1,0), (1,1), (0,1) with
    // weights 1, 1/sqrt(2), 1 trace the unit circle exactly.
    fn quarter_circle() -> NurbsCurve<f64, 2> {
        NurbsCurve::open_uniform(
            2,
            vec![
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
            vec![1.0, std::f64::consts::FRAC_1_SQRT_2, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn quarter_circle_lies_on_unit_circle() {
        let curve = quarter_circle();
        for step in 0..=16 {
            let p = curve.position(f64::from(step) / 16.0);
            assert!((p.norm() - 1.0).abs() < TOLERANCE, "step={step}");
        }
    }

    #[test]
    fn quarter_circle_arc_length() {
        let curve = quarter_circle();
        assert!((curve.total_length() - std::f64::consts::FRAC_PI_2).abs() < 1e-8);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let curve = quarter_circle();
        let t = 0.3;
        let h = 1e-6;
        let jet = curve.evaluate(t, 3);
        let fd1 = (curve.position(t + h) - curve.position(t - h)) / (2.0 * h);
        assert!((jet[1] - fd1).norm() < 1e-5);
        let fd2 =
            (curve.position(t + h) - curve.position(t) * 2.0 + curve.position(t - h)) / (h * h);
        assert!((jet[2] - fd2).norm() < 1e-3);
    }

    #[test]
    fn unit_weights_reduce_to_bspline() {
        let controls = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 2.0),
            Vector2::new(2.0, -1.0),
            Vector2::new(3.0, 0.0),
        ];
        let nurbs =
            NurbsCurve::open_uniform(3, controls.clone(), vec![1.0; 4]).unwrap();
        let bspline = crate::curve::BSplineCurve::open_uniform(3, controls).unwrap();
        for step in 0..=10 {
            let t = f64::from(step) / 10.0;
            assert!((nurbs.position(t) - bspline.position(t)).norm() < TOLERANCE);
        }
    }

    #[test]
    fn nonpositive_weights_are_rejected() {
        let result = NurbsCurve::<f64, 2>::open_uniform(
            2,
            vec![Vector2::zeros(), Vector2::x(), Vector2::y()],
            vec![1.0, 0.0, 1.0],
        );
        assert!(result.is_err());
    }
}
