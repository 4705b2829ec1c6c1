//! Bezier curves of degree at least two on the domain `[0, 1]`.

use crate::curve::ParametricCurve;
use crate::error::{GeometryError, Result};
use nalgebra::{RealField, SVector};

/// Bezier curve defined by `degree + 1` control points. The constructor
/// precomputes the finite-difference control tables used to evaluate
/// derivatives through order 3 without recomputing differences per call.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve<T: RealField + Copy, const D: usize> {
    degree: usize,
    // controls[k] holds the k-th forward differences of the control
    // points, so controls[0] is the input.
    controls: [Vec<SVector<T, D>>; 4],
    // Pascal's triangle, choose[n][k] valid for k <= n.
    choose: Vec<Vec<T>>,
}

impl<T: RealField + Copy, const D: usize> BezierCurve<T, D> {
    pub fn new(controls: Vec<SVector<T, D>>) -> Result<Self> {
        if controls.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "a Bezier curve requires degree >= 2, got {} control points",
                controls.len()
            ))
            .into());
        }
        let degree = controls.len() - 1;

        let diff1: Vec<SVector<T, D>> =
            controls.windows(2).map(|w| w[1] - w[0]).collect();
        let diff2: Vec<SVector<T, D>> = diff1.windows(2).map(|w| w[1] - w[0]).collect();
        let diff3: Vec<SVector<T, D>> = if degree >= 3 {
            diff2.windows(2).map(|w| w[1] - w[0]).collect()
        } else {
            Vec::new()
        };

        let mut choose = vec![vec![T::one()]];
        for n in 1..=degree {
            let mut row = vec![T::one(); n + 1];
            for k in 1..n {
                row[k] = choose[n - 1][k - 1] + choose[n - 1][k];
            }
            choose.push(row);
        }

        Ok(Self {
            degree,
            controls: [controls, diff1, diff2, diff3],
            choose,
        })
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn controls(&self) -> &[SVector<T, D>] {
        &self.controls[0]
    }

    // Bernstein sum over the order-th difference table, scaled by
    // degree * (degree - 1) * ... for the derivative.
    fn compute(&self, t: T, omt: T, order: usize) -> SVector<T, D> {
        let table = &self.controls[order];
        let isup = self.degree - order;
        let mut result = table[0] * omt;
        let mut tpow = t;
        for i in 1..isup {
            let c = self.choose[isup][i] * tpow;
            result = (result + table[i] * c) * omt;
            tpow *= t;
        }
        result += table[isup] * tpow;

        let mut multiplier = T::one();
        for i in 0..order {
            multiplier *= crate::math::cast::<T>((self.degree - i) as f64);
        }
        result * multiplier
    }
}

impl<T: RealField + Copy, const D: usize> ParametricCurve<T, D> for BezierCurve<T, D> {
    fn domain(&self) -> (T, T) {
        (T::zero(), T::one())
    }

    fn evaluate(&self, t: T, order: usize) -> [SVector<T, D>; 4] {
        let omt = T::one() - t;
        let mut jet = [SVector::zeros(); 4];
        jet[0] = self.compute(t, omt, 0);
        if order >= 1 {
            jet[1] = self.compute(t, omt, 1);
            if order >= 2 {
                jet[2] = self.compute(t, omt, 2);
                if order >= 3 && self.degree >= 3 {
                    jet[3] = self.compute(t, omt, 3);
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

    fn quadratic() -> BezierCurve<f64, 2> {
        BezierCurve::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 2.0),
            Vector2::new(2.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_too_few_controls() {
        let result = BezierCurve::<f64, 2>::new(vec![Vector2::zeros(), Vector2::x()]);
        assert!(result.is_err());
    }

    #[test]
    fn interpolates_endpoints() {
        let curve = quadratic();
        assert!((curve.position(0.0) - Vector2::new(0.0, 0.0)).norm() < TOLERANCE);
        assert!((curve.position(1.0) - Vector2::new(2.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn quadratic_jet_is_exact() {
        // X(t) = (2t, 4t(1-t)) so X' = (2, 4-8t) and X'' = (0, -8).
        let curve = quadratic();
        let jet = curve.evaluate(0.25, 3);
        assert!((jet[0] - Vector2::new(0.5, 0.75)).norm() < TOLERANCE);
        assert!((jet[1] - Vector2::new(2.0, 2.0)).norm() < TOLERANCE);
        assert!((jet[2] - Vector2::new(0.0, -8.0)).norm() < TOLERANCE);
        // The third derivative of a quadratic is zero.
        assert!(jet[3].norm() < TOLERANCE);
    }

    #[test]
    fn cubic_third_derivative_is_constant() {
        let curve = BezierCurve::<f64, 2>::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, 0.0),
        ])
        .unwrap();
        let early = curve.evaluate(0.1, 3)[3];
        let late = curve.evaluate(0.9, 3)[3];
        assert!((early - late).norm() < TOLERANCE);
    }

    #[test]
    fn straight_line_arc_length() {
        // Degenerate quadratic along the x axis from 0 to 2.
        let curve = BezierCurve::<f64, 2>::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, 0.0),
        ])
        .unwrap();
        assert!((curve.total_length() - 2.0).abs() < 1e-8);
        let tmid = curve.time_at_length(1.0);
        assert!((curve.position(tmid).x - 1.0).abs() < 1e-6);
    }
}
