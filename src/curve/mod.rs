//! Parametric curve evaluation.
//!
//! Curves implement [`ParametricCurve`], which provides arc length by
//! Gauss-Legendre quadrature of the speed and the inverse mapping from
//! arc length to curve parameter by bisection. The mapping is the root of
//! `F(t) = length(tmin, t) - s`, which is nondecreasing because
//! `F'(t) = speed(t) >= 0`, so bisection always converges.

pub mod basis;
pub mod bezier;
pub mod bspline;
pub mod nurbs;

pub use basis::{BasisEval, BasisFunction, UniqueKnot};
pub use bezier::BezierCurve;
pub use bspline::BSplineCurve;
pub use nurbs::NurbsCurve;

use nalgebra::{RealField, SVector};

const MAX_BISECTIONS: usize = 1024;
const QUADRATURE_INTERVALS: usize = 8;

// Five-point Gauss-Legendre nodes and weights on [-1, 1].
const GAUSS_NODE: [f64; 5] = [
    0.0,
    -0.538_469_310_105_683_1,
    0.538_469_310_105_683_1,
    -0.906_179_845_938_664,
    0.906_179_845_938_664,
];
const GAUSS_WEIGHT: [f64; 5] = [
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
    0.236_926_885_056_189_1,
];

// Composite five-point Gauss-Legendre quadrature of f on [t0, t1].
fn integrate<T, F>(t0: T, t1: T, f: F) -> T
where
    T: RealField + Copy,
    F: Fn(T) -> T,
{
    let half = crate::math::cast::<T>(0.5);
    let num = crate::math::cast::<T>(QUADRATURE_INTERVALS as f64);
    let width = (t1 - t0) / num;
    let mut sum = T::zero();
    for i in 0..QUADRATURE_INTERVALS {
        let a = t0 + width * crate::math::cast::<T>(i as f64);
        let center = a + half * width;
        let radius = half * width;
        for (node, weight) in GAUSS_NODE.iter().zip(GAUSS_WEIGHT.iter()) {
            let t = center + radius * crate::math::cast::<T>(*node);
            sum += crate::math::cast::<T>(*weight) * f(t) * radius;
        }
    }
    sum
}

/// Parameterized curve `X(t)` for `t` in `[tmin, tmax]` with positions in
/// `D` dimensions.
pub trait ParametricCurve<T: RealField + Copy, const D: usize> {
    /// The parameter interval `(tmin, tmax)`.
    fn domain(&self) -> (T, T);

    /// Position and derivatives at `t`, ordered position, first, second,
    /// third derivative. Entries past `order` are zero vectors, as are
    /// derivatives of order higher than the curve supports.
    fn evaluate(&self, t: T, order: usize) -> [SVector<T, D>; 4];

    fn position(&self, t: T) -> SVector<T, D> {
        self.evaluate(t, 0)[0]
    }

    /// Unit-length tangent at `t`.
    fn tangent(&self, t: T) -> SVector<T, D> {
        self.evaluate(t, 1)[1].normalize()
    }

    fn speed(&self, t: T) -> T {
        self.evaluate(t, 1)[1].norm()
    }

    /// Arc length of the restriction to `[t0, t1]` clamped to the domain.
    fn length(&self, t0: T, t1: T) -> T {
        let (tmin, tmax) = self.domain();
        let t0 = crate::math::clamp(t0, tmin, tmax);
        let t1 = crate::math::clamp(t1, tmin, tmax);
        if t1 <= t0 {
            return T::zero();
        }
        integrate(t0, t1, |t| self.speed(t))
    }

    fn total_length(&self) -> T {
        let (tmin, tmax) = self.domain();
        self.length(tmin, tmax)
    }

    /// Parameter `t` for which `length(tmin, t) == length`, located by
    /// bisection. Inputs outside `[0, total_length]` clamp to the domain
    /// endpoints.
    fn time_at_length(&self, length: T) -> T {
        let (tmin, tmax) = self.domain();
        if length <= T::zero() {
            return tmin;
        }
        if length >= self.total_length() {
            return tmax;
        }

        let half = crate::math::cast::<T>(0.5);
        let mut t0 = tmin;
        let mut t1 = tmax;
        let mut tmid = half * (t0 + t1);
        for _ in 0..MAX_BISECTIONS {
            tmid = half * (t0 + t1);
            if tmid <= t0 || tmid >= t1 {
                break;
            }
            let f = self.length(tmin, tmid) - length;
            if f > T::zero() {
                t1 = tmid;
            } else if f < T::zero() {
                t0 = tmid;
            } else {
                break;
            }
        }
        tmid
    }
}
