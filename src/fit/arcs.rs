//! Approximation of a 2D parametric curve by circular arcs.
//!
//! The curve is subdivided into pieces of equal arc length. Each piece
//! is replaced by the arc circumscribing its endpoints and the curve
//! point on the perpendicular bisector of the endpoint chord. The arcs
//! join with C0 continuity. A nearly collinear triple has no
//! circumscribing circle; its arc gets center and radius `f64::MAX` as a
//! sentinel that the piece is the line segment between its endpoints.

use crate::curve::ParametricCurve;
use crate::error::{Result, SolverError};
use crate::primitives::Arc2;
use nalgebra::{Point2, RealField};

/// Output of [`approximate_curve_by_arcs`]. `times` and `points` have
/// `2 * num_arcs + 1` entries; even indices are the equal-arc-length
/// subdivision and odd indices are the bisector midpoints used to fit
/// each arc.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcApproximation<T: RealField + Copy> {
    pub times: Vec<T>,
    pub points: Vec<Point2<T>>,
    pub arcs: Vec<Arc2<T>>,
}

/// Approximates `curve` by `num_arcs` arcs. A circumscription whose
/// determinant is below `epsilon` in magnitude is classified as
/// collinear and produces the line-segment sentinel.
pub fn approximate_curve_by_arcs<T, C>(
    curve: &C,
    num_arcs: usize,
    epsilon: T,
) -> Result<ArcApproximation<T>>
where
    T: RealField + Copy,
    C: ParametricCurve<T, 2>,
{
    if num_arcs == 0 {
        return Err(SolverError::InvalidInput("num_arcs must be positive".to_string()).into());
    }
    if epsilon < T::zero() {
        return Err(SolverError::InvalidInput("epsilon must be nonnegative".to_string()).into());
    }

    let zero = T::zero();
    let half = crate::math::cast::<T>(0.5);
    let num_times = 2 * num_arcs + 1;
    let mut times = vec![zero; num_times];
    let mut points = vec![Point2::origin(); num_times];
    let mut arcs = Vec::with_capacity(num_arcs);

    // Equal-arc-length subdivision into the even-indexed slots.
    let total_length = curve.total_length();
    let delta_length = total_length / crate::math::cast::<T>((num_times - 1) as f64);
    for i in (0..num_times).step_by(2) {
        let length = delta_length * crate::math::cast::<T>(i as f64);
        times[i] = curve.time_at_length(length);
        points[i] = Point2::from(curve.position(times[i]));
    }

    for i in 0..num_arcs {
        let (j0, j1, j2) = (2 * i, 2 * i + 1, 2 * i + 2);
        let p0 = points[j0];
        let p1 = points[j2];

        // Bisection for the curve point on the perpendicular bisector of
        // <P0, P1>: F(t) = Dot(D, X(t) - A) with D = P1 - P0 and A the
        // chord midpoint satisfies F(t0) < 0 < F(t1). The loop terminates
        // when the midpoint rounds to an interval endpoint.
        let d = p1 - p0;
        let a = Point2::from((p0.coords + p1.coords) * half);
        let mut t0 = times[j0];
        let mut t1 = times[j2];
        let mut t_root;
        loop {
            t_root = half * (t0 + t1);
            let f = d.dot(&(Point2::from(curve.position(t_root)) - a));
            if f == zero || t_root == t0 || t_root == t1 {
                break;
            }
            if f < zero {
                t0 = t_root;
            } else {
                t1 = t_root;
            }
        }
        times[j1] = t_root;
        points[j1] = Point2::from(curve.position(t_root));
        let m = points[j1];

        // Circumscribe {P0, M, P1}.
        let diff0 = p0 - m;
        let diff1 = p1 - m;
        let avrg0 = (p0.coords + m.coords) * half;
        let avrg1 = (p1.coords + m.coords) * half;
        let dot0 = diff0.dot(&avrg0);
        let dot1 = diff1.dot(&avrg1);
        let det = diff0.perp(&diff1);
        if det.abs() >= epsilon && det != zero {
            let center = Point2::new(
                (diff1.y * dot0 - diff0.y * dot1) / det,
                (diff0.x * dot1 - diff1.x * dot0) / det,
            );
            let radius = (m - center).norm();
            arcs.push(Arc2::new(center, radius, p0, p1));
        } else {
            let huge = crate::math::cast::<T>(f64::MAX);
            arcs.push(Arc2::new(Point2::new(huge, huge), huge, p0, p1));
        }
    }

    Ok(ArcApproximation {
        times,
        points,
        arcs,
    })
}
