//! Derivative-free minimizers.
//!
//! The 1D minimizer examines subintervals of the search interval. On each
//! subinterval it samples the endpoints and midpoint; a monotonic triple is
//! subdivided (to depth `max_level`), a triple whose midpoint is the
//! smallest value brackets a minimum and is refined by parabolic
//! interpolation (at most `max_bracket` steps). The N-dimensional minimizer
//! cycles the 1D search through the coordinate directions of a box domain.

use crate::math::cast;
use nalgebra::RealField;

/// Minimizer for a scalar function on an interval.
pub struct Minimize1<'a, T: RealField + Copy> {
    function: &'a dyn Fn(T) -> T,
    max_level: u32,
    max_bracket: u32,
    epsilon: T,
    tolerance: T,
}

struct Best<T> {
    t: T,
    f: T,
}

impl<'a, T: RealField + Copy> Minimize1<'a, T> {
    pub fn new(function: &'a dyn Fn(T) -> T, max_level: u32, max_bracket: u32) -> Self {
        Self {
            function,
            max_level,
            max_bracket,
            epsilon: cast(1e-8),
            tolerance: cast(1e-4),
        }
    }

    #[must_use]
    pub fn with_tolerances(mut self, epsilon: T, tolerance: T) -> Self {
        self.epsilon = epsilon.max(T::zero());
        self.tolerance = tolerance.max(T::zero());
        self
    }

    /// Searches `[t0, t1]` for a minimum starting from `t_initial`,
    /// returning `(t_min, f_min)`.
    pub fn minimum(&self, t0: T, t1: T, t_initial: T) -> (T, T) {
        let f0 = (self.function)(t0);
        let mut best = Best { t: t0, f: f0 };

        let f_initial = (self.function)(t_initial);
        if f_initial < best.f {
            best = Best {
                t: t_initial,
                f: f_initial,
            };
        }

        let f1 = (self.function)(t1);
        if f1 < best.f {
            best = Best { t: t1, f: f1 };
        }

        self.search_triple(&mut best, t0, f0, t_initial, f_initial, t1, f1, self.max_level);

        (best.t, best.f)
    }

    fn search_pair(&self, best: &mut Best<T>, t0: T, f0: T, t1: T, f1: T, level: u32) {
        if level == 0 {
            return;
        }
        let level = level - 1;

        let half: T = cast(0.5);
        let tm = half * (t0 + t1);
        let fm = (self.function)(tm);
        if fm < best.f {
            *best = Best { t: tm, f: fm };
        }

        let two: T = cast(2.0);
        if f0 - two * fm + f1 > T::zero() {
            // The quadratic fit opens upward at the midpoint.
            if f1 > f0 {
                if fm >= f0 {
                    self.search_pair(best, t0, f0, tm, fm, level);
                } else {
                    self.bracketed_minimum(best, t0, f0, tm, fm, t1, f1, level);
                }
            } else if f1 < f0 {
                if fm >= f1 {
                    self.search_pair(best, tm, fm, t1, f1, level);
                } else {
                    self.bracketed_minimum(best, t0, f0, tm, fm, t1, f1, level);
                }
            } else {
                self.search_pair(best, t0, f0, tm, fm, level);
                self.search_pair(best, tm, fm, t1, f1, level);
            }
        } else if f1 > f0 {
            self.search_pair(best, t0, f0, tm, fm, level);
        } else if f1 < f0 {
            self.search_pair(best, tm, fm, t1, f1, level);
        } else {
            self.search_pair(best, t0, f0, tm, fm, level);
            self.search_pair(best, tm, fm, t1, f1, level);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn search_triple(
        &self,
        best: &mut Best<T>,
        t0: T,
        f0: T,
        tm: T,
        fm: T,
        t1: T,
        f1: T,
        level: u32,
    ) {
        if level == 0 {
            return;
        }
        let level = level - 1;

        if (t1 - tm) * (f0 - fm) > (tm - t0) * (fm - f1) {
            // The quadratic fit opens upward at the midpoint.
            if f1 > f0 {
                if fm >= f0 {
                    self.search_pair(best, t0, f0, tm, fm, level);
                } else {
                    self.bracketed_minimum(best, t0, f0, tm, fm, t1, f1, level);
                }
            } else if f1 < f0 {
                if fm >= f1 {
                    self.search_pair(best, tm, fm, t1, f1, level);
                } else {
                    self.bracketed_minimum(best, t0, f0, tm, fm, t1, f1, level);
                }
            } else {
                self.search_pair(best, t0, f0, tm, fm, level);
                self.search_pair(best, tm, fm, t1, f1, level);
            }
        } else if f1 > f0 {
            self.search_pair(best, t0, f0, tm, fm, level);
        } else if f1 < f0 {
            self.search_pair(best, tm, fm, t1, f1, level);
        } else {
            self.search_pair(best, t0, f0, tm, fm, level);
            self.search_pair(best, tm, fm, t1, f1, level);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn bracketed_minimum(
        &self,
        best: &mut Best<T>,
        mut t0: T,
        mut f0: T,
        mut tm: T,
        mut fm: T,
        mut t1: T,
        mut f1: T,
        level: u32,
    ) {
        let half: T = cast(0.5);
        let two: T = cast(2.0);
        for _ in 0..self.max_bracket {
            if fm < best.f {
                *best = Best { t: tm, f: fm };
            }

            if (t1 - t0).abs() <= two * self.tolerance * tm.abs() + self.epsilon {
                break;
            }

            // Vertex of the interpolating parabola.
            let dt0 = t0 - tm;
            let dt1 = t1 - tm;
            let df0 = f0 - fm;
            let df1 = f1 - fm;
            let tmp0 = dt0 * df1;
            let tmp1 = dt1 * df0;
            let denom = tmp1 - tmp0;
            if denom.abs() <= self.epsilon {
                return;
            }

            let tv = crate::math::clamp(tm + half * (dt1 * tmp1 - dt0 * tmp0) / denom, t0, t1);
            let fv = (self.function)(tv);
            if fv < best.f {
                *best = Best { t: tv, f: fv };
            }

            if tv < tm {
                if fv < fm {
                    t1 = tm;
                    f1 = fm;
                    tm = tv;
                    fm = fv;
                } else {
                    t0 = tv;
                    f0 = fv;
                }
            } else if tv > tm {
                if fv < fm {
                    t0 = tm;
                    f0 = fm;
                    tm = tv;
                    fm = fv;
                } else {
                    t1 = tv;
                    f1 = fv;
                }
            } else {
                // The parabola vertex landed on the middle sample.
                self.search_pair(best, t0, f0, tm, fm, level);
                self.search_pair(best, tm, fm, t1, f1, level);
                return;
            }
        }
    }
}

/// Minimizer for a scalar function of several variables on a box domain,
/// cycling a 1D minimization through the coordinate directions.
pub struct MinimizeN<T: RealField + Copy> {
    max_level: u32,
    max_bracket: u32,
    max_iterations: usize,
    tolerance: T,
}

impl<T: RealField + Copy> MinimizeN<T> {
    pub fn new(max_level: u32, max_bracket: u32, max_iterations: usize) -> Self {
        Self {
            max_level,
            max_bracket,
            max_iterations,
            tolerance: cast(1e-8),
        }
    }

    /// Searches the box `[t0, t1]` starting from `t_initial`, returning the
    /// minimizing position and the function value there. The slices must
    /// all have the same length.
    pub fn minimum(
        &self,
        function: &dyn Fn(&[T]) -> T,
        t0: &[T],
        t1: &[T],
        t_initial: &[T],
    ) -> (Vec<T>, T) {
        let dimensions = t_initial.len();
        let mut current = t_initial.to_vec();
        let mut f_current = function(current.as_slice());

        for _ in 0..self.max_iterations {
            let mut max_change = T::zero();
            for d in 0..dimensions {
                let frozen = current.clone();
                let line = |s: T| {
                    let mut probe = frozen.clone();
                    probe[d] = s;
                    function(probe.as_slice())
                };
                let minimizer = Minimize1::new(&line, self.max_level, self.max_bracket);
                let (s_min, f_min) = minimizer.minimum(t0[d], t1[d], current[d]);
                if f_min < f_current {
                    max_change = max_change.max((s_min - current[d]).abs());
                    current[d] = s_min;
                    f_current = f_min;
                }
            }
            if max_change <= self.tolerance {
                break;
            }
        }

        (current, f_current)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn minimize1_parabola() {
        let f = |t: f64| (t - 1.5) * (t - 1.5) + 2.0;
        let minimizer = Minimize1::new(&f, 8, 32);
        let (t_min, f_min) = minimizer.minimum(0.0, 4.0, 0.5);
        assert!((t_min - 1.5).abs() < 1e-4);
        assert!((f_min - 2.0).abs() < 1e-8);
    }

    #[test]
    fn minimize1_asymmetric_valley() {
        let f = |t: f64| (t * t - 2.0) * (t * t - 2.0);
        let minimizer = Minimize1::new(&f, 10, 32);
        let (t_min, f_min) = minimizer.minimum(0.0, 3.0, 0.1);
        assert!((t_min - std::f64::consts::SQRT_2).abs() < 1e-3);
        assert!(f_min < 1e-8);
    }

    #[test]
    fn minimize_n_quadratic_bowl() {
        let f = |x: &[f64]| (x[0] - 1.0).powi(2) + 2.0 * (x[1] + 0.5).powi(2);
        let minimizer = MinimizeN::new(8, 32, 16);
        let (x_min, f_min) = minimizer.minimum(&f, &[-3.0, -3.0], &[3.0, 3.0], &[0.0, 0.0]);
        assert!((x_min[0] - 1.0).abs() < 1e-3);
        assert!((x_min[1] + 0.5).abs() < 1e-3);
        assert!(f_min < 1e-6);
    }
}
