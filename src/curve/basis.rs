//! B-spline basis functions and their derivatives through order 3.
//!
//! For `n` control points and degree `d` with `1 <= d <= n-1` there are
//! `n + d + 1` nondecreasing knots `t[i]`, and the curve domain is
//! `[t[d], t[n]]`. The basis values are built by the Cox-de Boor
//! recursion over the `d+1` knot spans containing the evaluation
//! parameter.

use crate::error::{GeometryError, Result};
use nalgebra::RealField;

/// A distinct knot value with its multiplicity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniqueKnot<T: RealField + Copy> {
    pub t: T,
    pub multiplicity: usize,
}

/// Basis function values produced by [`BasisFunction::evaluate`]. Only
/// the indices in `[min_index, max_index]` can be nonzero; `value`
/// returns zero outside that window.
#[derive(Debug, Clone)]
pub struct BasisEval<T: RealField + Copy> {
    pub min_index: usize,
    pub max_index: usize,
    stride: usize,
    jet: [Vec<T>; 4],
}

impl<T: RealField + Copy> BasisEval<T> {
    /// The basis function derivative of the given order for control
    /// point index `i`.
    #[must_use]
    pub fn value(&self, order: usize, i: usize) -> T {
        if order < 4 && (self.min_index..=self.max_index).contains(&i) {
            self.jet[order][i * self.stride + self.stride - 1]
        } else {
            T::zero()
        }
    }
}

/// B-spline basis function evaluator shared by curves and surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisFunction<T: RealField + Copy> {
    num_controls: usize,
    degree: usize,
    t_min: T,
    t_max: T,
    open: bool,
    knots: Vec<T>,
    // Unique knot value paired with the knot index of the last
    // occurrence of the preceding value, used to locate the span of an
    // interior parameter. The first unique knot never matches and is
    // omitted.
    keys: Vec<(T, usize)>,
}

impl<T: RealField + Copy> BasisFunction<T> {
    /// Open uniform knots on `[0, 1]`: the first and last knots have
    /// multiplicity `degree + 1` and the interior knots are equally
    /// spaced and simple.
    pub fn open_uniform(num_controls: usize, degree: usize) -> Result<Self> {
        if degree < 1 || num_controls < degree + 1 {
            return Err(GeometryError::InvalidKnots(format!(
                "degree {degree} requires at least {} control points, got {num_controls}",
                degree + 1
            ))
            .into());
        }

        let num_unique = num_controls - degree + 1;
        let denom = crate::math::cast::<T>((num_unique - 1) as f64);
        let mut unique = Vec::with_capacity(num_unique);
        unique.push(UniqueKnot {
            t: T::zero(),
            multiplicity: degree + 1,
        });
        for i in 1..num_unique - 1 {
            unique.push(UniqueKnot {
                t: crate::math::cast::<T>(i as f64) / denom,
                multiplicity: 1,
            });
        }
        unique.push(UniqueKnot {
            t: T::one(),
            multiplicity: degree + 1,
        });
        Self::create(num_controls, degree, &unique)
    }

    /// Caller-supplied knot vector of length `num_controls + degree + 1`
    /// with nondecreasing entries.
    pub fn from_knots(num_controls: usize, degree: usize, knots: &[T]) -> Result<Self> {
        if knots.len() != num_controls + degree + 1 {
            return Err(GeometryError::InvalidKnots(format!(
                "expected {} knots, got {}",
                num_controls + degree + 1,
                knots.len()
            ))
            .into());
        }

        let mut unique: Vec<UniqueKnot<T>> = Vec::new();
        for &t in knots {
            match unique.last_mut() {
                Some(last) if last.t == t => last.multiplicity += 1,
                Some(last) if last.t > t => {
                    return Err(GeometryError::InvalidKnots(
                        "knots are not nondecreasing".to_string(),
                    )
                    .into());
                }
                _ => unique.push(UniqueKnot {
                    t,
                    multiplicity: 1,
                }),
            }
        }
        Self::create(num_controls, degree, &unique)
    }

    fn create(num_controls: usize, degree: usize, unique: &[UniqueKnot<T>]) -> Result<Self> {
        if num_controls < 2 || degree < 1 || degree >= num_controls {
            return Err(GeometryError::InvalidKnots(format!(
                "invalid degree {degree} for {num_controls} control points"
            ))
            .into());
        }
        if unique.len() < 2 {
            return Err(
                GeometryError::InvalidKnots("need at least two unique knots".to_string()).into(),
            );
        }
        for knot in unique {
            if knot.multiplicity < 1 || knot.multiplicity > degree + 1 {
                return Err(GeometryError::InvalidKnots(format!(
                    "multiplicity {} exceeds degree {degree} plus one",
                    knot.multiplicity
                ))
                .into());
            }
        }
        let total: usize = unique.iter().map(|k| k.multiplicity).sum();
        if total != num_controls + degree + 1 {
            return Err(GeometryError::InvalidKnots(format!(
                "multiplicities sum to {total}, expected {}",
                num_controls + degree + 1
            ))
            .into());
        }

        let mult0 = unique[0].multiplicity;
        let mult1 = unique[unique.len() - 1].multiplicity;
        let open = mult0 == mult1 && mult0 == degree + 1;

        let mut knots = Vec::with_capacity(total);
        let mut keys = Vec::with_capacity(unique.len() - 1);
        let mut sum = 0;
        for (i, k) in unique.iter().enumerate() {
            for _ in 0..k.multiplicity {
                knots.push(k.t);
            }
            if i > 0 {
                keys.push((k.t, sum - 1));
            }
            sum += k.multiplicity;
        }

        let t_min = knots[degree];
        let t_max = knots[num_controls];
        Ok(Self {
            num_controls,
            degree,
            t_min,
            t_max,
            open,
            knots,
            keys,
        })
    }

    #[must_use]
    pub fn num_controls(&self) -> usize {
        self.num_controls
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn min_domain(&self) -> T {
        self.t_min
    }

    #[must_use]
    pub fn max_domain(&self) -> T {
        self.t_max
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    // Index i with knot[i] <= t < knot[i+1], clamping t to the domain.
    fn span_index(&self, t: &mut T) -> usize {
        if *t <= self.t_min {
            *t = self.t_min;
            return self.degree;
        }
        if *t >= self.t_max {
            *t = self.t_max;
            return self.num_controls - 1;
        }
        for key in &self.keys {
            if *t < key.0 {
                return key.1;
            }
        }
        self.num_controls - 1
    }

    /// Evaluates the basis functions and derivatives through `order`
    /// (at most 3) at `t`, clamped to the domain.
    #[must_use]
    pub fn evaluate(&self, mut t: T, order: usize) -> BasisEval<T> {
        let order = order.min(3);
        let zero = T::zero();
        let one = T::one();
        let two = crate::math::cast::<T>(2.0);
        let three = crate::math::cast::<T>(3.0);

        let i = self.span_index(&mut t);
        let stride = self.degree + 1;
        let cols = self.num_controls + self.degree;
        let mut jet: [Vec<T>; 4] = [
            vec![zero; cols * stride],
            vec![zero; cols * stride],
            vec![zero; cols * stride],
            vec![zero; cols * stride],
        ];
        let idx = |c: usize, j: usize| c * stride + j;

        jet[0][idx(i, 0)] = one;

        let n0 = t - self.knots[i];
        let n1 = self.knots[i + 1] - t;
        for j in 1..=self.degree {
            let d0 = self.knots[i + j] - self.knots[i];
            let d1 = self.knots[i + 1] - self.knots[i - j + 1];
            let inv_d0 = if d0 > zero { one / d0 } else { zero };
            let inv_d1 = if d1 > zero { one / d1 } else { zero };

            jet[0][idx(i, j)] = n0 * jet[0][idx(i, j - 1)] * inv_d0;
            jet[0][idx(i - j, j)] = n1 * jet[0][idx(i - j + 1, j - 1)] * inv_d1;

            if order >= 1 {
                jet[1][idx(i, j)] =
                    (n0 * jet[1][idx(i, j - 1)] + jet[0][idx(i, j - 1)]) * inv_d0;
                jet[1][idx(i - j, j)] =
                    (n1 * jet[1][idx(i - j + 1, j - 1)] - jet[0][idx(i - j + 1, j - 1)]) * inv_d1;

                if order >= 2 {
                    jet[2][idx(i, j)] =
                        (n0 * jet[2][idx(i, j - 1)] + two * jet[1][idx(i, j - 1)]) * inv_d0;
                    jet[2][idx(i - j, j)] = (n1 * jet[2][idx(i - j + 1, j - 1)]
                        - two * jet[1][idx(i - j + 1, j - 1)])
                        * inv_d1;

                    if order >= 3 {
                        jet[3][idx(i, j)] =
                            (n0 * jet[3][idx(i, j - 1)] + three * jet[2][idx(i, j - 1)]) * inv_d0;
                        jet[3][idx(i - j, j)] = (n1 * jet[3][idx(i - j + 1, j - 1)]
                            - three * jet[2][idx(i - j + 1, j - 1)])
                            * inv_d1;
                    }
                }
            }
        }

        for j in 2..=self.degree {
            for k in (i - j + 1)..i {
                let n0 = t - self.knots[k];
                let n1 = self.knots[k + j + 1] - t;
                let d0 = self.knots[k + j] - self.knots[k];
                let d1 = self.knots[k + j + 1] - self.knots[k + 1];
                let inv_d0 = if d0 > zero { one / d0 } else { zero };
                let inv_d1 = if d1 > zero { one / d1 } else { zero };

                jet[0][idx(k, j)] =
                    n0 * jet[0][idx(k, j - 1)] * inv_d0 + n1 * jet[0][idx(k + 1, j - 1)] * inv_d1;

                if order >= 1 {
                    jet[1][idx(k, j)] = (n0 * jet[1][idx(k, j - 1)] + jet[0][idx(k, j - 1)])
                        * inv_d0
                        + (n1 * jet[1][idx(k + 1, j - 1)] - jet[0][idx(k + 1, j - 1)]) * inv_d1;

                    if order >= 2 {
                        jet[2][idx(k, j)] = (n0 * jet[2][idx(k, j - 1)]
                            + two * jet[1][idx(k, j - 1)])
                            * inv_d0
                            + (n1 * jet[2][idx(k + 1, j - 1)] - two * jet[1][idx(k + 1, j - 1)])
                                * inv_d1;

                        if order >= 3 {
                            jet[3][idx(k, j)] = (n0 * jet[3][idx(k, j - 1)]
                                + three * jet[2][idx(k, j - 1)])
                                * inv_d0
                                + (n1 * jet[3][idx(k + 1, j - 1)]
                                    - three * jet[2][idx(k + 1, j - 1)])
                                    * inv_d1;
                        }
                    }
                }
            }
        }

        BasisEval {
            min_index: i - self.degree,
            max_index: i,
            stride,
            jet,
        }
    }
}
