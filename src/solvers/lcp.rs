//! Lemke pivoting solver for the Linear Complementarity Problem
//! `w = q + M z`, `w^T z = 0`, `w >= 0`, `z >= 0`.
//!
//! The constants `q[r]` are perturbed into polynomials of degree `r + 1`
//! whose lexicographic comparison breaks ties during pivoting, which keeps
//! the algorithm away from degenerate cycles. The polynomials live in the
//! right half of the augmented matrix `[M | u | p(t)]`, so every pivot
//! operation updates them along with the matrix.
//!
//! The solver allocates its workspace at construction and reuses it across
//! calls, so a solver sized for a fixed `n` can be cached by queries that
//! repeatedly solve problems of the same dimension.

use nalgebra::RealField;

/// Outcome of [`LcpSolver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcpStatus {
    /// `q >= 0`, so `w = q`, `z = 0` solves the problem.
    HasTrivialSolution,
    /// Pivoting converged to a solution.
    HasNontrivialSolution,
    /// The problem has no solution.
    NoSolution,
    /// The iteration budget was exhausted; see [`LcpSolver::set_max_iterations`].
    FailedToConverge,
    /// Input slices are smaller than the solver dimension.
    InvalidInput,
}

impl LcpStatus {
    /// `true` for the two solution-bearing outcomes.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(
            self,
            LcpStatus::HasTrivialSolution | LcpStatus::HasNontrivialSolution
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tuple {
    W,
    Z,
}

#[derive(Debug, Clone, Copy)]
struct Variable {
    tuple: Tuple,
    index: usize,
    complementary: usize,
}

/// Run-time-sized LCP solver with reusable workspace.
#[derive(Debug, Clone)]
pub struct LcpSolver<T: RealField + Copy> {
    dimension: usize,
    max_iterations: usize,
    num_iterations: usize,
    num_cols: usize,
    augmented: Vec<T>,
    var_basic: Vec<Variable>,
    var_nonbasic: Vec<Variable>,
    min_ratio: Vec<T>,
    ratio: Vec<T>,
}

impl<T: RealField + Copy> LcpSolver<T> {
    /// Solver for problems of dimension `n` with the default iteration
    /// budget of `n * n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        let np1 = n + 1;
        Self {
            dimension: n,
            max_iterations: n * n,
            num_iterations: 0,
            num_cols: 2 * np1,
            augmented: vec![T::zero(); 2 * np1 * n],
            var_basic: vec![
                Variable {
                    tuple: Tuple::W,
                    index: 0,
                    complementary: 0,
                };
                np1
            ],
            var_nonbasic: vec![
                Variable {
                    tuple: Tuple::Z,
                    index: 0,
                    complementary: 0,
                };
                np1
            ],
            min_ratio: vec![T::zero(); np1],
            ratio: vec![T::zero(); np1],
        }
    }

    /// Overrides the iteration budget; zero restores the default `n * n`.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = if max_iterations > 0 {
            max_iterations
        } else {
            self.dimension * self.dimension
        };
    }

    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Number of pivot iterations used by the most recent [`solve`] call.
    ///
    /// [`solve`]: LcpSolver::solve
    #[must_use]
    pub fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// Solves `w = q + M z` with `M` given in row-major order. The outputs
    /// `w` and `z` are valid only when the returned status
    /// [`is_success`](LcpStatus::is_success).
    #[allow(clippy::too_many_lines)]
    pub fn solve(&mut self, q: &[T], m: &[T], w: &mut [T], z: &mut [T]) -> LcpStatus {
        let n = self.dimension;
        if n == 0
            || q.len() < n
            || m.len() < n * n
            || w.len() < n
            || z.len() < n
        {
            return LcpStatus::InvalidInput;
        }

        // Perturb q[r] into the polynomial with constant term q[r] and a
        // 1-coefficient at degree r + 1.
        for r in 0..n {
            for i in 0..=n {
                self.set_poly(r, i, T::zero());
            }
            self.set_poly(r, 0, q[r]);
            self.set_poly(r, r + 1, T::one());
        }

        // Trivial solution w = q, z = 0 when the lexicographic minimum of
        // the perturbed constants is nonnegative.
        for i in 0..=n {
            self.min_ratio[i] = self.poly(0, i);
        }
        let mut basic = 0;
        for r in 1..n {
            if self.poly_less_than_buffer(r) {
                for i in 0..=n {
                    self.min_ratio[i] = self.poly(r, i);
                }
                basic = r;
            }
        }
        if !less_than_zero(&self.min_ratio) {
            w[..n].copy_from_slice(&q[..n]);
            for zr in z.iter_mut().take(n) {
                *zr = T::zero();
            }
            self.num_iterations = 0;
            return LcpStatus::HasTrivialSolution;
        }

        // Fill in M and the auxiliary column of 1-values.
        for r in 0..n {
            for c in 0..n {
                self.set_aug(r, c, m[c + n * r]);
            }
            self.set_aug(r, n, T::one());
        }

        for i in 0..=n {
            self.var_basic[i] = Variable {
                tuple: Tuple::W,
                index: i,
                complementary: i,
            };
            self.var_nonbasic[i] = Variable {
                tuple: Tuple::Z,
                index: i,
                complementary: i,
            };
        }

        // The auxiliary variable z[n] drives the first pivot; equation
        // 'basic' is solved for it. The auxiliary column stays all ones, so
        // it is skipped in the row operations.
        let mut driving = n;
        for r in 0..n {
            if r != basic {
                for c in 0..self.num_cols {
                    if c != n {
                        let value = self.aug(r, c) - self.aug(basic, c);
                        self.set_aug(r, c, value);
                    }
                }
            }
        }
        for c in 0..self.num_cols {
            if c != n {
                let value = -self.aug(basic, c);
                self.set_aug(basic, c, value);
            }
        }

        self.num_iterations = 0;
        for _ in 0..self.max_iterations {
            self.num_iterations += 1;

            // The basic variable of equation 'basic' exited the dictionary;
            // its complementary variable becomes the next driving variable.
            let next_driving = self.var_basic[basic].complementary;
            self.var_nonbasic[next_driving].complementary = driving;
            std::mem::swap(
                &mut self.var_basic[basic],
                &mut self.var_nonbasic[driving],
            );
            if self.var_nonbasic[driving].index == n {
                // Converged: read the basic values from the polynomial
                // constant terms, zero the nonbasic variables.
                for r in 0..n {
                    let variable = self.var_basic[r];
                    let value = self.poly(r, 0);
                    match variable.tuple {
                        Tuple::W => w[variable.index] = value,
                        Tuple::Z => z[variable.index] = value,
                    }
                }
                for c in 0..=n {
                    let variable = self.var_nonbasic[c];
                    if variable.index < n {
                        match variable.tuple {
                            Tuple::W => w[variable.index] = T::zero(),
                            Tuple::Z => z[variable.index] = T::zero(),
                        }
                    }
                }
                return LcpStatus::HasNontrivialSolution;
            }

            // Choose the equation minimizing the lexicographic ratio
            // -p[r](t) / M(r, driving) over rows with M(r, driving) < 0.
            driving = next_driving;
            let mut chosen: Option<usize> = None;
            for r in 0..n {
                if self.aug(r, driving) < T::zero() {
                    let factor = -T::one() / self.aug(r, driving);
                    for i in 0..=n {
                        self.ratio[i] = self.poly(r, i) * factor;
                    }
                    if chosen.is_none() || lexicographic_less(&self.ratio, &self.min_ratio) {
                        self.min_ratio.copy_from_slice(&self.ratio);
                        chosen = Some(r);
                    }
                }
            }
            let Some(next_basic) = chosen else {
                // z[driving] cannot leave the dictionary.
                for r in 0..n {
                    w[r] = T::zero();
                    z[r] = T::zero();
                }
                return LcpStatus::NoSolution;
            };
            basic = next_basic;

            // Pivot: z[driving] enters the dictionary, w[basic] exits.
            let inv_denom = T::one() / self.aug(basic, driving);
            for r in 0..n {
                if r != basic && self.aug(r, driving) != T::zero() {
                    let multiplier = self.aug(r, driving) * inv_denom;
                    for c in 0..self.num_cols {
                        if c == driving {
                            self.set_aug(r, driving, multiplier);
                        } else {
                            let value = self.aug(r, c) - self.aug(basic, c) * multiplier;
                            self.set_aug(r, c, value);
                        }
                    }
                }
            }
            for c in 0..self.num_cols {
                if c == driving {
                    self.set_aug(basic, driving, inv_denom);
                } else {
                    let value = -self.aug(basic, c) * inv_denom;
                    self.set_aug(basic, c, value);
                }
            }
        }

        // Rounding errors can keep the pivoting from settling; report the
        // budget exhaustion and let the caller decide whether to retry with
        // a larger budget.
        LcpStatus::FailedToConverge
    }

    #[inline]
    fn aug(&self, row: usize, col: usize) -> T {
        self.augmented[col + self.num_cols * row]
    }

    #[inline]
    fn set_aug(&mut self, row: usize, col: usize, value: T) {
        self.augmented[col + self.num_cols * row] = value;
    }

    #[inline]
    fn poly(&self, row: usize, i: usize) -> T {
        self.aug(row, self.dimension + 1 + i)
    }

    #[inline]
    fn set_poly(&mut self, row: usize, i: usize, value: T) {
        self.set_aug(row, self.dimension + 1 + i, value);
    }

    fn poly_less_than_buffer(&self, row: usize) -> bool {
        for i in 0..=self.dimension {
            let a = self.poly(row, i);
            let b = self.min_ratio[i];
            if a < b {
                return true;
            }
            if a > b {
                return false;
            }
        }
        false
    }
}

fn lexicographic_less<T: RealField + Copy>(poly0: &[T], poly1: &[T]) -> bool {
    for (&a, &b) in poly0.iter().zip(poly1.iter()) {
        if a < b {
            return true;
        }
        if a > b {
            return false;
        }
    }
    false
}

fn less_than_zero<T: RealField + Copy>(poly: &[T]) -> bool {
    for &a in poly {
        if a < T::zero() {
            return true;
        }
        if a > T::zero() {
            return false;
        }
    }
    false
}
