//! Small dense solves and a banded symmetric positive definite solver.

use crate::error::{Result, SolverError};
use nalgebra::{Matrix2, Matrix3, RealField, Vector2, Vector3};

/// Solves the 2x2 system `a * x = b`, returning `None` when `a` is singular.
#[must_use]
pub fn solve2<T: RealField + Copy>(a: &Matrix2<T>, b: &Vector2<T>) -> Option<Vector2<T>> {
    a.lu().solve(b)
}

/// Solves the 3x3 system `a * x = b`, returning `None` when `a` is singular.
#[must_use]
pub fn solve3<T: RealField + Copy>(a: &Matrix3<T>, b: &Vector3<T>) -> Option<Vector3<T>> {
    a.lu().solve(b)
}

/// Symmetric banded matrix with `bands` nonzero bands on each side of the
/// diagonal, stored band by band.
///
/// The intended use is assembling normal-equation matrices and solving them
/// in place with [`cholesky_factor`] followed by [`solve`].
///
/// [`cholesky_factor`]: BandedMatrix::cholesky_factor
/// [`solve`]: BandedMatrix::solve
#[derive(Debug, Clone)]
pub struct BandedMatrix<T: RealField + Copy> {
    size: usize,
    bands: usize,
    diagonal: Vec<T>,
    // lower[b][c] = A[c + b + 1][c], upper[b][r] = A[r][r + b + 1]
    lower: Vec<Vec<T>>,
    upper: Vec<Vec<T>>,
}

impl<T: RealField + Copy> BandedMatrix<T> {
    /// Zero matrix of the given size and band count.
    ///
    /// # Errors
    ///
    /// Returns an error when `size` is zero or `bands >= size`.
    pub fn new(size: usize, bands: usize) -> Result<Self> {
        if size == 0 || bands >= size {
            return Err(SolverError::InvalidInput(format!(
                "banded matrix requires 0 < bands + 1 <= size (size = {size}, bands = {bands})"
            ))
            .into());
        }
        let lower = (0..bands).map(|b| vec![T::zero(); size - b - 1]).collect();
        let upper = (0..bands).map(|b| vec![T::zero(); size - b - 1]).collect();
        Ok(Self {
            size,
            bands,
            diagonal: vec![T::zero(); size],
            lower,
            upper,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Entry `(row, col)`; zero outside the band.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        if row == col {
            return self.diagonal[row];
        }
        if row > col {
            let band = row - col - 1;
            if band < self.bands {
                return self.lower[band][col];
            }
        } else {
            let band = col - row - 1;
            if band < self.bands {
                return self.upper[band][row];
            }
        }
        T::zero()
    }

    /// Sets entry `(row, col)`. Writes outside the band are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if row == col {
            self.diagonal[row] = value;
        } else if row > col {
            let band = row - col - 1;
            if band < self.bands {
                self.lower[band][col] = value;
            }
        } else {
            let band = col - row - 1;
            if band < self.bands {
                self.upper[band][row] = value;
            }
        }
    }

    /// Adds `value` to entry `(row, col)`. Writes outside the band are
    /// ignored.
    pub fn add(&mut self, row: usize, col: usize, value: T) {
        let current = self.get(row, col);
        self.set(row, col, current + value);
    }

    /// Factors the matrix in place as `L * L^T`, reading the diagonal and
    /// lower bands and leaving `L` in them.
    ///
    /// # Errors
    ///
    /// Returns an error when the matrix is not positive definite.
    pub fn cholesky_factor(&mut self) -> Result<()> {
        let n = self.size;
        let w = self.bands;
        for j in 0..n {
            let k_min = j.saturating_sub(w);
            let mut d = self.diagonal[j];
            for k in k_min..j {
                let ljk = self.get(j, k);
                d -= ljk * ljk;
            }
            if d <= T::zero() {
                return Err(SolverError::NotPositiveDefinite.into());
            }
            d = d.sqrt();
            self.diagonal[j] = d;

            let i_max = (j + w + 1).min(n);
            for i in (j + 1)..i_max {
                let mut v = self.get(i, j);
                for k in i.saturating_sub(w).max(k_min)..j {
                    v -= self.get(i, k) * self.get(j, k);
                }
                self.set(i, j, v / d);
            }
        }
        Ok(())
    }

    /// Solves `(L * L^T) x = b` in place, where the matrix currently holds
    /// the factor produced by [`cholesky_factor`].
    ///
    /// [`cholesky_factor`]: BandedMatrix::cholesky_factor
    pub fn solve(&self, b: &mut [T]) {
        let n = self.size;
        let w = self.bands;
        // Forward substitution with L.
        for i in 0..n {
            let mut value = b[i];
            for k in i.saturating_sub(w)..i {
                value -= self.get(i, k) * b[k];
            }
            b[i] = value / self.diagonal[i];
        }
        // Backward substitution with L^T.
        for i in (0..n).rev() {
            let mut value = b[i];
            for k in (i + 1)..(i + w + 1).min(n) {
                value -= self.get(k, i) * b[k];
            }
            b[i] = value / self.diagonal[i];
        }
    }
}
