//! Least-squares fit of a rectangular sample grid by a B-spline surface.
//!
//! The normal equations factor per parametric direction: with sample
//! matrix P and basis matrices A0, A1, the control grid Q solves
//! `A0^T A0 Q A1^T A1 = A0^T P A1`. Each `A^T A` is symmetric banded
//! with bandwidth `degree + 1` and is solved by a banded Cholesky
//! factorization; Q is then the triple product `X0 P X1^T` with
//! `X = (A^T A)^{-1} A^T`.

use crate::curve::BasisFunction;
use crate::error::{FittingError, Result};
use crate::solvers::BandedMatrix;
use crate::surface::BSplineSurface;
use nalgebra::{RealField, SVector};

struct Direction<T: RealField + Copy> {
    basis: BasisFunction<T>,
    num_controls: usize,
    num_samples: usize,
}

impl<T: RealField + Copy> Direction<T> {
    fn new(degree: usize, num_controls: usize, num_samples: usize) -> Result<Self> {
        if degree < 1 || num_controls <= degree + 1 || num_samples < num_controls {
            return Err(FittingError::Failed(format!(
                "need 1 <= degree, degree + 1 < controls <= samples \
                 (degree {degree}, controls {num_controls}, samples {num_samples})"
            ))
            .into());
        }
        Ok(Self {
            basis: BasisFunction::open_uniform(num_controls, degree)?,
            num_controls,
            num_samples,
        })
    }

    // X = (A^T A)^{-1} A^T stored sample-major: column j holds the
    // control-space solve for sample j.
    fn inverse_design(&self) -> Result<Vec<Vec<T>>> {
        let t_multiplier =
            T::one() / crate::math::cast::<T>((self.num_samples - 1) as f64);
        let degree = self.basis.degree();

        // Per-sample basis columns, reused for A^T A and A^T.
        let columns: Vec<Vec<T>> = (0..self.num_samples)
            .map(|j| {
                let t = t_multiplier * crate::math::cast::<T>(j as f64);
                let eval = self.basis.evaluate(t, 0);
                (0..self.num_controls).map(|i| eval.value(0, i)).collect()
            })
            .collect();

        let mut ata = BandedMatrix::new(self.num_controls, degree + 1)?;
        for column in &columns {
            for i0 in 0..self.num_controls {
                let b0 = column[i0];
                if b0 == T::zero() {
                    continue;
                }
                for i1 in i0..(i0 + degree + 1).min(self.num_controls) {
                    let value = b0 * column[i1];
                    ata.add(i0, i1, value);
                    if i1 != i0 {
                        ata.add(i1, i0, value);
                    }
                }
            }
        }
        ata.cholesky_factor()?;

        let mut solved = columns;
        for column in &mut solved {
            ata.solve(column);
        }
        Ok(solved)
    }
}

/// Fits `samples` (row-major, `num_samples_u` fastest) by an open
/// uniform B-spline surface on `[0, 1] x [0, 1]`.
///
/// # Errors
///
/// Fails when a degree/controls/samples precondition is violated, the
/// grid size does not match, or a banded normal-equation solve is not
/// positive definite.
#[allow(clippy::too_many_arguments)]
pub fn fit_bspline_surface<T: RealField + Copy, const D: usize>(
    degree_u: usize,
    num_controls_u: usize,
    num_samples_u: usize,
    degree_v: usize,
    num_controls_v: usize,
    num_samples_v: usize,
    samples: &[SVector<T, D>],
) -> Result<BSplineSurface<T, D>> {
    let dir_u = Direction::new(degree_u, num_controls_u, num_samples_u)?;
    let dir_v = Direction::new(degree_v, num_controls_v, num_samples_v)?;
    if samples.len() != num_samples_u * num_samples_v {
        return Err(FittingError::Failed(format!(
            "expected {} samples, got {}",
            num_samples_u * num_samples_v,
            samples.len()
        ))
        .into());
    }

    let x_u = dir_u.inverse_design()?;
    let x_v = dir_v.inverse_design()?;

    // Q = X0 * P * X1^T.
    let mut controls = vec![SVector::zeros(); num_controls_u * num_controls_v];
    for i1 in 0..num_controls_v {
        for i0 in 0..num_controls_u {
            let mut sum = SVector::zeros();
            for (j1, col_v) in x_v.iter().enumerate() {
                let x1 = col_v[i1];
                if x1 == T::zero() {
                    continue;
                }
                for (j0, col_u) in x_u.iter().enumerate() {
                    let x0 = col_u[i0];
                    sum += samples[j0 + num_samples_u * j1] * (x0 * x1);
                }
            }
            controls[i0 + num_controls_u * i1] = sum;
        }
    }

    BSplineSurface::new(dir_u.basis, dir_v.basis, controls)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn plane_samples(nu: usize, nv: usize) -> Vec<Vector3<f64>> {
        let mut samples = Vec::with_capacity(nu * nv);
        for j1 in 0..nv {
            for j0 in 0..nu {
                let x = f64::from(j0 as u32) / f64::from((nu - 1) as u32);
                let y = f64::from(j1 as u32) / f64::from((nv - 1) as u32);
                samples.push(Vector3::new(x, y, x + 2.0 * y));
            }
        }
        samples
    }

    #[test]
    fn preconditions_are_enforced() {
        let samples = plane_samples(8, 8);
        // controls must exceed degree + 1.
        assert!(fit_bspline_surface(2, 3, 8, 2, 5, 8, &samples).is_err());
        // samples must be at least controls.
        assert!(fit_bspline_surface(2, 9, 8, 2, 5, 8, &samples).is_err());
        // Grid size mismatch.
        assert!(fit_bspline_surface(2, 5, 10, 2, 5, 8, &samples).is_err());
    }

    #[test]
    fn planar_grid_is_reproduced() {
        let samples = plane_samples(10, 12);
        let surface = fit_bspline_surface(3, 6, 10, 3, 6, 12, &samples).unwrap();
        for &(u, v) in &[(0.0, 0.0), (0.3, 0.8), (0.5, 0.5), (1.0, 1.0)] {
            let p = surface.position(u, v);
            assert!((p.z - (p.x + 2.0 * p.y)).abs() < 1e-8, "u={u} v={v}");
        }
    }

    #[test]
    fn fit_interpolates_a_curved_grid_closely() {
        let nu = 12;
        let nv = 12;
        let mut samples = Vec::with_capacity(nu * nv);
        for j1 in 0..nv {
            for j0 in 0..nu {
                let x = f64::from(j0 as u32) / f64::from((nu - 1) as u32);
                let y = f64::from(j1 as u32) / f64::from((nv - 1) as u32);
                samples.push(Vector3::new(x, y, (x * x - y) * y));
            }
        }
        let surface = fit_bspline_surface(3, 7, nu, 3, 7, nv, &samples).unwrap();
        for (j, sample) in samples.iter().enumerate() {
            let u = f64::from((j % nu) as u32) / f64::from((nu - 1) as u32);
            let v = f64::from((j / nu) as u32) / f64::from((nv - 1) as u32);
            let p = surface.position(u, v);
            assert!((p - sample).norm() < 0.05, "j={j}");
        }
    }
}
