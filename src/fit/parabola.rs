//! Least-squares fit of 2D points by a parabola `y = u0 x^2 + u1 x + u2`.
//!
//! The 3x3 normal equations are scaled by the sample count before
//! solving, which keeps the matrix entries near unit magnitude for large
//! samples. The robust variant first translates the points by their
//! average, fitting `y - b = v0 (x - a)^2 + v1 (x - a) + v2` about the
//! average `(a, b)`.

use crate::error::{FittingError, Result};
use crate::solvers::solve3;
use nalgebra::{Matrix3, Point2, RealField, Vector2, Vector3};

/// Coefficients and mean-square error of a parabola fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParabolaFit<T: RealField + Copy> {
    /// Coefficients ordered quadratic, linear, constant.
    pub u: [T; 3],
    pub mean_square_error: T,
}

/// Result of the average-centered fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustParabolaFit<T: RealField + Copy> {
    pub average: Vector2<T>,
    /// Coefficients of the translated parabola, ordered quadratic,
    /// linear, constant.
    pub v: [T; 3],
    pub mean_square_error: T,
}

fn solve_normal_equations<T: RealField + Copy>(
    points: &[Point2<T>],
    offset: Vector2<T>,
) -> Result<[T; 3]> {
    let mut a = Matrix3::zeros();
    let mut b = Vector3::zeros();
    for p in points {
        let x = p.x - offset.x;
        let y = p.y - offset.y;
        let x2 = x * x;
        a[(0, 0)] += x2 * x2;
        a[(0, 1)] += x2 * x;
        a[(0, 2)] += x2;
        a[(1, 2)] += x;
        b[0] += x2 * y;
        b[1] += x * y;
        b[2] += y;
    }
    a[(1, 0)] = a[(0, 1)];
    a[(1, 1)] = a[(0, 2)];
    a[(2, 0)] = a[(0, 2)];
    a[(2, 1)] = a[(1, 2)];

    // The (2, 2) entry is the sample count, already normalized below.
    let num = crate::math::cast::<T>(points.len() as f64);
    a /= num;
    a[(2, 2)] = T::one();
    b /= num;

    let solution = solve3(&a, &b).ok_or(FittingError::SingularSystem)?;
    Ok([solution[0], solution[1], solution[2]])
}

fn mean_square_error<T: RealField + Copy>(
    points: &[Point2<T>],
    offset: Vector2<T>,
    u: &[T; 3],
) -> T {
    let mut total = T::zero();
    for p in points {
        let x = p.x - offset.x;
        let y = p.y - offset.y;
        let error = u[0] * x * x + u[1] * x + u[2] - y;
        total += error * error;
    }
    total / crate::math::cast::<T>(points.len() as f64)
}

/// Fits `y = u0 x^2 + u1 x + u2` in the original coordinates.
pub fn fit_parabola<T: RealField + Copy>(points: &[Point2<T>]) -> Result<ParabolaFit<T>> {
    if points.len() < 3 {
        return Err(FittingError::InsufficientPoints {
            needed: 3,
            got: points.len(),
        }
        .into());
    }
    let u = solve_normal_equations(points, Vector2::zeros())?;
    Ok(ParabolaFit {
        u,
        mean_square_error: mean_square_error(points, Vector2::zeros(), &u),
    })
}

/// Fits about the average of the points, which conditions the normal
/// equations much better when the samples are far from the origin.
pub fn fit_parabola_robust<T: RealField + Copy>(
    points: &[Point2<T>],
) -> Result<RobustParabolaFit<T>> {
    if points.len() < 3 {
        return Err(FittingError::InsufficientPoints {
            needed: 3,
            got: points.len(),
        }
        .into());
    }
    let num = crate::math::cast::<T>(points.len() as f64);
    let mut average = Vector2::zeros();
    for p in points {
        average += p.coords;
    }
    average /= num;

    let v = solve_normal_equations(points, average)?;
    Ok(RobustParabolaFit {
        average,
        v,
        mean_square_error: mean_square_error(points, average, &v),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn sample(u: [f64; 3], xs: &[f64]) -> Vec<Point2<f64>> {
        xs.iter()
            .map(|&x| Point2::new(x, u[0] * x * x + u[1] * x + u[2]))
            .collect()
    }

    #[test]
    fn exact_parabola_is_recovered() {
        let truth = [2.0, -1.0, 0.5];
        let points = sample(truth, &[-2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
        let fit = fit_parabola(&points).unwrap();
        for i in 0..3 {
            assert!((fit.u[i] - truth[i]).abs() < 1e-9, "u[{i}] = {}", fit.u[i]);
        }
        assert!(fit.mean_square_error < TOLERANCE);
    }

    #[test]
    fn too_few_points_fail() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        assert!(fit_parabola(&points).is_err());
        assert!(fit_parabola_robust(&points).is_err());
    }

    #[test]
    fn robust_fit_handles_distant_samples() {
        // The same parabola translated far from the origin.
        let truth = [0.5, 0.0, 0.0];
        let points: Vec<Point2<f64>> = sample(truth, &[-3.0, -1.0, 0.0, 1.0, 2.0, 4.0])
            .into_iter()
            .map(|p| Point2::new(p.x + 1.0e4, p.y + 5.0e3))
            .collect();
        let fit = fit_parabola_robust(&points).unwrap();
        assert!((fit.v[0] - truth[0]).abs() < 1e-6);
        assert!(fit.mean_square_error < 1e-6);
    }

    #[test]
    fn noisy_fit_reports_residual() {
        let mut points = sample([1.0, 0.0, 0.0], &[-2.0, -1.0, 0.0, 1.0, 2.0]);
        points[2].y += 0.5;
        let fit = fit_parabola(&points).unwrap();
        assert!(fit.mean_square_error > 0.0);
        assert!(fit.mean_square_error < 0.25);
    }
}
