//! Least-squares fit of 3D points by an ellipsoid.
//!
//! The fit minimizes the sum of point-to-ellipsoid distances over nine
//! parameters: three semi-axis lengths, the center, and three angles
//! encoding the orientation (two for the rotation axis, one for the
//! rotation angle). The search is seeded from an oriented bounding box
//! of the samples and run through the coordinate-cycling minimizer.

use crate::error::{FittingError, Result};
use crate::primitives::{Ellipsoid3, OrientedBox3};
use crate::query::Distance;
use crate::solvers::MinimizeN;
use nalgebra::{Matrix3, Point3, RealField, Rotation3, Unit, Vector3};

/// Fitted ellipsoid and the energy value at the minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidFit<T: RealField + Copy> {
    pub ellipsoid: Ellipsoid3<T>,
    pub error: T,
}

// Oriented box from the mean and covariance eigenvectors of the samples.
fn oriented_container<T: RealField + Copy>(points: &[Point3<T>]) -> OrientedBox3<T> {
    let num = crate::math::cast::<T>(points.len() as f64);
    let mut mean = Vector3::zeros();
    for p in points {
        mean += p.coords;
    }
    mean /= num;

    let mut covariance = Matrix3::zeros();
    for p in points {
        let diff = p.coords - mean;
        covariance += diff * diff.transpose();
    }
    covariance /= num;

    let eigen = covariance.symmetric_eigen();
    let mut order = [0_usize, 1, 2];
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let axis0 = eigen.eigenvectors.column(order[0]).into_owned();
    let axis1 = eigen.eigenvectors.column(order[1]).into_owned();
    // Right-handed frame regardless of eigenvector signs.
    let axis2 = axis0.cross(&axis1);
    let axis = [axis0, axis1, axis2];

    let mut extent = [T::zero(); 3];
    for p in points {
        let diff = p.coords - mean;
        for i in 0..3 {
            extent[i] = extent[i].max(diff.dot(&axis[i]).abs());
        }
    }
    OrientedBox3::new(Point3::from(mean), axis, extent)
}

// Orientation encoded as (a0, a1, a2) with rotation axis
// (cos a0 sin a1, sin a0 sin a1, cos a1) and rotation angle a2.
fn rotation_from_angles<T: RealField + Copy>(angles: &[T]) -> Rotation3<T> {
    let (sin0, cos0) = angles[0].sin_cos();
    let (sin1, cos1) = angles[1].sin_cos();
    let axis = Unit::new_unchecked(Vector3::new(cos0 * sin1, sin0 * sin1, cos1));
    Rotation3::from_axis_angle(&axis, angles[2])
}

fn angles_from_rotation<T: RealField + Copy>(rotation: &Rotation3<T>) -> [T; 3] {
    match rotation.axis_angle() {
        Some((axis, angle)) => [axis.y.atan2(axis.x), axis.z.acos(), angle],
        // The identity has no unique axis.
        None => [T::zero(); 3],
    }
}

fn energy<T: RealField + Copy>(points: &[Point3<T>], input: &[T]) -> T {
    let rotation = rotation_from_angles(&input[6..9]);
    let center = Vector3::new(input[3], input[4], input[5]);

    // Scale by the largest extent to keep the distance iteration in a
    // reasonable floating-point range.
    let max_value = input[0].max(input[1]).max(input[2]);
    let inv_max = T::one() / max_value;
    let ellipsoid = Ellipsoid3::axis_aligned([
        inv_max * input[0],
        inv_max * input[1],
        inv_max * input[2],
    ]);

    let mut total = T::zero();
    for p in points {
        let local = rotation.inverse() * (p.coords - center);
        let probe = Point3::from(local * inv_max);
        let result = probe.distance(&ellipsoid);
        total += max_value * result.distance;
    }
    total
}

/// Fits an ellipsoid to at least three points, returning the fitted
/// parameters and the residual energy.
pub fn fit_ellipsoid<T: RealField + Copy>(points: &[Point3<T>]) -> Result<EllipsoidFit<T>> {
    if points.len() < 3 {
        return Err(FittingError::InsufficientPoints {
            needed: 3,
            got: points.len(),
        }
        .into());
    }

    let container = oriented_container(points);
    let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&container.axis));
    let angles = angles_from_rotation(&rotation);

    let half = crate::math::cast::<T>(0.5);
    let two = crate::math::cast::<T>(2.0);
    let pi = T::pi();

    // World-aligned bound on how far the center can move.
    let mut reach = [T::zero(); 3];
    for i in 0..3 {
        for j in 0..3 {
            reach[i] += container.extent[j] * container.axis[j][i].abs();
        }
    }

    let lower = [
        half * container.extent[0],
        half * container.extent[1],
        half * container.extent[2],
        container.center.x - reach[0],
        container.center.y - reach[1],
        container.center.z - reach[2],
        -pi,
        T::zero(),
        T::zero(),
    ];
    let upper = [
        two * container.extent[0],
        two * container.extent[1],
        two * container.extent[2],
        container.center.x + reach[0],
        container.center.y + reach[1],
        container.center.z + reach[2],
        pi,
        pi,
        pi,
    ];
    let initial = [
        container.extent[0],
        container.extent[1],
        container.extent[2],
        container.center.x,
        container.center.y,
        container.center.z,
        angles[0],
        angles[1],
        angles[2],
    ];

    let minimizer = MinimizeN::new(8, 8, 32);
    let function = |input: &[T]| energy(points, input);
    let (best, error) = minimizer.minimum(&function, &lower, &upper, &initial);

    let rotation = rotation_from_angles(&best[6..9]);
    let ellipsoid = Ellipsoid3::new(
        Point3::new(best[3], best[4], best[5]),
        [
            rotation * Vector3::x(),
            rotation * Vector3::y(),
            rotation * Vector3::z(),
        ],
        [best[0], best[1], best[2]],
    );
    Ok(EllipsoidFit { ellipsoid, error })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ellipsoid_samples(extent: [f64; 3], center: Vector3<f64>) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for i in 0..8 {
            let theta = std::f64::consts::PI * f64::from(i) / 4.0;
            for j in 1..4 {
                let phi = std::f64::consts::PI * f64::from(j) / 4.0;
                points.push(Point3::from(
                    center
                        + Vector3::new(
                            extent[0] * phi.sin() * theta.cos(),
                            extent[1] * phi.sin() * theta.sin(),
                            extent[2] * phi.cos(),
                        ),
                ));
            }
        }
        points
    }

    #[test]
    fn too_few_points_fail() {
        let points = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(fit_ellipsoid(&points).is_err());
    }

    #[test]
    fn axis_aligned_samples_fit_closely() {
        let points = ellipsoid_samples([3.0, 2.0, 1.0], Vector3::zeros());
        let fit = fit_ellipsoid(&points).unwrap();
        // The residual energy is a sum of distances, small for a good fit.
        assert!(fit.error < 0.5, "error = {}", fit.error);
        assert!(fit.ellipsoid.center.coords.norm() < 0.5);
    }

    #[test]
    fn translated_samples_recover_the_center() {
        let center = Vector3::new(10.0, -4.0, 2.0);
        let points = ellipsoid_samples([2.0, 2.0, 1.0], center);
        let fit = fit_ellipsoid(&points).unwrap();
        assert!((fit.ellipsoid.center.coords - center).norm() < 0.5);
    }
}
