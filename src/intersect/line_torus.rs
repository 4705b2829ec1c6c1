//! Intersection of a line with a torus.
//!
//! Substituting the line into the implicit torus equation
//! `(|X-C|^2 + r0^2 - r1^2)^2 - 4 r0^2 (|X-C|^2 - dot(N, X-C)^2) = 0`
//! yields a quartic in the line parameter, so a line meets a torus in at
//! most four points. The `dot(N, X-C)^2` term is divided by `|N|^2` so a
//! non-unit axis normal still classifies correctly.

use crate::primitives::{Line3, Torus3};
use crate::query::FindIntersection;
use crate::solvers::solve_quartic;
use nalgebra::{Point3, RealField};

/// Result of a line-torus find-intersection query. The distinct line
/// parameters are sorted increasing; `torus_parameter[i]` holds the
/// `(u, v)` surface coordinates of `point[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTorusIntersection3<T: RealField + Copy> {
    pub intersect: bool,
    pub num_intersections: usize,
    pub line_parameter: [T; 4],
    pub torus_parameter: [[T; 2]; 4],
    pub point: [Point3<T>; 4],
}

impl<T: RealField + Copy> Default for LineTorusIntersection3<T> {
    fn default() -> Self {
        Self {
            intersect: false,
            num_intersections: 0,
            line_parameter: [T::zero(); 4],
            torus_parameter: [[T::zero(); 2]; 4],
            point: [Point3::origin(); 4],
        }
    }
}

impl<T: RealField + Copy> FindIntersection<Torus3<T>> for Line3<T> {
    type Output = LineTorusIntersection3<T>;

    fn find_intersection(&self, torus: &Torus3<T>) -> Self::Output {
        let two = crate::math::cast::<T>(2.0);
        let four = crate::math::cast::<T>(4.0);
        let r0_sqr = torus.radius0 * torus.radius0;
        let r1_sqr = torus.radius1 * torus.radius1;

        let pmc = self.origin - torus.center;
        let sqr_len_pmc = pmc.dot(&pmc);
        let dot_d_pmc = self.direction.dot(&pmc);
        let sqr_len_d = self.direction.dot(&self.direction);
        let sqr_len_n = torus.normal.dot(&torus.normal);
        let dot_n_d = torus.normal.dot(&self.direction);
        let dot_n_pmc = torus.normal.dot(&pmc);

        // quad0(t) = |X - C|^2 as a polynomial in t.
        let quad0 = [sqr_len_pmc, two * dot_d_pmc, sqr_len_d];
        // quad1 = quad0 + r0^2 - r1^2.
        let quad1 = [quad0[0] + r0_sqr - r1_sqr, quad0[1], quad0[2]];
        // quad2 = dot(N, X - C)^2 / |N|^2.
        let quad2 = [
            dot_n_pmc * dot_n_pmc / sqr_len_n,
            two * dot_n_pmc * dot_n_d / sqr_len_n,
            dot_n_d * dot_n_d / sqr_len_n,
        ];
        let quad3 = [quad0[0] - quad2[0], quad0[1] - quad2[1], quad0[2] - quad2[2]];

        // quartic = quad1^2 - 4 r0^2 quad3, coefficients by ascending
        // degree.
        let scale = four * r0_sqr;
        let p0 = quad1[0] * quad1[0] - scale * quad3[0];
        let p1 = two * quad1[0] * quad1[1] - scale * quad3[1];
        let p2 = quad1[1] * quad1[1] + two * quad1[0] * quad1[2] - scale * quad3[2];
        let p3 = two * quad1[1] * quad1[2];
        let p4 = quad1[2] * quad1[2];

        let roots = solve_quartic(p0, p1, p2, p3, p4);

        let mut result = LineTorusIntersection3::default();
        result.num_intersections = roots.len().min(4);
        result.intersect = result.num_intersections > 0;
        for (i, root) in roots.iter().take(4).enumerate() {
            result.line_parameter[i] = root.x;
            result.point[i] = self.point_at(root.x);
            let (u, v) = torus.parameters_of(&result.point[i]);
            result.torus_parameter[i] = [u, v];
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn standard_torus() -> Torus3<f64> {
        // Outer radius 3, tube radius 1, axis along z.
        Torus3::axis_aligned(3.0, 1.0)
    }

    #[test]
    fn diametral_line_hits_four_times() {
        let line = Line3::new(Point3::new(-10.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let result = line.find_intersection(&standard_torus());
        assert!(result.intersect);
        assert_eq!(result.num_intersections, 4);
        let expected = [-4.0, -2.0, 2.0, 4.0];
        for (i, &x) in expected.iter().enumerate() {
            assert!((result.point[i].x - x).abs() < 1e-8);
        }
    }

    #[test]
    fn line_through_hole_misses() {
        let line = Line3::new(Point3::new(0.0, 0.0, -10.0), Vector3::new(0.0, 0.0, 1.0));
        let result = line.find_intersection(&standard_torus());
        assert!(!result.intersect);
        assert_eq!(result.num_intersections, 0);
    }

    #[test]
    fn grazing_line_touches_outer_equator() {
        // Tangent to the outer equator circle of radius 4.
        let line = Line3::new(Point3::new(-10.0, 4.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let result = line.find_intersection(&standard_torus());
        assert!(result.intersect);
        assert_eq!(result.num_intersections, 1);
        assert!((result.point[0] - Point3::new(0.0, 4.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn intersection_points_satisfy_implicit_equation() {
        let torus = standard_torus();
        let line = Line3::new(Point3::new(-8.0, 1.5, 0.3), Vector3::new(2.0, -0.1, 0.05));
        let result = line.find_intersection(&torus);
        assert!(result.intersect);
        for i in 0..result.num_intersections {
            let x = result.point[i] - torus.center;
            let level = (x.norm_squared() + 9.0 - 1.0).powi(2)
                - 36.0 * (x.norm_squared() - x.z * x.z);
            assert!(level.abs() < 1e-5);
        }
    }

    #[test]
    fn torus_parameters_reconstruct_points() {
        let torus = standard_torus();
        let line = Line3::new(Point3::new(-10.0, 0.5, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let result = line.find_intersection(&torus);
        assert!(result.intersect);
        for i in 0..result.num_intersections {
            let [u, v] = result.torus_parameter[i];
            let rebuilt = torus.evaluate(u, v);
            assert!((rebuilt - result.point[i]).norm() < 1e-6);
        }
    }
}
