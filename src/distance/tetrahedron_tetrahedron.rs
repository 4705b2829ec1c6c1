//! Distance between two solid tetrahedra.

use crate::primitives::Tetrahedron3;
use crate::query::Distance;
use crate::solvers::linear::solve3;
use nalgebra::{Matrix3, Point3, RealField};

/// Result of a tetrahedron-tetrahedron distance query. `closest[i]` lies
/// in tetrahedron `i` with coordinates `barycentric[i]` over its vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetrahedronTetrahedronDistance3<T: RealField + Copy> {
    pub distance: T,
    pub sqr_distance: T,
    pub barycentric: [[T; 4]; 2],
    pub closest: [Point3<T>; 2],
}

impl<T: RealField + Copy> Default for TetrahedronTetrahedronDistance3<T> {
    fn default() -> Self {
        Self {
            distance: T::zero(),
            sqr_distance: T::zero(),
            barycentric: [[T::zero(); 4]; 2],
            closest: [Point3::origin(); 2],
        }
    }
}

impl<T: RealField + Copy> Distance<Tetrahedron3<T>> for Tetrahedron3<T> {
    type Output = TetrahedronTetrahedronDistance3<T>;

    fn distance(&self, other: &Tetrahedron3<T>) -> Self::Output {
        let zero = T::zero();
        let mut result = TetrahedronTetrahedronDistance3::default();

        // Face-face sweep over the 16 pairs, exiting early on contact.
        let mut best_sqr: Option<T> = None;
        let mut found_zero = false;
        'outer: for face0 in 0..4 {
            let triangle0 = self.face(face0);
            for face1 in 0..4 {
                let triangle1 = other.face(face1);
                let tt_result = triangle0.distance(&triangle1);
                if tt_result.sqr_distance == zero {
                    result.distance = zero;
                    result.sqr_distance = zero;
                    result.closest = tt_result.closest;
                    found_zero = true;
                    break 'outer;
                }
                if best_sqr.is_none_or(|best| tt_result.sqr_distance < best) {
                    best_sqr = Some(tt_result.sqr_distance);
                    result.distance = tt_result.distance;
                    result.sqr_distance = tt_result.sqr_distance;
                    result.closest = tt_result.closest;
                }
            }
        }

        if !found_zero {
            // No boundary contact, so the tetrahedra are nested or
            // separated. Containment counts decide, with fuzzy majority
            // voting in case rounding puts vertices on both sides.
            let cv0 = self.v.iter().filter(|v| other.contains(v)).count();
            let cv1 = other.v.iter().filter(|v| self.contains(v)).count();
            if cv0 != 0 || cv1 != 0 {
                result.distance = zero;
                result.sqr_distance = zero;
                let point = if cv0 > cv1 {
                    self.centroid()
                } else if cv1 > cv0 {
                    other.centroid()
                } else {
                    // Nearly identical tetrahedra.
                    let c0 = self.centroid();
                    let c1 = other.centroid();
                    Point3::from((c0.coords + c1.coords) * crate::math::cast::<T>(0.5))
                };
                result.closest = [point, point];
            }
        }

        result.barycentric[0] = barycentric_coordinates(&result.closest[0], self);
        result.barycentric[1] = barycentric_coordinates(&result.closest[1], other);
        result
    }
}

// Barycentric coordinates of a point relative to a tetrahedron. Zeros are
// returned when the tetrahedron is degenerate.
fn barycentric_coordinates<T: RealField + Copy>(
    point: &Point3<T>,
    tetra: &Tetrahedron3<T>,
) -> [T; 4] {
    let e1 = tetra.v[1] - tetra.v[0];
    let e2 = tetra.v[2] - tetra.v[0];
    let e3 = tetra.v[3] - tetra.v[0];
    let a = Matrix3::from_columns(&[e1, e2, e3]);
    match solve3(&a, &(point - tetra.v[0])) {
        Some(b) => [T::one() - b.x - b.y - b.z, b.x, b.y, b.z],
        None => [T::zero(); 4],
    }
}
