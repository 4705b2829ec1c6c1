use super::Triangle3;
use nalgebra::{Point3, RealField, Vector3};

/// Solid tetrahedron with vertices `v[0]..v[3]`.
///
/// The vertices are assumed ordered so that `{v1-v0, v2-v0, v3-v0}` is a
/// right-handed basis, which makes the face windings in [`FACE_INDICES`]
/// counterclockwise when viewed from outside.
///
/// [`FACE_INDICES`]: Tetrahedron3::FACE_INDICES
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetrahedron3<T: RealField + Copy> {
    pub v: [Point3<T>; 4],
}

impl<T: RealField + Copy> Tetrahedron3<T> {
    /// Vertex indices of the four faces, wound counterclockwise as seen
    /// from outside the tetrahedron.
    pub const FACE_INDICES: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

    pub fn new(v0: Point3<T>, v1: Point3<T>, v2: Point3<T>, v3: Point3<T>) -> Self {
        Self { v: [v0, v1, v2, v3] }
    }

    /// Face `index` (0..4) as a triangle.
    #[must_use]
    pub fn face(&self, index: usize) -> Triangle3<T> {
        let [i0, i1, i2] = Self::FACE_INDICES[index];
        Triangle3::new(self.v[i0], self.v[i1], self.v[i2])
    }

    /// Average of the four vertices.
    #[must_use]
    pub fn centroid(&self) -> Point3<T> {
        let quarter: T = nalgebra::convert(0.25);
        let sum = (self.v[0].coords + self.v[1].coords + self.v[2].coords + self.v[3].coords)
            * quarter;
        Point3::from(sum)
    }

    /// Tests whether `point` is inside or on the tetrahedron, using the
    /// outward face normals implied by the vertex ordering.
    #[must_use]
    pub fn contains(&self, point: &Point3<T>) -> bool {
        for face in 0..4 {
            let [i0, i1, i2] = Self::FACE_INDICES[face];
            let normal = outward_normal(&self.v[i0], &self.v[i1], &self.v[i2]);
            if normal.dot(&(point - self.v[i0])) > T::zero() {
                return false;
            }
        }
        true
    }
}

fn outward_normal<T: RealField + Copy>(
    a: &Point3<T>,
    b: &Point3<T>,
    c: &Point3<T>,
) -> Vector3<T> {
    (b - a).cross(&(c - a))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn canonical() -> Tetrahedron3<f64> {
        Tetrahedron3::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn centroid_of_canonical() {
        let c = canonical().centroid();
        assert!((c - Point3::new(0.25, 0.25, 0.25)).norm() < TOLERANCE);
    }

    #[test]
    fn containment() {
        let tetra = canonical();
        assert!(tetra.contains(&Point3::new(0.1, 0.1, 0.1)));
        assert!(tetra.contains(&tetra.v[3]));
        assert!(!tetra.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(!tetra.contains(&Point3::new(-0.01, 0.1, 0.1)));
    }
}
