use super::{AlignedBox3, Plane3};
use crate::error::{GeometryError, Result};
use nalgebra::{Point3, RealField};

/// Convex polyhedron represented by its boundary triangle mesh.
///
/// The triangles are assumed to be wound counterclockwise as seen from
/// outside, so the derived face planes have outward (not necessarily unit
/// length) normals. The aligned bounding box and the face planes are
/// computed at construction; queries rely on both.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolyhedron3<T: RealField + Copy> {
    pub vertices: Vec<Point3<T>>,
    pub triangles: Vec<[usize; 3]>,
    planes: Vec<Plane3<T>>,
    aligned_box: AlignedBox3<T>,
}

impl<T: RealField + Copy> ConvexPolyhedron3<T> {
    /// Builds the polyhedron and derives its face planes and bounding box.
    ///
    /// # Errors
    ///
    /// Returns an error when the mesh is empty or a triangle indexes a
    /// nonexistent vertex.
    pub fn new(vertices: Vec<Point3<T>>, triangles: Vec<[usize; 3]>) -> Result<Self> {
        if vertices.is_empty() || triangles.is_empty() {
            return Err(GeometryError::Degenerate(
                "convex polyhedron requires vertices and triangles".to_string(),
            )
            .into());
        }
        for tri in &triangles {
            if tri.iter().any(|&i| i >= vertices.len()) {
                return Err(GeometryError::Degenerate(format!(
                    "triangle index out of bounds (num vertices = {})",
                    vertices.len()
                ))
                .into());
            }
        }

        let planes = triangles
            .iter()
            .map(|&[i0, i1, i2]| {
                let normal = (vertices[i1] - vertices[i0]).cross(&(vertices[i2] - vertices[i0]));
                Plane3::from_point_normal(vertices[i0], normal)
            })
            .collect();

        let mut min = vertices[0];
        let mut max = vertices[0];
        for v in &vertices[1..] {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
        }

        Ok(Self {
            vertices,
            triangles,
            planes,
            aligned_box: AlignedBox3::new(min, max),
        })
    }

    /// One outward-facing plane per boundary triangle.
    #[must_use]
    pub fn planes(&self) -> &[Plane3<T>] {
        &self.planes
    }

    /// Axis-aligned bounding box of the vertices.
    #[must_use]
    pub fn aligned_box(&self) -> &AlignedBox3<T> {
        &self.aligned_box
    }

    /// Number of boundary triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }
}
