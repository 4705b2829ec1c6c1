//! Geometric primitive value types.
//!
//! Primitives are plain aggregates with public fields. Constructors do not
//! validate invariants such as unit-length directions or orthonormal axes;
//! each type documents what the queries assume.

mod boxes;
mod circle;
mod ellipse;
mod line;
mod plane;
pub(crate) mod polyhedron;
mod tetrahedron;
mod torus;
mod triangle;

pub use boxes::{AlignedBox2, AlignedBox3, OrientedBox3, Rectangle3};
pub use circle::{Arc2, Circle2, Circle3, Sphere3};
pub use ellipse::{Ellipse2, Ellipsoid3};
pub use line::{Line2, Line3, Ray2, Ray3, Segment2, Segment3};
pub use plane::Plane3;
pub use polyhedron::ConvexPolyhedron3;
pub use tetrahedron::Tetrahedron3;
pub use torus::Torus3;
pub use triangle::{Triangle2, Triangle3};
