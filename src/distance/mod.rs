//! Closest-point distance queries, one module per primitive pair.
//!
//! Every query implements [`crate::query::Distance`] and returns an
//! aggregate carrying the distance, its square, the closest points and any
//! pair-specific annotations (parameters, barycentric coordinates, flags).

pub mod circle_circle;
pub mod line_circle;
pub mod line_triangle;
pub mod linear_arc;
pub mod point_circle;
pub mod point_ellipsoid;
pub mod point_line;
pub mod point_polyhedron;
pub mod point_triangle;
pub mod ray_circle;
pub mod segment_circle;
pub mod segment_segment;
pub mod segment_triangle;
pub mod tetrahedron_tetrahedron;
pub mod triangle_triangle;

pub use circle_circle::CircleCircleDistance2;
pub use line_circle::LinearCircleDistance;
pub use line_triangle::LineTriangleDistance3;
pub use point_circle::{PointArcDistance2, PointCircleDistance2, PointCircleDistance3};
pub use point_ellipsoid::{PointEllipseDistance2, PointEllipsoidDistance3};
pub use point_line::{PointLinearDistance2, PointLinearDistance3};
pub use point_polyhedron::{PointPolyhedronDistance3, PointPolyhedronQuery};
pub use point_triangle::{PointTriangleDistance2, PointTriangleDistance3};
pub use segment_segment::{SegmentSegmentDistance2, SegmentSegmentDistance3};
pub use segment_triangle::SegmentTriangleDistance3;
pub use tetrahedron_tetrahedron::TetrahedronTetrahedronDistance3;
pub use triangle_triangle::TriangleTriangleDistance3;
