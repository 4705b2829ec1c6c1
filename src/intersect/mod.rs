//! Test-intersection and find-intersection queries between primitive
//! pairs, implemented through [`TestIntersection`] and
//! [`FindIntersection`].
//!
//! [`TestIntersection`]: crate::query::TestIntersection
//! [`FindIntersection`]: crate::query::FindIntersection

pub mod line_box;
pub mod line_torus;
pub mod line_triangle;
pub mod plane_circle;
pub mod plane_plane;
pub mod triangle2;

pub use line_box::{LineBoxIntersection2, LineBoxIntersection3};
pub use line_torus::LineTorusIntersection3;
pub use line_triangle::LineTriangleIntersection3;
pub use plane_circle::PlaneCircleIntersection3;
pub use plane_plane::PlanePlaneIntersection3;
pub use triangle2::{clip_convex_polygon, TriangleTriangleIntersection2};
