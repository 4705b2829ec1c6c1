pub mod curve;
pub mod distance;
pub mod error;
pub mod fit;
pub mod interp;
pub mod intersect;
pub mod math;
pub mod primitives;
pub mod query;
pub mod solvers;
pub mod surface;

pub use error::{ProximError, Result};
pub use query::{Distance, FindIntersection, TestIntersection};
