//! Numerical building blocks used by the geometric queries.

pub mod lcp;
pub mod linear;
pub mod minimize;
pub mod roots;

pub use lcp::{LcpSolver, LcpStatus};
pub use linear::{solve2, solve3, BandedMatrix};
pub use minimize::{Minimize1, MinimizeN};
pub use roots::{solve_cubic, solve_linear, solve_quadratic, solve_quartic, PolynomialRoot};
