use thiserror::Error;

/// Top-level error type for the proxim query library.
#[derive(Debug, Error)]
pub enum ProximError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Fitting(#[from] FittingError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Errors related to geometric constructions.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid knot vector: {0}")]
    InvalidKnots(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to least-squares and minimization fits.
#[derive(Debug, Error)]
pub enum FittingError {
    #[error("fit requires at least {needed} points, got {got}")]
    InsufficientPoints { needed: usize, got: usize },

    #[error("normal equations are singular")]
    SingularSystem,

    #[error("fit failed: {0}")]
    Failed(String),
}

/// Errors related to the numerical solvers.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid solver input: {0}")]
    InvalidInput(String),

    #[error("matrix is not positive definite")]
    NotPositiveDefinite,

    #[error("solver failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`ProximError`].
pub type Result<T> = std::result::Result<T, ProximError>;
