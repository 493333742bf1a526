use thiserror::Error;

/// Top-level error type for the geosect intersection library.
#[derive(Debug, Error)]
pub enum GeosectError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations and solid validation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid bounds on {axis} axis: min {min} > max {max}")]
    InvalidBounds { axis: char, min: f64, max: f64 },

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),

    /// Collinear, non-coplanar or otherwise unusable input geometry.
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// Normalizing a vector whose length is below tolerance.
    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while collecting and selecting shape input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{shape} expects {expected} comma-separated values, got {found}")]
    FieldCount {
        shape: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{shape}: cannot parse {field:?} as a number")]
    InvalidNumber { shape: &'static str, field: String },

    #[error("{shape}: {source}")]
    InvalidShape {
        shape: &'static str,
        #[source]
        source: GeometryError,
    },

    #[error("at least one shape must be selected")]
    NothingSelected,
}

/// Errors related to running an operation.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for results using [`GeosectError`].
pub type Result<T> = std::result::Result<T, GeosectError>;
