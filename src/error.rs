use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the heatsink designer.
#[derive(Debug, Error)]
pub enum HeatsinkError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Study(#[from] StudyError),
}

/// Errors raised while constructing, transforming or fusing solids.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("dimension {parameter} = {value} must be finite and positive")]
    InvalidDimension { parameter: &'static str, value: f64 },

    #[error("zero-length vector")]
    ZeroVector,

    #[error("solid not found in store")]
    SolidNotFound,

    #[error("a heatsink needs at least one fin")]
    NoFins,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by the parameter sampler.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("base size {0} must be finite and positive")]
    InvalidBaseSize(f64),

    #[error(
        "width {width:.2} mm leaves no room for a {fin_thickness:.2} mm fin with 5 mm clearance"
    )]
    NoRoomForFins { width: f64, fin_thickness: f64 },
}

/// Errors in the study configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Errors raised while running a study or writing its outputs.
#[derive(Debug, Error)]
pub enum StudyError {
    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),

    #[error("no design was built successfully; nothing to write")]
    NoResults,

    #[error("unsupported study document: format {format:?}, version {version}")]
    UnsupportedDocument { format: String, version: u32 },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("document serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`HeatsinkError`].
pub type Result<T> = std::result::Result<T, HeatsinkError>;
