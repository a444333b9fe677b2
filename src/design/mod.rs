//! Heatsink design parameters, random sampling and per-design results.

pub mod params;
pub mod result;
pub mod sampler;

pub use params::{DesignParameters, FinPattern, MIN_FIN_CLEARANCE};
pub use result::DesignResult;
pub use sampler::ParameterSampler;
