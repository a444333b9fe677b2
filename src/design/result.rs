use serde::{Deserialize, Serialize};

use crate::metrics::DesignMetrics;

use super::params::DesignParameters;

/// A built design together with its measured metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub parameters: DesignParameters,
    pub metrics: DesignMetrics,
}

impl DesignResult {
    #[must_use]
    pub fn new(parameters: DesignParameters, metrics: DesignMetrics) -> Self {
        Self {
            parameters,
            metrics,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.parameters.name
    }
}
