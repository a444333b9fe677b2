pub mod builder;
pub mod design;
pub mod error;
pub mod kernel;
pub mod math;
pub mod metrics;
pub mod operations;
pub mod study;
pub mod topology;

pub use error::{HeatsinkError, Result};
