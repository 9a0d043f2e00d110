pub mod error_handling;
pub mod metrics;
pub mod tracing;
