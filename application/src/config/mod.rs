//! Application-level configuration.
//!
//! - [`ExecutionParams`]: retrieval depth, batching, and how consensus calls are issued

pub mod execution_params;

pub use execution_params::ExecutionParams;
