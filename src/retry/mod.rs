//! Retry Module
//!
//! Exponential backoff for transient upstream failures.

mod backoff;
mod policy;

pub use backoff::execute;
pub use policy::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY};
