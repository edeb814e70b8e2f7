//! Value Objects
//!
//! Immutable result types produced by domain services.

mod detail;
mod validation_result;

pub use detail::NormalizedDetail;
pub use validation_result::ValidationResult;
