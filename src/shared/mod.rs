//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod datetime;
pub mod error;
pub mod nullable;
pub mod validation;
