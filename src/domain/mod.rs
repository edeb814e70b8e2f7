//! # Domain Layer
//!
//! Entities served by the board API and the pure logic that interprets them.
//! Nothing here performs I/O.
//!
//! ## Structure
//!
//! - **entities**: Posts, comments, files, users, pagination
//! - **value_objects**: Normalized details and validation results
//! - **services**: Response normalization and client-side validation

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
