//! Domain Services
//!
//! Pure logic shared by the stores.
//!
//! - **normalizer**: Reconciles detail response envelopes
//! - **upload_rules**: File upload validation and naming helpers
//! - **notice_rules**: Notice field validation

pub mod normalizer;
pub mod notice_rules;
pub mod upload_rules;

pub use normalizer::{normalize, unwrap_entity, RawResponse};
pub use notice_rules::{validate_notice, validate_notice_at, validate_notice_patch};
pub use upload_rules::{
    format_file_size, validate_file, validate_files, BatchValidation, FileKind, FileRules,
    InvalidFile,
};
