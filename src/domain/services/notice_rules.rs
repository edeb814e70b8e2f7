//! Notice validation rules.
//!
//! Field limits are declared on [`NoticeDraft`]; the expiry check needs a
//! clock and is applied here. All rules run independently.

use chrono::{DateTime, Utc};

use crate::domain::entities::{NoticeDraft, PostPatch};
use crate::domain::value_objects::ValidationResult;
use crate::shared::validation::validate_all;

pub const EXPIRY_IN_PAST: &str = "Expiry date must be in the future";

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Validate a notice draft against the current time.
pub fn validate_notice(draft: &NoticeDraft) -> ValidationResult {
    validate_notice_at(draft, Utc::now())
}

/// Validate a notice draft as of `now`.
pub fn validate_notice_at(draft: &NoticeDraft, now: DateTime<Utc>) -> ValidationResult {
    let mut result = validate_all(draft);

    if let Some(expiry) = draft.expiry_date {
        if expiry <= now {
            result.push(EXPIRY_IN_PAST);
        }
    }

    result
}

/// Validate the fields a notice patch sets. Unset fields are not checked,
/// but title and content cannot be cleared.
pub fn validate_notice_patch(patch: &PostPatch) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if let Some(title) = &patch.title {
        if title.trim().is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
            result.push("Title is required and must be at most 200 characters");
        }
    }
    if let Some(content) = &patch.content {
        if content.trim().is_empty() || content.chars().count() > MAX_CONTENT_LENGTH {
            result.push("Content is required and must be at most 10000 characters");
        }
    }

    result
}
