//! Canonical detail record produced by the response normalizer.

use serde::Serialize;

use crate::domain::entities::{Comment, FileMeta, Resource};

/// An entity together with the auxiliary data a detail endpoint may send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDetail<T> {
    pub entity: T,
    pub comment_count: u32,
    pub file_count: u32,
    pub comments: Vec<Comment>,
    pub files: Vec<FileMeta>,
}

impl<T> NormalizedDetail<T> {
    /// Detail with no auxiliary data.
    pub fn bare(entity: T) -> Self {
        Self {
            entity,
            comment_count: 0,
            file_count: 0,
            comments: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Replace the entity, keeping comments, files and counts.
    pub fn with_entity(self, entity: T) -> Self {
        Self { entity, ..self }
    }
}

impl<T: Resource> NormalizedDetail<T> {
    pub fn id(&self) -> i64 {
        self.entity.id()
    }
}
