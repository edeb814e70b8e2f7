//! Upload Rules
//!
//! Client-side checks run before a file is sent to the server, plus the file
//! naming and classification helpers the upload screens rely on. Every check
//! is pure; violations are accumulated rather than stopping at the first one.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::config::UploadSettings;
use crate::domain::entities::{FileMeta, UploadCandidate};
use crate::domain::value_objects::ValidationResult;

const MB: u64 = 1024 * 1024;

/// Longest file name `sanitize_file_name` produces, in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 100;

/// Size, MIME type and extension limits for one kind of upload.
///
/// Empty allow-lists accept everything. MIME entries ending in `/*` match any
/// subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub max_size: u64,
    pub allowed_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl FileRules {
    /// Images up to 5 MB.
    pub fn image() -> Self {
        Self {
            max_size: 5 * MB,
            allowed_types: owned(&["image/jpeg", "image/png", "image/gif", "image/webp"]),
            allowed_extensions: owned(&["jpg", "jpeg", "png", "gif", "webp"]),
        }
    }

    /// PDF and Word documents up to 10 MB.
    pub fn document() -> Self {
        Self {
            max_size: 10 * MB,
            allowed_types: owned(&[
                "application/pdf",
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ]),
            allowed_extensions: owned(&["pdf", "doc", "docx"]),
        }
    }

    /// Zip and rar archives up to 50 MB.
    pub fn archive() -> Self {
        Self {
            max_size: 50 * MB,
            allowed_types: owned(&["application/zip", "application/x-rar-compressed"]),
            allowed_extensions: owned(&["zip", "rar"]),
        }
    }

    /// Anything up to 10 MB.
    pub fn general() -> Self {
        Self {
            max_size: 10 * MB,
            allowed_types: Vec::new(),
            allowed_extensions: Vec::new(),
        }
    }

    /// Rules from the `upload` configuration section.
    pub fn from_settings(settings: &UploadSettings) -> Self {
        Self {
            max_size: settings.max_file_size,
            allowed_types: settings.allowed_file_types.clone(),
            allowed_extensions: Vec::new(),
        }
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Check a MIME type against the allow-list.
    pub fn accepts_type(&self, mime_type: &str) -> bool {
        if self.allowed_types.is_empty() {
            return true;
        }
        self.allowed_types.iter().any(|allowed| match allowed.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('/') => mime_type.starts_with(prefix),
            _ => mime_type == allowed,
        })
    }

    /// Check a lower-cased extension against the allow-list.
    pub fn accepts_extension(&self, extension: Option<&str>) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        extension.is_some_and(|ext| self.allowed_extensions.iter().any(|a| a == ext))
    }
}

impl Default for FileRules {
    fn default() -> Self {
        Self::general()
    }
}

/// Validate one file against `rules`.
pub fn validate_file<F: UploadCandidate + ?Sized>(file: &F, rules: &FileRules) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if file.size() > rules.max_size {
        result.push(format!(
            "File size exceeds {}.",
            format_file_size(rules.max_size)
        ));
    }

    if !rules.accepts_type(file.mime_type()) {
        result.push("File type is not allowed.");
    }

    let extension = file.extension();
    if !rules.accepts_extension(extension.as_deref()) {
        result.push("File extension is not allowed.");
    }

    result
}

/// A file that failed validation, with its reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidFile<F> {
    pub file: F,
    pub errors: Vec<String>,
}

/// Partition of a batch into accepted and rejected files.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchValidation<F> {
    pub valid_files: Vec<F>,
    pub invalid_files: Vec<InvalidFile<F>>,
    pub all_valid: bool,
}

/// Validate a batch, keeping input order inside each partition.
pub fn validate_files<F, I>(files: I, rules: &FileRules) -> BatchValidation<F>
where
    F: UploadCandidate,
    I: IntoIterator<Item = F>,
{
    let mut valid_files = Vec::new();
    let mut invalid_files = Vec::new();

    for file in files {
        let result = validate_file(&file, rules);
        if result.valid {
            valid_files.push(file);
        } else {
            invalid_files.push(InvalidFile {
                file,
                errors: result.errors,
            });
        }
    }

    let all_valid = invalid_files.is_empty();
    BatchValidation {
        valid_files,
        invalid_files,
        all_valid,
    }
}

/// Human-readable size in 1024 steps, at most two decimals (`1.5 KB`).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

/// Coarse file kind derived from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Pdf,
    Document,
    Text,
    Spreadsheet,
    Presentation,
    Archive,
    Code,
    Audio,
    Video,
    Unknown,
}

static KIND_BY_EXTENSION: Lazy<HashMap<&'static str, FileKind>> = Lazy::new(|| {
    use FileKind::*;
    let table: &[(&[&str], FileKind)] = &[
        (&["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"], Image),
        (&["pdf"], Pdf),
        (&["doc", "docx", "rtf", "odt"], Document),
        (&["txt"], Text),
        (&["xls", "xlsx", "csv", "ods"], Spreadsheet),
        (&["ppt", "pptx", "odp"], Presentation),
        (&["zip", "rar", "7z", "tar", "gz", "bz2"], Archive),
        (&["js", "html", "css", "json", "xml", "php", "py", "java"], Code),
        (&["mp3", "wav", "flac", "aac"], Audio),
        (&["mp4", "avi", "mov", "mkv", "wmv"], Video),
    ];

    table
        .iter()
        .flat_map(|(exts, kind)| exts.iter().map(move |ext| (*ext, *kind)))
        .collect()
});

/// Kind of a file judged by its name.
pub fn file_kind(file_name: &str) -> FileKind {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .and_then(|ext| KIND_BY_EXTENSION.get(ext.as_str()).copied())
        .unwrap_or(FileKind::Unknown)
}

/// Category of a file judged by its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Document,
    Archive,
    Text,
    Other,
}

pub fn file_category(mime_type: &str) -> FileCategory {
    if mime_type.starts_with("image/") {
        FileCategory::Image
    } else if mime_type.starts_with("video/") {
        FileCategory::Video
    } else if mime_type.starts_with("audio/") {
        FileCategory::Audio
    } else if mime_type.contains("pdf") || mime_type.contains("document") {
        FileCategory::Document
    } else if mime_type.contains("zip") || mime_type.contains("rar") {
        FileCategory::Archive
    } else if mime_type.starts_with("text/") {
        FileCategory::Text
    } else {
        FileCategory::Other
    }
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Replace characters outside `[A-Za-z0-9._-]` and Hangul syllables with `_`,
/// collapse underscore runs and cap the length.
pub fn sanitize_file_name(file_name: &str) -> String {
    let mut sanitized = String::with_capacity(file_name.len());
    for c in file_name.chars() {
        let keep = c.is_ascii_alphanumeric() || is_hangul_syllable(c) || matches!(c, '.' | '_' | '-');
        let c = if keep { c } else { '_' };
        if c == '_' && sanitized.ends_with('_') {
            continue;
        }
        sanitized.push(c);
    }
    sanitized.chars().take(MAX_FILE_NAME_LENGTH).collect()
}

/// Append `_1`, `_2`, ... before the extension until no existing file uses the name.
pub fn unique_file_name(file_name: &str, existing: &[FileMeta]) -> String {
    let taken = |name: &str| existing.iter().any(|f| f.original_name == name);
    if !taken(file_name) {
        return file_name.to_string();
    }

    let (base, extension) = match file_name.rfind('.') {
        Some(idx) => file_name.split_at(idx),
        None => (file_name, ""),
    };

    (1..)
        .map(|counter| format!("{}_{}{}", base, counter, extension))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| file_name.to_string())
}
