//! Activity tags.
//!
//! Tags are free-form labels scoped to an organization. Names are stored
//! normalized (trimmed, lowercase) so `Urgent` and `urgent` are one tag.
//! An activity carries at most [`MAX_TAGS`] tags of 1 to [`MAX_TAG_LEN`]
//! characters from `[a-z0-9_-]`.

use crate::libs::error::ReportError;

pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_LEN: usize = 50;

pub fn normalize_tag(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalizes, validates and deduplicates `tags`, keeping the first
/// occurrence order.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>, ReportError> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let name = normalize_tag(tag.as_ref());
        if name.is_empty() {
            return Err(ReportError::parse("tag names cannot be empty"));
        }
        if name.chars().count() > MAX_TAG_LEN {
            return Err(ReportError::parse(format!("tag '{}' is longer than {} characters", name, MAX_TAG_LEN)));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ReportError::parse(format!("invalid tag '{}'", tag.as_ref())));
        }
        if !normalized.contains(&name) {
            normalized.push(name);
        }
    }

    if normalized.len() > MAX_TAGS {
        return Err(ReportError::parse(format!("at most {} tags per activity", MAX_TAGS)));
    }
    Ok(normalized)
}

