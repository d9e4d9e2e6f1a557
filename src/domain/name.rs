//! Name validation for categories and shapes
//!
//! Category names become folder names and shape names become file names in
//! the image mirror, so both must be filesystem-safe on every platform.

use thiserror::Error;

/// Characters that may not appear in a category or shape name
pub const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug, Error, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name '{0}' contains a forbidden character ('{1}'); avoid < > : \" / \\ | ? *")]
    ForbiddenChar(String, char),

    #[error("Name '{0}' has leading or trailing whitespace")]
    Untrimmed(String),

    #[error("Name '{0}' is reserved")]
    Reserved(String),
}

/// Checks that a name can be used as a file or folder name in the mirror
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }

    if name.trim() != name {
        return Err(NameError::Untrimmed(name.to_string()));
    }

    if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c) || c.is_control()) {
        return Err(NameError::ForbiddenChar(name.to_string(), c));
    }

    // "." and ".." resolve to other directories
    if name.chars().all(|c| c == '.') {
        return Err(NameError::Reserved(name.to_string()));
    }

    Ok(())
}

/// Returns true if the name passes [`validate_name`]
pub fn is_valid_name(name: &str) -> bool {
    validate_name(name).is_ok()
}

/// Strips forbidden characters and surrounding whitespace
///
/// Returns `None` when nothing usable is left.
pub fn sanitize_name(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();

    if is_valid_name(cleaned) {
        Some(cleaned.to_string())
    } else {
        None
    }
}
