//! Field-level validation helpers shared by the `NewX::validate` methods.
//!
//! Every helper returns `CoreError::Validation` with a message naming the
//! offending field, so adapters can surface it verbatim as a 400 body.

use crate::ports::CoreError;

/// Maximum length for short text columns (names, emails, addresses).
pub const MAX_TEXT_LEN: usize = 255;

/// Maximum length for free-form description columns.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Require a non-blank string no longer than [`MAX_TEXT_LEN`] characters.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Optional text: when present it must be non-blank and within `max` characters.
pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{field} must not be blank (use null to clear it)"
        )));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Minimal structural email check: `local@domain.tld`, no whitespace.
pub fn require_email(field: &str, value: &str) -> Result<(), CoreError> {
    require_text(field, value)?;
    let invalid = || CoreError::Validation(format!("{field} is not a valid email address"));

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Reference ids must be positive.
pub fn require_id(field: &str, id: i64) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a positive id"
        )));
    }
    Ok(())
}
