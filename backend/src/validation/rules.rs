//! Common validation rules shared across request payloads.

use validator::ValidationError;

pub const MAX_VERIFIER_NOTE_LENGTH: usize = 500;

/// Validates username format.
///
/// Requirements:
/// - Only alphanumeric characters and underscores
/// - 1-50 characters in length
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() || username.len() > 50 {
        return Err(ValidationError::new("username_invalid_length"));
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("username_invalid_characters"));
    }

    Ok(())
}

/// Validates NRP (service number) format.
///
/// Requirements:
/// - Only alphanumeric characters and dashes
/// - 3-32 characters in length
pub fn validate_nrp(nrp: &str) -> Result<(), ValidationError> {
    if nrp.len() < 3 || nrp.len() > 32 {
        return Err(ValidationError::new("nrp_invalid_length"));
    }

    if !nrp.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::new("nrp_invalid_characters"));
    }

    Ok(())
}

/// Validates an optional verifier note: at most 500 characters.
pub fn validate_verifier_note(note: &str) -> Result<(), ValidationError> {
    if note.chars().count() > MAX_VERIFIER_NOTE_LENGTH {
        return Err(ValidationError::new("note_too_long"));
    }
    Ok(())
}

/// Validates password length for account creation and resets.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 || password.len() > 128 {
        return Err(ValidationError::new("password_invalid_length"));
    }
    Ok(())
}
