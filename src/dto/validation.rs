//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a display string carries at least one visible character.
///
/// # Examples
///
/// ```ignore
/// validate_not_blank("Spring Open") // Ok
/// validate_not_blank("   ")         // Err - whitespace only
/// ```
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("must contain at least one visible character".into());
        return Err(err);
    }

    Ok(())
}
