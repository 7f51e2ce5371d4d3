//! Phone number normalization for provider submission.

use crate::error::CoreError;

/// Normalize a stored phone number to the `+`-prefixed form providers
/// expect.
///
/// Trims surrounding whitespace and prepends `+` when absent. The digits
/// themselves are passed through untouched; tenants own their own number
/// formats.
pub fn normalize_phone(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Phone number is empty".into()));
    }
    if trimmed.starts_with('+') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("+{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_bare_numbers() {
        assert_eq!(normalize_phone("5215512345678").unwrap(), "+5215512345678");
    }

    #[test]
    fn keeps_existing_prefix() {
        assert_eq!(normalize_phone("+5215512345678").unwrap(), "+5215512345678");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize_phone("  447700900123 ").unwrap(), "+447700900123");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(normalize_phone("   ").is_err());
    }
}
