//! Input validators for CLI arguments.
//!
//! These run at argument-parse time (via clap `value_parser`) so a bad ID or
//! title is rejected with a specific message before any store is opened.

use crate::ident;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate an artifact ID argument.
///
/// Accepts the `{PREFIX}-{NNNN}` form with a known prefix; surrounding
/// whitespace is trimmed.
///
/// # Errors
///
/// Returns a message suitable for clap error output when the ID is empty or
/// malformed.
pub fn validate_artifact_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Artifact ID cannot be empty".to_string());
    }

    if !ident::is_valid_id(trimmed) {
        return Err(format!(
            "Invalid artifact ID '{trimmed}'. Expected PREFIX-NUMBER with prefix RFC, ADR, or DECOMP (e.g. RFC-0001)"
        ));
    }

    Ok(trimmed.to_string())
}

/// Validate an artifact title argument.
///
/// # Errors
///
/// Returns a message when the title is empty, too long, or contains control
/// characters.
pub fn validate_title(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("Title cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        ));
    }

    if trimmed.chars().any(char::is_control) {
        return Err("Title cannot contain control characters".to_string());
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ========== Artifact ID Validation Tests ==========

    #[rstest]
    #[case::rfc("RFC-0001")]
    #[case::adr("ADR-0042")]
    #[case::decomp("DECOMP-0007")]
    #[case::wide("RFC-10000")]
    #[case::unpadded("ADR-7")]
    fn test_validate_artifact_id_valid(#[case] id: &str) {
        assert_eq!(validate_artifact_id(id), Ok(id.to_string()));
    }

    #[test]
    fn test_validate_artifact_id_trims_whitespace() {
        assert_eq!(
            validate_artifact_id("  RFC-0001  "),
            Ok("RFC-0001".to_string())
        );
    }

    #[rstest]
    #[case::empty("", "cannot be empty")]
    #[case::whitespace_only("   ", "cannot be empty")]
    #[case::no_number("RFC", "Invalid artifact ID")]
    #[case::trailing_hyphen("RFC-", "Invalid artifact ID")]
    #[case::unknown_prefix("TASK-0001", "Invalid artifact ID")]
    #[case::lowercase_prefix("rfc-0001", "Invalid artifact ID")]
    #[case::non_numeric("RFC-12a4", "Invalid artifact ID")]
    fn test_validate_artifact_id_invalid(#[case] id: &str, #[case] expected_error: &str) {
        let result = validate_artifact_id(id);
        assert!(result.is_err());
        let err_msg = result.unwrap_err();
        assert!(
            err_msg.contains(expected_error),
            "Expected error to contain '{}', got: '{}'",
            expected_error,
            err_msg
        );
    }

    // ========== Title Validation Tests ==========

    #[test]
    fn test_validate_title_valid() {
        assert_eq!(
            validate_title("Unified caching layer"),
            Ok("Unified caching layer".to_string())
        );
    }

    #[test]
    fn test_validate_title_trims_whitespace() {
        assert_eq!(validate_title("  Padded  "), Ok("Padded".to_string()));
    }

    #[test]
    fn test_validate_title_at_max_length() {
        let title = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&title).is_ok());
    }

    #[rstest]
    #[case::empty("", "cannot be empty")]
    #[case::whitespace_only("   ", "cannot be empty")]
    #[case::too_long("a".repeat(201), "cannot exceed 200")]
    #[case::embedded_newline("line one\nline two", "control characters")]
    #[case::tab("before\tafter", "control characters")]
    fn test_validate_title_invalid(#[case] title: impl AsRef<str>, #[case] expected_error: &str) {
        let result = validate_title(title.as_ref());
        assert!(result.is_err());
        let err_msg = result.unwrap_err();
        assert!(
            err_msg.contains(expected_error),
            "Expected error to contain '{}', got: '{}'",
            expected_error,
            err_msg
        );
    }
}
