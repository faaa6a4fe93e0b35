//! Submit guard for user-supplied context.

use thiserror::Error;

/// Reasons a context is refused before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty or contained only whitespace.
    #[error("Please enter some context about your newsletter")]
    EmptyContext,
}

/// Accept a context if it has any non-whitespace content.
///
/// The input is returned untouched; trimming only decides acceptance.
pub fn validate_context(input: &str) -> Result<&str, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyContext);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_input() {
        assert_eq!(validate_context(""), Err(ValidationError::EmptyContext));
        assert_eq!(validate_context("   "), Err(ValidationError::EmptyContext));
        assert_eq!(validate_context("\n\t "), Err(ValidationError::EmptyContext));
    }

    #[test]
    fn test_accepts_and_preserves_input() {
        assert_eq!(validate_context(" indie games "), Ok(" indie games "));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            ValidationError::EmptyContext.to_string(),
            "Please enter some context about your newsletter"
        );
    }
}
