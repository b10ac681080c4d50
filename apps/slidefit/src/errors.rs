use thiserror::Error;

/// Library-level error type.
///
/// Only inputs that cannot be measured at all are errors. Text that does not fit
/// and elements that leave the canvas are reported through diagnostics instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Zero, negative or non-finite dimensions, empty text, empty grids.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Unknown content type profile or canvas preset.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unsupported font size or malformed options.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl LayoutError {
    /// Short machine-readable code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            LayoutError::DegenerateInput(_) => "DEGENERATE_INPUT",
            LayoutError::NotFound(_) => "NOT_FOUND",
            LayoutError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_detail() {
        let err = LayoutError::NotFound("content type 'poster'".to_string());
        assert_eq!(err.to_string(), "Not found: content type 'poster'");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_degenerate_input_code() {
        let err = LayoutError::DegenerateInput("container height is 0".to_string());
        assert_eq!(err.code(), "DEGENERATE_INPUT");
        assert!(err.to_string().contains("container height is 0"));
    }
}
