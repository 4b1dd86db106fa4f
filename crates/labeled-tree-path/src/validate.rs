//! Validation functions for labels and absolute paths.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("label is empty")]
    EmptyLabel,
    #[error("label {label:?} contains the delimiter {delimiter:?}")]
    LabelContainsDelimiter { label: String, delimiter: char },
    #[error("path is empty")]
    EmptyPath,
    #[error("path {path:?} has an empty segment")]
    EmptySegment { path: String },
}

impl ValidationError {
    /// The offending label or path.
    pub fn subject(&self) -> &str {
        match self {
            ValidationError::EmptyLabel | ValidationError::EmptyPath => "",
            ValidationError::LabelContainsDelimiter { label, .. } => label,
            ValidationError::EmptySegment { path } => path,
        }
    }
}

/// Validate a single label.
///
/// # Errors
///
/// Returns an error if the label is empty or contains `delimiter`.
///
/// # Example
///
/// ```
/// use labeled_tree_path::validate_label;
///
/// validate_label("a", '.').unwrap();
/// validate_label("a.b", '.').unwrap_err();
/// validate_label("", '.').unwrap_err();
/// ```
pub fn validate_label(label: &str, delimiter: char) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if label.contains(delimiter) {
        return Err(ValidationError::LabelContainsDelimiter {
            label: label.to_string(),
            delimiter,
        });
    }
    Ok(())
}

/// Validate an absolute path.
///
/// # Errors
///
/// Returns an error if the path is empty or any segment is empty
/// (leading, trailing or doubled delimiters).
///
/// # Example
///
/// ```
/// use labeled_tree_path::validate_abs_path;
///
/// validate_abs_path("a.b.c", '.').unwrap();
/// validate_abs_path("a", '.').unwrap();
/// validate_abs_path("a..b", '.').unwrap_err();
/// validate_abs_path(".a", '.').unwrap_err();
/// ```
pub fn validate_abs_path(path: &str, delimiter: char) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    if path.split(delimiter).any(str::is_empty) {
        return Err(ValidationError::EmptySegment {
            path: path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_label() {
        assert!(validate_label("a", '.').is_ok());
        assert!(validate_label("살 것들", '.').is_ok());
        assert!(validate_label("main.py", '/').is_ok());
        assert_eq!(validate_label("", '.'), Err(ValidationError::EmptyLabel));
        assert_eq!(
            validate_label("main.py", '.'),
            Err(ValidationError::LabelContainsDelimiter {
                label: "main.py".to_string(),
                delimiter: '.',
            })
        );
    }

    #[test]
    fn test_validate_abs_path() {
        assert!(validate_abs_path("a", '.').is_ok());
        assert!(validate_abs_path("a.b.c", '.').is_ok());
        assert_eq!(validate_abs_path("", '.'), Err(ValidationError::EmptyPath));
        assert!(validate_abs_path("a.", '.').is_err());
        assert!(validate_abs_path("a..b", '.').is_err());
        assert!(validate_abs_path("a/b", '.').is_ok());
    }

    #[test]
    fn test_subject() {
        let err = validate_abs_path("a..b", '.').unwrap_err();
        assert_eq!(err.subject(), "a..b");
    }
}
