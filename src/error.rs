//! Error types for violin-viz operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or composing a plot.
///
/// Every plot call validates its input eagerly, so any of these aborts the
/// whole call before a single primitive reaches the renderer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Label or category count does not match the data extent.
    #[error("Shape mismatch: {what} has {actual} elements, expected {expected}")]
    ShapeMismatch {
        /// What was being matched (e.g. "categories").
        what: String,
        /// Length required by the data.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Invalid option value (non-positive width, malformed color, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A group has no values left after NaN filtering.
    #[error("Empty sample for group '{label}'")]
    EmptySample {
        /// Label of the offending group.
        label: String,
    },

    /// Renderer rejected a primitive update.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] error.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_names_both_lengths() {
        let err = Error::ShapeMismatch {
            what: "categories".into(),
            expected: 10,
            actual: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("categories"));
        assert!(msg.contains("10"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn test_empty_sample_display() {
        let err = Error::EmptySample { label: "b".into() };
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_config_shorthand() {
        let err = Error::config("Width must be positive");
        assert_eq!(err, Error::Configuration("Width must be positive".into()));
    }
}
