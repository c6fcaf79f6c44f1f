//! Error types for the selection pipeline.

use thiserror::Error;

/// Result type for selection operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors that can occur while turning frame metrics into segments.
///
/// The pipeline has no transient failure modes: it performs no I/O, so every
/// error here is a caller mistake surfaced before any partial result exists.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Configuration failed validation before any frame was processed.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Frame timestamps must be strictly increasing with no duplicates.
    #[error(
        "frame {index} at {timestamp}s does not advance past the previous frame at {previous}s"
    )]
    UnorderedFrames {
        index: usize,
        timestamp: f64,
        previous: f64,
    },
}

impl SelectError {
    /// Create a configuration validation error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an input ordering error.
    pub fn unordered_frames(index: usize, timestamp: f64, previous: f64) -> Self {
        Self::UnorderedFrames {
            index,
            timestamp,
            previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SelectError::invalid_config("max_segment_duration must exceed min");
        assert!(err.to_string().contains("invalid configuration"));

        let err = SelectError::unordered_frames(3, 2.0, 2.0);
        assert!(err.to_string().contains("frame 3"));
    }
}
