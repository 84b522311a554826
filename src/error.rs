//! Error handling for audio-tensor
//!
//! Every failure is returned to the caller; nothing in the library aborts
//! the process.

use thiserror::Error;

/// Result type alias for audio-tensor operations
pub type Result<T> = std::result::Result<T, AudioTensorError>;

/// Main error type for load/save operations
#[derive(Error, Debug)]
pub enum AudioTensorError {
    // File Errors
    #[error("Failed to open audio file: {path}")]
    FileOpen {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to decode audio file: {path}")]
    Decode {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to encode audio file: {path}")]
    Encode {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Empty file or read failed: no samples decoded from {path}")]
    EmptyDecode { path: String },

    #[error("Unsupported encoding: {details}")]
    UnsupportedEncoding { details: String },

    // Session Errors
    #[error("You need to load a file first (to set sample rate etc. parameters)")]
    NoSignalParameters,

    // Shape Errors
    #[error("Tensor should be {expected_channels} (channels) x frames, got shape {shape:?}")]
    ShapeMismatch {
        expected_channels: usize,
        shape: Vec<usize>,
    },

    #[error("{samples} samples do not divide evenly into {channels} channels")]
    RaggedSamples { samples: usize, channels: usize },

    #[error("Sample at channel {channel}, frame {frame} cannot be converted (NaN, or too wide for the element type)")]
    SampleConversion { channel: usize, frame: usize },

    #[error("Partial write to {path}: wrote {written} of {expected} frames")]
    PartialWrite {
        path: String,
        expected: usize,
        written: usize,
    },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AudioTensorError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            AudioTensorError::FileOpen { .. } => "FILE_OPEN",
            AudioTensorError::Decode { .. } => "DECODE",
            AudioTensorError::Encode { .. } => "ENCODE",
            AudioTensorError::EmptyDecode { .. } => "EMPTY_DECODE",
            AudioTensorError::UnsupportedEncoding { .. } => "UNSUPPORTED_ENCODING",
            AudioTensorError::NoSignalParameters => "NO_SIGNAL_PARAMETERS",
            AudioTensorError::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            AudioTensorError::RaggedSamples { .. } => "RAGGED_SAMPLES",
            AudioTensorError::SampleConversion { .. } => "SAMPLE_CONVERSION",
            AudioTensorError::PartialWrite { .. } => "PARTIAL_WRITE",
            AudioTensorError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::FileOpen { .. } => "Check that the path exists and is a readable/writable WAV file",
            Self::Decode { .. } => "The file may be truncated or corrupted - try re-exporting it",
            Self::EmptyDecode { .. } => "The file contains no audio samples",
            Self::UnsupportedEncoding { .. } => "Load a file with 8/16/24/32-bit integer or 32-bit float PCM",
            Self::NoSignalParameters => "Load a file before saving so its format can be reused",
            Self::ShapeMismatch { .. } => "Pass a 2D array shaped [channels, frames] matching the loaded file",
            Self::RaggedSamples { .. } => "Disable strict mode to drop the trailing partial frame",
            Self::SampleConversion { .. } => "Replace NaN values before saving, or load into a wider element type",
            Self::PartialWrite { .. } => "Check free disk space and retry",
            _ => "Check the error details and try again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AudioTensorError::EmptyDecode {
            path: "test.wav".to_string(),
        };
        assert_eq!(err.error_code(), "EMPTY_DECODE");
        assert_eq!(
            AudioTensorError::NoSignalParameters.error_code(),
            "NO_SIGNAL_PARAMETERS"
        );
    }

    #[test]
    fn test_shape_mismatch_message() {
        let err = AudioTensorError::ShapeMismatch {
            expected_channels: 2,
            shape: vec![3, 100],
        };
        let msg = err.to_string();
        assert!(msg.contains("Tensor should be 2"));
        assert!(msg.contains("[3, 100]"));
    }

    #[test]
    fn test_no_signal_parameters_mentions_load() {
        let err = AudioTensorError::NoSignalParameters;
        assert!(err.to_string().contains("load a file first"));
        assert!(!err.recovery_hint().is_empty());
    }
}
