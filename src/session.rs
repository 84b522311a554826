//! Audio session
//!
//! Holds the signal parameters of the last successfully loaded file so a
//! matrix can be saved back in the same format. A session starts empty;
//! the first successful load captures parameters and every later load
//! replaces them. Saving from an empty session is an error.

use std::path::Path;

use log::info;
use ndarray::{Array2, ArrayBase, Data, Dimension};

use crate::engine::io::{read_audio_file, write_audio_file};
use crate::engine::signal::{ReadOptions, SignalParameters};
use crate::engine::SampleValue;
use crate::error::{AudioTensorError, Result};

/// Caller-owned load/save state
#[derive(Debug, Clone, Default)]
pub struct AudioSession {
    signal: Option<SignalParameters>,
    options: ReadOptions,
}

impl AudioSession {
    /// Create an empty session with default read options
    pub const fn new() -> Self {
        AudioSession {
            signal: None,
            options: ReadOptions::new(),
        }
    }

    /// Create an empty session with the given read options
    pub const fn with_options(options: ReadOptions) -> Self {
        AudioSession {
            signal: None,
            options,
        }
    }

    /// Signal parameters captured by the last successful load
    pub fn signal(&self) -> Option<&SignalParameters> {
        self.signal.as_ref()
    }

    /// True once a file has been loaded
    pub fn is_loaded(&self) -> bool {
        self.signal.is_some()
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ReadOptions) {
        self.options = options;
    }

    /// Load an audio file as a `[channels, frames]` matrix
    ///
    /// On success the file's signal parameters replace the session's. A
    /// failed load leaves the session unchanged.
    pub fn load<T: SampleValue, P: AsRef<Path>>(&mut self, path: P) -> Result<Array2<T>> {
        let path = path.as_ref();
        let (matrix, signal) = read_audio_file(path, &self.options)?;

        info!(
            "Loaded {} ({} ch, {} Hz, {} frames)",
            path.display(),
            signal.channels,
            signal.sample_rate,
            matrix.ncols()
        );
        self.signal = Some(signal);

        Ok(matrix)
    }

    /// Save a `[channels, frames]` matrix using the last loaded format
    ///
    /// # Errors
    /// * `NoSignalParameters` - Nothing has been loaded yet
    /// * `ShapeMismatch` - The matrix is not 2D with the loaded channel count
    /// * `FileOpen` / `PartialWrite` - The codec could not write the file
    pub fn save<T, S, D, P>(&self, matrix: &ArrayBase<S, D>, path: P) -> Result<()>
    where
        T: SampleValue,
        S: Data<Elem = T>,
        D: Dimension,
        P: AsRef<Path>,
    {
        let signal = self.signal.as_ref().ok_or(AudioTensorError::NoSignalParameters)?;
        let path = path.as_ref();

        write_audio_file(matrix.view(), path, signal)?;
        info!("Saved {}", path.display());

        Ok(())
    }
}
