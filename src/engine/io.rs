//! Audio file I/O
//!
//! Reads audio files into channel-major sample matrices and writes them
//! back. Signal parameters are returned from reads and passed explicitly to
//! writes; see [`crate::session::AudioSession`] for the stateful wrapper.

use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

use log::{debug, warn};
use ndarray::{Array2, ArrayView, Dimension, Ix2};

use crate::engine::codec::{CodecReader, CodecWriter};
use crate::engine::convert::{check_shape, deinterleave, interleave, SampleValue};
use crate::engine::signal::{RaggedPolicy, ReadOptions, SignalParameters};
use crate::error::{AudioTensorError, Result};

/// Read an audio file into a `[channels, frames]` matrix
///
/// # Arguments
/// * `path` - File to decode
/// * `options` - How to treat a trailing partial frame
///
/// # Returns
/// The decoded matrix and the signal parameters reported by the codec
///
/// # Errors
/// * `FileOpen` - The codec cannot open or recognize the file
/// * `EmptyDecode` - No samples were decoded
/// * `RaggedSamples` - Partial trailing frame under `RaggedPolicy::Reject`
/// * `SampleConversion` - A sample does not fit the element type `T`
pub fn read_audio_file<T: SampleValue>(
    path: &Path,
    options: &ReadOptions,
) -> Result<(Array2<T>, SignalParameters)> {
    let mut reader = CodecReader::open(path)?;
    let signal = *reader.signal();
    let buffer = reader.read_samples()?;
    drop(reader);

    if buffer.is_empty() {
        return Err(AudioTensorError::EmptyDecode {
            path: path.display().to_string(),
        });
    }

    let channels = signal.channels as usize;
    let remainder = check_ragged(buffer.len(), channels, options)?;
    if remainder != 0 {
        warn!(
            "{}: dropping {} trailing samples ({} samples, {} channels)",
            path.display(),
            remainder,
            buffer.len(),
            channels
        );
    }

    let matrix = deinterleave(&buffer, channels)?;
    debug!(
        "Loaded {}: {} channels x {} frames",
        path.display(),
        matrix.nrows(),
        matrix.ncols()
    );

    Ok((matrix, signal))
}

/// Number of samples past the last whole frame, or `RaggedSamples` under
/// `RaggedPolicy::Reject`
fn check_ragged(samples: usize, channels: usize, options: &ReadOptions) -> Result<usize> {
    let remainder = samples % channels.max(1);
    if remainder != 0 && options.ragged == RaggedPolicy::Reject {
        return Err(AudioTensorError::RaggedSamples { samples, channels });
    }
    Ok(remainder)
}

/// Write a `[channels, frames]` matrix to an audio file
///
/// The matrix rank is checked at runtime so callers may pass views of any
/// dimensionality.
///
/// # Errors
/// * `NoSignalParameters` - `signal` describes zero channels
/// * `ShapeMismatch` - The matrix is not 2D or its channel count differs
/// * `SampleConversion` - An element is NaN
/// * `FileOpen` - The destination cannot be created
/// * `PartialWrite` - Fewer frames were written than requested
///
/// Once the destination has been created, any later failure removes it.
pub fn write_audio_file<T: SampleValue, D: Dimension>(
    matrix: ArrayView<'_, T, D>,
    path: &Path,
    signal: &SignalParameters,
) -> Result<()> {
    if signal.channels == 0 {
        return Err(AudioTensorError::NoSignalParameters);
    }

    let channels = signal.channels as usize;
    let shape = matrix.shape().to_vec();
    check_shape(&shape, channels)?;

    let matrix = matrix
        .into_dimensionality::<Ix2>()
        .map_err(|_| AudioTensorError::ShapeMismatch {
            expected_channels: channels,
            shape,
        })?;
    let frames = matrix.ncols();
    let mut buffer = interleave(matrix)?;

    let writer = CodecWriter::create(path, signal)?;
    discard_on_error(path, || write_frames(writer, &mut buffer, frames))?;

    debug!(
        "Saved {}: {} channels x {} frames",
        path.display(),
        channels,
        frames
    );

    Ok(())
}

/// Write `frames` frames and finalize, or report how far the codec got
pub fn write_frames<W: Write + Seek>(
    mut writer: CodecWriter<W>,
    buffer: &mut [i32],
    frames: usize,
) -> Result<()> {
    let written = writer.write(buffer, frames)?;
    if written != frames {
        return Err(AudioTensorError::PartialWrite {
            path: writer.path().to_string(),
            expected: frames,
            written,
        });
    }
    writer.finalize()
}

/// Run `write`, removing `path` if it fails
fn discard_on_error<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let result = write();
    if result.is_err() {
        if let Err(e) = fs::remove_file(path) {
            warn!("{}: could not remove partial file: {}", path.display(), e);
        }
    }
    result
}
