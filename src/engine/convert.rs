//! Sample buffer <-> sample matrix conversion
//!
//! The codec works with flat interleaved `i32` buffers
//! (`[a0, b0, a1, b1, ...]`); callers work with channel-major matrices
//! shaped `[channels, frames]` (`[[a0, a1, ...], [b0, b1, ...]]`).

use ndarray::{Array2, ArrayView2};
use num_traits::{NumCast, ToPrimitive, Zero};

use crate::error::{AudioTensorError, Result};

/// Numeric element type a sample matrix can hold
pub trait SampleValue: NumCast + Zero + Copy {}

impl<T: NumCast + Zero + Copy> SampleValue for T {}

/// De-interleave a codec buffer into a `[channels, frames]` matrix
///
/// Element `[k, x]` is taken from `buffer[x * channels + k]`. Trailing
/// samples that do not make up a whole frame are ignored.
pub fn deinterleave<T: SampleValue>(buffer: &[i32], channels: usize) -> Result<Array2<T>> {
    if channels == 0 {
        return Err(AudioTensorError::ShapeMismatch {
            expected_channels: 0,
            shape: vec![0, buffer.len()],
        });
    }

    let frames = buffer.len() / channels;
    let mut matrix = Array2::<T>::zeros((channels, frames));

    for ((channel, frame), slot) in matrix.indexed_iter_mut() {
        *slot = <T as NumCast>::from(buffer[frame * channels + channel])
            .ok_or(AudioTensorError::SampleConversion { channel, frame })?;
    }

    Ok(matrix)
}

/// Interleave a `[channels, frames]` matrix into a codec buffer
///
/// Works on any memory layout; non-contiguous views are read element by
/// element. Values beyond the `i32` range saturate, fractions truncate
/// toward zero, and NaN is rejected.
pub fn interleave<T: SampleValue>(matrix: ArrayView2<'_, T>) -> Result<Vec<i32>> {
    let (channels, frames) = matrix.dim();
    let mut buffer = Vec::with_capacity(channels * frames);

    for frame in 0..frames {
        for channel in 0..channels {
            let sample = saturate_to_i32(matrix[[channel, frame]])
                .ok_or(AudioTensorError::SampleConversion { channel, frame })?;
            buffer.push(sample);
        }
    }

    Ok(buffer)
}

fn saturate_to_i32<T: SampleValue>(value: T) -> Option<i32> {
    if let Some(wide) = value.to_i64() {
        return Some(wide.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    }
    match value.to_f64() {
        Some(v) if !v.is_nan() => Some(v.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32),
        _ => None,
    }
}

/// Check a matrix shape against the recorded channel count
pub fn check_shape(shape: &[usize], channels: usize) -> Result<()> {
    if shape.len() != 2 || shape[0] != channels {
        return Err(AudioTensorError::ShapeMismatch {
            expected_channels: channels,
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

/// Clamp samples to the codec's range, returning how many were clipped
pub fn clamp_samples(buffer: &mut [i32], (min, max): (i32, i32)) -> usize {
    let mut clipped = 0;
    for sample in buffer.iter_mut() {
        if *sample < min || *sample > max {
            *sample = (*sample).clamp(min, max);
            clipped += 1;
        }
    }
    clipped
}

/// Map a float sample in `[-1.0, 1.0]` to full-scale `i32`
#[inline]
pub fn float_to_full_scale(sample: f32) -> i32 {
    (sample as f64 * 2_147_483_648.0)
        .round()
        .clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// Map a full-scale `i32` back to a float sample
#[inline]
pub fn full_scale_to_float(sample: i32) -> f32 {
    (sample as f64 / 2_147_483_648.0) as f32
}
