//! Signal parameters
//!
//! Describes the format of an audio stream as reported by the codec on
//! read, and reused unchanged when writing a matrix back out.

use hound::WavSpec;
use serde::{Deserialize, Serialize};

use crate::error::{AudioTensorError, Result};

/// How samples are stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Signed integer PCM
    Int,
    /// IEEE float PCM
    Float,
}

impl From<hound::SampleFormat> for SampleFormat {
    fn from(format: hound::SampleFormat) -> Self {
        match format {
            hound::SampleFormat::Int => SampleFormat::Int,
            hound::SampleFormat::Float => SampleFormat::Float,
        }
    }
}

impl From<SampleFormat> for hound::SampleFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Int => hound::SampleFormat::Int,
            SampleFormat::Float => hound::SampleFormat::Float,
        }
    }
}

/// Bit depth and sample format of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Encoding {
    pub bits_per_sample: u16,
    pub sample_format: SampleFormat,
}

impl Encoding {
    /// 16-bit integer PCM
    pub fn pcm16() -> Self {
        Encoding {
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    /// 24-bit integer PCM
    pub fn pcm24() -> Self {
        Encoding {
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        }
    }

    /// 32-bit float PCM
    pub fn float32() -> Self {
        Encoding {
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        }
    }

    /// Check the codec can write this encoding
    pub fn validate(&self) -> Result<()> {
        let supported = match self.sample_format {
            SampleFormat::Int => matches!(self.bits_per_sample, 8 | 16 | 24 | 32),
            SampleFormat::Float => self.bits_per_sample == 32,
        };

        if supported {
            Ok(())
        } else {
            Err(AudioTensorError::UnsupportedEncoding {
                details: format!(
                    "{}-bit {:?} PCM (supported: 8/16/24/32-bit Int, 32-bit Float)",
                    self.bits_per_sample, self.sample_format
                ),
            })
        }
    }

    /// Inclusive range of sample values the codec exchanges for this encoding.
    ///
    /// Float streams are exchanged at full 32-bit integer scale.
    pub fn sample_range(&self) -> (i32, i32) {
        match self.sample_format {
            SampleFormat::Float => (i32::MIN, i32::MAX),
            SampleFormat::Int => {
                let bits = self.bits_per_sample.clamp(1, 32) as u32;
                let max = (1i64 << (bits - 1)) - 1;
                let min = -(1i64 << (bits - 1));
                (min as i32, max as i32)
            }
        }
    }
}

/// Format of the most recently loaded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalParameters {
    /// Number of interleaved channels (>= 1)
    pub channels: u16,
    /// Frames per second
    pub sample_rate: u32,
    pub encoding: Encoding,
    /// Declared total sample count (all channels)
    pub length: u64,
}

impl SignalParameters {
    pub fn new(channels: u16, sample_rate: u32, encoding: Encoding) -> Self {
        SignalParameters {
            channels,
            sample_rate,
            encoding,
            length: 0,
        }
    }

    /// Build from the codec's reported spec and declared sample count
    pub fn from_wav_spec(spec: WavSpec, length: u64) -> Self {
        SignalParameters {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            encoding: Encoding {
                bits_per_sample: spec.bits_per_sample,
                sample_format: spec.sample_format.into(),
            },
            length,
        }
    }

    /// Spec handed to the codec when opening a file for writing
    pub fn to_wav_spec(&self) -> Result<WavSpec> {
        self.encoding.validate()?;
        Ok(WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.encoding.bits_per_sample,
            sample_format: self.encoding.sample_format.into(),
        })
    }

    /// Declared frame count (length / channels)
    pub fn frames(&self) -> u64 {
        if self.channels == 0 {
            0
        } else {
            self.length / self.channels as u64
        }
    }

    /// Declared duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.sample_rate as f64
        }
    }
}

/// What to do when the decoded sample count is not a multiple of the
/// channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedPolicy {
    /// Drop the trailing partial frame
    #[default]
    Truncate,
    /// Fail with `RaggedSamples`
    Reject,
}

/// Options applied when reading a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadOptions {
    #[serde(default)]
    pub ragged: RaggedPolicy,
}

impl ReadOptions {
    pub const fn new() -> Self {
        ReadOptions {
            ragged: RaggedPolicy::Truncate,
        }
    }

    /// Reject ragged sample counts instead of truncating
    pub const fn strict() -> Self {
        ReadOptions {
            ragged: RaggedPolicy::Reject,
        }
    }
}
