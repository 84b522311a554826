//! Audio Tensor - audio files as channel-major sample matrices
//!
//! Decoding and encoding are delegated to the codec (`hound`); this crate
//! only moves samples between the codec's interleaved integer buffers and
//! `ndarray` matrices shaped `[channels, frames]`.
//!
//! # Usage
//!
//! ```no_run
//! use audio_tensor::AudioSession;
//! use ndarray::Array2;
//!
//! let mut session = AudioSession::new();
//! let mut matrix: Array2<f32> = session.load("input.wav")?;
//! matrix.mapv_inplace(|s| s * 0.5);
//! session.save(&matrix, "output.wav")?;
//! # Ok::<(), audio_tensor::AudioTensorError>(())
//! ```

pub mod api;
pub mod cli;
pub mod engine;
pub mod error;
pub mod session;

pub use engine::{Encoding, RaggedPolicy, ReadOptions, SampleFormat, SignalParameters};
pub use error::{AudioTensorError, Result};
pub use session::AudioSession;
