//! Audio Engine Module
//!
//! Marshals samples between the codec and sample matrices:
//! - Signal parameters
//! - Codec read/write handles
//! - Buffer <-> matrix conversion
//! - File I/O operations

pub mod codec;
pub mod convert;
pub mod io;
pub mod signal;

pub use codec::{CodecReader, CodecWriter};
pub use convert::{deinterleave, interleave, SampleValue};
pub use io::{read_audio_file, write_audio_file, write_frames};
pub use signal::{Encoding, RaggedPolicy, ReadOptions, SampleFormat, SignalParameters};
