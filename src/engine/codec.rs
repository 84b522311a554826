//! Codec handles
//!
//! Thin wrappers over the hound WAV reader/writer that exchange samples as
//! interleaved `i32` buffers. Handles close when dropped, so every exit path
//! releases the underlying file.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, Write};
use std::path::Path;

use hound::{WavReader, WavWriter};
use log::{debug, warn};

use crate::engine::convert::{clamp_samples, float_to_full_scale, full_scale_to_float};
use crate::engine::signal::{SampleFormat, SignalParameters};
use crate::error::{AudioTensorError, Result};

/// An audio file opened for reading
pub struct CodecReader {
    path: String,
    reader: WavReader<BufReader<File>>,
    signal: SignalParameters,
    clipped: usize,
}

impl CodecReader {
    /// Open a file and read its header
    ///
    /// # Errors
    /// * `FileOpen` - the file is missing or not recognized by the codec
    pub fn open(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let reader = WavReader::open(path).map_err(|e| AudioTensorError::FileOpen {
            path: display.clone(),
            source: e,
        })?;

        let signal = SignalParameters::from_wav_spec(reader.spec(), reader.len() as u64);
        debug!(
            "Opened {} for read: {} ch, {} Hz, {}-bit {:?}, {} samples",
            display,
            signal.channels,
            signal.sample_rate,
            signal.encoding.bits_per_sample,
            signal.encoding.sample_format,
            signal.length
        );

        Ok(CodecReader {
            path: display,
            reader,
            signal,
            clipped: 0,
        })
    }

    /// Parameters reported by the file header
    pub fn signal(&self) -> &SignalParameters {
        &self.signal
    }

    /// Float samples outside `[-1.0, 1.0]` clamped by the last read
    pub fn clipped(&self) -> usize {
        self.clipped
    }

    /// Read up to the declared sample count
    ///
    /// An I/O failure mid-stream (truncated data chunk) ends the read and
    /// yields the samples read so far. Malformed sample data is an error.
    pub fn read_samples(&mut self) -> Result<Vec<i32>> {
        let declared = self.signal.length as usize;
        let mut buffer = Vec::with_capacity(declared);
        let mut clipped = 0;

        match self.signal.encoding.sample_format {
            SampleFormat::Int => {
                for sample in self.reader.samples::<i32>().take(declared) {
                    match sample {
                        Ok(value) => buffer.push(value),
                        Err(hound::Error::IoError(e)) => {
                            debug!("{}: read stopped: {}", self.path, e);
                            break;
                        }
                        Err(e) => return Err(decode_error(&self.path, e)),
                    }
                }
            }
            SampleFormat::Float => {
                for sample in self.reader.samples::<f32>().take(declared) {
                    match sample {
                        Ok(value) => {
                            if value.abs() > 1.0 {
                                clipped += 1;
                            }
                            buffer.push(float_to_full_scale(value));
                        }
                        Err(hound::Error::IoError(e)) => {
                            debug!("{}: read stopped: {}", self.path, e);
                            break;
                        }
                        Err(e) => return Err(decode_error(&self.path, e)),
                    }
                }
            }
        }

        self.clipped = clipped;
        if clipped > 0 {
            warn!("{}: {} float samples beyond full scale clipped", self.path, clipped);
        }

        if buffer.len() < declared {
            warn!(
                "{}: stream ended after {} of {} declared samples",
                self.path,
                buffer.len(),
                declared
            );
        }

        Ok(buffer)
    }
}

/// An audio stream opened for writing
pub struct CodecWriter<W: Write + Seek = BufWriter<File>> {
    path: String,
    writer: WavWriter<W>,
    signal: SignalParameters,
}

impl CodecWriter<BufWriter<File>> {
    /// Create (or truncate) a file using the given signal parameters
    ///
    /// # Errors
    /// * `UnsupportedEncoding` - the encoding cannot be written
    /// * `FileOpen` - the destination cannot be created
    pub fn create(path: &Path, signal: &SignalParameters) -> Result<Self> {
        let display = path.display().to_string();
        let spec = signal.to_wav_spec()?;
        let writer = WavWriter::create(path, spec).map_err(|e| AudioTensorError::FileOpen {
            path: display.clone(),
            source: e,
        })?;

        debug!(
            "Opened {} for write: {} ch, {} Hz, {}-bit {:?}",
            display,
            signal.channels,
            signal.sample_rate,
            signal.encoding.bits_per_sample,
            signal.encoding.sample_format
        );

        Ok(CodecWriter {
            path: display,
            writer,
            signal: *signal,
        })
    }
}

impl<W: Write + Seek> CodecWriter<W> {
    /// Wrap an already open stream; `label` names it in errors and logs
    pub fn from_writer(writer: W, label: &str, signal: &SignalParameters) -> Result<Self> {
        let spec = signal.to_wav_spec()?;
        let writer = WavWriter::new(writer, spec).map_err(|e| AudioTensorError::FileOpen {
            path: label.to_string(),
            source: e,
        })?;

        Ok(CodecWriter {
            path: label.to_string(),
            writer,
            signal: *signal,
        })
    }

    /// Name used in errors and logs
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Write up to `frames` frames from an interleaved buffer
    ///
    /// Returns the number of whole frames the codec accepted. Writing stops
    /// at the first codec error, so a short count means the stream failed.
    /// Samples outside the encoding's range are clipped.
    pub fn write(&mut self, buffer: &mut [i32], frames: usize) -> Result<usize> {
        let channels = self.signal.channels as usize;
        if channels == 0 {
            return Ok(0);
        }

        let frames = frames.min(buffer.len() / channels);
        let samples = &mut buffer[..frames * channels];

        let clipped = clamp_samples(samples, self.signal.encoding.sample_range());
        if clipped > 0 {
            warn!("{}: {} samples clipped", self.path, clipped);
        }

        let float = self.signal.encoding.sample_format == SampleFormat::Float;
        for (written, &sample) in samples.iter().enumerate() {
            let result = if float {
                self.writer.write_sample(full_scale_to_float(sample))
            } else {
                self.writer.write_sample(sample)
            };

            if let Err(e) = result {
                warn!(
                    "{}: write failed after {} samples: {}",
                    self.path, written, e
                );
                return Ok(written / channels);
            }
        }

        Ok(frames)
    }

    /// Flush and close the stream, updating the header
    pub fn finalize(self) -> Result<()> {
        let path = self.path;
        self.writer
            .finalize()
            .map_err(|e| encode_error(&path, e))
    }
}

fn decode_error(path: &str, source: hound::Error) -> AudioTensorError {
    AudioTensorError::Decode {
        path: path.to_string(),
        source,
    }
}

fn encode_error(path: &str, source: hound::Error) -> AudioTensorError {
    AudioTensorError::Encode {
        path: path.to_string(),
        source,
    }
}
