//! CLI Command Implementations
//!
//! Each command runs against a caller-supplied session and returns what
//! should be printed.

use std::fmt;
use std::path::Path;

use log::info;
use ndarray::{s, Array2};
use serde::Serialize;

use crate::engine::signal::SignalParameters;
use crate::error::{AudioTensorError, Result};
use crate::session::AudioSession;

/// Summary printed by `info`
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub path: String,
    pub signal: SignalParameters,
    /// Loaded matrix shape: [channels, frames]
    pub shape: [usize; 2],
    pub duration_secs: f64,
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File:        {}", self.path)?;
        writeln!(f, "Channels:    {}", self.signal.channels)?;
        writeln!(f, "Sample rate: {} Hz", self.signal.sample_rate)?;
        writeln!(
            f,
            "Encoding:    {}-bit {:?}",
            self.signal.encoding.bits_per_sample, self.signal.encoding.sample_format
        )?;
        writeln!(f, "Shape:       {} x {}", self.shape[0], self.shape[1])?;
        write!(f, "Duration:    {:.3}s", self.duration_secs)
    }
}

/// Matrix dump printed by `dump`
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    pub signal: SignalParameters,
    pub shape: [usize; 2],
    /// One row per channel
    pub channels: Vec<Vec<i64>>,
}

/// Load a file and describe it.
pub fn info(session: &mut AudioSession, path: &Path) -> Result<InfoReport> {
    info!("Inspecting: {}", path.display());

    let matrix: Array2<i64> = session.load(path)?;
    report(session, path, &matrix)
}

/// Load `input` and save it to `output` with the same format.
pub fn copy(session: &mut AudioSession, input: &Path, output: &Path) -> Result<InfoReport> {
    info!("Copying {} -> {}", input.display(), output.display());

    let matrix: Array2<i64> = session.load(input)?;
    session.save(&matrix, output)?;
    report(session, output, &matrix)
}

/// Load a file and return its samples, optionally limited to the first
/// `frames` frames.
pub fn dump(session: &mut AudioSession, path: &Path, frames: Option<usize>) -> Result<DumpReport> {
    info!("Dumping: {}", path.display());

    let matrix: Array2<i64> = session.load(path)?;
    let limit = frames.unwrap_or(matrix.ncols()).min(matrix.ncols());
    let view = matrix.slice(s![.., ..limit]);
    let channels = view.outer_iter().map(|row| row.to_vec()).collect();

    Ok(DumpReport {
        signal: *loaded_signal(session)?,
        shape: [view.nrows(), view.ncols()],
        channels,
    })
}

/// Render a report as JSON
pub fn to_json<T: Serialize>(report: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

fn report(session: &AudioSession, path: &Path, matrix: &Array2<i64>) -> Result<InfoReport> {
    let signal = *loaded_signal(session)?;
    let frames = matrix.ncols();
    let duration_secs = if signal.sample_rate == 0 {
        0.0
    } else {
        frames as f64 / signal.sample_rate as f64
    };

    Ok(InfoReport {
        path: path.display().to_string(),
        signal,
        shape: [matrix.nrows(), frames],
        duration_secs,
    })
}

fn loaded_signal(session: &AudioSession) -> Result<&SignalParameters> {
    session.signal().ok_or(AudioTensorError::NoSignalParameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::io::write_audio_file;
    use crate::engine::signal::Encoding;
    use ndarray::array;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn fixture(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("fixture.wav");
        let signal = SignalParameters::new(2, 4, Encoding::pcm16());
        let matrix = array![[1, 2, 3, 4, 5, 6, 7, 8], [-1, -2, -3, -4, -5, -6, -7, -8]];
        write_audio_file(matrix.view(), &path, &signal).unwrap();
        path
    }

    #[test]
    fn test_info_report() {
        let dir = tempdir().unwrap();
        let path = fixture(dir.path());

        let report = info(&mut AudioSession::new(), &path).unwrap();
        assert_eq!(report.shape, [2, 8]);
        assert_eq!(report.signal.sample_rate, 4);
        assert!((report.duration_secs - 2.0).abs() < 1e-9);

        let text = report.to_string();
        assert!(text.contains("Channels:    2"));
        assert!(text.contains("16-bit Int"));
    }

    #[test]
    fn test_copy_round_trip() {
        let dir = tempdir().unwrap();
        let input = fixture(dir.path());
        let output = dir.path().join("copy.wav");

        let mut session = AudioSession::new();
        copy(&mut session, &input, &output).unwrap();

        let original: Array2<i32> = session.load(&input).unwrap();
        let copied: Array2<i32> = session.load(&output).unwrap();
        assert_eq!(original, copied);
    }

    #[test]
    fn test_dump_limits_frames() {
        let dir = tempdir().unwrap();
        let path = fixture(dir.path());

        let report = dump(&mut AudioSession::new(), &path, Some(3)).unwrap();
        assert_eq!(report.shape, [2, 3]);
        assert_eq!(report.channels, vec![vec![1, 2, 3], vec![-1, -2, -3]]);

        let all = dump(&mut AudioSession::new(), &path, Some(100)).unwrap();
        assert_eq!(all.shape, [2, 8]);
    }

    #[test]
    fn test_dump_serializes() {
        let dir = tempdir().unwrap();
        let path = fixture(dir.path());

        let report = dump(&mut AudioSession::new(), &path, Some(1)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["channels"], serde_json::json!([[1], [-1]]));
        assert_eq!(json["signal"]["encoding"]["sample_format"], "int");
    }

    #[test]
    fn test_to_json() {
        let dir = tempdir().unwrap();
        let path = fixture(dir.path());

        let report = info(&mut AudioSession::new(), &path).unwrap();
        let compact = to_json(&report, false).unwrap();
        let pretty = to_json(&report, true).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["shape"], serde_json::json!([2, 8]));
    }
}
