//! Process-wide `load` / `save`
//!
//! The two entry points operate on a shared default [`AudioSession`], so a
//! `save` reuses whatever format the most recent `load` captured. Access is
//! serialized through a mutex. Prefer an owned [`AudioSession`] when
//! independent formats are needed.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ndarray::{Array2, ArrayBase, Data, Dimension};

use crate::engine::signal::{ReadOptions, SignalParameters};
use crate::engine::SampleValue;
use crate::error::Result;
use crate::session::AudioSession;

static DEFAULT_SESSION: Mutex<AudioSession> = Mutex::new(AudioSession::new());

fn session() -> MutexGuard<'static, AudioSession> {
    // A panic mid-call cannot leave the session half-updated
    DEFAULT_SESSION
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Load an audio file and remember its format for [`save`]
pub fn load<T: SampleValue, P: AsRef<Path>>(path: P) -> Result<Array2<T>> {
    session().load(path)
}

/// Save a matrix using the format of the last [`load`]
pub fn save<T, S, D, P>(matrix: &ArrayBase<S, D>, path: P) -> Result<()>
where
    T: SampleValue,
    S: Data<Elem = T>,
    D: Dimension,
    P: AsRef<Path>,
{
    session().save(matrix, path)
}

/// Format captured by the last successful [`load`], if any
pub fn signal() -> Option<SignalParameters> {
    session().signal().copied()
}

/// Replace the read options used by [`load`]
pub fn set_read_options(options: ReadOptions) {
    session().set_options(options);
}
