//! Global recorder accessor
//!
//! Exactly one logical recorder exists per process. It is created
//! lazily on first access behind an atomic construct-once guard
//! (`lazy_static` with its spin-based `Once`), so racing first calls
//! from several threads observe a single fully constructed instance.

use lazy_static::lazy_static;

use crate::recorder::Recorder;

lazy_static! {
    static ref GLOBAL_RECORDER: Recorder = Recorder::new();
}

/// The process-wide recorder, stable for the process lifetime
pub fn recorder() -> &'static Recorder {
    &GLOBAL_RECORDER
}
