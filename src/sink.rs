//! Record drain collaborator
//!
//! Serialization and transport of finished records live outside this
//! crate; the recorder only pushes each finalized record through this
//! trait, synchronously, at `stop_record` time.

use crate::slot::FinalizedRecord;

/// Consumer of finalized records
///
/// Implementations must be cheap and must never panic: they run on the
/// logging caller's thread while the slot is still reserved.
pub trait RecordSink: Sync {
    /// Consumes one finished record
    ///
    /// The record view borrows pool storage and is only valid for the
    /// duration of the call.
    fn consume(&self, record: &FinalizedRecord<'_>);
}

/// Sink that discards every record
///
/// Installed by default so a recorder without a configured drain still
/// satisfies the full slot lifecycle.
pub struct NullSink;

impl RecordSink for NullSink {
    fn consume(&self, _record: &FinalizedRecord<'_>) {}
}
