//! In-tree test suite for the recorder core
//!
//! Most tests run against independent `Recorder` instances so they can
//! install their own collecting sink. Tests that exercise the global
//! runtime (macros, FFI, logger registry) share one process-wide
//! collecting sink and isolate themselves by using unique contexts.

use spin::Mutex;

use crate::level::LogLevel;
use crate::recorder::Recorder;
use crate::sink::RecordSink;
use crate::slot::{FinalizedRecord, RecordFlags};

mod concurrency;
mod format;
mod layout;
mod registry;
mod stream;

/// Owned copy of a finalized record, captured by [`TestSink`]
pub(crate) struct CapturedRecord {
    pub(crate) context: String,
    pub(crate) level: LogLevel,
    pub(crate) flags: RecordFlags,
    pub(crate) payload: Vec<u8>,
}

/// Sink that keeps owned copies of everything it consumes
pub(crate) struct TestSink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl TestSink {
    pub(crate) fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn take(&self) -> Vec<CapturedRecord> {
        core::mem::take(&mut *self.records.lock())
    }

    pub(crate) fn count(&self) -> usize {
        self.records.lock().len()
    }

    /// Records captured for one context, in consume order
    pub(crate) fn for_context(&self, context: &str) -> Vec<CapturedRecord> {
        let mut records = self.records.lock();
        let mut out = Vec::new();
        let mut i = 0;
        while i < records.len() {
            if records[i].context == context {
                out.push(records.remove(i));
            } else {
                i += 1;
            }
        }
        out
    }
}

impl RecordSink for TestSink {
    fn consume(&self, record: &FinalizedRecord<'_>) {
        self.records.lock().push(CapturedRecord {
            context: record.context().as_str().to_string(),
            level: record.level(),
            flags: record.flags(),
            payload: record.payload().to_vec(),
        });
    }
}

/// Fresh recorder with its own capturing sink
pub(crate) fn recorder_with_sink() -> (&'static Recorder, &'static TestSink) {
    let recorder = Box::leak(Box::new(Recorder::new()));
    let sink = Box::leak(Box::new(TestSink::new()));
    recorder.set_sink(sink);
    (recorder, sink)
}

/// The capturing sink installed on the global recorder
///
/// Tests using this must pick contexts unique to themselves and filter
/// with [`TestSink::for_context`].
pub(crate) fn global_sink() -> &'static TestSink {
    static SINK: spin::Once<&'static TestSink> = spin::Once::new();
    *SINK.call_once(|| {
        let sink = Box::leak(Box::new(TestSink::new()));
        crate::runtime::recorder().set_sink(sink);
        sink
    })
}
