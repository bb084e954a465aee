// Scoped stream wrapper: no-op state, fluent appends and
// stop-on-every-exit-path.

use super::recorder_with_sink;
use crate::context::ContextId;
use crate::field::{FieldIter, FieldValue};
use crate::level::LogLevel;
use crate::stream::LogStream;

#[test]
fn stream_stops_the_record_exactly_once_on_drop() {
    let (recorder, sink) = recorder_with_sink();

    {
        let mut stream = LogStream::new(recorder, "NAV", LogLevel::Info);
        assert!(stream.is_active());
        stream.log_u32(7);
    }

    assert_eq!(recorder.active_slots(), 0);
    assert_eq!(sink.count(), 1);
}

#[test]
fn disabled_stream_is_a_cheap_noop() {
    let (recorder, sink) = recorder_with_sink();
    recorder
        .policy()
        .set_context_level(ContextId::new("NAV"), LogLevel::Error);

    {
        let mut stream = LogStream::new(recorder, "NAV", LogLevel::Info);
        assert!(!stream.is_active());
        // Appends against a no-op stream have no side effects at all.
        stream.log_u32(7).log_str("ignored").log_bool(true);
    }

    assert_eq!(sink.count(), 0);
    assert_eq!(recorder.active_slots(), 0);
}

#[test]
fn fluent_appends_arrive_in_call_order() {
    let (recorder, sink) = recorder_with_sink();

    {
        let mut stream = LogStream::new(recorder, "NAV", LogLevel::Warn);
        stream
            .log_bool(false)
            .log_i16(-3)
            .log_hex32(0xABCD)
            .log_str("done");
    }

    let records = sink.take();
    let fields: Vec<FieldValue<'_>> = FieldIter::new(&records[0].payload).collect();
    assert_eq!(
        fields,
        [
            FieldValue::Bool(false),
            FieldValue::I16(-3),
            FieldValue::Hex32(0xABCD),
            FieldValue::Str("done"),
        ]
    );
}

#[test]
fn early_return_still_flushes_the_stream() {
    let (recorder, sink) = recorder_with_sink();

    fn bail_out(recorder: &crate::recorder::Recorder) -> Option<()> {
        let mut stream = LogStream::new(recorder, "NAV", LogLevel::Info);
        stream.log_str("before bail");
        None?;
        stream.log_str("unreachable");
        Some(())
    }

    assert!(bail_out(recorder).is_none());
    assert_eq!(sink.count(), 1);
    assert_eq!(recorder.active_slots(), 0);
}
