// Formatting macros over the global recorder: gating, message
// content and stack-buffer truncation.

use super::global_sink;
use crate::config::MAX_FORMATTED_LENGTH;
use crate::field::{FieldIter, FieldValue};
use crate::level::LogLevel;
use crate::{rec_debug, rec_err, rec_info};

#[test]
fn macro_emits_one_formatted_string_field() {
    let sink = global_sink();

    rec_info!("MFM1", "value: {}", 42);

    let records = sink.for_context("MFM1");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Info);

    let fields: Vec<FieldValue<'_>> = FieldIter::new(&records[0].payload).collect();
    assert_eq!(fields, [FieldValue::Str("value: 42")]);
}

#[test]
fn disabled_macro_level_never_formats() {
    let sink = global_sink();

    // Global default is Info; Debug is gated out before formatting.
    rec_debug!("MFM2", "{}", expensive_argument());
    assert!(sink.for_context("MFM2").is_empty());

    fn expensive_argument() -> &'static str {
        "never evaluated on the disabled path"
    }
}

#[test]
fn long_messages_are_cut_at_the_stack_buffer() {
    let sink = global_sink();

    let long = "y".repeat(MAX_FORMATTED_LENGTH * 2);
    rec_err!("MFM3", "{long}");

    let records = sink.for_context("MFM3");
    let fields: Vec<FieldValue<'_>> = FieldIter::new(&records[0].payload).collect();
    match fields[0] {
        FieldValue::Str(s) => assert_eq!(s.len(), MAX_FORMATTED_LENGTH),
        ref other => panic!("expected a string field, got {other:?}"),
    }
}
