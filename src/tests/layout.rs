// Handle layout contract and the foreign-callable surface.

use core::mem::MaybeUninit;

use super::global_sink;
use crate::config::{SLOT_HANDLE_ALIGN, SLOT_HANDLE_SIZE};
use crate::field::{FieldIter, FieldValue};
use crate::ffi;
use crate::level::LogLevel;
use crate::slot::SlotHandle;

#[test]
fn handle_layout_matches_the_published_contract() {
    assert_eq!(core::mem::size_of::<SlotHandle>(), SLOT_HANDLE_SIZE);
    assert_eq!(core::mem::align_of::<SlotHandle>(), SLOT_HANDLE_ALIGN);
    assert_eq!(ffi::slot_handle_size(), SLOT_HANDLE_SIZE);
    assert_eq!(ffi::slot_handle_alignment(), SLOT_HANDLE_ALIGN);
}

#[test]
fn recorder_surface_works_through_the_c_abi() {
    let sink = global_sink();
    let recorder = ffi::recorder_get();
    assert!(!recorder.is_null());

    let context = b"FFIR";
    let mut storage = MaybeUninit::<SlotHandle>::uninit();

    // SAFETY: valid recorder, context bytes and handle storage.
    unsafe {
        let slot = ffi::recorder_start(
            recorder,
            context.as_ptr().cast(),
            context.len(),
            LogLevel::Info as u8,
            storage.as_mut_ptr(),
        );
        assert!(!slot.is_null());

        let value = 42u32;
        ffi::log_u32(recorder, slot, &raw const value);
        let text = "ok";
        ffi::log_string(recorder, slot, text.as_ptr().cast(), text.len());

        ffi::recorder_stop(recorder, slot);
    }

    let records = sink.for_context("FFIR");
    assert_eq!(records.len(), 1);
    let fields: Vec<FieldValue<'_>> = FieldIter::new(&records[0].payload).collect();
    assert_eq!(fields, [FieldValue::U32(42), FieldValue::Str("ok")]);
}

#[test]
fn rejected_start_returns_null_through_the_c_abi() {
    let recorder = ffi::recorder_get();
    let context = b"FFIX";
    let mut storage = MaybeUninit::<SlotHandle>::uninit();

    // SAFETY: valid recorder, context bytes and handle storage.
    unsafe {
        // Global default is Info: a Verbose record is policy-rejected.
        let slot = ffi::recorder_start(
            recorder,
            context.as_ptr().cast(),
            context.len(),
            LogLevel::Verbose as u8,
            storage.as_mut_ptr(),
        );
        assert!(slot.is_null());

        // Out-of-range level bytes are rejected too.
        let slot = ffi::recorder_start(
            recorder,
            context.as_ptr().cast(),
            context.len(),
            0xFF,
            storage.as_mut_ptr(),
        );
        assert!(slot.is_null());
    }
}

#[test]
fn logger_surface_works_through_the_c_abi() {
    let sink = global_sink();

    // SAFETY: NUL-terminated context, valid logger/stream pointers.
    unsafe {
        let logger = ffi::logger_create(c"FFIL".as_ptr());
        assert!(!logger.is_null());

        // Interning: the same context yields the same pointer.
        assert_eq!(logger, ffi::logger_create(c"FFIL".as_ptr()));

        assert!(ffi::logger_log_level_enabled(logger, LogLevel::Warn as u8));
        assert!(!ffi::logger_log_level_enabled(logger, LogLevel::Verbose as u8));
        assert_eq!(ffi::logger_log_level_current(logger), LogLevel::Info as u8);

        let stream = ffi::logger_log_stream_create(logger, LogLevel::Warn as u8);
        assert!(!stream.is_null());

        let flag = true;
        ffi::log_stream_log_bool(stream, &raw const flag);
        let value = 0xBEEFu16;
        ffi::log_stream_log_hex16(stream, &raw const value);
        ffi::log_stream_destroy(stream);
    }

    let records = sink.for_context("FFIL");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Warn);
    let fields: Vec<FieldValue<'_>> = FieldIter::new(&records[0].payload).collect();
    assert_eq!(fields, [FieldValue::Bool(true), FieldValue::Hex16(0xBEEF)]);
}
