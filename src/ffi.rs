//! Foreign-callable surface
//!
//! C ABI exports for cross-language embedding. The handle crosses the
//! boundary as opaque caller-provided storage of
//! [`slot_handle_size`]/[`slot_handle_alignment`] bytes; the recorder
//! placement-constructs into it and reads it back at stop.
//!
//! Error posture: null pointers and out-of-range level bytes degrade to
//! a no-op (or a null return) instead of crashing the caller. Handle
//! misuse (stale storage, wrong alignment) is a programmer error and is
//! only checked by debug assertions.

use core::ffi::{CStr, c_char};

use alloc::boxed::Box;

use crate::config::{SLOT_HANDLE_ALIGN, SLOT_HANDLE_SIZE};
use crate::context::ContextId;
use crate::field::FieldValue;
use crate::level::LogLevel;
use crate::logger::{Logger, create_logger};
use crate::recorder::Recorder;
use crate::runtime;
use crate::slot::{RecordFlags, SlotHandle};
use crate::stream::LogStream;

/// Size in bytes a foreign caller must reserve for a slot handle
#[unsafe(no_mangle)]
pub extern "C" fn slot_handle_size() -> usize {
    SLOT_HANDLE_SIZE
}

/// Alignment in bytes a foreign caller must give slot handle storage
#[unsafe(no_mangle)]
pub extern "C" fn slot_handle_alignment() -> usize {
    SLOT_HANDLE_ALIGN
}

/// Returns the process-wide recorder
#[unsafe(no_mangle)]
pub extern "C" fn recorder_get() -> *const Recorder {
    runtime::recorder()
}

/// Builds a context id from foreign bytes, flagging trimming
unsafe fn context_from_raw(context: *const c_char, context_len: usize) -> (ContextId, RecordFlags) {
    if context.is_null() || context_len == 0 {
        return (ContextId::EMPTY, RecordFlags::empty());
    }
    // SAFETY: caller guarantees `context` points at `context_len`
    // readable bytes.
    let bytes = unsafe { core::slice::from_raw_parts(context.cast::<u8>(), context_len) };
    let id = ContextId::from_bytes(bytes);
    let flags = if id.len() == bytes.len() {
        RecordFlags::empty()
    } else {
        RecordFlags::CONTEXT_TRIMMED
    };
    (id, flags)
}

/// Starts a record, constructing the handle into `slot`
///
/// Returns `slot` on success or null when the record was not created
/// (level disabled, pool exhausted, or invalid arguments). On success
/// the caller owns one in-flight record and must pass the same storage
/// to [`recorder_stop`] exactly once.
///
/// # Safety
///
/// `recorder` must come from [`recorder_get`]. `context` must point at
/// `context_len` readable bytes (it may be null only when `context_len`
/// is 0). `slot` must point at storage of at least
/// [`slot_handle_size`] bytes aligned to [`slot_handle_alignment`],
/// valid until the record is stopped.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn recorder_start(
    recorder: *const Recorder,
    context: *const c_char,
    context_len: usize,
    level: u8,
    slot: *mut SlotHandle,
) -> *mut SlotHandle {
    if recorder.is_null() || slot.is_null() {
        return core::ptr::null_mut();
    }
    let Some(level) = LogLevel::from_u8(level) else {
        return core::ptr::null_mut();
    };
    debug_assert!(
        slot as usize % SLOT_HANDLE_ALIGN == 0,
        "slot storage is misaligned"
    );

    // SAFETY: pointers checked above, contracts per function docs.
    unsafe {
        let (id, flags) = context_from_raw(context, context_len);
        match (*recorder).start_with_id(id, level, flags) {
            Some(handle) => {
                slot.write(handle);
                slot
            }
            None => core::ptr::null_mut(),
        }
    }
}

/// Stops the record behind `slot` and releases its storage for reuse
///
/// # Safety
///
/// `recorder` must come from [`recorder_get`]; `slot` must hold a
/// handle produced by a successful [`recorder_start`] on the same
/// recorder and not yet stopped. The storage holds no live handle
/// afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn recorder_stop(recorder: *const Recorder, slot: *mut SlotHandle) {
    if recorder.is_null() || slot.is_null() {
        return;
    }
    // SAFETY: per function contract, `slot` holds a live handle.
    unsafe {
        let handle = slot.read();
        (*recorder).stop_record(handle);
    }
}

/// Returns the most verbose level currently enabled for a context
///
/// # Safety
///
/// `recorder` must come from [`recorder_get`]; `context` must point at
/// `context_len` readable bytes (null allowed only with length 0).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn recorder_log_level(
    recorder: *const Recorder,
    context: *const c_char,
    context_len: usize,
) -> u8 {
    if recorder.is_null() {
        return LogLevel::Off as u8;
    }
    // SAFETY: pointer contracts per function docs.
    unsafe {
        let (id, _) = context_from_raw(context, context_len);
        (*recorder).policy().current_level(id) as u8
    }
}

/// Defines one per-kind append export taking the value by pointer
macro_rules! ffi_log_value {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $variant:ident) => {
        $(#[$doc])*
        ///
        /// # Safety
        ///
        /// `recorder` must come from [`recorder_get`]; `slot` must hold
        /// a live handle from [`recorder_start`] on the same recorder;
        /// `value` must point at a readable value of the right type.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(
            recorder: *const Recorder,
            slot: *const SlotHandle,
            value: *const $ty,
        ) {
            if recorder.is_null() || slot.is_null() || value.is_null() {
                return;
            }
            // SAFETY: pointer contracts per function docs.
            unsafe {
                (*recorder).log(&*slot, FieldValue::$variant(value.read()));
            }
        }
    };
}

ffi_log_value!(
    /// Appends a boolean field to an in-flight record
    log_bool, bool, Bool
);
ffi_log_value!(
    /// Appends a 32-bit float field to an in-flight record
    log_f32, f32, F32
);
ffi_log_value!(
    /// Appends a 64-bit float field to an in-flight record
    log_f64, f64, F64
);
ffi_log_value!(
    /// Appends a signed 8-bit field to an in-flight record
    log_i8, i8, I8
);
ffi_log_value!(
    /// Appends a signed 16-bit field to an in-flight record
    log_i16, i16, I16
);
ffi_log_value!(
    /// Appends a signed 32-bit field to an in-flight record
    log_i32, i32, I32
);
ffi_log_value!(
    /// Appends a signed 64-bit field to an in-flight record
    log_i64, i64, I64
);
ffi_log_value!(
    /// Appends an unsigned 8-bit field to an in-flight record
    log_u8, u8, U8
);
ffi_log_value!(
    /// Appends an unsigned 16-bit field to an in-flight record
    log_u16, u16, U16
);
ffi_log_value!(
    /// Appends an unsigned 32-bit field to an in-flight record
    log_u32, u32, U32
);
ffi_log_value!(
    /// Appends an unsigned 64-bit field to an in-flight record
    log_u64, u64, U64
);
ffi_log_value!(
    /// Appends an 8-bit binary-display field to an in-flight record
    log_bin8, u8, Bin8
);
ffi_log_value!(
    /// Appends a 16-bit binary-display field to an in-flight record
    log_bin16, u16, Bin16
);
ffi_log_value!(
    /// Appends a 32-bit binary-display field to an in-flight record
    log_bin32, u32, Bin32
);
ffi_log_value!(
    /// Appends a 64-bit binary-display field to an in-flight record
    log_bin64, u64, Bin64
);
ffi_log_value!(
    /// Appends an 8-bit hex-display field to an in-flight record
    log_hex8, u8, Hex8
);
ffi_log_value!(
    /// Appends a 16-bit hex-display field to an in-flight record
    log_hex16, u16, Hex16
);
ffi_log_value!(
    /// Appends a 32-bit hex-display field to an in-flight record
    log_hex32, u32, Hex32
);
ffi_log_value!(
    /// Appends a 64-bit hex-display field to an in-flight record
    log_hex64, u64, Hex64
);

/// Appends a string field (explicit length, not NUL-terminated)
///
/// Bytes that are not valid UTF-8 cause the field to be skipped.
///
/// # Safety
///
/// `recorder` must come from [`recorder_get`]; `slot` must hold a live
/// handle from [`recorder_start`] on the same recorder; `value` must
/// point at `size` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn log_string(
    recorder: *const Recorder,
    slot: *const SlotHandle,
    value: *const c_char,
    size: usize,
) {
    if recorder.is_null() || slot.is_null() || value.is_null() {
        return;
    }
    // SAFETY: pointer contracts per function docs.
    unsafe {
        let bytes = core::slice::from_raw_parts(value.cast::<u8>(), size);
        if let Ok(s) = core::str::from_utf8(bytes) {
            (*recorder).log(&*slot, FieldValue::Str(s));
        }
    }
}

/// Returns the interned logger for a NUL-terminated context string
///
/// The same context always yields the same pointer; it stays valid for
/// the process lifetime and must not be freed. Once the registry holds
/// its fixed capacity of distinct contexts, every further context maps
/// to one shared fallback logger bound to the empty context.
///
/// # Safety
///
/// `context` must be null or point at a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logger_create(context: *const c_char) -> *const Logger {
    if context.is_null() {
        return core::ptr::null();
    }
    // SAFETY: caller guarantees a NUL-terminated string.
    let bytes = unsafe { CStr::from_ptr(context) }.to_bytes();
    let id = ContextId::from_bytes(bytes);
    create_logger(id.as_str())
}

/// Whether the logger's context currently records at `level`
///
/// # Safety
///
/// `logger` must come from [`logger_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logger_log_level_enabled(logger: *const Logger, level: u8) -> bool {
    if logger.is_null() {
        return false;
    }
    let Some(level) = LogLevel::from_u8(level) else {
        return false;
    };
    // SAFETY: `logger` is a valid interned logger per contract.
    unsafe { (*logger).is_enabled(level) }
}

/// The most verbose level currently enabled for the logger's context
///
/// # Safety
///
/// `logger` must come from [`logger_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logger_log_level_current(logger: *const Logger) -> u8 {
    if logger.is_null() {
        return LogLevel::Off as u8;
    }
    // SAFETY: `logger` is a valid interned logger per contract.
    unsafe { (*logger).current_level() as u8 }
}

/// Starts a stream at `level`; returns an owned stream pointer
///
/// The stream must be handed back to [`log_stream_destroy`], which
/// flushes and releases the underlying record. Invalid levels yield a
/// null stream.
///
/// # Safety
///
/// `logger` must come from [`logger_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn logger_log_stream_create(
    logger: *const Logger,
    level: u8,
) -> *mut LogStream<'static> {
    if logger.is_null() {
        return core::ptr::null_mut();
    }
    let Some(level) = LogLevel::from_u8(level) else {
        return core::ptr::null_mut();
    };
    // SAFETY: `logger` is a valid interned logger per contract.
    let stream = unsafe { (*logger).with_level(level) };
    Box::into_raw(Box::new(stream))
}

/// Destroys a stream, stopping its record
///
/// # Safety
///
/// `log_stream` must come from [`logger_log_stream_create`] and must
/// not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn log_stream_destroy(log_stream: *mut LogStream<'static>) {
    if log_stream.is_null() {
        return;
    }
    // SAFETY: ownership is transferred back per function contract.
    drop(unsafe { Box::from_raw(log_stream) });
}

/// Defines one per-kind append export on a stream
macro_rules! ffi_stream_log_value {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $method:ident) => {
        $(#[$doc])*
        ///
        /// # Safety
        ///
        /// `log_stream` must come from [`logger_log_stream_create`] and
        /// not yet be destroyed; `value` must point at a readable value
        /// of the right type.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn $name(log_stream: *mut LogStream<'static>, value: *const $ty) {
            if log_stream.is_null() || value.is_null() {
                return;
            }
            // SAFETY: pointer contracts per function docs.
            unsafe {
                (*log_stream).$method(value.read());
            }
        }
    };
}

ffi_stream_log_value!(
    /// Appends a boolean field to a stream
    log_stream_log_bool, bool, log_bool
);
ffi_stream_log_value!(
    /// Appends a 32-bit float field to a stream
    log_stream_log_f32, f32, log_f32
);
ffi_stream_log_value!(
    /// Appends a 64-bit float field to a stream
    log_stream_log_f64, f64, log_f64
);
ffi_stream_log_value!(
    /// Appends a signed 8-bit field to a stream
    log_stream_log_i8, i8, log_i8
);
ffi_stream_log_value!(
    /// Appends a signed 16-bit field to a stream
    log_stream_log_i16, i16, log_i16
);
ffi_stream_log_value!(
    /// Appends a signed 32-bit field to a stream
    log_stream_log_i32, i32, log_i32
);
ffi_stream_log_value!(
    /// Appends a signed 64-bit field to a stream
    log_stream_log_i64, i64, log_i64
);
ffi_stream_log_value!(
    /// Appends an unsigned 8-bit field to a stream
    log_stream_log_u8, u8, log_u8
);
ffi_stream_log_value!(
    /// Appends an unsigned 16-bit field to a stream
    log_stream_log_u16, u16, log_u16
);
ffi_stream_log_value!(
    /// Appends an unsigned 32-bit field to a stream
    log_stream_log_u32, u32, log_u32
);
ffi_stream_log_value!(
    /// Appends an unsigned 64-bit field to a stream
    log_stream_log_u64, u64, log_u64
);
ffi_stream_log_value!(
    /// Appends an 8-bit binary-display field to a stream
    log_stream_log_bin8, u8, log_bin8
);
ffi_stream_log_value!(
    /// Appends a 16-bit binary-display field to a stream
    log_stream_log_bin16, u16, log_bin16
);
ffi_stream_log_value!(
    /// Appends a 32-bit binary-display field to a stream
    log_stream_log_bin32, u32, log_bin32
);
ffi_stream_log_value!(
    /// Appends a 64-bit binary-display field to a stream
    log_stream_log_bin64, u64, log_bin64
);
ffi_stream_log_value!(
    /// Appends an 8-bit hex-display field to a stream
    log_stream_log_hex8, u8, log_hex8
);
ffi_stream_log_value!(
    /// Appends a 16-bit hex-display field to a stream
    log_stream_log_hex16, u16, log_hex16
);
ffi_stream_log_value!(
    /// Appends a 32-bit hex-display field to a stream
    log_stream_log_hex32, u32, log_hex32
);
ffi_stream_log_value!(
    /// Appends a 64-bit hex-display field to a stream
    log_stream_log_hex64, u64, log_hex64
);

/// Appends a string field to a stream (explicit length, not
/// NUL-terminated)
///
/// Bytes that are not valid UTF-8 cause the field to be skipped.
///
/// # Safety
///
/// `log_stream` must come from [`logger_log_stream_create`] and not yet
/// be destroyed; `value` must point at `size` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn log_stream_log_string(
    log_stream: *mut LogStream<'static>,
    value: *const c_char,
    size: usize,
) {
    if log_stream.is_null() || value.is_null() {
        return;
    }
    // SAFETY: pointer contracts per function docs.
    unsafe {
        let bytes = core::slice::from_raw_parts(value.cast::<u8>(), size);
        if let Ok(s) = core::str::from_utf8(bytes) {
            (*log_stream).log_str(s);
        }
    }
}
