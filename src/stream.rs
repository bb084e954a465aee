//! Scoped log stream
//!
//! [`LogStream`] bundles a recorder reference with one acquired slot
//! and stops the record exactly once when it goes out of scope, on
//! every exit path. When acquisition failed (level disabled or pool
//! exhausted) the stream exists in a no-op state and every append is
//! skipped without the call site needing its own branch.

use crate::field::FieldValue;
use crate::level::LogLevel;
use crate::recorder::Recorder;
use crate::slot::SlotHandle;

/// Fluent, sequential writer over one in-flight record
pub struct LogStream<'a> {
    recorder: &'a Recorder,
    slot: Option<SlotHandle>,
}

impl<'a> LogStream<'a> {
    /// Starts a record and wraps it; no-op stream if nothing was
    /// acquired
    pub fn new(recorder: &'a Recorder, context: &str, level: LogLevel) -> Self {
        let slot = recorder.start_record(context, level);
        Self { recorder, slot }
    }

    pub(crate) fn from_handle(recorder: &'a Recorder, slot: Option<SlotHandle>) -> Self {
        Self { recorder, slot }
    }

    /// Whether a slot was actually acquired
    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    /// Appends one typed field
    pub fn field(&mut self, value: FieldValue<'_>) -> &mut Self {
        if let Some(handle) = &self.slot {
            self.recorder.log(handle, value);
        }
        self
    }

    /// Appends a boolean field
    pub fn log_bool(&mut self, v: bool) -> &mut Self {
        self.field(FieldValue::Bool(v))
    }

    /// Appends a 32-bit float field
    pub fn log_f32(&mut self, v: f32) -> &mut Self {
        self.field(FieldValue::F32(v))
    }

    /// Appends a 64-bit float field
    pub fn log_f64(&mut self, v: f64) -> &mut Self {
        self.field(FieldValue::F64(v))
    }

    /// Appends a string field
    pub fn log_str(&mut self, v: &str) -> &mut Self {
        self.field(FieldValue::Str(v))
    }

    /// Appends a signed 8-bit field
    pub fn log_i8(&mut self, v: i8) -> &mut Self {
        self.field(FieldValue::I8(v))
    }

    /// Appends a signed 16-bit field
    pub fn log_i16(&mut self, v: i16) -> &mut Self {
        self.field(FieldValue::I16(v))
    }

    /// Appends a signed 32-bit field
    pub fn log_i32(&mut self, v: i32) -> &mut Self {
        self.field(FieldValue::I32(v))
    }

    /// Appends a signed 64-bit field
    pub fn log_i64(&mut self, v: i64) -> &mut Self {
        self.field(FieldValue::I64(v))
    }

    /// Appends an unsigned 8-bit field
    pub fn log_u8(&mut self, v: u8) -> &mut Self {
        self.field(FieldValue::U8(v))
    }

    /// Appends an unsigned 16-bit field
    pub fn log_u16(&mut self, v: u16) -> &mut Self {
        self.field(FieldValue::U16(v))
    }

    /// Appends an unsigned 32-bit field
    pub fn log_u32(&mut self, v: u32) -> &mut Self {
        self.field(FieldValue::U32(v))
    }

    /// Appends an unsigned 64-bit field
    pub fn log_u64(&mut self, v: u64) -> &mut Self {
        self.field(FieldValue::U64(v))
    }

    /// Appends an 8-bit field displayed in binary radix
    pub fn log_bin8(&mut self, v: u8) -> &mut Self {
        self.field(FieldValue::Bin8(v))
    }

    /// Appends a 16-bit field displayed in binary radix
    pub fn log_bin16(&mut self, v: u16) -> &mut Self {
        self.field(FieldValue::Bin16(v))
    }

    /// Appends a 32-bit field displayed in binary radix
    pub fn log_bin32(&mut self, v: u32) -> &mut Self {
        self.field(FieldValue::Bin32(v))
    }

    /// Appends a 64-bit field displayed in binary radix
    pub fn log_bin64(&mut self, v: u64) -> &mut Self {
        self.field(FieldValue::Bin64(v))
    }

    /// Appends an 8-bit field displayed in hex radix
    pub fn log_hex8(&mut self, v: u8) -> &mut Self {
        self.field(FieldValue::Hex8(v))
    }

    /// Appends a 16-bit field displayed in hex radix
    pub fn log_hex16(&mut self, v: u16) -> &mut Self {
        self.field(FieldValue::Hex16(v))
    }

    /// Appends a 32-bit field displayed in hex radix
    pub fn log_hex32(&mut self, v: u32) -> &mut Self {
        self.field(FieldValue::Hex32(v))
    }

    /// Appends a 64-bit field displayed in hex radix
    pub fn log_hex64(&mut self, v: u64) -> &mut Self {
        self.field(FieldValue::Hex64(v))
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.slot.take() {
            self.recorder.stop_record(handle);
        }
    }
}
