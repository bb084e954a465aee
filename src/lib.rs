//! Level-filtered, slot-based structured logging recorder
//!
//! A bounded logging core for embedded and automotive-grade software:
//! no allocation on the record path, no locks held across field
//! appends, and a fixed-layout handle that can cross an ABI boundary.
//!
//! A log statement runs through three operations on the process-wide
//! [`Recorder`]:
//!
//! 1. `start_record` consults the per-context [`LevelPolicy`]; if the
//!    level is disabled it returns `None` at near-zero cost, otherwise
//!    it reserves a [`SlotHandle`] from a fixed pool.
//! 2. `log` appends typed [`FieldValue`]s into the reserved slot,
//!    strictly sequentially, with no synchronization against other
//!    in-flight records.
//! 3. `stop_record` finalizes the record, hands it to the configured
//!    [`RecordSink`] and returns the slot storage to the pool.
//!
//! [`LogStream`] wraps the three steps into a scoped value that stops
//! the record on drop, and the `rec_*` macros add classic formatted
//! logging on top. The [`ffi`] module exports the whole surface over a
//! C ABI for cross-language embedding.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod context;
pub mod ffi;
pub mod field;
pub mod level;
pub mod logger;
pub mod macros;
pub mod policy;
pub mod recorder;
pub mod runtime;
pub mod sink;
pub mod slot;
pub mod stream;

#[cfg(test)]
mod tests;

pub use config::{SLOT_HANDLE_ALIGN, SLOT_HANDLE_SIZE};
pub use context::ContextId;
pub use field::{FieldIter, FieldValue};
pub use level::LogLevel;
pub use logger::{Logger, create_logger};
pub use policy::LevelPolicy;
pub use recorder::Recorder;
pub use runtime::recorder;
pub use sink::{NullSink, RecordSink};
pub use slot::{FinalizedRecord, RecordFlags, SlotHandle};
pub use stream::LogStream;
