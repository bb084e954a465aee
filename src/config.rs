//! Compile-time sizing of the recorder

/// Number of record slots in the pool
///
/// One slot is held per in-flight log statement, so this bounds the
/// number of log statements that can be open concurrently.
pub const MAX_RECORD_SLOTS: usize = 32;

/// Payload area of a single record, in bytes
pub const MAX_RECORD_PAYLOAD: usize = 256;

/// Maximum length of a context identifier, in bytes
///
/// DLT-style four character contexts. Longer inputs are trimmed.
pub const MAX_CONTEXT_LENGTH: usize = 4;

/// Number of per-context level overrides the policy can hold
pub const MAX_CONTEXTS: usize = 64;

/// Stack buffer used by the formatting macros
pub const MAX_FORMATTED_LENGTH: usize = 192;

/// Default log level for contexts without an override
pub const DEFAULT_LOG_LEVEL: crate::level::LogLevel = crate::level::LogLevel::Info;

/// Size of [`crate::slot::SlotHandle`] in bytes
///
/// Part of the cross-language contract: foreign callers allocate this
/// many bytes for the recorder to construct the handle into.
pub const SLOT_HANDLE_SIZE: usize = 24;

/// Alignment of [`crate::slot::SlotHandle`] in bytes
pub const SLOT_HANDLE_ALIGN: usize = 8;
