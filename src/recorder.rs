//! Recorder: slot pool plus level policy
//!
//! The recorder is the single entry point for building records. It owns
//! a fixed pool of [`RecordSlot`]s and the [`LevelPolicy`] that gates
//! record creation, and it is safe to share across any number of
//! threads: pool reservation and release are CAS-based, and field
//! appends touch only the caller's own reserved slot.
//!
//! Pool exhaustion rejects the record (`start_record` returns `None`)
//! rather than blocking or evicting: a logging call must never stall
//! the caller's workload.

use core::sync::atomic::{AtomicUsize, Ordering};

use spin::RwLock;

use crate::config::{MAX_CONTEXT_LENGTH, MAX_RECORD_SLOTS};
use crate::context::ContextId;
use crate::field::FieldValue;
use crate::level::LogLevel;
use crate::policy::LevelPolicy;
use crate::sink::{NullSink, RecordSink};
use crate::slot::{RecordFlags, RecordSlot, SlotHandle};

const NULL_SINK: &dyn RecordSink = &NullSink;

/// Process-scoped logging recorder
///
/// Usually accessed through [`crate::runtime::recorder`], but fully
/// functional as an independent instance, which is how the tests use
/// it.
pub struct Recorder {
    policy: LevelPolicy,
    slots: [RecordSlot; MAX_RECORD_SLOTS],
    sink: RwLock<&'static dyn RecordSink>,
    rejected: AtomicUsize,
}

impl Recorder {
    /// Creates a recorder with an empty pool and the default policy
    ///
    /// `const fn`, so instances can live in statics without runtime
    /// initialization.
    pub const fn new() -> Self {
        const EMPTY: RecordSlot = RecordSlot::new();
        Self {
            policy: LevelPolicy::new(),
            slots: [EMPTY; MAX_RECORD_SLOTS],
            sink: RwLock::new(NULL_SINK),
            rejected: AtomicUsize::new(0),
        }
    }

    /// The level policy gating this recorder
    pub fn policy(&self) -> &LevelPolicy {
        &self.policy
    }

    /// Installs the drain that receives finalized records
    pub fn set_sink(&self, sink: &'static dyn RecordSink) {
        *self.sink.write() = sink;
    }

    /// Starts a record for `context` at `level`
    ///
    /// Returns `None` without reserving anything when the policy has
    /// the level disabled (the dominant fast path), when `level` is
    /// `Off`, or when every slot is in flight. Callers cannot tell the
    /// reasons apart; all of them mean "do not log this".
    pub fn start_record(&self, context: &str, level: LogLevel) -> Option<SlotHandle> {
        let id = ContextId::new(context);
        let mut flags = RecordFlags::empty();
        if context.len() > MAX_CONTEXT_LENGTH {
            flags |= RecordFlags::CONTEXT_TRIMMED;
        }
        self.start_with_id(id, level, flags)
    }

    pub(crate) fn start_with_id(
        &self,
        context: ContextId,
        level: LogLevel,
        flags: RecordFlags,
    ) -> Option<SlotHandle> {
        // `Off` is not a recordable severity, whatever the policy says.
        if level == LogLevel::Off || !self.policy.is_enabled(context, level) {
            return None;
        }

        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(generation) = slot.try_acquire() {
                slot.begin(context, level, flags);
                return Some(SlotHandle::new(index, generation, self as *const Self as usize));
            }
        }

        self.rejected.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Appends one field to the record behind `handle`
    ///
    /// Strictly sequential, single writer per slot; needs no
    /// synchronization against other in-flight records.
    #[inline]
    pub fn log(&self, handle: &SlotHandle, value: FieldValue<'_>) {
        let Some(slot) = self.slot_for(handle) else {
            return;
        };
        debug_assert!(slot.matches(handle), "append to a stale or stopped slot");
        slot.append(&value);
    }

    /// Finalizes the record and returns its slot to the pool
    ///
    /// Consumes the handle: stopping twice or appending afterwards is
    /// unrepresentable in safe Rust. The finalized record is pushed to
    /// the sink before the storage becomes reusable.
    pub fn stop_record(&self, handle: SlotHandle) {
        let Some(slot) = self.slot_for(&handle) else {
            return;
        };
        debug_assert!(slot.matches(&handle), "stop of a stale or stopped slot");
        self.sink.read().consume(&slot.finalized());
        slot.release();
    }

    /// Whether a record at `level` would currently be created
    #[inline]
    pub fn is_enabled(&self, context: &str, level: LogLevel) -> bool {
        self.policy.is_enabled(ContextId::new(context), level)
    }

    /// The most verbose level currently enabled for `context`
    pub fn current_level(&self, context: &str) -> LogLevel {
        self.policy.current_level(ContextId::new(context))
    }

    /// Number of slots currently reserved (diagnostics)
    pub fn active_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    /// Number of records rejected due to pool exhaustion (diagnostics)
    pub fn rejected_count(&self) -> usize {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Resolves a handle to its slot, ignoring handles of other
    /// recorder instances
    #[inline]
    fn slot_for(&self, handle: &SlotHandle) -> Option<&RecordSlot> {
        debug_assert!(
            handle.owner() == self as *const Self as usize,
            "handle used with a different recorder"
        );
        if handle.owner() != self as *const Self as usize {
            return None;
        }
        self.slots.get(handle.index())
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}
