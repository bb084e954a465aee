//! Slot handles and the fixed record storage behind them
//!
//! A [`SlotHandle`] is the caller-facing side: a plain fixed-layout
//! value naming one in-flight record. A [`RecordSlot`] is the pool-side
//! storage the handle points into. The handle layout (24 bytes, 8-byte
//! aligned) is part of the cross-language contract and is asserted at
//! compile time.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use bitflags::bitflags;

use crate::config::{MAX_RECORD_PAYLOAD, SLOT_HANDLE_ALIGN, SLOT_HANDLE_SIZE};
use crate::context::ContextId;
use crate::field::{FieldIter, FieldValue};
use crate::level::LogLevel;

bitflags! {
    /// Degradations recorded while a record was being built
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RecordFlags: u8 {
        /// At least one field was dropped because it did not fit
        const TRUNCATED = 1 << 0;
        /// The context identifier was longer than the inline limit
        const CONTEXT_TRIMMED = 1 << 1;
    }
}

/// Handle to one in-flight record
///
/// Valid only between a successful `start_record` and the matching
/// `stop_record`. The recorder hands it out by value and takes it back
/// by value, so safe Rust cannot stop a record twice or append after
/// stop. Foreign callers see only the size/alignment contract plus
/// opaque storage they allocate themselves.
#[repr(C, align(8))]
#[derive(Debug)]
pub struct SlotHandle {
    index: u64,
    generation: u64,
    owner: u64,
}

const _: () = assert!(core::mem::size_of::<SlotHandle>() == SLOT_HANDLE_SIZE);
const _: () = assert!(core::mem::align_of::<SlotHandle>() == SLOT_HANDLE_ALIGN);

impl SlotHandle {
    pub(crate) fn new(index: usize, generation: u64, owner: usize) -> Self {
        Self {
            index: index as u64,
            generation,
            owner: owner as u64,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index as usize
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn owner(&self) -> usize {
        self.owner as usize
    }
}

const STATE_FREE: u8 = 0;
const STATE_ACTIVE: u8 = 1;

/// Mutable body of a slot, only touched by the single active writer
struct RecordData {
    context: ContextId,
    level: LogLevel,
    flags: RecordFlags,
    len: usize,
    payload: [u8; MAX_RECORD_PAYLOAD],
}

/// One entry of the recorder's slot pool
///
/// The `state` atomic is the ownership token: a successful CAS from
/// `FREE` to `ACTIVE` (Acquire) grants exclusive access to `data` until
/// the matching Release store back to `FREE`. `generation` counts
/// acquisitions so stale handles can be detected in debug builds.
pub(crate) struct RecordSlot {
    state: AtomicU8,
    generation: AtomicU64,
    data: UnsafeCell<RecordData>,
}

// SAFETY: `data` is only accessed by the thread that won the FREE ->
// ACTIVE CAS, until it releases the slot again. All cross-thread state
// lives in atomics.
unsafe impl Sync for RecordSlot {}

impl RecordSlot {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_FREE),
            generation: AtomicU64::new(0),
            data: UnsafeCell::new(RecordData {
                context: ContextId::EMPTY,
                level: LogLevel::Off,
                flags: RecordFlags::empty(),
                len: 0,
                payload: [0; MAX_RECORD_PAYLOAD],
            }),
        }
    }

    /// Tries to reserve the slot, returning its new generation
    pub(crate) fn try_acquire(&self) -> Option<u64> {
        self.state
            .compare_exchange(STATE_FREE, STATE_ACTIVE, Ordering::Acquire, Ordering::Relaxed)
            .ok()?;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        Some(generation)
    }

    /// Binds a freshly acquired slot to a record
    ///
    /// Must only be called by the thread that won [`Self::try_acquire`].
    pub(crate) fn begin(&self, context: ContextId, level: LogLevel, flags: RecordFlags) {
        // SAFETY: the caller holds the slot exclusively (see type docs).
        let data = unsafe { &mut *self.data.get() };
        data.context = context;
        data.level = level;
        data.flags = flags;
        data.len = 0;
        // Wipe the payload so a reused slot never leaks bytes of the
        // previous record through the finalized view.
        data.payload = [0; MAX_RECORD_PAYLOAD];
    }

    /// Appends one encoded field to the record
    ///
    /// A field that does not fit the remaining payload is dropped whole
    /// and the record is marked [`RecordFlags::TRUNCATED`], keeping the
    /// already-encoded fields decodable.
    pub(crate) fn append(&self, value: &FieldValue<'_>) {
        // SAFETY: the caller holds the slot exclusively (see type docs).
        let data = unsafe { &mut *self.data.get() };
        match value.encode_into(&mut data.payload[data.len..]) {
            Some(written) => data.len += written,
            None => data.flags |= RecordFlags::TRUNCATED,
        }
    }

    /// Borrowed view of the finished record, for the sink hand-off
    pub(crate) fn finalized(&self) -> FinalizedRecord<'_> {
        // SAFETY: the caller holds the slot exclusively (see type docs).
        let data = unsafe { &*self.data.get() };
        FinalizedRecord {
            context: data.context,
            level: data.level,
            flags: data.flags,
            payload: &data.payload[..data.len],
        }
    }

    /// Returns the slot's storage to the pool
    pub(crate) fn release(&self) {
        self.state.store(STATE_FREE, Ordering::Release);
    }

    /// Whether the slot is currently reserved
    pub(crate) fn is_active(&self) -> bool {
        self.state.load(Ordering::Relaxed) == STATE_ACTIVE
    }

    /// Debug check that `handle` names this slot's live reservation
    pub(crate) fn matches(&self, handle: &SlotHandle) -> bool {
        self.state.load(Ordering::Acquire) == STATE_ACTIVE
            && self.generation.load(Ordering::Relaxed) == handle.generation()
    }
}

/// Read-only view of a completed record, handed to the sink at stop
#[derive(Debug, Clone, Copy)]
pub struct FinalizedRecord<'a> {
    context: ContextId,
    level: LogLevel,
    flags: RecordFlags,
    payload: &'a [u8],
}

impl<'a> FinalizedRecord<'a> {
    /// The context the record was started for
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// The severity the record was started at
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Degradations that occurred while building the record
    pub fn flags(&self) -> RecordFlags {
        self.flags
    }

    /// The raw encoded field bytes
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Iterates the typed fields in append order
    pub fn fields(&self) -> FieldIter<'a> {
        FieldIter::new(self.payload)
    }
}
