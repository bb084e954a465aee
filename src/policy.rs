//! Per-context log level policy
//!
//! The policy gates every `start_record` call: a record is only created
//! when the requested level passes the threshold configured for its
//! context. The threshold is the most verbose level still allowed, so
//! configuring `Warn` lets `Fatal`, `Error` and `Warn` through.
//!
//! The default threshold lives in a single atomic and covers every
//! context without an override. Overrides sit in a fixed-capacity table
//! behind a read-write spin lock: queries take the read side and never
//! block each other, updates take the write side and are never observed
//! half-applied.

use core::sync::atomic::{AtomicU8, Ordering};

use spin::RwLock;

use crate::config::{DEFAULT_LOG_LEVEL, MAX_CONTEXTS};
use crate::context::ContextId;
use crate::level::LogLevel;

/// Fixed-capacity override table
struct OverrideTable {
    entries: [(ContextId, u8); MAX_CONTEXTS],
    len: usize,
}

impl OverrideTable {
    const fn new() -> Self {
        Self {
            entries: [(ContextId::EMPTY, 0); MAX_CONTEXTS],
            len: 0,
        }
    }

    fn find(&self, context: ContextId) -> Option<usize> {
        self.entries[..self.len].iter().position(|(id, _)| *id == context)
    }
}

/// Maps contexts to their enabled severity threshold
pub struct LevelPolicy {
    default_level: AtomicU8,
    overrides: RwLock<OverrideTable>,
}

impl LevelPolicy {
    /// Creates a policy where every context uses
    /// [`DEFAULT_LOG_LEVEL`](crate::config::DEFAULT_LOG_LEVEL)
    pub const fn new() -> Self {
        Self::with_default(DEFAULT_LOG_LEVEL)
    }

    /// Creates a policy with a custom default threshold
    pub const fn with_default(default_level: LogLevel) -> Self {
        Self {
            default_level: AtomicU8::new(default_level as u8),
            overrides: RwLock::new(OverrideTable::new()),
        }
    }

    /// Whether a record at `level` would be created for `context`
    ///
    /// This is the hot-path query: one atomic load plus a read-locked
    /// scan of the (small, fixed) override table.
    #[inline]
    pub fn is_enabled(&self, context: ContextId, level: LogLevel) -> bool {
        self.threshold(context).permits(level)
    }

    /// The most verbose level currently enabled for `context`
    ///
    /// Scans from `Verbose` down to `Fatal` and returns the first level
    /// that [`Self::is_enabled`] reports true for; `Off` is never
    /// probed and is only the fallback when nothing is enabled.
    /// Diagnostics only, not meant for the logging path.
    pub fn current_level(&self, context: ContextId) -> LogLevel {
        let mut raw = LogLevel::Verbose as u8;
        while raw > LogLevel::Off as u8 {
            // from_u8 cannot fail inside the scan range
            if let Some(level) = LogLevel::from_u8(raw) {
                if self.is_enabled(context, level) {
                    return level;
                }
            }
            raw -= 1;
        }
        LogLevel::Off
    }

    /// Sets the default threshold used by contexts without an override
    pub fn set_default_level(&self, level: LogLevel) {
        self.default_level.store(level as u8, Ordering::Release);
    }

    /// Gets the default threshold
    pub fn default_level(&self) -> LogLevel {
        let raw = self.default_level.load(Ordering::Acquire);
        LogLevel::from_u8(raw).unwrap_or(LogLevel::Off)
    }

    /// Sets the threshold for one context
    ///
    /// Silently ignored when the override table is full; the context
    /// then keeps following the default threshold.
    pub fn set_context_level(&self, context: ContextId, level: LogLevel) {
        let mut table = self.overrides.write();
        if let Some(i) = table.find(context) {
            table.entries[i].1 = level as u8;
        } else if table.len < MAX_CONTEXTS {
            let at = table.len;
            table.entries[at] = (context, level as u8);
            table.len += 1;
        }
    }

    /// Removes the override for one context, reverting it to the default
    pub fn reset_context_level(&self, context: ContextId) {
        let mut table = self.overrides.write();
        if let Some(i) = table.find(context) {
            table.entries[i] = table.entries[table.len - 1];
            table.len -= 1;
        }
    }

    #[inline]
    fn threshold(&self, context: ContextId) -> LogLevel {
        let table = self.overrides.read();
        let raw = match table.find(context) {
            Some(i) => table.entries[i].1,
            None => self.default_level.load(Ordering::Relaxed),
        };
        LogLevel::from_u8(raw).unwrap_or(LogLevel::Off)
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::new()
    }
}
