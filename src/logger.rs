//! Context-bound logger convenience surface
//!
//! A [`Logger`] fixes the context once so call sites only name the
//! level. For foreign callers, [`create_logger`] interns loggers in a
//! fixed-capacity registry: the same context always yields the same
//! stable reference, matching the caching behavior of automotive
//! logging frontends.

use alloc::boxed::Box;

use spin::RwLock;

use crate::config::MAX_CONTEXTS;
use crate::context::ContextId;
use crate::level::LogLevel;
use crate::runtime;
use crate::slot::RecordFlags;
use crate::stream::LogStream;

/// Logger bound to the global recorder and one context
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    context: ContextId,
}

impl Logger {
    /// Creates a logger for `context` (trimmed to the inline limit)
    pub fn new(context: &str) -> Self {
        Self {
            context: ContextId::new(context),
        }
    }

    pub(crate) fn with_context(context: ContextId) -> Self {
        Self { context }
    }

    /// The context this logger records under
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Whether a record at `level` would currently be created
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        runtime::recorder().policy().is_enabled(self.context, level)
    }

    /// The most verbose level currently enabled for this context
    pub fn current_level(&self) -> LogLevel {
        runtime::recorder().policy().current_level(self.context)
    }

    /// Starts a stream at `level`; no-op stream when disabled
    pub fn with_level(&self, level: LogLevel) -> LogStream<'static> {
        let recorder = runtime::recorder();
        let slot = recorder.start_with_id(self.context, level, RecordFlags::empty());
        LogStream::from_handle(recorder, slot)
    }
}

struct Registry {
    entries: [(ContextId, Option<&'static Logger>); MAX_CONTEXTS],
    len: usize,
}

static REGISTRY: RwLock<Registry> = RwLock::new(Registry {
    entries: [(ContextId::EMPTY, None); MAX_CONTEXTS],
    len: 0,
});

/// Logger handed out once the registry is at capacity
///
/// Bound to the empty context, so it follows the default threshold.
static OVERFLOW_LOGGER: Logger = Logger {
    context: ContextId::EMPTY,
};

/// Returns the interned logger for `context`
///
/// The first call for a context leaks one small `Logger` allocation;
/// later calls return the same reference. Once the registry holds
/// [`MAX_CONTEXTS`] distinct contexts, every further context maps to
/// one shared fallback logger bound to the empty context, so calls
/// still return a stable reference and total memory stays bounded.
pub fn create_logger(context: &str) -> &'static Logger {
    let id = ContextId::new(context);

    {
        let registry = REGISTRY.read();
        for (entry_id, logger) in &registry.entries[..registry.len] {
            if *entry_id == id {
                if let Some(logger) = *logger {
                    return logger;
                }
            }
        }
    }

    let mut registry = REGISTRY.write();
    // Another thread may have interned the same context in between.
    for (entry_id, logger) in &registry.entries[..registry.len] {
        if *entry_id == id {
            if let Some(logger) = *logger {
                return logger;
            }
        }
    }
    if registry.len < MAX_CONTEXTS {
        let leaked: &'static Logger = Box::leak(Box::new(Logger::with_context(id)));
        let at = registry.len;
        registry.entries[at] = (id, Some(leaked));
        registry.len += 1;
        return leaked;
    }
    &OVERFLOW_LOGGER
}
