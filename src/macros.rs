//! Per-level logging macros
//!
//! The macros gate on the policy before evaluating their format
//! arguments, so a disabled level costs one enabled-check and nothing
//! else. An enabled call formats into a fixed stack buffer and emits
//! the result as a single string field through a scoped stream.
//!
//! ```
//! use slotrec::{rec_info, rec_err};
//!
//! rec_info!("NAV", "position fix acquired");
//! rec_err!("NAV", "sensor {} out of range", 3);
//! ```

use core::cmp::min;
use core::fmt::{self, Write};

use crate::config::MAX_FORMATTED_LENGTH;
use crate::level::LogLevel;
use crate::runtime;
use crate::stream::LogStream;

/// Truncating writer into a fixed byte buffer
struct MessageWriter<'a> {
    buffer: &'a mut [u8],
    pos: usize,
}

impl<'a> MessageWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    fn len(&self) -> usize {
        self.pos
    }
}

impl Write for MessageWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buffer.get_mut(self.pos..).unwrap_or(&mut []);
        let to_copy = min(bytes.len(), remaining.len());

        remaining[..to_copy].copy_from_slice(&bytes[..to_copy]);
        self.pos += to_copy;
        Ok(())
    }
}

/// Implementation behind the `rec_*` macros
///
/// Formats `args` into a stack buffer and emits one string field. The
/// message is cut at the buffer edge; a cut that would split a UTF-8
/// character backs off to the last whole one.
#[doc(hidden)]
pub fn __log_impl(context: &str, level: LogLevel, args: fmt::Arguments<'_>) {
    let mut buffer = [0u8; MAX_FORMATTED_LENGTH];
    let mut writer = MessageWriter::new(&mut buffer);
    let _ = fmt::write(&mut writer, args);
    let len = writer.len();

    let message = match core::str::from_utf8(&buffer[..len]) {
        Ok(s) => s,
        // Truncation can only cut the trailing character.
        Err(e) => {
            // SAFETY: `valid_up_to` marks a verified UTF-8 prefix.
            unsafe { core::str::from_utf8_unchecked(&buffer[..e.valid_up_to()]) }
        }
    };

    let mut stream = LogStream::new(runtime::recorder(), context, level);
    stream.log_str(message);
    // Record is stopped when the stream drops.
}

/// Internal implementation macro with level filtering
///
/// Checks the policy before touching the format arguments, so disabled
/// levels never pay for formatting.
#[macro_export]
macro_rules! __rec_filtered {
    ($context:expr, $level:expr, $args:expr) => {
        if $crate::runtime::recorder().is_enabled($context, $level) {
            $crate::macros::__log_impl($context, $level, $args);
        }
    };
}

/// Records a message at the FATAL level
#[macro_export]
macro_rules! rec_fatal {
    ($context:expr, $($arg:tt)*) => {
        $crate::__rec_filtered!($context, $crate::LogLevel::Fatal, format_args!($($arg)*))
    }
}

/// Records a message at the ERROR level
#[macro_export]
macro_rules! rec_err {
    ($context:expr, $($arg:tt)*) => {
        $crate::__rec_filtered!($context, $crate::LogLevel::Error, format_args!($($arg)*))
    }
}

/// Records a message at the WARN level
#[macro_export]
macro_rules! rec_warn {
    ($context:expr, $($arg:tt)*) => {
        $crate::__rec_filtered!($context, $crate::LogLevel::Warn, format_args!($($arg)*))
    }
}

/// Records a message at the INFO level
#[macro_export]
macro_rules! rec_info {
    ($context:expr, $($arg:tt)*) => {
        $crate::__rec_filtered!($context, $crate::LogLevel::Info, format_args!($($arg)*))
    }
}

/// Records a message at the DEBUG level
#[macro_export]
macro_rules! rec_debug {
    ($context:expr, $($arg:tt)*) => {
        $crate::__rec_filtered!($context, $crate::LogLevel::Debug, format_args!($($arg)*))
    }
}

/// Records a message at the VERBOSE level
#[macro_export]
macro_rules! rec_verbose {
    ($context:expr, $($arg:tt)*) => {
        $crate::__rec_filtered!($context, $crate::LogLevel::Verbose, format_args!($($arg)*))
    }
}
