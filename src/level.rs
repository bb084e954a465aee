//! Log severity levels

/// Severity of a log record
///
/// Values are ordered from least to most verbose. A smaller value means
/// a more severe message: enabling a level also enables every level with
/// a smaller value (except [`LogLevel::Off`], which is handled apart
/// from the ordinary ordering).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Logging disabled
    Off = 0,
    /// Unrecoverable failure
    Fatal = 1,
    /// Error condition
    Error = 2,
    /// Warning condition
    Warn = 3,
    /// Informational message
    Info = 4,
    /// Debugging message
    Debug = 5,
    /// Most verbose tracing output
    Verbose = 6,
}

impl LogLevel {
    /// Converts a raw byte into a level, rejecting out-of-range values
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(LogLevel::Off),
            1 => Some(LogLevel::Fatal),
            2 => Some(LogLevel::Error),
            3 => Some(LogLevel::Warn),
            4 => Some(LogLevel::Info),
            5 => Some(LogLevel::Debug),
            6 => Some(LogLevel::Verbose),
            _ => None,
        }
    }

    /// Short display name for the level
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "[OFF]",
            LogLevel::Fatal => "[FATAL]",
            LogLevel::Error => "[ERR]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Info => "[INFO]",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Verbose => "[VERB]",
        }
    }

    /// Whether a record at `requested` passes a threshold of `self`
    ///
    /// A threshold of `Off` rejects every non-`Off` level.
    #[inline(always)]
    pub(crate) const fn permits(self, requested: LogLevel) -> bool {
        requested as u8 <= self as u8
    }
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
