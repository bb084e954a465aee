//! Context identifiers
//!
//! A context names the logging channel a record belongs to. It is a
//! short DLT-style tag of at most [`MAX_CONTEXT_LENGTH`] bytes, trimmed
//! and zero-padded so it can be stored inline in slots and policy
//! entries without allocation.

use crate::config::MAX_CONTEXT_LENGTH;

/// Inline, fixed-size context identifier
#[derive(Debug, Clone, Copy, Eq)]
pub struct ContextId {
    bytes: [u8; MAX_CONTEXT_LENGTH],
    len: u8,
}

impl ContextId {
    /// The empty context, used as the unset value in fixed tables
    pub const EMPTY: Self = Self {
        bytes: [0; MAX_CONTEXT_LENGTH],
        len: 0,
    };

    /// Builds an identifier from a string, trimming to fit
    ///
    /// Trimming never splits a UTF-8 character: the longest prefix that
    /// ends on a character boundary is kept.
    pub fn new(context: &str) -> Self {
        let mut cut = context.len().min(MAX_CONTEXT_LENGTH);
        while !context.is_char_boundary(cut) {
            cut -= 1;
        }
        Self::copy_in(&context.as_bytes()[..cut])
    }

    /// Builds an identifier from raw bytes, keeping the longest valid
    /// UTF-8 prefix that fits
    ///
    /// Used by the foreign-callable surface, where the context arrives
    /// as a pointer and length of unverified bytes.
    pub fn from_bytes(context: &[u8]) -> Self {
        let cut = context.len().min(MAX_CONTEXT_LENGTH);
        match core::str::from_utf8(&context[..cut]) {
            Ok(_) => Self::copy_in(&context[..cut]),
            Err(e) => Self::copy_in(&context[..e.valid_up_to()]),
        }
    }

    fn copy_in(bytes: &[u8]) -> Self {
        let mut data = [0; MAX_CONTEXT_LENGTH];
        data[..bytes.len()].copy_from_slice(bytes);
        Self {
            bytes: data,
            len: bytes.len() as u8,
        }
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        // SAFETY: both constructors only store whole UTF-8 characters.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// The identifier bytes, without padding
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of bytes in the identifier
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the identifier is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq for ContextId {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl core::fmt::Display for ContextId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
