//! Typed field values and their record encoding
//!
//! Every value appended to a record is one variant of [`FieldValue`].
//! Inside a slot, fields are stored back to back as `tag, payload`
//! pairs (strings carry a 16-bit length prefix); [`FieldIter`] walks
//! the encoded form back into values for the sink side.
//!
//! The `Bin*`/`Hex*` variants hold the same bits as the corresponding
//! unsigned variant and differ only in how a renderer displays them.

use core::fmt;

/// One typed value carried by a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Boolean
    Bool(bool),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// UTF-8 string (length-delimited, not NUL-terminated)
    Str(&'a str),
    /// Signed 8-bit integer
    I8(i8),
    /// Signed 16-bit integer
    I16(i16),
    /// Signed 32-bit integer
    I32(i32),
    /// Signed 64-bit integer
    I64(i64),
    /// Unsigned 8-bit integer
    U8(u8),
    /// Unsigned 16-bit integer
    U16(u16),
    /// Unsigned 32-bit integer
    U32(u32),
    /// Unsigned 64-bit integer
    U64(u64),
    /// 8-bit value displayed in binary radix
    Bin8(u8),
    /// 16-bit value displayed in binary radix
    Bin16(u16),
    /// 32-bit value displayed in binary radix
    Bin32(u32),
    /// 64-bit value displayed in binary radix
    Bin64(u64),
    /// 8-bit value displayed in hex radix
    Hex8(u8),
    /// 16-bit value displayed in hex radix
    Hex16(u16),
    /// 32-bit value displayed in hex radix
    Hex32(u32),
    /// 64-bit value displayed in hex radix
    Hex64(u64),
}

/// Wire tags, one per field kind
mod tag {
    pub const BOOL: u8 = 0x01;
    pub const F32: u8 = 0x02;
    pub const F64: u8 = 0x03;
    pub const STR: u8 = 0x04;
    pub const I8: u8 = 0x10;
    pub const I16: u8 = 0x11;
    pub const I32: u8 = 0x12;
    pub const I64: u8 = 0x13;
    pub const U8: u8 = 0x20;
    pub const U16: u8 = 0x21;
    pub const U32: u8 = 0x22;
    pub const U64: u8 = 0x23;
    pub const BIN8: u8 = 0x30;
    pub const BIN16: u8 = 0x31;
    pub const BIN32: u8 = 0x32;
    pub const BIN64: u8 = 0x33;
    pub const HEX8: u8 = 0x40;
    pub const HEX16: u8 = 0x41;
    pub const HEX32: u8 = 0x42;
    pub const HEX64: u8 = 0x43;
}

impl FieldValue<'_> {
    const fn tag(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => tag::BOOL,
            FieldValue::F32(_) => tag::F32,
            FieldValue::F64(_) => tag::F64,
            FieldValue::Str(_) => tag::STR,
            FieldValue::I8(_) => tag::I8,
            FieldValue::I16(_) => tag::I16,
            FieldValue::I32(_) => tag::I32,
            FieldValue::I64(_) => tag::I64,
            FieldValue::U8(_) => tag::U8,
            FieldValue::U16(_) => tag::U16,
            FieldValue::U32(_) => tag::U32,
            FieldValue::U64(_) => tag::U64,
            FieldValue::Bin8(_) => tag::BIN8,
            FieldValue::Bin16(_) => tag::BIN16,
            FieldValue::Bin32(_) => tag::BIN32,
            FieldValue::Bin64(_) => tag::BIN64,
            FieldValue::Hex8(_) => tag::HEX8,
            FieldValue::Hex16(_) => tag::HEX16,
            FieldValue::Hex32(_) => tag::HEX32,
            FieldValue::Hex64(_) => tag::HEX64,
        }
    }

    /// Total encoded size: tag byte plus payload
    pub(crate) fn encoded_len(&self) -> usize {
        1 + match self {
            FieldValue::Bool(_) | FieldValue::I8(_) | FieldValue::U8(_) => 1,
            FieldValue::Bin8(_) | FieldValue::Hex8(_) => 1,
            FieldValue::I16(_) | FieldValue::U16(_) => 2,
            FieldValue::Bin16(_) | FieldValue::Hex16(_) => 2,
            FieldValue::F32(_) | FieldValue::I32(_) | FieldValue::U32(_) => 4,
            FieldValue::Bin32(_) | FieldValue::Hex32(_) => 4,
            FieldValue::F64(_) | FieldValue::I64(_) | FieldValue::U64(_) => 8,
            FieldValue::Bin64(_) | FieldValue::Hex64(_) => 8,
            FieldValue::Str(s) => 2 + s.len(),
        }
    }

    /// Encodes the field at the start of `buf`
    ///
    /// Returns the number of bytes written, or `None` if the field does
    /// not fit (strings longer than `u16::MAX` never fit).
    pub(crate) fn encode_into(&self, buf: &mut [u8]) -> Option<usize> {
        if let FieldValue::Str(s) = self {
            if s.len() > u16::MAX as usize {
                return None;
            }
        }
        let needed = self.encoded_len();
        if buf.len() < needed {
            return None;
        }

        buf[0] = self.tag();
        let body = &mut buf[1..needed];
        match *self {
            FieldValue::Bool(v) => body[0] = v as u8,
            FieldValue::F32(v) => body.copy_from_slice(&v.to_le_bytes()),
            FieldValue::F64(v) => body.copy_from_slice(&v.to_le_bytes()),
            FieldValue::Str(s) => {
                body[..2].copy_from_slice(&(s.len() as u16).to_le_bytes());
                body[2..].copy_from_slice(s.as_bytes());
            }
            FieldValue::I8(v) => body.copy_from_slice(&v.to_le_bytes()),
            FieldValue::I16(v) => body.copy_from_slice(&v.to_le_bytes()),
            FieldValue::I32(v) => body.copy_from_slice(&v.to_le_bytes()),
            FieldValue::I64(v) => body.copy_from_slice(&v.to_le_bytes()),
            FieldValue::U8(v) | FieldValue::Bin8(v) | FieldValue::Hex8(v) => {
                body.copy_from_slice(&v.to_le_bytes())
            }
            FieldValue::U16(v) | FieldValue::Bin16(v) | FieldValue::Hex16(v) => {
                body.copy_from_slice(&v.to_le_bytes())
            }
            FieldValue::U32(v) | FieldValue::Bin32(v) | FieldValue::Hex32(v) => {
                body.copy_from_slice(&v.to_le_bytes())
            }
            FieldValue::U64(v) | FieldValue::Bin64(v) | FieldValue::Hex64(v) => {
                body.copy_from_slice(&v.to_le_bytes())
            }
        }
        Some(needed)
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::F32(v) => write!(f, "{v}"),
            FieldValue::F64(v) => write!(f, "{v}"),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::I8(v) => write!(f, "{v}"),
            FieldValue::I16(v) => write!(f, "{v}"),
            FieldValue::I32(v) => write!(f, "{v}"),
            FieldValue::I64(v) => write!(f, "{v}"),
            FieldValue::U8(v) => write!(f, "{v}"),
            FieldValue::U16(v) => write!(f, "{v}"),
            FieldValue::U32(v) => write!(f, "{v}"),
            FieldValue::U64(v) => write!(f, "{v}"),
            FieldValue::Bin8(v) => write!(f, "{v:#b}"),
            FieldValue::Bin16(v) => write!(f, "{v:#b}"),
            FieldValue::Bin32(v) => write!(f, "{v:#b}"),
            FieldValue::Bin64(v) => write!(f, "{v:#b}"),
            FieldValue::Hex8(v) => write!(f, "{v:#x}"),
            FieldValue::Hex16(v) => write!(f, "{v:#x}"),
            FieldValue::Hex32(v) => write!(f, "{v:#x}"),
            FieldValue::Hex64(v) => write!(f, "{v:#x}"),
        }
    }
}

/// Iterator over fields encoded in a record payload
///
/// Yields fields in append order. Iteration stops at the first byte
/// sequence that does not decode as a field, which only happens if the
/// payload was corrupted outside this crate.
#[derive(Debug, Clone)]
pub struct FieldIter<'a> {
    rest: &'a [u8],
}

impl<'a> FieldIter<'a> {
    pub(crate) fn new(payload: &'a [u8]) -> Self {
        Self { rest: payload }
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.rest.len() < n {
            return None;
        }
        let (head, tail) = self.rest.split_at(n);
        self.rest = tail;
        Some(head)
    }

    fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let head = self.take(N)?;
        let mut out = [0; N];
        out.copy_from_slice(head);
        Some(out)
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = FieldValue<'a>;

    fn next(&mut self) -> Option<FieldValue<'a>> {
        let kind = self.take(1)?[0];
        let value = match kind {
            tag::BOOL => FieldValue::Bool(self.take(1)?[0] != 0),
            tag::F32 => FieldValue::F32(f32::from_le_bytes(self.take_array()?)),
            tag::F64 => FieldValue::F64(f64::from_le_bytes(self.take_array()?)),
            tag::STR => {
                let len = u16::from_le_bytes(self.take_array()?) as usize;
                let bytes = self.take(len)?;
                FieldValue::Str(core::str::from_utf8(bytes).ok()?)
            }
            tag::I8 => FieldValue::I8(i8::from_le_bytes(self.take_array()?)),
            tag::I16 => FieldValue::I16(i16::from_le_bytes(self.take_array()?)),
            tag::I32 => FieldValue::I32(i32::from_le_bytes(self.take_array()?)),
            tag::I64 => FieldValue::I64(i64::from_le_bytes(self.take_array()?)),
            tag::U8 => FieldValue::U8(u8::from_le_bytes(self.take_array()?)),
            tag::U16 => FieldValue::U16(u16::from_le_bytes(self.take_array()?)),
            tag::U32 => FieldValue::U32(u32::from_le_bytes(self.take_array()?)),
            tag::U64 => FieldValue::U64(u64::from_le_bytes(self.take_array()?)),
            tag::BIN8 => FieldValue::Bin8(u8::from_le_bytes(self.take_array()?)),
            tag::BIN16 => FieldValue::Bin16(u16::from_le_bytes(self.take_array()?)),
            tag::BIN32 => FieldValue::Bin32(u32::from_le_bytes(self.take_array()?)),
            tag::BIN64 => FieldValue::Bin64(u64::from_le_bytes(self.take_array()?)),
            tag::HEX8 => FieldValue::Hex8(u8::from_le_bytes(self.take_array()?)),
            tag::HEX16 => FieldValue::Hex16(u16::from_le_bytes(self.take_array()?)),
            tag::HEX32 => FieldValue::Hex32(u32::from_le_bytes(self.take_array()?)),
            tag::HEX64 => FieldValue::Hex64(u64::from_le_bytes(self.take_array()?)),
            _ => return None,
        };
        Some(value)
    }
}
