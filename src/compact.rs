//! Compact, variable-length integers.
//!
//! The magnitude is cut into 7-bit groups, most significant non-zero group first. Every byte but
//! the last has its high bit set to mark that more follow. The last byte's high bit is the sign
//! instead, and its low 7 bits are the least significant group:
//!
//! ```text
//!        0 => 00
//!      127 => 7F
//!      128 => 81 00
//!      -15 => 8F
//!     -128 => 81 80
//! ```
//!
//! Because a negative final byte also has its high bit set, a reader has to know where the value
//! ends; the groups alone don't delimit it.

use std::fmt;

use crate::sink::ByteSink;

/// Most bytes any integer can need: 128 bits of magnitude at 7 bits per byte.
pub const MAX_COMPACT_LEN: usize = 19;

/// An integer of any width or signedness, ready to be written in compact form.
///
/// Construct one with `From` from any primitive integer type.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CompactInt {
    negative: bool,
    magnitude: u128,
}

impl CompactInt {
    /// Returns `true` if the integer is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The absolute value of the integer.
    #[inline]
    pub fn magnitude(&self) -> u128 {
        self.magnitude
    }

    /// Number of 7-bit groups, which is also the number of encoded bytes.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        let bits = 128 - self.magnitude.leading_zeros() as usize;
        bits.div_ceil(7).max(1)
    }

    /// Append the encoded integer onto a sink.
    pub fn write(&self, sink: &mut ByteSink) {
        let mut raw = [0u8; MAX_COMPACT_LEN];
        let len = self.encoded_len();
        for (i, byte) in raw[..len].iter_mut().enumerate() {
            let shift = 7 * (len - 1 - i);
            *byte = ((self.magnitude >> shift) & 0x7F) as u8;
            if i + 1 < len {
                *byte |= 0x80;
            }
        }
        if self.negative {
            raw[len - 1] |= 0x80;
        }
        sink.append(&raw[..len]);
    }
}

impl fmt::Debug for CompactInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CompactInt {
                fn from(n: $t) -> Self {
                    CompactInt {
                        negative: false,
                        magnitude: n as u128,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CompactInt {
                fn from(n: $t) -> Self {
                    CompactInt {
                        negative: n < 0,
                        magnitude: n.unsigned_abs() as u128,
                    }
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);
