//! Fixed-width scalars: booleans, characters, and floats.
//!
//! Floats are copied out bit-for-bit in the host's byte order. Readers on a host of the other
//! endianness will see garbage; no attempt is made to normalize this.

use byteorder::{ByteOrder, NativeEndian};

use crate::error::{Error, Result};
use crate::sink::ByteSink;

pub fn write_bool(sink: &mut ByteSink, v: bool) {
    sink.push(v as u8);
}

/// Get the one-byte code for a character.
pub fn char_code(c: char) -> Result<u8> {
    u8::try_from(u32::from(c)).map_err(|_| Error::CharOutOfRange(c))
}

pub fn write_char(sink: &mut ByteSink, c: char) -> Result<()> {
    sink.push(char_code(c)?);
    Ok(())
}

pub fn write_f32(sink: &mut ByteSink, v: f32) {
    let mut raw = [0u8; 4];
    NativeEndian::write_f32(&mut raw, v);
    sink.append(&raw);
}

pub fn write_f64(sink: &mut ByteSink, v: f64) {
    let mut raw = [0u8; 8];
    NativeEndian::write_f64(&mut raw, v);
    sink.append(&raw);
}
