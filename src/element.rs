use crate::compact::CompactInt;
use crate::error::Result;
use crate::scalar;
use crate::sink::ByteSink;

/// A single unit of encoded output. Scalars, integers, text, and blobs are complete values;
/// `Seq` is only the count that heads a length-prefixed sequence, with the elements following as
/// elements of their own.
///
/// Fixed-size aggregates have no element: their encoding is nothing but the encodings of their
/// members.
#[derive(Clone, Debug, PartialEq)]
pub enum Element<'a> {
    Bool(bool),
    Char(char),
    Int(CompactInt),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Bin(&'a [u8]),
    Seq(usize),
}

/// Serialize an element onto a sink. Doesn't check that a `Seq` is followed by the right number of
/// elements, just writes it out.
///
/// Only a lone `Char` can fail, and then nothing has been written.
pub fn serialize_elem(sink: &mut ByteSink, elem: Element) -> Result<()> {
    use self::Element::*;
    match elem {
        Bool(v) => scalar::write_bool(sink, v),
        Char(v) => scalar::write_char(sink, v)?,
        Int(v) => v.write(sink),
        F32(v) => scalar::write_f32(sink, v),
        F64(v) => scalar::write_f64(sink, v),
        Str(v) => {
            CompactInt::from(v.len()).write(sink);
            sink.append(v.as_bytes());
        }
        Bin(v) => {
            CompactInt::from(v.len()).write(sink);
            sink.append(v);
        }
        Seq(len) => CompactInt::from(len).write(sink),
    }
    Ok(())
}
