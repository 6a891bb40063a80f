//! Serialization.
//!
//! Each serde data-model call maps to exactly one encoding rule:
//!
//! - bool, char, f32, f64 - fixed-width scalar
//! - all integers - compact integer
//! - str, bytes - compact count, then raw bytes
//! - seq - compact count, then each element
//! - tuple, tuple struct, struct, newtype struct, unit - members back to back, no prefix
//!
//! Options, maps, and enum variants of any kind have no encoding and fail with
//! [`Error::Unsupported`].

use std::mem;

use serde::ser::*;
use tracing::{debug, trace};

use crate::compact::CompactInt;
use crate::depth_tracking::DepthTracker;
use crate::element::*;
use crate::error::{Error, Result};
use crate::sink::ByteSink;

/// Default limit on how many sequences and aggregates may be nested inside each other.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Settings for an [`Encoder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    max_depth: usize,
    capacity: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            capacity: 0,
        }
    }
}

impl EncodeOptions {
    /// Fail with [`Error::DepthLimit`] when sequences and aggregates nest deeper than this.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reserve this many bytes of output up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Encode a value into a new byte vector.
///
/// ```
/// #[derive(serde::Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let bytes = denseform::to_vec(&Point { x: 1, y: -2 }).unwrap();
/// assert_eq!(bytes, vec![0x01, 0x82]);
/// ```
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    to_vec_with_options(value, &EncodeOptions::default())
}

/// Encode a value into a new byte vector, using the given options.
pub fn to_vec_with_options<T: Serialize + ?Sized>(
    value: &T,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let mut se = Encoder::with_options(options);
    value.serialize(&mut se)?;
    let out = se.finish();
    trace!(len = out.len(), "encoded value");
    Ok(out)
}

/// Encode a value onto the end of an existing buffer. If encoding fails, the buffer is left as it
/// was.
pub fn encode_into<T: Serialize + ?Sized>(value: &T, buf: &mut Vec<u8>) -> Result<()> {
    encode_into_with_options(value, buf, &EncodeOptions::default())
}

/// Encode a value onto the end of an existing buffer, using the given options.
pub fn encode_into_with_options<T: Serialize + ?Sized>(
    value: &T,
    buf: &mut Vec<u8>,
    options: &EncodeOptions,
) -> Result<()> {
    let out = to_vec_with_options(value, options)?;
    buf.extend_from_slice(&out);
    Ok(())
}

/// Encoder for any value whose serde shape has an encoding rule.
///
/// Most users want [`to_vec`]. The encoder itself is useful when driving `Serialize` directly,
/// or to encode several values back to back into one buffer. A value that fails leaves everything
/// encoded before it in place, though a failure part way through a sequence of declared length or
/// a record keeps the members already written.
#[derive(Debug)]
pub struct Encoder {
    depth_tracking: DepthTracker,
    sink: ByteSink,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::with_options(&EncodeOptions::default())
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &EncodeOptions) -> Self {
        Encoder {
            depth_tracking: DepthTracker::new(options.max_depth),
            sink: ByteSink::with_capacity(options.capacity),
        }
    }

    /// Everything encoded so far.
    pub fn as_bytes(&self) -> &[u8] {
        self.sink.as_bytes()
    }

    /// Finish encoding and take the output.
    pub fn finish(self) -> Vec<u8> {
        self.sink.finalize()
    }

    fn encode_element(&mut self, elem: Element) -> Result<()> {
        serialize_elem(&mut self.sink, elem)
    }

    fn reject(&self, shape: &'static str) -> Error {
        debug!(shape, depth = self.depth_tracking.depth(), "rejected value with no encoding");
        Error::Unsupported(shape)
    }
}

impl<'a> Serializer for &'a mut Encoder {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = SeqEncoder<'a>;
    type SerializeTuple = AggregateEncoder<'a>;
    type SerializeTupleStruct = AggregateEncoder<'a>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = AggregateEncoder<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.encode_element(Element::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.encode_element(Element::Int(CompactInt::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.encode_element(Element::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.encode_element(Element::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.encode_element(Element::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.encode_element(Element::Str(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.encode_element(Element::Bin(v))
    }

    fn serialize_none(self) -> Result<()> {
        Err(self.reject("option"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _: &T) -> Result<()> {
        Err(self.reject("option"))
    }

    // The empty record
    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(self.reject("unit_variant"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        v: &T,
    ) -> Result<()> {
        v.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()> {
        Err(self.reject("newtype_variant"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        SeqEncoder::new(self, len)
    }

    fn serialize_tuple(self, len: usize) -> Result<AggregateEncoder<'a>> {
        AggregateEncoder::new(self, Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<AggregateEncoder<'a>> {
        AggregateEncoder::new(self, Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(self.reject("tuple_variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(self.reject("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        // Skipped fields may make the declared length differ from what arrives, so don't check it
        AggregateEncoder::new(self, None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(self.reject("struct_variant"))
    }
}

enum SeqLen {
    /// Count was written up front and must match what arrives.
    Declared(usize),
    /// Count is written on `end()`. Holds the real output buffer while the elements go into a
    /// temporary one.
    Unknown(Vec<u8>),
    Finished,
}

/// Encode a sequence of possibly unknown length.
///
/// If the length is known, the count goes out immediately and elements follow. If it isn't, we
/// can't write the count ahead of time. So instead, we:
///
/// 1. Swap a temporary buffer into the sink
/// 2. Encode every element into it, counting as we go
/// 3. On end(), swap the original buffer back, write the count, then copy in the temporary buffer
///
/// If an element fails and the encoder is dropped without `end()`, the original buffer is put
/// back and the half-built sequence is discarded.
pub struct SeqEncoder<'a> {
    se: &'a mut Encoder,
    count: usize,
    len: SeqLen,
}

impl<'a> SeqEncoder<'a> {
    fn new(se: &'a mut Encoder, len: Option<usize>) -> Result<Self> {
        se.depth_tracking.enter()?;
        let len = if let Some(len) = len {
            CompactInt::from(len).write(&mut se.sink);
            SeqLen::Declared(len)
        } else {
            SeqLen::Unknown(se.sink.take())
        };
        Ok(Self { se, count: 0, len })
    }
}

impl<'a> SerializeSeq for SeqEncoder<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.count += 1;
        value.serialize(&mut *self.se)
    }

    fn end(mut self) -> Result<()> {
        match mem::replace(&mut self.len, SeqLen::Finished) {
            SeqLen::Declared(len) if len != self.count => Err(Error::SerdeFail(format!(
                "sequence declared {} elements but produced {}",
                len, self.count
            ))),
            SeqLen::Unknown(outer) => {
                let elements = self.se.sink.restore(outer);
                self.se.encode_element(Element::Seq(self.count))?;
                self.se.sink.append(&elements);
                Ok(())
            }
            SeqLen::Declared(_) | SeqLen::Finished => Ok(()),
        }
    }
}

impl<'a> Drop for SeqEncoder<'a> {
    fn drop(&mut self) {
        if let SeqLen::Unknown(outer) = mem::replace(&mut self.len, SeqLen::Finished) {
            self.se.sink.restore(outer);
        }
        self.se.depth_tracking.exit();
    }
}

/// Encode a fixed-size aggregate: arrays, tuples, and records. Members are written back to back
/// with nothing before, between, or after them.
pub struct AggregateEncoder<'a> {
    se: &'a mut Encoder,
    expected: Option<usize>,
    count: usize,
}

impl<'a> AggregateEncoder<'a> {
    fn new(se: &'a mut Encoder, expected: Option<usize>) -> Result<Self> {
        se.depth_tracking.enter()?;
        Ok(Self {
            se,
            expected,
            count: 0,
        })
    }

    fn member<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.count += 1;
        value.serialize(&mut *self.se)
    }

    fn end_inner(self) -> Result<()> {
        match self.expected {
            Some(expected) if expected != self.count => Err(Error::SerdeFail(format!(
                "fixed-size aggregate declared {} members but produced {}",
                expected, self.count
            ))),
            _ => Ok(()),
        }
    }
}

impl<'a> Drop for AggregateEncoder<'a> {
    fn drop(&mut self) {
        self.se.depth_tracking.exit();
    }
}

impl<'a> SerializeTuple for AggregateEncoder<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.member(value)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}

impl<'a> SerializeTupleStruct for AggregateEncoder<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.member(value)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}

impl<'a> SerializeStruct for AggregateEncoder<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.member(value)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}
