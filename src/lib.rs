//! denseform turns any serde-serializable value built from booleans, characters, numbers, text,
//! sequences, fixed-size arrays, tuples, and structs into a dense, canonical byte sequence. There
//! is no per-type encoder to write: `#[derive(Serialize)]` is enough.
//!
//! The format has no framing, tags, or field names. Structure comes entirely from the type:
//!
//! | Value                         | Encoding                                              |
//! |-------------------------------|-------------------------------------------------------|
//! | `bool`                        | 1 byte, `0x00` or `0x01`                              |
//! | `char`                        | 1 byte, the character code (must be at most `U+00FF`) |
//! | `f32` / `f64`                 | 4 / 8 bytes, raw bits in native byte order            |
//! | any integer                   | compact integer, see [`CompactInt`]                   |
//! | `str`, `String`               | compact count of stored bytes, then the UTF-8 bytes   |
//! | bytes (`serde_bytes`)         | compact byte count, then the bytes                    |
//! | `Vec<T>` and other sequences  | compact element count, then each element              |
//! | `[T; N]`, tuples, structs     | each element or field in order, nothing else          |
//!
//! The same value always encodes to the same bytes.
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Reading {
//!     valid: bool,
//!     sensor: u32,
//!     label: String,
//!     samples: Vec<i16>,
//! }
//!
//! let reading = Reading {
//!     valid: true,
//!     sensor: 7,
//!     label: "ok".to_string(),
//!     samples: vec![-1, 200],
//! };
//! let bytes = denseform::to_vec(&reading).unwrap();
//! assert_eq!(bytes, vec![0x01, 0x07, 0x02, b'o', b'k', 0x02, 0x81, 0x81, 0x48]);
//! ```
//!
//! Options, maps, and enums can't be encoded and fail with [`Error::Unsupported`]. Decoding is not
//! provided.

mod compact;
mod depth_tracking;
mod element;
mod error;
mod scalar;
mod ser;
mod sink;

pub use compact::{CompactInt, MAX_COMPACT_LEN};
pub use error::{Error, Result};
pub use ser::{
    encode_into, encode_into_with_options, to_vec, to_vec_with_options, AggregateEncoder,
    EncodeOptions, Encoder, SeqEncoder, DEFAULT_MAX_DEPTH,
};
pub use sink::ByteSink;
