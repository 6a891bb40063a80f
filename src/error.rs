use std::fmt;

use serde::ser;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Occurs when a `Serialize` implementation reports its own failure.
    SerdeFail(String),
    /// The value has a shape with no encoding rule: options, maps, and enum variants. Carries the
    /// name of the rejected shape.
    Unsupported(&'static str),
    /// A character, alone or inside text, has a code point that doesn't fit in one byte.
    CharOutOfRange(char),
    /// Values nested deeper than the configured maximum.
    DepthLimit { max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::SerdeFail(ref msg) => f.write_str(msg),
            Error::Unsupported(shape) => write!(f, "Values of shape [{}] can't be encoded", shape),
            Error::CharOutOfRange(c) => write!(
                f,
                "Character {:?} (U+{:04X}) has no single-byte code",
                c, c as u32
            ),
            Error::DepthLimit { max } => write!(f, "Nesting depth exceeded maximum of {}", max),
        }
    }
}

impl std::error::Error for Error {}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::SerdeFail(msg.to_string())
    }
}
