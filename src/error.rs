//! Error types and handling

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The scan buffer could not be allocated
    OutOfMemory,
    /// Dimensions or buffer sizes that do not describe a valid frame
    Invalid,
    /// A configuration the engine does not understand
    Unsupported,
    /// Scanner state is already borrowed by an in-flight call
    Busy,
    /// Opaque failure reported by the decoding engine
    Engine(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::Invalid => write!(f, "invalid request"),
            Self::Unsupported => write!(f, "unsupported request"),
            Self::Busy => write!(f, "scanner busy"),
            Self::Engine(msg) => write!(f, "decoding engine error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = std::result::Result<T, E>;
