use std::io;

use thiserror::Error;

/// Errors accumulated by a [`Decoder`](crate::Decoder) or
/// [`Encoder`](crate::Encoder).
///
/// Codec operations never return `Result`; the first failure is stored on the
/// instance and every later operation becomes a no-op. `close()` surfaces the
/// stored error.
#[derive(Debug, Error)]
pub enum Error {
    /// Lexical or structural failure in the input text.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The underlying stream failed while refilling or flushing.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Number text that does not parse as the requested type.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// A bytes field carried a string that is not valid base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// An enum field carried a name with no known ordinal.
    #[error("invalid enum: {0}")]
    UnknownEnumName(String),

    /// Infinite and NaN floats have no JSON representation.
    #[error("unsupported value: {0}")]
    NonFiniteNumber(f64),

    /// Failure propagated verbatim from the dynamic fallback codec.
    #[error(transparent)]
    Fallback(#[from] serde_json::Error),
}

/// A parse failure with enough context to locate it in the stream.
///
/// `offset` is absolute — counted from the start of the whole stream, not the
/// current refill window. `snippet` holds at most 16 bytes of the offending
/// region.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{reason} near offset {offset}: '{snippet}'")]
pub struct ParseError {
    pub reason: String,
    pub offset: u64,
    pub snippet: String,
}
