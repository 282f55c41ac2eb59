//! Error types for the Huffman coder.

use thiserror::Error;

/// Error variants for encoding, decoding and frequency-store access.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol to encode has no codeword in the code table.
    #[error("symbol {symbol:#04x} has no codeword in the code table")]
    AlphabetInconsistency { symbol: u8 },

    /// Persisted frequency data is missing, malformed or fails to parse.
    #[error("corrupt frequency store: {reason}")]
    CorruptFrequencyStore { reason: String },

    /// The requested input file does not exist.
    #[error("source file not found: {path}")]
    MissingSourceFile { path: String },

    /// The same symbol was reached twice while deriving codewords.
    #[error("ambiguous symbol {symbol:#04x}: reached by more than one path in the tree")]
    AmbiguousSymbol { symbol: u8 },

    /// The payload ran out of bits before every recorded symbol was decoded.
    #[error("payload truncated: decoded {decoded} of {expected} symbols")]
    TruncatedPayload { expected: u64, decoded: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt_store(reason: impl Into<String>) -> Self {
        Error::CorruptFrequencyStore {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
