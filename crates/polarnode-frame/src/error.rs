/// Reasons a message is rejected during decoding.
///
/// Every variant is recoverable: the caller drops the message and keeps
/// listening. No variant carries a partially decoded frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The message is shorter than the fixed overhead of the active protocol version.
    #[error("frame too short ({len} bytes, need at least {min})")]
    TooShort { len: usize, min: usize },

    /// The first byte is not the expected start sentinel.
    #[error("malformed frame: start byte 0x{found:02X} (expected 0x{expected:02X})")]
    BadStartByte { found: u8, expected: u8 },

    /// The trailing checksum does not match the one computed over the payload.
    #[error("integrity error: checksum 0x{expected:04X} on wire, computed 0x{computed:04X}")]
    ChecksumMismatch { expected: u16, computed: u16 },

    /// The optional region between the fixed header and the status byte has an
    /// unsupported length.
    #[error("malformed frame: optional region of {len} bytes")]
    MalformedOptionalRegion { len: usize },

    /// A fixed-length message carries more bytes than its layout allows.
    #[error("malformed frame: {len} bytes (expected exactly {expected})")]
    TrailingBytes { len: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors raised while reading or writing hex capture files.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// An I/O error occurred on the underlying reader or writer.
    #[error("capture I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed as a hex-encoded message.
    #[error("invalid hex on line {line}: {source}")]
    InvalidHex {
        line: usize,
        #[source]
        source: hex::FromHexError,
    },
}
