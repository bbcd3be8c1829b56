//! Error types for the protocol crate

/// Wire encoding/decoding errors
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Buffer ended before the value was complete
    #[error("Not enough bytes for {0}")]
    Truncated(&'static str),

    /// VarInt longer than five bytes
    #[error("VarInt is too long")]
    VarIntTooLong,

    /// String longer than the era allows
    #[error("String of {len} bytes exceeds limit of {max}")]
    StringTooLong { len: usize, max: usize },

    /// String payload is not valid UTF-8
    #[error("Invalid UTF-8 in string")]
    InvalidUtf8,

    /// Packet id not known for this packet table
    #[error("Unknown packet id 0x{0:02X}")]
    UnknownPacket(i32),

    /// Field value out of range
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
