use thiserror::Error;

/// Error type for codec operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A quaternary symbol outside the range 0-3.
    #[error("Invalid symbol {value} at index {index} (must be 0-3)")]
    InvalidSymbol { index: usize, value: u8 },
    /// A symbol stream that does not split into whole bytes.
    #[error("Symbol stream length {len} is not a multiple of 4")]
    PartialByte { len: usize },
    /// More symbol errors than the redundancy can repair.
    #[error("Uncorrectable block {block}: {reason}")]
    Uncorrectable { block: usize, reason: &'static str },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
