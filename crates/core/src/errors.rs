use std::error;
use std::fmt;

use dnavault_codec::CodecError;
use thiserror::Error;

/// Error returned when attempting to convert an invalid byte/character into
/// a `Nucleotide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidNucleotide(pub u8);

impl fmt::Display for InvalidNucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid nucleotide byte: {} ('{}')", self.0, self.0 as char)
    }
}

impl error::Error for InvalidNucleotide {}

/// Error type for failures when parsing a `Sequence` or `Motif` from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSequence {
    /// A character was not recognized as a valid nucleotide.
    InvalidChar { position: usize, found: char },

    /// The sequence was empty when a non-empty sequence was required.
    EmptySequence,
}

impl fmt::Display for InvalidSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { position, found } => {
                write!(f, "Invalid character '{found}' at position {position}")
            }
            Self::EmptySequence => write!(f, "Empty sequence not allowed"),
        }
    }
}

impl error::Error for InvalidSequence {}

/// Errors surfaced by the mapping layer and the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DnaError {
    /// Byte-side failure: bad symbols, partial bytes or an uncorrectable block.
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Invalid sequence: {0}")]
    InvalidSequence(#[from] InvalidSequence),

    /// Quaternary digit outside 0-3 handed to the mapper.
    #[error("Invalid symbol {value} at index {index} (must be 0-3)")]
    InvalidSymbol { index: usize, value: u8 },

    /// Offset outside 0-3.
    #[error("Invalid offset {value} at index {index} (must be 0-3)")]
    InvalidOffset { index: usize, value: u8 },

    /// Sequence and offset stream disagree in length.
    #[error("Metadata length mismatch: sequence has {sequence} bases, offsets have {offsets}")]
    LengthMismatch { sequence: usize, offsets: usize },

    /// Malformed metadata channel.
    #[error("Invalid metadata at base {position}: {reason}")]
    InvalidMetadata { position: usize, reason: &'static str },

    #[error("Invalid constraint profile: {0}")]
    InvalidProfile(String),

    /// Repair pass hit its attempt cap with violations remaining.
    #[error("Constraints unsatisfiable after {attempts} attempts")]
    ConstraintUnsatisfiable { attempts: usize },
}

impl DnaError {
    /// True for error-correction failures.
    pub fn is_uncorrectable(&self) -> bool {
        matches!(self, Self::Codec(CodecError::Uncorrectable { .. }))
    }

    /// True for any failure caused by the offset side-channel.
    pub fn is_metadata(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::InvalidMetadata { .. } | Self::InvalidOffset { .. }
        )
    }
}
