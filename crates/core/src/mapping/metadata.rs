//! Carrying the offset stream as nucleotides.
//!
//! Offsets are written one base each with alternating direction: offset `o`
//! at an even index becomes `BASES[o]`, at an odd index `BASES[3 - o]`. The
//! alternation turns the common all-zero offset stream into `ATAT...` rather
//! than a long run of `A`.
//!
//! Runs of three are prevented by stuffing: whenever the last two emitted
//! bases are identical and another offset follows, one extra base is emitted
//! first, namely the first of A, C, G, T that differs from the repeated base.
//! The decoder skips exactly those slots, so every offset stream round-trips
//! and the channel never holds a run longer than two.

use crate::base::{Nucleotide, OffsetStream, Sequence, BASES};
use crate::errors::DnaError;

/// Nucleotide form of an offset stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataChannel {
    pub sequence: Sequence,
    /// Number of stuffing bases inserted.
    pub stuffed: usize,
}

#[inline]
fn parity_base(index: usize, offset: u8) -> Nucleotide {
    if index % 2 == 0 {
        BASES[offset as usize]
    } else {
        BASES[(3 - offset) as usize]
    }
}

#[inline]
fn parity_offset(index: usize, base: Nucleotide) -> u8 {
    if index % 2 == 0 {
        base.to_index()
    } else {
        3 - base.to_index()
    }
}

#[inline]
fn stuffing_base(repeated: Nucleotide) -> Nucleotide {
    if repeated == Nucleotide::A {
        Nucleotide::C
    } else {
        Nucleotide::A
    }
}

/// True when the slot after `emitted` must hold a stuffing base.
#[inline]
fn needs_stuffing(emitted: &[Nucleotide]) -> Option<Nucleotide> {
    match emitted {
        [.., a, b] if a == b => Some(*a),
        _ => None,
    }
}

/// Encode offsets into the metadata channel.
pub fn encode_offsets(offsets: &OffsetStream) -> MetadataChannel {
    let mut emitted = Vec::with_capacity(offsets.len() + offsets.len() / 8);
    let mut stuffed = 0;

    for (i, offset) in offsets.iter().enumerate() {
        if let Some(repeated) = needs_stuffing(&emitted) {
            emitted.push(stuffing_base(repeated));
            stuffed += 1;
        }
        emitted.push(parity_base(i, offset));
    }

    if stuffed > 0 {
        tracing::debug!(stuffed, offsets = offsets.len(), "metadata channel stuffing");
    }

    MetadataChannel {
        sequence: Sequence::from_nucleotides(emitted),
        stuffed,
    }
}

/// Decode the metadata channel back into offsets.
///
/// # Errors
/// `InvalidMetadata` when a stuffing slot holds the wrong base or the channel
/// ends on a stuffing slot.
pub fn decode_offsets(channel: &Sequence) -> Result<OffsetStream, DnaError> {
    let bases = channel.as_slice();
    let mut offsets = OffsetStream::with_capacity(bases.len());

    for (position, &base) in bases.iter().enumerate() {
        if let Some(repeated) = needs_stuffing(&bases[..position]) {
            if base != stuffing_base(repeated) {
                return Err(DnaError::InvalidMetadata {
                    position,
                    reason: "unexpected base in stuffing slot",
                });
            }
            if position + 1 == bases.len() {
                return Err(DnaError::InvalidMetadata {
                    position,
                    reason: "channel ends on a stuffing slot",
                });
            }
            continue;
        }
        offsets.push(parity_offset(offsets.len(), base));
    }

    Ok(offsets)
}
