//! Greedy constraint-aware symbol → nucleotide mapping.
//!
//! Each symbol is first tried as its natural base, then rotated by 1, 2 and
//! 3 steps round the A→C→G→T cycle. The first rotation that passes the
//! active checks wins and its offset is recorded:
//!
//! 1. the base must not extend a run past `max_homopolymer`;
//! 2. no forbidden motif may appear in the trailing `len(motif) + 1` window;
//! 3. on the last symbol only, the whole sequence must land inside the GC band.
//!
//! The GC check is deliberately evaluated once, at the end, so intermediate
//! prefixes can drift far from the band. When every rotation fails the natural
//! base is emitted with offset 0 and the position is reported as a fallback.

use crate::base::{Nucleotide, OffsetStream, Sequence};
use crate::constraints::ConstraintProfile;
use crate::errors::DnaError;

/// Outcome for a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingResult {
    pub base: Nucleotide,
    pub offset: u8,
    /// False when no rotation satisfied the checks and offset 0 was forced.
    pub compliant: bool,
}

/// A mapped sequence together with the offsets needed to invert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    sequence: Sequence,
    offsets: OffsetStream,
    /// Sorted positions where the mapper fell back to offset 0.
    fallbacks: Vec<usize>,
}

impl Mapping {
    /// Pair a sequence with its offsets, with no positions flagged.
    pub fn new(sequence: Sequence, offsets: OffsetStream) -> Result<Self, DnaError> {
        if sequence.len() != offsets.len() {
            return Err(DnaError::LengthMismatch {
                sequence: sequence.len(),
                offsets: offsets.len(),
            });
        }
        Ok(Self {
            sequence,
            offsets,
            fallbacks: Vec::new(),
        })
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn offsets(&self) -> &OffsetStream {
        &self.offsets
    }

    pub fn fallbacks(&self) -> &[usize] {
        &self.fallbacks
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// True when every position satisfied its local checks.
    pub fn is_compliant(&self) -> bool {
        self.fallbacks.is_empty()
    }

    /// Per-position view of the mapping.
    pub fn results(&self) -> impl Iterator<Item = MappingResult> + '_ {
        self.sequence
            .iter()
            .zip(self.offsets.iter())
            .enumerate()
            .map(|(i, (base, offset))| MappingResult {
                base,
                offset,
                compliant: self.fallbacks.binary_search(&i).is_err(),
            })
    }

    /// Recover the symbol stream this mapping encodes.
    pub fn symbols(&self) -> Vec<u8> {
        self.sequence
            .iter()
            .zip(self.offsets.iter())
            .map(|(base, offset)| base.rotate(4 - offset).to_index())
            .collect()
    }

    pub fn into_parts(self) -> (Sequence, OffsetStream) {
        (self.sequence, self.offsets)
    }
}

/// Maps symbol streams under a fixed `ConstraintProfile`.
#[derive(Debug, Clone, Default)]
pub struct ConstraintMapper {
    profile: ConstraintProfile,
}

impl ConstraintMapper {
    pub fn new(profile: ConstraintProfile) -> Result<Self, DnaError> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &ConstraintProfile {
        &self.profile
    }

    /// Map 2-bit symbols to bases, recording the rotation used at each step.
    ///
    /// # Errors
    /// `InvalidSymbol` if any symbol is above 3. Constraint failures never
    /// error; they show up in [`Mapping::fallbacks`].
    pub fn map(&self, symbols: &[u8]) -> Result<Mapping, DnaError> {
        let mut bases: Vec<Nucleotide> = Vec::with_capacity(symbols.len());
        let mut offsets = OffsetStream::with_capacity(symbols.len());
        let mut fallbacks = Vec::new();
        let mut gc_count = 0usize;

        for (i, &value) in symbols.iter().enumerate() {
            let natural = Nucleotide::from_index(value)
                .ok_or(DnaError::InvalidSymbol { index: i, value })?;
            let is_last = i + 1 == symbols.len();

            let chosen = (0..4u8)
                .map(|offset| (offset, natural.rotate(offset)))
                .find(|&(_, candidate)| self.accepts(&bases, candidate, is_last, gc_count));

            let (offset, base) = chosen.unwrap_or_else(|| {
                tracing::debug!(position = i, symbol = value, "no rotation satisfies constraints");
                fallbacks.push(i);
                (0, natural)
            });

            gc_count += usize::from(base.is_gc());
            bases.push(base);
            offsets.push(offset);
        }

        Ok(Mapping {
            sequence: Sequence::from_nucleotides(bases),
            offsets,
            fallbacks,
        })
    }

    fn accepts(
        &self,
        emitted: &[Nucleotide],
        candidate: Nucleotide,
        is_last: bool,
        gc_count: usize,
    ) -> bool {
        let run = self.profile.max_homopolymer;
        if emitted.len() >= run && emitted[emitted.len() - run..].iter().all(|&b| b == candidate) {
            return false;
        }

        for motif in &self.profile.forbidden_motifs {
            let motif = motif.as_slice();
            let tail = &emitted[emitted.len().saturating_sub(motif.len())..];
            let mut window = Vec::with_capacity(tail.len() + 1);
            window.extend_from_slice(tail);
            window.push(candidate);
            if window.windows(motif.len()).any(|w| w == motif) {
                return false;
            }
        }

        if is_last {
            let gc = (gc_count + usize::from(candidate.is_gc())) as f64 * 100.0
                / (emitted.len() + 1) as f64;
            if !self.profile.gc_band.contains(gc) {
                return false;
            }
        }

        true
    }
}

/// Invert a mapping: `symbol = (index(base) - offset) mod 4`.
///
/// # Errors
/// `LengthMismatch` when the two streams differ in length; nothing is
/// truncated.
pub fn unmap(sequence: &Sequence, offsets: &OffsetStream) -> Result<Vec<u8>, DnaError> {
    if sequence.len() != offsets.len() {
        return Err(DnaError::LengthMismatch {
            sequence: sequence.len(),
            offsets: offsets.len(),
        });
    }
    Ok(sequence
        .iter()
        .zip(offsets.iter())
        .map(|(base, offset)| base.rotate(4 - offset).to_index())
        .collect())
}
