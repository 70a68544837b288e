//! The end-to-end encode/decode pipeline.
//!
//! ```text
//! bytes ─RS─▶ protected bytes ─pack─▶ symbols ─map─▶ sequence
//!                                                 └─▶ offsets ─▶ metadata channel
//! ```
//!
//! Decoding runs the stages in reverse. The offsets are part of the encoded
//! unit: without them the sequence cannot be unmapped.

mod config;

use dnavault_codec::{to_bytes, to_symbols, Codec, ReedSolomon};
use rand::Rng;

pub use config::{ConfigError, PipelineConfig, RepairConfig, DEFAULT_NSYM};

use crate::base::{OffsetStream, Sequence};
use crate::errors::DnaError;
use crate::mapping::{decode_offsets, encode_offsets, unmap, ConstraintMapper};
use crate::repair::repair_mapping;

/// Everything produced by one encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedUnit {
    /// Main nucleotide sequence.
    pub sequence: Sequence,
    /// Rotation per position, required to decode `sequence`.
    pub offsets: OffsetStream,
    /// `offsets` carried as nucleotides.
    pub metadata: Sequence,
    /// Stuffing bases inserted into `metadata`.
    pub stuffed: usize,
    /// Positions where the mapper could not satisfy the constraints.
    pub fallbacks: Vec<usize>,
    /// Substitutions made by the repair pass, if it ran.
    pub repair_mutations: Option<usize>,
}

impl EncodedUnit {
    pub fn is_compliant(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

/// Payload recovered by a decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub data: Vec<u8>,
    /// Byte errors fixed by Reed-Solomon.
    pub corrections: usize,
}

/// A configured encoder/decoder. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    codec: ReedSolomon,
    mapper: ConstraintMapper,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, DnaError> {
        let codec = ReedSolomon::new(config.nsym)?;
        let mapper = ConstraintMapper::new(config.profile.clone())?;
        Ok(Self {
            config,
            codec,
            mapper,
        })
    }

    /// Pipeline with default constraints and `nsym` parity bytes.
    pub fn with_nsym(nsym: u8) -> Result<Self, DnaError> {
        Self::new(PipelineConfig::new(nsym))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Encode a payload. When repair is enabled, its generator comes from
    /// [`RepairConfig::rng`].
    pub fn encode(&self, payload: &[u8]) -> Result<EncodedUnit, DnaError> {
        let mut rng = self.config.repair.rng();
        self.encode_with_rng(payload, &mut rng)
    }

    /// Encode a payload, drawing any repair randomness from `rng`.
    ///
    /// # Errors
    ///
    /// `ConstraintUnsatisfiable` if repair is enabled and runs out of
    /// attempts. Without repair, encoding only fails on internal
    /// inconsistencies.
    pub fn encode_with_rng<R: Rng + ?Sized>(
        &self,
        payload: &[u8],
        rng: &mut R,
    ) -> Result<EncodedUnit, DnaError> {
        let protected = self.codec.encode(payload)?;
        let symbols = to_symbols(&protected);
        let mut mapping = self.mapper.map(&symbols)?;
        let fallbacks = mapping.fallbacks().to_vec();

        let mut repair_mutations = None;
        if self.config.repair.enabled && !mapping.is_compliant() {
            let repaired = repair_mapping(
                &mapping,
                self.mapper.profile(),
                rng,
                self.config.repair.max_attempts,
            )?;
            repair_mutations = Some(repaired.mutations);
            mapping = repaired.value;
        } else if !fallbacks.is_empty() {
            tracing::debug!(
                fallbacks = fallbacks.len(),
                length = mapping.len(),
                "mapped sequence has non-compliant positions"
            );
        }

        let (sequence, offsets) = mapping.into_parts();
        let channel = encode_offsets(&offsets);
        let fallbacks = if repair_mutations.is_some() {
            Vec::new()
        } else {
            fallbacks
        };

        tracing::debug!(
            payload = payload.len(),
            bases = sequence.len(),
            metadata = channel.sequence.len(),
            "payload encoded"
        );

        Ok(EncodedUnit {
            sequence,
            offsets,
            metadata: channel.sequence,
            stuffed: channel.stuffed,
            fallbacks,
            repair_mutations,
        })
    }

    /// Decode a sequence using its nucleotide metadata channel.
    pub fn decode(&self, sequence: &Sequence, metadata: &Sequence) -> Result<Decoded, DnaError> {
        let offsets = decode_offsets(metadata)?;
        self.decode_with_offsets(sequence, &offsets)
    }

    /// Decode a sequence using raw offsets.
    ///
    /// # Errors
    ///
    /// * `LengthMismatch` if the offsets do not cover the sequence exactly.
    /// * `Codec(PartialByte)` if the sequence length is not a multiple of 4.
    /// * `Codec(Uncorrectable)` if a block has more errors than `nsym / 2`.
    pub fn decode_with_offsets(
        &self,
        sequence: &Sequence,
        offsets: &OffsetStream,
    ) -> Result<Decoded, DnaError> {
        let symbols = unmap(sequence, offsets)?;
        let protected = to_bytes(&symbols)?;
        let corrected = self.codec.decode_counted(&protected)?;

        if corrected.corrections > 0 {
            tracing::debug!(corrections = corrected.corrections, "corrected byte errors");
        }

        Ok(Decoded {
            data: corrected.data,
            corrections: corrected.corrections,
        })
    }
}

/// Encode with default constraints and no repair.
pub fn encode(payload: &[u8], nsym: u8) -> Result<EncodedUnit, DnaError> {
    Pipeline::with_nsym(nsym)?.encode(payload)
}

/// Decode a sequence and its metadata channel with default constraints.
pub fn decode(sequence: &Sequence, metadata: &Sequence, nsym: u8) -> Result<Vec<u8>, DnaError> {
    Ok(Pipeline::with_nsym(nsym)?.decode(sequence, metadata)?.data)
}
