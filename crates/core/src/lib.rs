//! # dnavault core
//!
//! Turns byte payloads into synthesis-friendly nucleotide sequences and back.
//! The crate holds the nucleotide types, the constraint profile and audits,
//! the constraint-aware mapper with its offset side-channel, the optional
//! repair pass, and the [`pipeline`] tying them to the byte-level stages in
//! `dnavault-codec`.

pub mod base;
pub mod constraints;
pub mod errors;
pub mod mapping;
pub mod pipeline;
pub mod prelude;
pub mod repair;

pub use base::{Nucleotide, OffsetStream, Sequence};
pub use errors::DnaError;
pub use pipeline::{decode, encode, Decoded, EncodedUnit, Pipeline, PipelineConfig};
