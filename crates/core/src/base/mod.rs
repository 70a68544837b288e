//! Base types for sequence representation.

mod nucleotide;
mod offsets;
mod sequence;

pub use nucleotide::{Nucleotide, BASES};
pub use offsets::OffsetStream;
pub use sequence::Sequence;
