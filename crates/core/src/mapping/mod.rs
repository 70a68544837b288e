//! Symbol to nucleotide mapping and the offset side-channel.

mod mapper;
mod metadata;

pub use mapper::{unmap, ConstraintMapper, Mapping, MappingResult};
pub use metadata::{decode_offsets, encode_offsets, MetadataChannel};
