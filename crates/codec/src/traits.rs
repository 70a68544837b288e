use crate::error::CodecError;

/// Core trait for byte-level codecs.
///
/// Every stage of the byte side of the pipeline follows this contract:
/// 1.  `encode`: take raw bytes and turn them into the stage's output form.
/// 2.  `decode`: take that output and return exactly the original bytes, or fail.
pub trait Codec {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;
}
