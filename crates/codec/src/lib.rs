//! Byte-level framing for DNA storage.
//!
//! Provides the two byte-side stages of the dnavault pipeline: a systematic
//! Reed-Solomon code over GF(256) and the packing of bytes into 2-bit
//! quaternary symbols.

mod error;
pub mod galois;
pub mod packing;
mod reed_solomon;
mod traits;

pub use error::CodecError;
pub use packing::{to_bytes, to_symbols, SymbolPacker};
pub use reed_solomon::{Corrected, ReedSolomon, RS_BLOCK_SIZE};
pub use traits::Codec;
