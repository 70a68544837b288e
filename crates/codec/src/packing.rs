//! Byte <-> quaternary symbol packing.
//!
//! Each byte becomes four 2-bit symbols, most significant pair first:
//! `0b11_00_10_10` packs to `[3, 0, 2, 2]`. Unpacking requires whole bytes;
//! a stream whose length is not a multiple of 4 is rejected rather than
//! truncated.

use crate::error::CodecError;
use crate::traits::Codec;

/// Symbols produced per byte.
pub const SYMBOLS_PER_BYTE: usize = 4;

/// Split bytes into 2-bit symbols, MSB first.
pub fn to_symbols(bytes: &[u8]) -> Vec<u8> {
    let mut symbols = Vec::with_capacity(bytes.len() * SYMBOLS_PER_BYTE);
    for &byte in bytes {
        for i in 0..SYMBOLS_PER_BYTE {
            symbols.push((byte >> (2 * (3 - i))) & 0x03);
        }
    }
    symbols
}

/// Reassemble bytes from 2-bit symbols.
///
/// # Errors
/// * `PartialByte` when `symbols.len()` is not a multiple of 4.
/// * `InvalidSymbol` for any value above 3.
pub fn to_bytes(symbols: &[u8]) -> Result<Vec<u8>, CodecError> {
    if symbols.len() % SYMBOLS_PER_BYTE != 0 {
        return Err(CodecError::PartialByte { len: symbols.len() });
    }

    let mut bytes = Vec::with_capacity(symbols.len() / SYMBOLS_PER_BYTE);
    let mut byte: u8 = 0;
    for (i, &value) in symbols.iter().enumerate() {
        if value > 3 {
            return Err(CodecError::InvalidSymbol { index: i, value });
        }
        let shift = 2 * (3 - (i % SYMBOLS_PER_BYTE));
        byte |= value << shift;
        if (i + 1) % SYMBOLS_PER_BYTE == 0 {
            bytes.push(byte);
            byte = 0;
        }
    }
    Ok(bytes)
}

/// `Codec` view of the packer: bytes in, one symbol per output byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolPacker;

impl Codec for SymbolPacker {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(to_symbols(data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        to_bytes(data)
    }
}
